//! Procedural macros shared by the seriate workspace.

mod lkh_display;
mod timer;

use proc_macro::TokenStream;

/// Logs the wall-clock time spent inside the annotated function at debug level.
///
/// `#[timer("label")]` uses `label` in the log line, `#[timer]` falls back to
/// the function name.
#[proc_macro_attribute]
pub fn timer(attr: TokenStream, item: TokenStream) -> TokenStream {
    timer::timer_inner(attr, item)
}

/// Implements `Display` for unit enums using TSPLIB/LKH keyword spelling.
#[proc_macro_derive(LkhDisplay, attributes(lkh))]
pub fn derive_lkh_display(input: TokenStream) -> TokenStream {
    lkh_display::derive_lkh_display_inner(input)
}
