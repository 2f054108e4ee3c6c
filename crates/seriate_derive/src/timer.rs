use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, parse_macro_input};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let func = parse_macro_input!(item as ItemFn);

    let label = if attr.is_empty() {
        func.sig.ident.to_string()
    } else {
        match syn::parse::<LitStr>(attr) {
            Ok(lit) => lit.value(),
            Err(err) => return err.to_compile_error().into(),
        }
    };

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = func;
    let stmts = &block.stmts;

    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            struct __SeriateTimer(&'static str, ::std::time::Instant);

            impl ::std::ops::Drop for __SeriateTimer {
                fn drop(&mut self) {
                    ::log::debug!(
                        "{}: elapsed={:.3}s",
                        self.0,
                        self.1.elapsed().as_secs_f64()
                    );
                }
            }

            let __seriate_timer = __SeriateTimer(#label, ::std::time::Instant::now());
            #(#stmts)*
        }
    };

    TokenStream::from(expanded)
}
