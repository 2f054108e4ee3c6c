use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, parse_macro_input, spanned::Spanned};

const DEFAULT_SEPARATOR: &str = "-";

/// `NearestNeighbor` -> `NEAREST-NEIGHBOR`, `FullMatrix` with `_` -> `FULL_MATRIX`.
fn keyword_for(ident: &Ident, separator: &str) -> String {
    let name = ident.to_string();
    let mut keyword = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for ch in name.chars() {
        if let Some(prev) = prev
            && ch.is_ascii_uppercase()
            && (prev.is_ascii_lowercase() || prev.is_ascii_digit())
        {
            keyword.push_str(separator);
        }
        keyword.push(ch.to_ascii_uppercase());
        prev = Some(ch);
    }

    keyword
}

fn container_separator(input: &DeriveInput) -> syn::Result<String> {
    let mut separator = DEFAULT_SEPARATOR.to_string();

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("lkh")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("separator") {
                let lit: LitStr = meta.value()?.parse()?;
                separator = lit.value();
                Ok(())
            } else {
                Err(meta.error("expected `separator = \"...\"`"))
            }
        })?;
    }

    Ok(separator)
}

pub fn derive_lkh_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let name = input.ident.clone();

    let separator = match container_separator(&input) {
        Ok(separator) => separator,
        Err(err) => return err.to_compile_error().into(),
    };

    let Data::Enum(data) = &input.data else {
        return syn::Error::new(input.span(), "LkhDisplay can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let mut arms = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(variant.span(), "LkhDisplay supports unit variants only")
                .to_compile_error()
                .into();
        }

        let ident = &variant.ident;
        let mut keyword = None;
        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("lkh")) {
            match attr.parse_args::<LitStr>() {
                Ok(lit) => keyword = Some(lit.value()),
                Err(err) => return err.to_compile_error().into(),
            }
        }
        let keyword = keyword.unwrap_or_else(|| keyword_for(ident, &separator));

        arms.push(quote! { Self::#ident => #keyword, });
    }

    let expanded = quote! {
        impl ::std::fmt::Display for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let keyword = match self {
                    #(#arms)*
                };
                f.write_str(keyword)
            }
        }
    };

    TokenStream::from(expanded)
}
