use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use std::env::var_os;
use syn::parse::Parse;

mod attr_parsing;
mod component;

/// Implements `slumber::Component` and registers the type in the link-time catalog under its module path.
///
/// ## Attributes
/// - `#[component("name")]` / `#[component(name = "name")]`: registers the type as a component.
///   Flags: `name_aware`, `initializable`, `post_processor`, `expose(dyn Trait, ..)`, `constructor = path`.
/// - `#[scope("singleton" | "prototype")]`
/// - `#[autowired]` / `#[autowired("name")]` on fields of type `Option<Bean>` or `Option<Arc<I>>`
///
/// Without `constructor`, the type must implement `Default`.
#[proc_macro_derive(Component, attributes(component, scope, autowired))]
pub fn derive_component(item: TokenStream) -> TokenStream {
    expand_with(item, component::expand)
}

fn expand_with<F, I, K>(input: TokenStream, f: F) -> TokenStream
where
    F: FnOnce(I) -> syn::Result<K>,
    I: Parse,
    K: ToTokens,
{
    expand(syn::parse(input).and_then(f))
}

fn expand<T>(result: syn::Result<T>) -> TokenStream
where
    T: ToTokens,
{
    match result {
        Ok(tokens) => {
            let tokens = (quote! { #tokens }).into();
            if var_os("SLUMBER_MACROS_DEBUG").is_some() {
                eprintln!("{tokens}");
            }
            tokens
        }
        Err(err) => err.into_compile_error().into(),
    }
}
