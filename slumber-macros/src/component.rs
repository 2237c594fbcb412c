mod attr;

use crate::component::attr::{parse_autowired_attr, parse_component_attrs, parse_scope_attrs, ComponentArgs};

use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{ext::IdentExt as _, spanned::Spanned as _, Data, DeriveInput, Error, Fields, Ident, LitStr, Member};

struct Autowired {
    member: Member,
    field: LitStr,
    target: LitStr,
}

fn collect_autowired(data: &Data) -> syn::Result<Box<[Autowired]>> {
    let fields = match data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(Error::new_spanned(data.enum_token, "#[derive(Component)] can only be used on structs"));
        }
        Data::Union(data) => {
            return Err(Error::new_spanned(data.union_token, "#[derive(Component)] can only be used on structs"));
        }
    };

    match fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .filter_map(|field| match parse_autowired_attr(field) {
                Ok(Some(target)) => field.ident.as_ref().map(|ident| {
                    Ok(Autowired {
                        member: Member::Named(ident.clone()),
                        field: LitStr::new(&ident.unraw().to_string(), ident.span()),
                        target,
                    })
                }),
                Ok(None) => None,
                Err(err) => Some(Err(err)),
            })
            .collect(),
        Fields::Unnamed(fields) => {
            for field in &fields.unnamed {
                parse_autowired_attr(field)?;
            }
            Ok(Box::new([]))
        }
        Fields::Unit => Ok(Box::new([])),
    }
}

fn generate_inject(autowired: &[Autowired]) -> TokenStream {
    if autowired.is_empty() {
        return quote! {};
    }

    let arms = autowired.iter().map(|Autowired { member, field, .. }| {
        quote_spanned! { field.span() =>
            #field => ::slumber::macros_utils::inject(&mut self.#member, #field, bean),
        }
    });

    quote! {
        fn inject(&mut self, field: &str, bean: ::slumber::Bean) -> ::core::result::Result<(), ::slumber::InjectErrorKind> {
            match field {
                #( #arms )*
                _ => ::core::result::Result::Err(::slumber::InjectErrorKind::UnknownField {
                    field: ::core::convert::Into::into(field),
                }),
            }
        }
    }
}

fn generate_capabilities(args: Option<&ComponentArgs>) -> TokenStream {
    let name_aware = args.and_then(|args| args.name_aware.as_ref()).map(|kw| {
        quote_spanned! { kw.span =>
            fn as_name_aware(&mut self) -> ::core::option::Option<&mut dyn ::slumber::NameAware> {
                ::core::option::Option::Some(self)
            }
        }
    });
    let initializable = args.and_then(|args| args.initializable.as_ref()).map(|kw| {
        quote_spanned! { kw.span =>
            fn as_initializable(&mut self) -> ::core::option::Option<&mut dyn ::slumber::Initializable> {
                ::core::option::Option::Some(self)
            }
        }
    });

    quote! {
        #name_aware
        #initializable
    }
}

fn generate_expose(args: Option<&ComponentArgs>) -> TokenStream {
    let interfaces = args
        .and_then(|args| args.expose.as_ref())
        .map(|(_, types)| types.iter().collect::<Box<[_]>>())
        .unwrap_or_default();

    let exposed = interfaces.iter().map(|ty| {
        quote_spanned! { ty.span() =>
            interfaces.expose::<#ty>(::slumber::macros_utils::Arc::clone(&self) as ::slumber::macros_utils::Arc<#ty>);
        }
    });

    quote! {
        fn expose(self: ::slumber::macros_utils::Arc<Self>, interfaces: &mut ::slumber::Interfaces) {
            #( #exposed )*
            interfaces.expose::<Self>(self);
        }
    }
}

fn generate_unit(ident: &Ident, args: Option<&ComponentArgs>, scope: Option<&LitStr>, autowired: &[Autowired]) -> TokenStream {
    let unit_name = format_ident!("__SLUMBER_UNIT_{}", ident.unraw());

    let component = args.and_then(|args| args.name.as_ref()).map(|(_, name)| quote! { .component(#name) });
    let scope = scope.map(|scope| quote! { .scope(#scope) });
    let autowired = autowired
        .iter()
        .map(|Autowired { field, target, .. }| quote! { .autowired(#field, #target) });

    let post_processor = args.and_then(|args| args.post_processor.as_ref()).is_some();
    let constructor = args.and_then(|args| args.constructor.as_ref()).map(|(_, path)| path);

    let constructor = match (post_processor, constructor) {
        (true, Some(path)) => quote! {
            .post_processor(|| ::slumber::macros_utils::construct_post_processor(#path))
        },
        (true, None) => quote! {
            .post_processor(::slumber::macros_utils::default_post_processor::<#ident>)
        },
        (false, Some(path)) => quote! {
            .constructor(|| ::slumber::macros_utils::construct(#path))
        },
        (false, None) => quote! {
            .constructor(::slumber::macros_utils::default_constructor::<#ident>)
        },
    };

    quote_spanned! { ident.span() =>
        #[::slumber::unit::distributed_slice(::slumber::unit::__UNITS)]
        #[linkme(crate = ::slumber::unit::linkme)]
        #[allow(non_upper_case_globals)]
        static #unit_name: fn() -> ::slumber::Unit = || {
            ::slumber::Unit::new::<#ident>(::core::module_path!())
                #component
                #scope
                #( #autowired )*
                #constructor
        };
    }
}

pub(crate) fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(&input.generics, "#[derive(Component)] doesn't support generic types"));
    }

    let args = parse_component_attrs(&input.attrs).transpose()?;
    let scope = parse_scope_attrs(&input.attrs).transpose()?;
    let autowired = collect_autowired(&input.data)?;

    if args.as_ref().is_some_and(|args| args.name.is_none()) {
        return Err(Error::new_spanned(&input.ident, "`component` requires a name, e.g. `#[component(\"userService\")]`"));
    }

    let ident = &input.ident;
    let inject = generate_inject(&autowired);
    let capabilities = generate_capabilities(args.as_ref());
    let expose = generate_expose(args.as_ref());
    let unit = generate_unit(ident, args.as_ref(), scope.as_ref().map(|scope| &scope.scope), &autowired);

    Ok(quote! {
        impl ::slumber::Component for #ident {
            #inject
            #capabilities
            #expose
        }

        #unit
    })
}

#[cfg(test)]
mod tests {
    use super::expand;

    use syn::{parse_quote, DeriveInput};

    fn expand_err(input: DeriveInput) -> String {
        match expand(input) {
            Ok(tokens) => panic!("expected an error, got `{tokens}`"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn test_marker_requires_name() {
        let exposed = expand_err(parse_quote! {
            #[component(expose(dyn Greeter))]
            struct Nameless;
        });
        assert!(exposed.contains("requires a name"));

        let constructed = expand_err(parse_quote! {
            #[component(constructor = Nameless::open)]
            struct Nameless;
        });
        assert!(constructed.contains("requires a name"));
    }

    #[test]
    fn test_name_in_another_attribute() {
        let input: DeriveInput = parse_quote! {
            #[component("greeter")]
            #[component(expose(dyn Greeter))]
            struct Named;
        };

        assert!(expand(input).is_ok());
    }

    #[test]
    fn test_unit_static_keeps_case() {
        let lower = expand(parse_quote! {
            struct Foo;
        })
        .unwrap()
        .to_string();
        let upper = expand(parse_quote! {
            struct FOO;
        })
        .unwrap()
        .to_string();

        assert!(lower.contains("__SLUMBER_UNIT_Foo"));
        assert!(upper.contains("__SLUMBER_UNIT_FOO"));
    }

    #[test]
    fn test_raw_field_name() {
        let tokens = expand(parse_quote! {
            #[component("user")]
            struct User {
                #[autowired]
                r#type: Option<Bean>,
            }
        })
        .unwrap()
        .to_string();

        assert!(tokens.contains("\"type\""));
        assert!(!tokens.contains("\"r#type\""));
    }
}
