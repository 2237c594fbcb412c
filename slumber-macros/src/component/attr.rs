use syn::{
    ext::IdentExt as _,
    parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Field, LitStr, Meta, Path, Token, Type,
};

use crate::attr_parsing::{combine_attribute, combine_flag, parse_assignment_attribute, parse_attrs, parse_flag_attribute, Combine};

pub(crate) mod kw {
    syn::custom_keyword!(name);
    syn::custom_keyword!(name_aware);
    syn::custom_keyword!(initializable);
    syn::custom_keyword!(post_processor);
    syn::custom_keyword!(expose);
    syn::custom_keyword!(constructor);
}

pub(crate) struct ComponentArgs {
    pub(super) name: Option<(kw::name, LitStr)>,
    pub(super) name_aware: Option<kw::name_aware>,
    pub(super) initializable: Option<kw::initializable>,
    pub(super) post_processor: Option<kw::post_processor>,
    pub(super) expose: Option<(kw::expose, Punctuated<Type, Token![,]>)>,
    pub(super) constructor: Option<(kw::constructor, Path)>,
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut name_aware = None;
        let mut initializable = None;
        let mut post_processor = None;
        let mut expose = None;
        let mut constructor = None;

        if input.peek(LitStr) {
            let lit = input.parse::<LitStr>()?;
            name = Some((kw::name(lit.span()), lit));
            let _ = input.parse::<Token![,]>();
        }

        while !input.is_empty() {
            let lh = input.lookahead1();
            if lh.peek(kw::name) {
                parse_assignment_attribute(input, &mut name)?;
            } else if lh.peek(kw::name_aware) {
                parse_flag_attribute(input, &mut name_aware)?;
            } else if lh.peek(kw::initializable) {
                parse_flag_attribute(input, &mut initializable)?;
            } else if lh.peek(kw::post_processor) {
                parse_flag_attribute(input, &mut post_processor)?;
            } else if lh.peek(kw::expose) {
                let kw = input.parse::<kw::expose>()?;
                if expose.is_some() {
                    return Err(syn::Error::new_spanned(kw, "`expose` specified more than once"));
                }
                let content;
                parenthesized!(content in input);
                expose = Some((kw, content.parse_terminated(Type::parse, Token![,])?));
            } else if lh.peek(kw::constructor) {
                parse_assignment_attribute(input, &mut constructor)?;
            } else {
                return Err(lh.error());
            }

            let _ = input.parse::<Token![,]>();
        }

        Ok(Self {
            name,
            name_aware,
            initializable,
            post_processor,
            expose,
            constructor,
        })
    }
}

impl Combine for ComponentArgs {
    fn combine(mut self, other: Self) -> syn::Result<Self> {
        let Self {
            name,
            name_aware,
            initializable,
            post_processor,
            expose,
            constructor,
        } = other;
        combine_attribute(&mut self.name, name)?;
        combine_flag(&mut self.name_aware, name_aware)?;
        combine_flag(&mut self.initializable, initializable)?;
        combine_flag(&mut self.post_processor, post_processor)?;
        combine_attribute(&mut self.expose, expose)?;
        combine_attribute(&mut self.constructor, constructor)?;
        Ok(self)
    }
}

pub(crate) struct ScopeArgs {
    pub(super) scope: LitStr,
}

impl Parse for ScopeArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(Self { scope: input.parse()? })
    }
}

impl Combine for ScopeArgs {
    fn combine(self, other: Self) -> syn::Result<Self> {
        Err(syn::Error::new_spanned(other.scope, "`scope` specified more than once"))
    }
}

pub(crate) fn parse_component_attrs(attrs: &[Attribute]) -> Option<syn::Result<ComponentArgs>> {
    parse_attrs("component", attrs).map(|result| result.map_err(|(err, attr)| syn::Error::new_spanned(attr, err)))
}

pub(crate) fn parse_scope_attrs(attrs: &[Attribute]) -> Option<syn::Result<ScopeArgs>> {
    parse_attrs("scope", attrs).map(|result| result.map_err(|(err, attr)| syn::Error::new_spanned(attr, err)))
}

/// Target name of an `#[autowired]` field, defaulting to the field's own identifier
pub(crate) fn parse_autowired_attr(field: &Field) -> syn::Result<Option<LitStr>> {
    let mut attrs = field.attrs.iter().filter(|attr| attr.path().is_ident("autowired"));

    let Some(attr) = attrs.next() else {
        return Ok(None);
    };
    if let Some(duplicate) = attrs.next() {
        return Err(syn::Error::new_spanned(duplicate, "`autowired` specified more than once"));
    }

    let Some(ident) = &field.ident else {
        return Err(syn::Error::new_spanned(attr, "`autowired` can only be used on named fields"));
    };

    match &attr.meta {
        Meta::Path(_) => Ok(Some(LitStr::new(&ident.unraw().to_string(), ident.span()))),
        Meta::List(_) => attr.parse_args::<LitStr>().map(Some),
        Meta::NameValue(_) => Err(syn::Error::new_spanned(attr, "expected `#[autowired]` or `#[autowired(\"name\")]`")),
    }
}
