//! Derive macros for populate.
//!
//! `#[derive(Populate)]` describes a struct or a fieldless enum to the
//! generation engine. `#[stub]` turns a trait of accessors into an interface
//! that random stubs can implement.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, parse_quote, Data, DataEnum, DataStruct, DeriveInput, Fields, FnArg,
    Generics, Index, ItemTrait, LitInt, ReturnType, TraitItem, TraitItemFn,
};

/// Derive `populate::Reflect` for a struct or a fieldless enum.
///
/// Structs must also implement `Default` (population starts from the default
/// value) and `Clone`. Field attributes:
///
/// - `#[populate(id)]`: identity field, not populated unless configured;
///   fields named `id` are identities already.
/// - `#[populate(skip)]`: immutable field, not populated unless configured.
/// - `#[populate(max_length = N)]`: maximum length of the generated value.
///
/// # Example
///
/// ```rust,ignore
/// use populate::*;
///
/// #[derive(Populate, Debug, Clone, Default)]
/// struct User {
///     id: u64,
///     #[populate(max_length = 20)]
///     name: String,
///     email: Option<String>,
/// }
///
/// let user: User = new_instance().unwrap();
/// assert_eq!(user.id, 0);
/// ```
#[proc_macro_derive(Populate, attributes(populate))]
pub fn derive_populate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match populate_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Generate the implementation of the Reflect trait.
fn populate_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    match &input.data {
        Data::Struct(data) => struct_impl(input, data),
        Data::Enum(data) => enum_impl(input, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            input,
            "Populate derive macro does not support unions",
        )),
    }
}

#[derive(Default)]
struct FieldAttrs {
    identity: bool,
    immutable: bool,
    max_length: Option<LitInt>,
}

fn field_attrs(field: &syn::Field) -> Result<FieldAttrs, syn::Error> {
    let mut attrs = FieldAttrs::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("populate")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                attrs.identity = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                attrs.immutable = true;
                Ok(())
            } else if meta.path.is_ident("max_length") {
                attrs.max_length = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `id`, `skip` or `max_length = N`"))
            }
        })?;
    }
    Ok(attrs)
}

/// Bound every type parameter by `Reflect`.
fn reflect_generics(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::populate::Reflect));
    }
    generics
}

fn struct_impl(input: &DeriveInput, data: &DataStruct) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let mut generics = reflect_generics(&input.generics);
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: ::std::clone::Clone + ::std::default::Default));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut defs = Vec::new();
    let mut assignments = Vec::new();
    for (i, field) in data.fields.iter().enumerate() {
        let ty = &field.ty;
        let (label, member) = match &field.ident {
            Some(ident) => (ident.to_string(), quote!(#ident)),
            None => {
                let index = Index::from(i);
                (i.to_string(), quote!(#index))
            }
        };
        let attrs = field_attrs(field)?;

        let mut def = quote! {
            ::populate::FieldDef::new(#label, <#ty as ::populate::Reflect>::type_desc())
        };
        if let Some(length) = &attrs.max_length {
            def = quote!(#def.max_length(#length));
        }
        if attrs.identity {
            def = quote!(#def.identity());
        }
        if attrs.immutable {
            def = quote!(#def.immutable());
        }
        defs.push(def);

        assignments.push(quote! {
            #label => target.#member = <#ty as ::populate::Reflect>::from_value(value)?,
        });
    }

    let fill = if matches!(data.fields, Fields::Unit) {
        quote! {
            if let Some((field, _)) = record.into_present().next() {
                return Err(::populate::PopulateError::unknown_field(
                    ::std::any::type_name::<Self>(),
                    field,
                ));
            }
        }
    } else {
        quote! {
            for (field, value) in record.into_present() {
                match field {
                    #(#assignments)*
                    other => {
                        return Err(::populate::PopulateError::unknown_field(
                            ::std::any::type_name::<Self>(),
                            other,
                        ))
                    }
                }
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::populate::Reflect for #name #ty_generics #where_clause {
            fn type_desc() -> ::populate::TypeDesc {
                ::populate::TypeDesc::Struct(::populate::StructDesc::new::<Self>(|| {
                    ::std::vec![#(#defs),*]
                }))
            }

            fn from_value(value: ::populate::Value) -> ::populate::Result<Self> {
                match value {
                    ::populate::Value::Record(record) => {
                        #[allow(unused_mut)]
                        let mut target: Self = ::std::default::Default::default();
                        #fill
                        Ok(target)
                    }
                    other => other.into_custom::<Self>(),
                }
            }
        }
    })
}

fn enum_impl(input: &DeriveInput, data: &DataEnum) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let generics = reflect_generics(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut constants = Vec::new();
    let mut arms = Vec::new();
    for (i, variant) in data.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Populate derive macro only supports enums with unit variants",
            ));
        }
        let ident = &variant.ident;
        constants.push(ident.to_string());
        arms.push(quote!(#i => Ok(Self::#ident),));
    }

    Ok(quote! {
        impl #impl_generics ::populate::Reflect for #name #ty_generics #where_clause {
            fn type_desc() -> ::populate::TypeDesc {
                ::populate::TypeDesc::Enum(::populate::EnumDesc::new::<Self>(&[#(#constants),*]))
            }

            fn from_value(value: ::populate::Value) -> ::populate::Result<Self> {
                match value.into_enum_index::<Self>()? {
                    #(#arms)*
                    index => Err(::populate::PopulateError::internal(::std::format!(
                        "{} has no constant at index {}",
                        ::std::any::type_name::<Self>(),
                        index
                    ))),
                }
            }
        }
    })
}

/// Generate a random stub for a trait of accessors.
///
/// Every method without a default body must have the form
/// `fn name(&self) -> T` with `T: Reflect`. The macro keeps the trait and
/// adds `<Trait>Stub`, which implements it by returning memoized random
/// values. Build one with `Populator::stub::<<Trait>Stub>()`.
///
/// # Example
///
/// ```rust,ignore
/// use populate::*;
///
/// #[stub]
/// pub trait Account {
///     fn owner(&self) -> String;
///     fn balance(&self) -> i64;
/// }
///
/// let account: AccountStub = Populator::new().stub();
/// assert_eq!(account.owner(), account.owner());
/// ```
#[proc_macro_attribute]
pub fn stub(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(Span::call_site(), "#[stub] takes no arguments")
            .to_compile_error()
            .into();
    }
    let item = parse_macro_input!(item as ItemTrait);

    match stub_impl(&item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn accessor(method: &TraitItemFn) -> Result<Option<(&syn::Ident, &syn::Type)>, syn::Error> {
    if method.default.is_some() {
        return Ok(None);
    }
    let sig = &method.sig;
    let by_ref = matches!(
        sig.inputs.first(),
        Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() && receiver.mutability.is_none()
    );
    if !by_ref || sig.inputs.len() != 1 || !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            sig,
            "#[stub] accessors must have the form `fn name(&self) -> T`",
        ));
    }
    match &sig.output {
        ReturnType::Type(_, ty) => Ok(Some((&sig.ident, &**ty))),
        ReturnType::Default => Err(syn::Error::new_spanned(
            sig,
            "#[stub] accessors must return a value",
        )),
    }
}

fn stub_impl(item: &ItemTrait) -> Result<TokenStream2, syn::Error> {
    if !item.generics.params.is_empty() || !item.supertraits.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.ident,
            "#[stub] does not support generic traits or supertraits",
        ));
    }

    let mut accessors = Vec::new();
    for trait_item in &item.items {
        match trait_item {
            TraitItem::Fn(method) => {
                if let Some(accessor) = accessor(method)? {
                    accessors.push(accessor);
                }
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "#[stub] traits may only contain methods",
                ))
            }
        }
    }

    let vis = &item.vis;
    let trait_name = &item.ident;
    let stub_name = format_ident!("{}Stub", trait_name);
    let doc = format!("Random stub implementing [`{trait_name}`].");

    let methods = accessors.iter().map(|(ident, ty)| {
        quote! {
            ::populate::MethodDef::new(
                ::std::stringify!(#ident),
                <#ty as ::populate::Reflect>::type_desc(),
            )
        }
    });
    let impls = accessors.iter().map(|(ident, ty)| {
        quote! {
            fn #ident(&self) -> #ty {
                self.0.accessor(::std::stringify!(#ident))
            }
        }
    });

    Ok(quote! {
        #item

        #[doc = #doc]
        #[derive(Clone, Debug, PartialEq)]
        #vis struct #stub_name(::populate::Stub);

        impl ::populate::Interface for #stub_name {
            fn interface() -> ::populate::InterfaceDesc {
                ::populate::InterfaceDesc::new::<Self>(
                    ::std::concat!(::std::module_path!(), "::", ::std::stringify!(#trait_name)),
                    || ::std::vec![#(#methods),*],
                )
            }

            fn from_stub(stub: ::populate::Stub) -> Self {
                #stub_name(stub)
            }
        }

        impl ::populate::Reflect for #stub_name {
            fn type_desc() -> ::populate::TypeDesc {
                ::populate::TypeDesc::Interface(<Self as ::populate::Interface>::interface())
            }

            fn from_value(value: ::populate::Value) -> ::populate::Result<Self> {
                value.into_stub().map(#stub_name)
            }
        }

        impl #trait_name for #stub_name {
            #(#impls)*
        }

        impl ::std::fmt::Display for #stub_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }
    })
}
