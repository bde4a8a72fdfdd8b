//! Macros for field injection

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;

/// Expands a derive-macro for Bind
pub(super) fn expand_bind(input: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let syn::Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "`Bind` can only be derived for structs"));
    };
    let syn::Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new(
            data_struct.fields.span(),
            "`Bind` can only be derived for structs with named fields"));
    };

    let mut bindings = Vec::with_capacity(fields.named.len());
    for field in &fields.named {
        if is_skipped(field)? {
            continue;
        }
        if !is_option(&field.ty) {
            return Err(syn::Error::new(
                field.ty.span(),
                "bindable fields must be of type `Option<T>`, use `#[bind(skip)]` to ignore this field"));
        }
        if let Some(ident) = &field.ident {
            bindings.push(quote! {
                binder.field(stringify!(#ident), &mut self.#ident)?;
            });
        }
    }

    Ok(quote! {
        impl #impl_generics ::trellis::Bind for #name #ty_generics #where_clause {
            fn bind_fields(
                &mut self,
                binder: &mut ::trellis::Binder<'_>
            ) -> ::core::result::Result<(), ::trellis::error::Error> {
                #(#bindings)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

fn is_skipped(field: &syn::Field) -> syn::Result<bool> {
    let mut skip = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("bind")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported bind attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

fn is_option(ty: &syn::Type) -> bool {
    let syn::Type::Path(type_path) = ty else {
        return false;
    };
    type_path.qself.is_none() && type_path.path.segments
        .last()
        .is_some_and(|segment| segment.ident == "Option"
            && matches!(segment.arguments, syn::PathArguments::AngleBracketed(_)))
}
