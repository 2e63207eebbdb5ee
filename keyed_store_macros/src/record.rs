use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr};

pub fn derive_record(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let collection = extract_collection(&input)?;
    let fields = named_fields(&input)?;

    let mut marked = marked_fields(fields)?;
    let id_field = resolve_field(marked.remove("id"), fields, "id", name)?;
    let name_field = resolve_field(marked.remove("name"), fields, "name", name)?;
    let quantity_field = resolve_field(marked.remove("quantity"), fields, "quantity", name)?;

    Ok(quote! {
        impl #impl_generics keyed_store::Record for #name #ty_generics #where_clause {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> keyed_store::RecordId {
                self.#id_field
            }

            fn name(&self) -> &str {
                &self.#name_field
            }

            fn quantity(&self) -> keyed_store::Quantity {
                self.#quantity_field
            }

            fn set_quantity(&mut self, quantity: keyed_store::Quantity) {
                self.#quantity_field = quantity;
            }
        }
    })
}

fn extract_collection(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        let mut collection = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `collection = \"...\"`"))
            }
        })?;

        if let Some(c) = collection {
            return Ok(c);
        }
    }

    // Default: snake_case struct name + "s"
    Ok(format!("{}s", to_snake_case(&input.ident.to_string())))
}

type NamedFields = syn::punctuated::Punctuated<Field, syn::Token![,]>;

fn named_fields(input: &DeriveInput) -> syn::Result<&NamedFields> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                &input.ident,
                "Record derive requires a struct with named fields",
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            "Record derive can only be used on structs",
        )),
    }
}

const ROLES: [&str; 3] = ["id", "name", "quantity"];

/// Collects the fields marked `#[record(<role>)]`, keyed by role.
fn marked_fields(fields: &NamedFields) -> syn::Result<HashMap<&'static str, Ident>> {
    let mut marked = HashMap::new();
    for field in fields {
        let Some(ident) = &field.ident else { continue };
        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let Some(role) = ROLES.iter().find(|role| meta.path.is_ident(role)) else {
                    return Err(meta.error("expected `id`, `name` or `quantity`"));
                };
                if marked.insert(*role, ident.clone()).is_some() {
                    return Err(syn::Error::new_spanned(
                        &meta.path,
                        format!("duplicate #[record({role})] field"),
                    ));
                }
                Ok(())
            })?;
        }
    }
    Ok(marked)
}

/// Falls back to a field named `<role>` when no field is marked for it.
fn resolve_field(
    marked: Option<Ident>,
    fields: &NamedFields,
    role: &str,
    owner: &Ident,
) -> syn::Result<Ident> {
    if let Some(ident) = marked {
        return Ok(ident);
    }
    fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == role)
        .cloned()
        .ok_or_else(|| {
            syn::Error::new_spanned(
                owner,
                format!(
                    "Record derive: no field marked with #[record({role})] and no field named `{role}`"
                ),
            )
        })
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
