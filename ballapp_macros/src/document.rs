use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

pub fn derive_document(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let collection = extract_collection(&input);

    let fields = match named_fields(&input) {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let id_field = match marked_field(&fields, "id") {
        Some(field) => field,
        None => {
            return syn::Error::new_spanned(
                name,
                "Document derive: no field marked with #[document(id)] and no field named `id`",
            )
            .to_compile_error()
            .into()
        }
    };

    let created_at_field = match marked_field(&fields, "created_at") {
        Some(field) => field,
        None => {
            return syn::Error::new_spanned(
                name,
                "Document derive: no field marked with #[document(created_at)] and no field named `created_at`",
            )
            .to_compile_error()
            .into()
        }
    };

    let expanded = quote! {
        impl ::ballapp::Document for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> ::core::option::Option<&str> {
                self.#id_field.as_deref()
            }

            fn set_id(&mut self, id: ::std::string::String) {
                self.#id_field = ::core::option::Option::Some(id);
            }

            fn created_at(&self) -> ::ballapp::Timestamp {
                self.#created_at_field
            }
        }
    };

    TokenStream::from(expanded)
}

fn extract_collection(input: &DeriveInput) -> String {
    for attr in &input.attrs {
        if !attr.path().is_ident("document") {
            continue;
        }

        let mut collection = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
            }
            Ok(())
        });

        if let Some(c) = collection {
            return c;
        }
    }

    // Default: lowerCamelCase struct name + "s"
    format!("{}s", to_lower_camel(&input.ident.to_string()))
}

fn named_fields(input: &DeriveInput) -> syn::Result<Vec<&syn::Field>> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Ok(fields.named.iter().collect());
        }
    }
    Err(syn::Error::new_spanned(
        &input.ident,
        "Document derive only supports structs with named fields",
    ))
}

/// Finds the field tagged `#[document(<marker>)]`, falling back to a field named `<marker>`.
fn marked_field(fields: &[&syn::Field], marker: &str) -> Option<Ident> {
    for field in fields {
        for attr in &field.attrs {
            if !attr.path().is_ident("document") {
                continue;
            }
            let mut found = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(marker) {
                    found = true;
                }
                Ok(())
            });
            if found {
                return field.ident.clone();
            }
        }
    }

    fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == marker)
        .cloned()
}

fn to_lower_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
