use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Derive macro exposing a struct's fields to `structfield::transform()`.
///
/// Generates a `structfield::Record` impl with:
///
/// - `schema()` — field list with resolved tags, built once and cached.
/// - `field_is_empty(index)` — zero-value test, only for `omitempty` fields.
/// - `field_value(index)` — field encoded as `serde_json::Value`.
///
/// Every field type must implement `serde::Serialize`, except fields
/// tagged `-`, which are never read. For `omitempty` fields, emptiness is
/// `structfield::IsEmpty` when the type implements it; other types (nested
/// records, for instance) are never empty.
///
/// # Example
///
/// ```ignore
/// #[derive(Record, Serialize)]
/// pub struct User {
///     #[structfield("id")]
///     pub id: String,
///
///     #[structfield("friends,omitempty")]
///     pub friends: Vec<User>,
///
///     #[structfield("-")]
///     pub password_hash: String,
///
///     // No tag: output name is `age`.
///     pub age: u32,
/// }
/// ```
///
/// `#[structfield(tag = "...")]` is accepted as a longer spelling.
#[proc_macro_derive(Record, attributes(structfield))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let name_str = name.to_string();

    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record only supports structs",
            ))
        }
    };

    let mut descriptor_tokens = Vec::new();
    let mut is_empty_tokens = Vec::new();
    let mut value_tokens = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let field_name = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;
        let ident_str = unraw(&field_name.to_string());
        let tag = field_tag(field)?;

        descriptor_tokens.push(quote! { (#ident_str, #tag) });

        // Excluded fields are never read: no bounds on their type.
        if is_skip(&tag) {
            continue;
        }

        // Types without `IsEmpty` are never empty.
        if has_omit_empty(&tag) {
            is_empty_tokens.push(quote! {
                #index => {
                    use ::structfield::__private::{KnownEmpty as _, NeverEmpty as _};
                    (&::structfield::__private::EmptyCheck(&self.#field_name)).check_empty()
                }
            });
        }

        value_tokens.push(quote! {
            #index => ::structfield::__private::serde_json::to_value(&self.#field_name),
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::structfield::Record for #name #ty_generics #where_clause {
            fn schema(&self) -> &'static ::structfield::Schema {
                static SCHEMA: ::std::sync::OnceLock<::structfield::Schema> = ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| ::structfield::Schema::new(#name_str, &[
                    #(#descriptor_tokens),*
                ]))
            }

            fn field_is_empty(&self, index: usize) -> bool {
                match index {
                    #(#is_empty_tokens)*
                    _ => false,
                }
            }

            fn field_value(
                &self,
                index: usize,
            ) -> ::std::result::Result<
                ::structfield::__private::serde_json::Value,
                ::structfield::__private::serde_json::Error,
            > {
                match index {
                    #(#value_tokens)*
                    _ => ::std::result::Result::Ok(::structfield::__private::serde_json::Value::Null),
                }
            }
        }
    };

    Ok(expanded)
}

/// Read the raw tag from `#[structfield("...")]` or `#[structfield(tag = "...")]`.
///
/// A field without the attribute has an empty tag.
fn field_tag(field: &syn::Field) -> Result<String, syn::Error> {
    let mut tag: Option<String> = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("structfield") {
            continue;
        }
        if tag.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[structfield] attribute"));
        }
        if let Ok(lit) = attr.parse_args::<LitStr>() {
            tag = Some(lit.value());
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("tag") {
                let value: LitStr = meta.value()?.parse()?;
                tag = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected #[structfield(\"name,options\")] or #[structfield(tag = \"...\")]"))
            }
        })?;
    }

    Ok(tag.unwrap_or_default())
}

/// Same test as `structfield::FieldTag::is_skip()`.
fn is_skip(tag: &str) -> bool {
    tag.split(',').next().map(str::trim) == Some("-")
}

/// Same option scan as `structfield::FieldTag::omit_empty()`.
fn has_omit_empty(tag: &str) -> bool {
    tag.split(',').skip(1).any(|option| option == "omitempty")
}

/// `r#type` → `type`.
fn unraw(ident: &str) -> String {
    ident.strip_prefix("r#").unwrap_or(ident).to_string()
}
