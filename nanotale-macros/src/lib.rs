//! Derive macro for structured model output.
//!
//! `#[derive(OutputShape)]` turns a plain struct into a declared response
//! shape: a JSON schema the model must fill in, packaged as a Claude tool so
//! the request can force the model to answer through it.
//!
//! # Example
//!
//! ```ignore
//! /// Record the finished story
//! #[derive(OutputShape, Deserialize)]
//! #[shape(name = "record_story")]
//! struct StoryResult {
//!     /// A fitting, human-sounding title
//!     title: String,
//!     /// The story itself
//!     story: String,
//!     /// Optional author note
//!     note: Option<String>,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, ExprLit, Field, Fields,
    GenericArgument, Lit, LitStr, PathArguments, Type,
};

/// Derive a declared output shape for a struct with named fields.
///
/// # Attributes
///
/// - `#[shape(name = "...")]` on the struct: tool name (defaults to the snake_case struct name)
/// - `#[shape(rename = "...")]` on a field: property name in the schema
/// - `#[shape(optional)]` on a field: leave it out of `required`
///
/// `Option<T>` fields are never required.
#[proc_macro_derive(OutputShape, attributes(shape))]
pub fn derive_output_shape(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

struct FieldShape {
    name: String,
    description: String,
    schema: TokenStream2,
    required: bool,
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "OutputShape needs a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "OutputShape can only be derived for structs",
            ))
        }
    };

    let shape_name = struct_shape_name(&input)?;
    let description = doc_text(&input.attrs);

    let shapes = fields
        .iter()
        .map(field_shape)
        .collect::<syn::Result<Vec<_>>>()?;

    let inserts = shapes.iter().map(|f| {
        let name = &f.name;
        let schema = &f.schema;
        let describe = if f.description.is_empty() {
            quote! {}
        } else {
            let text = &f.description;
            quote! { property["description"] = ::serde_json::Value::from(#text); }
        };
        quote! {
            {
                let mut property = #schema;
                #describe
                properties.insert(#name.to_string(), property);
            }
        }
    });

    let required = shapes.iter().filter(|f| f.required).map(|f| &f.name);

    Ok(quote! {
        impl #ident {
            /// Name the model sees for this output shape.
            pub fn shape_name() -> &'static str {
                #shape_name
            }

            /// Description taken from the type's doc comment.
            pub fn shape_description() -> &'static str {
                #description
            }

            /// JSON schema the model's answer has to satisfy.
            pub fn json_schema() -> ::serde_json::Value {
                let mut properties = ::serde_json::Map::new();
                #(#inserts)*

                ::serde_json::json!({
                    "type": "object",
                    "properties": properties,
                    "required": [#(#required),*]
                })
            }

            /// The shape as a Claude tool definition.
            pub fn as_tool() -> ::claude::Tool {
                ::claude::Tool {
                    name: Self::shape_name().to_string(),
                    description: Self::shape_description().to_string(),
                    input_schema: Self::json_schema(),
                }
            }
        }
    })
}

fn struct_shape_name(input: &DeriveInput) -> syn::Result<String> {
    let mut name = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("shape")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(name.unwrap_or_else(|| snake_case(&input.ident.to_string())))
}

fn field_shape(field: &Field) -> syn::Result<FieldShape> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "field must be named"));
    };

    let mut name = ident.to_string();
    let mut optional = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("shape")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                name = value.value();
                Ok(())
            } else if meta.path.is_ident("optional") {
                optional = true;
                Ok(())
            } else {
                Err(meta.error("expected `rename = \"...\"` or `optional`"))
            }
        })?;
    }

    Ok(FieldShape {
        name,
        description: doc_text(&field.attrs),
        schema: schema_for(&field.ty),
        required: !optional && option_inner(&field.ty).is_none(),
    })
}

fn doc_text(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Last path segment and its single generic argument, if any.
fn last_segment(ty: &Type) -> Option<(String, Option<&Type>)> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    let inner = match &segment.arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(t) => Some(t),
            _ => None,
        }),
        _ => None,
    };
    Some((segment.ident.to_string(), inner))
}

fn option_inner(ty: &Type) -> Option<&Type> {
    match last_segment(ty) {
        Some((ident, inner)) if ident == "Option" => inner,
        _ => None,
    }
}

fn schema_for(ty: &Type) -> TokenStream2 {
    if let Type::Reference(reference) = ty {
        return schema_for(&reference.elem);
    }

    let Some((ident, inner)) = last_segment(ty) else {
        return quote! { ::serde_json::json!({}) };
    };

    match (ident.as_str(), inner) {
        ("String" | "str", _) => quote! { ::serde_json::json!({"type": "string"}) },
        ("bool", _) => quote! { ::serde_json::json!({"type": "boolean"}) },
        ("f32" | "f64", _) => quote! { ::serde_json::json!({"type": "number"}) },
        ("u8" | "u16" | "u32" | "u64" | "usize" | "i8" | "i16" | "i32" | "i64" | "isize", _) => {
            quote! { ::serde_json::json!({"type": "integer"}) }
        }
        ("Option", Some(inner)) => schema_for(inner),
        ("Vec", Some(inner)) => {
            let items = schema_for(inner);
            quote! { ::serde_json::json!({"type": "array", "items": #items}) }
        }
        _ => quote! { ::serde_json::json!({"type": "object"}) },
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.char_indices() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
