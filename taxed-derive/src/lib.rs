use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Derive macro generating CSV column documentation from struct fields.
///
/// For each named field it records the column name (honouring
/// `#[serde(rename = "...")]`), whether the column is required (any
/// non-`Option` type), and a description taken from the field's doc
/// comment. The result is exposed as a `csv_schema()` method returning
/// `&'static [CsvField]`; the `CsvField` struct must be in scope at the
/// derive site.
#[proc_macro_derive(CsvSchema, attributes(serde))]
pub fn derive_csv_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => panic!("CsvSchema requires named fields"),
        },
        _ => panic!("CsvSchema can only be derived for structs"),
    };

    let entries = fields.iter().map(|field| {
        let ident = field.ident.as_ref().unwrap().to_string();
        let column = serde_rename(&field.attrs).unwrap_or(ident);
        let required = !is_option(&field.ty);
        let description = doc_comment(&field.attrs);
        quote! {
            CsvField {
                name: #column,
                required: #required,
                description: #description,
            }
        }
    });

    let expanded = quote! {
        impl #name {
            /// Column documentation generated from the struct definition.
            pub fn csv_schema() -> &'static [CsvField] {
                static SCHEMA: &[CsvField] = &[#(#entries),*];
                SCHEMA
            }
        }
    };

    TokenStream::from(expanded)
}

fn serde_rename(attrs: &[syn::Attribute]) -> Option<String> {
    let mut rename = None;
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                rename = Some(meta.value()?.parse::<syn::LitStr>()?.value());
            } else if let Ok(value) = meta.value() {
                // Other name = value pairs must still be consumed
                value.parse::<Lit>()?;
            }
            Ok(())
        });
    }
    rename
}

fn doc_comment(attrs: &[syn::Attribute]) -> String {
    let mut lines = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(nv) = &attr.meta {
            if let syn::Expr::Lit(expr) = &nv.value {
                if let Lit::Str(lit) = &expr.lit {
                    lines.push(lit.value().trim().to_string());
                }
            }
        }
    }
    lines.join(" ")
}

fn is_option(ty: &Type) -> bool {
    if let Type::Path(path) = ty {
        path.path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option")
    } else {
        false
    }
}
