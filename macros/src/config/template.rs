//! Template generation code for Config derive macro.

use proc_macro2::TokenStream;
use quote::quote;

use crate::config::field::FieldInfo;
use crate::config::types::{format_default_for_type, type_to_string};

/// Generate template code (TokenStream) for fields
pub fn generate_template_code(fields: &[&FieldInfo]) -> TokenStream {
    let field_codes = fields.iter().map(|f| generate_field_template_code(f));
    quote! { #(#field_codes)* }
}

/// Generate TOML template code for a single field
fn generate_field_template_code(info: &FieldInfo) -> TokenStream {
    let field_name = &info.name;
    let toml_name = &info.toml_name;

    let doc_code = match &info.doc {
        Some(doc) => {
            let doc_str: String = doc.lines().map(|l| format!("# {}\n", l.trim())).collect();
            quote! { out.push_str(#doc_str); }
        }
        None => quote! {},
    };

    let inline = info
        .inline_doc
        .as_ref()
        .map(|c| format!("  # {c}"))
        .unwrap_or_default();

    let ty_str = type_to_string(&info.ty);

    // Optional fields without explicit default are commented out
    if ty_str.starts_with("Option<") && info.default.is_none() {
        let line = format!("# {toml_name} = \"\"{inline}\n");
        return quote! {
            #doc_code
            out.push_str(#line);
        };
    }

    // Compile-time known default
    if let Some(default_val) = &info.default {
        let formatted = format_default_for_type(default_val, &ty_str);
        let line = format!("{toml_name} = {formatted}{inline}\n");
        return quote! {
            #doc_code
            out.push_str(#line);
        };
    }

    // Runtime value from Default::default()
    quote! {
        #doc_code
        out.push_str(#toml_name);
        out.push_str(" = ");
        out.push_str(&toml::Value::try_from(default.#field_name.clone())
            .map(|v| v.to_string())
            .unwrap_or_default());
        out.push_str(#inline);
        out.push('\n');
    }
}
