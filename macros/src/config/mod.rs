//! Config derive macro - generates FIELDS and template().

mod attr;
mod field;
mod template;
mod types;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use attr::{extract_doc_comment, get_section};
use field::FieldInfo;
use template::generate_template_code;
use types::infer_section;

/// Generate Config implementation (FIELDS + template).
pub fn derive(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let fields_struct_name = syn::Ident::new(&format!("{name}Fields"), name.span());

    let section = get_section(&input.attrs).unwrap_or_else(|| infer_section(&name.to_string()));
    let section_doc = extract_doc_comment(&input.attrs).unwrap_or_default();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return quote! { compile_error!("Config only works on structs with named fields"); };
            }
        },
        _ => return quote! { compile_error!("Config only works on structs"); },
    };

    let field_infos: Vec<FieldInfo> = fields.iter().filter_map(FieldInfo::from_field).collect();
    let visible: Vec<&FieldInfo> = field_infos.iter().filter(|f| !f.skip).collect();

    let field_defs = visible.iter().map(|f| {
        let name = &f.name;
        quote! { pub #name: crate::config::FieldPath, }
    });

    let field_inits = visible.iter().map(|f| {
        let name = &f.name;
        let full_path = if section.is_empty() {
            f.toml_name.clone()
        } else {
            format!("{}.{}", section, f.toml_name)
        };
        quote! { #name: crate::config::FieldPath::new(#full_path), }
    });

    let template_fields: Vec<&FieldInfo> =
        visible.iter().copied().filter(|f| !f.hidden).collect();
    let template_code = generate_template_code(&template_fields);

    quote! {
        /// Generated field path accessors.
        #[allow(non_camel_case_types, dead_code)]
        pub struct #fields_struct_name {
            #(#field_defs)*
        }

        #[allow(dead_code)]
        impl #name {
            /// Field paths for diagnostic messages.
            pub const FIELDS: #fields_struct_name = #fields_struct_name {
                #(#field_inits)*
            };

            /// Section name for TOML output.
            pub const TEMPLATE_SECTION: &'static str = #section;

            /// Section documentation.
            pub const TEMPLATE_DOC: &'static str = #section_doc;

            /// Generate TOML template for this config section.
            #[allow(unused_variables)]
            pub fn template() -> String {
                let default = Self::default();
                let mut out = String::new();
                #template_code
                out
            }

            /// Generate TOML template with section header.
            pub fn template_with_header() -> String {
                let mut out = String::new();
                for line in Self::TEMPLATE_DOC.lines() {
                    out.push_str("# ");
                    out.push_str(line.trim());
                    out.push('\n');
                }
                let section = Self::TEMPLATE_SECTION;
                if !section.is_empty() {
                    out.push('[');
                    out.push_str(section);
                    out.push_str("]\n");
                }
                out.push_str(&Self::template());
                out
            }
        }
    }
}
