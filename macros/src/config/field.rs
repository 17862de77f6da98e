//! Field information parsed from struct definitions.

use syn::Type;

use crate::config::attr::{
    extract_doc_comment, get_custom_name, get_default_value, get_inline_doc, has_attr,
};

pub struct FieldInfo {
    pub name: syn::Ident,
    pub toml_name: String,
    pub doc: Option<String>,
    pub inline_doc: Option<String>,
    pub default: Option<String>,
    pub skip: bool,
    pub hidden: bool,
    pub ty: Type,
}

impl FieldInfo {
    pub fn from_field(field: &syn::Field) -> Option<Self> {
        let ident = field.ident.as_ref()?;
        let attrs = &field.attrs;

        Some(Self {
            name: ident.clone(),
            toml_name: get_custom_name(attrs).unwrap_or_else(|| ident.to_string()),
            doc: extract_doc_comment(attrs),
            inline_doc: get_inline_doc(attrs),
            default: get_default_value(attrs),
            skip: has_attr(attrs, "skip"),
            hidden: has_attr(attrs, "hidden"),
            ty: field.ty.clone(),
        })
    }
}
