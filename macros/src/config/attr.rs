//! Attribute parsing helpers for Config derive macro.

use syn::{Attribute, Lit, Meta};

/// Get section name from #[config(section = "xxx")].
pub fn get_section(attrs: &[Attribute]) -> Option<String> {
    get_string_attr(attrs, "section")
}

/// Get custom field name from #[config(name = "xxx")].
pub fn get_custom_name(attrs: &[Attribute]) -> Option<String> {
    get_string_attr(attrs, "name")
}

/// Get default value from #[config(default = "xxx")].
pub fn get_default_value(attrs: &[Attribute]) -> Option<String> {
    get_string_attr(attrs, "default")
}

/// Get trailing comment from #[config(inline_doc = "xxx")].
pub fn get_inline_doc(attrs: &[Attribute]) -> Option<String> {
    get_string_attr(attrs, "inline_doc")
}

/// Get string value from #[config(key = "value")].
///
/// Other keys in the same attribute are consumed and ignored.
fn get_string_attr(attrs: &[Attribute], key: &str) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        let mut value = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                let lit: syn::LitStr = meta.value()?.parse()?;
                value = Some(lit.value());
            } else if meta.input.peek(syn::Token![=]) {
                let _ = meta.value()?.parse::<Lit>();
            }
            Ok(())
        });
        if value.is_some() {
            return value;
        }
    }
    None
}

/// Check if attribute has a flag like #[config(skip)].
pub fn has_attr(attrs: &[Attribute], key: &str) -> bool {
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                found = true;
            }
            // Skip value if present (e.g., `default = "notes"`)
            if meta.input.peek(syn::Token![=]) {
                let _ = meta.value()?.parse::<Lit>();
            }
            Ok(())
        });
        if found {
            return true;
        }
    }
    false
}

/// Extract doc comment from #[doc = "..."] attributes.
pub fn extract_doc_comment(attrs: &[Attribute]) -> Option<String> {
    let docs: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(nv) = &attr.meta
                && let syn::Expr::Lit(expr_lit) = &nv.value
                && let Lit::Str(s) = &expr_lit.lit
            {
                return Some(s.value());
            }
            None
        })
        .collect();

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n").trim().to_string())
    }
}
