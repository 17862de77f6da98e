//! Type helper functions for Config derive macro.

use quote::quote;
use syn::Type;

/// Convert syn::Type to string representation
pub fn type_to_string(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}

/// Infer section name from struct name
pub fn infer_section(name: &str) -> String {
    let name = name
        .strip_suffix("SectionConfig")
        .or_else(|| name.strip_suffix("Config"))
        .unwrap_or(name);
    to_snake_case(name)
}

/// Convert PascalCase to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Format an explicit default for the template.
///
/// Strings, paths and enums are quoted; numbers, bools, arrays are not.
pub fn format_default_for_type(value: &str, ty: &str) -> String {
    let is_scalar = matches!(
        ty,
        "bool" | "u8" | "u16" | "u32" | "u64" | "usize" | "i32" | "i64" | "f32" | "f64"
    );
    if is_scalar || ty.starts_with("Vec<") || value.starts_with('"') {
        value.to_string()
    } else {
        format!("\"{value}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_section() {
        assert_eq!(infer_section("NotesConfig"), "notes");
        assert_eq!(infer_section("PdfViewerConfig"), "pdf_viewer");
        assert_eq!(infer_section("TypstSectionConfig"), "typst");
    }

    #[test]
    fn test_format_default_for_type() {
        assert_eq!(format_default_for_type("notes", "PathBuf"), "\"notes\"");
        assert_eq!(format_default_for_type("dash", "SlugSeparator"), "\"dash\"");
        assert_eq!(format_default_for_type("true", "bool"), "true");
        assert_eq!(format_default_for_type("[]", "Vec<String>"), "[]");
    }
}
