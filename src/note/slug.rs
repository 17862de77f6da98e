//! Slugs for note filenames.

/// Slug used when a title has no alphanumeric characters.
pub const EMPTY_SLUG: &str = "untitled";

/// ASCII, lowercase, alphanumeric runs joined by `separator`.
///
/// ```ignore
/// assert_eq!(slugify("Café Notes: Week 3", '-'), "cafe-notes-week-3");
/// ```
pub fn slugify(text: &str, separator: char) -> String {
    let ascii = deunicode::deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut gap = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push(separator);
            }
            gap = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("Hello World", '-'), "hello-world");
        assert_eq!(slugify("Hello World", '_'), "hello_world");
    }

    #[test]
    fn test_collapses_and_trims() {
        assert_eq!(slugify("  --Weekly   sync!!  ", '-'), "weekly-sync");
        assert_eq!(slugify("a/b\\c", '-'), "a-b-c");
    }

    #[test]
    fn test_transliterates() {
        assert_eq!(slugify("Café Größe", '-'), "cafe-grosse");
        assert_eq!(slugify("北京", '-'), "bei-jing");
    }

    #[test]
    fn test_empty() {
        assert_eq!(slugify("", '-'), "untitled");
        assert_eq!(slugify("?!", '-'), "untitled");
    }
}
