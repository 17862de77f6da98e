//! Embedded static resources for typnote.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `note` - Built-in note templates (note.typ, daily.typ)
//!
//! # Usage
//!
//! ```ignore
//! use embed::note::{NoteVars, builtin};
//!
//! let template = builtin("note").unwrap();
//! let source = template.render(&NoteVars { title: "Standup", ..vars });
//! ```

mod template;

pub use template::{Template, TemplateVars};

/// Names of the templates compiled into the binary.
pub fn builtin_names() -> Vec<&'static str> {
    note::BUILTIN.iter().map(|(name, _)| *name).collect()
}

pub mod note {
    use super::{Template, TemplateVars};
    use regex::{Captures, Regex};
    use std::sync::OnceLock;

    /// Variables for note templates.
    ///
    /// `{{title}}`, `{{type}}`, `{{status}}` and `{{date}}` become the
    /// escaped contents of a typst string literal. `{{tags}}` becomes the
    /// body of a typst array (`"a", "b",`) so that `({{tags}})` is valid for
    /// any number of tags. Other `{{...}}` placeholders are left untouched.
    #[derive(Debug, Clone, Default)]
    pub struct NoteVars {
        pub title: String,
        pub kind: String,
        pub status: String,
        pub date: String,
        pub tags: Vec<String>,
    }

    impl NoteVars {
        fn lookup(&self, key: &str) -> Option<String> {
            let value = match key {
                "title" => escape(&self.title),
                "type" => escape(&self.kind),
                "status" => escape(&self.status),
                "date" => escape(&self.date),
                "tags" => self
                    .tags
                    .iter()
                    .map(|tag| format!("\"{}\",", escape(tag)))
                    .collect::<Vec<_>>()
                    .join(" "),
                _ => return None,
            };
            Some(value)
        }
    }

    impl TemplateVars for NoteVars {
        fn apply(&self, content: &str) -> String {
            static RE: OnceLock<Regex> = OnceLock::new();
            let re = RE.get_or_init(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").unwrap());
            re.replace_all(content, |caps: &Captures<'_>| {
                self.lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
        }
    }

    /// Escape text for a typst string literal.
    fn escape(text: &str) -> String {
        text.replace('\\', "\\\\").replace('"', "\\\"")
    }

    /// General-purpose note.
    pub const NOTE_TYP: Template<NoteVars> = Template::new(include_str!("note/note.typ"));

    /// Daily journal page.
    pub const DAILY_TYP: Template<NoteVars> = Template::new(include_str!("note/daily.typ"));

    /// Built-in templates by name.
    pub const BUILTIN: &[(&str, Template<NoteVars>)] = &[("note", NOTE_TYP), ("daily", DAILY_TYP)];

    pub fn builtin(name: &str) -> Option<Template<NoteVars>> {
        BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, template)| template.clone())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn vars() -> NoteVars {
            NoteVars {
                title: "Weekly \"sync\"".into(),
                kind: "meeting".into(),
                status: "draft".into(),
                date: "2024-06-15".into(),
                tags: vec!["work".into(), "a\\b".into()],
            }
        }

        #[test]
        fn test_apply_escapes_strings() {
            let out = vars().apply(r#"title: "{{title}}", path: "{{ type }}""#);
            assert_eq!(out, r#"title: "Weekly \"sync\"", path: "meeting""#);
        }

        #[test]
        fn test_tags_render_as_array_body() {
            assert_eq!(vars().apply("({{tags}})"), r#"("work", "a\\b",)"#);

            let single = NoteVars {
                tags: vec!["solo".into()],
                ..vars()
            };
            assert_eq!(single.apply("({{tags}})"), r#"("solo",)"#);
            assert_eq!(NoteVars::default().apply("({{tags}})"), "()");
        }

        #[test]
        fn test_unknown_placeholders_untouched() {
            assert_eq!(vars().apply("{{author}} {{date}}"), "{{author}} 2024-06-15");
        }

        #[test]
        fn test_builtins_render_every_placeholder() {
            for (name, template) in BUILTIN {
                let out = template.render(&vars());
                assert!(!out.contains("{{"), "{name} left a placeholder");
                assert!(out.contains("#metadata(meta)"), "{name} lacks metadata");
                assert!(out.contains(r#"tags: ("work", "a\\b",)"#), "{name} tags");
            }
        }

        #[test]
        fn test_builtin_lookup() {
            assert!(builtin("note").is_some());
            assert!(builtin("daily").is_some());
            assert!(builtin("nope").is_none());
            assert_eq!(super::super::builtin_names(), ["note", "daily"]);
        }
    }
}
