//! Filename patterns such as `{date}-{slug}`.

use anyhow::{Result, bail};
use std::fmt;

/// Placeholders accepted in `notes.filename`.
pub const PLACEHOLDERS: &[&str] = &["date", "slug", "title", "type"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Date,
    Slug,
    Title,
    Type,
}

/// A parsed `notes.filename` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePattern {
    segments: Vec<Segment>,
}

/// Values substituted into a [`FilenamePattern`].
#[derive(Debug, Clone, Copy)]
pub struct FilenameParts<'a> {
    /// Date already formatted with `notes.date_format`.
    pub date: &'a str,
    pub slug: &'a str,
    pub title: &'a str,
    pub kind: &'a str,
}

impl FilenamePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = pattern;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let Some(len) = rest[open..].find('}') else {
                bail!("unclosed `{{` in filename pattern `{pattern}`");
            };
            let name = &rest[open + 1..open + len];
            segments.push(match name {
                "date" => Segment::Date,
                "slug" => Segment::Slug,
                "title" => Segment::Title,
                "type" => Segment::Type,
                _ => bail!("unknown placeholder `{{{name}}}` in filename pattern"),
            });
            rest = &rest[open + len + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Render a file stem. Path separators never survive substitution.
    pub fn render(&self, parts: &FilenameParts<'_>) -> String {
        let stem: String = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => sanitize_component(text),
                Segment::Date => sanitize_component(parts.date),
                Segment::Slug => parts.slug.to_string(),
                Segment::Title => sanitize_component(parts.title),
                Segment::Type => sanitize_component(parts.kind),
            })
            .collect();

        let stem = stem.trim().trim_matches('.');
        if stem.is_empty() {
            super::slug::EMPTY_SLUG.to_string()
        } else {
            stem.to_string()
        }
    }
}

impl fmt::Display for FilenamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Date => f.write_str("{date}")?,
                Segment::Slug => f.write_str("{slug}")?,
                Segment::Title => f.write_str("{title}")?,
                Segment::Type => f.write_str("{type}")?,
            }
        }
        Ok(())
    }
}

/// Drop characters that are invalid in filenames on common platforms.
fn sanitize_component(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect()
}
