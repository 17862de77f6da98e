//! Normalized note metadata.
//!
//! `typst query <file> metadata` yields an array of query results such as
//! `[{"func": "metadata", "value": {"title": "...", "tags": [...]}}]`. The
//! first result's `value` object is read into [`RawMetadata`], where every
//! field is explicitly optional, and then completed into a
//! [`MetadataRecord`] with defaults.

use crate::utils::date::{NoteDate, parse_typst_datetime};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::Path;

/// Note type when the document does not declare one.
pub const DEFAULT_TYPE: &str = "document";

/// Note status when the document does not declare one.
pub const DEFAULT_STATUS: &str = "draft";

/// Fully defaulted note metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    /// `YYYY-MM-DD` for well-formed dates, otherwise the document's text.
    pub date: String,
    pub tags: Vec<String>,
}

/// Values used for fields the document leaves out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub title: String,
    pub date: String,
}

impl Fallback {
    /// Title from the file stem, date from `today`.
    pub fn for_path(path: &Path, today: NoteDate) -> Self {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "untitled".to_string());
        Self {
            title,
            date: today.to_string(),
        }
    }
}

/// One element of the query result array.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryEntry {
    /// Only informational; any JSON type is accepted.
    func: Option<Value>,
    value: Option<Value>,
}

/// Metadata fields as written in the document, each possibly absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMetadata {
    title: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    status: Option<Value>,
    date: Option<Value>,
    tags: Option<Value>,
}

impl RawMetadata {
    /// Read the first query result's `value` object; anything else is empty.
    fn from_query(decoded: &Value) -> Self {
        let Some(first) = decoded.as_array().and_then(|items| items.first()) else {
            return Self::default();
        };
        let Ok(entry) = QueryEntry::deserialize(first) else {
            return Self::default();
        };
        if let Some(func) = entry.func.as_ref().and_then(Value::as_str)
            && func != "metadata"
        {
            crate::debug!("meta"; "reading `{}` element as metadata", func);
        }
        entry
            .value
            .filter(Value::is_object)
            .and_then(|value| Self::deserialize(&value).ok())
            .unwrap_or_default()
    }

    fn into_record(self, fallback: &Fallback) -> MetadataRecord {
        MetadataRecord {
            title: self
                .title
                .as_ref()
                .and_then(content_text)
                .unwrap_or_else(|| fallback.title.clone()),
            kind: self
                .kind
                .as_ref()
                .and_then(content_text)
                .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            status: self
                .status
                .as_ref()
                .and_then(content_text)
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            date: self
                .date
                .as_ref()
                .and_then(date_text)
                .unwrap_or_else(|| fallback.date.clone()),
            tags: self.tags.as_ref().map(tag_list).unwrap_or_default(),
        }
    }
}

impl MetadataRecord {
    /// The record for a note without any metadata.
    pub fn defaults(fallback: &Fallback) -> Self {
        RawMetadata::default().into_record(fallback)
    }

    /// Complete a decoded query result into a record.
    ///
    /// `None`, a non-array value or an array whose first element lacks a
    /// `value` object all yield [`MetadataRecord::defaults`].
    pub fn normalize(decoded: Option<&Value>, fallback: &Fallback) -> Self {
        decoded
            .map(RawMetadata::from_query)
            .unwrap_or_default()
            .into_record(fallback)
    }

    /// The record in `typst query` output shape.
    pub fn to_query_json(&self) -> Value {
        json!([{ "func": "metadata", "value": self }])
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Plain text of a metadata value.
///
/// Strings and scalars are used as-is; typst content (`text`, `sequence`,
/// `space`, elements with a `body`) is flattened. Blank text counts as absent.
fn content_text(value: &Value) -> Option<String> {
    let mut out = String::new();
    push_text(value, &mut out);
    let trimmed = out.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn push_text(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Array(items) => items.iter().for_each(|item| push_text(item, out)),
        Value::Object(obj) => match obj.get("func").and_then(Value::as_str) {
            Some("space" | "linebreak" | "parbreak") => out.push(' '),
            Some("smartquote") => {
                let double = obj.get("double").and_then(Value::as_bool).unwrap_or(true);
                out.push(if double { '"' } else { '\'' });
            }
            _ => {
                for key in ["text", "children", "body"] {
                    if let Some(inner) = obj.get(key) {
                        push_text(inner, out);
                        break;
                    }
                }
            }
        },
        Value::Null => {}
    }
}

/// Dates as `YYYY-MM-DD` when typst serialized a `datetime`.
fn date_text(value: &Value) -> Option<String> {
    let text = content_text(value)?;
    Some(parse_typst_datetime(&text).unwrap_or(text))
}

/// Tags from an array, a single string or a content value.
fn tag_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(content_text).collect(),
        other => content_text(other).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> Fallback {
        Fallback::for_path(Path::new("/tmp/note.typ"), NoteDate::new(2024, 6, 15))
    }

    fn query(value: Value) -> Value {
        json!([{ "func": "metadata", "value": value }])
    }

    #[test]
    fn test_fallback_for_path() {
        let fb = fallback();
        assert_eq!(fb.title, "note");
        assert_eq!(fb.date, "2024-06-15");

        let fb = Fallback::for_path(Path::new("/"), NoteDate::new(2024, 1, 1));
        assert_eq!(fb.title, "untitled");
    }

    #[test]
    fn test_defaults() {
        let record = MetadataRecord::defaults(&fallback());
        assert_eq!(
            record,
            MetadataRecord {
                title: "note".into(),
                kind: "document".into(),
                status: "draft".into(),
                date: "2024-06-15".into(),
                tags: vec![],
            }
        );
        assert_eq!(MetadataRecord::normalize(None, &fallback()), record);
    }

    #[test]
    fn test_partial_metadata() {
        let decoded = query(json!({"title": "My Note", "tags": ["a", "b"]}));
        let record = MetadataRecord::normalize(Some(&decoded), &fallback());
        assert_eq!(record.title, "My Note");
        assert_eq!(record.kind, "document");
        assert_eq!(record.status, "draft");
        assert_eq!(record.date, "2024-06-15");
        assert_eq!(record.tags, ["a", "b"]);
    }

    #[test]
    fn test_full_metadata() {
        let decoded = query(json!({
            "title": "Standup",
            "type": "meeting",
            "status": "done",
            "date": "2024-01-02",
            "tags": ["work"],
        }));
        let record = MetadataRecord::normalize(Some(&decoded), &fallback());
        assert_eq!(record.kind, "meeting");
        assert_eq!(record.status, "done");
        assert_eq!(record.date, "2024-01-02");
    }

    #[test]
    fn test_unexpected_shapes_default() {
        let fb = fallback();
        let defaults = MetadataRecord::defaults(&fb);
        for decoded in [
            json!([]),
            json!({"title": "not an array"}),
            json!([{"func": "metadata"}]),
            json!([{"func": "metadata", "value": "text"}]),
            json!([{"func": "metadata", "value": ["title", "x"]}]),
            json!([42]),
        ] {
            assert_eq!(
                MetadataRecord::normalize(Some(&decoded), &fb),
                defaults,
                "for {decoded}"
            );
        }
    }

    #[test]
    fn test_only_first_entry_used() {
        let decoded = json!([
            {"func": "metadata", "value": {"title": "first"}},
            {"func": "metadata", "value": {"title": "second"}},
        ]);
        let record = MetadataRecord::normalize(Some(&decoded), &fallback());
        assert_eq!(record.title, "first");
    }

    #[test]
    fn test_value_read_whatever_func_is() {
        for func in [json!(1), json!(null), json!(["metadata"]), json!("heading")] {
            let decoded = json!([{"func": func, "value": {"title": "X"}}]);
            let record = MetadataRecord::normalize(Some(&decoded), &fallback());
            assert_eq!(record.title, "X", "func = {func}");
        }

        let decoded = json!([{"value": {"status": "final"}}]);
        let record = MetadataRecord::normalize(Some(&decoded), &fallback());
        assert_eq!(record.status, "final");
    }

    #[test]
    fn test_empty_and_null_are_absent() {
        let decoded = query(json!({"title": "  ", "status": null, "tags": null, "type": ""}));
        let record = MetadataRecord::normalize(Some(&decoded), &fallback());
        assert_eq!(record, MetadataRecord::defaults(&fallback()));
    }

    #[test]
    fn test_content_title_flattened() {
        let title = json!({
            "func": "sequence",
            "children": [
                {"func": "text", "text": "Weekly"},
                {"func": "space"},
                {"func": "strong", "body": {"func": "text", "text": "sync"}},
                {"func": "smartquote", "double": false},
                {"func": "text", "text": "s"},
            ]
        });
        let record = MetadataRecord::normalize(Some(&query(json!({"title": title}))), &fallback());
        assert_eq!(record.title, "Weekly sync's");
    }

    #[test]
    fn test_datetime_repr() {
        let decoded = query(json!({"date": "datetime(year: 2023, month: 12, day: 1)"}));
        let record = MetadataRecord::normalize(Some(&decoded), &fallback());
        assert_eq!(record.date, "2023-12-01");

        let decoded = query(json!({"date": "last tuesday"}));
        let record = MetadataRecord::normalize(Some(&decoded), &fallback());
        assert_eq!(record.date, "last tuesday");
    }

    #[test]
    fn test_tag_variants() {
        let fb = fallback();
        let tags = |v: Value| MetadataRecord::normalize(Some(&query(json!({"tags": v}))), &fb).tags;

        assert_eq!(tags(json!("solo")), ["solo"]);
        assert_eq!(tags(json!(["a", "", 3, null, {"func": "text", "text": "b"}])), ["a", "3", "b"]);
        assert!(tags(json!([])).is_empty());
        assert!(tags(json!("")).is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let fb = fallback();
        for decoded in [
            None,
            Some(query(json!({"title": "X", "tags": ["a"], "status": "active"}))),
        ] {
            let once = MetadataRecord::normalize(decoded.as_ref(), &fb);
            let twice = MetadataRecord::normalize(Some(&once.to_query_json()), &fb);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_serialized_shape() {
        let record = MetadataRecord::defaults(&fallback());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "document");
        assert!(value.get("kind").is_none());
        assert_eq!(
            record.to_query_json()[0]["func"],
            Value::String("metadata".into())
        );
    }

    #[test]
    fn test_has_tag() {
        let decoded = query(json!({"tags": ["work", "team"]}));
        let record = MetadataRecord::normalize(Some(&decoded), &fallback());
        assert!(record.has_tag("team"));
        assert!(!record.has_tag("tea"));
    }
}
