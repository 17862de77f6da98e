//! JSON decoding with an ordered fallback chain.
//!
//! Each [`Decoder`] gets a chance at the candidate text in order; the first
//! one producing a structured value (array or object) wins. Anything else
//! means "no metadata".

use crate::debug;
use crate::utils::exec::strip_ansi;
use serde_json::Value;

/// A strategy for turning candidate text into JSON.
pub trait Decoder: Send + Sync {
    /// Short name for debug output.
    fn name(&self) -> &'static str;

    /// Decode `text`, or `None` if this strategy cannot.
    fn decode(&self, text: &str) -> Option<Value>;
}

/// The whole text must be exactly one JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson;

impl Decoder for StrictJson {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn decode(&self, text: &str) -> Option<Value> {
        serde_json::from_str(text).ok()
    }
}

/// Strips ANSI escapes and reads the first JSON value, ignoring the rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientJson;

impl Decoder for LenientJson {
    fn name(&self) -> &'static str {
        "lenient"
    }

    fn decode(&self, text: &str) -> Option<Value> {
        let cleaned = strip_ansi(text);
        serde_json::Deserializer::from_str(cleaned.trim_start())
            .into_iter::<Value>()
            .next()?
            .ok()
    }
}

/// Ordered list of decoders, first structured result wins.
pub struct DecoderChain {
    decoders: Vec<Box<dyn Decoder>>,
}

impl Default for DecoderChain {
    fn default() -> Self {
        Self::new(vec![Box::new(StrictJson), Box::new(LenientJson)])
    }
}

impl DecoderChain {
    pub fn new(decoders: Vec<Box<dyn Decoder>>) -> Self {
        Self { decoders }
    }

    pub fn decode(&self, text: &str) -> Option<Value> {
        self.decoders.iter().find_map(|decoder| {
            let value = decoder.decode(text).filter(is_container)?;
            debug!("meta"; "decoded with {} decoder", decoder.name());
            Some(value)
        })
    }
}

fn is_container(value: &Value) -> bool {
    value.is_array() || value.is_object()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_strict_decodes_array() {
        let value = DecoderChain::default().decode(r#"[{"func":"metadata","value":{}}]"#);
        assert_eq!(value, Some(json!([{"func": "metadata", "value": {}}])));
    }

    #[test]
    fn test_invalid_json_fails() {
        assert_eq!(DecoderChain::default().decode("[{not json}]"), None);
        assert_eq!(DecoderChain::default().decode(""), None);
    }

    #[test]
    fn test_scalars_are_rejected() {
        let chain = DecoderChain::default();
        assert_eq!(chain.decode("42"), None);
        assert_eq!(chain.decode("\"text\""), None);
        assert_eq!(chain.decode("null"), None);
    }

    #[test]
    fn test_lenient_handles_ansi_and_trailing() {
        let text = "\x1b[0m[{\"func\":\"metadata\",\"value\":{\"title\":\"A\"}}]\x1b[0m trailing";
        assert!(StrictJson.decode(text).is_none());
        assert_eq!(
            DecoderChain::default().decode(text),
            Some(json!([{"func": "metadata", "value": {"title": "A"}}]))
        );
    }

    struct Counting {
        calls: Arc<AtomicUsize>,
        result: Option<Value>,
    }

    impl Decoder for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn decode(&self, _: &str) -> Option<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[test]
    fn test_first_success_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let chain = DecoderChain::new(vec![
            Box::new(Counting {
                calls: first.clone(),
                result: Some(json!({"a": 1})),
            }),
            Box::new(Counting {
                calls: second.clone(),
                result: Some(json!([])),
            }),
        ]);

        assert_eq!(chain.decode("x"), Some(json!({"a": 1})));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_non_container_falls_through() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = DecoderChain::new(vec![
            Box::new(Counting {
                calls: calls.clone(),
                result: Some(json!("scalar")),
            }),
            Box::new(Counting {
                calls: calls.clone(),
                result: Some(json!([1])),
            }),
        ]);
        assert_eq!(chain.decode("x"), Some(json!([1])));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_chain() {
        assert_eq!(DecoderChain::new(Vec::new()).decode("[]"), None);
    }
}
