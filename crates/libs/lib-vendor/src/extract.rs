//! # JSON Array Extraction
//!
//! Model replies are free text that usually, but not always, contain the JSON we asked
//! for. Extraction is best-effort and never fails loudly: anything unusable yields
//! `None` and the caller treats it as "nothing found".

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Find the first JSON array embedded in `text`.
///
/// The widest candidate (first `[` to last `]`) is tried first, which covers the
/// common reply shape of one array surrounded by prose. If that span is not valid
/// JSON, each `[` is tried in turn as the start of a self-delimiting array.
pub fn extract_json_array(text: &str) -> Option<Vec<Value>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end > start {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&text[start..=end]) {
            return Some(items);
        }
    }

    text.match_indices('[').find_map(|(idx, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[idx..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Array(items))) => Some(items),
            _ => None,
        }
    })
}

/// Extract the first JSON array and keep the items that deserialize as `T`.
///
/// Returns `None` when no array is present; items of the wrong shape are skipped.
pub fn extract_items<T: DeserializeOwned>(text: &str) -> Option<Vec<T>> {
    let items = extract_json_array(text)?;
    Some(
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::WebSource;

    #[test]
    fn finds_array_wrapped_in_prose() {
        let text = r#"Here you go: [{"title":"A","url":"https://a","summary":"s"}] hope it helps"#;
        let sources: Vec<WebSource> = extract_items(text).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "https://a");
    }

    #[test]
    fn no_brackets_means_none() {
        assert!(extract_json_array("I could not find anything.").is_none());
        assert!(extract_json_array("] backwards [").is_none());
    }

    #[test]
    fn malformed_json_means_none() {
        assert!(extract_json_array(r#"[{"title": "unterminated"#).is_none());
        assert!(extract_json_array("[not json at all]").is_none());
    }

    #[test]
    fn falls_back_to_first_self_contained_array() {
        // The greedy span "[1, 2] and [oops]" is not JSON, the first array alone is.
        let items = extract_json_array("numbers [1, 2] and [oops]").unwrap();
        assert_eq!(items, vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn skips_items_of_the_wrong_shape() {
        let text = r#"[{"title":"ok","url":"https://ok"}, "stray string", {"title":"no url"}]"#;
        let sources: Vec<WebSource> = extract_items(text).unwrap();
        assert_eq!(sources, vec![WebSource {
            title: "ok".into(),
            url: "https://ok".into(),
            summary: String::new(),
        }]);
    }
}
