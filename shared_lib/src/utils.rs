const PREVIEW_CHARS: usize = 80;

pub fn duration_to_ms_string(duration: std::time::Duration) -> String {
    let milliseconds = duration.as_secs_f64() * 1000.0;
    format!("{milliseconds:.2}ms")
}

/// Indented JSON for the detail view.
pub fn pretty_json<T>(value: &T) -> String
where
    T: serde::Serialize,
{
    serde_json::to_string_pretty(value).unwrap_or_else(|err| {
        tracing::error!("Failed to pretty print json: {:?}", err);
        String::new()
    })
}

/// Single-line JSON cut down to a fixed number of characters for listings.
pub fn json_preview(value: &serde_json::Value) -> String {
    let compact = value.to_string();
    if compact.chars().count() <= PREVIEW_CHARS {
        return compact;
    }

    let mut preview: String = compact.chars().take(PREVIEW_CHARS).collect();
    preview.push('…');
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duration_formats_with_two_decimals() {
        let duration = std::time::Duration::from_micros(1_500);
        assert_eq!(duration_to_ms_string(duration), "1.50ms");
    }

    #[test]
    fn short_bodies_are_not_truncated() {
        let body = json!({"event": "user.created"});
        assert_eq!(json_preview(&body), r#"{"event":"user.created"}"#);
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundaries() {
        let body = json!({ "text": "ü".repeat(200) });
        let preview = json_preview(&body);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn pretty_json_indents_objects() {
        let body = json!({"a": 1});
        assert_eq!(pretty_json(&body), "{\n  \"a\": 1\n}");
    }
}
