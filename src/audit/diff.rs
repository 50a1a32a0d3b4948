//! Diff generation for audit logging

use serde_json::Value;

/// Generate a one-line summary of top-level field changes between two values
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if before_val != after_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_changes() {
        let v = json!({"name": "A", "sqm": 10});
        assert_eq!(generate_diff(&v, &v), None);
    }

    #[test]
    fn test_changed_added_removed() {
        let before = json!({"name": "A", "sqm": 10});
        let after = json!({"name": "B", "prepayment": 5});
        let diff = generate_diff(&before, &after).unwrap();

        assert!(diff.contains("name: \"A\" -> \"B\""));
        assert!(diff.contains("sqm: 10 -> (removed)"));
        assert!(diff.contains("prepayment: (added) -> 5"));
    }

    #[test]
    fn test_collections_summarized() {
        let before = json!({"meters": [1]});
        let after = json!({"meters": [1, 2]});
        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("meters: [1 items] -> [2 items]")
        );
    }

    #[test]
    fn test_long_strings_truncated() {
        let long = "ä".repeat(60);
        let diff = generate_diff(&json!(long), &json!("x")).unwrap();
        assert!(diff.starts_with("\""));
        assert!(diff.contains("...\""));
    }
}
