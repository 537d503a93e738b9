pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The calculation payload: the `result` of an envelope, or the value itself.
pub fn payload(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Render a leaf value as plain text. Decimals arrive as JSON strings.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Flatten nested objects into `parent.child` keys; arrays stay whole.
pub fn flatten(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten(&path, inner, out),
            _ => out.push((path, val.clone())),
        }
    }
}

/// First non-empty array of row objects under `key`, searching one level of
/// nesting (the savings schedule sits under `savings` in a purchase plan).
pub fn find_rows<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    let direct = map.get(key).and_then(Value::as_array).filter(|a| !a.is_empty());
    direct.or_else(|| {
        map.values()
            .filter_map(Value::as_object)
            .find_map(|inner| inner.get(key).and_then(Value::as_array).filter(|a| !a.is_empty()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_sections() {
        let v = json!({"fees": {"stamp_duty": "270000"}, "total_loan": "9128000"});
        let mut out = Vec::new();
        flatten("", v.as_object().unwrap(), &mut out);
        assert!(out.contains(&("fees.stamp_duty".to_string(), json!("270000"))));
        assert!(out.contains(&("total_loan".to_string(), json!("9128000"))));
    }

    #[test]
    fn test_payload_unwraps_envelope() {
        let v = json!({"result": {"months": 3}, "warnings": []});
        assert_eq!(payload(&v), &json!({"months": 3}));
        let bare = json!({"months": 3});
        assert_eq!(payload(&bare), &bare);
    }

    #[test]
    fn test_find_rows_one_level_deep() {
        let v = json!({"savings": {"schedule": [{"month": 1}]}});
        let rows = find_rows(v.as_object().unwrap(), "schedule").unwrap();
        assert_eq!(rows.len(), 1);
        let empty = json!({"schedule": []});
        assert!(find_rows(empty.as_object().unwrap(), "schedule").is_none());
    }
}
