use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{payload, scalar_text};

/// Print a result as titled tables: top-level figures first, then one table
/// per nested section, then any row arrays such as the savings schedule.
pub fn print_table(value: &Value) {
    match payload(value) {
        Value::Object(map) => print_sections("Result", map),
        other => println!("{}", scalar_text(other)),
    }

    if let Some(envelope) = value.as_object() {
        print_notes(envelope);
    }
}

fn print_sections(title: &str, map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested: Vec<(&String, &Map<String, Value>)> = Vec::new();
    let mut row_sets: Vec<(&String, &Vec<Value>)> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Object(inner) => nested.push((key, inner)),
            Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
                row_sets.push((key, rows));
            }
            Value::Array(items) => {
                let joined: Vec<String> = items.iter().map(scalar_text).collect();
                builder.push_record([key.clone(), joined.join(", ")]);
            }
            _ => {
                builder.push_record([key.clone(), scalar_text(val)]);
            }
        }
    }

    println!("{title}");
    println!("{}", Table::from(builder));

    for (key, inner) in nested {
        println!();
        print_sections(&format!("{title} / {key}"), inner);
    }
    for (key, rows) in row_sets {
        println!();
        println!("{title} / {key}");
        print_rows(rows);
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows.iter().filter_map(Value::as_object) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(h).map(scalar_text).unwrap_or_default())
            .collect();
        builder.push_record(cells);
    }
    println!("{}", Table::from(builder));
}

fn print_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
