use serde_json::Value;
use std::io;

use super::{find_rows, flatten, payload, scalar_text};

/// Write output as CSV to stdout.
///
/// A savings schedule, when present, is written one row per month so it can
/// be charted directly; otherwise the result is flattened to `field,value`.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match payload(value) {
        Value::Object(map) => match find_rows(map, "schedule") {
            Some(rows) => write_rows(&mut wtr, rows),
            None => {
                let mut fields = Vec::new();
                flatten("", map, &mut fields);
                write_fields(&mut wtr, &fields)
            }
        },
        other => wtr.write_record([scalar_text(other)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, fields: &[(String, Value)]) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in fields {
        let text = scalar_text(val);
        wtr.write_record([key.as_str(), text.as_str()])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows.iter().filter_map(Value::as_object) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(scalar_text).unwrap_or_default())
            .collect();
        wtr.write_record(&cells)?;
    }
    Ok(())
}
