use serde_json::Value;

use super::{payload, scalar_text};

/// Headline figure for each command, in priority order. Paths are dotted.
const HEADLINE_PATHS: [&str; 10] = [
    "total_expense",
    "outcome.months",
    "outcome.status",
    "summary",
    "verdict",
    "monthly_payment",
    "total_loan",
    "stamp_duty",
    "mortgage_insurance",
    "upfront_cash",
];

/// Print just the headline answer.
pub fn print_minimal(value: &Value) {
    let result = payload(value);

    for path in HEADLINE_PATHS {
        if let Some(found) = lookup(result, path).filter(|v| !v.is_null()) {
            println!("{}", scalar_text(found));
            return;
        }
    }

    match result {
        Value::Object(map) => {
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, scalar_text(val));
            }
        }
        other => println!("{}", scalar_text(other)),
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}
