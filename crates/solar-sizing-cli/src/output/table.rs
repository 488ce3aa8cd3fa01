use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::render_scalar;

/// Format output as a table using the tabled crate.
///
/// Assessment envelopes print the `result` record as a field/value table
/// followed by warnings and methodology; `results` arrays (amortization
/// schedules, region listings) print one row per entry.
pub fn print_table(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", render_scalar(value));
        return;
    };

    if let Some(Value::Object(result)) = map.get("result") {
        print_record(result);

        if let Some(Value::Array(warnings)) = map.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    if let Value::String(s) = w {
                        println!("  - {}", s);
                    }
                }
            }
        }

        if let Some(Value::String(methodology)) = map.get("methodology") {
            println!("\nMethodology: {}", methodology);
        }
    } else if let Some(Value::Array(rows)) = map.get("results") {
        print_rows(rows);
    } else {
        print_record(map);
    }
}

fn print_record(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &render_scalar(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let cells: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(render_scalar).unwrap_or_default())
                .collect();
            builder.push_record(cells);
        }
    }

    println!("{}", Table::from(builder));
}
