use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            // A flat response wrapping one list (feed pages, division paths) renders the list.
            if let Some(items) = single_list(&map) {
                return Ok(render_array_table(items));
            }
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&["key", "value"], &rows, table_options()))
        }
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            table_options(),
        )),
    }
}

fn single_list(map: &serde_json::Map<String, Value>) -> Option<&Vec<Value>> {
    if map.values().any(Value::is_object) {
        return None;
    }
    let mut arrays = map.values().filter_map(Value::as_array);
    let first = arrays.next()?;
    if arrays.next().is_some() || !first.iter().all(Value::is_object) || first.is_empty() {
        return None;
    }
    Some(first)
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, table_options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        return String::from("(no columns)");
    }
    headers.sort();

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Case {
        case_number: &'static str,
        support_count: u32,
    }

    #[derive(Serialize)]
    struct Page {
        page: u32,
        items: Vec<Case>,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Case {
            case_number: "CA-2026-1A2B3C",
            support_count: 4,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["case_number"], "CA-2026-1A2B3C");
        assert_eq!(parsed["support_count"], 4);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Case {
            case_number: "CA-2026-1A2B3C",
            support_count: 4,
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Case {
            case_number: "CA-2026-1A2B3C",
            support_count: 4,
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("case_number"));
    }

    #[test]
    fn table_render_unwraps_single_list() {
        let value = Page {
            page: 0,
            items: vec![
                Case {
                    case_number: "CA-2026-000001",
                    support_count: 1,
                },
                Case {
                    case_number: "CA-2026-000002",
                    support_count: 12,
                },
            ],
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("case_number") && lines[0].contains("support_count"));
        assert!(lines[1].chars().all(|c| c == '-'));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let value: Vec<Case> = Vec::new();
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
