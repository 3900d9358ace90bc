//! 报表 CSV 导出
//!
//! 表头取第一条对象记录的键（保持插入顺序），之后记录独有的键不导出。
//! 非对象记录跳过。字段按 RFC 4180 规则在需要时加引号。

use serde_json::Value;

pub fn to_csv(records: &[Value]) -> String {
    let mut rows = records.iter().filter_map(Value::as_object).peekable();
    let Some(first) = rows.peek() else {
        return String::new();
    };
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in rows {
        let row = headers
            .iter()
            .map(|key| escape_field(&field_text(record.get(key))))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }

    lines.join("\n")
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        // 嵌套对象/数组导出为 JSON 文本
        Some(other) => other.to_string(),
    }
}

pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// `users` → `users_report.csv`
pub fn report_filename(kind: &str) -> String {
    format!("{kind}_report.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_from_first_record() {
        assert_eq!(to_csv(&[json!({ "a": 1, "b": "x" })]), "a,b\n1,x");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn quoting_and_missing_fields() {
        let rows = [
            json!({ "name": "Doe, Jane", "note": "said \"hi\"", "tags": ["a", "b"] }),
            json!({ "name": "Sam", "note": null }),
        ];
        assert_eq!(
            to_csv(&rows),
            "name,note,tags\n\"Doe, Jane\",\"said \"\"hi\"\"\",\"[\"\"a\"\",\"\"b\"\"]\"\nSam,,"
        );
    }

    #[test]
    fn scalar_records_are_skipped() {
        let rows = [json!("scalar"), json!({ "a": 1 }), json!(7), json!({ "a": 2 })];
        assert_eq!(to_csv(&rows), "a\n1\n2");
        assert_eq!(to_csv(&[json!(null), json!([1, 2])]), "");
    }

    #[test]
    fn keys_only_in_later_records_are_dropped() {
        let rows = [json!({ "a": 1 }), json!({ "a": 2, "b": 3 })];
        assert_eq!(to_csv(&rows), "a\n1\n2");
    }

    #[test]
    fn filename_from_kind() {
        assert_eq!(report_filename("orders"), "orders_report.csv");
    }
}
