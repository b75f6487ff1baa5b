use super::literal::{object_fields, FieldValue};

/// Characters stripped from search patterns (regex syntax and the punctuation
/// that titles commonly vary on). Each is replaced by `.` so it still matches.
const SEARCH_WILDCARDS: &[char] = &[
    ':', ';', '!', '?', '-', '_', '(', ')', '[', ']', '.', '*', '+', '^', '$', '|', '{', '}',
    '\\', '"',
];

pub fn items(root: &str, order_column: &str, columns: &[&str]) -> String {
    format!(
        "{{ {root}(order_by: {{{order_column}: asc}}) {{ {cols} id }} }}",
        cols = columns.join(" "),
    )
}

pub fn search(root: &str, pattern: &str, column: &str, columns: &[&str]) -> String {
    let regex = FieldValue::Str(format!(".*{}.*", search_pattern(pattern)));
    format!(
        "{{ {root}(order_by: {{{column}: asc}}, where: {{{column}: {{_iregex: {lit}}}}}) {{ {cols} id }} }}",
        lit = regex.to_literal(),
        cols = columns.join(" "),
    )
}

pub fn search_pattern(pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| if SEARCH_WILDCARDS.contains(&c) { '.' } else { c })
        .collect()
}

pub fn column_values(root: &str, column: &str) -> String {
    let sort = if column == "tags" { "title" } else { column };
    format!("{{ {root}(order_by: {{{sort}: asc}}) {{ {column} }} }}")
}

pub fn tags(schema: &str, table: &str) -> String {
    format!(
        "{{ meta_tags(order_by: {{name: asc}}, where: {{schema: {{_eq: {s}}}, table: {{_eq: {t}}}}}) {{ name }} }}",
        s = FieldValue::from(schema).to_literal(),
        t = FieldValue::from(table).to_literal(),
    )
}

pub fn insert_one(root: &str, fields: &[(&str, FieldValue)]) -> String {
    format!(
        "mutation {{ insert_{root}_one(object: {{ {obj} }}) {{ id }} }}",
        obj = object_fields(fields),
    )
}

pub fn update(root: &str, id: &str, fields: &[(&str, FieldValue)], return_column: &str) -> String {
    format!(
        "mutation {{ update_{root}(where: {{id: {{_eq: {id}}}}}, _set: {{ {set} }}) {{ returning {{ {return_column} }} }} }}",
        id = FieldValue::from(id).to_literal(),
        set = object_fields(fields),
    )
}
