use std::collections::HashMap;

use serde_json::Value;

/// Pulls `column` out of each row, flattening list-valued cells.
pub fn collect_column(rows: &[Value], column: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(column))
        .flat_map(|cell| match cell {
            Value::Array(items) => items
                .iter()
                .filter_map(|i| i.as_str().map(str::to_string))
                .collect::<Vec<_>>(),
            Value::String(s) => vec![s.clone()],
            _ => Vec::new(),
        })
        .collect()
}

/// Counts occurrences, most frequent first. Equal counts keep first-seen order.
pub fn count_unique_sorted<I, S>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        let value = value.into();
        match index.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn orders_by_descending_count() {
        let counts = count_unique_sorted(["a", "a", "b", "c", "c", "c"]);
        assert_eq!(
            counts,
            vec![("c".to_string(), 3), ("a".to_string(), 2), ("b".to_string(), 1)]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let counts = count_unique_sorted(["z", "y", "x", "y", "z", "x"]);
        let keys: Vec<&str> = counts.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "y", "x"]);
    }

    #[test]
    fn flattens_list_columns() {
        let rows = vec![
            json!({"tags": ["rust", "web"]}),
            json!({"tags": ["rust"]}),
            json!({"tags": null}),
            json!({"title": "no tags"}),
        ];
        let values = collect_column(&rows, "tags");
        assert_eq!(values, vec!["rust", "web", "rust"]);
        assert_eq!(
            count_unique_sorted(values),
            vec![("rust".to_string(), 2), ("web".to_string(), 1)]
        );
    }
}
