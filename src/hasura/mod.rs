pub mod aggregate;
pub mod literal;
pub mod query;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::{BookmarkError, GraphqlError};
use crate::record::Record;
use crate::settings::Settings;
use crate::tables::{Category, TableRef};
use literal::FieldValue;

const ADMIN_SECRET_HEADER: &str = "X-Hasura-Admin-Secret";

/// Sends one GraphQL document and returns the `data` payload.
pub trait Transport {
    async fn post(&self, context: &str, query: &str) -> Result<Value, BookmarkError>;
}

#[derive(Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

impl GraphqlResponse {
    fn into_data(self, context: &str) -> Result<Value, BookmarkError> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Err(BookmarkError::Remote {
                context: context.to_string(),
                errors,
            });
        }
        self.data
            .ok_or_else(|| BookmarkError::Shape(format!("({}) response has no data", context)))
    }
}

pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
    admin_secret: String,
}

impl HttpTransport {
    pub fn new(settings: &Settings, http: reqwest::Client) -> Result<Self, BookmarkError> {
        Ok(HttpTransport {
            http,
            endpoint: settings.endpoint()?.to_string(),
            admin_secret: settings.admin_secret()?.to_string(),
        })
    }
}

impl Transport for HttpTransport {
    async fn post(&self, context: &str, query: &str) -> Result<Value, BookmarkError> {
        debug!(context, query, "posting to remote store");
        let response = self
            .http
            .post(&self.endpoint)
            .header(ADMIN_SECRET_HEADER, &self.admin_secret)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookmarkError::Status {
                context: context.to_string(),
                status,
            });
        }

        let body: GraphqlResponse = response.json().await?;
        body.into_data(context)
    }
}

/// Result of an insert attempt that reached the store.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted { id: String },
    Duplicate { existing: Vec<Value> },
}

pub struct HasuraClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> HasuraClient<T> {
    pub fn new(transport: T) -> Self {
        HasuraClient { transport }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── Reads ──

    pub async fn query_items(
        &self,
        table: &TableRef,
        order_column: &str,
    ) -> Result<Vec<Value>, BookmarkError> {
        check_column(table, order_column)?;
        let root = table.root_field();
        let q = query::items(&root, order_column, table.columns);
        let data = self.transport.post(&format!("queryItems - {}", root), &q).await?;
        rows(data, &root)
    }

    pub async fn search_items(
        &self,
        table: &TableRef,
        pattern: &str,
        column: &str,
    ) -> Result<Vec<Value>, BookmarkError> {
        check_column(table, column)?;
        let root = table.root_field();
        let q = query::search(&root, pattern, column, table.columns);
        let data = self.transport.post(&format!("searchItems - {}", root), &q).await?;
        rows(data, &root)
    }

    pub async fn query_tags(&self, schema: &str, table: &str) -> Result<Vec<String>, BookmarkError> {
        let q = query::tags(schema, table);
        let data = self.transport.post(&format!("queryTags - {}", table), &q).await?;
        let names = rows(data, "meta_tags")?
            .iter()
            .filter_map(|row| row.get("name").and_then(Value::as_str).map(str::to_string))
            .collect();
        Ok(names)
    }

    pub async fn aggregate_count(
        &self,
        table: &TableRef,
        column: &str,
    ) -> Result<Vec<(String, usize)>, BookmarkError> {
        check_column(table, column)?;
        let root = table.root_field();
        let q = query::column_values(&root, column);
        let data = self
            .transport
            .post(&format!("queryTableAggregateCount - {}", root), &q)
            .await?;
        let rows = rows(data, &root)?;
        Ok(aggregate::count_unique_sorted(aggregate::collect_column(&rows, column)))
    }

    // ── Writes ──

    /// Existence check on the unique column, then insert. The two round trips
    /// are not atomic; concurrent callers can still race on the same key.
    pub async fn add_item(&self, record: &Record) -> Result<InsertOutcome, BookmarkError> {
        record.validate()?;
        let category = record.category();
        let table = TableRef::from_category(category);

        let existing = self
            .search_items(&table, record.unique_value(), category.unique_column())
            .await?;
        if !existing.is_empty() {
            info!(
                table = category.table(),
                matches = existing.len(),
                "item already exists, skipping insert"
            );
            return Ok(InsertOutcome::Duplicate { existing });
        }

        let root = table.root_field();
        let q = query::insert_one(&root, &record.fields());
        let data = self.transport.post(&format!("addItem - {}", root), &q).await?;
        let id = inserted_id(&data, category)?;
        info!(table = category.table(), %id, "inserted");
        Ok(InsertOutcome::Inserted { id })
    }

    pub async fn update_item(
        &self,
        table: &TableRef,
        id: &str,
        fields: &[(&str, FieldValue)],
        return_column: &str,
    ) -> Result<Value, BookmarkError> {
        check_column(table, return_column)?;
        for (column, _) in fields {
            check_column(table, column)?;
        }
        let root = table.root_field();
        let q = query::update(&root, id, fields, return_column);
        let data = self.transport.post(&format!("updateItem - {}", root), &q).await?;
        data.get(format!("update_{}", root))
            .and_then(|u| u.get("returning"))
            .and_then(|r| r.get(0))
            .and_then(|row| row.get(return_column))
            .cloned()
            .ok_or_else(|| BookmarkError::Shape(format!("update_{} returned no rows", root)))
    }
}

fn check_column(table: &TableRef, column: &str) -> Result<(), BookmarkError> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(BookmarkError::UnknownColumn {
            table: table.root_field(),
            column: column.to_string(),
        })
    }
}

fn rows(mut data: Value, root: &str) -> Result<Vec<Value>, BookmarkError> {
    match data.get_mut(root).map(Value::take) {
        Some(Value::Array(rows)) => Ok(rows),
        _ => Err(BookmarkError::Shape(format!("missing `{}` rows", root))),
    }
}

fn inserted_id(data: &Value, category: Category) -> Result<String, BookmarkError> {
    let key = format!("insert_{}_one", category.table());
    let id = match data.get(&key).and_then(|row| row.get("id")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(BookmarkError::Shape(format!("{} returned no id", key))),
    };
    if id.is_empty() {
        return Err(BookmarkError::Shape(format!("{} returned an empty id", key)));
    }
    Ok(id)
}
