//! Table → column mappings mirroring the backend schema.

/// Bookmark content categories. Each maps to one table in the bookmarks schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Articles,
    Comics,
    Podcasts,
    Reddits,
    Tweets,
    Videos,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Articles,
        Category::Comics,
        Category::Podcasts,
        Category::Reddits,
        Category::Tweets,
        Category::Videos,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Category::Articles => "articles",
            Category::Comics => "comics",
            Category::Podcasts => "podcasts",
            Category::Reddits => "reddits",
            Category::Tweets => "tweets",
            Category::Videos => "videos",
        }
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Category::Articles => &["title", "author", "site", "url", "archive"],
            Category::Comics => &["title", "creator", "url", "archive"],
            Category::Podcasts => &["title", "creator", "url", "archive"],
            Category::Reddits => &["title", "subreddit", "url", "archive"],
            Category::Tweets => &["tweet", "user", "url"],
            Category::Videos => &["title", "creator", "url", "archive"],
        }
    }

    /// Column used for the pre-insert existence check.
    pub fn unique_column(self) -> &'static str {
        match self {
            Category::Reddits | Category::Tweets => "url",
            _ => "title",
        }
    }

    pub fn from_table(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.table() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Bookmarks,
    Feeds,
    Media,
    Meta,
}

impl Schema {
    pub fn name(self) -> &'static str {
        match self {
            Schema::Bookmarks => "bookmarks",
            Schema::Feeds => "feeds",
            Schema::Media => "media",
            Schema::Meta => "meta",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "bookmarks" => Some(Schema::Bookmarks),
            "feeds" => Some(Schema::Feeds),
            "media" => Some(Schema::Media),
            "meta" => Some(Schema::Meta),
            _ => None,
        }
    }
}

const FEED_FIELDS: &[(&str, &[&str])] = &[
    ("podcasts", &["category", "rss", "title", "url"]),
    ("manga", &["title", "author", "mangadex_id"]),
    ("reddit", &["name", "description", "url"]),
    ("twitter", &["name", "username", "description", "list", "url"]),
    ("websites", &["category", "rss", "title", "url"]),
    ("youtube", &["category", "rss", "title", "url"]),
];

const MEDIA_FIELDS: &[(&str, &[&str])] = &[
    ("books", &["title", "author", "genre"]),
    ("games", &["title", "studio", "platform", "genre"]),
    ("movies", &["title", "director", "genre"]),
    ("shows", &["title", "director", "genre"]),
];

/// Bookmark columns outside the default selection that callers may still name.
const BOOKMARK_EXTRA_COLUMNS: &[&str] = &["tags", "dead"];

const META_TABLES: &[&str] = &["categories", "genres", "platforms", "tags"];
const META_FIELDS: &[&str] = &["name", "table", "schema"];

/// A resolved, queryable table: its GraphQL root field and default columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Schema,
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableRef {
    /// Parses `table` (bookmarks) or `schema.table`.
    pub fn parse(name: &str) -> Option<Self> {
        let (schema, table) = match name.split_once('.') {
            Some((s, t)) => (Schema::parse(s)?, t),
            None => (Schema::Bookmarks, name),
        };

        let (name, columns) = match schema {
            Schema::Bookmarks => {
                let c = Category::from_table(table)?;
                (c.table(), c.fields())
            }
            Schema::Feeds => lookup(FEED_FIELDS, table)?,
            Schema::Media => lookup(MEDIA_FIELDS, table)?,
            Schema::Meta => (*META_TABLES.iter().find(|t| **t == table)?, META_FIELDS),
        };

        Some(TableRef {
            schema,
            name,
            columns,
        })
    }

    pub fn from_category(category: Category) -> Self {
        TableRef {
            schema: Schema::Bookmarks,
            name: category.table(),
            columns: category.fields(),
        }
    }

    /// Whether `column` may be used as an identifier in a query on this table.
    pub fn has_column(&self, column: &str) -> bool {
        if column == "id" || self.columns.contains(&column) {
            return true;
        }
        match self.schema {
            Schema::Bookmarks => {
                BOOKMARK_EXTRA_COLUMNS.contains(&column)
                    || (self.name == "reddits" && column == "content")
            }
            _ => false,
        }
    }

    /// GraphQL root field. Bookmark tables are exposed unprefixed.
    pub fn root_field(&self) -> String {
        match self.schema {
            Schema::Bookmarks => self.name.to_string(),
            other => format!("{}_{}", other.name(), self.name),
        }
    }
}

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    name: &str,
) -> Option<(&'static str, &'static [&'static str])> {
    table.iter().find(|(t, _)| *t == name).copied()
}
