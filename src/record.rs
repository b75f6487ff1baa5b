use serde_json::{Map, Value};

use crate::error::BookmarkError;
use crate::hasura::literal::FieldValue;
use crate::tables::Category;

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    pub author: String,
    pub site: String,
    pub url: String,
    pub tags: Vec<String>,
}

/// Shape shared by comics, podcasts and videos.
#[derive(Debug, Clone, PartialEq)]
pub struct Creation {
    pub title: String,
    pub creator: String,
    pub url: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RedditPost {
    pub title: String,
    pub content: String,
    pub subreddit: String,
    pub url: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    pub tweet: String,
    pub user: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Article(Article),
    Comic(Creation),
    Podcast(Creation),
    Reddit(RedditPost),
    Tweet(Tweet),
    Video(Creation),
}

impl Record {
    pub fn category(&self) -> Category {
        match self {
            Record::Article(_) => Category::Articles,
            Record::Comic(_) => Category::Comics,
            Record::Podcast(_) => Category::Podcasts,
            Record::Reddit(_) => Category::Reddits,
            Record::Tweet(_) => Category::Tweets,
            Record::Video(_) => Category::Videos,
        }
    }

    /// Insert payload in column order. New bookmarks are never archived or dead.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        match self {
            Record::Article(a) => vec![
                ("title", a.title.as_str().into()),
                ("author", a.author.as_str().into()),
                ("site", a.site.as_str().into()),
                ("url", a.url.as_str().into()),
                ("archive", false.into()),
                ("tags", a.tags.clone().into()),
                ("dead", false.into()),
            ],
            Record::Comic(c) | Record::Podcast(c) | Record::Video(c) => vec![
                ("title", c.title.as_str().into()),
                ("creator", c.creator.as_str().into()),
                ("url", c.url.as_str().into()),
                ("archive", false.into()),
                ("tags", c.tags.clone().into()),
                ("dead", false.into()),
            ],
            Record::Reddit(r) => vec![
                ("title", r.title.as_str().into()),
                ("subreddit", r.subreddit.as_str().into()),
                ("url", r.url.as_str().into()),
                ("archive", false.into()),
                ("content", r.content.as_str().into()),
                ("tags", r.tags.clone().into()),
                ("dead", false.into()),
            ],
            Record::Tweet(t) => vec![
                ("tweet", t.tweet.as_str().into()),
                ("user", t.user.as_str().into()),
                ("url", t.url.as_str().into()),
            ],
        }
    }

    /// Every text column the category lists must be non-blank.
    pub fn validate(&self) -> Result<(), BookmarkError> {
        let category = self.category();
        for (field, value) in self.fields() {
            let blank = matches!(&value, FieldValue::Str(s) if s.trim().is_empty());
            if blank && category.fields().contains(&field) {
                return Err(BookmarkError::EmptyField {
                    field,
                    table: category.table(),
                });
            }
        }
        Ok(())
    }

    /// Value of the category's unique column.
    pub fn unique_value(&self) -> &str {
        match self {
            Record::Article(a) => &a.title,
            Record::Comic(c) | Record::Podcast(c) | Record::Video(c) => &c.title,
            Record::Reddit(r) => &r.url,
            Record::Tweet(t) => &t.url,
        }
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_json()))
            .collect();
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Record> {
        let creation = Creation {
            title: "T".into(),
            creator: "C".into(),
            url: "https://example.com/x".into(),
            tags: vec!["a".into()],
        };
        vec![
            Record::Article(Article {
                title: "T".into(),
                author: "A".into(),
                site: "S".into(),
                url: "https://example.com/a".into(),
                tags: vec![],
            }),
            Record::Comic(creation.clone()),
            Record::Podcast(creation.clone()),
            Record::Video(creation),
            Record::Reddit(RedditPost {
                title: "T".into(),
                content: "body".into(),
                subreddit: "r/rust".into(),
                url: "https://www.reddit.com/r/rust/comments/1".into(),
                tags: vec![],
            }),
            Record::Tweet(Tweet {
                tweet: "hello".into(),
                user: "@me".into(),
                url: "https://twitter.com/me/status/1".into(),
            }),
        ]
    }

    #[test]
    fn record_supplies_every_column() {
        for record in samples() {
            let names: Vec<&str> = record.fields().iter().map(|(k, _)| *k).collect();
            for column in record.category().fields() {
                assert!(
                    names.contains(column),
                    "{} missing {}",
                    record.category().table(),
                    column
                );
            }
        }
    }

    #[test]
    fn optional_flags_default_false() {
        let record = &samples()[0];
        let fields = record.fields();
        let archive = fields.iter().find(|(k, _)| *k == "archive").unwrap();
        assert_eq!(archive.1, FieldValue::Bool(false));
        assert_eq!(record.to_json()["dead"], Value::Bool(false));
    }

    #[test]
    fn complete_records_validate() {
        for record in samples() {
            assert!(record.validate().is_ok(), "{:?}", record);
        }
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut records = samples();
        if let Record::Comic(c) = &mut records[1] {
            c.title = "   ".into();
        }
        if let Record::Reddit(r) = &mut records[4] {
            r.url = String::new();
        }
        if let Record::Tweet(t) = &mut records[5] {
            t.tweet = String::new();
        }

        let blanks: Vec<(&str, &str)> = records
            .iter()
            .filter_map(|r| match r.validate() {
                Err(BookmarkError::EmptyField { field, table }) => Some((table, field)),
                _ => None,
            })
            .collect();
        assert_eq!(
            blanks,
            vec![("comics", "title"), ("reddits", "url"), ("tweets", "tweet")]
        );
    }

    #[test]
    fn empty_reddit_content_is_allowed() {
        let record = Record::Reddit(RedditPost {
            title: "Link post".into(),
            content: String::new(),
            subreddit: "r/rust".into(),
            url: "https://www.reddit.com/r/rust/comments/2".into(),
            tags: vec![],
        });
        assert!(record.validate().is_ok());
    }

    #[test]
    fn unique_value_follows_category_column() {
        for record in samples() {
            let column = record.category().unique_column();
            assert_eq!(
                record.to_json()[column].as_str(),
                Some(record.unique_value())
            );
        }
    }
}
