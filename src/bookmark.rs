use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::BookmarkError;
use crate::hasura::{HasuraClient, InsertOutcome, Transport};
use crate::normalize::{clean_url, fmt_value, podcast};
use crate::record::{Article, Creation, Record, RedditPost, Tweet};
use crate::{reddit, vimeo};

/// Uniform result every helper hands back to its caller.
#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub success: bool,
    pub message: Value,
    pub source: String,
}

#[derive(Debug, Clone)]
pub enum PageKind {
    Article { author: String, site: String },
    Comic { creator: String },
}

/// Caller-supplied metadata for an article or comic.
#[derive(Debug, Clone)]
pub struct PageData {
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub kind: PageKind,
}

impl PageData {
    fn into_record(self) -> Record {
        let title = fmt_value(&self.title);
        let url = clean_url(&self.url);
        match self.kind {
            PageKind::Article { author, site } => Record::Article(Article {
                title,
                author: fmt_value(&author),
                site: fmt_value(&site),
                url,
                tags: self.tags,
            }),
            PageKind::Comic { creator } => Record::Comic(Creation {
                title,
                creator: fmt_value(&creator),
                url,
                tags: self.tags,
            }),
        }
    }
}

pub async fn bookmark_page<T: Transport>(client: &HasuraClient<T>, page: PageData) -> BookmarkResponse {
    let source = match page.kind {
        PageKind::Article { .. } => "bookmark_page:articles",
        PageKind::Comic { .. } => "bookmark_page:comics",
    };
    bookmark_record(client, page.into_record(), source).await
}

pub async fn bookmark_podcast<T: Transport>(
    client: &HasuraClient<T>,
    http: &reqwest::Client,
    url: &str,
    tags: Vec<String>,
) -> BookmarkResponse {
    let source = "bookmark_podcast";
    let record = async move {
        let service = podcast::Service::from_url(url)?;
        let page = crate::fetch::get_text(http, url, "getPodcastDetails").await?;
        let episode = podcast::extract(&page, service)?;
        Ok::<_, BookmarkError>(Record::Podcast(Creation {
            title: episode.title,
            creator: episode.creator,
            url: episode.url,
            tags,
        }))
    }
    .await;
    insert_or_report(client, record, source).await
}

pub async fn bookmark_reddit<T: Transport>(
    client: &HasuraClient<T>,
    http: &reqwest::Client,
    url: &str,
    tags: Vec<String>,
) -> BookmarkResponse {
    let record = reddit::fetch_details(http, url).await.map(|d| {
        Record::Reddit(RedditPost {
            title: d.title,
            content: d.content,
            subreddit: d.subreddit,
            url: d.url,
            tags,
        })
    });
    insert_or_report(client, record, "bookmark_reddit").await
}

pub async fn bookmark_vimeo<T: Transport>(
    client: &HasuraClient<T>,
    http: &reqwest::Client,
    token: &str,
    url: &str,
    tags: Vec<String>,
) -> BookmarkResponse {
    let record = vimeo::fetch_details(http, token, url).await.map(|d| {
        Record::Video(Creation {
            title: d.title,
            creator: d.creator,
            url: d.url,
            tags,
        })
    });
    insert_or_report(client, record, "bookmark_vimeo").await
}

pub async fn bookmark_tweet<T: Transport>(client: &HasuraClient<T>, tweet: Tweet) -> BookmarkResponse {
    let record = Record::Tweet(Tweet {
        tweet: fmt_value(&tweet.tweet),
        user: fmt_value(&tweet.user),
        url: clean_url(&tweet.url),
    });
    bookmark_record(client, record, "bookmark_tweet").await
}

pub async fn bookmark_record<T: Transport>(
    client: &HasuraClient<T>,
    record: Record,
    source: &str,
) -> BookmarkResponse {
    insert_or_report(client, Ok(record), source).await
}

async fn insert_or_report<T: Transport>(
    client: &HasuraClient<T>,
    record: Result<Record, BookmarkError>,
    source: &str,
) -> BookmarkResponse {
    let record = match record {
        Ok(r) => r,
        Err(e) => return failure(source, e),
    };

    match client.add_item(&record).await {
        Ok(InsertOutcome::Inserted { id }) => BookmarkResponse {
            success: true,
            message: Value::String(id),
            source: source.to_string(),
        },
        Ok(InsertOutcome::Duplicate { existing }) => {
            warn!(source, "item already exists");
            BookmarkResponse {
                success: false,
                message: json!({
                    "error": "Item already exists.",
                    "table": record.category().table(),
                    "record": record.to_json(),
                    "existing": existing,
                }),
                source: source.to_string(),
            }
        }
        Err(e) => failure(source, e),
    }
}

fn failure(source: &str, error: BookmarkError) -> BookmarkResponse {
    warn!(source, %error, "bookmarking failed");
    BookmarkResponse {
        success: false,
        message: Value::String(format!("({}): {}", source, error)),
        source: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasura::fake::FakeStore;

    fn article(url: &str) -> PageData {
        PageData {
            title: "  Rust &amp; WebAssembly ".into(),
            url: url.into(),
            tags: vec!["rust".into(), "wasm".into()],
            kind: PageKind::Article {
                author: "Lin Clark".into(),
                site: "Mozilla Hacks".into(),
            },
        }
    }

    #[tokio::test]
    async fn page_inserts_clean_record() {
        let client = HasuraClient::new(FakeStore::with_rows(vec![]));

        let resp = bookmark_page(&client, article("https://hacks.mozilla.org/rust-wasm?utm_source=rss")).await;

        assert!(resp.success);
        assert_eq!(resp.source, "bookmark_page:articles");
        assert_eq!(resp.message, Value::String("0f8e3c1a-new".into()));
        let mutations = client_mutations(&client);
        assert_eq!(mutations.len(), 1);
        assert!(mutations[0].contains("title: \"Rust & WebAssembly\""));
        assert!(mutations[0].contains("url: \"https://hacks.mozilla.org/rust-wasm\""));
        assert!(mutations[0].contains("tags: \"{rust,wasm}\""));
    }

    #[tokio::test]
    async fn duplicate_reports_existing_rows() {
        let existing = json!({"title": "Rust & WebAssembly", "id": "42"});
        let client = HasuraClient::new(FakeStore::with_rows(vec![existing.clone()]));

        let resp = bookmark_page(&client, article("https://hacks.mozilla.org/rust-wasm")).await;

        assert!(!resp.success);
        assert_eq!(resp.message["existing"], json!([existing]));
        assert_eq!(resp.message["table"], "articles");
        assert!(client_mutations(&client).is_empty());
    }

    #[tokio::test]
    async fn store_failure_becomes_failed_response() {
        let mut store = FakeStore::with_rows(vec![]);
        store.fail_with = Some(|| BookmarkError::Shape("missing `tweets` rows".into()));
        let client = HasuraClient::new(store);

        let resp = bookmark_tweet(
            &client,
            Tweet {
                tweet: "hello".into(),
                user: "@rustlang".into(),
                url: "https://twitter.com/rustlang/status/1?ref=home".into(),
            },
        )
        .await;

        assert!(!resp.success);
        assert_eq!(resp.source, "bookmark_tweet");
        assert!(resp.message.as_str().unwrap().contains("missing `tweets` rows"));
    }

    #[tokio::test]
    async fn blank_title_is_not_a_duplicate_of_anything() {
        let client = HasuraClient::new(FakeStore::with_rows(vec![json!({"id": "9", "title": "Unrelated"})]));
        let mut page = article("https://hacks.mozilla.org/rust-wasm");
        page.title = "   ".into();

        let resp = bookmark_page(&client, page).await;

        assert!(!resp.success);
        let message = resp.message.as_str().unwrap();
        assert!(message.contains("`title` is empty"), "{}", message);
        assert!(client.transport().queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_url_is_rejected() {
        let client = HasuraClient::new(FakeStore::with_rows(vec![]));
        let page = PageData {
            title: "xkcd: Compiling".into(),
            url: " ".into(),
            tags: vec![],
            kind: PageKind::Comic {
                creator: "Randall Munroe".into(),
            },
        };

        let resp = bookmark_page(&client, page).await;

        assert!(!resp.success);
        assert_eq!(resp.source, "bookmark_page:comics");
        assert!(resp.message.as_str().unwrap().contains("`url` is empty; comics"));
        assert!(client_mutations(&client).is_empty());
    }

    #[tokio::test]
    async fn blank_tweet_is_rejected() {
        let client = HasuraClient::new(FakeStore::with_rows(vec![]));

        let resp = bookmark_tweet(
            &client,
            Tweet {
                tweet: "\n ".into(),
                user: "@rustlang".into(),
                url: "https://twitter.com/rustlang/status/2".into(),
            },
        )
        .await;

        assert!(!resp.success);
        assert!(resp.message.as_str().unwrap().contains("`tweet` is empty"));
        assert!(client_mutations(&client).is_empty());
    }

    #[tokio::test]
    async fn store_status_error_names_the_step() {
        let mut store = FakeStore::with_rows(vec![]);
        store.fail_with = Some(|| BookmarkError::Status {
            context: "searchItems - articles".into(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        });
        let client = HasuraClient::new(store);

        let resp = bookmark_page(&client, article("https://hacks.mozilla.org/rust-wasm")).await;

        assert!(!resp.success);
        assert_eq!(
            resp.message,
            Value::String(
                "(bookmark_page:articles): (searchItems - articles): 503 Service Unavailable".into()
            )
        );
    }

    #[tokio::test]
    async fn store_rejection_lists_graphql_errors() {
        let mut store = FakeStore::with_rows(vec![]);
        store.fail_with = Some(|| BookmarkError::Remote {
            context: "searchItems - comics".into(),
            errors: serde_json::from_value(json!([
                {"extensions": {"path": "$.selectionSet.comics", "code": "validation-failed"}, "message": "field not found"}
            ]))
            .unwrap(),
        });
        let client = HasuraClient::new(store);
        let page = PageData {
            title: "xkcd: Compiling".into(),
            url: "https://xkcd.com/303/".into(),
            tags: vec![],
            kind: PageKind::Comic {
                creator: "Randall Munroe".into(),
            },
        };

        let resp = bookmark_page(&client, page).await;

        assert!(!resp.success);
        assert_eq!(resp.source, "bookmark_page:comics");
        let message = resp.message.as_str().unwrap();
        assert!(message.starts_with("(bookmark_page:comics): (searchItems - comics) remote store rejected query"));
        assert!(message.contains("$.selectionSet.comics: field not found"));
    }

    #[tokio::test]
    async fn unsupported_podcast_host_fails_before_fetch() {
        let client = HasuraClient::new(FakeStore::with_rows(vec![]));
        let http = reqwest::Client::new();

        let resp = bookmark_podcast(&client, &http, "https://example.com/episode/1", vec![]).await;

        assert!(!resp.success);
        assert_eq!(resp.source, "bookmark_podcast");
        assert!(client_mutations(&client).is_empty());
    }

    #[test]
    fn response_serializes_uniformly() {
        let resp = BookmarkResponse {
            success: true,
            message: Value::String("abc".into()),
            source: "bookmark_vimeo".into(),
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"success": true, "message": "abc", "source": "bookmark_vimeo"})
        );
    }

    fn client_mutations(client: &HasuraClient<FakeStore>) -> Vec<String> {
        client.transport().mutations()
    }
}
