use serde::Deserialize;
use serde_json::Value;

use crate::error::BookmarkError;
use crate::fetch;
use crate::normalize::{clean_url, fmt_value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditDetails {
    pub title: String,
    pub content: String,
    pub subreddit: String,
    pub url: String,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Deserialize)]
struct Child {
    data: Post,
}

#[derive(Deserialize)]
struct Post {
    title: String,
    subreddit_name_prefixed: String,
    #[serde(default)]
    selftext: Option<String>,
    #[serde(default)]
    url_overridden_by_dest: Option<String>,
    #[serde(default)]
    media: Option<Value>,
    #[serde(default)]
    secure_media: Option<Value>,
}

impl Post {
    /// Body text, else a playable video url, else the linked url.
    fn content(&self) -> String {
        let text = self.selftext.as_deref().filter(|s| !s.is_empty());
        let video = self
            .media
            .as_ref()
            .and_then(|m| m.pointer("/reddit_video/fallback_url"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(|s| s.replace("?source=fallback", ""));
        let gif = self
            .secure_media
            .as_ref()
            .and_then(|m| m.pointer("/oembed/thumbnail_url"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(|s| s.replace("size_restricted.gif", "mobile.mp4"));

        text.map(str::to_string)
            .or(video)
            .or(gif)
            .or_else(|| self.url_overridden_by_dest.clone())
            .unwrap_or_default()
    }
}

/// The post JSON lives at the post url, tracking query dropped, with `.json` appended.
pub fn api_url(url: &str) -> String {
    format!("{}.json", clean_url(url).trim_end_matches('/'))
}

fn parse_post(listings: Vec<Listing>, url: &str) -> Result<RedditDetails, BookmarkError> {
    let post = listings
        .into_iter()
        .next()
        .and_then(|l| l.data.children.into_iter().next())
        .map(|c| c.data)
        .ok_or_else(|| BookmarkError::Shape("reddit listing has no post".into()))?;

    Ok(RedditDetails {
        title: fmt_value(&post.title),
        content: post.content(),
        subreddit: post.subreddit_name_prefixed,
        url: clean_url(url),
    })
}

pub async fn fetch_details(
    http: &reqwest::Client,
    url: &str,
) -> Result<RedditDetails, BookmarkError> {
    let listings: Vec<Listing> = fetch::get_json(http, &api_url(url), None, "getRedditDetails").await?;
    parse_post(listings, url)
}
