use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::BookmarkError;
use crate::fetch;
use crate::normalize::{clean_url, fmt_value};

static VIDEO_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://vimeo\.com/(?:.*/)?(\d+)").unwrap());

const API_BASE: &str = "https://api.vimeo.com/videos/";

#[derive(Debug, Deserialize)]
pub struct VideoResponse {
    pub name: String,
    pub user: VideoUser,
}

#[derive(Debug, Deserialize)]
pub struct VideoUser {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub title: String,
    pub creator: String,
    pub url: String,
}

/// `https://vimeo.com/<id>` → `https://api.vimeo.com/videos/<id>`.
pub fn api_url(url: &str) -> Result<String, BookmarkError> {
    VIDEO_URL_RE
        .captures(url.trim())
        .map(|c| format!("{}{}", API_BASE, &c[1]))
        .ok_or_else(|| BookmarkError::UnsupportedSource(url.to_string()))
}

pub fn details(response: VideoResponse, url: &str) -> VideoDetails {
    VideoDetails {
        title: fmt_value(&response.name),
        creator: fmt_value(&response.user.name),
        url: clean_url(url),
    }
}

pub async fn fetch_details(
    http: &reqwest::Client,
    token: &str,
    url: &str,
) -> Result<VideoDetails, BookmarkError> {
    let endpoint = api_url(url)?;
    let response: VideoResponse =
        fetch::get_json(http, &endpoint, Some(token), "getVimeoDetails").await?;
    Ok(details(response, url))
}
