use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::BookmarkError;

/// GET a page body as text. Any non-2xx status is an error.
pub async fn get_text(
    http: &reqwest::Client,
    url: &str,
    context: &'static str,
) -> Result<String, BookmarkError> {
    info!("({}) fetching {}", context, url);
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(BookmarkError::Status {
            context: context.to_string(),
            status,
        });
    }
    Ok(response.text().await?)
}

/// GET and decode a JSON body, optionally with a bearer token.
pub async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
    context: &'static str,
) -> Result<T, BookmarkError> {
    info!("({}) fetching {}", context, url);
    let mut request = http.get(url);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(BookmarkError::Status {
            context: context.to_string(),
            status,
        });
    }
    Ok(response.json().await?)
}
