use std::sync::LazyLock;

use regex::Regex;

use super::{capture_first, flatten, fmt_value, title::clean_title};
use crate::error::BookmarkError;

static MP3_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?\.mp3).*$").unwrap());

/// Podcast hosting sites with a known page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Castro,
    Overcast,
}

struct PatternSet {
    title: Regex,
    creator: Regex,
    url: Regex,
}

static CASTRO: LazyLock<PatternSet> = LazyLock::new(|| PatternSet {
    title: Regex::new(r"<h1>(.*?)</h1>").unwrap(),
    creator: Regex::new(r#"<h2>\s?<a\shref=".*?"\salt=".*?">(.*?)</a>\s?</h2>"#).unwrap(),
    url: Regex::new(r#"<source\ssrc="(.*?)"\stype="audio/mp3"\s?/?>"#).unwrap(),
});

static OVERCAST: LazyLock<PatternSet> = LazyLock::new(|| PatternSet {
    title: Regex::new(r#"<h2\sclass="margintop0 marginbottom0"\sclass="title">(.*?)</h2>"#)
        .unwrap(),
    creator: Regex::new(r#"<a\shref="/itunes\d+.*?"\s?>(.*?)</a>"#).unwrap(),
    url: Regex::new(r#"<source\ssrc="(.*?)"\stype="audio/mp3"\s?/?>"#).unwrap(),
});

impl Service {
    pub fn from_url(url: &str) -> Result<Self, BookmarkError> {
        if url.contains("castro.fm") {
            Ok(Service::Castro)
        } else if url.contains("overcast.fm") {
            Ok(Service::Overcast)
        } else {
            Err(BookmarkError::UnsupportedSource(url.to_string()))
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Service::Castro => "castro",
            Service::Overcast => "overcast",
        }
    }

    fn patterns(self) -> &'static PatternSet {
        match self {
            Service::Castro => &CASTRO,
            Service::Overcast => &OVERCAST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    pub creator: String,
    pub url: String,
}

/// Pulls {title, creator, audio url} out of an episode page.
pub fn extract(raw: &str, service: Service) -> Result<Episode, BookmarkError> {
    let page = flatten(raw);
    let patterns = service.patterns();

    let title = clean_title(&fmt_value(required(&page, &patterns.title, "title", service)?));
    if title.is_empty() {
        return Err(BookmarkError::Extraction {
            field: "title",
            service: service.name(),
        });
    }
    let creator = fmt_value(required(&page, &patterns.creator, "creator", service)?);
    let link = required(&page, &patterns.url, "url", service)?;
    let url = MP3_TAIL_RE.replace(link, "$1").into_owned();

    Ok(Episode {
        title,
        creator,
        url,
    })
}

fn required<'a>(
    page: &'a str,
    re: &Regex,
    field: &'static str,
    service: Service,
) -> Result<&'a str, BookmarkError> {
    capture_first(page, re)
        .filter(|m| !m.trim().is_empty())
        .ok_or(BookmarkError::Extraction {
            field,
            service: service.name(),
        })
}
