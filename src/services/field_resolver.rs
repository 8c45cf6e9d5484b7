//! Field resolution for upstream bookmark rows.
//!
//! Upstream rows carry the same logical field in several places depending on
//! where they came from (the manager's API, the cache, older exports). Each
//! field has an ordered list of named sources; the first non-empty value wins.

use reqwest::Url;

use crate::types::bookmark::{Bookmark, RawBookmark, PLACEHOLDER_URL};

/// Favicon lookup service keyed by hostname.
pub const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// A logical bookmark field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Url,
    Favicon,
    Description,
}

/// A place on a raw row where a field may be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// The top-level field of the same name.
    Direct,
    /// The top-level `name` field.
    Name,
    /// The nested `content` object.
    Content,
    /// The nested `metadata` object.
    Metadata,
    /// The top-level `sourceUrl` field.
    SourceUrl,
}

pub const USER_TITLE_SOURCES: &[FieldSource] = &[FieldSource::Direct, FieldSource::Name];
pub const CRAWLED_TITLE_SOURCES: &[FieldSource] = &[FieldSource::Content, FieldSource::Metadata];
pub const URL_SOURCES: &[FieldSource] = &[
    FieldSource::Direct,
    FieldSource::Content,
    FieldSource::SourceUrl,
];
pub const FAVICON_SOURCES: &[FieldSource] = &[
    FieldSource::Direct,
    FieldSource::Content,
    FieldSource::Metadata,
];
pub const DESCRIPTION_SOURCES: &[FieldSource] = &[
    FieldSource::Direct,
    FieldSource::Content,
    FieldSource::Metadata,
];

/// Reads `field` from one `source` on the row. Combinations that do not
/// exist on any upstream shape yield `None`.
pub fn lookup<'a>(raw: &'a RawBookmark, field: Field, source: FieldSource) -> Option<&'a str> {
    let value = match (source, field) {
        (FieldSource::Direct, Field::Title) => raw.title.as_deref(),
        (FieldSource::Direct, Field::Url) => raw.url.as_deref(),
        (FieldSource::Direct, Field::Favicon) => raw.favicon.as_deref(),
        (FieldSource::Direct, Field::Description) => raw.description.as_deref(),
        (FieldSource::Name, Field::Title) => raw.name.as_deref(),
        (FieldSource::SourceUrl, Field::Url) => raw.source_url.as_deref(),
        (FieldSource::Content, f) => raw.content.as_ref().and_then(|c| nested(c, f)),
        (FieldSource::Metadata, f) => raw.metadata.as_ref().and_then(|m| nested(m, f)),
        _ => None,
    };
    value.filter(|v| !v.trim().is_empty())
}

fn nested(content: &crate::types::bookmark::RawContent, field: Field) -> Option<&str> {
    match field {
        Field::Title => content.title.as_deref(),
        Field::Url => content.url.as_deref(),
        Field::Favicon => content.favicon.as_deref(),
        Field::Description => content.description.as_deref(),
    }
}

/// First non-empty value of `field` across `sources`, in order.
pub fn resolve(raw: &RawBookmark, field: Field, sources: &[FieldSource]) -> Option<String> {
    sources
        .iter()
        .find_map(|source| lookup(raw, field, *source))
        .map(str::to_string)
}

/// Converts a raw row into a [`Bookmark`] owned by `list_id`.
pub fn to_bookmark(raw: &RawBookmark, list_id: &str) -> Bookmark {
    Bookmark {
        id: raw.id.clone(),
        title: resolve(raw, Field::Title, USER_TITLE_SOURCES),
        crawled_title: resolve(raw, Field::Title, CRAWLED_TITLE_SOURCES),
        url: resolve(raw, Field::Url, URL_SOURCES).unwrap_or_else(|| PLACEHOLDER_URL.to_string()),
        favicon: resolve(raw, Field::Favicon, FAVICON_SOURCES),
        description: resolve(raw, Field::Description, DESCRIPTION_SOURCES),
        list_id: list_id.to_string(),
    }
}

/// Domain-keyed favicon for `url`, or `None` if the URL has no host.
pub fn fallback_favicon(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?;
    Some(format!("{}?domain={}&sz=32", FAVICON_SERVICE, host))
}

/// The bookmark's own favicon, else the domain fallback, else nothing.
pub fn favicon_for(bookmark: &Bookmark) -> Option<String> {
    bookmark
        .favicon
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .map(str::to_string)
        .or_else(|| fallback_favicon(&bookmark.url))
}
