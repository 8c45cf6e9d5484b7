//! Unit tests for field resolution across upstream bookmark shapes.
//!
//! A bookmark may carry its title, URL, favicon and description at the top
//! level, under `content`, or under `metadata`. These tests pin the
//! precedence of each field and the fallbacks used when nothing is present.

use homedash::services::field_resolver::{
    self, fallback_favicon, favicon_for, lookup, resolve, to_bookmark, Field, FieldSource,
    URL_SOURCES,
};
use homedash::types::bookmark::{RawBookmark, RawContent};
use rstest::rstest;

fn raw(id: &str) -> RawBookmark {
    RawBookmark {
        id: id.to_string(),
        ..Default::default()
    }
}

fn content(title: Option<&str>, url: Option<&str>) -> RawContent {
    RawContent {
        kind: Some("link".into()),
        title: title.map(str::to_string),
        url: url.map(str::to_string),
        ..Default::default()
    }
}

/// The user's own title beats the `name` field.
#[test]
fn test_user_title_prefers_title_over_name() {
    let mut b = raw("1");
    b.title = Some("Mine".into());
    b.name = Some("Other".into());
    let bookmark = to_bookmark(&b, "L");
    assert_eq!(bookmark.title.as_deref(), Some("Mine"));
    assert_eq!(bookmark.display_title(), "Mine");
}

/// With no user title the crawled title is shown.
#[test]
fn test_display_title_falls_back_to_crawled() {
    let mut b = raw("1");
    b.content = Some(content(Some("Crawled Page"), Some("https://a.example")));
    let bookmark = to_bookmark(&b, "L");
    assert_eq!(bookmark.title, None);
    assert_eq!(bookmark.display_title(), "Crawled Page");
}

/// Crawled title from `metadata` is used when `content` has none.
#[test]
fn test_crawled_title_from_metadata() {
    let mut b = raw("1");
    b.metadata = Some(RawContent {
        title: Some("Meta Title".into()),
        ..Default::default()
    });
    assert_eq!(to_bookmark(&b, "L").display_title(), "Meta Title");
}

#[test]
fn test_display_title_untitled_when_nothing_present() {
    let mut b = raw("1");
    b.title = Some("   ".into());
    assert_eq!(to_bookmark(&b, "L").display_title(), "Untitled");
}

#[rstest]
#[case(Some("https://direct.example"), Some("https://content.example"), Some("https://source.example"), "https://direct.example")]
#[case(None, Some("https://content.example"), Some("https://source.example"), "https://content.example")]
#[case(None, None, Some("https://source.example"), "https://source.example")]
#[case(None, None, None, "#")]
#[case(Some(""), None, None, "#")]
fn test_url_precedence(
    #[case] direct: Option<&str>,
    #[case] nested: Option<&str>,
    #[case] source: Option<&str>,
    #[case] expected: &str,
) {
    let mut b = raw("1");
    b.url = direct.map(str::to_string);
    b.content = nested.map(|u| content(None, Some(u)));
    b.source_url = source.map(str::to_string);
    assert_eq!(to_bookmark(&b, "L").url, expected);
}

#[test]
fn test_lookup_ignores_unsupported_combinations() {
    let mut b = raw("1");
    b.source_url = Some("https://s.example".into());
    assert_eq!(lookup(&b, Field::Title, FieldSource::SourceUrl), None);
    assert_eq!(lookup(&b, Field::Url, FieldSource::SourceUrl), Some("https://s.example"));
}

#[test]
fn test_resolve_skips_blank_values() {
    let mut b = raw("1");
    b.url = Some("  ".into());
    b.source_url = Some("https://s.example".into());
    assert_eq!(
        resolve(&b, Field::Url, URL_SOURCES).as_deref(),
        Some("https://s.example")
    );
}

#[test]
fn test_description_and_favicon_resolution_order() {
    let mut b = raw("1");
    b.content = Some(RawContent {
        favicon: Some("https://c.example/icon.png".into()),
        description: Some("from content".into()),
        ..Default::default()
    });
    b.metadata = Some(RawContent {
        description: Some("from metadata".into()),
        ..Default::default()
    });
    let bookmark = to_bookmark(&b, "L");
    assert_eq!(bookmark.favicon.as_deref(), Some("https://c.example/icon.png"));
    assert_eq!(bookmark.description.as_deref(), Some("from content"));
}

#[test]
fn test_to_bookmark_records_owning_list() {
    let bookmark = to_bookmark(&raw("1"), "list-9");
    assert_eq!(bookmark.list_id, "list-9");
}

/// A bookmark without its own favicon gets the domain lookup.
#[test]
fn test_favicon_falls_back_to_domain_service() {
    let mut b = raw("1");
    b.url = Some("https://docs.rs/serde/latest".into());
    let bookmark = to_bookmark(&b, "L");
    assert_eq!(
        favicon_for(&bookmark).as_deref(),
        Some("https://www.google.com/s2/favicons?domain=docs.rs&sz=32")
    );
}

#[test]
fn test_own_favicon_wins_over_fallback() {
    let mut b = raw("1");
    b.url = Some("https://docs.rs".into());
    b.favicon = Some("https://docs.rs/favicon.ico".into());
    assert_eq!(
        favicon_for(&to_bookmark(&b, "L")).as_deref(),
        Some("https://docs.rs/favicon.ico")
    );
}

#[test]
fn test_no_favicon_without_host() {
    assert_eq!(fallback_favicon("mailto:someone@example.com"), None);
    assert_eq!(favicon_for(&to_bookmark(&raw("1"), "L")), None);
    assert!(field_resolver::FAVICON_SERVICE.starts_with("https://"));
}
