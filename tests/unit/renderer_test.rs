//! Unit tests for the dashboard renderer.
//!
//! Renders small hierarchies and checks nesting tiers, draggability,
//! omission of empty lists, and per-bookmark presentation.

use homedash::managers::hierarchy_manager::Hierarchy;
use homedash::services::renderer::{render, RenderOptions, MAX_RENDER_DEPTH};
use homedash::types::bookmark::{RawBookmark, RawList};
use homedash::types::config::BookmarkTarget;

fn list(id: &str, parent: Option<&str>) -> RawList {
    RawList {
        id: id.to_string(),
        name: id.to_uppercase(),
        parent_id: parent.map(str::to_string),
        icon: Some("🔖".into()),
        ..Default::default()
    }
}

fn bookmark(id: &str, list_id: &str) -> RawBookmark {
    RawBookmark {
        id: id.to_string(),
        list_id: Some(list_id.to_string()),
        title: Some(format!("Title {}", id)),
        url: Some(format!("https://{}.example/page", id)),
        ..Default::default()
    }
}

fn columns(ids: &[&[&str]]) -> Vec<Vec<String>> {
    ids.iter()
        .map(|c| c.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_tiers_clamp_at_max_depth() {
    let lists = vec![
        list("a", None),
        list("b", Some("a")),
        list("c", Some("b")),
        list("d", Some("c")),
    ];
    let h = Hierarchy::build(&lists, &[bookmark("1", "d")]);
    let view = render(&h, &columns(&[&["a"], &[], &[], &[]]), &RenderOptions::default());

    let tiers: Vec<(String, usize)> = view.lists().map(|l| (l.id.clone(), l.tier)).collect();
    assert_eq!(
        tiers,
        vec![
            ("a".to_string(), 0),
            ("b".to_string(), 1),
            ("c".to_string(), MAX_RENDER_DEPTH),
            ("d".to_string(), MAX_RENDER_DEPTH),
        ]
    );
}

/// Only root cards carry the drag handle.
#[test]
fn test_only_roots_are_draggable() {
    let lists = vec![list("a", None), list("b", Some("a"))];
    let h = Hierarchy::build(&lists, &[bookmark("1", "b")]);
    let view = render(&h, &columns(&[&["a"], &[], &[], &[]]), &RenderOptions::default());
    assert!(view.find_list("a").unwrap().draggable);
    assert!(!view.find_list("b").unwrap().draggable);
}

#[test]
fn test_empty_children_are_omitted() {
    let lists = vec![list("a", None), list("empty", Some("a")), list("full", Some("a"))];
    let h = Hierarchy::build(&lists, &[bookmark("1", "full")]);
    let view = render(&h, &columns(&[&["a"], &[], &[], &[]]), &RenderOptions::default());
    assert!(view.find_list("empty").is_none());
    assert!(view.find_list("full").is_some());
}

#[test]
fn test_unknown_root_ids_are_skipped() {
    let h = Hierarchy::build(&[list("a", None)], &[bookmark("1", "a")]);
    let view = render(&h, &columns(&[&["ghost", "a"], &[], &[], &[]]), &RenderOptions::default());
    assert_eq!(view.column_ids()[0], vec!["a".to_string()]);
}

#[test]
fn test_bookmark_view_fields() {
    let h = Hierarchy::build(&[list("a", None)], &[bookmark("1", "a")]);
    let options = RenderOptions {
        target: BookmarkTarget::NewTab,
    };
    let view = render(&h, &columns(&[&["a"], &[], &[], &[]]), &options);
    let b = view.find_bookmark("1").unwrap();
    assert_eq!(b.label, "Title 1");
    assert_eq!(b.tooltip, "Title 1");
    assert_eq!(b.url, "https://1.example/page");
    assert_eq!(b.target, "_blank");
    assert_eq!(
        b.favicon.as_deref(),
        Some("https://www.google.com/s2/favicons?domain=1.example&sz=32")
    );
    assert!(b.visible);
}

#[test]
fn test_default_target_is_same_tab() {
    let h = Hierarchy::build(&[list("a", None)], &[bookmark("1", "a")]);
    let view = render(&h, &columns(&[&["a"], &[], &[], &[]]), &RenderOptions::default());
    assert_eq!(view.find_bookmark("1").unwrap().target, "_self");
}

#[test]
fn test_list_icon_and_name_carried() {
    let h = Hierarchy::build(&[list("a", None)], &[bookmark("1", "a")]);
    let view = render(&h, &columns(&[&["a"], &[], &[], &[]]), &RenderOptions::default());
    let a = view.find_list("a").unwrap();
    assert_eq!(a.name, "A");
    assert_eq!(a.icon, "🔖");
}

#[test]
fn test_every_column_rendered_even_when_empty() {
    let h = Hierarchy::build(&[], &[]);
    let view = render(&h, &columns(&[&[], &[], &[], &[]]), &RenderOptions::default());
    assert_eq!(view.columns.len(), 4);
    assert!(view.columns.iter().all(|c| c.visible && !c.highlighted));
}

/// A parent cycle renders each list once along any path and terminates.
#[test]
fn test_parent_cycle_renders_once() {
    let lists = vec![list("x", Some("y")), list("y", Some("x"))];
    let h = Hierarchy::build(&lists, &[bookmark("1", "y")]);
    let view = render(&h, &columns(&[&["x"], &[], &[], &[]]), &RenderOptions::default());

    let ids: Vec<String> = view.lists().map(|l| l.id.clone()).collect();
    assert_eq!(ids, vec!["x".to_string(), "y".to_string()]);
    assert!(view.find_list("y").unwrap().children.is_empty());
}

/// Long titles are carried whole in the label; display truncation is the host's job.
#[test]
fn test_long_title_is_not_truncated() {
    let title = "A very long bookmark title that would never fit on one card line".to_string();
    let mut row = bookmark("1", "a");
    row.title = Some(title.clone());
    let h = Hierarchy::build(&[list("a", None)], &[row]);
    let view = render(&h, &columns(&[&["a"], &[], &[], &[]]), &RenderOptions::default());
    let b = view.find_bookmark("1").unwrap();
    assert_eq!(b.label, title);
    assert_eq!(b.tooltip, title);
}
