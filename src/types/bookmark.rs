use serde::{Deserialize, Serialize};

/// Default glyph shown for a list that carries no icon of its own.
pub const DEFAULT_LIST_ICON: &str = "📁";

/// Title shown when neither the user nor the crawler supplied one.
pub const UNTITLED: &str = "Untitled";

/// URL used when no upstream shape carries a link.
pub const PLACEHOLDER_URL: &str = "#";

/// A list row as delivered by the lists endpoint or the cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawList {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

/// Nested `content` / `metadata` object found on upstream bookmark rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawContent {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A bookmark row in any of the shapes the upstream manager or the cache emits.
///
/// Field precedence is not decided here; see [`crate::services::field_resolver`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBookmark {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<RawContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RawContent>,
    #[serde(default, alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

/// A single saved link, owned by exactly one [`List`].
///
/// The user title and the crawled title stay separate; which one is shown is
/// decided at render time by [`Bookmark::display_title`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: Option<String>,
    pub crawled_title: Option<String>,
    pub url: String,
    pub favicon: Option<String>,
    pub description: Option<String>,
    pub list_id: String,
}

impl Bookmark {
    /// User title, else crawled title, else [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.crawled_title
                    .as_deref()
                    .filter(|t| !t.trim().is_empty())
            })
            .unwrap_or(UNTITLED)
    }
}

/// A bookmark folder node in the hierarchy arena.
///
/// Children are stored as ids; the arena in
/// [`crate::managers::hierarchy_manager::Hierarchy`] owns every node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
    pub children: Vec<String>,
    pub bookmarks: Vec<Bookmark>,
}

impl List {
    /// Creates an empty node from a raw row, defaulting the icon.
    pub fn from_raw(raw: &RawList) -> Self {
        let icon = raw
            .icon
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .unwrap_or(DEFAULT_LIST_ICON)
            .to_string();
        Self {
            id: raw.id.clone(),
            name: raw.name.clone(),
            icon,
            description: raw.description.clone(),
            parent_id: raw.parent_id.clone().filter(|p| !p.is_empty()),
            children: Vec::new(),
            bookmarks: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
