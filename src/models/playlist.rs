use serde::{Deserialize, Serialize};

/// Media type classification of a provider playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "tv")]
    Series,
    #[serde(rename = "movie")]
    Movie,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Series => write!(f, "tv"),
            MediaKind::Movie => write!(f, "movie"),
        }
    }
}

/// One node of the provider's playlist tree.
///
/// Leaf nodes are playable tracks. Nodes carrying a `folder` are a grouping
/// level: a season at the top of a series, or the language bucket of a
/// single episode one level below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlaylistNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<Vec<RawPlaylistNode>>,
    /// Provider fields the gateway does not interpret (file, id, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawPlaylistNode {
    /// Title when present and non-empty
    pub fn title(&self) -> Option<&str> {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => Some(title),
            _ => None,
        }
    }

    /// Child nodes, empty when the node has no folder
    pub fn children(&self) -> &[RawPlaylistNode] {
        match &self.folder {
            Some(folder) => folder,
            None => &[],
        }
    }
}

/// Per-season summary of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    pub total_episodes: usize,
    pub lang: Vec<String>,
}

/// Language tracks of a movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieLanguageSummary {
    pub lang: Vec<String>,
}

/// Entry of the `seasons` array
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeasonEntry {
    Season(SeasonSummary),
    Movie(MovieLanguageSummary),
}

/// Normalized result served by `/api/v1/getSeasonList`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonList {
    pub seasons: Vec<SeasonEntry>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}
