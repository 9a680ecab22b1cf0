//! Playlist normalizer
//!
//! Turns the provider's nested playlist tree into the flat season summary
//! served to clients. Pure functions only: the same tree always yields the
//! same [`SeasonList`].
//!
//! Every missing field degrades to an empty value instead of an error. An
//! empty playlist is not rejected here; the handler reports it as
//! "Media not found" before calling in.

use crate::models::{
    MediaKind, MovieLanguageSummary, RawPlaylistNode, SeasonEntry, SeasonList, SeasonSummary,
};

/// Substring marking the top-level node of a series
const SEASON_MARKER: &str = "Season";

/// Decide whether a playlist is a series or a movie.
///
/// Heuristic: the first top-level title contains "Season" (case-sensitive).
pub fn classify(playlist: &[RawPlaylistNode]) -> MediaKind {
    match playlist.first().and_then(|node| node.title.as_deref()) {
        Some(title) if title.contains(SEASON_MARKER) => MediaKind::Series,
        _ => MediaKind::Movie,
    }
}

/// Normalize a raw playlist into its client-facing summary
pub fn normalize(playlist: &[RawPlaylistNode]) -> SeasonList {
    match classify(playlist) {
        MediaKind::Series => SeasonList {
            seasons: playlist
                .iter()
                .map(|season| SeasonEntry::Season(summarize_season(season)))
                .collect(),
            kind: MediaKind::Series,
        },
        MediaKind::Movie => SeasonList {
            seasons: vec![SeasonEntry::Movie(summarize_movie(playlist))],
            kind: MediaKind::Movie,
        },
    }
}

fn summarize_season(season: &RawPlaylistNode) -> SeasonSummary {
    let episodes = season.children();

    SeasonSummary {
        season: season.title.clone(),
        total_episodes: episodes.len(),
        lang: first_episode_languages(episodes),
    }
}

/// Languages are read from the first episode only
fn first_episode_languages(episodes: &[RawPlaylistNode]) -> Vec<String> {
    match episodes.first() {
        Some(first) => collect_titles(first.children()),
        None => Vec::new(),
    }
}

fn summarize_movie(playlist: &[RawPlaylistNode]) -> MovieLanguageSummary {
    MovieLanguageSummary {
        lang: collect_titles(playlist),
    }
}

fn collect_titles(nodes: &[RawPlaylistNode]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|node| node.title().map(str::to_string))
        .collect()
}
