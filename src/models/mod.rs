pub mod envelope;
pub mod playlist;

pub use envelope::Envelope;
pub use playlist::{
    MediaKind, MovieLanguageSummary, RawPlaylistNode, SeasonEntry, SeasonList, SeasonSummary,
};
