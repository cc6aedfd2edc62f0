pub mod catalog;
pub mod episode;
pub mod error;
pub mod feed;
pub mod http;
pub mod navigation;
pub mod playback;
pub mod progress;
pub mod source;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use catalog::{PodcastRecord, fetch_catalog};
pub use episode::{Episode, fetch_episodes, normalize_announcement};
pub use error::{
    CatalogError, DataError, EpisodeError, GenerateError, IdentifierError, NavigationError,
    PlaybackError, StationsError,
};
pub use feed::{GenerateOptions, GenerateSummary, generate_all, load_stations};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use navigation::{ProgramId, Route};
pub use playback::{AudioOutput, MpvOutput, PlaybackController, stream_url};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use source::DataSource;
pub use view::{CatalogView, EpisodeView, LoadStatus};
