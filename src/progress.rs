// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::sync::Arc;

/// Events emitted during feed generation for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A station's podcasts are about to be processed
    StationStarted { name: String, podcasts: usize },

    /// Episodes of a podcast are being fetched from the upstream API
    FetchingEpisodes {
        podcast_title: String,
        program: String,
    },

    /// Media sizes and pictures are being probed
    ProbingMedia {
        podcast_title: String,
        episodes: usize,
    },

    /// A feed file was written
    FeedWritten {
        podcast_title: String,
        path: PathBuf,
        episodes: usize,
    },

    /// A podcast's feed could not be produced
    FeedFailed {
        podcast_title: String,
        error: String,
    },

    /// All stations have been processed
    GenerationCompleted { written: usize, failed: usize },
}

/// Trait for reporting progress events during feed generation.
///
/// Implementations can use this to display progress bars, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {}
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_reporter_handles_all_events() {
        let reporter = NoopReporter;

        reporter.report(ProgressEvent::StationStarted {
            name: "Вести ФМ".to_string(),
            podcasts: 2,
        });

        reporter.report(ProgressEvent::FetchingEpisodes {
            podcast_title: "Национальный интерес".to_string(),
            program: "brand 61375".to_string(),
        });

        reporter.report(ProgressEvent::ProbingMedia {
            podcast_title: "Национальный интерес".to_string(),
            episodes: 10,
        });

        reporter.report(ProgressEvent::FeedWritten {
            podcast_title: "Национальный интерес".to_string(),
            path: PathBuf::from("vestifm/61375.xml"),
            episodes: 10,
        });

        reporter.report(ProgressEvent::FeedFailed {
            podcast_title: "Мастер спорта".to_string(),
            error: "Neither brand_id nor rubric_id is provided".to_string(),
        });

        reporter.report(ProgressEvent::GenerationCompleted {
            written: 1,
            failed: 1,
        });
    }
}
