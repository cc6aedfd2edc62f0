// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use colored::Colorize;
use tracing::{debug, warn};
use url::Url;

use crate::episode::{Episode, fetch_episodes};
use crate::error::{EpisodeError, NavigationError, PlaybackError};
use crate::http::HttpClient;
use crate::navigation::{ProgramId, Route};
use crate::playback::{AudioOutput, PlaybackController};
use crate::source::DataSource;

use super::cards::{PlayAction, render_episode_card};
use super::{FetchTicket, Generation, LoadStatus};

/// Shown whenever the episode list is empty
pub const EPISODES_EMPTY: &str = "No episodes available";

/// Episode list of one program, with a play control per episode
#[derive(Debug, Default)]
pub struct EpisodeView {
    program: Option<ProgramId>,
    episodes: Vec<Episode>,
    status: LoadStatus,
    generation: Generation,
}

impl EpisodeView {
    pub fn new(program: Option<ProgramId>) -> Self {
        Self {
            program,
            ..Self::default()
        }
    }

    /// Build the view a navigation target points at
    pub fn for_target(target: &str) -> Result<Self, NavigationError> {
        match Route::parse(target)? {
            Route::Listen(program) => Ok(Self::new(program)),
            Route::Home => Err(NavigationError::UnknownRoute(target.to_string())),
        }
    }

    /// Start a fresh load.
    ///
    /// Returns `None` when the navigation query named no program; nothing
    /// should be fetched then.
    pub fn activate(&mut self) -> Option<FetchTicket> {
        self.episodes.clear();
        let ticket = self.generation.advance();

        if self.program.is_none() {
            debug!("no brand_id or rubric_id in query, nothing to fetch");
            self.status = LoadStatus::Idle;
            return None;
        }

        self.status = LoadStatus::Loading;
        Some(ticket)
    }

    /// Leave the view; any outstanding response will be discarded
    pub fn deactivate(&mut self) {
        self.generation.advance();
        self.episodes.clear();
        self.status = LoadStatus::Idle;
    }

    /// Apply a fetch result. Returns false if the ticket is stale.
    ///
    /// The collection is replaced wholesale, never merged.
    pub fn apply(&mut self, ticket: FetchTicket, result: Result<Vec<Episode>, EpisodeError>) -> bool {
        if !self.generation.is_current(ticket) {
            debug!("discarding stale episode response");
            return false;
        }

        match result {
            Ok(episodes) => {
                self.episodes = episodes;
                self.status = LoadStatus::Loaded;
            }
            Err(e) => {
                let program = self.program.map(|p| p.to_string()).unwrap_or_default();
                warn!(%program, "failed to load episodes: {e}");
                self.status = LoadStatus::Failed;
            }
        }
        true
    }

    /// Activate, fetch and apply in one step.
    ///
    /// Callers that run fetches concurrently with navigation use
    /// `activate`/`apply` directly so stale responses can be dropped.
    pub async fn load<C: HttpClient>(&mut self, client: &C, source: &DataSource) -> LoadStatus {
        let (Some(ticket), Some(program)) = (self.activate(), self.program) else {
            return self.status;
        };

        let result = fetch_episodes(client, source, program).await;
        self.apply(ticket, result);
        self.status
    }

    /// Play the episode bound to `key` (1-based, as shown on the cards).
    ///
    /// Returns `None` if no card has that key.
    pub async fn play<O: AudioOutput>(
        &self,
        key: usize,
        controller: &mut PlaybackController<O>,
    ) -> Result<Option<Url>, PlaybackError> {
        let Some(episode) = key.checked_sub(1).and_then(|i| self.episodes.get(i)) else {
            return Ok(None);
        };
        controller.play(episode.id).await.map(Some)
    }

    pub fn program(&self) -> Option<ProgramId> {
        self.program
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn render(&self) -> String {
        let Some(first) = self.episodes.first() else {
            return EPISODES_EMPTY.to_string();
        };

        let mut sections = vec![
            format!("{} › {}", "Главная".dimmed(), first.title),
            first.title.bold().to_string(),
        ];
        if let Some(image) = first.preview_image() {
            sections.push(image.dimmed().to_string());
        }
        sections.extend(
            self.episodes
                .iter()
                .enumerate()
                .map(|(i, episode)| render_episode_card(episode, Some(PlayAction { key: i + 1 }))),
        );

        sections.join("\n\n")
    }
}
