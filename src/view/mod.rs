// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod cards;
mod catalog;
mod listen;

pub use cards::{PlayAction, render_episode_card, render_podcast_card};
pub use catalog::{CATALOG_EMPTY, CatalogView};
pub use listen::{EPISODES_EMPTY, EpisodeView};

/// Proof that a fetch was started by a particular view activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Counter that invalidates outstanding fetches.
///
/// Each activation takes a new ticket; a response is only applied while its
/// ticket is still the latest one.
#[derive(Debug, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    /// Invalidate all earlier tickets and hand out a new one
    pub fn advance(&mut self) -> FetchTicket {
        self.current += 1;
        FetchTicket(self.current)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.current
    }
}

/// Diagnostic state of a view's data.
///
/// Rendering does not distinguish these: any empty collection shows the
/// view's empty-state message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet, or nothing to request
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}
