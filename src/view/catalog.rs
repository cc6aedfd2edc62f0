// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use colored::Colorize;
use tracing::{debug, warn};

use crate::catalog::{PodcastRecord, fetch_catalog};
use crate::error::CatalogError;
use crate::http::HttpClient;
use crate::source::DataSource;

use super::cards::render_podcast_card;
use super::{FetchTicket, Generation, LoadStatus};

/// Shown whenever the catalog holds no podcasts
pub const CATALOG_EMPTY: &str = "No data";

const HEADING: &str = "Подкасты Вести ФМ";

/// The podcast list
#[derive(Debug, Default)]
pub struct CatalogView {
    podcasts: Vec<PodcastRecord>,
    status: LoadStatus,
    generation: Generation,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh load. The collection is emptied until a response lands.
    pub fn activate(&mut self) -> FetchTicket {
        self.podcasts.clear();
        self.status = LoadStatus::Loading;
        self.generation.advance()
    }

    /// Leave the view; any outstanding response will be discarded
    pub fn deactivate(&mut self) {
        self.generation.advance();
        self.podcasts.clear();
        self.status = LoadStatus::Idle;
    }

    /// Apply a fetch result. Returns false if the ticket is stale.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<PodcastRecord>, CatalogError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            debug!("discarding stale catalog response");
            return false;
        }

        match result {
            Ok(podcasts) => {
                self.podcasts = podcasts;
                self.status = LoadStatus::Loaded;
            }
            Err(e) => {
                warn!("failed to load catalog: {e}");
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
        let ticket = self.activate();
        let result = fetch_catalog(client, source).await;
        self.apply(ticket, result);
        self.status
    }

    pub fn podcasts(&self) -> &[PodcastRecord] {
        &self.podcasts
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn render(&self) -> String {
        if self.podcasts.is_empty() {
            return CATALOG_EMPTY.to_string();
        }

        let mut sections = vec![
            "Главная".dimmed().to_string(),
            HEADING.bold().to_string(),
        ];
        sections.extend(self.podcasts.iter().map(render_podcast_card));

        sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::ProgramId;
    use crate::testing::MockHttpClient;

    const CATALOG_URL: &str = "https://example.com/data/podcasts.json";

    const CATALOG: &str = r#"[
        {"brand_id": 5, "image": "https://example.com/5.jpg", "description": "Пять", "feed": "https://example.com/5.xml"},
        {"rubric_id": 7, "image": "https://example.com/7.jpg", "description": "Семь", "feed": "https://example.com/7.xml"}
    ]"#;

    fn source() -> DataSource {
        DataSource::parse("https://example.com/data/").unwrap()
    }

    fn record(id: u64) -> PodcastRecord {
        let program = ProgramId::Brand { id };
        PodcastRecord {
            program,
            title: None,
            image: String::new(),
            description: String::new(),
            feed: String::new(),
            listen_url: program.listen_url(),
        }
    }

    #[tokio::test]
    async fn empty_catalog_renders_empty_state() {
        let client = MockHttpClient::new().with_body(CATALOG_URL, "[]");
        let mut view = CatalogView::new();

        let status = view.load(&client, &source()).await;

        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(view.render(), CATALOG_EMPTY);
    }

    #[tokio::test]
    async fn loaded_catalog_renders_one_card_per_podcast() {
        let client = MockHttpClient::new().with_body(CATALOG_URL, CATALOG);
        let mut view = CatalogView::new();

        view.load(&client, &source()).await;
        let rendered = view.render();

        assert_eq!(view.podcasts().len(), 2);
        assert!(rendered.contains("/listen?brand_id=5"));
        assert!(rendered.contains("/listen?rubric_id=7"));
        assert!(!rendered.contains(CATALOG_EMPTY));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_view_empty() {
        let client = MockHttpClient::new().with_status(CATALOG_URL, 503);
        let mut view = CatalogView::new();

        let status = view.load(&client, &source()).await;

        assert_eq!(status, LoadStatus::Failed);
        assert!(view.podcasts().is_empty());
        assert_eq!(view.render(), CATALOG_EMPTY);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut view = CatalogView::new();

        let stale = view.activate();
        let fresh = view.activate();

        assert!(!view.apply(stale, Ok(vec![record(1)])));
        assert!(view.podcasts().is_empty());

        assert!(view.apply(fresh, Ok(vec![record(2)])));
        assert_eq!(view.podcasts()[0].program, ProgramId::Brand { id: 2 });
    }

    #[test]
    fn response_after_deactivate_is_discarded() {
        let mut view = CatalogView::new();

        let ticket = view.activate();
        view.deactivate();

        assert!(!view.apply(ticket, Ok(vec![record(1)])));
        assert!(view.podcasts().is_empty());
        assert_eq!(view.status(), LoadStatus::Idle);
    }
}
