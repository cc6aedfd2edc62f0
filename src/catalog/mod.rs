mod fetch;
mod record;

pub use fetch::{CATALOG_RESOURCE, fetch_catalog, parse_catalog};
pub use record::{PodcastRecord, RawPodcast, enrich_catalog};
