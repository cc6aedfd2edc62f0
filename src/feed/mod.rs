mod api;
mod build;
mod dates;
mod enrich;
mod generate;
mod media;
mod stations;

pub use api::{API_ENDPOINT, episodes_api_url, fetch_raw_episodes};
pub use build::{FeedLocation, GENERATOR_NAME, build_channel, render_channel};
pub use dates::{format_duration, moscow, parse_api_date, parse_duration, today_in_moscow};
pub use enrich::{FeedEpisode, enrich_episodes};
pub use generate::{GenerateOptions, GenerateSummary, generate_all, generate_feed};
pub use media::{probe_media_size, probe_media_sizes, resolve_picture};
pub use stations::{PodcastEntry, Station, StationList, load_stations, parse_stations};
