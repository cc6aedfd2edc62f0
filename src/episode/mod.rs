mod fetch;
mod record;

pub use fetch::{fetch_episodes, parse_episode_list};
pub(crate) use record::null_as_empty;
pub use record::{
    ContentBlock, Episode, EpisodeResponse, Player, Preview, PreviewSource, normalize_announcement,
};
