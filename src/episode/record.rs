// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Deserializer, Serialize};

/// Wrapper object returned for an episode list
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeResponse {
    #[serde(default)]
    pub contents: Vec<ContentBlock>,
}

/// One content block; only the first one of a response is consulted
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub list: Vec<Episode>,
}

/// A single episode as listed upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Display string, e.g. `12 марта 2024` or `14:05`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published: String,
    /// Short announcement, usually the episode's own headline
    #[serde(default, deserialize_with = "null_as_empty")]
    pub anons: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// `H:MM:SS` or `MM:SS`
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub player: Option<Player>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub preview: Preview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub source: PreviewSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSource {
    pub main: String,
}

impl Episode {
    /// URL of the episode's preview image, if upstream supplied one
    pub fn preview_image(&self) -> Option<&str> {
        self.player
            .as_ref()
            .map(|player| player.preview.source.main.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Apply display normalization to the text fields
    pub fn normalized(mut self) -> Self {
        self.anons = normalize_announcement(&self.anons);
        self
    }
}

/// Strip one literal `"` from each end of an announcement.
///
/// Interior quotes and all other characters are left unchanged.
pub fn normalize_announcement(text: &str) -> String {
    let text = text.strip_prefix('"').unwrap_or(text);
    let text = text.strip_suffix('"').unwrap_or(text);
    text.to_string()
}

/// Treat an explicit `null` like a missing string
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
