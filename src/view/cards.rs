// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stateless card renderers.

use std::borrow::Cow;

use colored::Colorize;
use console::Emoji;

use crate::catalog::PodcastRecord;
use crate::episode::Episode;

static PLAY: Emoji<'_, '_> = Emoji("▶ ", "> ");
static RSS: Emoji<'_, '_> = Emoji("📡 ", "rss ");
static IMAGE: Emoji<'_, '_> = Emoji("🖼  ", "img ");
static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");

/// The play control of an episode card, bound to the key that triggers it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayAction {
    pub key: usize,
}

/// Upstream text carries HTML entities such as `&laquo;`
fn display_text(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

/// Render a catalog entry
pub fn render_podcast_card(info: &PodcastRecord) -> String {
    let mut lines = Vec::new();

    if let Some(title) = &info.title {
        lines.push(display_text(title).as_ref().bold().to_string());
    }
    lines.push(format!("{IMAGE}{}", info.image.dimmed()));
    lines.push(display_text(&info.description).into_owned());
    lines.push(format!(
        "{PLAY}{}  {}",
        "Слушать".green().bold(),
        info.listen_url.cyan()
    ));
    lines.push(format!("{RSS}{}", info.feed.cyan()));

    lines.join("\n")
}

/// Render an episode; `play` adds the play control
pub fn render_episode_card(info: &Episode, play: Option<PlayAction>) -> String {
    let mut lines = Vec::new();

    if !info.published.is_empty() {
        lines.push(format!("{CALENDAR}{}", info.published.italic()));
    }
    lines.push(display_text(&info.anons).as_ref().bold().to_string());
    if !info.description.is_empty() {
        lines.push(display_text(&info.description).into_owned());
    }
    if let Some(action) = play {
        lines.push(format!(
            "[{}] {PLAY}{}",
            action.key.to_string().yellow(),
            "Слушать".green().bold()
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::ProgramId;

    fn podcast() -> PodcastRecord {
        let program = ProgramId::Rubric { id: 1220 };
        PodcastRecord {
            program,
            title: Some("Мастер спорта".to_string()),
            image: "https://example.com/1220.jpg".to_string(),
            description: "О спорте &laquo;без купюр&raquo;".to_string(),
            feed: "https://example.com/feeds/1220.xml".to_string(),
            listen_url: program.listen_url(),
        }
    }

    fn episode() -> Episode {
        Episode {
            id: 42,
            title: "Мастер спорта".to_string(),
            published: "12 марта 2024".to_string(),
            anons: "Выпуск о хоккее".to_string(),
            description: String::new(),
            duration: None,
            player: None,
        }
    }

    #[test]
    fn podcast_card_shows_links_and_decoded_text() {
        let card = render_podcast_card(&podcast());

        assert!(card.contains("Мастер спорта"));
        assert!(card.contains("/listen?rubric_id=1220"));
        assert!(card.contains("https://example.com/feeds/1220.xml"));
        assert!(card.contains("https://example.com/1220.jpg"));
        assert!(card.contains("«без купюр»"));
    }

    #[test]
    fn episode_card_without_action_has_no_control() {
        let card = render_episode_card(&episode(), None);

        assert!(card.contains("12 марта 2024"));
        assert!(card.contains("Выпуск о хоккее"));
        assert!(!card.contains("Слушать"));
    }

    #[test]
    fn episode_card_with_action_shows_key() {
        let card = render_episode_card(&episode(), Some(PlayAction { key: 3 }));

        assert!(card.contains("3"));
        assert!(card.contains("Слушать"));
    }
}
