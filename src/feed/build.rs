// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use rss::extension::itunes::{
    ITunesCategoryBuilder, ITunesChannelExtensionBuilder, ITunesItemExtensionBuilder,
    ITunesOwnerBuilder,
};
use rss::extension::{Extension, ExtensionBuilder, ExtensionMap};
use rss::{Channel, ChannelBuilder, EnclosureBuilder, GuidBuilder, Item, ItemBuilder};

use super::dates::format_duration;
use super::enrich::FeedEpisode;
use super::stations::{PodcastEntry, Station};

pub const GENERATOR_NAME: &str = "smotrim.ru podcast generator v0.3";

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const PODCAST_NS: &str = "https://podcastindex.org/namespace/1.0";

const OWNER_NAME: &str = "Sergey";
const OWNER_EMAIL: &str = "me@coyotle.ru";
const FUNDING_URL: &str = "https://pay.cloudtips.ru/p/a368e9f8";
const FUNDING_TEXT: &str = "Поддержите обновление подкаста";

/// Where the feed will be served from, for the `atom:link rel="self"`
#[derive(Debug, Clone)]
pub struct FeedLocation {
    pub self_url: String,
}

fn extension(name: &str, value: Option<&str>, attrs: &[(&str, &str)]) -> Extension {
    ExtensionBuilder::default()
        .name(name.to_string())
        .value(value.map(String::from))
        .attrs(
            attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        )
        .build()
}

fn channel_extensions(location: &FeedLocation) -> ExtensionMap {
    let mut extensions = ExtensionMap::new();

    let atom_link = extension(
        "atom:link",
        None,
        &[
            ("href", location.self_url.as_str()),
            ("rel", "self"),
            ("type", "application/rss+xml"),
        ],
    );
    extensions
        .entry("atom".to_string())
        .or_default()
        .insert("link".to_string(), vec![atom_link]);

    let podcast = extensions.entry("podcast".to_string()).or_default();
    podcast.insert(
        "locked".to_string(),
        vec![extension("podcast:locked", Some("no"), &[])],
    );
    podcast.insert(
        "funding".to_string(),
        vec![extension(
            "podcast:funding",
            Some(FUNDING_TEXT),
            &[("url", FUNDING_URL)],
        )],
    );

    extensions
}

fn build_item(episode: &FeedEpisode) -> Item {
    let enclosure = EnclosureBuilder::default()
        .url(episode.media_url.to_string())
        .length(episode.media_size.to_string())
        .mime_type("audio/mpeg".to_string())
        .build();

    let guid = GuidBuilder::default()
        .value(episode.id.to_string())
        .permalink(false)
        .build();

    let itunes = ITunesItemExtensionBuilder::default()
        .duration(Some(format_duration(episode.duration)))
        .image(episode.picture_url.clone())
        .build();

    ItemBuilder::default()
        .title(Some(episode.title.clone()))
        .description(Some(episode.description.clone()))
        .guid(Some(guid))
        .pub_date(Some(episode.published.to_rfc2822()))
        .enclosure(Some(enclosure))
        .itunes_ext(Some(itunes))
        .build()
}

/// Assemble the RSS channel of one podcast
pub fn build_channel(
    station: &Station,
    podcast: &PodcastEntry,
    location: &FeedLocation,
    episodes: &[FeedEpisode],
) -> Channel {
    let mut category = ITunesCategoryBuilder::default();
    category.text(podcast.category.clone());
    if let Some(sub_category) = &podcast.sub_category {
        let sub = ITunesCategoryBuilder::default()
            .text(sub_category.clone())
            .build();
        category.subcategory(Some(Box::new(sub)));
    }

    let owner = ITunesOwnerBuilder::default()
        .name(Some(OWNER_NAME.to_string()))
        .email(Some(OWNER_EMAIL.to_string()))
        .build();

    let itunes = ITunesChannelExtensionBuilder::default()
        .author(Some(station.name.clone()))
        .explicit(Some("false".to_string()))
        .owner(Some(owner))
        .image(Some(podcast.image.to_string()))
        .categories(vec![category.build()])
        .build();

    let namespaces = BTreeMap::from([
        ("atom".to_string(), ATOM_NS.to_string()),
        ("podcast".to_string(), PODCAST_NS.to_string()),
    ]);

    ChannelBuilder::default()
        .title(podcast.title.clone())
        .link(podcast.website.to_string())
        .description(podcast.description.clone())
        .language(Some("ru-RU".to_string()))
        .generator(Some(GENERATOR_NAME.to_string()))
        .namespaces(namespaces)
        .extensions(channel_extensions(location))
        .itunes_ext(Some(itunes))
        .items(episodes.iter().map(build_item).collect::<Vec<_>>())
        .build()
}

/// Serialize a channel to RSS XML
pub fn render_channel(channel: &Channel) -> Result<Vec<u8>, rss::Error> {
    channel.write_to(Vec::new())
}
