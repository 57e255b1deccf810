// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};

use super::model::{AtomLink, Channel, ChannelItunes, Episode, Feed, ItunesOwner};
use crate::config::ChannelConfig;

/// Build the feed document from channel settings and scanned episodes.
///
/// Episodes are ordered newest first; equal publish times keep their input
/// order. The channel's `pubDate` is the newest episode's time and
/// `lastBuildDate` is `built_at` when given.
pub fn assemble_feed(
    config: &ChannelConfig,
    mut episodes: Vec<Episode>,
    built_at: Option<DateTime<Utc>>,
) -> Feed {
    // Compare at the second precision pubDate is written with; sort_by is stable
    episodes.sort_by(|a, b| b.pub_date.timestamp().cmp(&a.pub_date.timestamp()));

    let pub_date = episodes.first().map(|ep| ep.pub_date);

    Feed {
        channel: Channel {
            title: config.title.clone(),
            description: config.description.clone(),
            link: config.url.clone(),
            language: non_empty(&config.language),
            copyright: non_empty(&config.copyright),
            image: config
                .image
                .clone()
                .filter(|image| !image.title.trim().is_empty()),
            episodes,
            pub_date,
            last_build_date: built_at,
            self_link: AtomLink::self_link(config.feed_url.clone()),
            itunes: normalize_itunes(&config.itunes),
        },
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.trim().is_empty())
}

/// Treat blank strings from the config as absent
fn normalize_itunes(itunes: &ChannelItunes) -> ChannelItunes {
    let owner = itunes
        .owner
        .as_ref()
        .map(|owner| ItunesOwner {
            name: non_empty(&owner.name),
            email: non_empty(&owner.email),
        })
        .filter(|owner| !owner.is_empty());

    ChannelItunes {
        subtitle: non_empty(&itunes.subtitle),
        author: non_empty(&itunes.author),
        summary: non_empty(&itunes.summary),
        keywords: non_empty(&itunes.keywords),
        explicit: itunes.explicit,
        owner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::model::{ChannelImage, Enclosure, EpisodeItunes};
    use chrono::TimeZone;
    use std::path::PathBuf;
    use url::Url;

    fn config() -> ChannelConfig {
        ChannelConfig {
            title: "Attic Tapes".to_string(),
            description: "Old recordings".to_string(),
            url: Url::parse("https://example.com/").unwrap(),
            feed_url: Url::parse("https://example.com/feed.xml").unwrap(),
            file_root: PathBuf::from("/srv/podcast"),
            language: None,
            copyright: None,
            image: None,
            itunes: ChannelItunes::default(),
        }
    }

    fn episode(title: &str, secs: i64) -> Episode {
        let url = Url::parse(&format!("https://example.com/{title}.mp3")).unwrap();
        Episode {
            title: title.to_string(),
            guid: url.to_string(),
            pub_date: Utc.timestamp_opt(secs, 0).unwrap(),
            enclosure: Enclosure {
                url,
                mime_type: "audio/mpeg".to_string(),
                length: 1,
            },
            itunes: EpisodeItunes::default(),
        }
    }

    fn titles(feed: &Feed) -> Vec<&str> {
        feed.channel
            .episodes
            .iter()
            .map(|e| e.title.as_str())
            .collect()
    }

    #[test]
    fn channel_links_come_from_config() {
        let feed = assemble_feed(&config(), vec![], None);

        assert_eq!(feed.version(), "2.0");
        assert_eq!(feed.channel.title, "Attic Tapes");
        assert_eq!(feed.channel.link.as_str(), "https://example.com/");
        assert_eq!(
            feed.channel.self_link.href.as_str(),
            "https://example.com/feed.xml"
        );
        assert_eq!(feed.channel.self_link.rel, "self");
        assert_eq!(feed.channel.self_link.mime_type, "application/rss+xml");
        assert!(feed.channel.pub_date.is_none());
        assert!(feed.channel.last_build_date.is_none());
    }

    #[test]
    fn episodes_are_sorted_newest_first() {
        let episodes = vec![episode("old", 100), episode("new", 300), episode("mid", 200)];

        let feed = assemble_feed(&config(), episodes, None);

        assert_eq!(titles(&feed), vec!["new", "mid", "old"]);
        assert_eq!(feed.channel.pub_date, Some(Utc.timestamp_opt(300, 0).unwrap()));
    }

    #[test]
    fn equal_timestamps_keep_scan_order() {
        let episodes = vec![
            episode("first", 100),
            episode("newest", 200),
            episode("second", 100),
            episode("third", 100),
        ];

        let feed = assemble_feed(&config(), episodes, None);

        assert_eq!(titles(&feed), vec!["newest", "first", "second", "third"]);
    }

    #[test]
    fn sub_second_differences_do_not_reorder() {
        let mut earlier = episode("a", 0);
        earlier.pub_date = Utc.timestamp_opt(1_700_000_000, 100_000_000).unwrap();
        let mut later = episode("b", 0);
        later.pub_date = Utc.timestamp_opt(1_700_000_000, 900_000_000).unwrap();

        let feed = assemble_feed(&config(), vec![earlier, later], None);

        assert_eq!(titles(&feed), vec!["a", "b"]);
    }

    #[test]
    fn image_without_title_is_dropped() {
        let mut config = config();
        config.image = Some(ChannelImage {
            url: Url::parse("https://example.com/cover.jpg").unwrap(),
            title: " ".to_string(),
            link: Url::parse("https://example.com/").unwrap(),
        });

        let feed = assemble_feed(&config, vec![], None);
        assert!(feed.channel.image.is_none());

        config.image.as_mut().unwrap().title = "Cover".to_string();
        let feed = assemble_feed(&config, vec![], None);
        assert_eq!(feed.channel.image.unwrap().title, "Cover");
    }

    #[test]
    fn duplicate_guids_are_kept() {
        let episodes = vec![episode("same", 1), episode("same", 1)];
        let feed = assemble_feed(&config(), episodes, None);
        assert_eq!(feed.channel.episodes.len(), 2);
    }

    #[test]
    fn blank_optional_strings_become_absent() {
        let mut config = config();
        config.language = Some("  ".to_string());
        config.copyright = Some("CC0".to_string());
        config.itunes.owner = Some(ItunesOwner {
            name: Some(String::new()),
            email: None,
        });

        let feed = assemble_feed(&config, vec![], None);

        assert!(feed.channel.language.is_none());
        assert_eq!(feed.channel.copyright.as_deref(), Some("CC0"));
        assert!(feed.channel.itunes.owner.is_none());
        assert!(feed.channel.itunes.is_empty());
    }

    #[test]
    fn build_time_is_recorded() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let feed = assemble_feed(&config(), vec![], Some(now));
        assert_eq!(feed.channel.last_build_date, Some(now));
    }
}
