// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

pub const RSS_VERSION: &str = "2.0";
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
pub const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// MIME type of every enclosure
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// MIME type advertised by the channel's self link
pub const RSS_MIME_TYPE: &str = "application/rss+xml";

/// The root feed document. Always holds exactly one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub channel: Channel,
}

impl Feed {
    pub fn version(&self) -> &'static str {
        RSS_VERSION
    }

    /// Namespace prefixes declared on the root element, whatever the content
    pub fn namespaces(&self) -> [(&'static str, &'static str); 2] {
        [("atom", ATOM_NAMESPACE), ("itunes", ITUNES_NAMESPACE)]
    }
}

/// Channel-level metadata plus the ordered episode list
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub title: String,
    pub description: String,
    pub link: Url,
    pub language: Option<String>,
    pub copyright: Option<String>,
    pub image: Option<ChannelImage>,
    /// Newest first
    pub episodes: Vec<Episode>,
    pub pub_date: Option<DateTime<Utc>>,
    pub last_build_date: Option<DateTime<Utc>>,
    pub self_link: AtomLink,
    pub itunes: ChannelItunes,
}

/// The `<image>` block of a channel
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelImage {
    pub url: Url,
    pub title: String,
    pub link: Url,
}

/// An `<atom:link>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomLink {
    pub href: Url,
    pub rel: String,
    pub mime_type: String,
}

impl AtomLink {
    /// The link a feed uses to point at its own public URL
    pub fn self_link(href: Url) -> Self {
        Self {
            href,
            rel: "self".to_string(),
            mime_type: RSS_MIME_TYPE.to_string(),
        }
    }
}

/// Channel-level iTunes extension fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelItunes {
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub keywords: Option<String>,
    pub explicit: Option<bool>,
    pub owner: Option<ItunesOwner>,
}

impl ChannelItunes {
    pub fn is_empty(&self) -> bool {
        self.subtitle.is_none()
            && self.author.is_none()
            && self.summary.is_none()
            && self.keywords.is_none()
            && self.explicit.is_none()
            && self.owner.as_ref().is_none_or(ItunesOwner::is_empty)
    }
}

/// `<itunes:owner>` contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ItunesOwner {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ItunesOwner {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// One published audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    /// The episode's absolute URL; changes when the file is renamed
    pub guid: String,
    pub pub_date: DateTime<Utc>,
    pub enclosure: Enclosure,
    pub itunes: EpisodeItunes,
}

/// The downloadable media attached to an episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub url: Url,
    pub mime_type: String,
    /// File size in bytes at scan time
    pub length: u64,
}

/// Episode-level iTunes extension fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeItunes {
    pub author: Option<String>,
    pub subtitle: Option<String>,
    pub summary: Option<String>,
    pub duration: Option<String>,
    pub explicit: Option<bool>,
    pub order: Option<u32>,
    pub closed_captioned: Option<bool>,
}

impl EpisodeItunes {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
