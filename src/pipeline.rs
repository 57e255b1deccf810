// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::FeedError;
use crate::feed::{assemble_feed, render_feed};
use crate::metadata::{Id3TagReader, NoTagReader, TagReader};
use crate::scan::scan_episodes;

/// A serialized feed together with what HTTP callers need to describe it
#[derive(Debug, Clone)]
pub struct RenderedFeed {
    /// The XML document
    pub body: Vec<u8>,
    /// Publish time of the newest episode, if there is one
    pub last_modified: Option<DateTime<Utc>>,
    pub episode_count: usize,
}

/// Scan the configured root, assemble the feed and serialize it.
///
/// Every call performs a full rescan. Any error aborts the whole build, so
/// a partial feed is never produced.
pub fn build_feed(
    config: &Config,
    built_at: Option<DateTime<Utc>>,
) -> Result<RenderedFeed, FeedError> {
    let channel = &config.channel;
    let tags: &dyn TagReader = if config.read_tags {
        &Id3TagReader
    } else {
        &NoTagReader
    };

    let episodes = scan_episodes(&channel.file_root, &channel.url, tags)?;
    let feed = assemble_feed(channel, episodes, built_at);
    let body = render_feed(&feed)?;

    Ok(RenderedFeed {
        body,
        last_modified: feed.channel.pub_date,
        episode_count: feed.channel.episodes.len(),
    })
}
