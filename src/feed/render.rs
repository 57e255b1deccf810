// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use rss::extension::atom::AtomExtension;
use rss::extension::itunes::{ITunesChannelExtension, ITunesItemExtension, ITunesOwner};

use super::model::{
    AtomLink, ChannelImage, ChannelItunes, Episode, EpisodeItunes, Feed, ItunesOwner,
};
use crate::error::RenderError;

const INDENT_CHAR: u8 = b' ';
const INDENT_SIZE: usize = 1;

/// Serialize a feed to an indented XML document, declaration included.
///
/// Absent optional fields produce no element at all. Text and attribute
/// values are XML-escaped by the writer.
pub fn render_feed(feed: &Feed) -> Result<Vec<u8>, RenderError> {
    let channel = to_rss_channel(feed);
    let bytes = channel.pretty_write_to(Vec::new(), INDENT_CHAR, INDENT_SIZE)?;
    Ok(bytes)
}

/// Convert the feed model into the `rss` crate's document tree
pub fn to_rss_channel(feed: &Feed) -> rss::Channel {
    let channel = &feed.channel;
    let mut out = rss::Channel::default();

    let namespaces: BTreeMap<String, String> = feed
        .namespaces()
        .iter()
        .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
        .collect();
    out.set_namespaces(namespaces);

    out.set_title(channel.title.clone());
    out.set_description(channel.description.clone());
    out.set_link(channel.link.to_string());
    out.set_language(channel.language.clone());
    out.set_copyright(channel.copyright.clone());
    out.set_image(channel.image.as_ref().map(to_rss_image));
    out.set_pub_date(channel.pub_date.map(|dt| dt.to_rfc2822()));
    out.set_last_build_date(channel.last_build_date.map(|dt| dt.to_rfc2822()));
    out.set_atom_ext(to_atom_ext(&channel.self_link));
    if !channel.itunes.is_empty() {
        out.set_itunes_ext(to_itunes_channel(&channel.itunes));
    }
    out.set_items(channel.episodes.iter().map(to_rss_item).collect::<Vec<_>>());

    out
}

fn to_rss_image(image: &ChannelImage) -> rss::Image {
    let mut out = rss::Image::default();
    out.set_url(image.url.to_string());
    out.set_title(image.title.clone());
    out.set_link(image.link.to_string());
    out
}

fn to_atom_ext(link: &AtomLink) -> AtomExtension {
    let mut atom_link = atom_syndication::Link::default();
    atom_link.set_href(link.href.to_string());
    atom_link.set_rel(link.rel.clone());
    atom_link.set_mime_type(Some(link.mime_type.clone()));

    let mut ext = AtomExtension::default();
    ext.set_links(vec![atom_link]);
    ext
}

fn to_itunes_channel(itunes: &ChannelItunes) -> ITunesChannelExtension {
    let mut ext = ITunesChannelExtension::default();
    ext.set_subtitle(itunes.subtitle.clone());
    ext.set_author(itunes.author.clone());
    ext.set_summary(itunes.summary.clone());
    ext.set_keywords(itunes.keywords.clone());
    ext.set_explicit(itunes.explicit.map(explicit_value));
    ext.set_owner(
        itunes
            .owner
            .as_ref()
            .filter(|owner| !owner.is_empty())
            .map(to_itunes_owner),
    );
    ext
}

fn to_itunes_owner(owner: &ItunesOwner) -> ITunesOwner {
    let mut out = ITunesOwner::default();
    out.set_name(owner.name.clone());
    out.set_email(owner.email.clone());
    out
}

fn to_rss_item(episode: &Episode) -> rss::Item {
    let mut item = rss::Item::default();
    item.set_title(episode.title.clone());

    let mut guid = rss::Guid::default();
    guid.set_value(episode.guid.clone());
    guid.set_permalink(true);
    item.set_guid(guid);

    item.set_pub_date(episode.pub_date.to_rfc2822());

    let mut enclosure = rss::Enclosure::default();
    enclosure.set_url(episode.enclosure.url.to_string());
    enclosure.set_mime_type(episode.enclosure.mime_type.clone());
    enclosure.set_length(episode.enclosure.length.to_string());
    item.set_enclosure(enclosure);

    if !episode.itunes.is_empty() {
        item.set_itunes_ext(to_itunes_item(&episode.itunes));
    }

    item
}

fn to_itunes_item(itunes: &EpisodeItunes) -> ITunesItemExtension {
    let mut ext = ITunesItemExtension::default();
    ext.set_author(itunes.author.clone());
    ext.set_subtitle(itunes.subtitle.clone());
    ext.set_summary(itunes.summary.clone());
    ext.set_duration(itunes.duration.clone());
    ext.set_explicit(itunes.explicit.map(explicit_value));
    ext.set_order(itunes.order.map(|order| order.to_string()));
    ext.set_closed_captioned(
        itunes
            .closed_captioned
            .map(|cc| if cc { "Yes" } else { "No" }.to_string()),
    );
    ext
}

fn explicit_value(explicit: bool) -> String {
    if explicit { "true" } else { "false" }.to_string()
}
