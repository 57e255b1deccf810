mod assemble;
mod model;
mod render;

pub use assemble::assemble_feed;
pub use model::{
    ATOM_NAMESPACE, AUDIO_MIME_TYPE, AtomLink, Channel, ChannelImage, ChannelItunes, Enclosure,
    Episode, EpisodeItunes, Feed, ITUNES_NAMESPACE, ItunesOwner, RSS_MIME_TYPE, RSS_VERSION,
};
pub use render::{render_feed, to_rss_channel};
