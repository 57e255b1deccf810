pub mod config;
pub mod error;
pub mod escape;
pub mod feed;
pub mod metadata;
pub mod pipeline;
pub mod scan;
pub mod server;

// Re-export main types for convenience
pub use config::{ChannelConfig, Config, DEFAULT_CONFIG_FILE, load_config};
pub use error::{ConfigError, FeedError, RenderError, ScanError, ServeError, TagReadError, UrlError};
pub use escape::{episode_url, escape_url};
pub use feed::{Channel, Enclosure, Episode, Feed, assemble_feed, render_feed};
pub use metadata::{EpisodeMetadata, Id3TagReader, NoTagReader, TagReader, extract_metadata};
pub use pipeline::{RenderedFeed, build_feed};
pub use scan::{AUDIO_EXTENSION, build_episode, scan_episodes};
pub use server::{create_router, run_server, serve};
