// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feed configuration loaded from a TOML file.
//!
//! ```toml
//! listen = "0.0.0.0:8080"
//! feed_path = "/feed.xml"
//!
//! [channel]
//! title = "My Podcast"
//! description = "Episodes from the attic"
//! url = "https://example.com/"
//! feed_url = "https://example.com/feed.xml"
//! file_root = "/srv/podcast"
//!
//! [channel.itunes]
//! author = "Jane"
//! ```
//!
//! Unknown keys are rejected.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;
use crate::feed::{ChannelImage, ChannelItunes};

/// Default file name looked up when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Complete settings for one feed
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Address the server binds to
    #[serde(default = "default_listen")]
    pub listen: String,
    /// URL path the feed document is served under
    #[serde(default = "default_feed_path")]
    pub feed_path: String,
    /// Read ID3 tags for titles; when off, titles always come from file names
    #[serde(default = "default_read_tags")]
    pub read_tags: bool,
    pub channel: ChannelConfig,
}

/// Channel metadata and the directory whose files become episodes
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    pub title: String,
    pub description: String,
    /// Site URL; also the base that episode paths are resolved against
    pub url: Url,
    /// Public URL of the feed itself
    pub feed_url: Url,
    pub file_root: PathBuf,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub image: Option<ChannelImage>,
    #[serde(default)]
    pub itunes: ChannelItunes,
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_feed_path() -> String {
    "/feed.xml".to_string()
}

fn default_read_tags() -> bool {
    true
}

impl Config {
    /// Parse and validate a config from TOML text
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// The parsed listen address
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen
            .parse()
            .map_err(|e| ConfigError::InvalidListenAddress {
                address: self.listen.clone(),
                source: e,
            })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.feed_path.starts_with('/') {
            return Err(ConfigError::InvalidFeedPath(self.feed_path.clone()));
        }
        self.listen_addr()?;
        Ok(())
    }
}

/// Read and validate a config file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    Config::from_toml(&content, path)
}
