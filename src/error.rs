// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid listen address '{address}': {source}")]
    InvalidListenAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Feed path '{0}' must start with '/'")]
    InvalidFeedPath(String),
}

/// Errors that can occur when turning a raw string into a published URL
#[derive(Error, Debug)]
pub enum UrlError {
    #[error("Invalid URL '{raw}': {source}")]
    Malformed {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL '{0}' cannot have a path appended to it")]
    CannotBeABase(String),
}

/// Errors that can occur while walking the media root
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to walk directory {path}: {source}")]
    WalkFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read file metadata for {path}: {source}")]
    MetadataFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build URL for {path}: {source}")]
    Url {
        path: PathBuf,
        #[source]
        source: UrlError,
    },
}

/// Errors from reading embedded audio tags.
///
/// These never escape the metadata extractor; they only decide whether the
/// filename fallback is used.
#[derive(Error, Debug)]
pub enum TagReadError {
    #[error("Failed to read tags from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("No title tag in {0}")]
    MissingTitle(PathBuf),

    #[error("Tag reading is disabled")]
    Disabled,
}

/// Errors that can occur when writing the feed document
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write RSS document: {0}")]
    WriteFailed(#[from] rss::Error),
}

/// Top-level errors for a single feed build
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Errors from answering a feed request over HTTP
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Feed build failed: {0}")]
    Feed(#[from] FeedError),

    #[error("Feed build task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
