// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use url::Url;
use walkdir::WalkDir;

use crate::error::ScanError;
use crate::escape::episode_url;
use crate::feed::{AUDIO_MIME_TYPE, Enclosure, Episode, EpisodeItunes};
use crate::metadata::{EpisodeMetadata, TagReader, extract_metadata};

/// File name suffix of the only audio format that is published (case-sensitive)
pub const AUDIO_EXTENSION: &str = ".mp3";

/// Walk `root` recursively and build an episode for every audio file.
///
/// Entries are visited in file name order, so repeated scans of an unchanged
/// directory yield identical sequences. Any walk, metadata or URL error
/// aborts the whole scan.
pub fn scan_episodes(
    root: &Path,
    base_url: &Url,
    tags: &dyn TagReader,
) -> Result<Vec<Episode>, ScanError> {
    let mut episodes = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| ScanError::WalkFailed {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }
        if !entry.file_name().to_string_lossy().ends_with(AUDIO_EXTENSION) {
            continue;
        }

        let path = entry.path();
        let info = entry.metadata().map_err(|e| ScanError::MetadataFailed {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let relative = path.strip_prefix(root).unwrap_or(path);
        let url = episode_url(base_url, relative).map_err(|e| ScanError::Url {
            path: path.to_path_buf(),
            source: e,
        })?;

        let metadata = extract_metadata(path, &info, tags);
        tracing::debug!("Found episode '{}' at {}", metadata.title, url);

        episodes.push(build_episode(metadata, url, info.len()));
    }

    tracing::info!(
        "Scanned {}: {} episodes",
        root.display(),
        episodes.len()
    );

    Ok(episodes)
}

/// Turn one file's metadata and resolved URL into an episode
pub fn build_episode(metadata: EpisodeMetadata, url: Url, length: u64) -> Episode {
    Episode {
        title: metadata.title,
        guid: url.to_string(),
        pub_date: metadata.published,
        enclosure: Enclosure {
            url,
            mime_type: AUDIO_MIME_TYPE.to_string(),
            length,
        },
        itunes: EpisodeItunes {
            summary: metadata.comment,
            ..Default::default()
        },
    }
}
