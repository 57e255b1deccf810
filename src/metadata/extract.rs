// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fs::Metadata;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, SubsecRound, Utc};

use super::tags::TagReader;
use crate::scan::AUDIO_EXTENSION;

/// Title and publish time derived for a single audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeMetadata {
    pub title: String,
    /// Embedded comment, if the file had one
    pub comment: Option<String>,
    pub published: DateTime<Utc>,
}

/// Derive episode metadata for an audio file.
///
/// Embedded tags win when they can be read. Otherwise the title is the file
/// name without its audio extension. The publish time is always the file's
/// modification time. This never fails.
pub fn extract_metadata(path: &Path, info: &Metadata, reader: &dyn TagReader) -> EpisodeMetadata {
    let (title, comment) = match reader.read_tags(path) {
        Ok(tags) => {
            let title = match &tags.comment {
                Some(comment) => format!("{} {}", tags.title, comment),
                None => tags.title.clone(),
            };
            (title, tags.comment)
        }
        Err(e) => {
            tracing::debug!("Falling back to file name for {}: {}", path.display(), e);
            (title_from_file_name(path), None)
        }
    };

    let modified = info.modified().unwrap_or_else(|e| {
        tracing::warn!(
            "No modification time for {}, using the epoch: {}",
            path.display(),
            e
        );
        SystemTime::UNIX_EPOCH
    });

    EpisodeMetadata {
        title,
        comment,
        // pubDate only carries whole seconds
        published: DateTime::<Utc>::from(modified).trunc_subsecs(0),
    }
}

/// Strip the audio extension from a file name
fn title_from_file_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match name.strip_suffix(AUDIO_EXTENSION) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}
