// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use id3::TagLike;

use crate::error::TagReadError;

/// Comment descriptions iTunes uses for encoder data (`iTunNORM`, `iTunSMPB`, ...)
const ITUNES_COMMENT_PREFIX: &str = "iTun";

/// Title and comment read from an audio file's embedded tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedTags {
    pub title: String,
    pub comment: Option<String>,
}

/// Tag reading abstraction for testability
pub trait TagReader: Send + Sync {
    /// Read the embedded title and the plain comment of a file
    fn read_tags(&self, path: &Path) -> Result<EmbeddedTags, TagReadError>;
}

/// Default tag reader backed by the `id3` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct Id3TagReader;

impl TagReader for Id3TagReader {
    fn read_tags(&self, path: &Path) -> Result<EmbeddedTags, TagReadError> {
        let tag = id3::Tag::read_from_path(path).map_err(|e| TagReadError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let title = tag
            .title()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TagReadError::MissingTitle(path.to_path_buf()))?
            .to_string();

        let comment = tag
            .comments()
            .filter(|c| !c.description.starts_with(ITUNES_COMMENT_PREFIX))
            .filter(|c| !c.text.trim().is_empty())
            .min_by_key(|c| !c.description.is_empty())
            .map(|c| c.text.trim().to_string());

        Ok(EmbeddedTags { title, comment })
    }
}

/// A tag reader that never finds tags, forcing the filename fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTagReader;

impl TagReader for NoTagReader {
    fn read_tags(&self, _path: &Path) -> Result<EmbeddedTags, TagReadError> {
        Err(TagReadError::Disabled)
    }
}
