// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Component, Path};

use url::Url;

use crate::error::UrlError;

/// Parse a raw string as an absolute URL and return its canonical form.
///
/// Parsing percent-encodes characters that are not allowed in the path
/// (spaces, quotes, angle brackets) and rejects strings that are not URLs.
pub fn escape_url(raw: &str) -> Result<Url, UrlError> {
    Url::parse(raw).map_err(|e| UrlError::Malformed {
        raw: raw.to_string(),
        source: e,
    })
}

/// Resolve a root-relative file path against the public base URL.
///
/// Each path component becomes one percent-encoded URL segment, so file
/// names containing `#`, `?` or `%` stay part of the path.
pub fn episode_url(base: &Url, relative: &Path) -> Result<Url, UrlError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| UrlError::CannotBeABase(base.to_string()))?;
        segments.pop_if_empty();
        for component in relative.components() {
            if let Component::Normal(name) = component {
                segments.push(&name.to_string_lossy());
            }
        }
    }
    Ok(url)
}
