mod extract;
mod tags;

pub use extract::{EpisodeMetadata, extract_metadata};
pub use tags::{EmbeddedTags, Id3TagReader, NoTagReader, TagReader};
