use thiserror::Error;

/// A feed record that cannot be turned into a catalog write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    #[error("missing episode_id")]
    MissingEpisodeId,

    #[error("episode_id is not an integer: {0}")]
    InvalidEpisodeId(String),

    #[error("missing or empty title")]
    MissingTitle,

    #[error("unparseable release_date: {0}")]
    InvalidReleaseDate(String),

    #[error("invalid field: {0}")]
    InvalidField(String),
}
