// ABOUTME: Error types for indexer API operations.
// ABOUTME: Covers transport, API-reported, structural, and attribute-level failures.

use thiserror::Error;

/// Errors that can occur while querying an indexer or decoding its feeds.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request itself failed.
    #[error("error performing GET request on {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response envelope carried an indexer-reported error code.
    #[error("response body contained error {code}: {description}")]
    Api { code: i32, description: String },

    /// The response body could not be decoded into the feed envelope shape.
    #[error("error decoding feed: {0}")]
    Feed(String),

    /// A recognised attribute's value failed to parse.
    #[error("error parsing attribute {name} with value {value:?}")]
    Attribute {
        name: String,
        value: String,
        #[source]
        source: anyhow::Error,
    },

    /// A TV-only attribute arrived after the content resolved to movie, or
    /// vice versa.
    #[error("encountered {attribute} attribute but entry content is already {existing}")]
    ContentKindConflict {
        attribute: String,
        existing: &'static str,
    },

    /// A torrent-only attribute arrived after the file resolved to another
    /// kind.
    #[error("encountered {attribute} attribute but entry file is already {existing}")]
    FileKindConflict {
        attribute: String,
        existing: &'static str,
    },

    /// A file population was requested for a torrent without a download URL.
    #[error("torrent file has no download URL")]
    MissingDownloadUrl,

    /// A downloaded NZB document failed to parse.
    #[error("error parsing NZB document")]
    Nzb(#[from] torznab_nzb::NzbError),
}

impl Error {
    /// Creates a Transport error for the given URL.
    pub(crate) fn transport(url: &url::Url, source: reqwest::Error) -> Self {
        Error::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// Creates an attribute-level error carrying the raw name/value pair and
    /// the underlying cause.
    pub(crate) fn attribute(
        name: &str,
        value: &str,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Error::Attribute {
            name: name.to_string(),
            value: value.to_string(),
            source: source.into(),
        }
    }
}
