// ABOUTME: Typed model for decoded indexer feed entries.
// ABOUTME: An Entry couples identity metadata with content and file variants.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::Error;

/// Where an entry was retrieved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Base endpoint of the indexer the entry was retrieved from.
    pub endpoint: Url,
    /// API key used to access that indexer.
    pub api_key: String,
}

/// Published and usenet timestamps for an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDates {
    pub published: Option<DateTime<FixedOffset>>,
    pub usenet: Option<DateTime<FixedOffset>>,
}

/// Comments on an entry: the advertised count plus any fetched comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comments {
    pub number: u64,
    pub comments: Vec<Comment>,
}

/// An individual comment on an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub title: String,
    pub content: String,
    pub published: Option<DateTime<FixedOffset>>,
}

/// Information about an entry itself, rather than the content it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMeta {
    /// The entry's GUID on the indexer.
    pub id: Uuid,
    pub dates: EntryDates,
    pub source: Source,
    pub comments: Comments,
    /// Number of times the entry has been grabbed.
    pub grabs: u64,
}

/// Categorisation attached to an entry: category codes, info, and genre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCategorisation {
    /// Category codes in order of appearance; duplicates are kept.
    pub category: Vec<String>,
    pub info: String,
    pub genre: String,
}

/// General information for an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryGeneral {
    pub title: String,
    pub description: String,
    pub categorisation: EntryCategorisation,
}

/// An episode of a TV series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tv {
    pub air_date: Option<DateTime<FixedOffset>>,
    pub tvdb_id: i64,
    pub tvrage_id: i64,
    pub season: u32,
    pub episode: u32,
    pub canonical_title: String,
    pub rating: f64,
}

/// A movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub air_date: Option<DateTime<FixedOffset>>,
    pub imdb_id: i64,
    pub imdb_title: String,
    /// Release year, carried as a date at January 1 of that year.
    pub imdb_year: Option<DateTime<FixedOffset>>,
    pub imdb_score: f64,
    pub cover: Option<Url>,
}

/// The content an entry describes. Resolved at most once per entry; the
/// kind never changes after the first content attribute arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Content {
    Tv(Tv),
    Movie(Movie),
}

impl Content {
    /// Canonical title of the content.
    pub fn title(&self) -> &str {
        match self {
            Content::Tv(tv) => &tv.canonical_title,
            Content::Movie(movie) => &movie.imdb_title,
        }
    }

    /// Air date of the content, when known.
    pub fn aired(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Content::Tv(tv) => tv.air_date,
            Content::Movie(movie) => movie.air_date,
        }
    }

    /// Sets the air date of the content.
    pub fn set_aired(&mut self, date: DateTime<FixedOffset>) {
        match self {
            Content::Tv(tv) => tv.air_date = Some(date),
            Content::Movie(movie) => movie.air_date = Some(date),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Content::Tv(_) => "a TV episode",
            Content::Movie(_) => "a movie",
        }
    }
}

/// A downloadable torrent file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentFile {
    /// Size of the torrent contents in bytes.
    pub contents_size: u64,
    pub seeders: u64,
    pub peers: u64,
    /// Raw bytes of the torrent info hash.
    pub info_hash: Vec<u8>,
    /// Bytes of the raw torrent file once downloaded.
    pub raw: Vec<u8>,
    pub download_url: Option<Url>,
}

/// A reference to a downloadable NZB document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NzbFile {
    /// The parsed NZB document, present once populated.
    pub document: Option<torznab_nzb::Nzb>,
    pub download_url: Option<Url>,
}

/// The downloadable file an entry points to. Resolved at most once per
/// entry; the kind never changes after the first file attribute arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum File {
    Nzb(NzbFile),
    Torrent(TorrentFile),
}

impl File {
    /// Size in bytes of the file contents, when known.
    pub fn size(&self) -> u64 {
        match self {
            File::Nzb(nzb) => nzb.document.as_ref().map(|d| d.size()).unwrap_or(0),
            File::Torrent(torrent) => torrent.contents_size,
        }
    }

    /// URL the raw file may be downloaded from.
    pub fn url(&self) -> Option<&Url> {
        match self {
            File::Nzb(nzb) => nzb.download_url.as_ref(),
            File::Torrent(torrent) => torrent.download_url.as_ref(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            File::Nzb(_) => "an NZB reference",
            File::Torrent(_) => "a torrent",
        }
    }
}

/// One decoded feed entry from an indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub meta: EntryMeta,
    pub general: EntryGeneral,
    pub content: Option<Content>,
    pub file: Option<File>,
}

impl Entry {
    /// Creates an empty entry attributed to the given source.
    pub fn new(source: Source) -> Self {
        Entry {
            meta: EntryMeta {
                id: Uuid::nil(),
                dates: EntryDates::default(),
                source,
                comments: Comments::default(),
                grabs: 0,
            },
            general: EntryGeneral::default(),
            content: None,
            file: None,
        }
    }

    /// Returns the TV variant of the content, resolving unset content to TV.
    /// Errors when the content already resolved to another kind; `attribute`
    /// names the offending attribute in that error.
    pub(crate) fn tv_mut(&mut self, attribute: &str) -> Result<&mut Tv, Error> {
        match self
            .content
            .get_or_insert_with(|| Content::Tv(Tv::default()))
        {
            Content::Tv(tv) => Ok(tv),
            other => Err(Error::ContentKindConflict {
                attribute: attribute.to_string(),
                existing: other.kind(),
            }),
        }
    }

    /// Returns the movie variant of the content, resolving unset content to
    /// movie. Errors when the content already resolved to another kind.
    pub(crate) fn movie_mut(&mut self, attribute: &str) -> Result<&mut Movie, Error> {
        match self
            .content
            .get_or_insert_with(|| Content::Movie(Movie::default()))
        {
            Content::Movie(movie) => Ok(movie),
            other => Err(Error::ContentKindConflict {
                attribute: attribute.to_string(),
                existing: other.kind(),
            }),
        }
    }

    /// Returns the torrent variant of the file, resolving an unset file to a
    /// torrent. Errors when the file already resolved to another kind.
    pub(crate) fn torrent_mut(&mut self, attribute: &str) -> Result<&mut TorrentFile, Error> {
        match self
            .file
            .get_or_insert_with(|| File::Torrent(TorrentFile::default()))
        {
            File::Torrent(torrent) => Ok(torrent),
            other => Err(Error::FileKindConflict {
                attribute: attribute.to_string(),
                existing: other.kind(),
            }),
        }
    }
}
