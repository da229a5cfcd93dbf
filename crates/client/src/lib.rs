// ABOUTME: Main library entry point for the newznab/torznab indexer client.
// ABOUTME: Re-exports the public API: Client, Category, Entry, Error.

//! A client for newznab/torznab-style indexer APIs.
//!
//! The client issues search and RSS queries against one indexer endpoint,
//! decodes the XML feed responses into typed entries describing TV episodes
//! and movies with their downloadable NZB or torrent files, and can walk
//! paginated RSS feeds until a known entry id is reached.
//!
//! # Example
//!
//! ```no_run
//! use torznab_client::{Category, Client, Error};
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::builder(Url::parse("https://indexer.example").unwrap())
//!         .api_key("gibberish")
//!         .api_user_id(1234)
//!         .build();
//!
//!     let entries = client
//!         .search_with_query(&[Category::TV_HD], "Supernatural S11E01", "tvshows")
//!         .await?;
//!     for entry in &entries {
//!         println!("{}", entry.general.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod attributes;
pub mod categories;
pub mod client;
pub mod error;
pub mod models;
pub mod options;
pub mod parser;
pub mod raw;
pub mod time_parse;

pub use crate::attributes::AttrDomain;
pub use crate::categories::{stringify_categories, Category};
pub use crate::client::{Client, ModePath};
pub use crate::error::Error;
pub use crate::models::{
    Comment, Comments, Content, Entry, EntryCategorisation, EntryDates, EntryGeneral, EntryMeta,
    File, Movie, NzbFile, Source, TorrentFile, Tv,
};
pub use crate::options::{ClientBuilder, Options};
pub use crate::parser::parse_entries;
