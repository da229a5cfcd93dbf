// ABOUTME: The indexer API client: searches, RSS walking, and downloads.
// ABOUTME: Wraps one HTTP endpoint with key/user-id query authentication.

use url::Url;
use uuid::Uuid;

use crate::categories::{stringify_categories, Category};
use crate::error::Error;
use crate::models::{Comment, Entry, File, NzbFile, Source};
use crate::options::{ClientBuilder, Options};
use crate::parser::parse_entries;
use crate::raw::parse_raw_feed;
use crate::time_parse::parse_rfc1123z;

/// Path appended to the base URL to select the API or RSS surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModePath {
    Api,
    Rss,
}

impl ModePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModePath::Api => "/api",
            ModePath::Rss => "/rss",
        }
    }
}

/// A client for one newznab/torznab indexer endpoint.
pub struct Client {
    opts: Options,
    http: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for the given indexer endpoint.
    pub fn builder(base_url: Url) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http }
    }

    /// The base endpoint this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.opts.base_url
    }

    /// Performs an arbitrary API query and decodes the entries the indexer
    /// responded with. The API key is always added.
    pub async fn search(&self, params: &[(&str, String)]) -> Result<Vec<Entry>, Error> {
        let mut params = params.to_vec();
        params.push(("apikey", self.opts.api_key.clone()));
        self.entries_from_url(self.build_url(ModePath::Api, &params))
            .await
    }

    /// Searches TV entries by TVRage id.
    pub async fn search_with_tvrage(
        &self,
        categories: &[Category],
        tvrage_id: i64,
        season: u32,
        episode: u32,
    ) -> Result<Vec<Entry>, Error> {
        self.search(&[
            ("rid", tvrage_id.to_string()),
            ("cat", stringify_categories(categories)),
            ("season", season.to_string()),
            ("episode", episode.to_string()),
            ("t", "tvsearch".to_string()),
        ])
        .await
    }

    /// Searches TV entries by TheTVDB id.
    pub async fn search_with_tvdb(
        &self,
        categories: &[Category],
        tvdb_id: i64,
        season: u32,
        episode: u32,
    ) -> Result<Vec<Entry>, Error> {
        self.search(&[
            ("tvdbid", tvdb_id.to_string()),
            ("cat", stringify_categories(categories)),
            ("season", season.to_string()),
            ("episode", episode.to_string()),
            ("t", "tvsearch".to_string()),
        ])
        .await
    }

    /// Searches movie entries by IMDB id.
    pub async fn search_with_imdb(
        &self,
        categories: &[Category],
        imdb_id: &str,
    ) -> Result<Vec<Entry>, Error> {
        self.search(&[
            ("imdbid", imdb_id.to_string()),
            ("cat", stringify_categories(categories)),
            ("t", "movie".to_string()),
        ])
        .await
    }

    /// Searches entries with a free-text query.
    pub async fn search_with_query(
        &self,
        categories: &[Category],
        query: &str,
        search_type: &str,
    ) -> Result<Vec<Entry>, Error> {
        self.search(&[
            ("q", query.to_string()),
            ("cat", stringify_categories(categories)),
            ("t", search_type.to_string()),
        ])
        .await
    }

    /// Performs an arbitrary RSS query and decodes the entries the indexer
    /// responded with. The API key and user id are always added.
    pub async fn search_rss(&self, params: &[(&str, String)]) -> Result<Vec<Entry>, Error> {
        let mut params = params.to_vec();
        params.push(("r", self.opts.api_key.clone()));
        params.push(("i", self.opts.api_user_id.to_string()));
        self.entries_from_url(self.build_url(ModePath::Rss, &params))
            .await
    }

    /// Returns up to `num` of the most recent entries in the given
    /// categories.
    pub async fn search_recent(
        &self,
        categories: &[Category],
        num: usize,
    ) -> Result<Vec<Entry>, Error> {
        self.search_rss(&[
            ("num", num.to_string()),
            ("t", stringify_categories(categories)),
            ("dl", "1".to_string()),
        ])
        .await
    }

    /// Fetches the RSS feed in pages of `num` entries until the entry with
    /// the given id is seen, and returns everything that precedes it.
    ///
    /// A nil `target` means no target: pages accumulate until the request
    /// budget runs out. `max_requests` of zero means no budget, so a walk
    /// with a nil target and no budget only ends when a page fails to
    /// fetch or decode. Pages are fetched one at a time, in order.
    pub async fn search_rss_until(
        &self,
        categories: &[Category],
        num: usize,
        target: Uuid,
        max_requests: usize,
    ) -> Result<Vec<Entry>, Error> {
        let mut entries = Vec::new();
        let mut requests = 0usize;

        loop {
            let page = self
                .search_rss(&[
                    ("num", num.to_string()),
                    ("t", stringify_categories(categories)),
                    ("dl", "1".to_string()),
                    ("offset", (num * requests).to_string()),
                ])
                .await?;
            requests += 1;

            if !target.is_nil() {
                if let Some(position) = page.iter().position(|entry| entry.meta.id == target) {
                    entries.extend(page.into_iter().take(position));
                    return Ok(entries);
                }
            }

            entries.extend(page);

            if max_requests != 0 && requests == max_requests {
                return Ok(entries);
            }
        }
    }

    /// Returns the URL the raw file for the given entry downloads from.
    pub fn entry_download_url(&self, entry: &Entry) -> Url {
        self.build_url(
            ModePath::Api,
            &[
                ("t", "get".to_string()),
                ("id", entry.meta.id.simple().to_string()),
                ("apikey", self.opts.api_key.clone()),
            ],
        )
    }

    /// Downloads the bytes of the raw NZB or other file for the given
    /// entry.
    pub async fn download_entry(&self, entry: &Entry) -> Result<Vec<u8>, Error> {
        self.get_body(&self.entry_download_url(entry)).await
    }

    /// Fetches the comments for the given entry and appends them to its
    /// comment list. Comment dates that fail to parse are kept empty rather
    /// than failing the fetch.
    pub async fn populate_comments(&self, entry: &mut Entry) -> Result<(), Error> {
        let url = self.build_url(
            ModePath::Api,
            &[
                ("t", "comments".to_string()),
                ("id", entry.meta.id.to_string()),
                ("apikey", self.opts.api_key.clone()),
            ],
        );
        let body = self.get_body(&url).await?;
        let feed = parse_raw_feed(&body)?;

        for item in &feed.items {
            let published = match item.pub_date.as_deref() {
                Some(raw) => {
                    let parsed = parse_rfc1123z(raw);
                    if parsed.is_none() {
                        tracing::warn!(pub_date = raw, "failed to parse comment date");
                    }
                    parsed
                }
                None => None,
            };
            entry.meta.comments.comments.push(Comment {
                title: item.title.clone(),
                content: item.description.clone(),
                published,
            });
        }
        Ok(())
    }

    /// Populates the file for the given entry.
    ///
    /// An entry with no file kind resolves to an NZB reference pointing at
    /// the entry download URL. NZB references download and parse the
    /// document; torrents download the raw torrent bytes.
    pub async fn populate_file(&self, entry: &mut Entry) -> Result<(), Error> {
        let download_url = self.entry_download_url(entry);
        let file = entry
            .file
            .get_or_insert_with(|| File::Nzb(NzbFile::default()));

        match file {
            File::Nzb(nzb_file) => {
                nzb_file.download_url = Some(download_url.clone());
                let body = self.get_body(&download_url).await?;
                nzb_file.document = Some(torznab_nzb::Nzb::from_bytes(&body)?);
            }
            File::Torrent(torrent) => {
                let url = torrent
                    .download_url
                    .clone()
                    .ok_or(Error::MissingDownloadUrl)?;
                torrent.raw = self.get_body(&url).await?;
            }
        }
        Ok(())
    }

    /// Produces a fully qualified URL from the base endpoint, a mode path,
    /// and query parameters.
    fn build_url(&self, mode: ModePath, params: &[(&str, String)]) -> Url {
        let mut url = self.opts.base_url.clone();
        url.set_path(mode.as_str());
        url.set_query(None);
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())));
        url
    }

    /// Performs a GET request and returns the response body bytes.
    async fn get_body(&self, url: &Url) -> Result<Vec<u8>, Error> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| Error::transport(url, err))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| Error::transport(url, err))?;
        Ok(body.to_vec())
    }

    /// Fetches a URL and decodes the response into entries.
    async fn entries_from_url(&self, url: Url) -> Result<Vec<Entry>, Error> {
        let body = self.get_body(&url).await?;
        let source = Source {
            endpoint: self.opts.base_url.clone(),
            api_key: self.opts.api_key.clone(),
        };
        parse_entries(&body, &source)
    }
}
