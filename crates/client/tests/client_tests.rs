// ABOUTME: Integration tests for the client against a mock indexer server.
// ABOUTME: Covers searches, API errors, RSS walking, comments, and downloads.

use httpmock::prelude::*;
use torznab_client::{Category, Client, Entry, Error, File, Source, TorrentFile};
use url::Url;
use uuid::Uuid;

fn client_for(server: &MockServer) -> Client {
    Client::builder(Url::parse(&server.base_url()).unwrap())
        .api_key("gibberish")
        .api_user_id(1234)
        .build()
}

fn entry_with_id(server: &MockServer, id: Uuid) -> Entry {
    let mut entry = Entry::new(Source {
        endpoint: Url::parse(&server.base_url()).unwrap(),
        api_key: "gibberish".to_string(),
    });
    entry.meta.id = id;
    entry
}

/// Ids for one synthetic RSS page of 50 entries; pages are numbered from 0.
fn page_ids(page: u128) -> Vec<Uuid> {
    (0..50).map(|i| Uuid::from_u128(page * 50 + i + 1)).collect()
}

/// Builds a feed page whose entries carry the given ids as guid attributes.
fn rss_page(ids: &[Uuid]) -> String {
    let mut items = String::new();
    for (index, id) in ids.iter().enumerate() {
        items.push_str(&format!(
            r#"<item>
  <title>entry-{index}</title>
  <pubDate>Thu, 02 Mar 2017 17:15:27 +0000</pubDate>
  <attr name="guid" value="{}"/>
  <attr name="category" value="5030"/>
</item>
"#,
            id.simple()
        ));
    }
    format!(
        "<rss version=\"2.0\"><channel><title>feed</title>\n{}</channel></rss>",
        items
    )
}

#[tokio::test]
async fn search_with_query_decodes_the_response() {
    let server = MockServer::start();
    let feed = r#"<rss><channel>
      <item>
        <title>Supernatural.S11E01.720p</title>
        <pubDate>Thu, 02 Mar 2017 17:15:27 +0000</pubDate>
        <attr name="guid" value="bcdbf3f1e7a1ef964527f1d40d5ec639"/>
        <attr name="category" value="5040"/>
      </item>
      <item>
        <title>Supernatural.S11E01.1080p</title>
        <pubDate>Thu, 02 Mar 2017 18:00:00 +0000</pubDate>
        <attr name="guid" value="29527a54ac54bb7533abacd7dad66a6a"/>
        <attr name="category" value="5040"/>
      </item>
    </channel></rss>"#;

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api")
            .query_param("t", "tvshows")
            .query_param("q", "Supernatural S11E01")
            .query_param("cat", "5040")
            .query_param("apikey", "gibberish");
        then.status(200)
            .header("content-type", "application/rss+xml")
            .body(feed);
    });

    let client = client_for(&server);
    let entries = client
        .search_with_query(&[Category::TV_HD], "Supernatural S11E01", "tvshows")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].general.title, "Supernatural.S11E01.720p");
    assert_eq!(entries[0].general.categorisation.category, vec!["5040"]);
}

#[tokio::test]
async fn api_error_envelope_is_surfaced() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api");
        then.status(200)
            .header("content-type", "application/rss+xml")
            .body(r#"<error code="100" description="Invalid API Key"/>"#);
    });

    let client = client_for(&server);
    let err = client
        .search_with_tvdb(&[Category::TV_SD], 5678, 9, 2)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { code: 100, .. }));
    assert!(err.to_string().contains("100: Invalid API Key"));
}

#[tokio::test]
async fn rss_walk_stops_before_the_target_entry() {
    let server = MockServer::start();
    let pages: Vec<String> = (0..3).map(|page| rss_page(&page_ids(page))).collect();

    let mut mocks = Vec::new();
    for (page, body) in pages.iter().enumerate() {
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rss")
                .query_param("num", "50")
                .query_param("t", "2000,5000")
                .query_param("dl", "1")
                .query_param("r", "gibberish")
                .query_param("i", "1234")
                .query_param("offset", (page * 50).to_string());
            then.status(200)
                .header("content-type", "application/rss+xml")
                .body(body.as_str());
        });
        mocks.push(mock);
    }

    let client = client_for(&server);
    // The 13th entry of the 3rd page.
    let target = Uuid::from_u128(2 * 50 + 13);
    let entries = client
        .search_rss_until(&[Category::MOVIE_ALL, Category::TV_ALL], 50, target, 0)
        .await
        .unwrap();

    for mock in &mocks {
        mock.assert();
    }
    assert_eq!(entries.len(), 112);
    assert!(entries.iter().all(|entry| entry.meta.id != target));
    assert_eq!(entries[0].meta.id, Uuid::from_u128(1));
    assert_eq!(entries.last().unwrap().meta.id, Uuid::from_u128(112));
}

#[tokio::test]
async fn rss_walk_stops_at_the_request_budget() {
    let server = MockServer::start();
    let pages: Vec<String> = (0..2).map(|page| rss_page(&page_ids(page))).collect();

    let mut mocks = Vec::new();
    for (page, body) in pages.iter().enumerate() {
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rss")
                .query_param("offset", (page * 50).to_string());
            then.status(200)
                .header("content-type", "application/rss+xml")
                .body(body.as_str());
        });
        mocks.push(mock);
    }

    let client = client_for(&server);
    // A target that never appears; only the budget can stop the walk.
    let target = Uuid::from_u128(999_999);
    let entries = client
        .search_rss_until(&[Category::MOVIE_ALL, Category::TV_ALL], 50, target, 2)
        .await
        .unwrap();

    for mock in &mocks {
        mock.assert_hits(1);
    }
    assert_eq!(entries.len(), 100);
}

#[tokio::test]
async fn rss_walk_with_nil_target_never_matches() {
    let server = MockServer::start();
    // Entries of this page intentionally carry a nil guid attribute.
    let nil_ids = vec![Uuid::nil(); 5];
    let mock = server.mock(|when, then| {
        when.method(GET).path("/rss").query_param("offset", "0");
        then.status(200)
            .header("content-type", "application/rss+xml")
            .body(rss_page(&nil_ids));
    });

    let client = client_for(&server);
    let entries = client
        .search_rss_until(&[Category::TV_ALL], 5, Uuid::nil(), 1)
        .await
        .unwrap();

    mock.assert();
    // A nil target means no target, so the full page accumulates.
    assert_eq!(entries.len(), 5);
}

#[tokio::test]
async fn rss_walk_aborts_when_a_page_fails_to_decode() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rss").query_param("offset", "0");
        then.status(200)
            .header("content-type", "application/rss+xml")
            .body(rss_page(&page_ids(0)));
    });
    server.mock(|when, then| {
        when.method(GET).path("/rss").query_param("offset", "50");
        then.status(200)
            .header("content-type", "application/rss+xml")
            .body("<rss><channel><item><title>t</wrong></channel></rss>");
    });

    let client = client_for(&server);
    let err = client
        .search_rss_until(&[Category::TV_ALL], 50, Uuid::from_u128(999_999), 0)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Feed(_)));
}

#[tokio::test]
async fn populate_comments_appends_fetched_comments() {
    let server = MockServer::start();
    let id = Uuid::parse_str("bcdbf3f1e7a1ef964527f1d40d5ec639").unwrap();
    let comments_feed = r#"<rss><channel>
      <item>
        <title>first comment</title>
        <description>nice upload</description>
        <pubDate>Thu, 02 Mar 2017 17:15:27 +0000</pubDate>
      </item>
      <item>
        <title>second comment</title>
        <description>thanks</description>
        <pubDate>yesterday-ish</pubDate>
      </item>
    </channel></rss>"#;

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api")
            .query_param("t", "comments")
            .query_param("id", id.to_string())
            .query_param("apikey", "gibberish");
        then.status(200)
            .header("content-type", "application/rss+xml")
            .body(comments_feed);
    });

    let client = client_for(&server);
    let mut entry = entry_with_id(&server, id);
    client.populate_comments(&mut entry).await.unwrap();

    mock.assert();
    assert_eq!(entry.meta.comments.comments.len(), 2);
    assert_eq!(entry.meta.comments.comments[0].title, "first comment");
    assert_eq!(entry.meta.comments.comments[0].content, "nice upload");
    assert!(entry.meta.comments.comments[0].published.is_some());
    // The unparsable date is tolerated, not fatal.
    assert!(entry.meta.comments.comments[1].published.is_none());
}

#[tokio::test]
async fn download_entry_returns_the_raw_body() {
    let server = MockServer::start();
    let id = Uuid::parse_str("bcdbf3f1e7a1ef964527f1d40d5ec639").unwrap();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api")
            .query_param("t", "get")
            .query_param("id", id.simple().to_string())
            .query_param("apikey", "gibberish");
        then.status(200).body("raw file bytes");
    });

    let client = client_for(&server);
    let entry = entry_with_id(&server, id);
    let bytes = client.download_entry(&entry).await.unwrap();

    mock.assert();
    assert_eq!(bytes, b"raw file bytes");
}

#[tokio::test]
async fn populate_file_defaults_to_an_nzb_reference() {
    let server = MockServer::start();
    let id = Uuid::parse_str("bcdbf3f1e7a1ef964527f1d40d5ec639").unwrap();
    let nzb_doc = r#"<nzb>
      <head><meta type="name">example</meta></head>
      <file poster="p" date="0" subject="&quot;a.rar&quot; yEnc (1/1)">
        <groups><group>alt.binaries.example</group></groups>
        <segments><segment bytes="2048" number="1">one@example</segment></segments>
      </file>
    </nzb>"#;

    server.mock(|when, then| {
        when.method(GET)
            .path("/api")
            .query_param("t", "get")
            .query_param("id", id.simple().to_string());
        then.status(200)
            .header("content-type", "application/x-nzb")
            .body(nzb_doc);
    });

    let client = client_for(&server);
    let mut entry = entry_with_id(&server, id);
    client.populate_file(&mut entry).await.unwrap();

    match entry.file {
        Some(File::Nzb(ref nzb_file)) => {
            assert!(nzb_file.download_url.is_some());
            let document = nzb_file.document.as_ref().unwrap();
            assert_eq!(document.meta["name"], "example");
            assert_eq!(document.size(), 2048);
        }
        ref other => panic!("expected NZB file, got {:?}", other),
    }
    assert_eq!(entry.file.as_ref().unwrap().size(), 2048);
}

#[tokio::test]
async fn populate_file_downloads_torrent_bytes() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/torrents/abc.torrent");
        then.status(200)
            .header("content-type", "application/x-bittorrent")
            .body("d8:announce0:e");
    });

    let client = client_for(&server);
    let mut entry = entry_with_id(&server, Uuid::from_u128(7));
    entry.file = Some(File::Torrent(TorrentFile {
        download_url: Some(Url::parse(&server.url("/torrents/abc.torrent")).unwrap()),
        ..Default::default()
    }));

    client.populate_file(&mut entry).await.unwrap();

    mock.assert();
    match entry.file {
        Some(File::Torrent(ref torrent)) => {
            assert_eq!(torrent.raw, b"d8:announce0:e");
        }
        ref other => panic!("expected torrent file, got {:?}", other),
    }
}

#[tokio::test]
async fn populate_file_requires_a_torrent_download_url() {
    let server = MockServer::start();
    let client = client_for(&server);
    let mut entry = entry_with_id(&server, Uuid::from_u128(7));
    entry.file = Some(File::Torrent(TorrentFile::default()));

    let err = client.populate_file(&mut entry).await.unwrap_err();
    assert!(matches!(err, Error::MissingDownloadUrl));
}
