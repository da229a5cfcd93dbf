// ABOUTME: Feed decoding: converts raw feed responses into typed entries.
// ABOUTME: Checks the envelope error pair, then assembles each item in order.

use url::Url;

use crate::attributes::apply_attribute;
use crate::error::Error;
use crate::models::{Entry, File, Source};
use crate::raw::{parse_raw_feed, RawItem};
use crate::time_parse::parse_rfc1123z;

/// Decodes raw feed response bytes into entries attributed to `source`.
///
/// An envelope carrying a nonzero error code fails the decode before any
/// item is assembled. A failure assembling any single item fails the whole
/// decode; there is no partial result.
pub fn parse_entries(data: &[u8], source: &Source) -> Result<Vec<Entry>, Error> {
    let feed = parse_raw_feed(data)?;

    if feed.error_code != 0 {
        return Err(Error::Api {
            code: feed.error_code,
            description: feed.error_description,
        });
    }

    feed.items
        .iter()
        .map(|item| entry_from_raw(item, source))
        .collect()
}

/// Assembles one typed entry from a raw feed item.
fn entry_from_raw(item: &RawItem, source: &Source) -> Result<Entry, Error> {
    let mut entry = Entry::new(source.clone());
    entry.general.title = item.title.clone();
    entry.general.description = item.description.clone();

    if let Some(ref raw_date) = item.pub_date {
        let published = parse_rfc1123z(raw_date).ok_or_else(|| {
            Error::Feed(format!(
                "failed to parse pubDate {:?} as RFC 1123 with numeric zone",
                raw_date
            ))
        })?;
        entry.meta.dates.published = Some(published);
    }

    for attribute in &item.attributes {
        apply_attribute(&mut entry, &attribute.name, &attribute.value)?;
    }

    // A torrent's download reference comes from the item enclosure.
    if let Some(File::Torrent(ref mut torrent)) = entry.file {
        if let Some(ref enclosure) = item.enclosure {
            if !enclosure.url.is_empty() {
                let url = Url::parse(&enclosure.url).map_err(|err| {
                    Error::Feed(format!(
                        "failed to parse enclosure URL {:?}: {}",
                        enclosure.url, err
                    ))
                })?;
                torrent.download_url = Some(url);
            }
        }
    }

    Ok(entry)
}
