// ABOUTME: Raw XML parsing for indexer feed responses.
// ABOUTME: Extracts the envelope error code, items, and their attr elements.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::Error;

/// An unparsed feed response: the envelope error pair plus its items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFeed {
    /// Error code carried on the root element; zero means success.
    pub error_code: i32,
    /// Error description carried on the root element.
    pub error_description: String,
    /// Items in document order.
    pub items: Vec<RawItem>,
}

/// One unparsed feed item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawItem {
    pub title: String,
    pub link: String,
    pub guid: String,
    pub description: String,
    pub comments: String,
    /// Raw pubDate text, when present.
    pub pub_date: Option<String>,
    pub enclosure: Option<RawEnclosure>,
    /// name/value extension attributes in document order.
    pub attributes: Vec<RawAttribute>,
}

/// The enclosure reference of a feed item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEnclosure {
    pub url: String,
    pub length: String,
    pub mime_type: String,
}

/// One name/value extension attribute of a feed item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAttribute {
    pub name: String,
    pub value: String,
}

/// Parses raw response bytes into the feed envelope.
///
/// The root element's `code`/`description` attributes are captured whatever
/// the root is called, since indexers answer errors with a bare error
/// element in place of the feed. Namespace prefixes on item children are
/// ignored, so `newznab:attr` and `torznab:attr` both count as `attr`.
pub fn parse_raw_feed(data: &[u8]) -> Result<RawFeed, Error> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut feed = RawFeed::default();
    let mut saw_root = false;
    let mut in_item = false;
    let mut current_item = RawItem::default();
    let mut current_element: Option<String> = None;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let local_name = name.split(':').next_back().unwrap_or(&name).to_string();

                if !saw_root {
                    saw_root = true;
                    if let Some(code) = get_attribute(e, "code") {
                        feed.error_code = code.parse().map_err(|err| {
                            Error::Feed(format!(
                                "bad error code {:?} on root element: {}",
                                code, err
                            ))
                        })?;
                    }
                    if let Some(description) = get_attribute(e, "description") {
                        feed.error_description = description;
                    }
                    buf.clear();
                    continue;
                }

                match local_name.as_str() {
                    "item" => {
                        in_item = true;
                        current_item = RawItem::default();
                    }
                    "enclosure" if in_item => {
                        current_item.enclosure = Some(RawEnclosure {
                            url: get_attribute(e, "url").unwrap_or_default(),
                            length: get_attribute(e, "length").unwrap_or_default(),
                            mime_type: get_attribute(e, "type").unwrap_or_default(),
                        });
                    }
                    "attr" if in_item => {
                        current_item.attributes.push(RawAttribute {
                            name: get_attribute(e, "name").unwrap_or_default(),
                            value: get_attribute(e, "value").unwrap_or_default(),
                        });
                    }
                    "title" | "link" | "guid" | "description" | "comments" | "pubDate"
                        if in_item =>
                    {
                        current_element = Some(local_name);
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(ref element) = current_element {
                    let text = e.decode().map(|s| s.into_owned()).unwrap_or_default();
                    append_item_text(&mut current_item, element, &text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(ref element) = current_element {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    append_item_text(&mut current_item, element, &text);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let local_name = name.split(':').next_back().unwrap_or(&name);

                if local_name == "item" {
                    feed.items.push(std::mem::take(&mut current_item));
                    in_item = false;
                }
                current_element = None;
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(Error::Feed(err.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::Feed("response contains no elements".to_string()));
    }

    Ok(feed)
}

/// Appends character data to the item field currently being read.
fn append_item_text(item: &mut RawItem, element: &str, text: &str) {
    let field = match element {
        "title" => &mut item.title,
        "link" => &mut item.link,
        "guid" => &mut item.guid,
        "description" => &mut item.description,
        "comments" => &mut item.comments,
        "pubDate" => {
            item.pub_date.get_or_insert_with(String::new).push_str(text);
            return;
        }
        _ => return,
    };
    field.push_str(text);
}

/// Gets an attribute value from an XML element.
fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref());
        if key == name {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}
