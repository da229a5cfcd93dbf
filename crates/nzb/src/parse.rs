// ABOUTME: NZB document parsing from raw XML bytes.
// ABOUTME: Walks the XML event stream and builds the Nzb model.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::NzbError;
use crate::model::{File, Nzb, Segment};

/// Which element's character data is currently being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    Meta,
    Group,
    Segment,
}

impl Nzb {
    /// Parses an NZB document from raw XML bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Nzb, NzbError> {
        Nzb::from_reader(data)
    }

    /// Parses an NZB document from a buffered reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Nzb, NzbError> {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(true);

        let mut nzb = Nzb::default();
        let mut saw_root = false;

        let mut current_file: Option<File> = None;
        let mut current_segment: Option<Segment> = None;
        let mut current_meta_type: Option<String> = None;
        let mut text_target: Option<TextTarget> = None;
        let mut text = String::new();

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    let local_name = name.split(':').next_back().unwrap_or(&name);

                    if !saw_root {
                        if local_name != "nzb" {
                            return Err(NzbError::invalid(format!(
                                "expected root element nzb, found {}",
                                local_name
                            )));
                        }
                        saw_root = true;
                        continue;
                    }

                    match local_name {
                        "meta" => {
                            current_meta_type = get_attribute(e, "type");
                            text_target = Some(TextTarget::Meta);
                            text.clear();
                        }
                        "file" => {
                            current_file = Some(File {
                                poster: get_attribute(e, "poster").unwrap_or_default(),
                                date: parse_numeric_attribute(e, "date")?,
                                subject: get_attribute(e, "subject").unwrap_or_default(),
                                groups: Vec::new(),
                                segments: Vec::new(),
                            });
                        }
                        "group" => {
                            text_target = Some(TextTarget::Group);
                            text.clear();
                        }
                        "segment" => {
                            current_segment = Some(Segment {
                                number: parse_numeric_attribute(e, "number")?,
                                bytes: parse_numeric_attribute(e, "bytes")?,
                                id: String::new(),
                            });
                            text_target = Some(TextTarget::Segment);
                            text.clear();
                        }
                        _ => {}
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if text_target.is_some() {
                        let chunk = e.decode().map_err(NzbError::parse)?;
                        text.push_str(&chunk);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if text_target.is_some() {
                        text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    let local_name = name.split(':').next_back().unwrap_or(&name);

                    match local_name {
                        "meta" => {
                            if let Some(meta_type) = current_meta_type.take() {
                                let value = quick_xml::escape::unescape(&text)
                                    .map(|v| v.into_owned())
                                    .unwrap_or_else(|_| text.clone());
                                nzb.meta.insert(meta_type, value);
                            }
                            text_target = None;
                        }
                        "group" => {
                            if let Some(file) = current_file.as_mut() {
                                file.groups.push(text.clone());
                            }
                            text_target = None;
                        }
                        "segment" => {
                            if let (Some(file), Some(mut segment)) =
                                (current_file.as_mut(), current_segment.take())
                            {
                                segment.id = text.clone();
                                file.segments.push(segment);
                            }
                            text_target = None;
                        }
                        "file" => {
                            if let Some(file) = current_file.take() {
                                nzb.files.push(file);
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(err) => return Err(NzbError::parse(err)),
                _ => {}
            }
            buf.clear();
        }

        if !saw_root {
            return Err(NzbError::Parse("document contains no elements".to_string()));
        }

        Ok(nzb)
    }
}

impl std::str::FromStr for Nzb {
    type Err = NzbError;

    fn from_str(data: &str) -> Result<Nzb, NzbError> {
        Nzb::from_bytes(data.as_bytes())
    }
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

/// Parses a required numeric attribute, treating absence as zero.
fn parse_numeric_attribute<T>(e: &BytesStart, name: &str) -> Result<T, NzbError>
where
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    match get_attribute(e, name) {
        Some(raw) => raw.parse().map_err(|err| {
            NzbError::invalid(format!("bad {} attribute {:?}: {}", name, raw, err))
        }),
        None => Ok(T::default()),
    }
}
