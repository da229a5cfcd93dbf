// ABOUTME: NZB document serialisation back to its XML wire format.
// ABOUTME: Writes head metadata, files, groups, and segments with quick-xml.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

use crate::error::NzbError;
use crate::model::Nzb;

impl Nzb {
    /// Serialises the document to its XML representation as bytes.
    ///
    /// Head metadata pairs are written in map order, which is unordered;
    /// parsing the output yields a document equal to the original.
    pub fn to_xml_bytes(&self) -> Result<Vec<u8>, NzbError> {
        let mut writer = Writer::new(Vec::new());

        let mut root = BytesStart::new("nzb");
        root.push_attribute(("xmlns", "http://www.newzbin.com/DTD/2003/nzb"));
        write_event(&mut writer, Event::Start(root))?;

        write_event(&mut writer, Event::Start(BytesStart::new("head")))?;
        for (meta_type, value) in &self.meta {
            let mut meta = BytesStart::new("meta");
            meta.push_attribute(("type", meta_type.as_str()));
            write_event(&mut writer, Event::Start(meta))?;
            write_event(&mut writer, Event::Text(BytesText::new(value)))?;
            write_event(&mut writer, Event::End(BytesEnd::new("meta")))?;
        }
        write_event(&mut writer, Event::End(BytesEnd::new("head")))?;

        for file in &self.files {
            let date = file.date.to_string();
            let mut start = BytesStart::new("file");
            start.push_attribute(("poster", file.poster.as_str()));
            start.push_attribute(("date", date.as_str()));
            start.push_attribute(("subject", file.subject.as_str()));
            write_event(&mut writer, Event::Start(start))?;

            write_event(&mut writer, Event::Start(BytesStart::new("groups")))?;
            for group in &file.groups {
                write_event(&mut writer, Event::Start(BytesStart::new("group")))?;
                write_event(&mut writer, Event::Text(BytesText::new(group)))?;
                write_event(&mut writer, Event::End(BytesEnd::new("group")))?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new("groups")))?;

            write_event(&mut writer, Event::Start(BytesStart::new("segments")))?;
            for segment in &file.segments {
                let bytes = segment.bytes.to_string();
                let number = segment.number.to_string();
                let mut start = BytesStart::new("segment");
                start.push_attribute(("bytes", bytes.as_str()));
                start.push_attribute(("number", number.as_str()));
                write_event(&mut writer, Event::Start(start))?;
                write_event(&mut writer, Event::Text(BytesText::new(&segment.id)))?;
                write_event(&mut writer, Event::End(BytesEnd::new("segment")))?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new("segments")))?;

            write_event(&mut writer, Event::End(BytesEnd::new("file")))?;
        }

        write_event(&mut writer, Event::End(BytesEnd::new("nzb")))?;
        Ok(writer.into_inner())
    }

    /// Serialises the document to its XML representation as a string.
    pub fn to_xml_string(&self) -> Result<String, NzbError> {
        let bytes = self.to_xml_bytes()?;
        String::from_utf8(bytes).map_err(|err| NzbError::Serialise(err.to_string()))
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<(), NzbError> {
    writer
        .write_event(event)
        .map_err(|err| NzbError::Serialise(err.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::model::{File, Nzb, Segment};
    use pretty_assertions::assert_eq;

    fn sample() -> Nzb {
        let mut nzb = Nzb::default();
        nzb.meta
            .insert("category".to_string(), "TV > HD".to_string());
        nzb.files.push(File {
            poster: "poster@example.com".to_string(),
            date: 1498078722,
            subject: r#"An Example - "example.rar" yEnc (1/2)"#.to_string(),
            groups: vec!["alt.binaries.example".to_string()],
            segments: vec![
                Segment {
                    number: 1,
                    bytes: 1024,
                    id: "part1of2@example".to_string(),
                },
                Segment {
                    number: 2,
                    bytes: 2048,
                    id: "part2of2@example".to_string(),
                },
            ],
        });
        nzb
    }

    #[test]
    fn round_trips_through_xml() {
        let original = sample();
        let xml = original.to_xml_bytes().unwrap();
        let reparsed = Nzb::from_bytes(&xml).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn escapes_meta_values_and_subjects() {
        let xml = sample().to_xml_string().unwrap();
        assert!(xml.contains("TV &gt; HD"));
        assert!(!xml.contains(r#"subject="An Example - "example"#));
    }
}
