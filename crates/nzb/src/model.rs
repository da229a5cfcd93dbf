// ABOUTME: Data model for usenet NZB documents.
// ABOUTME: An Nzb holds head metadata plus the files and segments to download.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::NzbError;

/// A usenet NZB document: head metadata plus the list of files it describes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nzb {
    /// Metadata pairs from the document head (`<meta type="...">` elements).
    pub meta: HashMap<String, String>,
    /// File entries contained within the document.
    pub files: Vec<File>,
}

/// One file entry within an NZB document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Who posted the file to usenet.
    pub poster: String,
    /// Unix timestamp of when the file was posted.
    pub date: i64,
    /// Subject line describing the file contents.
    pub subject: String,
    /// Usenet groups the file was posted to.
    pub groups: Vec<String>,
    /// Segments that make up the file, downloaded separately.
    pub segments: Vec<Segment>,
}

/// One downloadable piece of a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Number of the segment relative to its file.
    pub number: u32,
    /// Size of the segment in bytes.
    pub bytes: u64,
    /// Usenet message identifier of the segment.
    pub id: String,
}

impl Nzb {
    /// Returns the total size in bytes of all files in the document.
    pub fn size(&self) -> u64 {
        self.files.iter().map(File::size).sum()
    }
}

impl File {
    /// Returns the size in bytes of the file, summed over its segments.
    pub fn size(&self) -> u64 {
        self.segments.iter().map(|s| s.bytes).sum()
    }

    /// Approximates the on-disk name of the file from its subject line.
    ///
    /// Subjects conventionally quote the file name; the quoted part is
    /// returned with any `/` replaced by `-`. Errors when the subject
    /// carries no quoted part.
    pub fn approximated_name(&self) -> Result<String, NzbError> {
        match self.subject.split('"').nth(1) {
            Some(name) => Ok(name.replace('/', "-")),
            None => Err(NzbError::invalid(format!(
                "could not parse file name out of subject {:?}",
                self.subject
            ))),
        }
    }
}
