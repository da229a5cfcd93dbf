// ABOUTME: Library entry point for the NZB document model.
// ABOUTME: Re-exports the public API: Nzb, File, Segment, NzbError.

//! Data model for usenet NZB documents.
//!
//! An NZB document lists the usenet articles that make up a set of files.
//! This crate parses the XML wire format into a typed model, serialises the
//! model back to XML, and offers small conveniences such as size totals and
//! file-name approximation from subject lines.
//!
//! # Example
//!
//! ```
//! use torznab_nzb::Nzb;
//!
//! let doc = r#"<nzb>
//!   <head><meta type="name">example</meta></head>
//!   <file poster="p" date="0" subject="&quot;a.rar&quot; yEnc (1/1)">
//!     <groups><group>alt.binaries.example</group></groups>
//!     <segments><segment bytes="128" number="1">one@example</segment></segments>
//!   </file>
//! </nzb>"#;
//!
//! let nzb = Nzb::from_bytes(doc.as_bytes()).unwrap();
//! assert_eq!(nzb.size(), 128);
//! ```

pub mod error;
pub mod model;
pub mod parse;
pub mod serialise;

pub use crate::error::NzbError;
pub use crate::model::{File, Nzb, Segment};
