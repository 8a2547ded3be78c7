//! `@Types:` header handling for CHAT transcripts.
//!
//! Pure text operations: finding header lines, validating an override line
//! into a [`TypesHeader`], and rewriting a document so it carries exactly the
//! requested header. Nothing in this crate touches the filesystem.

mod header;
mod matcher;
mod update;

pub use header::{HeaderError, TypesHeader};
pub use matcher::{first_record_marker, has_header, locate_headers};
pub use update::{apply_header, HeaderUpdate, UpdateKind};
