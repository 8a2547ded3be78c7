//! update-chat-types - normalize `@Types` headers across a CHAT corpus
//!
//! Every directory may hold a `0types.txt` override whose first line is the
//! `@Types:` header for the `.cha` files directly inside it. This crate
//! finds those overrides, validates all of them up front, and then inserts
//! or replaces the header in each eligible file, writing only files whose
//! content actually changes.

pub mod config;
pub mod logging;
pub mod overrides;
pub mod report;
pub mod tree;

pub use chat_header::{apply_header, has_header, HeaderUpdate, TypesHeader, UpdateKind};
pub use config::{ConfigError, ConfigOverrides, UpdaterConfig};
pub use overrides::{collect_overrides, read_override, OverrideError, OverrideIndex};
pub use report::UpdateReport;
pub use tree::{update_file, update_tree, TreeUpdater, UpdateError};
