#![forbid(unsafe_code)]
//! Resource/XLIFF codec for localization pipelines.
//!
//! Converts in-memory translatable resources (projects → resources →
//! messages, with attributes and notes) to XLIFF 1.2/2.0 documents for
//! translation tooling, and parses translated XLIFF 2.0 documents back into
//! the same structured model.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use xliffcodec::{Message, Project, Resource, XliffVersion};
//! use xliffcodec::{export_xliff, group_by_project, import_xliff};
//!
//! let project = Arc::new(Project::new("App", "en").with_target_locale("zh", &[]));
//!
//! // Export: resources -> grouped XLIFF documents, one per project.
//! let mut resource = Resource::new("Example", Arc::clone(&project));
//! resource.attributes.lang = Some("en".to_string());
//! resource.add_message(Message::new("hello", "Hello!"));
//! let groups = group_by_project(vec![resource]);
//! let documents = export_xliff(&groups, XliffVersion::V2_0)?;
//! assert_eq!(documents[0].0, "App");
//!
//! // Import: translated XLIFF -> resources, filtered by supported locale.
//! let translated = documents[0].1.replace("srcLang=\"en\"", "srcLang=\"en\" trgLang=\"zh\"");
//! let resources = import_xliff(&translated, None, &project)?;
//! assert_eq!(resources[0].title, "Example");
//! # Ok::<(), xliffcodec::Error>(())
//! ```
//!
//! # Design
//!
//! - The codec never performs I/O; file discovery, module loading, and
//!   writing documents to disk are the caller's concern.
//! - Monolingual documents and unsupported target locales are silent
//!   skips, not errors; only XML that fails to parse raises
//!   [`Error::MalformedDocument`].
//! - XLIFF 2.0 is the bilingual interchange format; 1.2 export is
//!   monolingual-source-only.

pub mod codec;
pub mod error;
pub mod formats;
pub mod operations;
pub mod traits;
pub mod types;
pub mod xml;

// Re-export most used items for easy consumption
pub use crate::{
    codec::{export_xliff, import_xliff},
    error::Error,
    formats::XliffVersion,
    operations::{ProjectGroup, filter_by_project, group_by_project},
    types::{Attributes, Direction, Message, Note, NoteType, Project, Resource},
    xml::{XmlNode, parse_document},
};
