//! Top-level import and export entry points, tying together document
//! parsing, extraction, grouping, and serialization.
//!
//! The codec is synchronous and side-effect-free: every function here is a
//! pure transformation of its input value. Reading XLIFF files from disk
//! and writing documents back out are the caller's responsibility.

use std::sync::Arc;

use crate::{
    error::Error,
    formats::{XliffVersion, xliff2, xliff12},
    operations::ProjectGroup,
    types::{Project, Resource},
    xml,
};

/// Parses an XLIFF document and extracts the resources belonging to
/// `project`.
///
/// `target_lang` is the locale resolved by the caller (normally from a
/// `<project>.<locale>.xliff` filename); pass `None` to rely on the
/// document's own `trgLang` declarations. Returns an empty list when the
/// document is monolingual or its target language is not one the project
/// supports; returns [`Error::MalformedDocument`] only when the XML itself
/// does not parse.
pub fn import_xliff(
    input: &str,
    target_lang: Option<&str>,
    project: &Arc<Project>,
) -> Result<Vec<Resource>, Error> {
    let root = xml::parse_document(input)?;
    let locales = project.supported_locales();
    Ok(xliff2::extract(&root, target_lang, project, &locales))
}

/// Serializes each project group into one XLIFF document of the requested
/// version.
///
/// Returns one `(project name, document)` pair per group, in group order;
/// callers write each document to `<project>.xliff`. An empty group list
/// yields an empty output list.
pub fn export_xliff(
    groups: &[ProjectGroup],
    version: XliffVersion,
) -> Result<Vec<(String, String)>, Error> {
    groups
        .iter()
        .map(|(name, resources)| {
            let document = match version {
                XliffVersion::V1_2 => xliff12::serialize(resources)?,
                XliffVersion::V2_0 => xliff2::serialize(resources)?,
            };
            Ok((name.clone(), document))
        })
        .collect()
}
