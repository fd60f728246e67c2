//! XLIFF 2.0 support: extraction of translated documents back into
//! [`Resource`] values (import) and serialization of grouped resources into
//! XLIFF documents (export).

use std::{io::Write, path::Path, sync::Arc};

use lazy_static::lazy_static;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use regex::Regex;

use crate::{
    error::Error,
    types::{Attributes, Direction, Message, Note, NoteType, Project, Resource},
    xml::XmlNode,
};

const XMLNS: &str = "urn:oasis:names:tc:xliff:document:2.0";
const VERSION: &str = "2.0";
const DEFAULT_SOURCE_LANG: &str = "en";

/// Inline elements whose text contributes to a reconstructed segment,
/// in processing order.
const INLINE_TAGS: &[&str] = &["pc", "mrk", "sm", "em", "ph", "cp"];

lazy_static! {
    static ref NON_NAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.\-]+").unwrap();
    static ref UNDERSCORE_RUNS: Regex = Regex::new(r"_{2,}").unwrap();
}

// ---------------------------------------------------------------------------
// Extraction (import)
// ---------------------------------------------------------------------------

/// Walks a parsed `<xliff>` root and produces zero or more resources, one
/// per `<file>` element.
///
/// `target_lang` is the document-level target language resolved by the
/// caller (normally from the `<project>.<locale>.xliff` filename); the
/// root's own `trgLang` attribute is used when it is absent. Files without
/// any effective target language (monolingual) and files whose language is
/// not in `locales` are skipped silently: zero resources is a valid
/// outcome, not an error.
pub fn extract(
    root: &XmlNode,
    target_lang: Option<&str>,
    project: &Arc<Project>,
    locales: &[String],
) -> Vec<Resource> {
    let doc_lang = target_lang.or_else(|| root.attr("trgLang"));
    root.children("file")
        .into_iter()
        .filter_map(|file| extract_file(file, doc_lang, project, locales))
        .collect()
}

fn extract_file(
    file: &XmlNode,
    doc_lang: Option<&str>,
    project: &Arc<Project>,
    locales: &[String],
) -> Option<Resource> {
    // Monolingual file: no target language anywhere, nothing to import.
    let lang = file.attr("trgLang").or(doc_lang)?;
    if !locales.iter().any(|candidate| candidate == lang) {
        return None;
    }

    let title = file
        .attr("original")
        .map(title_from_original)
        .unwrap_or_default();

    let attributes = Attributes {
        lang: Some(lang.to_string()),
        dir: direction_of(file),
        dnt: file
            .attr("translate")
            .map(translate_means_dnt)
            .filter(|&dnt| dnt),
    };

    let mut units = Vec::new();
    collect_units(file, &mut units);
    let messages = units
        .iter()
        .map(|unit| extract_message(unit, &attributes))
        .collect();

    Some(Resource {
        title,
        notes: extract_notes(file),
        messages,
        attributes,
        project: Arc::clone(project),
    })
}

/// Depth-first walk over the `unit`/`group` tree, flattening every unit
/// found at any depth into one list while preserving document order.
/// Structural grouping is deliberately not preserved in the model.
fn collect_units<'a>(node: &'a XmlNode, units: &mut Vec<&'a XmlNode>) {
    for child in node.all_children() {
        match child.name() {
            "unit" => units.push(child),
            "group" => collect_units(child, units),
            _ => {}
        }
    }
}

fn extract_message(unit: &XmlNode, inherited: &Attributes) -> Message {
    let key = unit
        .attr("name")
        .or_else(|| unit.attr("id"))
        .unwrap_or_default()
        .to_string();

    // Store only values that differ from the file-level inherited ones;
    // matching values stay implicit.
    let lang = unit
        .attr("trgLang")
        .filter(|lang| *lang != inherited.lang())
        .map(str::to_string);
    let dir = direction_of(unit).filter(|dir| Some(*dir) != inherited.dir);
    let dnt = unit
        .attr("translate")
        .map(translate_means_dnt)
        .filter(|&dnt| dnt != inherited.is_do_not_translate());

    let value: String = unit
        .children("segment")
        .into_iter()
        .map(segment_text)
        .collect();

    Message {
        key,
        value,
        attributes: Attributes { lang, dir, dnt },
        notes: extract_notes(unit),
    }
}

fn extract_notes(node: &XmlNode) -> Vec<Note> {
    let Some(notes) = node.child("notes") else {
        return Vec::new();
    };
    notes
        .children("note")
        .into_iter()
        .map(|note| Note {
            note_type: NoteType::from_category(note.attr("category").unwrap_or_default()),
            content: note.text().to_string(),
        })
        .collect()
}

/// Reconstructs the text of one segment, preferring `<target>` over
/// `<source>`. Absence of any usable text yields an empty string, never an
/// error.
fn segment_text(segment: &XmlNode) -> String {
    segment
        .child("target")
        .or_else(|| segment.child("source"))
        .map(inline_text)
        .unwrap_or_default()
}

/// Concatenates a node's own text with the recursively-extracted text of
/// every recognized inline child element, preserving nesting.
fn inline_text(node: &XmlNode) -> String {
    let mut text = node.text().to_string();
    for tag in INLINE_TAGS {
        for child in node.children(tag) {
            text.push_str(&inline_text(child));
        }
    }
    text
}

fn direction_of(node: &XmlNode) -> Option<Direction> {
    node.attr("srcDir").and_then(|dir| dir.parse().ok())
}

fn translate_means_dnt(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "no" | "false")
}

fn title_from_original(original: &str) -> String {
    Path::new(original)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

// ---------------------------------------------------------------------------
// Serialization (export)
// ---------------------------------------------------------------------------

/// Serializes one project's resources into an XLIFF 2.0 document string.
///
/// A pure function of its input: the same resources always yield the same
/// bytes.
pub fn serialize(resources: &[Resource]) -> Result<String, Error> {
    let mut buf = Vec::new();
    to_writer(resources, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::InvalidResource(e.to_string()))
}

/// Writes an XLIFF 2.0 document to any writer.
pub fn to_writer<W: Write>(resources: &[Resource], writer: W) -> Result<(), Error> {
    let mut xml_writer = Writer::new(writer);

    xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    newline(&mut xml_writer)?;

    let src_lang = resources
        .first()
        .map(|resource| resource.attributes.lang())
        .filter(|lang| !lang.is_empty())
        .unwrap_or(DEFAULT_SOURCE_LANG);

    let mut xliff = BytesStart::new("xliff");
    xliff.push_attribute(("xmlns", XMLNS));
    xliff.push_attribute(("version", VERSION));
    xliff.push_attribute(("srcLang", src_lang));
    xml_writer.write_event(Event::Start(xliff))?;
    newline(&mut xml_writer)?;

    for (index, resource) in resources.iter().enumerate() {
        write_file(&mut xml_writer, resource, index)?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("xliff")))?;
    newline(&mut xml_writer)?;
    Ok(())
}

fn write_file<W: Write>(
    writer: &mut Writer<W>,
    resource: &Resource,
    index: usize,
) -> Result<(), Error> {
    let id = format!("f{}", index + 1);
    let original = format!("{}.json", resource.title);

    let mut file = BytesStart::new("file");
    file.push_attribute(("id", id.as_str()));
    file.push_attribute(("original", original.as_str()));
    if let Some(dir) = resource.attributes.dir {
        file.push_attribute(("srcDir", dir.as_str()));
    }
    if resource.attributes.is_do_not_translate() {
        file.push_attribute(("translate", "no"));
    }
    writer.write_event(Event::Start(file))?;
    newline(writer)?;

    write_notes(writer, &resource.notes, None)?;
    for message in &resource.messages {
        write_unit(writer, message)?;
    }

    writer.write_event(Event::End(BytesEnd::new("file")))?;
    newline(writer)?;
    Ok(())
}

fn write_unit<W: Write>(writer: &mut Writer<W>, message: &Message) -> Result<(), Error> {
    let id = sanitize_id(&message.key);

    let mut unit = BytesStart::new("unit");
    unit.push_attribute(("id", id.as_str()));
    if !message.key.is_empty() {
        unit.push_attribute(("name", message.key.as_str()));
    }
    // Message attributes hold explicit overrides only; inherited values are
    // never re-emitted.
    if let Some(dir) = message.attributes.dir {
        unit.push_attribute(("srcDir", dir.as_str()));
    }
    if let Some(dnt) = message.attributes.dnt {
        unit.push_attribute(("translate", if dnt { "no" } else { "yes" }));
    }
    writer.write_event(Event::Start(unit))?;
    newline(writer)?;

    write_notes(writer, &message.notes, Some(&id))?;

    writer.write_event(Event::Start(BytesStart::new("segment")))?;
    newline(writer)?;
    write_text_element(writer, BytesStart::new("source"), &message.value)?;
    writer.write_event(Event::End(BytesEnd::new("segment")))?;
    newline(writer)?;

    writer.write_event(Event::End(BytesEnd::new("unit")))?;
    newline(writer)?;
    Ok(())
}

fn write_notes<W: Write>(
    writer: &mut Writer<W>,
    notes: &[Note],
    id_prefix: Option<&str>,
) -> Result<(), Error> {
    if notes.is_empty() {
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new("notes")))?;
    newline(writer)?;
    for (index, note) in notes.iter().enumerate() {
        let note_id = id_prefix.map(|prefix| format!("{}-n{}", prefix, index + 1));
        let category = note.note_type.category();

        let mut elem = BytesStart::new("note");
        if let Some(ref note_id) = note_id {
            elem.push_attribute(("id", note_id.as_str()));
        }
        elem.push_attribute(("category", category.as_str()));
        write_text_element(writer, elem, &note.content)?;
    }
    writer.write_event(Event::End(BytesEnd::new("notes")))?;
    newline(writer)?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    elem: BytesStart<'_>,
    text: &str,
) -> Result<(), Error> {
    let end = elem.to_end().into_owned();
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end))?;
    newline(writer)?;
    Ok(())
}

fn newline<W: Write>(writer: &mut Writer<W>) -> Result<(), Error> {
    writer.write_event(Event::Text(BytesText::new("\n")))?;
    Ok(())
}

/// Derives a valid XML name token from a message key: non-name characters
/// become `_`, runs collapse to one, and an id that would be empty or start
/// with a digit, `.` or `-` gains a leading underscore.
pub(crate) fn sanitize_id(key: &str) -> String {
    let id = NON_NAME_CHARS.replace_all(key, "_");
    let id = UNDERSCORE_RUNS.replace_all(&id, "_").into_owned();
    if id.is_empty()
        || id.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-')
    {
        format!("_{}", id)
    } else {
        id
    }
}
