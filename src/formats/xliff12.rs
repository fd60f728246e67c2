//! XLIFF 1.2 export support.
//!
//! The 1.2 path is monolingual-source-only: it uses the flat
//! `<body><trans-unit>` shape and always emits `<source>` without a
//! `<target>`.

use std::io::Write;

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    error::Error,
    types::{Message, Note, Resource},
};

use super::xliff2::sanitize_id;

const XMLNS: &str = "urn:oasis:names:tc:xliff:document:1.2";
const VERSION: &str = "1.2";
const DEFAULT_SOURCE_LANG: &str = "en";
const DATATYPE: &str = "plaintext";

/// Serializes one project's resources into an XLIFF 1.2 document string.
pub fn serialize(resources: &[Resource]) -> Result<String, Error> {
    let mut buf = Vec::new();
    to_writer(resources, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::InvalidResource(e.to_string()))
}

/// Writes an XLIFF 1.2 document to any writer.
pub fn to_writer<W: Write>(resources: &[Resource], writer: W) -> Result<(), Error> {
    let mut xml_writer = Writer::new(writer);

    xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    newline(&mut xml_writer)?;

    let mut xliff = BytesStart::new("xliff");
    xliff.push_attribute(("xmlns", XMLNS));
    xliff.push_attribute(("version", VERSION));
    xml_writer.write_event(Event::Start(xliff))?;
    newline(&mut xml_writer)?;

    for resource in resources {
        write_file(&mut xml_writer, resource)?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("xliff")))?;
    newline(&mut xml_writer)?;
    Ok(())
}

fn write_file<W: Write>(writer: &mut Writer<W>, resource: &Resource) -> Result<(), Error> {
    let original = format!("{}.json", resource.title);
    let source_lang = if resource.attributes.lang().is_empty() {
        DEFAULT_SOURCE_LANG
    } else {
        resource.attributes.lang()
    };

    let mut file = BytesStart::new("file");
    file.push_attribute(("original", original.as_str()));
    file.push_attribute(("source-language", source_lang));
    file.push_attribute(("datatype", DATATYPE));
    if resource.attributes.is_do_not_translate() {
        file.push_attribute(("translate", "no"));
    }
    writer.write_event(Event::Start(file))?;
    newline(writer)?;

    if !resource.notes.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("header")))?;
        newline(writer)?;
        for note in &resource.notes {
            write_note(writer, note)?;
        }
        writer.write_event(Event::End(BytesEnd::new("header")))?;
        newline(writer)?;
    }

    writer.write_event(Event::Start(BytesStart::new("body")))?;
    newline(writer)?;
    for message in &resource.messages {
        write_trans_unit(writer, message)?;
    }
    writer.write_event(Event::End(BytesEnd::new("body")))?;
    newline(writer)?;

    writer.write_event(Event::End(BytesEnd::new("file")))?;
    newline(writer)?;
    Ok(())
}

fn write_trans_unit<W: Write>(writer: &mut Writer<W>, message: &Message) -> Result<(), Error> {
    let id = sanitize_id(&message.key);

    let mut unit = BytesStart::new("trans-unit");
    unit.push_attribute(("id", id.as_str()));
    if !message.key.is_empty() {
        unit.push_attribute(("resname", message.key.as_str()));
    }
    if let Some(dnt) = message.attributes.dnt {
        unit.push_attribute(("translate", if dnt { "no" } else { "yes" }));
    }
    writer.write_event(Event::Start(unit))?;
    newline(writer)?;

    writer.write_event(Event::Start(BytesStart::new("source")))?;
    writer.write_event(Event::Text(BytesText::new(&message.value)))?;
    writer.write_event(Event::End(BytesEnd::new("source")))?;
    newline(writer)?;

    for note in &message.notes {
        write_note(writer, note)?;
    }

    writer.write_event(Event::End(BytesEnd::new("trans-unit")))?;
    newline(writer)?;
    Ok(())
}

fn write_note<W: Write>(writer: &mut Writer<W>, note: &Note) -> Result<(), Error> {
    let category = note.note_type.category();
    let mut elem = BytesStart::new("note");
    elem.push_attribute(("from", category.as_str()));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(&note.content)))?;
    writer.write_event(Event::End(BytesEnd::new("note")))?;
    newline(writer)?;
    Ok(())
}

fn newline<W: Write>(writer: &mut Writer<W>) -> Result<(), Error> {
    writer.write_event(Event::Text(BytesText::new("\n")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NoteType, Project};
    use indoc::indoc;
    use std::sync::Arc;

    #[test]
    fn test_serialize_trans_unit_shape() {
        let project = Arc::new(Project::new("App", "en"));
        let mut resource = Resource::new("Example", project);
        resource.attributes.lang = Some("en".to_string());
        resource.add_message(Message::new("hello", "Hello!"));

        let doc = serialize(&[resource]).unwrap();
        assert_eq!(
            doc,
            indoc! {r#"
                <?xml version="1.0" encoding="utf-8"?>
                <xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
                <file original="Example.json" source-language="en" datatype="plaintext">
                <body>
                <trans-unit id="hello" resname="hello">
                <source>Hello!</source>
                </trans-unit>
                </body>
                </file>
                </xliff>
            "#}
        );
    }

    #[test]
    fn test_serialize_is_source_only() {
        let project = Arc::new(Project::new("App", "en"));
        let mut resource = Resource::new("Example", project);
        resource.add_message(Message::new("hello", "Hello!"));
        let doc = serialize(&[resource]).unwrap();
        assert!(!doc.contains("<target"));
        assert!(doc.contains(r#"source-language="en""#));
    }

    #[test]
    fn test_serialize_notes_and_flags() {
        let project = Arc::new(Project::new("App", "en"));
        let mut resource = Resource::new("Example", project);
        resource.attributes.dnt = Some(true);
        resource
            .notes
            .push(Note::new(NoteType::Description, "File note"));

        let mut message = Message::new("legal", "©");
        message.attributes.dnt = Some(true);
        message.notes.push(Note::new(NoteType::Comment, "Keep as-is"));
        resource.add_message(message);

        let doc = serialize(&[resource]).unwrap();
        assert!(doc.contains(r#"datatype="plaintext" translate="no">"#));
        assert!(doc.contains("<header>\n<note from=\"description\">File note</note>"));
        assert!(doc.contains(r#"<trans-unit id="legal" resname="legal" translate="no">"#));
        assert!(doc.contains(r#"<note from="comment">Keep as-is</note>"#));
    }

    #[test]
    fn test_empty_resource_list() {
        let doc = serialize(&[]).unwrap();
        assert!(doc.contains("<xliff"));
        assert!(!doc.contains("<file"));
    }
}
