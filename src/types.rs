//! Core types of the resource/XLIFF codec.
//! The extractor decodes into these; the serializers encode from these.

use std::{collections::BTreeMap, fmt::Display, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, traits::Parser};

impl Parser for Vec<Resource> {
    /// Parse from any reader.
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer(&mut writer, self).map_err(Error::Parse)
    }
}

/// A logical translation unit-of-work, shared by every resource built from
/// the same project definition.
///
/// The codec never mutates a project; resources hold it behind an [`Arc`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier, used as the exported filename and grouping key.
    pub name: String,

    /// BCP-47 locale the source text is authored in.
    pub source_locale: String,

    /// BCP-47 locale used for pseudo-translation testing.
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(default)]
    pub pseudo_locale: String,

    /// Supported target locales, each mapped to the non-empty list of
    /// locale aliases it satisfies. The key set is the authoritative list
    /// consulted by import filtering.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(default)]
    pub target_locales: BTreeMap<String, Vec<String>>,
}

impl Project {
    pub fn new(name: impl Into<String>, source_locale: impl Into<String>) -> Self {
        Project {
            name: name.into(),
            source_locale: source_locale.into(),
            pseudo_locale: String::new(),
            target_locales: BTreeMap::new(),
        }
    }

    /// Registers a target locale. An empty alias list defaults to the
    /// locale itself, keeping the alias-list invariant.
    pub fn with_target_locale(mut self, locale: &str, aliases: &[&str]) -> Self {
        let aliases = if aliases.is_empty() {
            vec![locale.to_string()]
        } else {
            aliases.iter().map(|a| a.to_string()).collect()
        };
        self.target_locales.insert(locale.to_string(), aliases);
        self
    }

    /// The locale codes this project accepts during import filtering.
    pub fn supported_locales(&self) -> Vec<String> {
        self.target_locales.keys().cloned().collect()
    }

    /// Checks the minimal validity invariant: a project must carry a
    /// source locale.
    pub fn validate(&self) -> Result<(), Error> {
        if self.source_locale.trim().is_empty() {
            return Err(Error::InvalidProject(format!(
                "project `{}` has no source locale",
                self.name
            )));
        }
        Ok(())
    }
}

/// One translatable unit file (conceptually one source document,
/// e.g. "Example.json"), reconstructed from XLIFF on import or authored by
/// a project definition for export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource {
    /// Basename used to reconstruct the `original` filename.
    pub title: String,

    /// File-level attributes; message-level attributes inherit from these.
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,

    /// Resource-level translator notes, in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub notes: Vec<Note>,

    /// Ordered list of all messages in this resource.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Owning project. Many resources may share one project; the project
    /// outlives every resource built from it.
    #[serde(skip)]
    pub project: Arc<Project>,
}

impl Resource {
    pub fn new(title: impl Into<String>, project: Arc<Project>) -> Self {
        Resource {
            title: title.into(),
            attributes: Attributes::default(),
            notes: Vec::new(),
            messages: Vec::new(),
            project,
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn find_message(&self, key: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.key == key)
    }

    /// Name of the owning project; the grouping key.
    pub fn project_name(&self) -> &str {
        &self.project.name
    }

    /// The resource language, or empty when unset.
    pub fn language(&self) -> &str {
        self.attributes.lang.as_deref().unwrap_or("")
    }

    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.language().parse().ok()
    }

    /// Check if this resource has a specific language (primary subtag match).
    pub fn has_language(&self, lang: &str) -> bool {
        match (
            self.parse_language_identifier(),
            lang.parse::<LanguageIdentifier>(),
        ) {
            (Some(lang_id), Ok(target_lang)) => lang_id.language == target_lang.language,
            _ => false,
        }
    }
}

/// One translatable string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    /// Stable identifier; maps to the XLIFF unit `name`/`id`. Falls back
    /// to the element id when no explicit name is present on import.
    pub key: String,

    /// The text.
    pub value: String,

    /// Overrides of the resource-level attributes. Only values that differ
    /// from the inherited ones are ever materialized here.
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,

    /// Message-level translator notes, in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Message {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Message {
            key: key.into(),
            value: value.into(),
            attributes: Attributes::default(),
            notes: Vec::new(),
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Message {{ key: {}, value: {} }}", self.key, self.value)
    }
}

/// Shared attribute shape used at both the resource and the message level.
///
/// `None` means "unset" at the resource level and "inherited" at the
/// message level; unset fields never appear in serialized output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attributes {
    /// BCP-47 language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub lang: Option<String>,

    /// Writing direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub dir: Option<Direction>,

    /// Do-not-translate flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub dnt: Option<bool>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.lang.is_none() && self.dir.is_none() && self.dnt.is_none()
    }

    /// The language code, or empty when unset.
    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or("")
    }

    /// Whether the carrier is excluded from translation. Absence defaults
    /// to translatable.
    pub fn is_do_not_translate(&self) -> bool {
        self.dnt.unwrap_or(false)
    }
}

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Derives the direction from the lower-cased primary language subtag:
    /// `ar` and `he` are right-to-left, everything else left-to-right.
    pub fn from_language(lang: &str) -> Self {
        let primary = lang
            .parse::<LanguageIdentifier>()
            .map(|id| id.language.as_str().to_ascii_lowercase())
            .unwrap_or_else(|_| {
                lang.split(['-', '_'])
                    .next()
                    .unwrap_or("")
                    .to_ascii_lowercase()
            });
        match primary.as_str() {
            "ar" | "he" => Direction::Rtl,
            _ => Direction::Ltr,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ltr" => Ok(Direction::Ltr),
            "rtl" => Ok(Direction::Rtl),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A translator note attached to a resource or a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Note {
    /// Upper-cased category label.
    #[serde(rename = "type")]
    pub note_type: NoteType,

    /// Free text.
    pub content: String,
}

impl Note {
    pub fn new(note_type: NoteType, content: impl Into<String>) -> Self {
        Note {
            note_type,
            content: content.into(),
        }
    }
}

/// Note category. Known XLIFF categories map to dedicated variants; any
/// other category is preserved upper-cased in `Custom`, including
/// `x-`-prefixed ones (as `X-...`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(into = "String", from = "String")]
pub enum NoteType {
    Description,
    Authorship,
    Parameters,
    Context,
    Comment,
    Custom(String),
}

impl NoteType {
    /// Maps an XLIFF note category (case-insensitive) to a note type.
    /// An empty category falls back to [`NoteType::Comment`].
    pub fn from_category(category: &str) -> Self {
        match category.to_ascii_lowercase().as_str() {
            "description" => NoteType::Description,
            "authorship" => NoteType::Authorship,
            "parameters" => NoteType::Parameters,
            "context" => NoteType::Context,
            "comment" | "" => NoteType::Comment,
            _ => NoteType::Custom(category.to_uppercase()),
        }
    }

    /// The XLIFF category emitted on export: the lower-cased form of the
    /// label. Inverse of [`NoteType::from_category`] for every category,
    /// including custom ones.
    pub fn category(&self) -> String {
        self.label().to_lowercase()
    }

    /// The upper-cased category label.
    pub fn label(&self) -> &str {
        match self {
            NoteType::Description => "DESCRIPTION",
            NoteType::Authorship => "AUTHORSHIP",
            NoteType::Parameters => "PARAMETERS",
            NoteType::Context => "CONTEXT",
            NoteType::Comment => "COMMENT",
            NoteType::Custom(label) => label,
        }
    }
}

impl From<String> for NoteType {
    fn from(label: String) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "DESCRIPTION" => NoteType::Description,
            "AUTHORSHIP" => NoteType::Authorship,
            "PARAMETERS" => NoteType::Parameters,
            "CONTEXT" => NoteType::Context,
            "COMMENT" => NoteType::Comment,
            _ => NoteType::Custom(label.to_uppercase()),
        }
    }
}

impl From<NoteType> for String {
    fn from(note_type: NoteType) -> Self {
        note_type.label().to_string()
    }
}

impl Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_supported_locales() {
        let project = Project::new("App", "en")
            .with_target_locale("zh", &["zh", "zh-CN"])
            .with_target_locale("ja", &[]);
        assert_eq!(project.supported_locales(), vec!["ja", "zh"]);
        // Empty alias list defaults to the locale itself.
        assert_eq!(project.target_locales["ja"], vec!["ja"]);
    }

    #[test]
    fn test_project_validate() {
        assert!(Project::new("App", "en").validate().is_ok());
        assert!(Project::new("App", " ").validate().is_err());
    }

    #[test]
    fn test_resource_find_message() {
        let mut resource = Resource::new("Example", Arc::new(Project::new("App", "en")));
        resource.add_message(Message::new("hello", "你好"));
        assert_eq!(resource.find_message("hello").unwrap().value, "你好");
        assert!(resource.find_message("missing").is_none());
        assert_eq!(resource.project_name(), "App");
    }

    #[test]
    fn test_resource_has_language() {
        let mut resource = Resource::new("Example", Arc::default());
        resource.attributes.lang = Some("zh-CN".to_string());
        assert!(resource.has_language("zh"));
        assert!(resource.has_language("zh-CN"));
        assert!(!resource.has_language("fr"));
    }

    #[test]
    fn test_direction_from_language() {
        assert_eq!(Direction::from_language("ar"), Direction::Rtl);
        assert_eq!(Direction::from_language("he-IL"), Direction::Rtl);
        assert_eq!(Direction::from_language("AR-EG"), Direction::Rtl);
        assert_eq!(Direction::from_language("en"), Direction::Ltr);
        assert_eq!(Direction::from_language(""), Direction::Ltr);
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!(Direction::from_str("rtl").unwrap(), Direction::Rtl);
        assert_eq!(Direction::from_str("LTR").unwrap(), Direction::Ltr);
        assert!(Direction::from_str("sideways").is_err());
    }

    #[test]
    fn test_note_type_from_category() {
        assert_eq!(NoteType::from_category("description"), NoteType::Description);
        assert_eq!(NoteType::from_category("COMMENT"), NoteType::Comment);
        assert_eq!(NoteType::from_category(""), NoteType::Comment);
        assert_eq!(
            NoteType::from_category("x-meaning"),
            NoteType::Custom("X-MEANING".to_string())
        );
        assert_eq!(
            NoteType::from_category("priority"),
            NoteType::Custom("PRIORITY".to_string())
        );
    }

    #[test]
    fn test_note_type_category_round_trip() {
        for category in ["description", "authorship", "parameters", "context", "comment"] {
            assert_eq!(NoteType::from_category(category).category(), category);
        }
        // Custom categories round-trip through the upper-cased label.
        assert_eq!(NoteType::from_category("x-meaning").category(), "x-meaning");
        assert_eq!(NoteType::from_category("priority").category(), "priority");
    }

    #[test]
    fn test_note_type_json_label() {
        let note = Note::new(NoteType::Description, "Greeting shown at launch");
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(
            json,
            r#"{"type":"DESCRIPTION","content":"Greeting shown at launch"}"#
        );
        let parsed: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, note);
    }

    #[test]
    fn test_attributes_minimal_serialization() {
        // A message with no overrides serializes without an attributes key.
        let message = Message::new("hello", "Hello");
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"key":"hello","value":"Hello"}"#);

        let mut flagged = Message::new("legal", "©");
        flagged.attributes.dnt = Some(true);
        let json = serde_json::to_string(&flagged).unwrap();
        assert!(json.contains(r#""dnt":true"#));
        assert!(!json.contains("lang"));
    }

    #[test]
    fn test_attributes_accessors() {
        let attributes = Attributes::default();
        assert!(attributes.is_empty());
        assert_eq!(attributes.lang(), "");
        assert!(!attributes.is_do_not_translate());

        let attributes = Attributes {
            lang: Some("ar".to_string()),
            dir: Some(Direction::Rtl),
            dnt: Some(true),
        };
        assert!(!attributes.is_empty());
        assert_eq!(attributes.lang(), "ar");
        assert!(attributes.is_do_not_translate());
    }

    #[test]
    fn test_resource_parser_trait() {
        let project = Arc::new(Project::new("App", "en"));
        let mut resource = Resource::new("Example", project);
        resource.attributes.lang = Some("zh".to_string());
        resource.add_message(Message::new("hello", "你好"));
        let resources = vec![resource];

        let mut writer = Vec::new();
        resources.to_writer(&mut writer).unwrap();

        let reader = std::io::Cursor::new(writer);
        let parsed = Vec::<Resource>::from_reader(reader).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Example");
        assert_eq!(parsed[0].language(), "zh");
        assert_eq!(parsed[0].messages[0].value, "你好");
        // The project back-reference is not part of the JSON interchange.
        assert_eq!(parsed[0].project_name(), "");
    }
}
