//! XLIFF document formats supported by xliffcodec.
//!
//! This module re-exports the entry points of each format and provides the
//! [`XliffVersion`] enum for generic version handling across the crate.

pub mod xliff12;
pub mod xliff2;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::Error;

/// The two incompatible XLIFF major versions handled by this crate:
/// 1.2 for monolingual source-only export, 2.0 for bilingual interchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XliffVersion {
    V1_2,
    V2_0,
}

impl XliffVersion {
    /// Returns the version string emitted on the `<xliff>` element.
    pub fn as_str(self) -> &'static str {
        match self {
            XliffVersion::V1_2 => "1.2",
            XliffVersion::V2_0 => "2.0",
        }
    }

    /// Returns the typical file extension for this format.
    pub fn extension(self) -> &'static str {
        "xliff"
    }
}

impl Display for XliffVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "xliff-{}", self.as_str())
    }
}

/// Accepts the case-insensitive strings `"1.2"`, `"xliff-1.2"`, `"2.0"`,
/// and `"xliff-2.0"`. Returns [`Error::InvalidResource`] otherwise.
impl FromStr for XliffVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1.2" | "xliff-1.2" | "xliff12" => Ok(XliffVersion::V1_2),
            "2.0" | "xliff-2.0" | "xliff2" => Ok(XliffVersion::V2_0),
            other => Err(Error::InvalidResource(format!(
                "unknown XLIFF version `{}`",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_display() {
        assert_eq!(XliffVersion::V1_2.to_string(), "xliff-1.2");
        assert_eq!(XliffVersion::V2_0.to_string(), "xliff-2.0");
    }

    #[test]
    fn test_version_from_str() {
        assert_eq!(XliffVersion::from_str("2.0").unwrap(), XliffVersion::V2_0);
        assert_eq!(
            XliffVersion::from_str(" XLIFF-1.2 ").unwrap(),
            XliffVersion::V1_2
        );
        assert!(XliffVersion::from_str("3.0").is_err());
    }

    #[test]
    fn test_version_extension() {
        assert_eq!(XliffVersion::V2_0.extension(), "xliff");
    }
}
