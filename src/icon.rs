//! Icon identifiers and rendered icon output.
//!
//! Icons are addressed by a compound `collection:name` identifier. The
//! collection part is the provider prefix; the name may itself contain the
//! separator, so splitting only ever happens at the first one.

use std::fmt;
use std::str::FromStr;

use crate::error::IconIdError;

/// Separator between the collection prefix and the icon name.
pub const SEPARATOR: char = ':';

/// Builds a compound identifier from its parts.
pub fn join_icon_id(collection: &str, name: &str) -> String {
    format!("{collection}{SEPARATOR}{name}")
}

/// Splits an identifier at its first separator.
///
/// Everything after the first separator belongs to the name. Input without a
/// separator yields the whole string as the collection and an empty name; use
/// [`IconId::parse`] to reject such input.
pub fn split_icon_id(id: &str) -> (&str, &str) {
    id.split_once(SEPARATOR).unwrap_or((id, ""))
}

/// Lower-cases a display name and collapses whitespace runs into single
/// hyphens, producing a token safe for file names and provider URLs.
pub fn normalize_icon_name(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                token.push('-');
                in_whitespace = true;
            }
        } else {
            token.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    token
}

// ============================================================================
// IconId
// ============================================================================

/// A validated `collection:name` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconId {
    collection: String,
    name: String,
}

impl IconId {
    /// Creates an identifier from already separated parts.
    pub fn new(collection: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            name: name.into(),
        }
    }

    /// Parses a compound identifier, rejecting a missing separator or an
    /// empty collection or name.
    pub fn parse(id: &str) -> Result<Self, IconIdError> {
        let (collection, name) = id
            .split_once(SEPARATOR)
            .ok_or_else(|| IconIdError::MissingSeparator(id.to_string()))?;
        if collection.is_empty() {
            return Err(IconIdError::EmptyCollection(id.to_string()));
        }
        if name.is_empty() {
            return Err(IconIdError::EmptyName(id.to_string()));
        }
        Ok(Self::new(collection, name))
    }

    /// The collection prefix.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The icon name as given, before normalization.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn normalized_name(&self) -> String {
        normalize_icon_name(&self.name)
    }

    /// Archive entry name: `{collection}-{normalizedName}.png`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.png", self.collection, self.normalized_name())
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.collection, self.name)
    }
}

impl FromStr for IconId {
    type Err = IconIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// RenderedIcon
// ============================================================================

/// A rasterized icon ready for packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedIcon {
    pub id: IconId,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

impl RenderedIcon {
    pub fn new(id: IconId, png: Vec<u8>) -> Self {
        Self { id, png }
    }

    pub fn file_name(&self) -> String {
        self.id.file_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_inverts_join() {
        let cases = [
            ("lucide", "home"),
            ("mdi", "arrow:left"),
            ("ph", ""),
            ("", "orphan"),
            ("simple-icons", "a:b:c"),
        ];
        for (collection, name) in cases {
            assert_eq!(split_icon_id(&join_icon_id(collection, name)), (collection, name));
        }
    }

    #[test]
    fn split_without_separator_yields_empty_name() {
        assert_eq!(split_icon_id("lucide"), ("lucide", ""));
    }

    #[test]
    fn normalize_lowercases_and_hyphenates() {
        assert_eq!(normalize_icon_name("My Icon"), "my-icon");
        assert_eq!(normalize_icon_name("MY  ICON"), "my-icon");
        assert_eq!(normalize_icon_name("my-icon"), "my-icon");
        assert_eq!(normalize_icon_name("tab\t\nseparated"), "tab-separated");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["My Icon", "MY  ICON", "my-icon", " padded  name ", "Ünïcode Name"] {
            let once = normalize_icon_name(input);
            assert_eq!(normalize_icon_name(&once), once);
        }
    }

    #[test]
    fn parse_accepts_separator_in_name() {
        let id = IconId::parse("mdi:arrow:left").unwrap();
        assert_eq!(id.collection(), "mdi");
        assert_eq!(id.name(), "arrow:left");
        assert_eq!(id.to_string(), "mdi:arrow:left");
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        assert_eq!(
            IconId::parse("lucide"),
            Err(IconIdError::MissingSeparator("lucide".into()))
        );
        assert_eq!(
            IconId::parse("lucide:"),
            Err(IconIdError::EmptyName("lucide:".into()))
        );
        assert_eq!(
            IconId::parse(":home"),
            Err(IconIdError::EmptyCollection(":home".into()))
        );
    }

    #[test]
    fn file_name_uses_normalized_name() {
        let id: IconId = "lucide:Skip Forward".parse().unwrap();
        assert_eq!(id.file_name(), "lucide-skip-forward.png");
    }
}
