//! Pack manifest (`pack.json`) describing an exported icon pack.
//!
//! The manifest is derived data: it is rebuilt from the selection on every
//! export and never stored on its own.
//!
//! ```json
//! {
//!   "name": "Streaming",
//!   "version": "1.0.0",
//!   "author": "User",
//!   "description": "Generated icon pack with 1 icons",
//!   "icons": [{ "name": "twitch", "file": "mdi-twitch.png" }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::icon::IconId;

/// Pack name used when the user leaves it blank.
pub const DEFAULT_PACK_NAME: &str = "My Icon Pack";

pub const PACK_VERSION: &str = "1.0.0";

pub const PACK_AUTHOR: &str = "User";

/// Archive entry holding the serialized manifest.
pub const MANIFEST_FILE_NAME: &str = "pack.json";

/// One exported icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ManifestEntry {
    /// Normalized icon name.
    pub name: String,
    /// Archive entry name of the icon's PNG.
    pub file: String,
}

impl From<&IconId> for ManifestEntry {
    fn from(id: &IconId) -> Self {
        Self {
            name: id.normalized_name(),
            file: id.file_name(),
        }
    }
}

/// Metadata written to `pack.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct PackManifest {
    pub name: String,
    pub version: String,
    pub author: String,
    pub description: String,
    /// One entry per selected icon, in selection order. Duplicates are kept.
    pub icons: Vec<ManifestEntry>,
}

impl PackManifest {
    /// Builds the manifest for `icons` in selection order.
    pub fn build(pack_name: &str, icons: &[IconId]) -> Self {
        let name = if pack_name.is_empty() {
            DEFAULT_PACK_NAME
        } else {
            pack_name
        };
        Self {
            name: name.to_string(),
            version: PACK_VERSION.to_string(),
            author: PACK_AUTHOR.to_string(),
            description: format!("Generated icon pack with {} icons", icons.len()),
            icons: icons.iter().map(ManifestEntry::from).collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Pretty-printed manifest for a selection, without rendering anything.
pub fn preview_manifest<S: AsRef<str>>(pack_name: &str, icon_ids: &[S]) -> Result<String, ExportError> {
    let ids = icon_ids
        .iter()
        .map(|id| IconId::parse(id.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PackManifest::build(pack_name, &ids).to_json_pretty()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicates_are_kept_and_blank_name_falls_back() {
        let home = IconId::new("lucide", "home");
        let manifest = PackManifest::build("", &[home.clone(), home]);

        let entry = ManifestEntry {
            name: "home".into(),
            file: "lucide-home.png".into(),
        };
        assert_eq!(
            manifest,
            PackManifest {
                name: "My Icon Pack".into(),
                version: "1.0.0".into(),
                author: "User".into(),
                description: "Generated icon pack with 2 icons".into(),
                icons: vec![entry.clone(), entry],
            }
        );
    }

    #[test]
    fn entries_follow_selection_order_with_normalized_names() {
        let ids = [
            IconId::new("mdi", "Skip Forward"),
            IconId::new("lucide", "arrow-left"),
        ];
        let manifest = PackManifest::build("Media", &ids);
        assert_eq!(manifest.name, "Media");
        assert_eq!(
            manifest.icons,
            vec![
                ManifestEntry {
                    name: "skip-forward".into(),
                    file: "mdi-skip-forward.png".into(),
                },
                ManifestEntry {
                    name: "arrow-left".into(),
                    file: "lucide-arrow-left.png".into(),
                },
            ]
        );
    }

    #[test]
    fn preview_is_pretty_json_with_fixed_key_order() {
        let json = preview_manifest("Pack", &["ph:house"]).unwrap();
        let expected = r#"{
  "name": "Pack",
  "version": "1.0.0",
  "author": "User",
  "description": "Generated icon pack with 1 icons",
  "icons": [
    {
      "name": "house",
      "file": "ph-house.png"
    }
  ]
}"#;
        assert_eq!(json, expected);
        assert_eq!(
            PackManifest::from_json(&json).unwrap(),
            PackManifest::build("Pack", &[IconId::new("ph", "house")])
        );
    }

    #[test]
    fn preview_rejects_malformed_ids() {
        let err = preview_manifest("Pack", &["house"]).unwrap_err();
        assert!(matches!(err, ExportError::InvalidId(_)));
    }

    #[test]
    fn empty_selection_previews_an_empty_pack() {
        let json = preview_manifest::<&str>("", &[]).unwrap();
        let manifest = PackManifest::from_json(&json).unwrap();
        assert!(manifest.icons.is_empty());
        assert_eq!(manifest.description, "Generated icon pack with 0 icons");
    }
}
