//! Static registry of supported icon collections.
//!
//! Each collection declares the drawing convention its icons follow, which
//! decides how the normalizer repaints them and whether a stroke width
//! setting has any visible effect.

use serde::{Deserialize, Serialize};

/// How a collection's icons are primarily drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawingConvention {
    /// Outline icons drawn with strokes (Lucide, Tabler).
    Stroke,
    /// Solid icons drawn with filled shapes (Material, MDI).
    Fill,
    /// Collections mixing both styles.
    Mixed,
}

/// Descriptor for one icon collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Library {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Prefix used in provider requests and icon identifiers.
    pub prefix: &'static str,
    pub convention: DrawingConvention,
    /// Whether the stroke width setting is meaningful for this collection.
    pub supports_stroke: bool,
    pub supports_current_color: bool,
}

const fn library(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    prefix: &'static str,
    convention: DrawingConvention,
    supports_stroke: bool,
) -> Library {
    Library {
        id,
        name,
        description,
        prefix,
        convention,
        supports_stroke,
        supports_current_color: true,
    }
}

use DrawingConvention::{Fill, Mixed, Stroke};

/// Every collection known to the exporter.
pub static LIBRARIES: &[Library] = &[
    library("lucide", "Lucide", "Beautiful & consistent icons", "lucide", Stroke, true),
    library(
        "material-symbols",
        "Material Symbols",
        "Google's Material Design icons",
        "material-symbols",
        Fill,
        false,
    ),
    library("heroicons", "Heroicons", "Tailwind Labs icon set", "heroicons", Mixed, true),
    library("tabler", "Tabler Icons", "Over 4,900 pixel-perfect icons", "tabler", Stroke, true),
    library("phosphor", "Phosphor", "Flexible icon family", "ph", Fill, false),
    library("carbon", "Carbon", "IBM's design system icons", "carbon", Fill, false),
    library("iconoir", "Iconoir", "Simple and definitive", "iconoir", Stroke, true),
    library("solar", "Solar", "Bold, broken, line, outline styles", "solar", Mixed, false),
    library("mingcute", "MingCute", "Carefully crafted icons", "mingcute", Fill, false),
    library("fluent", "Fluent", "Microsoft Fluent design", "fluent", Fill, false),
    library(
        "mdi",
        "Material Design Icons",
        "Community-maintained Material icons",
        "mdi",
        Fill,
        false,
    ),
    library(
        "simple-icons",
        "Simple Icons",
        "Brand icons for popular services",
        "simple-icons",
        Fill,
        false,
    ),
];

/// Looks up a collection by its registry id.
pub fn find_by_id(id: &str) -> Option<&'static Library> {
    LIBRARIES.iter().find(|lib| lib.id == id)
}

/// Looks up a collection by the prefix used in icon identifiers.
pub fn find_by_prefix(prefix: &str) -> Option<&'static Library> {
    LIBRARIES.iter().find(|lib| lib.prefix == prefix)
}

/// Drawing convention for a prefix, or `None` when the collection is unknown.
pub fn convention_for(prefix: &str) -> Option<DrawingConvention> {
    find_by_prefix(prefix).map(|lib| lib.convention)
}

/// Case-insensitive search over collection names and descriptions.
pub fn search(query: &str) -> impl Iterator<Item = &'static Library> {
    let query = query.to_lowercase();
    LIBRARIES.iter().filter(move |lib| {
        lib.name.to_lowercase().contains(&query) || lib.description.to_lowercase().contains(&query)
    })
}
