//! iconpack-renderer: styled icon pack export
//!
//! This crate fetches vector icons from remote collections, repaints them in
//! a single uniform style and exports them as fixed-size PNGs packaged with a
//! `pack.json` manifest in a zip archive.
//!
//! # Example
//!
//! ```
//! use iconpack_renderer::{
//!     BackgroundShape, Compositor, DrawingConvention, Effect, IconId, StyleConfig,
//! };
//!
//! let style = StyleConfig::default()
//!     .with_foreground("#ffffff")
//!     .with_background("#0f172a")
//!     .with_shape(BackgroundShape::Circle)
//!     .with_effect(Effect::Glow);
//! let compositor = Compositor::new(style).unwrap();
//!
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor"><circle cx="12" cy="12" r="9"/></svg>"#;
//! let id: IconId = "lucide:circle".parse().unwrap();
//! let icon = compositor.render(&id, svg, Some(DrawingConvention::Stroke)).unwrap();
//!
//! assert_eq!(icon.file_name(), "lucide-circle.png");
//! ```
//!
//! # Batch export
//!
//! [`PackExporter`] drives a whole selection through the same pipeline,
//! backed by an [`IconSource`] that caches provider responses for 24 hours.
//!
//! ```
//! use iconpack_renderer::{
//!     preview_manifest, ExportRequest, IconSource, PackExporter, ResourceCache,
//!     StaticProvider, StyleConfig,
//! };
//!
//! let provider = StaticProvider::new()
//!     .with_icon("mdi", "play", r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M8 5v14l11-7z"/></svg>"#);
//! let mut exporter = PackExporter::new(IconSource::new(provider, ResourceCache::in_memory()));
//!
//! let ids = ["mdi:play"];
//! println!("{}", preview_manifest("Media", &ids).unwrap());
//!
//! let pack = exporter
//!     .export(&ExportRequest::new("Media", ids, StyleConfig::default()), None)
//!     .unwrap();
//! assert_eq!(pack.file_name, "Media.zip");
//! ```

pub mod cache;
pub mod compositor;
pub mod curated;
mod error;
mod export;
mod icon;
pub mod library;
mod manifest;
mod normalize;
mod provider;
mod style;

pub use cache::{
    CacheKey, Clock, FileStore, KeyValueStore, ManualClock, MemoryStore, ResourceCache, SystemClock,
};
pub use compositor::{Compositor, Layout};
pub use curated::CuratedIcon;
pub use error::{
    ExportError, FetchError, IconError, IconIdError, RenderError, StorageError, StyleError,
};
pub use export::{
    pack_file_name, DirectoryDelivery, ExportRequest, ExportedPack, PackDelivery, PackExporter,
};
pub use icon::{join_icon_id, normalize_icon_name, split_icon_id, IconId, RenderedIcon};
pub use library::{DrawingConvention, Library, LIBRARIES};
pub use manifest::{preview_manifest, ManifestEntry, PackManifest, DEFAULT_PACK_NAME};
pub use normalize::normalize_svg;
pub use provider::{IconProvider, IconSource, StaticProvider};
pub use style::{BackgroundShape, Color, Effect, StyleConfig, DEFAULT_ICON_SIZE};

#[cfg(feature = "http")]
pub use provider::IconifyProvider;
