//! Batch export of styled icon packs.
//!
//! [`PackExporter`] drives a selection through fetch, normalization and
//! composition one icon at a time, then packages the PNGs and `pack.json`
//! into a zip archive. Exports are all-or-nothing: the first failing icon
//! aborts the run and nothing is packaged.
//!
//! # Example
//!
//! ```
//! use iconpack_renderer::{
//!     ExportRequest, IconSource, PackExporter, ResourceCache, StaticProvider, StyleConfig,
//! };
//!
//! let provider = StaticProvider::new().with_icon(
//!     "lucide",
//!     "home",
//!     r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M3 10 12 3l9 7v11H3z"/></svg>"#,
//! );
//! let mut exporter = PackExporter::new(IconSource::new(provider, ResourceCache::in_memory()));
//!
//! let request = ExportRequest::new("Home", ["lucide:home"], StyleConfig::default());
//! let mut report = |current: usize, total: usize| println!("Exporting {current} of {total} icons...");
//! let pack = exporter.export(&request, Some(&mut report)).unwrap();
//!
//! assert_eq!(pack.file_name, "Home.zip");
//! assert_eq!(pack.manifest.icons[0].file, "lucide-home.png");
//! ```

use std::fs;
use std::io::{Cursor, ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::compositor::Compositor;
use crate::error::{ExportError, IconError};
use crate::icon::{IconId, RenderedIcon};
use crate::library::convention_for;
use crate::manifest::{MANIFEST_FILE_NAME, PackManifest};
use crate::provider::IconSource;
use crate::style::StyleConfig;

/// File name stem used when the pack name is blank.
pub const DEFAULT_ARCHIVE_STEM: &str = "icon-pack";

/// Suggested file name for a pack's archive.
pub fn pack_file_name(pack_name: &str) -> String {
    let stem = if pack_name.is_empty() {
        DEFAULT_ARCHIVE_STEM
    } else {
        pack_name
    };
    format!("{stem}.zip")
}

// ============================================================================
// Request / Result
// ============================================================================

/// What to export and how it should look.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub pack_name: String,
    /// Compound icon ids in selection order. Duplicates are allowed.
    pub icon_ids: Vec<String>,
    pub style: StyleConfig,
}

impl ExportRequest {
    pub fn new<I, S>(pack_name: impl Into<String>, icon_ids: I, style: StyleConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pack_name: pack_name.into(),
            icon_ids: icon_ids.into_iter().map(Into::into).collect(),
            style,
        }
    }
}

/// A finished pack.
#[derive(Debug, Clone)]
pub struct ExportedPack {
    /// Suggested archive file name, `{pack name}.zip`.
    pub file_name: String,
    /// The zip archive bytes.
    pub archive: Vec<u8>,
    pub manifest: PackManifest,
}

// ============================================================================
// Archive
// ============================================================================

/// Ordered set of archive entries keyed by file name.
///
/// Adding a file name twice keeps its first position and replaces its
/// contents.
#[derive(Debug, Default)]
struct PackArchive {
    entries: Vec<(String, Vec<u8>)>,
}

impl PackArchive {
    fn insert(&mut self, file_name: String, bytes: Vec<u8>) {
        match self.entries.iter_mut().find(|(name, _)| *name == file_name) {
            Some(entry) => entry.1 = bytes,
            None => self.entries.push((file_name, bytes)),
        }
    }

    /// Writes the icons followed by `pack.json`.
    fn finish(self, manifest_json: &str) -> Result<Vec<u8>, ExportError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for (name, bytes) in &self.entries {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(bytes).map_err(zip::result::ZipError::from)?;
        }
        zip.start_file(MANIFEST_FILE_NAME, options)?;
        zip.write_all(manifest_json.as_bytes())
            .map_err(zip::result::ZipError::from)?;

        Ok(zip.finish()?.into_inner())
    }
}

// ============================================================================
// Delivery
// ============================================================================

/// Receives finished archives, e.g. to save them.
pub trait PackDelivery {
    fn deliver(&mut self, archive: &[u8], file_name: &str) -> std::io::Result<()>;
}

/// Saves archives into a directory, creating it if needed.
///
/// The file name must be a single plain path component; names such as
/// `../pack.zip` or `a/b.zip` are rejected with [`ErrorKind::InvalidInput`].
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PackDelivery for DirectoryDelivery {
    fn deliver(&mut self, archive: &[u8], file_name: &str) -> std::io::Result<()> {
        let mut components = Path::new(file_name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("`{file_name}` is not a plain file name"),
            ));
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, archive)?;
        log::info!("saved {}", path.display());
        Ok(())
    }
}

// ============================================================================
// Exporter
// ============================================================================

/// Runs export requests against an [`IconSource`].
pub struct PackExporter {
    source: IconSource,
}

impl PackExporter {
    pub fn new(source: IconSource) -> Self {
        Self { source }
    }

    pub fn source_mut(&mut self) -> &mut IconSource {
        &mut self.source
    }

    /// Exports every icon of `request` in selection order.
    ///
    /// `progress` is called with `(position, total)` right before each icon
    /// is processed, positions starting at 1. The style is validated and an
    /// empty selection rejected before any callback.
    pub fn export(
        &mut self,
        request: &ExportRequest,
        mut progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Result<ExportedPack, ExportError> {
        let compositor = Compositor::new(request.style.clone())?;
        if request.icon_ids.is_empty() {
            return Err(ExportError::EmptySelection);
        }

        let total = request.icon_ids.len();
        let mut ids = Vec::with_capacity(total);
        let mut archive = PackArchive::default();

        for (index, raw_id) in request.icon_ids.iter().enumerate() {
            if let Some(report) = progress.as_deref_mut() {
                report(index + 1, total);
            }
            log::debug!("exporting {raw_id} ({} of {total})", index + 1);

            let icon = self.render_one(&compositor, raw_id).map_err(|source| {
                log::warn!("export aborted at {raw_id}: {source}");
                ExportError::Icon {
                    id: raw_id.clone(),
                    source,
                }
            })?;
            archive.insert(icon.file_name(), icon.png);
            ids.push(icon.id);
        }

        let manifest = PackManifest::build(&request.pack_name, &ids);
        let archive = archive.finish(&manifest.to_json_pretty()?)?;
        log::info!(
            "exported {total} icons into {} ({} bytes)",
            pack_file_name(&request.pack_name),
            archive.len()
        );

        Ok(ExportedPack {
            file_name: pack_file_name(&request.pack_name),
            archive,
            manifest,
        })
    }

    /// Exports `request` and hands the archive to `delivery`.
    pub fn export_and_deliver(
        &mut self,
        request: &ExportRequest,
        progress: Option<&mut dyn FnMut(usize, usize)>,
        delivery: &mut dyn PackDelivery,
    ) -> Result<ExportedPack, ExportError> {
        let pack = self.export(request, progress)?;
        delivery
            .deliver(&pack.archive, &pack.file_name)
            .map_err(|source| ExportError::Delivery {
                file_name: pack.file_name.clone(),
                source,
            })?;
        Ok(pack)
    }

    fn render_one(&mut self, compositor: &Compositor, raw_id: &str) -> Result<RenderedIcon, IconError> {
        let id = IconId::parse(raw_id)?;
        let convention = convention_for(id.collection());
        let markup = self.source.icon_markup(id.collection(), id.name())?;
        Ok(compositor.render(&id, &markup, convention)?)
    }
}
