//! Icon pack CLI
//!
//! Usage:
//!   iconpack export <IDS>... [--name NAME] [--style FILE] [--out DIR] [--cache-dir DIR]
//!   iconpack preview <IDS>... [--name NAME]
//!   iconpack render <ID> [--style FILE] [--out FILE]
//!   iconpack list <PREFIX>
//!   iconpack libraries
//!
//! Set `RUST_LOG=debug` for per-icon logging.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use iconpack_renderer::{
    Compositor, DirectoryDelivery, ExportRequest, FileStore, IconId, IconSource, IconifyProvider,
    LIBRARIES, PackExporter, ResourceCache, StyleConfig, library, preview_manifest,
};

#[derive(Parser)]
#[command(name = "iconpack")]
#[command(about = "Export styled icon packs from Iconify collections")]
struct Cli {
    /// Directory for cached icon data (in-memory cache if omitted)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Iconify API base URL
    #[arg(long, global = true, default_value = IconifyProvider::DEFAULT_BASE_URL)]
    api: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render icons and package them into a zip with pack.json
    Export {
        /// Icon ids such as `lucide:home`
        #[arg(required = true)]
        ids: Vec<String>,

        /// Pack name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Style configuration (JSON)
        #[arg(short, long)]
        style: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Print the manifest a selection would produce
    Preview {
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(short, long, default_value = "")]
        name: String,
    },

    /// Render a single icon to PNG
    Render {
        id: String,

        #[arg(short, long)]
        style: Option<PathBuf>,

        /// Output file (defaults to the icon's pack file name)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List the icon names of a collection
    List { prefix: String },

    /// Show the supported collections
    Libraries,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let source = || {
        let cache = match &cli.cache_dir {
            Some(dir) => ResourceCache::new(FileStore::new(dir)),
            None => ResourceCache::in_memory(),
        };
        IconSource::new(IconifyProvider::with_base_url(cli.api.as_str()), cache)
    };

    match &cli.command {
        Command::Export {
            ids,
            name,
            style,
            out,
        } => {
            let request = ExportRequest::new(name.as_str(), ids.iter().cloned(), load_style(style.as_deref())?);
            let mut exporter = PackExporter::new(source());
            let mut progress = |current: usize, total: usize| {
                eprintln!("Exporting {current} of {total} icons...");
            };
            let mut delivery = DirectoryDelivery::new(out);
            let pack = exporter.export_and_deliver(&request, Some(&mut progress), &mut delivery)?;
            println!("{}", out.join(&pack.file_name).display());
        }
        Command::Preview { ids, name } => {
            println!("{}", preview_manifest(name, ids)?);
        }
        Command::Render { id, style, out } => {
            let id = IconId::parse(id)?;
            let compositor = Compositor::new(load_style(style.as_deref())?)?;
            let markup = source().icon_markup(id.collection(), id.name())?;
            let icon = compositor.render(&id, &markup, library::convention_for(id.collection()))?;
            let path = out.clone().unwrap_or_else(|| PathBuf::from(icon.file_name()));
            fs::write(&path, &icon.png)?;
            println!("{}", path.display());
        }
        Command::List { prefix } => {
            for name in source().icon_names(prefix)? {
                println!("{name}");
            }
        }
        Command::Libraries => {
            for lib in LIBRARIES {
                println!(
                    "{:<18} {:<20} {:?}  {}",
                    lib.prefix, lib.name, lib.convention, lib.description
                );
            }
        }
    }
    Ok(())
}

fn load_style(path: Option<&Path>) -> Result<StyleConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read style '{}': {e}", path.display()))?;
            Ok(StyleConfig::from_json(&json)?)
        }
        None => Ok(StyleConfig::default()),
    }
}
