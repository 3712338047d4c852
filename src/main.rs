//! meshport - Import a model file and report its renderer-ready meshes
//!
//! Meshes are imported with the configured post-processing steps,
//! converted to the renderer's coordinate convention, and summarized.

mod settings;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use meshport_assets::{MeshAsset, Vertex};
use meshport_ffi::ProcessingFlags;

use settings::Settings;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "meshport", version, about = "Extract vertex buffers from 3D model files")]
struct Cli {
    /// Model file to import
    model: PathBuf,

    /// Post-processing step to request (repeatable); replaces the configured list
    #[arg(long = "flag", value_name = "NAME")]
    flags: Vec<String>,

    /// Extract every mesh instead of only the first
    #[arg(long)]
    all: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_settings: bool,
}

/// What gets reported per mesh
#[derive(Debug, Serialize)]
struct MeshSummary {
    name: String,
    vertices: usize,
    has_normals: bool,
    has_tex_coords: bool,
    upload_bytes: usize,
}

impl From<&MeshAsset> for MeshSummary {
    fn from(mesh: &MeshAsset) -> Self {
        let interleaved = mesh.vertices.interleave();
        Self {
            name: mesh.name.clone(),
            vertices: mesh.vertices.vertex_count(),
            has_normals: mesh.vertices.has_normals(),
            has_tex_coords: mesh.vertices.has_tex_coords(),
            upload_bytes: Vertex::as_bytes(&interleaved).len(),
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Settings::load();
    let mut settings = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&settings.logging.level);
    if let Err(e) = &loaded {
        warn!("Failed to load settings: {:#}, using defaults", e);
    }

    if !cli.flags.is_empty() {
        settings.import.flags = cli.flags.clone();
    }
    let flags = settings.import.processing_flags()?;

    if cli.save_settings {
        settings.save()?;
    }

    let root = settings
        .import
        .asset_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    info!(
        "Importing '{}' with steps: {}",
        cli.model.display(),
        flags.names().collect::<Vec<_>>().join(", ")
    );

    let meshes = load(&root, &cli.model, flags, cli.all)?;
    let summaries: Vec<MeshSummary> = meshes.iter().map(MeshSummary::from).collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for s in &summaries {
            println!(
                "{}: {} vertices, normals: {}, uvs: {}, {} bytes interleaved",
                s.name, s.vertices, s.has_normals, s.has_tex_coords, s.upload_bytes
            );
        }
    }

    Ok(())
}

#[cfg(feature = "assimp")]
fn load(root: &Path, model: &Path, flags: ProcessingFlags, all: bool) -> Result<Vec<MeshAsset>> {
    use anyhow::Context;
    use meshport_assets::AssetServer;
    use meshport_ffi::Assimp;

    let mut server = AssetServer::new(Assimp, root, flags);
    let handles = if all {
        server.load_meshes(model)?
    } else {
        vec![server.load_mesh(model)?]
    };

    handles
        .into_iter()
        .map(|h| server.get_mesh(h).cloned().context("mesh handle not loaded"))
        .collect()
}

#[cfg(not(feature = "assimp"))]
fn load(_root: &Path, _model: &Path, _flags: ProcessingFlags, _all: bool) -> Result<Vec<MeshAsset>> {
    anyhow::bail!("meshport was built without an importer; rebuild with `--features assimp`")
}
