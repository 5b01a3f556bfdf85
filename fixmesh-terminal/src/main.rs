//! fixmesh Terminal Viewer
//!
//! Spins a fixed-point model in front of a reference camera and draws its
//! visible faces and center point as ASCII.
//!
//! Usage: fixmesh-terminal [MODEL] [--scale N] [--distance N] [--resizable]
//!
//! Logs go to stderr; redirect them (`2>viewer.log`) to keep the screen clean.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use fixmesh_core::{MeshRecord, ModelGeometry};
use fixmesh_terminal::{TerminalApp, ViewerConfig};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "fixmesh-terminal")]
#[command(author, version, about = "Terminal viewer for fixed-point models", long_about = None)]
struct Cli {
    /// Plain-text mesh record to load (defaults to a cube)
    model: Option<PathBuf>,

    /// Cube half-size in model units when no model file is given
    #[arg(long, default_value_t = 64)]
    scale: i32,

    /// Camera distance from the entity in model units
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(i32).range(1..))]
    distance: i32,

    /// Start in the resizable (full canvas) viewport layout
    #[arg(long)]
    resizable: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn load_record(cli: &Cli) -> io::Result<MeshRecord> {
    let Some(path) = &cli.model else {
        return Ok(MeshRecord::cube(cli.scale));
    };

    info!(path = %path.display(), "loading mesh record");
    let text = fs::read_to_string(path).map_err(|e| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("Failed to read {}: {}", path.display(), e),
        )
    })?;
    MeshRecord::parse(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();

    let record = load_record(&cli)?;
    let model = ModelGeometry::from_record(&record)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    info!(
        name = record.name.as_deref().unwrap_or("unnamed"),
        vertices = model.vertex_count(),
        faces = model.face_count(),
        "model ready"
    );

    let config = ViewerConfig {
        distance: cli.distance,
        resizable: cli.resizable,
    };
    let mut app = TerminalApp::new(model, config)?;
    app.run()?;

    info!("viewer closed");
    Ok(())
}
