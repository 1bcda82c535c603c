//! oma-geometry - CLI tool to export sensor geometry to OMA geometry files.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use oma_core::{
    extract_dxf_geometry, extract_model_geometry, quick_validate, write_geometry_files,
    CollisionPolicy, ExportConfig, ForceUnit, GeometryFile, SnapshotSession,
};

/// Export sensor geometry from DXF drawings or structural model snapshots.
#[derive(Parser, Debug)]
#[command(name = "oma-geometry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read lines and channel texts from a DXF drawing
    Dxf {
        /// Input DXF file path
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Read frames and channel loads from a structural model snapshot (JSON)
    Model {
        /// Input model snapshot path
        #[arg(short, long)]
        input: PathBuf,

        /// Unit in which channel loads are encoded
        #[arg(long, value_enum, default_value = "kn")]
        force_unit: ForceUnitArg,

        /// Keep model coordinates unrounded
        #[arg(long)]
        no_round: bool,

        /// Fail when two loads encode the same channel number
        #[arg(long)]
        strict_channels: bool,

        /// Point group whose loads are read
        #[arg(long, default_value = oma_core::config::ALL_GROUP)]
        load_group: String,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Output geometry file path (setup files get a `_setup_<n>` suffix)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Validate only, don't generate output
    #[arg(long, global = true)]
    validate: bool,

    /// Output debug information as JSON
    #[arg(long, global = true)]
    debug: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ForceUnitArg {
    /// kN (model units switched to kN-m-C while reading loads)
    Kn,
    /// N (loads read in the model's present units)
    N,
}

impl From<ForceUnitArg> for ForceUnit {
    fn from(arg: ForceUnitArg) -> Self {
        match arg {
            ForceUnitArg::Kn => ForceUnit::KiloNewton,
            ForceUnitArg::N => ForceUnit::Newton,
        }
    }
}

impl Command {
    fn input(&self) -> &Path {
        match self {
            Command::Dxf { input } | Command::Model { input, .. } => input,
        }
    }
}

/// Build the export configuration from the command-line flags.
fn export_config(command: &Command) -> ExportConfig {
    let mut config = ExportConfig::default();
    if let Command::Model {
        force_unit,
        no_round,
        strict_channels,
        load_group,
        ..
    } = command
    {
        config.force_unit = (*force_unit).into();
        config.round_coordinates = !no_round;
        if *strict_channels {
            config.collision_policy = CollisionPolicy::Reject;
        }
        config.load_group = load_group.clone();
    }
    config
}

/// Default output path: the input path with a `.txt` extension.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("txt")
}

/// Lines of the sensors block, for the log summary.
fn sensor_summary(file: &GeometryFile) -> String {
    file.dataset
        .channels
        .iter()
        .map(|c| {
            let symbol = c.symbol.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
            format!("{} {} {}", c.number, c.point, symbol)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.common.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let input = cli.command.input().to_path_buf();
    info!("Processing: {}", input.display());

    let config = export_config(&cli.command);
    let files = match &cli.command {
        Command::Dxf { .. } => extract_dxf_geometry(&input)
            .with_context(|| format!("Failed to read drawing {}", input.display()))?,
        Command::Model { .. } => {
            let mut session = SnapshotSession::open(&input)
                .with_context(|| format!("Failed to open model {}", input.display()))?;
            extract_model_geometry(&mut session, &config)
                .with_context(|| format!("Failed to read model {}", input.display()))?
        }
    };

    info!("Assembled {} geometry file(s)", files.len());
    for file in &files {
        debug!("Channels{}:\n{}", file.suffix(), sensor_summary(file));
    }

    // Validate
    quick_validate(&files).context("Validation failed")?;

    // Debug output
    if cli.common.debug {
        let json = serde_json::to_string_pretty(&files)?;
        println!("{}", json);
        return Ok(());
    }

    // Validate-only mode
    if cli.common.validate {
        info!("Validation passed");
        return Ok(());
    }

    // Write output
    let output_path = cli.common.output.unwrap_or_else(|| default_output(&input));

    let written = write_geometry_files(&files, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    for path in &written {
        info!("Generated: {}", path.display());
    }

    Ok(())
}
