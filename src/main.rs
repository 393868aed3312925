//! cave-survey: Konvertiert Höhlenvermessungen zwischen PocketTopo, Survex und XVI.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use cave_survey::{
    import_from_text, Exporter, Line2D, Projection2D, Space, SurvexCodec, Survey, ToolOptions,
    XviExporter,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "cave-survey")]
#[command(about = "Höhlenvermessungen importieren, projizieren und exportieren")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Liest eine PocketTopo- oder Survex-Datei und schreibt ein anderes Format
    Convert {
        /// Eingabedatei (.txt = PocketTopo, .svx = Survex)
        input: PathBuf,

        /// Zielformat
        #[arg(long = "to", value_enum)]
        to: OutputFormat,

        /// Ansicht für XVI- und JSON-Ausgabe
        #[arg(long, value_enum, default_value = "plan")]
        projection: ProjectionArg,

        /// Ausgabedatei (Standard: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Optionen-Datei (Standard: neben der Binary)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Schreibt eine Optionen-Datei mit Standardwerten
    InitConfig {
        /// Zielpfad (Standard: neben der Binary)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Survex,
    Xvi,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProjectionArg {
    Plan,
    Elevation,
}

impl From<ProjectionArg> for Projection2D {
    fn from(value: ProjectionArg) -> Self {
        match value {
            ProjectionArg::Plan => Projection2D::Plan,
            ProjectionArg::Elevation => Projection2D::ExtendedElevation,
        }
    }
}

fn main() -> anyhow::Result<()> {
    AppRunner::run(Cli::parse())
}

struct AppRunner;

impl AppRunner {
    fn run(cli: Cli) -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("cave-survey v{} startet...", env!("CARGO_PKG_VERSION"));

        match cli.command {
            Commands::Convert {
                input,
                to,
                projection,
                output,
                config,
            } => {
                let config_path = config.unwrap_or_else(ToolOptions::config_path);
                let options = ToolOptions::load_from_file(&config_path);
                let text = Self::convert(&input, to, projection.into(), &options)?;
                Self::write_output(output.as_deref(), &text)
            }
            Commands::InitConfig { path } => {
                let path = path.unwrap_or_else(ToolOptions::config_path);
                if path.exists() {
                    bail!("Optionen-Datei '{}' existiert bereits", path.display());
                }
                ToolOptions::default().save_to_file(&path)
            }
        }
    }

    fn convert(
        input: &Path,
        to: OutputFormat,
        projection: Projection2D,
        options: &ToolOptions,
    ) -> anyhow::Result<String> {
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("Datei '{}' konnte nicht gelesen werden", input.display()))?;
        let file_name = input
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("Ungueltiger Dateiname: '{}'", input.display()))?;
        let survey = import_from_text(file_name, &text)
            .with_context(|| format!("Import von '{}' fehlgeschlagen", input.display()))?;

        let output = match to {
            OutputFormat::Survex => SurvexCodec.export_to_text(&survey, None, None),
            OutputFormat::Xvi => {
                XviExporter::new(options.xvi.clone()).export_to_text(&survey, None, Some(projection))
            }
            OutputFormat::Json => {
                let space = projection.project(&survey);
                let dump = SpaceDump::new(&survey, projection, &space);
                serde_json::to_string_pretty(&dump).context("JSON-Ausgabe fehlgeschlagen")?
            }
        };
        Ok(output)
    }

    fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
        match output {
            Some(path) => {
                std::fs::write(path, text)
                    .with_context(|| format!("Datei '{}' nicht schreibbar", path.display()))?;
                log::info!("Ausgabe geschrieben nach: {}", path.display());
            }
            None => print!("{text}"),
        }
        Ok(())
    }
}

/// JSON-Abbild eines Space mit Stationsnamen statt Handles
#[derive(Debug, Serialize)]
struct SpaceDump<'a> {
    survey: &'a str,
    projection: Projection2D,
    stations: Vec<StationDump<'a>>,
    legs: Vec<Line2D>,
    splays: Vec<Line2D>,
}

#[derive(Debug, Serialize)]
struct StationDump<'a> {
    name: &'a str,
    x: f64,
    y: f64,
}

impl<'a> SpaceDump<'a> {
    fn new(survey: &'a Survey, projection: Projection2D, space: &Space) -> Self {
        Self {
            survey: survey.name(),
            projection,
            stations: space
                .station_map()
                .iter()
                .map(|(id, position)| StationDump {
                    name: survey.station_name(*id),
                    x: position.x,
                    y: position.y,
                })
                .collect(),
            legs: space.leg_map().values().copied().collect(),
            splays: space.splay_map().values().copied().collect(),
        }
    }
}
