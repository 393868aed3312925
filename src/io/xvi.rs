//! Therion-XVI-Export (`.xvi`): projizierte Stationen, Messzüge und Skizzenlinien.
//!
//! Koordinaten werden unverändert aus der Projektion übernommen (Meter);
//! der Maßstab steht nur im `XVIgrid`-Feld.

use serde::{Deserialize, Serialize};

use super::text::format_number;
use super::Exporter;
use crate::core::{Coord2D, Sketch, Survey};
use crate::graph::Projection2D;

/// Standard-Auflösung der Zielzeichnung
pub const DEFAULT_DPI: f64 = 200.0;
/// Standard-Kartenmaßstab (1:100)
pub const DEFAULT_MAP_SCALE: f64 = 100.0;

const CENTIMETRES_PER_INCH: f64 = 2.54;

/// Einstellungen für den XVI-Export (`[xvi]` in der Konfiguration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XviOptions {
    /// Auflösung in Punkten pro Zoll
    pub dpi: f64,
    /// Kartenmaßstab 1:n
    pub map_scale: f64,
}

impl Default for XviOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            map_scale: DEFAULT_MAP_SCALE,
        }
    }
}

impl XviOptions {
    /// Pixel pro Meter: `100 · DPI / (2.54 · Maßstab)`
    pub fn scale(&self) -> f64 {
        100.0 * self.dpi / (CENTIMETRES_PER_INCH * self.map_scale)
    }
}

/// Exporter für Therion-XVI-Dateien
#[derive(Debug, Clone, Default)]
pub struct XviExporter {
    options: XviOptions,
}

impl XviExporter {
    pub fn new(options: XviOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &XviOptions {
        &self.options
    }
}

impl Exporter for XviExporter {
    fn file_extension(&self) -> &'static str {
        "xvi"
    }

    /// Ohne Angabe wird der Grundriss mit der zugehörigen Skizze exportiert.
    fn export_to_text(
        &self,
        survey: &Survey,
        sketch: Option<&Sketch>,
        projection: Option<Projection2D>,
    ) -> String {
        let projection = projection.unwrap_or_default();
        let sketch = sketch.unwrap_or_else(|| projection.sketch(survey));
        write_xvi(survey, sketch, projection, &self.options)
    }
}

/// Schreibt Stationen, Messzüge und Skizze einer Ansicht als XVI-Text.
///
/// Die Ausgabe ist für gleiche Eingaben bytegleich.
pub fn write_xvi(
    survey: &Survey,
    sketch: &Sketch,
    projection: Projection2D,
    options: &XviOptions,
) -> String {
    let space = projection.project(survey);
    let point = |coord: Coord2D| format!("{} {}", format_number(coord.x), format_number(coord.y));

    let mut output = String::new();
    output.push_str(&field("XVIgrids", "1 m"));

    let stations: Vec<String> = space
        .station_map()
        .iter()
        .map(|(id, position)| format!("{} {}", point(*position), survey.station_name(*id)))
        .collect();
    output.push_str(&multiline_field("XVIstations", &stations));

    let shots: Vec<String> = space
        .leg_map()
        .values()
        .chain(space.splay_map().values())
        .map(|line| format!("{} {}", point(line.start), point(line.end)))
        .collect();
    output.push_str(&multiline_field("XVIshots", &shots));

    let sketch_lines: Vec<String> = sketch
        .path_details()
        .iter()
        .map(|detail| {
            let mut line = detail.colour().name().to_string();
            for coord in detail.points() {
                line.push(' ');
                line.push_str(&point(*coord));
            }
            line
        })
        .collect();
    output.push_str(&multiline_field("XVIsketchlines", &sketch_lines));

    let grid = format!("-1 -1 -1 0 0 {} -1 -1", format_number(options.scale()));
    output.push_str(&field("XVIgrid", &grid));

    output
}

/// `set NAME {content}`
fn field(name: &str, content: &str) -> String {
    format!("set {name} {{{content}}}\n")
}

/// `set NAME {` + eine `\t {...}`-Zeile pro Eintrag + `}`
fn multiline_field(name: &str, entries: &[String]) -> String {
    let mut block = format!("set {name} {{\n");
    for entry in entries {
        block.push_str(&format!("\t {{{entry}}}\n"));
    }
    block.push_str("}\n");
    block
}
