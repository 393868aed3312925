//! Survex-Codec (`.svx`): Import und Export.
//!
//! Datenzeilen haben die Form `von  nach  Distanz  Azimut  Neigung`; alles nach
//! dem ersten `;` ist Kommentar. Aus wiederholten Messungen zusammengefasste
//! Messzüge tragen ihre Einzelmessungen als `{from: d a i, ...}` im Kommentar.

mod parser;
mod writer;

pub use parser::{parse_any_promoted_legs, parse_survex};
pub use writer::write_survex;

use super::{Exporter, ImportError, Importer};
use crate::core::{Sketch, Survey};
use crate::graph::Projection2D;

/// Importer und Exporter für Survex-Dateien
#[derive(Debug, Clone, Copy, Default)]
pub struct SurvexCodec;

impl Importer for SurvexCodec {
    fn can_handle(&self, file_name: &str) -> bool {
        file_name.to_ascii_lowercase().ends_with(".svx")
    }

    fn import_from_text(&self, name: &str, text: &str) -> Result<Survey, ImportError> {
        parse_survex(name, text)
    }
}

impl Exporter for SurvexCodec {
    fn file_extension(&self) -> &'static str {
        "svx"
    }

    /// Skizzen und Projektion spielen für Survex keine Rolle.
    fn export_to_text(
        &self,
        survey: &Survey,
        _sketch: Option<&Sketch>,
        _projection: Option<Projection2D>,
    ) -> String {
        write_survex(survey)
    }
}

#[cfg(test)]
mod tests;
