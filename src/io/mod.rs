//! Import und Export von Fremdformaten.
//!
//! - PocketTopo-Text (`.txt`): Import inkl. Skizzen
//! - Survex (`.svx`): Import und Export
//! - Therion XVI (`.xvi`): Export einer Ansicht

pub mod error;
pub mod pocket_topo;
pub mod survex;
pub(crate) mod text;
pub mod xvi;

pub use error::ImportError;
pub use pocket_topo::PocketTopoImporter;
pub use survex::SurvexCodec;
pub use xvi::{XviExporter, XviOptions};

use std::path::Path;

use crate::core::{Sketch, Survey};
use crate::graph::Projection2D;

/// Liest ein Fremdformat in einen neuen Survey ein.
pub trait Importer {
    /// Erkennt das Format am Dateinamen.
    fn can_handle(&self, file_name: &str) -> bool;

    /// Baut einen Survey aus dem Dateiinhalt. Bei Fehlern entsteht kein Survey.
    fn import_from_text(&self, name: &str, text: &str) -> Result<Survey, ImportError>;
}

/// Schreibt einen Survey in ein Fremdformat.
pub trait Exporter {
    /// Dateiendung ohne Punkt
    fn file_extension(&self) -> &'static str;

    /// Exportiert den Survey; Skizze und Ansicht werden nur von
    /// zeichnungsbasierten Formaten genutzt.
    fn export_to_text(
        &self,
        survey: &Survey,
        sketch: Option<&Sketch>,
        projection: Option<Projection2D>,
    ) -> String;
}

/// Importiert eine Datei anhand ihres Namens (PocketTopo vor Survex).
///
/// Der Survey erhält den Dateinamen ohne Endung als Namen.
pub fn import_from_text(file_name: &str, text: &str) -> Result<Survey, ImportError> {
    let importers: [&dyn Importer; 2] = [&PocketTopoImporter, &SurvexCodec];
    let importer = importers
        .into_iter()
        .find(|importer| importer.can_handle(file_name))
        .ok_or_else(|| ImportError::UnsupportedFormat(file_name.to_string()))?;

    let name = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);
    log::info!("Importiere '{}'", file_name);
    importer.import_from_text(name, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_extension() {
        let survey = import_from_text("caves/entrance.svx", "1\t2\t5\t0\t0\n").unwrap();
        assert_eq!(survey.name(), "entrance");
        assert_eq!(survey.station_count(), 2);

        let text = "DATA\n1\t2\t0\t0\t5\n\nPLAN\n\nELEVATION\n\n";
        let survey = import_from_text("Export.TXT", text).unwrap();
        assert_eq!(survey.name(), "Export");
        assert_eq!(survey.station_count(), 2);
    }

    #[test]
    fn test_unsupported_format() {
        let err = import_from_text("cave.th", "").expect_err("Fehler erwartet");
        assert!(matches!(err, ImportError::UnsupportedFormat(ref name) if name == "cave.th"));
    }

    #[test]
    fn test_pocket_topo_errors_are_not_retried_as_survex() {
        let err = import_from_text("cave.txt", "1\t2\t5\t0\t0\n").expect_err("Fehler erwartet");
        assert!(matches!(err, ImportError::MissingSection(_)));
    }
}
