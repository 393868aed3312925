//! Fehlertypen der Import-Codecs.

use thiserror::Error;

use crate::core::SurveyError;

/// Fehler beim Einlesen einer Fremdformat-Datei.
///
/// Importe sind atomar: bei einem Fehler wird kein Survey zurückgegeben.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Pflicht-Abschnitt fehlt (z.B. `DATA`, `PLAN`)
    #[error("Abschnitt '{0}' fehlt")]
    MissingSection(String),
    /// Zeile konnte nicht interpretiert werden (1-basierte Zeilennummer)
    #[error("Zeile {line}: {message}")]
    Malformed { line: usize, message: String },
    /// Kein Importer erkennt den Dateinamen
    #[error("Format von '{0}' wird nicht unterstützt")]
    UnsupportedFormat(String),
}

impl ImportError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        ImportError::Malformed {
            line,
            message: message.into(),
        }
    }

    /// Bettet einen Graph-Fehler in einen Zeilenfehler ein.
    pub(crate) fn from_survey(line: usize, error: SurveyError) -> Self {
        ImportError::malformed(line, error.to_string())
    }
}
