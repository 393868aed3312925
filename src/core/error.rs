//! Fehlertypen für Mutationen am Vermessungsgraphen.

use thiserror::Error;

/// Fehler beim Aufbau oder Ändern eines Surveys.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurveyError {
    /// Messwerte außerhalb des gültigen Bereichs
    #[error("Ungueltiger Messzug: {0}")]
    InvalidLeg(String),

    /// Station-Handle zeigt auf keine (erreichbare) Station
    #[error("Unbekannte Station: {0}")]
    UnknownStation(String),

    /// Ziel eines neuen Messzugs ist bereits im Graphen verankert
    #[error("Station '{0}' ist bereits mit dem Graphen verbunden")]
    DestinationAttached(String),
}
