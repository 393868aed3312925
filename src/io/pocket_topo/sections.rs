//! Abschnitts-Zerlegung der PocketTopo-Textdatei.
//!
//! Hauptabschnitte (`TRIP`, `DATA`, `PLAN`, `ELEVATION`) beginnen mit ihrer
//! Überschrift in einer eigenen Zeile und enden an der nächsten Leerzeile.
//! Innerhalb der Skizzen-Abschnitte trennen Großbuchstaben-Zeilen
//! (`STATIONS`, `SHOTS`) die Unterabschnitte.

use std::sync::LazyLock;

use regex::Regex;

use crate::io::text::numbered_lines;
use crate::io::ImportError;

static SUBSECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+$").expect("statisches Pattern"));

/// Prüft ob eine Zeile eine Unterabschnitts-Überschrift ist.
pub(crate) fn is_subsection_header(line: &str) -> bool {
    SUBSECTION_HEADER.is_match(line.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionState {
    Searching,
    Reading,
}

/// Liefert den Inhalt des Abschnitts `header` ohne Überschrift.
///
/// Der Vergleich erfolgt gegen `header.to_uppercase()`. Der Abschnitt endet an
/// der ersten Leerzeile oder am Dateiende.
pub fn get_section(text: &str, header: &str) -> Result<String, ImportError> {
    let wanted = header.to_uppercase();
    let mut state = SectionState::Searching;
    let mut lines: Vec<&str> = Vec::new();

    // Abschließende Leerzeile, damit auch ein Abschnitt am Dateiende endet
    for (_, line) in numbered_lines(text).chain(std::iter::once((0, ""))) {
        match state {
            SectionState::Searching => {
                if line.trim() == wanted {
                    state = SectionState::Reading;
                }
            }
            SectionState::Reading => {
                if line.trim().is_empty() {
                    return Ok(lines.join("\n"));
                }
                lines.push(line);
            }
        }
    }

    Err(ImportError::MissingSection(wanted))
}

/// Liefert die Zeilen eines Unterabschnitts (z.B. `STATIONS`) innerhalb eines
/// Abschnitts. Fehlt er, ist das Ergebnis leer.
pub(crate) fn get_subsection<'a>(section: &'a str, name: &str) -> Vec<&'a str> {
    let mut lines = section.lines().map(|l| l.strip_suffix('\r').unwrap_or(l));
    if !lines.any(|line| line.trim() == name) {
        return Vec::new();
    }
    lines
        .take_while(|line| !is_subsection_header(line) && !line.trim().starts_with("POLYLINE"))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Zeilennummer (1-basiert) der Überschrift `header` für Fehlermeldungen.
pub(crate) fn section_line(text: &str, header: &str) -> usize {
    let wanted = header.to_uppercase();
    numbered_lines(text)
        .find(|(_, line)| line.trim() == wanted)
        .map(|(number, _)| number)
        .unwrap_or(0)
}
