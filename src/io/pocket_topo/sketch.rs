//! Skizzen-Import aus den Abschnitten `PLAN` und `ELEVATION`.
//!
//! PocketTopo speichert Skizzen in eigenen Bildschirmkoordinaten (y nach
//! unten). Die Verschiebung in den Projektionsraum wird über die im
//! Unterabschnitt `STATIONS` abgelegten Stationspositionen bestimmt.

use std::collections::HashMap;

use super::sections::{get_subsection, is_subsection_header};
use crate::core::{flip_vertically, Colour, Coord2D, PathDetail, Sketch, Survey};
use crate::graph::Projection2D;
use crate::io::text::parse_number;
use crate::io::ImportError;

const POLYLINE_KEYWORD: &str = "POLYLINE";

/// Baut die Skizze eines Abschnitts auf.
///
/// `first_line` ist die Dateizeile der ersten Abschnittszeile (für Fehler).
pub(crate) fn parse_sketch(
    section: &str,
    first_line: usize,
    survey: &Survey,
    projection: Projection2D,
) -> Result<Sketch, ImportError> {
    let anchors = parse_station_anchors(section);
    let offset = sketch_offset(survey, projection, &anchors);
    let path_details = parse_polylines(section, first_line, offset)?;

    let mut sketch = Sketch::new();
    sketch.set_path_details(path_details);
    Ok(sketch)
}

/// `x\ty\tname` → Position in Skizzen-Koordinaten. Erster Eintrag gewinnt.
fn parse_station_anchors(section: &str) -> HashMap<String, Coord2D> {
    let mut anchors = HashMap::new();
    for line in get_subsection(section, "STATIONS") {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let parsed = match fields.as_slice() {
            [x, y, name, ..] if !name.is_empty() => {
                x.parse::<f64>().ok().zip(y.parse::<f64>().ok()).map(|(x, y)| (*name, x, y))
            }
            _ => None,
        };
        match parsed {
            Some((name, x, y)) => {
                anchors
                    .entry(name.to_string())
                    .or_insert(Coord2D::new(x, y));
            }
            None => log::warn!("Stationszeile ignoriert: '{}'", line),
        }
    }
    anchors
}

/// Verschiebung zwischen Skizzen- und Projektionskoordinaten.
///
/// Reihenfolge: Anker des Ursprungs, dann Anker des ersten verbundenen
/// Nachbarn, sonst keine Verschiebung.
fn sketch_offset(
    survey: &Survey,
    projection: Projection2D,
    anchors: &HashMap<String, Coord2D>,
) -> Coord2D {
    let space = projection.project(survey);
    let origin = survey.origin();

    let anchored = |station| {
        let anchor = anchors.get(survey.station_name(station))?;
        let projected = space.station_position(station)?;
        Some(*anchor - flip_vertically(projected))
    };

    if let Some(offset) = anchored(origin) {
        return offset;
    }

    let neighbour = survey
        .connected_onward_legs(origin)
        .first()
        .and_then(|id| survey.leg(*id))
        .and_then(|leg| leg.destination());
    if let Some(offset) = neighbour.and_then(anchored) {
        log::warn!(
            "{}: Ursprung ohne Skizzen-Anker, verwende Nachbarstation",
            projection.name()
        );
        return offset;
    }

    log::warn!(
        "{}: keine Skizzen-Anker gefunden, Skizze wird nicht verschoben",
        projection.name()
    );
    Coord2D::ZERO
}

/// Übersetzt PocketTopo-Farbnamen; Unbekanntes wird schwarz.
pub fn interpret_colour(name: &str) -> Colour {
    let name = name.trim();
    if name.eq_ignore_ascii_case("GRAY") {
        return Colour::Grey;
    }
    Colour::from_name(name).unwrap_or_else(|| {
        log::debug!("Unbekannte Farbe '{}', verwende schwarz", name);
        Colour::Black
    })
}

/// Aktuell offene Polylinie
struct OpenPath {
    colour: Colour,
    points: Vec<Coord2D>,
}

impl OpenPath {
    fn finish(self) -> Option<PathDetail> {
        let mut points = self.points.into_iter();
        let mut detail = PathDetail::new(points.next()?, self.colour);
        for point in points {
            detail.line_to(point);
        }
        Some(detail)
    }
}

fn parse_polylines(
    section: &str,
    first_line: usize,
    offset: Coord2D,
) -> Result<Vec<PathDetail>, ImportError> {
    let mut details = Vec::new();
    let mut current: Option<OpenPath> = None;

    for (index, raw) in section.lines().enumerate() {
        let line = raw.trim();
        let line_number = first_line + index;

        if let Some(rest) = line.strip_prefix(POLYLINE_KEYWORD) {
            details.extend(current.take().and_then(OpenPath::finish));
            current = Some(OpenPath {
                colour: interpret_colour(rest),
                points: Vec::new(),
            });
            continue;
        }

        if is_subsection_header(line) {
            details.extend(current.take().and_then(OpenPath::finish));
            continue;
        }

        let Some(path) = current.as_mut() else {
            continue;
        };
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let (Some(x), Some(y)) = (fields.next(), fields.next()) else {
            return Err(ImportError::malformed(
                line_number,
                format!("Polylinien-Punkt '{line}' braucht x und y"),
            ));
        };
        let x = parse_number(x, line_number, "x")?;
        let y = parse_number(y, line_number, "y")?;
        path.points.push(Coord2D::new(x - offset.x, -(y - offset.y)));
    }

    details.extend(current.take().and_then(OpenPath::finish));
    Ok(details)
}
