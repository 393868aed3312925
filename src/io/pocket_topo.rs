//! Import von PocketTopo-Textexporten (`.txt`).
//!
//! Eine Datei besteht aus durch Leerzeilen getrennten Abschnitten:
//!
//! ```text
//! TRIP
//! DATE 2012-05-14
//! DATA
//! 1	2	0.0	-3.5	5.12	>
//! 2		87.1	10.0	1.40
//!
//! PLAN
//! STATIONS
//! 0.00	0.00	1
//! POLYLINE BLUE
//! 0.10	0.20
//! ...
//! ```

mod sections;
mod sketch;

use std::collections::HashMap;

use chrono::NaiveDate;

pub use sections::get_section;
pub use sketch::interpret_colour;

use super::text::{numbered_lines, parse_number};
use super::{ImportError, Importer};
use crate::core::{
    set_active_station, update_with_new_station, update_with_options, Leg, Station, StationId,
    Survey, Trip, UpdateOptions,
};
use crate::graph::Projection2D;

const DATE_PREFIX: &str = "DATE";

/// Importer für PocketTopo-Textdateien
#[derive(Debug, Clone, Copy, Default)]
pub struct PocketTopoImporter;

impl Importer for PocketTopoImporter {
    fn can_handle(&self, file_name: &str) -> bool {
        file_name.to_ascii_lowercase().ends_with(".txt")
    }

    fn import_from_text(&self, name: &str, text: &str) -> Result<Survey, ImportError> {
        parse_pocket_topo(name, text)
    }
}

/// Baut einen Survey samt Grundriss- und Aufriss-Skizze aus PocketTopo-Text.
pub fn parse_pocket_topo(name: &str, text: &str) -> Result<Survey, ImportError> {
    let mut survey = Survey::new(name);

    survey.set_trip(parse_trip(text));

    let data = get_section(text, "DATA")?;
    let data_line = sections::section_line(text, "DATA") + 1;
    parse_data(&mut survey, &data, data_line)?;

    for projection in [Projection2D::ExtendedElevation, Projection2D::Plan] {
        let header = match projection {
            Projection2D::Plan => "PLAN",
            Projection2D::ExtendedElevation => "ELEVATION",
        };
        let section = get_section(text, header)?;
        let first_line = sections::section_line(text, header) + 1;
        let sketch = sketch::parse_sketch(&section, first_line, &survey, projection)?;
        match projection {
            Projection2D::Plan => survey.set_plan_sketch(sketch),
            Projection2D::ExtendedElevation => survey.set_elevation_sketch(sketch),
        }
    }

    survey.set_saved(true);
    log::info!(
        "PocketTopo-Import '{}': {} Stationen, {} Messzüge, {} + {} Skizzenlinien",
        name,
        survey.station_count(),
        survey.all_legs().len(),
        survey.plan_sketch().path_details().len(),
        survey.elevation_sketch().path_details().len()
    );
    Ok(survey)
}

/// Liest das optionale Datum aus dem `TRIP`-Abschnitt.
fn parse_trip(text: &str) -> Option<Trip> {
    let section = get_section(text, "TRIP").ok()?;
    let raw = section
        .lines()
        .find_map(|line| line.trim().strip_prefix(DATE_PREFIX))?
        .trim();
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(Trip::new(Some(date))),
        Err(e) => {
            log::warn!("Datum '{}' nicht lesbar, Tour wird ignoriert: {}", raw, e);
            None
        }
    }
}

/// Überträgt die Messzeilen `von  nach  Azimut  Neigung  Distanz [Richtung]`.
fn parse_data(survey: &mut Survey, data: &str, first_line: usize) -> Result<(), ImportError> {
    let import_options = UpdateOptions::without_promotion();
    // Zuletzt angelegte Station je Name
    let mut by_name: HashMap<String, StationId> = HashMap::new();

    for (offset, line) in numbered_lines(data) {
        let line_number = first_line + offset - 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let [from, to, azimuth, inclination, distance, ..] = fields.as_slice() else {
            return Err(ImportError::malformed(
                line_number,
                format!("erwartet 5 Felder, gefunden {}", fields.len()),
            ));
        };
        let azimuth = parse_number(azimuth, line_number, "Azimut")?;
        let inclination = parse_number(inclination, line_number, "Neigung")?;
        let distance = parse_number(distance, line_number, "Distanz")?;

        if by_name.is_empty() {
            let origin = survey.origin();
            survey
                .rename_station(origin, *from)
                .map_err(|e| ImportError::from_survey(line_number, e))?;
            by_name.insert(from.to_string(), origin);
        }

        let source = *by_name.get(*from).ok_or_else(|| {
            ImportError::malformed(line_number, format!("unbekannte Station '{from}'"))
        })?;
        set_active_station(survey, source).map_err(|e| ImportError::from_survey(line_number, e))?;

        let leg = Leg::new(distance, azimuth, inclination)
            .map_err(|e| ImportError::from_survey(line_number, e))?;

        if to.is_empty() {
            update_with_options(survey, leg, &import_options)
                .map_err(|e| ImportError::from_survey(line_number, e))?;
        } else {
            let destination = survey.add_detached_station(Station::new(*to));
            update_with_new_station(survey, leg.with_destination(destination))
                .map_err(|e| ImportError::from_survey(line_number, e))?;
            by_name.insert(to.to_string(), destination);
        }
    }

    Ok(())
}
