//! Zeilenparser für Survex-Daten.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::core::{
    close_loop, set_active_station, update_with_new_station, update_with_options, Leg, Role,
    Station, StationId, Survey, SurveyError, TeamEntry, Trip, UpdateOptions,
};
use crate::io::text::{numbered_lines, parse_number};
use crate::io::ImportError;

static PROMOTED_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{from:\s*([^}]*)\}").expect("statisches Pattern"));

static TEAM_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^\*team\s+"([^"]*)"\s*(.*)$"#).expect("statisches Pattern"));

/// Platzhalter-Ziele für Splays
const ANONYMOUS_STATIONS: [&str; 3] = ["-", ".", ".."];

/// Eine Datenzeile, aufgeteilt in Messwerte, Herkunftsmessungen und Kommentar.
#[derive(Debug)]
struct DataLine<'a> {
    from: &'a str,
    to: &'a str,
    distance: f64,
    azimuth: f64,
    inclination: f64,
    promoted_from: Vec<Leg>,
    comment: &'a str,
}

/// Liest die Herkunftsmessungen aus einer `{from: d a i, ...}`-Annotation.
///
/// Text ohne Annotation ergibt eine leere Liste.
pub fn parse_any_promoted_legs(text: &str) -> Result<Vec<Leg>, SurveyError> {
    let Some(captures) = PROMOTED_ANNOTATION.captures(text) else {
        return Ok(Vec::new());
    };
    let body = captures.get(1).map_or("", |m| m.as_str());

    body.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let values: Vec<f64> = entry
                .split_whitespace()
                .map(|v| {
                    v.parse::<f64>().map_err(|_| {
                        SurveyError::InvalidLeg(format!("Wert '{v}' in '{{from: ...}}' ist keine Zahl"))
                    })
                })
                .collect::<Result<_, _>>()?;
            match values.as_slice() {
                [distance, azimuth, inclination] => Leg::new(*distance, *azimuth, *inclination),
                _ => Err(SurveyError::InvalidLeg(format!(
                    "'{entry}' braucht Distanz, Azimut und Neigung"
                ))),
            }
        })
        .collect()
}

/// Prüft, ob ein Kommentar wie eine `{from: ...}`-Annotation beginnt.
pub(super) fn starts_with_promoted_annotation(comment: &str) -> bool {
    PROMOTED_ANNOTATION.is_match(comment)
}

/// Baut einen Survey aus Survex-Text.
///
/// Eine Kommentarzeile `; name: text` vor der ersten Datenzeile wird zum
/// Kommentar des Ursprungs, falls dieser so heißt.
pub fn parse_survex(name: &str, text: &str) -> Result<Survey, ImportError> {
    let mut survey = Survey::new(name);
    let mut trip: Option<Trip> = None;
    let import_options = UpdateOptions::without_promotion();
    // Zuletzt angelegte Station je Name
    let mut by_name: HashMap<String, StationId> = HashMap::new();
    let mut origin_comment: Option<(usize, &str, &str)> = None;

    for (line_number, line) in numbered_lines(text) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with(';') {
            if by_name.is_empty() {
                if let Some((station, comment)) = parse_station_comment(line) {
                    origin_comment = Some((line_number, station, comment));
                }
            }
            continue;
        }
        if trimmed.starts_with('*') {
            parse_directive(trimmed, line_number, &mut trip);
            continue;
        }

        let data = parse_data_line(line, line_number)?;

        if by_name.is_empty() {
            let origin = survey.origin();
            survey
                .rename_station(origin, data.from)
                .map_err(|e| ImportError::from_survey(line_number, e))?;
            by_name.insert(data.from.to_string(), origin);
        }
        let source = *by_name.get(data.from).ok_or_else(|| {
            ImportError::malformed(line_number, format!("unbekannte Station '{}'", data.from))
        })?;
        set_active_station(&mut survey, source)
            .map_err(|e| ImportError::from_survey(line_number, e))?;

        let leg = Leg::new(data.distance, data.azimuth, data.inclination)
            .map_err(|e| ImportError::from_survey(line_number, e))?;

        if data.to.is_empty() || ANONYMOUS_STATIONS.contains(&data.to) {
            update_with_options(&mut survey, leg, &import_options)
                .map_err(|e| ImportError::from_survey(line_number, e))?;
            continue;
        }

        let leg = leg.with_promoted_from(data.promoted_from);
        let destination = match by_name.get(data.to) {
            Some(&existing) => {
                close_loop(&mut survey, leg, existing)
                    .map_err(|e| ImportError::from_survey(line_number, e))?;
                existing
            }
            None => {
                let station = survey.add_detached_station(Station::new(data.to));
                update_with_new_station(&mut survey, leg.with_destination(station))
                    .map_err(|e| ImportError::from_survey(line_number, e))?;
                by_name.insert(data.to.to_string(), station);
                station
            }
        };

        if !data.comment.is_empty() {
            if let Some(station) = survey.station_mut(destination) {
                station.set_comment(data.comment);
            }
        }
    }

    if let Some((line_number, station, comment)) = origin_comment {
        apply_origin_comment(&mut survey, by_name.is_empty(), station, comment)
            .map_err(|e| ImportError::from_survey(line_number, e))?;
    }

    survey.set_trip(trip);
    survey.set_saved(true);
    log::info!(
        "Survex-Import '{}': {} Stationen, {} Messzüge",
        name,
        survey.station_count(),
        survey.all_legs().len()
    );
    Ok(survey)
}

fn parse_data_line(line: &str, line_number: usize) -> Result<DataLine<'_>, ImportError> {
    let (data, remark) = match line.split_once(';') {
        Some((data, remark)) => (data, remark),
        None => (line, ""),
    };

    let fields: Vec<&str> = if data.contains('\t') {
        data.split('\t').map(str::trim).filter(|f| !f.is_empty()).collect()
    } else {
        data.split_whitespace().collect()
    };
    let [from, to, distance, azimuth, inclination, ..] = fields[..] else {
        return Err(ImportError::malformed(
            line_number,
            format!("erwartet 5 Felder, gefunden {}", fields.len()),
        ));
    };

    // Nur das eine Trennzeichen nach `;` bzw. nach der Annotation gehört nicht zum Text
    let remark = strip_separator(remark);
    let promoted_from =
        parse_any_promoted_legs(remark).map_err(|e| ImportError::from_survey(line_number, e))?;
    let comment = match PROMOTED_ANNOTATION.find(remark) {
        Some(annotation) => strip_separator(&remark[annotation.end()..]),
        None => remark,
    };

    Ok(DataLine {
        from,
        to,
        distance: parse_number(distance, line_number, "Distanz")?,
        azimuth: parse_number(azimuth, line_number, "Azimut")?,
        inclination: parse_number(inclination, line_number, "Neigung")?,
        promoted_from,
        comment,
    })
}

fn strip_separator(text: &str) -> &str {
    text.strip_prefix(' ').unwrap_or(text)
}

/// `; name: text` mit einem Stationsnamen ohne Leerzeichen
fn parse_station_comment(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix("; ")?;
    let (station, comment) = rest.split_once(": ")?;
    if station.is_empty() || station.contains(char::is_whitespace) || comment.is_empty() {
        return None;
    }
    Some((station, comment))
}

/// Ohne Datenzeilen bekommt der Ursprung den Namen aus der Kommentarzeile.
fn apply_origin_comment(
    survey: &mut Survey,
    without_data: bool,
    station: &str,
    comment: &str,
) -> Result<(), SurveyError> {
    let origin = survey.origin();
    if without_data {
        survey.rename_station(origin, station)?;
    }
    if survey.station_name(origin) != station {
        log::debug!("Kommentar für '{}' passt nicht zum Ursprung, ignoriert", station);
        return Ok(());
    }
    if let Some(origin_station) = survey.station_mut(origin) {
        if !origin_station.has_comment() {
            origin_station.set_comment(comment);
        }
    }
    Ok(())
}

/// `*date` und `*team` füllen die Tour; andere Befehle werden übergangen.
fn parse_directive(line: &str, line_number: usize, trip: &mut Option<Trip>) {
    let keyword = line
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match keyword.as_str() {
        "*date" => {
            let raw = line["*date".len()..].trim();
            match NaiveDate::parse_from_str(raw, "%Y.%m.%d") {
                Ok(date) => trip.get_or_insert_with(Trip::default).date = Some(date),
                Err(e) => log::warn!("Zeile {}: Datum '{}' nicht lesbar: {}", line_number, raw, e),
            }
        }
        "*team" => match TEAM_DIRECTIVE.captures(line) {
            Some(captures) => {
                let name = captures.get(1).map_or("", |m| m.as_str());
                let roles = captures
                    .get(2)
                    .map_or("", |m| m.as_str())
                    .split_whitespace()
                    .filter_map(|keyword| {
                        let role = Role::from_survex_keyword(keyword);
                        if role.is_none() {
                            log::debug!("Unbekannte Rolle '{}' ignoriert", keyword);
                        }
                        role
                    })
                    .collect();
                trip.get_or_insert_with(Trip::default)
                    .team
                    .push(TeamEntry::new(name, roles));
            }
            None => log::warn!("Zeile {}: '*team' ohne Namen in Anführungszeichen", line_number),
        },
        other => log::debug!("Zeile {}: Befehl '{}' ignoriert", line_number, other),
    }
}
