//! Survex-Export: Tour-Kopf und eine Zeile pro verbundenem Messzug.

use std::collections::HashSet;

use super::parser::starts_with_promoted_annotation;
use crate::core::{Leg, Survey, Trip};
use crate::io::text::format_number;

/// Schreibt alle verbundenen Messzüge in Traversierungsreihenfolge.
///
/// Zusammengefasste Messzüge tragen ihre Herkunft als `{from: ...}`-Kommentar,
/// Stationskommentare folgen beim ersten Erreichen der Station. Der Kommentar
/// des Ursprungs steht als `; name: text` vor den Datenzeilen.
pub fn write_survex(survey: &Survey) -> String {
    let mut output = String::new();

    if let Some(trip) = survey.trip() {
        write_trip(&mut output, trip);
    }

    let origin = survey.origin();
    if let Some(station) = survey.station(origin).filter(|station| station.has_comment()) {
        output.push_str(&format!("; {}: {}\n", station.name(), station.comment()));
    }

    let mut commented = HashSet::from([origin]);
    for leg_id in survey.traverse().legs {
        let (Some(leg), Some(source)) = (survey.leg(leg_id), survey.leg_source(leg_id)) else {
            continue;
        };
        let Some(destination) = leg.destination() else {
            continue;
        };

        output.push_str(&format!(
            "{}\t{}\t{}",
            survey.station_name(source),
            survey.station_name(destination),
            format_measurements(leg, "\t")
        ));

        let comment = survey
            .station(destination)
            .filter(|station| station.has_comment() && commented.insert(destination))
            .map(|station| station.comment());

        // Ein Kommentar, der selbst mit `{from:` beginnt, bekommt eine leere Annotation davor
        let annotated = leg.was_promoted() || comment.is_some_and(starts_with_promoted_annotation);
        match (annotated, comment) {
            (true, comment) => {
                output.push_str(&format!("\t; {}", promoted_annotation(leg)));
                if let Some(comment) = comment {
                    output.push(' ');
                    output.push_str(comment);
                }
            }
            (false, Some(comment)) => output.push_str(&format!("\t; {comment}")),
            (false, None) => {}
        }
        output.push('\n');
    }

    output
}

fn write_trip(output: &mut String, trip: &Trip) {
    if let Some(date) = trip.date {
        output.push_str(&format!("*date {}\n", date.format("%Y.%m.%d")));
    }
    for member in &trip.team {
        output.push_str(&format!("*team \"{}\"", member.name));
        for role in &member.roles {
            output.push(' ');
            output.push_str(role.survex_keyword());
        }
        output.push('\n');
    }
}

fn format_measurements(leg: &Leg, separator: &str) -> String {
    [leg.distance(), leg.azimuth(), leg.inclination()]
        .map(format_number)
        .join(separator)
}

/// `{from: d a i, d a i, ...}`
fn promoted_annotation(leg: &Leg) -> String {
    let entries: Vec<String> = leg
        .promoted_from()
        .iter()
        .map(|origin| format_measurements(origin, " "))
        .collect();
    format!("{{from: {}}}", entries.join(", "))
}
