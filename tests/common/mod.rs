//! Gemeinsame Test-Helfer für die Integrationstests.
#![allow(dead_code)]

use cave_survey::core::{Role, TeamEntry};
use cave_survey::{
    close_loop, set_active_station, update, update_with_new_station, Leg, Survey, Trip,
};
use chrono::NaiveDate;

pub const PROMOTED_COMMENT: &str = "Comment McComment Face";

pub fn leg(distance: f64, azimuth: f64, inclination: f64) -> Leg {
    Leg::new(distance, azimuth, inclination).expect("gueltiger Messzug")
}

/// Verzweigter Survey mit Splay, zusammengefasstem Messzug, Kommentar,
/// Schleifenschluss und Tour-Metadaten.
pub fn create_test_survey() -> Survey {
    let mut survey = Survey::new("test");
    survey.set_trip(Some(
        Trip::new(NaiveDate::from_ymd_opt(2024, 2, 10)).with_team(vec![
            TeamEntry::new("Ada", vec![Role::Book, Role::Instruments]),
            TeamEntry::new("Bob", vec![Role::Dog]),
        ]),
    ));

    let station_2 = update_with_new_station(&mut survey, leg(5.0, 10.0, -3.0)).unwrap();
    update(&mut survey, leg(1.2, 100.0, 0.0)).unwrap();
    for _ in 0..3 {
        update(&mut survey, leg(4.0, 200.0, 5.0)).unwrap();
    }
    let station_3 = survey.active_station();
    survey
        .station_mut(station_3)
        .unwrap()
        .set_comment(PROMOTED_COMMENT);

    let station_4 = update_with_new_station(&mut survey, leg(2.5, 250.0, 12.5)).unwrap();
    set_active_station(&mut survey, station_2).unwrap();
    update_with_new_station(&mut survey, leg(3.0, 80.0, 0.0)).unwrap();
    close_loop(&mut survey, leg(6.0, 230.0, 3.0), station_4).unwrap();

    survey
}

/// Verbundene Messzüge als (von, nach, d, a, i) in Traversierungsreihenfolge
pub fn connected_rows(survey: &Survey) -> Vec<(String, String, f64, f64, f64)> {
    survey
        .traverse()
        .legs
        .into_iter()
        .filter_map(|id| {
            let leg = survey.leg(id)?;
            let destination = leg.destination()?;
            let source = survey.leg_source(id)?;
            Some((
                survey.station_name(source).to_string(),
                survey.station_name(destination).to_string(),
                leg.distance(),
                leg.azimuth(),
                leg.inclination(),
            ))
        })
        .collect()
}
