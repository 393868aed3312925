use super::*;
use crate::core::{update, update_with_new_station, Leg, Role, TeamEntry, Trip};
use crate::io::ImportError;
use approx::assert_relative_eq;
use chrono::NaiveDate;

fn leg(distance: f64, azimuth: f64, inclination: f64) -> Leg {
    Leg::new(distance, azimuth, inclination).expect("gueltiger Messzug")
}

#[test]
fn test_parse_basic_line_creates_two_stations() {
    let survey = parse_survex("t", "1\t2\t5.0\t0.0\t0.0").expect("Import fehlgeschlagen");

    assert_eq!(survey.station_count(), 2);
    let legs = survey.connected_legs();
    assert_eq!(legs.len(), 1);
    assert_relative_eq!(survey.leg(legs[0]).unwrap().distance(), 5.0);
    assert_eq!(survey.station_name(survey.origin()), "1");
    assert!(survey.is_saved());
}

#[test]
fn test_parse_whitespace_separated_line() {
    let survey = parse_survex("t", "A1  A2   3.25  120.5  -10\nA2 A3 1 2 3").unwrap();
    assert_eq!(survey.station_count(), 3);
    let a2 = survey.station_by_name("A2").unwrap();
    assert_eq!(survey.connected_onward_legs(a2).len(), 1);
}

#[test]
fn test_parse_skips_comments_and_directives() {
    let text = "; Kopf\n*begin cave\n*units tape metres\n\n1\t2\t5.0\t0.0\t0.0\n*end cave\n";
    let survey = parse_survex("t", text).unwrap();
    assert_eq!(survey.station_count(), 2);
    assert!(survey.trip().is_none());
}

#[test]
fn test_parse_promoted_annotation_and_comment() {
    let text = "1\t2\t5.00\t10.00\t0.00\t; {from: 5.00 10.00 0.00, 5.10 10.50 0.20, 4.90 9.50 -0.20} Comment McComment Face\n";
    let survey = parse_survex("t", text).unwrap();

    let promoted = survey.leg(survey.connected_legs()[0]).unwrap();
    assert_eq!(promoted.promoted_from().len(), 3);
    assert_relative_eq!(promoted.promoted_from()[1].distance(), 5.1);
    assert_relative_eq!(promoted.promoted_from()[2].inclination(), -0.2);

    let station = survey.station_by_name("2").unwrap();
    assert_eq!(survey.station(station).unwrap().comment(), "Comment McComment Face");
}

#[test]
fn test_parse_any_promoted_legs() {
    assert!(parse_any_promoted_legs("nur Kommentar").unwrap().is_empty());
    assert!(parse_any_promoted_legs("").unwrap().is_empty());

    let legs = parse_any_promoted_legs(" {from: 1 2 3, 4 5 6}").unwrap();
    assert_eq!(legs.len(), 2);
    assert_relative_eq!(legs[1].azimuth(), 5.0);

    assert!(parse_any_promoted_legs("{from: 1 2}").is_err());
    assert!(parse_any_promoted_legs("{from: 1 x 3}").is_err());
}

#[test]
fn test_parse_anonymous_destinations_are_splays() {
    let text = "1\t2\t5\t0\t0\n2\t-\t1\t90\t0\n2\t.\t1\t180\t0\n2\t..\t1\t270\t0\n";
    let survey = parse_survex("t", text).unwrap();

    let station_2 = survey.station_by_name("2").unwrap();
    assert_eq!(survey.station_count(), 2);
    assert_eq!(survey.unconnected_onward_legs(station_2).len(), 3);
}

#[test]
fn test_parse_known_destination_closes_loop() {
    let text = "1\t2\t5\t0\t0\n2\t3\t5\t90\t0\n3\t1\t7.07\t225\t0\n";
    let survey = parse_survex("t", text).unwrap();

    assert_eq!(survey.station_count(), 3);
    assert_eq!(survey.connected_legs().len(), 3);
    assert_eq!(survey.incoming_legs(survey.origin()).len(), 1);
}

#[test]
fn test_parse_unknown_from_station_is_malformed() {
    let err = parse_survex("t", "1\t2\t5\t0\t0\n8\t9\t5\t0\t0").expect_err("Fehler erwartet");
    assert!(matches!(err, ImportError::Malformed { line: 2, .. }));
}

#[test]
fn test_parse_short_line_is_malformed() {
    let err = parse_survex("t", "1\t2\t5\t0").expect_err("Fehler erwartet");
    assert!(matches!(err, ImportError::Malformed { line: 1, .. }));
}

#[test]
fn test_parse_out_of_range_leg_is_malformed() {
    let err = parse_survex("t", "1\t2\t5\t400\t0").expect_err("Fehler erwartet");
    assert!(err.to_string().contains("Azimut"));
}

#[test]
fn test_parse_trip_directives() {
    let text = "*date 2023.07.01\n*team \"Ada\" notes dog\n*TEAM \"Bob\" instruments wizard\n1\t2\t5\t0\t0\n";
    let survey = parse_survex("t", text).unwrap();

    let trip = survey.trip().expect("Tour erwartet");
    assert_eq!(trip.date, NaiveDate::from_ymd_opt(2023, 7, 1));
    assert_eq!(
        trip.team,
        vec![
            TeamEntry::new("Ada", vec![Role::Book, Role::Dog]),
            TeamEntry::new("Bob", vec![Role::Instruments]),
        ]
    );
}

#[test]
fn test_write_exact_output() {
    let mut survey = Survey::new("t");
    update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    update(&mut survey, leg(1.0, 90.0, 0.0)).unwrap();
    update_with_new_station(&mut survey, leg(2.346, 359.999, -0.001)).unwrap();

    assert_eq!(write_survex(&survey), "1\t2\t5.00\t0.00\t0.00\n2\t3\t2.35\t360.00\t0.00\n");
}

#[test]
fn test_write_trip_header_and_comment() {
    let mut survey = Survey::new("t");
    let date = NaiveDate::from_ymd_opt(2012, 5, 14);
    survey.set_trip(Some(
        Trip::new(date).with_team(vec![TeamEntry::new("Ada", vec![Role::Book, Role::Instruments])]),
    ));
    let station = update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    survey.station_mut(station).unwrap().set_comment("Engstelle");

    assert_eq!(
        write_survex(&survey),
        "*date 2012.05.14\n*team \"Ada\" notes instruments\n1\t2\t5.00\t0.00\t0.00\t; Engstelle\n"
    );
}

#[test]
fn test_write_promoted_leg_with_comment() {
    let mut survey = Survey::new("t");
    for _ in 0..3 {
        update(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    }
    let station = survey.active_station();
    survey.station_mut(station).unwrap().set_comment("Halle");

    assert_eq!(
        write_survex(&survey),
        "1\t2\t5.00\t0.00\t0.00\t; {from: 5.00 0.00 0.00, 5.00 0.00 0.00, 5.00 0.00 0.00} Halle\n"
    );
}

#[test]
fn test_write_origin_comment_before_data() {
    let mut survey = Survey::new("t");
    let origin = survey.origin();
    survey.station_mut(origin).unwrap().set_comment("Eingang");
    update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();

    let text = write_survex(&survey);
    assert_eq!(text, "; 1: Eingang\n1\t2\t5.00\t0.00\t0.00\n");

    let reparsed = parse_survex("t", &text).unwrap();
    assert_eq!(reparsed.station(reparsed.origin()).unwrap().comment(), "Eingang");
    let station_2 = reparsed.station_by_name("2").unwrap();
    assert!(!reparsed.station(station_2).unwrap().has_comment());
}

#[test]
fn test_origin_comment_without_legs() {
    let mut survey = Survey::new("t");
    let origin = survey.origin();
    survey.rename_station(origin, "E0").unwrap();
    survey.station_mut(origin).unwrap().set_comment("Eingang");

    let reparsed = parse_survex("t", &write_survex(&survey)).unwrap();
    assert_eq!(reparsed.station_name(reparsed.origin()), "E0");
    assert_eq!(reparsed.station(reparsed.origin()).unwrap().comment(), "Eingang");
}

#[test]
fn test_parse_foreign_comment_line_is_not_an_origin_comment() {
    let survey = parse_survex("t", "; Autor: Bob\n; Kopf\n1\t2\t5\t0\t0\n").unwrap();
    assert!(!survey.station(survey.origin()).unwrap().has_comment());
}

#[test]
fn test_comment_starting_like_annotation_survives_roundtrip() {
    let mut survey = Survey::new("t");
    let station = update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    survey.station_mut(station).unwrap().set_comment("{from: siehe Plan}");

    let text = write_survex(&survey);
    assert_eq!(text, "1\t2\t5.00\t0.00\t0.00\t; {from: } {from: siehe Plan}\n");

    let reparsed = parse_survex("t", &text).expect("Re-Import fehlgeschlagen");
    let station = reparsed.station_by_name("2").unwrap();
    assert_eq!(reparsed.station(station).unwrap().comment(), "{from: siehe Plan}");
    assert!(!reparsed.leg(reparsed.connected_legs()[0]).unwrap().was_promoted());
}

#[test]
fn test_comment_whitespace_is_preserved() {
    let mut survey = Survey::new("t");
    let plain = update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    survey.station_mut(plain).unwrap().set_comment("  zwei  Leerzeichen ");
    for _ in 0..3 {
        update(&mut survey, leg(2.0, 90.0, 0.0)).unwrap();
    }
    let promoted = survey.active_station();
    survey.station_mut(promoted).unwrap().set_comment(" Halle\t");

    let reparsed = parse_survex("t", &write_survex(&survey)).unwrap();
    let comment = |name: &str| {
        let id = reparsed.station_by_name(name).unwrap();
        reparsed.station(id).unwrap().comment().to_string()
    };
    assert_eq!(comment("2"), "  zwei  Leerzeichen ");
    assert_eq!(comment("3"), " Halle\t");
}

#[test]
fn test_codec_file_names() {
    assert!(SurvexCodec.can_handle("cave.svx"));
    assert!(SurvexCodec.can_handle("CAVE.SVX"));
    assert!(!SurvexCodec.can_handle("cave.txt"));
    assert_eq!(SurvexCodec.file_extension(), "svx");
}
