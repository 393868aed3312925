use super::*;
use crate::core::updater::{close_loop, update, update_with_new_station};

fn leg(distance: f64, azimuth: f64, inclination: f64) -> Leg {
    Leg::new(distance, azimuth, inclination).expect("gueltiger Messzug")
}

#[test]
fn test_new_survey_has_only_origin() {
    let survey = Survey::new("test");
    assert_eq!(survey.station_count(), 1);
    assert_eq!(survey.station_name(survey.origin()), "1");
    assert_eq!(survey.active_station(), survey.origin());
    assert!(survey.all_legs().is_empty());
}

#[test]
fn test_detached_station_is_not_reachable() {
    let mut survey = Survey::new("test");
    let detached = survey.add_detached_station(Station::new("X"));
    assert_eq!(survey.station_count(), 1);
    assert!(!survey.is_attached(detached));
    assert!(survey.station_by_name("X").is_none());
}

#[test]
fn test_traversal_is_depth_first_in_insertion_order() {
    let mut survey = Survey::new("test");
    let s2 = update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    survey.set_active(survey.origin());
    update_with_new_station(&mut survey, leg(5.0, 90.0, 0.0)).unwrap();
    survey.set_active(s2);
    update(&mut survey, leg(1.0, 270.0, 0.0)).unwrap();

    let names: Vec<&str> = survey
        .traverse()
        .stations
        .iter()
        .map(|id| survey.station_name(*id))
        .collect();
    assert_eq!(names, vec!["1", "2", "3", "4"]);

    // 1→2, 2→3, Splay an 2, 1→4
    let legs = survey.traverse().legs;
    assert_eq!(legs.len(), 4);
    assert_eq!(survey.leg_source(legs[0]), Some(survey.origin()));
    assert_eq!(survey.leg_source(legs[2]), Some(s2));
    assert!(!survey.leg(legs[2]).unwrap().has_destination());
    assert_eq!(survey.station_name(survey.leg(legs[3]).unwrap().destination().unwrap()), "4");
}

#[test]
fn test_connected_and_unconnected_partition() {
    let mut survey = Survey::new("test");
    update(&mut survey, leg(1.0, 10.0, 0.0)).unwrap();
    update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    let origin = survey.origin();
    assert_eq!(survey.connected_onward_legs(origin).len(), 1);
    assert_eq!(survey.unconnected_onward_legs(origin).len(), 1);
    assert_eq!(survey.connected_legs().len(), 1);
}

#[test]
fn test_duplicate_names_are_enumerated() {
    let mut survey = Survey::new("test");
    let a = survey.add_detached_station(Station::new("A"));
    update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0).with_destination(a)).unwrap();
    survey.set_active(survey.origin());
    let b = survey.add_detached_station(Station::new("A"));
    update_with_new_station(&mut survey, leg(5.0, 180.0, 0.0).with_destination(b)).unwrap();

    assert_eq!(survey.stations_by_name("A"), vec![a, b]);
    assert_eq!(survey.station_by_name("A"), Some(a));
    assert_ne!(a, b);
}

#[test]
fn test_next_station_name() {
    let mut survey = Survey::new("test");
    assert_eq!(survey.next_station_name(), "2");

    survey.rename_station(survey.origin(), "A9").unwrap();
    assert_eq!(survey.next_station_name(), "A10");

    survey.rename_station(survey.origin(), "07").unwrap();
    assert_eq!(survey.next_station_name(), "08");

    survey.rename_station(survey.origin(), "Eingang").unwrap();
    assert_eq!(survey.next_station_name(), "Eingang1");
}

#[test]
fn test_next_station_name_on_counter_overflow() {
    let mut survey = Survey::new("test");
    survey.rename_station(survey.origin(), "A18446744073709551615").unwrap();
    assert_eq!(survey.next_station_name(), "A184467440737095516151");

    survey.rename_station(survey.origin(), "99999999999999999999999").unwrap();
    assert_eq!(survey.next_station_name(), "999999999999999999999991");
}

#[test]
fn test_next_station_name_skips_used_names() {
    let mut survey = Survey::new("test");
    update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    survey.set_active(survey.origin());
    // 2 und 3 sind vergeben
    assert_eq!(survey.next_station_name(), "4");
}

#[test]
fn test_incoming_legs_after_loop_closure() {
    let mut survey = Survey::new("test");
    update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0)).unwrap();
    let s3 = update_with_new_station(&mut survey, leg(5.0, 90.0, 0.0)).unwrap();
    let origin = survey.origin();
    close_loop(&mut survey, leg(7.07, 225.0, 0.0), origin).unwrap();

    assert_eq!(survey.incoming_legs(origin).len(), 1);
    assert_eq!(survey.incoming_legs(s3).len(), 1);
    // Jede Station wird trotz Schleife genau einmal besucht
    assert_eq!(survey.station_count(), 3);
}

#[test]
fn test_mutations_clear_saved_flag() {
    let mut survey = Survey::new("test");
    survey.set_saved(true);
    update(&mut survey, leg(1.0, 0.0, 0.0)).unwrap();
    assert!(!survey.is_saved());
}

#[test]
fn test_attachment_follows_incoming_legs() {
    let mut survey = Survey::new("test");
    let origin = survey.origin();
    let fresh = survey.add_detached_station(Station::new("X"));
    assert!(survey.is_attached(origin));
    assert!(!survey.is_attached(fresh));
    assert!(survey.incoming_legs(fresh).is_empty());

    let to_fresh = update_with_new_station(&mut survey, leg(5.0, 0.0, 0.0).with_destination(fresh))
        .unwrap();
    assert_eq!(to_fresh, fresh);
    assert!(survey.is_attached(fresh));
    assert_eq!(survey.incoming_legs(fresh), survey.connected_legs());

    // Zusammenfassung entfernt Splays, die Zielstation hängt am gemittelten Messzug
    for _ in 0..3 {
        update(&mut survey, leg(2.0, 90.0, 0.0)).unwrap();
    }
    let promoted = survey.active_station();
    assert_eq!(survey.incoming_legs(promoted).len(), 1);
    assert_eq!(survey.incoming_legs(fresh).len(), 1);
    assert!(survey.is_attached(promoted));

    let closing = close_loop(&mut survey, leg(5.4, 200.0, 0.0), origin).unwrap();
    assert_eq!(survey.incoming_legs(origin), vec![closing]);
}

#[test]
fn test_directory_accessors() {
    let mut survey = Survey::new("test");
    assert!(survey.directory().is_none());
    survey.set_directory(Some(PathBuf::from("/tmp/hoehle")));
    assert_eq!(survey.directory(), Some(std::path::Path::new("/tmp/hoehle")));
}
