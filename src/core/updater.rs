//! Hängt neue Messungen an den Vermessungsgraphen an.
//!
//! Alle Operationen arbeiten auf der aktiven Station des übergebenen Surveys.
//! Verbundene Messzüge bilden einen Baum mit Wurzel im Ursprung; nur
//! [`close_loop`] erzeugt bewusst einen zweiten eingehenden Messzug.

use super::{Leg, LegId, Station, StationId, Survey, SurveyError};
use serde::{Deserialize, Serialize};

/// Anzahl identischer Splays, die als Messzug gewertet werden.
pub const DEFAULT_REPEATS_FOR_NEW_STATION: usize = 3;
/// Maximale Distanzabweichung innerhalb einer Wiederholungsserie.
pub const DEFAULT_MAX_DISTANCE_DELTA: f64 = 0.2;
/// Maximale Winkelabweichung (Grad) innerhalb einer Wiederholungsserie.
pub const DEFAULT_MAX_ANGLE_DELTA: f64 = 1.7;

/// Einstellungen für die Erkennung wiederholter Messungen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOptions {
    /// Anzahl aufeinanderfolgender, übereinstimmender Splays (0 oder 1 = aus)
    pub repeats_for_new_station: usize,
    /// Toleranz Distanz
    pub max_distance_delta: f64,
    /// Toleranz Azimut/Neigung in Grad
    pub max_angle_delta: f64,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            repeats_for_new_station: DEFAULT_REPEATS_FOR_NEW_STATION,
            max_distance_delta: DEFAULT_MAX_DISTANCE_DELTA,
            max_angle_delta: DEFAULT_MAX_ANGLE_DELTA,
        }
    }
}

impl UpdateOptions {
    /// Optionen ohne Wiederholungserkennung (z.B. für Importe)
    pub fn without_promotion() -> Self {
        Self {
            repeats_for_new_station: 0,
            ..Self::default()
        }
    }
}

/// Ergebnis von [`update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Splay wurde angehängt
    Splay(LegId),
    /// Wiederholte Splays wurden zu einem Messzug zur neuen Station zusammengefasst
    Promoted { leg: LegId, station: StationId },
}

/// Hängt einen Splay an die aktive Station an (Standardoptionen).
pub fn update(survey: &mut Survey, leg: Leg) -> Result<UpdateOutcome, SurveyError> {
    update_with_options(survey, leg, &UpdateOptions::default())
}

/// Hängt einen Splay an die aktive Station an.
///
/// Die aktive Station bleibt unverändert, außer die letzten N Splays stimmen
/// überein: dann werden sie durch einen gemittelten Messzug zu einer neuen
/// Station ersetzt, die aktiv wird.
pub fn update_with_options(
    survey: &mut Survey,
    leg: Leg,
    options: &UpdateOptions,
) -> Result<UpdateOutcome, SurveyError> {
    if leg.has_destination() {
        return Err(SurveyError::InvalidLeg(
            "Splay darf keine Zielstation haben".to_string(),
        ));
    }

    let active = survey.active_station();
    let leg_id = survey.attach_leg(active, leg);

    if options.repeats_for_new_station > 1 && has_repeated_splays(survey, active, options) {
        let repeats = survey.detach_trailing_legs(active, options.repeats_for_new_station);
        let (promoted, station) = create_promoted_station(survey, active, repeats)?;
        log::debug!(
            "{} wiederholte Messungen an {} zu Station {} zusammengefasst",
            options.repeats_for_new_station,
            survey.station_name(active),
            survey.station_name(station)
        );
        return Ok(UpdateOutcome::Promoted {
            leg: promoted,
            station,
        });
    }

    Ok(UpdateOutcome::Splay(leg_id))
}

/// Prüft ob die letzten N Messzüge der Station übereinstimmende Splays sind.
fn has_repeated_splays(survey: &Survey, station: StationId, options: &UpdateOptions) -> bool {
    let Some(onward) = survey.station(station).map(Station::onward_legs) else {
        return false;
    };
    let count = options.repeats_for_new_station;
    if onward.len() < count {
        return false;
    }

    let tail: Vec<&Leg> = onward[onward.len() - count..]
        .iter()
        .filter_map(|id| survey.leg(*id))
        .collect();
    if tail.len() != count || tail.iter().any(|l| l.has_destination()) {
        return false;
    }

    tail.iter().enumerate().all(|(i, a)| {
        tail[i + 1..]
            .iter()
            .all(|b| a.agrees_with(b, options.max_distance_delta, options.max_angle_delta))
    })
}

fn create_promoted_station(
    survey: &mut Survey,
    source: StationId,
    repeats: Vec<Leg>,
) -> Result<(LegId, StationId), SurveyError> {
    let average = Leg::average(&repeats)
        .ok_or_else(|| SurveyError::InvalidLeg("keine Messungen zum Mitteln".to_string()))?;
    let name = survey.next_station_name();
    let station = survey.add_detached_station(Station::new(name));
    let promoted = average
        .with_destination(station)
        .with_promoted_from(repeats);
    let leg_id = survey.attach_leg(source, promoted);
    survey.set_active(station);
    Ok((leg_id, station))
}

/// Verbindet die aktive Station über `leg` mit einer neuen Station.
///
/// Hat der Messzug kein Ziel, wird eine Station mit dem nächsten freien Namen
/// erzeugt. Ein vorgegebenes Ziel muss frisch sein (nicht Ursprung, kein
/// eingehender Messzug). Das Ziel wird zur aktiven Station.
pub fn update_with_new_station(survey: &mut Survey, leg: Leg) -> Result<StationId, SurveyError> {
    let destination = match leg.destination() {
        Some(destination) => {
            let station = survey
                .station(destination)
                .ok_or_else(|| SurveyError::UnknownStation(format!("#{}", destination.index())))?;
            if survey.is_attached(destination) {
                return Err(SurveyError::DestinationAttached(station.name().to_string()));
            }
            destination
        }
        None => {
            let name = survey.next_station_name();
            survey.add_detached_station(Station::new(name))
        }
    };

    let active = survey.active_station();
    survey.attach_leg(active, leg.with_destination(destination));
    survey.set_active(destination);
    Ok(destination)
}

/// Setzt die aktive Station; nur erreichbare Stationen sind erlaubt.
pub fn set_active_station(survey: &mut Survey, station: StationId) -> Result<(), SurveyError> {
    if survey.station(station).is_none() || !survey.is_attached(station) {
        return Err(SurveyError::UnknownStation(format!("#{}", station.index())));
    }
    survey.set_active(station);
    Ok(())
}

/// Schließt eine Schleife: Messzug von der aktiven zu einer bereits verbundenen Station.
///
/// Das Ziel wird zur aktiven Station. Projektionen platzieren es weiterhin nur
/// über den ersten Besuch.
pub fn close_loop(
    survey: &mut Survey,
    leg: Leg,
    existing: StationId,
) -> Result<LegId, SurveyError> {
    if survey.station(existing).is_none() || !survey.is_attached(existing) {
        return Err(SurveyError::UnknownStation(format!("#{}", existing.index())));
    }
    let active = survey.active_station();
    let leg_id = survey.attach_leg(active, leg.with_destination(existing));
    survey.set_active(existing);
    Ok(leg_id)
}
