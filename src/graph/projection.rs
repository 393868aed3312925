//! Projektion des 3D-Vermessungsgraphen in 2D-Ansichten.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Space;
use crate::core::leg::angle_between;
use crate::core::{Coord2D, Leg, LegId, Line2D, Sketch, StationId, Survey};

/// Unterhalb dieses horizontalen Anteils gilt ein Messzug als senkrecht.
const VERTICAL_RUN_EPSILON: f64 = 1e-6;

/// Verfügbare 2D-Ansichten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection2D {
    /// Grundriss: x = Ost, y = Nord
    #[default]
    Plan,
    /// Abgewickelter Aufriss: x = horizontale Abwicklung, y = oben
    ExtendedElevation,
}

impl Projection2D {
    /// Projiziert alle vom Ursprung erreichbaren Stationen und Messzüge.
    ///
    /// Eine Tiefensuche (Abzweige in Einfügereihenfolge) platziert jede Station
    /// beim ersten Besuch. Ein Schleifenschluss zeichnet nur sein Segment zur
    /// bereits platzierten Station.
    pub fn project(self, survey: &Survey) -> Space {
        match self {
            Projection2D::Plan => project_plan(survey),
            Projection2D::ExtendedElevation => project_extended_elevation(survey),
        }
    }

    /// Skizze des Surveys, die zu dieser Ansicht gehört
    pub fn sketch(self, survey: &Survey) -> &Sketch {
        match self {
            Projection2D::Plan => survey.plan_sketch(),
            Projection2D::ExtendedElevation => survey.elevation_sketch(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Projection2D::Plan => "plan",
            Projection2D::ExtendedElevation => "extended_elevation",
        }
    }
}

fn project_plan(survey: &Survey) -> Space {
    let mut space = Space::default();
    space.add_station(survey.origin(), Coord2D::ZERO);

    for (leg_id, leg, source) in traversal_legs(survey) {
        let Some(start) = space.station_position(source) else {
            continue;
        };
        let displacement = leg.displacement();
        let end = start + Coord2D::new(displacement.x, displacement.y);
        place_leg(&mut space, leg_id, leg, start, end);
    }

    space
}

/// Zeichenrichtung einer Station im Aufriss
#[derive(Debug, Clone, Copy)]
struct ElevationHeading {
    /// Peilung, gegen die Abzweige verglichen werden
    reference_bearing: f64,
    /// +1 = nach rechts, -1 = nach links
    direction: f64,
}

/// Abgewickelter Aufriss.
///
/// Der Ursprung zeichnet nach rechts, Referenz ist der Azimut seines ersten
/// Messzugs. Weicht ein Messzug um mehr als 90° von der Referenz seiner
/// Quellstation ab, kehrt sich die Zeichenrichtung um. Die Zielstation erbt
/// Azimut und Richtung des Messzugs; bei senkrechten Messzügen die der Quelle.
fn project_extended_elevation(survey: &Survey) -> Space {
    let mut space = Space::default();
    let origin = survey.origin();
    space.add_station(origin, Coord2D::ZERO);

    let first_bearing = survey
        .station(origin)
        .and_then(|s| s.onward_legs().first())
        .and_then(|id| survey.leg(*id))
        .map(Leg::azimuth)
        .unwrap_or(0.0);

    let mut headings: HashMap<StationId, ElevationHeading> = HashMap::new();
    headings.insert(
        origin,
        ElevationHeading {
            reference_bearing: first_bearing,
            direction: 1.0,
        },
    );

    for (leg_id, leg, source) in traversal_legs(survey) {
        let (Some(start), Some(heading)) =
            (space.station_position(source), headings.get(&source).copied())
        else {
            continue;
        };

        let direction = if angle_between(leg.azimuth(), heading.reference_bearing) > 90.0 {
            -heading.direction
        } else {
            heading.direction
        };
        let run = leg.horizontal_run();
        let end = start + Coord2D::new(direction * run, leg.vertical_delta());

        if let Some(destination) = leg.destination() {
            let inherited = if run.abs() < VERTICAL_RUN_EPSILON {
                heading
            } else {
                ElevationHeading {
                    reference_bearing: leg.azimuth(),
                    direction,
                }
            };
            headings.entry(destination).or_insert(inherited);
        }

        place_leg(&mut space, leg_id, leg, start, end);
    }

    space
}

/// Messzüge in Traversierungsreihenfolge mit ihrer Quellstation
fn traversal_legs(survey: &Survey) -> impl Iterator<Item = (LegId, &Leg, StationId)> {
    survey
        .traverse()
        .legs
        .into_iter()
        .filter_map(move |id| Some((id, survey.leg(id)?, survey.leg_source(id)?)))
}

fn place_leg(space: &mut Space, leg_id: LegId, leg: &Leg, start: Coord2D, end: Coord2D) {
    match leg.destination() {
        None => space.add_splay(leg_id, Line2D::new(start, end)),
        Some(destination) => {
            let end = match space.station_position(destination) {
                Some(existing) => existing,
                None => {
                    space.add_station(destination, end);
                    end
                }
            };
            space.add_leg(leg_id, Line2D::new(start, end));
        }
    }
}
