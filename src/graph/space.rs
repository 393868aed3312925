//! Unveränderlicher Schnappschuss einer Projektion.

use indexmap::IndexMap;

use crate::core::{Coord2D, LegId, Line2D, StationId};

/// Projizierte Positionen aller erreichbaren Stationen und Messzüge.
///
/// Die Reihenfolge entspricht der Traversierung ab dem Ursprung und ist damit
/// für identische Surveys stabil. Nach einer Änderung am Survey muss neu
/// projiziert werden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Space {
    station_map: IndexMap<StationId, Coord2D>,
    leg_map: IndexMap<LegId, Line2D>,
    splay_map: IndexMap<LegId, Line2D>,
}

impl Space {
    /// Stationen → Position
    pub fn station_map(&self) -> &IndexMap<StationId, Coord2D> {
        &self.station_map
    }

    /// Verbundene Messzüge → Segment
    pub fn leg_map(&self) -> &IndexMap<LegId, Line2D> {
        &self.leg_map
    }

    /// Splays → Segment
    pub fn splay_map(&self) -> &IndexMap<LegId, Line2D> {
        &self.splay_map
    }

    pub fn station_position(&self, station: StationId) -> Option<Coord2D> {
        self.station_map.get(&station).copied()
    }

    /// Segment eines verbundenen Messzugs oder Splays
    pub fn leg_line(&self, leg: LegId) -> Option<Line2D> {
        self.leg_map
            .get(&leg)
            .or_else(|| self.splay_map.get(&leg))
            .copied()
    }

    pub(crate) fn add_station(&mut self, station: StationId, position: Coord2D) {
        self.station_map.entry(station).or_insert(position);
    }

    pub(crate) fn add_leg(&mut self, leg: LegId, line: Line2D) {
        self.leg_map.insert(leg, line);
    }

    pub(crate) fn add_splay(&mut self, leg: LegId, line: Line2D) {
        self.splay_map.insert(leg, line);
    }

    /// Hüllrechteck über Stationen und alle Segmente (min, max)
    pub fn bounds(&self) -> Option<(Coord2D, Coord2D)> {
        let mut points = self.station_map.values().copied().chain(
            self.leg_map
                .values()
                .chain(self.splay_map.values())
                .flat_map(|line| [line.start, line.end]),
        );
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}
