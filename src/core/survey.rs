//! Die zentrale Survey-Datenstruktur: Arena aus Stationen und Messzügen.

use super::{Leg, LegId, Sketch, Station, StationId, SurveyError, Trip};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Name der Ursprungsstation eines neuen Surveys
pub const DEFAULT_ORIGIN_NAME: &str = "1";

/// Ergebnis einer Tiefensuche ab dem Ursprung.
///
/// `stations` in Besuchsreihenfolge (jede Station genau einmal),
/// `legs` in der Reihenfolge, in der sie beim Abstieg angetroffen werden.
#[derive(Debug, Clone, Default)]
pub struct Traversal {
    pub stations: Vec<StationId>,
    pub legs: Vec<LegId>,
}

/// Vollständige Höhlenvermessung
#[derive(Debug, Clone)]
pub struct Survey {
    name: String,
    stations: Vec<Station>,
    legs: Vec<Leg>,
    /// Quellstation je Eintrag in `legs`
    leg_sources: Vec<StationId>,
    /// Angehängte Messzüge, die in der jeweiligen Station enden (parallel zu `stations`)
    incoming: Vec<Vec<LegId>>,
    origin: StationId,
    active: StationId,
    trip: Option<Trip>,
    /// Ablageort des Projekts (wird vom Aufrufer verwaltet)
    directory: Option<PathBuf>,
    saved: bool,
    plan_sketch: Sketch,
    elevation_sketch: Sketch,
}

impl Survey {
    /// Erstellt einen leeren Survey mit Ursprungsstation "1"
    pub fn new(name: impl Into<String>) -> Self {
        let origin = StationId(0);
        Self {
            name: name.into(),
            stations: vec![Station::new(DEFAULT_ORIGIN_NAME)],
            legs: Vec::new(),
            leg_sources: Vec::new(),
            incoming: vec![Vec::new()],
            origin,
            active: origin,
            trip: None,
            directory: None,
            saved: false,
            plan_sketch: Sketch::new(),
            elevation_sketch: Sketch::new(),
        }
    }

    /// Name des Surveys (z.B. Dateiname ohne Endung)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Ablageort des Projekts, falls bekannt
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn set_directory(&mut self, directory: Option<PathBuf>) {
        self.directory = directory;
    }

    /// Fixpunkt (0,0,0) des Graphen
    pub fn origin(&self) -> StationId {
        self.origin
    }

    /// Station, von der der nächste Messzug ausgeht
    pub fn active_station(&self) -> StationId {
        self.active
    }

    pub(crate) fn set_active(&mut self, station: StationId) {
        self.active = station;
    }

    /// Station zum Handle, auch wenn sie (noch) nicht erreichbar ist
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.0)
    }

    /// Veränderlicher Zugriff; markiert den Survey als ungespeichert.
    pub fn station_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.saved = false;
        self.stations.get_mut(id.0)
    }

    /// Name einer Station (leer bei fremdem Handle)
    pub fn station_name(&self, id: StationId) -> &str {
        self.station(id).map(Station::name).unwrap_or("")
    }

    /// Messzug zum Handle
    pub fn leg(&self, id: LegId) -> Option<&Leg> {
        self.legs.get(id.0)
    }

    /// Station, an der der Messzug hängt
    pub fn leg_source(&self, id: LegId) -> Option<StationId> {
        self.leg_sources.get(id.0).copied()
    }

    /// Legt eine noch nicht verbundene Station an (Ziel für `update_with_new_station`).
    pub fn add_detached_station(&mut self, station: Station) -> StationId {
        self.stations.push(station);
        self.incoming.push(Vec::new());
        StationId(self.stations.len() - 1)
    }

    /// Benennt eine Station um; Namen müssen nicht eindeutig sein.
    pub fn rename_station(
        &mut self,
        id: StationId,
        name: impl Into<String>,
    ) -> Result<(), SurveyError> {
        let station = self
            .stations
            .get_mut(id.0)
            .ok_or_else(|| SurveyError::UnknownStation(format!("#{}", id.0)))?;
        station.set_name(name.into());
        self.saved = false;
        Ok(())
    }

    /// Hängt einen Messzug an eine Station an und gibt sein Handle zurück.
    pub(crate) fn attach_leg(&mut self, source: StationId, leg: Leg) -> LegId {
        self.legs.push(leg);
        self.leg_sources.push(source);
        let id = LegId(self.legs.len() - 1);
        if let Some(destination) = self.legs[id.0].destination() {
            self.incoming[destination.0].push(id);
        }
        self.stations[source.0].onward_legs_mut().push(id);
        self.saved = false;
        id
    }

    /// Entfernt die letzten `count` Messzüge einer Station aus ihrer Abfolge.
    ///
    /// Die Einträge bleiben in der Arena (Handles bleiben stabil), sind aber
    /// nicht mehr erreichbar.
    pub(crate) fn detach_trailing_legs(&mut self, source: StationId, count: usize) -> Vec<Leg> {
        let onward = self.stations[source.0].onward_legs_mut();
        let split = onward.len().saturating_sub(count);
        let removed: Vec<LegId> = onward.split_off(split);
        for id in &removed {
            if let Some(destination) = self.legs[id.0].destination() {
                self.incoming[destination.0].retain(|leg| leg != id);
            }
        }
        self.saved = false;
        removed
            .into_iter()
            .map(|id| self.legs[id.0].clone())
            .collect()
    }

    /// Tiefensuche ab dem Ursprung; Abzweige in Einfügereihenfolge, erster Besuch gewinnt.
    pub fn traverse(&self) -> Traversal {
        let mut visited = vec![false; self.stations.len()];
        let mut traversal = Traversal::default();

        visited[self.origin.0] = true;
        traversal.stations.push(self.origin);
        let mut stack: Vec<(StationId, usize)> = vec![(self.origin, 0)];

        while let Some(frame) = stack.last_mut() {
            let (station_id, next) = *frame;
            let onward = self.stations[station_id.0].onward_legs();
            if next >= onward.len() {
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let leg_id = onward[next];
            traversal.legs.push(leg_id);
            if let Some(destination) = self.legs[leg_id.0].destination() {
                if !visited[destination.0] {
                    visited[destination.0] = true;
                    traversal.stations.push(destination);
                    stack.push((destination, 0));
                }
            }
        }

        traversal
    }

    /// Alle vom Ursprung erreichbaren Stationen
    pub fn all_stations(&self) -> Vec<StationId> {
        self.traverse().stations
    }

    /// Anzahl erreichbarer Stationen
    pub fn station_count(&self) -> usize {
        self.all_stations().len()
    }

    /// Alle erreichbaren Messzüge (verbundene und Splays)
    pub fn all_legs(&self) -> Vec<LegId> {
        self.traverse().legs
    }

    /// Alle erreichbaren Messzüge mit Zielstation
    pub fn connected_legs(&self) -> Vec<LegId> {
        self.all_legs()
            .into_iter()
            .filter(|id| self.legs[id.0].has_destination())
            .collect()
    }

    /// Verbundene Messzüge einer Station
    pub fn connected_onward_legs(&self, station: StationId) -> Vec<LegId> {
        self.onward_legs_where(station, true)
    }

    /// Splays einer Station
    pub fn unconnected_onward_legs(&self, station: StationId) -> Vec<LegId> {
        self.onward_legs_where(station, false)
    }

    fn onward_legs_where(&self, station: StationId, connected: bool) -> Vec<LegId> {
        self.station(station)
            .map(|s| {
                s.onward_legs()
                    .iter()
                    .copied()
                    .filter(|id| self.legs[id.0].has_destination() == connected)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Messzüge, die in `station` enden, in Anhängereihenfolge
    ///
    /// Messzüge werden nur an erreichbaren Stationen angehängt, daher sind alle
    /// Einträge erreichbar.
    pub fn incoming_legs(&self, station: StationId) -> Vec<LegId> {
        self.incoming.get(station.0).cloned().unwrap_or_default()
    }

    /// Station ist der Ursprung oder über einen Messzug erreichbar
    pub fn is_attached(&self, station: StationId) -> bool {
        station == self.origin
            || self
                .incoming
                .get(station.0)
                .is_some_and(|legs| !legs.is_empty())
    }

    /// Alle erreichbaren Stationen mit diesem Namen (Namen sind nicht eindeutig).
    pub fn stations_by_name(&self, name: &str) -> Vec<StationId> {
        self.all_stations()
            .into_iter()
            .filter(|id| self.stations[id.0].name() == name)
            .collect()
    }

    /// Erste Station dieses Namens in Besuchsreihenfolge
    pub fn station_by_name(&self, name: &str) -> Option<StationId> {
        self.stations_by_name(name).into_iter().next()
    }

    /// Nächster freier Stationsname, abgeleitet von der aktiven Station.
    ///
    /// Eine Zahl am Namensende wird hochgezählt (`A9` → `A10`, `07` → `08`),
    /// ansonsten wird `1` angehängt. Läuft der Zähler über, wird an den ganzen
    /// Namen neu angehängt.
    pub fn next_station_name(&self) -> String {
        let used: HashSet<&str> = self
            .all_stations()
            .into_iter()
            .map(|id| self.stations[id.0].name())
            .collect();

        let base = self.station_name(self.active);
        let digits_start = base
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)
            .unwrap_or(base.len());
        let (mut prefix, digits) = base.split_at(digits_start);
        let mut width = digits.len();
        let mut number = match digits.parse::<u64>() {
            Ok(number) => number,
            Err(_) if digits.is_empty() => 0,
            // Zahl passt nicht in u64
            Err(_) => {
                prefix = base;
                width = 0;
                0
            }
        };

        loop {
            number = match number.checked_add(1) {
                Some(next) => next,
                None => {
                    prefix = base;
                    width = 0;
                    1
                }
            };
            let candidate = format!("{prefix}{number:0width$}");
            if !used.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }

    /// Tour-Metadaten (Datum, Team), falls vorhanden
    pub fn trip(&self) -> Option<&Trip> {
        self.trip.as_ref()
    }

    pub fn set_trip(&mut self, trip: Option<Trip>) {
        self.trip = trip;
        self.saved = false;
    }

    /// `false` nach jeder Änderung seit dem letzten Laden/Speichern
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn set_saved(&mut self, saved: bool) {
        self.saved = saved;
    }

    /// Skizze zum Grundriss
    pub fn plan_sketch(&self) -> &Sketch {
        &self.plan_sketch
    }

    pub fn plan_sketch_mut(&mut self) -> &mut Sketch {
        self.saved = false;
        &mut self.plan_sketch
    }

    pub fn set_plan_sketch(&mut self, sketch: Sketch) {
        self.plan_sketch = sketch;
        self.saved = false;
    }

    /// Skizze zum abgewickelten Aufriss
    pub fn elevation_sketch(&self) -> &Sketch {
        &self.elevation_sketch
    }

    pub fn elevation_sketch_mut(&mut self) -> &mut Sketch {
        self.saved = false;
        &mut self.elevation_sketch
    }

    pub fn set_elevation_sketch(&mut self, sketch: Sketch) {
        self.elevation_sketch = sketch;
        self.saved = false;
    }
}

impl Default for Survey {
    fn default() -> Self {
        Self::new("survey")
    }
}

#[cfg(test)]
mod tests;
