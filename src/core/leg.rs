//! Repräsentiert einen einzelnen Messzug (Distanz, Azimut, Neigung).

use super::{Coord3D, StationId, SurveyError};

/// Handle auf einen Messzug in der Arena eines Surveys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LegId(pub(crate) usize);

impl LegId {
    /// Index in der Leg-Arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Gerichtete Messung von einer Station aus.
///
/// Ohne Ziel ist der Messzug ein Splay (Wand-/Detailmessung). Ein Splay bekommt
/// nie nachträglich ein Ziel – eine Promotion erzeugt immer einen neuen Messzug.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    distance: f64,
    azimuth: f64,
    inclination: f64,
    destination: Option<StationId>,
    promoted_from: Vec<Leg>,
}

impl Leg {
    /// Erstellt einen Splay. Prüft Wertebereiche; Azimut 360° wird zu 0°.
    pub fn new(distance: f64, azimuth: f64, inclination: f64) -> Result<Self, SurveyError> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(SurveyError::InvalidLeg(format!(
                "Distanz {distance} muss >= 0 sein"
            )));
        }
        if !azimuth.is_finite() || !(0.0..=360.0).contains(&azimuth) {
            return Err(SurveyError::InvalidLeg(format!(
                "Azimut {azimuth} liegt nicht in 0..360"
            )));
        }
        if !inclination.is_finite() || !(-90.0..=90.0).contains(&inclination) {
            return Err(SurveyError::InvalidLeg(format!(
                "Neigung {inclination} liegt nicht in -90..90"
            )));
        }

        Ok(Self {
            distance,
            azimuth: if azimuth == 360.0 { 0.0 } else { azimuth },
            inclination,
            destination: None,
            promoted_from: Vec::new(),
        })
    }

    /// Erstellt einen Messzug mit Zielstation.
    pub fn to_station(
        distance: f64,
        azimuth: f64,
        inclination: f64,
        destination: StationId,
    ) -> Result<Self, SurveyError> {
        Ok(Self::new(distance, azimuth, inclination)?.with_destination(destination))
    }

    /// Setzt das Ziel (nur für frisch gebaute Messzüge gedacht).
    pub fn with_destination(mut self, destination: StationId) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Hinterlegt die Einzelmessungen, aus denen dieser Messzug entstanden ist.
    pub fn with_promoted_from(mut self, legs: Vec<Leg>) -> Self {
        self.promoted_from = legs
            .into_iter()
            .map(|mut leg| {
                leg.destination = None;
                leg
            })
            .collect();
        self
    }

    /// Schräge Distanz in Metern
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Azimut in Grad, `[0, 360)`
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Neigung in Grad, `[-90, 90]`, positiv nach oben
    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    /// Zielstation; `None` bei Splays
    pub fn destination(&self) -> Option<StationId> {
        self.destination
    }

    pub fn has_destination(&self) -> bool {
        self.destination.is_some()
    }

    /// Einzelmessungen in Originalreihenfolge (leer wenn nicht promotet)
    pub fn promoted_from(&self) -> &[Leg] {
        &self.promoted_from
    }

    /// Entstand aus wiederholten Messungen
    pub fn was_promoted(&self) -> bool {
        !self.promoted_from.is_empty()
    }

    /// Horizontaler Anteil der Distanz
    pub fn horizontal_run(&self) -> f64 {
        self.distance * self.inclination.to_radians().cos()
    }

    /// Vertikaler Anteil der Distanz (positiv = nach oben)
    pub fn vertical_delta(&self) -> f64 {
        self.distance * self.inclination.to_radians().sin()
    }

    /// Verschiebung im 3D-Raum (Ost, Nord, oben)
    pub fn displacement(&self) -> Coord3D {
        let run = self.horizontal_run();
        let azimuth = self.azimuth.to_radians();
        Coord3D::new(
            run * azimuth.sin(),
            run * azimuth.cos(),
            self.vertical_delta(),
        )
    }

    /// Prüft ob zwei Messungen innerhalb der Toleranzen übereinstimmen.
    pub fn agrees_with(&self, other: &Leg, max_distance_delta: f64, max_angle_delta: f64) -> bool {
        (self.distance - other.distance).abs() <= max_distance_delta
            && angle_between(self.azimuth, other.azimuth) <= max_angle_delta
            && (self.inclination - other.inclination).abs() <= max_angle_delta
    }

    /// Mittelwert mehrerer Messungen; der Azimut wird zirkulär gemittelt (359° + 1° = 0°).
    pub fn average(legs: &[Leg]) -> Option<Leg> {
        if legs.is_empty() {
            return None;
        }
        let count = legs.len() as f64;
        let distance = legs.iter().map(|l| l.distance).sum::<f64>() / count;
        let inclination = legs.iter().map(|l| l.inclination).sum::<f64>() / count;

        let (sin_sum, cos_sum) = legs.iter().fold((0.0, 0.0), |(s, c), l| {
            let a = l.azimuth.to_radians();
            (s + a.sin(), c + a.cos())
        });
        let azimuth = normalise_azimuth(sin_sum.atan2(cos_sum).to_degrees());

        Some(Leg {
            distance,
            azimuth,
            inclination,
            destination: None,
            promoted_from: Vec::new(),
        })
    }
}

/// Kleinster Winkel zwischen zwei Peilungen (0..=180).
pub fn angle_between(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

fn normalise_azimuth(azimuth: f64) -> f64 {
    let normalised = azimuth.rem_euclid(360.0);
    // rem_euclid kann bei -1e-17 genau 360.0 liefern
    if normalised >= 360.0 {
        0.0
    } else {
        normalised
    }
}
