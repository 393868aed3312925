//! Geometrie-Grundtypen für Projektionen und Skizzen.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// 2D-Koordinate in einem projizierten Raum (x = rechts, y = oben).
pub type Coord2D = DVec2;

/// 3D-Koordinate (x = Ost, y = Nord, z = oben).
pub type Coord3D = DVec3;

/// Spiegelt eine Koordinate an der x-Achse (Bildschirm-y ⇔ Welt-y).
pub fn flip_vertically(coord: Coord2D) -> Coord2D {
    DVec2::new(coord.x, -coord.y)
}

/// Gerades Liniensegment zwischen zwei projizierten Punkten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line2D {
    /// Startpunkt
    pub start: Coord2D,
    /// Endpunkt
    pub end: Coord2D,
}

impl Line2D {
    /// Erstellt ein neues Segment
    pub fn new(start: Coord2D, end: Coord2D) -> Self {
        Self { start, end }
    }

    /// Länge des Segments
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}
