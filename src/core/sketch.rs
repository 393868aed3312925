//! Handgezeichnete Skizzen: farbige Polylinien im Koordinatensystem einer Projektion.

use super::Coord2D;

/// Feste Zeichenpalette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Colour {
    #[default]
    Black,
    Grey,
    Brown,
    Blue,
    Red,
    Green,
    Orange,
    Purple,
}

impl Colour {
    /// Alle Farben der Palette
    pub const ALL: [Colour; 8] = [
        Colour::Black,
        Colour::Grey,
        Colour::Brown,
        Colour::Blue,
        Colour::Red,
        Colour::Green,
        Colour::Orange,
        Colour::Purple,
    ];

    /// Kleingeschriebener Name (Export-Schreibweise)
    pub fn name(self) -> &'static str {
        match self {
            Colour::Black => "black",
            Colour::Grey => "grey",
            Colour::Brown => "brown",
            Colour::Blue => "blue",
            Colour::Red => "red",
            Colour::Green => "green",
            Colour::Orange => "orange",
            Colour::Purple => "purple",
        }
    }

    /// Sucht eine Farbe über ihren Namen (Groß-/Kleinschreibung egal).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|colour| colour.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Eine farbige Polylinie
#[derive(Debug, Clone, PartialEq)]
pub struct PathDetail {
    colour: Colour,
    path: Vec<Coord2D>,
}

impl PathDetail {
    /// Beginnt eine neue Linie am Startpunkt
    pub fn new(start: Coord2D, colour: Colour) -> Self {
        Self {
            colour,
            path: vec![start],
        }
    }

    /// Verlängert die Linie bis zum Punkt
    pub fn line_to(&mut self, point: Coord2D) {
        self.path.push(point);
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn points(&self) -> &[Coord2D] {
        &self.path
    }
}

/// Sammlung von Polylinien einer Ansicht (Grundriss oder Aufriss)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sketch {
    path_details: Vec<PathDetail>,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt eine Linie hinzu; gleiche Koordinaten werden nicht zusammengeführt.
    pub fn add_path_detail(&mut self, path_detail: PathDetail) {
        self.path_details.push(path_detail);
    }

    pub fn set_path_details(&mut self, path_details: Vec<PathDetail>) {
        self.path_details = path_details;
    }

    pub fn path_details(&self) -> &[PathDetail] {
        &self.path_details
    }

    pub fn is_empty(&self) -> bool {
        self.path_details.is_empty()
    }

    /// Achsenparalleles Hüllrechteck aller Punkte (min, max)
    pub fn bounds(&self) -> Option<(Coord2D, Coord2D)> {
        let mut points = self.path_details.iter().flat_map(|p| p.points().iter());
        let first = *points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))))
    }
}
