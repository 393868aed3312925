//! Metadaten einer Vermessungstour (Datum, Team).

use chrono::NaiveDate;

/// Rolle eines Teammitglieds während der Vermessung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Protokoll / Skizze
    Book,
    /// Messgeräte
    Instruments,
    /// Messpunkt-Halter ("Hund")
    Dog,
    /// Erkundung
    Explorer,
}

impl Role {
    /// Survex-Schlüsselwort der Rolle (`*team`-Befehl)
    pub fn survex_keyword(self) -> &'static str {
        match self {
            Role::Book => "notes",
            Role::Instruments => "instruments",
            Role::Dog => "dog",
            Role::Explorer => "explorer",
        }
    }

    /// Liest ein Survex-Schlüsselwort; unbekannte Rollen ergeben `None`.
    pub fn from_survex_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "notes" | "book" => Some(Role::Book),
            "instruments" | "insts" | "compass" | "clino" | "tape" => Some(Role::Instruments),
            "dog" | "assistant" => Some(Role::Dog),
            "explorer" => Some(Role::Explorer),
            _ => None,
        }
    }
}

/// Teammitglied mit seinen Rollen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    pub name: String,
    pub roles: Vec<Role>,
}

impl TeamEntry {
    pub fn new(name: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            name: name.into(),
            roles,
        }
    }
}

/// Vermessungstour
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trip {
    /// Datum der Tour
    pub date: Option<NaiveDate>,
    /// Team in Eingabereihenfolge
    pub team: Vec<TeamEntry>,
    /// Freitext
    pub comment: String,
}

impl Trip {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    pub fn with_team(mut self, team: Vec<TeamEntry>) -> Self {
        self.team = team;
        self
    }
}
