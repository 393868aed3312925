//! Repräsentiert eine Messstation mit ihren abgehenden Messzügen.

use super::LegId;

/// Handle auf eine Station in der Arena eines Surveys.
///
/// Identität einer Station ist immer das Handle, nie der Name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub(crate) usize);

impl StationId {
    /// Index in der Station-Arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Eine Messstation
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    name: String,
    onward_legs: Vec<LegId>,
    comment: String,
}

impl Station {
    /// Erstellt eine neue Station ohne Messzüge
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            onward_legs: Vec::new(),
            comment: String::new(),
        }
    }

    /// Erstellt eine Station mit Kommentar
    pub fn with_comment(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            ..Self::new(name)
        }
    }

    /// Anzeigename; muss nicht eindeutig sein
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Alle abgehenden Messzüge in Einfügereihenfolge
    pub fn onward_legs(&self) -> &[LegId] {
        &self.onward_legs
    }

    pub(crate) fn onward_legs_mut(&mut self) -> &mut Vec<LegId> {
        &mut self.onward_legs
    }

    /// Freitext-Kommentar (leer wenn keiner gesetzt)
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }
}
