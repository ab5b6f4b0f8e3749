// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — UACA Personas
// ─────────────────────────────────────────────────────────────────────
//! Persona roster. A persona only matters to the engine through its
//! preferred phase, which biases randomized phase transitions.

use serde::{Deserialize, Serialize};

use crate::state::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub preferred_phase: Option<Phase>,
}

impl Persona {
    pub fn new(name: impl Into<String>, preferred_phase: Option<Phase>) -> Self {
        Self {
            name: name.into(),
            preferred_phase,
        }
    }
}

/// Built-in roster; the first entry is active on construction.
pub const DEFAULT_PERSONAS: [(&str, Option<Phase>); 5] = [
    ("GCE Core", None),
    ("Scientist", Some(Phase::Apollonian)),
    ("Philosopher", Some(Phase::Hegelian)),
    ("Artist", Some(Phase::Dionysian)),
    ("Programmer", Some(Phase::Apollonian)),
];

pub fn default_roster() -> Vec<Persona> {
    DEFAULT_PERSONAS
        .iter()
        .map(|&(name, phase)| Persona::new(name, phase))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_core_is_unbiased() {
        let roster = default_roster();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster[0].name, "GCE Core");
        assert!(roster[0].preferred_phase.is_none());
    }

    #[test]
    fn test_artist_prefers_dissolving() {
        let roster = default_roster();
        let artist = roster.iter().find(|p| p.name == "Artist").unwrap();
        assert_eq!(artist.preferred_phase, Some(Phase::Dionysian));
    }
}
