//! Zentrale Konfiguration für cave-survey.
//!
//! `ToolOptions` bündelt die Updater-Toleranzen und die XVI-Exporteinstellungen.
//! Fehlende Werte in der Datei fallen auf die Standardwerte zurück.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::UpdateOptions;
use crate::io::XviOptions;

/// Dateiname der Optionen-Datei neben der Binary
pub const CONFIG_FILE_NAME: &str = "cave_survey.toml";

/// Alle Laufzeit-Optionen.
/// Wird als `cave_survey.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolOptions {
    /// Erkennung wiederholter Messungen (`[updater]`)
    #[serde(default)]
    pub updater: UpdateOptions,
    /// XVI-Export (`[xvi]`)
    #[serde(default)]
    pub xvi: XviOptions,
}

impl ToolOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("Optionen-Datei '{}' nicht schreibbar", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("cave-survey"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(CONFIG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let opts: ToolOptions = toml::from_str("[updater]\nrepeats_for_new_station = 4\n")
            .expect("Parsing fehlgeschlagen");
        assert_eq!(opts.updater.repeats_for_new_station, 4);
        assert_eq!(opts.updater.max_angle_delta, UpdateOptions::default().max_angle_delta);
        assert_eq!(opts.xvi, XviOptions::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "cave_survey_options_{}.toml",
            std::process::id()
        ));
        let mut opts = ToolOptions::default();
        opts.xvi.dpi = 300.0;
        opts.updater.max_distance_delta = 0.05;

        opts.save_to_file(&path).expect("Speichern fehlgeschlagen");
        let loaded = ToolOptions::load_from_file(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, opts);
    }

    #[test]
    fn test_missing_or_broken_file_falls_back_to_defaults() {
        let missing = std::env::temp_dir().join("cave_survey_does_not_exist.toml");
        assert_eq!(ToolOptions::load_from_file(&missing), ToolOptions::default());

        let broken = std::env::temp_dir().join(format!(
            "cave_survey_broken_{}.toml",
            std::process::id()
        ));
        std::fs::write(&broken, "[xvi\ndpi = ").expect("Schreiben fehlgeschlagen");
        let loaded = ToolOptions::load_from_file(&broken);
        let _ = std::fs::remove_file(&broken);
        assert_eq!(loaded, ToolOptions::default());
    }

    #[test]
    fn test_config_path_file_name() {
        assert!(ToolOptions::config_path().ends_with(CONFIG_FILE_NAME));
    }
}
