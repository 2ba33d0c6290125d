use crate::utils::*;
use serde::{Deserialize, Serialize};

/// Player preferences that outlive a page load.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "grassweeper:settings";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sound_starts_enabled() {
        assert!(Settings::default().sound_enabled);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());

        let settings: Settings = serde_json::from_str(r#"{"sound_enabled":false}"#).unwrap();
        assert!(!settings.sound_enabled);
    }

    #[test]
    fn storage_keys_are_namespaced() {
        assert_eq!(<Settings as StorageKey>::KEY, "grassweeper:settings");
        assert_eq!(
            <grassweeper_core::BestTime as StorageKey>::KEY,
            "grassweeper:best-time"
        );
    }
}
