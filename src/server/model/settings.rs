//! Guild settings with defaults applied.

use std::collections::BTreeMap;

/// One effective setting of a guild.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
    /// Whether the guild stores its own value for this key.
    pub overridden: bool,
}

impl SettingEntry {
    /// Boolean-valued settings are shown as module toggles.
    pub fn is_toggle(&self) -> bool {
        self.value == "true" || self.value == "false"
    }

    pub fn enabled(&self) -> bool {
        self.value == "true"
    }
}

/// Effective settings of a guild: defaults with the guild's overrides applied.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildSettings {
    pub guild_id: u64,
    pub entries: Vec<SettingEntry>,
}

impl GuildSettings {
    /// Merges `overrides` over `defaults`; keys are ordered alphabetically.
    ///
    /// Overrides for keys without a default are kept as well.
    pub fn merge(
        guild_id: u64,
        defaults: &BTreeMap<String, String>,
        overrides: BTreeMap<String, String>,
    ) -> Self {
        let mut merged: BTreeMap<String, SettingEntry> = defaults
            .iter()
            .map(|(key, value)| {
                (
                    key.clone(),
                    SettingEntry {
                        key: key.clone(),
                        value: value.clone(),
                        overridden: false,
                    },
                )
            })
            .collect();

        for (key, value) in overrides {
            merged.insert(
                key.clone(),
                SettingEntry {
                    key,
                    value,
                    overridden: true,
                },
            );
        }

        Self {
            guild_id,
            entries: merged.into_values().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    pub fn toggles(&self) -> impl Iterator<Item = &SettingEntry> {
        self.entries.iter().filter(|entry| entry.is_toggle())
    }
}
