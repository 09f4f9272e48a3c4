use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-name generator configuration, one record per entry in the settings
/// document.
///
/// Every field defaults, so a sparse JSON object is accepted:
///
/// ```
/// use snowbank::Settings;
///
/// let settings: Settings = serde_json::from_str(r#"{ "continuous": true }"#).unwrap();
/// assert!(settings.continuous);
/// assert_eq!(settings.start, 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Initial counter value. Continuous mode only; time mode ignores it.
    pub start: u64,

    /// Epoch reference for time mode, `"YYYY-MM-DD HH:MM:SS"` in local time.
    /// Absent or empty means the Unix epoch.
    pub start_time: Option<String>,

    /// Selects the mode: `true` is a pure counter, `false` the time encoding.
    pub continuous: bool,

    /// Shard identifier embedded in time-mode identifiers. Validated against
    /// the 10-bit range in time mode only.
    pub machine_id: u64,
}

/// The settings document: generator name to its configuration.
pub type SettingsMap = HashMap<String, Settings>;
