//! Scheduling configuration file support.
//!
//! Operators configure opening hours, VIP level thresholds and per-stylist
//! capacity limits in a TOML file. The configuration is validated at load
//! time and is read-only to the scheduling core.
//!
//! ```toml
//! [hours.monday]
//! open = "09:00"
//! close = "18:00"
//! slot_minutes = 30
//!
//! [hours.overrides."2025-12-24"]
//! open = "09:00"
//! close = "13:00"
//!
//! [vip]
//! thresholds = [5, 15, 30]
//!
//! [stylists."Sarah"]
//! max_concurrent = 1
//! ```

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::business_hours::{BusinessHours, BusinessHoursTable, DEFAULT_SLOT_MINUTES};

/// Validated scheduling configuration.
#[derive(Debug, Clone, Default)]
pub struct SchedulingConfig {
    pub hours: BusinessHoursTable,
    /// Visit counts at which the VIP level steps up, sorted ascending.
    pub vip_thresholds: Vec<u32>,
    /// Per-stylist concurrent-customer limits. Stylists without an entry
    /// take one customer at a time.
    pub stylist_capacity: HashMap<String, u32>,
}

impl SchedulingConfig {
    /// VIP level for a visit count: the number of thresholds reached.
    pub fn vip_level_for(&self, total_visits: u32) -> u32 {
        self.vip_thresholds
            .iter()
            .filter(|&&t| total_visits >= t)
            .count() as u32
    }

    /// Concurrent-customer limit for a stylist (default 1).
    pub fn capacity_for(&self, stylist: &str) -> u32 {
        self.stylist_capacity.get(stylist).copied().unwrap_or(1).max(1)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default locations.
    ///
    /// Searches for `scheduling.toml` in the current and parent directory.
    pub fn from_default_location() -> anyhow::Result<Self> {
        let search_paths = vec![
            PathBuf::from("scheduling.toml"),
            PathBuf::from("../scheduling.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        anyhow::bail!("No scheduling.toml found in standard locations")
    }

    /// Parse and validate a TOML configuration string.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;
        raw.try_into()
    }
}

// ==================== Raw TOML shapes ====================

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    hours: RawHours,
    #[serde(default)]
    vip: RawVip,
    #[serde(default)]
    stylists: HashMap<String, RawStylist>,
}

/// Weekday tables keyed by name, plus an `overrides` table keyed by date.
#[derive(Debug, Default, Deserialize)]
struct RawHours {
    #[serde(flatten)]
    weekdays: HashMap<String, RawWindow>,
    #[serde(default)]
    overrides: HashMap<String, RawWindow>,
}

#[derive(Debug, Deserialize)]
struct RawWindow {
    open: String,
    close: String,
    #[serde(default)]
    slot_minutes: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVip {
    #[serde(default)]
    thresholds: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct RawStylist {
    #[serde(default)]
    max_concurrent: Option<u32>,
}

fn parse_time(s: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| anyhow::anyhow!("Invalid time '{}', expected HH:MM", s))
}

fn parse_weekday(s: &str) -> anyhow::Result<Weekday> {
    s.parse::<Weekday>()
        .map_err(|_| anyhow::anyhow!("Unknown weekday '{}'", s))
}

impl RawWindow {
    fn to_window(&self) -> anyhow::Result<BusinessHours> {
        let window = BusinessHours {
            open_time: parse_time(&self.open)?,
            close_time: parse_time(&self.close)?,
            slot_minutes: self.slot_minutes.unwrap_or(DEFAULT_SLOT_MINUTES),
        };
        window.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(window)
    }
}

impl TryFrom<RawConfig> for SchedulingConfig {
    type Error = anyhow::Error;

    fn try_from(raw: RawConfig) -> anyhow::Result<Self> {
        let mut hours = BusinessHoursTable::default();

        for (day, window) in &raw.hours.weekdays {
            hours.weekdays.insert(parse_weekday(day)?, window.to_window()?);
        }
        for (date, window) in &raw.hours.overrides {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| anyhow::anyhow!("Invalid override date '{}', expected YYYY-MM-DD", date))?;
            hours.overrides.insert(date, window.to_window()?);
        }

        let mut vip_thresholds = raw.vip.thresholds;
        vip_thresholds.sort_unstable();
        vip_thresholds.dedup();
        if vip_thresholds.first() == Some(&0) {
            anyhow::bail!("VIP thresholds must be positive");
        }

        let stylist_capacity = raw
            .stylists
            .into_iter()
            .filter_map(|(name, s)| s.max_concurrent.map(|c| (name, c)))
            .collect();

        Ok(Self {
            hours,
            vip_thresholds,
            stylist_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[hours.monday]
open = "09:00"
close = "18:00"

[hours.tuesday]
open = "10:00"
close = "20:00"
slot_minutes = 15

[hours.overrides."2025-12-24"]
open = "09:00"
close = "13:00"

[vip]
thresholds = [5, 15, 30]

[stylists."Sarah"]
max_concurrent = 2
"#;

        let config = SchedulingConfig::from_toml_str(toml).unwrap();

        let monday = config.hours.weekdays.get(&Weekday::Mon).unwrap();
        assert_eq!(monday.slot_minutes, 30);
        let tuesday = config.hours.weekdays.get(&Weekday::Tue).unwrap();
        assert_eq!(tuesday.slot_minutes, 15);

        let xmas_eve = NaiveDate::from_ymd_opt(2025, 12, 24).unwrap();
        assert!(config.hours.overrides.contains_key(&xmas_eve));

        assert_eq!(config.vip_thresholds, vec![5, 15, 30]);
        assert_eq!(config.capacity_for("Sarah"), 2);
        assert_eq!(config.capacity_for("Unknown"), 1);
    }

    #[test]
    fn test_vip_levels_are_monotonic() {
        let config = SchedulingConfig {
            vip_thresholds: vec![5, 15, 30],
            ..Default::default()
        };

        assert_eq!(config.vip_level_for(0), 0);
        assert_eq!(config.vip_level_for(4), 0);
        assert_eq!(config.vip_level_for(5), 1);
        assert_eq!(config.vip_level_for(15), 2);
        assert_eq!(config.vip_level_for(100), 3);
    }

    #[test]
    fn test_invalid_window_rejected() {
        let toml = r#"
[hours.monday]
open = "18:00"
close = "09:00"
"#;
        assert!(SchedulingConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_invalid_time_rejected() {
        let toml = r#"
[hours.monday]
open = "9 o'clock"
close = "18:00"
"#;
        assert!(SchedulingConfig::from_toml_str(toml).is_err());
    }
}
