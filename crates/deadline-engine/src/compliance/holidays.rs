//! Court holiday registry keyed by jurisdiction and year
//!
//! Loaded from `holidays.toml` before any engine is constructed. The engine
//! itself only ever sees a single `HolidayCalendar`; the registry hands out
//! either one year or all loaded years of a jurisdiction merged together.

use std::collections::BTreeMap;

use chrono::Datelike;
use shared_types::{
    ConfigError, CourtHoliday, HolidayCalendar, HolidayFile, CONFIG_FORMAT_VERSION,
};

use super::federal_holidays::federal_holidays;

/// The court calendars shipped in `config/holidays.toml`.
const BUILTIN_HOLIDAYS: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/holidays.toml"));

#[derive(Debug, Clone, Default)]
pub struct HolidayRegistry {
    calendars: BTreeMap<(String, i32), HolidayCalendar>,
}

fn normalize_jurisdiction(jurisdiction: &str) -> String {
    jurisdiction.trim().to_ascii_lowercase()
}

impl HolidayRegistry {
    /// Parse the contents of a `holidays.toml` file. `source` names the file
    /// in error messages.
    pub fn from_toml_str(contents: &str, source: &str) -> Result<Self, ConfigError> {
        let file: HolidayFile = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: source.to_string(),
            message: e.to_string(),
        })?;
        if file.version != CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                path: source.to_string(),
                version: file.version,
            });
        }
        Self::from_file(file)
    }

    /// The calendars compiled into the binary from `config/holidays.toml`.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_HOLIDAYS, "config/holidays.toml (builtin)")
    }

    pub fn from_file(file: HolidayFile) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for entry in file.calendars {
            let jurisdiction = normalize_jurisdiction(&entry.jurisdiction);

            if let Some(outside) = entry.holidays.iter().find(|h| h.date.year() != entry.year) {
                return Err(ConfigError::HolidayOutsideYear {
                    jurisdiction,
                    year: entry.year,
                    date: outside.date.to_string(),
                });
            }

            let mut holidays: Vec<CourtHoliday> = entry
                .holidays
                .into_iter()
                .map(|h| CourtHoliday::new(h.date, h.name))
                .collect();
            if entry.include_federal {
                holidays.extend(federal_holidays(entry.year));
            }

            let calendar = HolidayCalendar::for_year(jurisdiction.clone(), entry.year, holidays);
            registry.insert(calendar, entry.year)?;
        }
        Ok(registry)
    }

    /// Register a calendar for `(calendar.jurisdiction(), year)`.
    pub fn insert(&mut self, calendar: HolidayCalendar, year: i32) -> Result<(), ConfigError> {
        let key = (normalize_jurisdiction(calendar.jurisdiction()), year);
        if self.calendars.contains_key(&key) {
            return Err(ConfigError::DuplicateCalendar {
                jurisdiction: key.0,
                year,
            });
        }
        self.calendars.insert(key, calendar);
        Ok(())
    }

    /// The calendar of one jurisdiction for one year.
    pub fn calendar(&self, jurisdiction: &str, year: i32) -> Option<&HolidayCalendar> {
        self.calendars
            .get(&(normalize_jurisdiction(jurisdiction), year))
    }

    /// Every loaded year of a jurisdiction merged into one calendar, so that
    /// deadlines crossing a year boundary see the next year's holidays.
    pub fn calendar_for(&self, jurisdiction: &str) -> Result<HolidayCalendar, ConfigError> {
        let jurisdiction = normalize_jurisdiction(jurisdiction);
        let calendars: Vec<&HolidayCalendar> = self
            .calendars
            .iter()
            .filter(|((j, _), _)| *j == jurisdiction)
            .map(|(_, c)| c)
            .collect();
        if calendars.is_empty() {
            return Err(ConfigError::UnknownJurisdiction { jurisdiction });
        }
        Ok(HolidayCalendar::merge(jurisdiction, calendars))
    }

    /// Distinct jurisdictions, ascending.
    pub fn jurisdictions(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.calendars.keys().map(|(j, _)| j.as_str()).collect();
        out.dedup();
        out
    }

    /// Years loaded for a jurisdiction, ascending.
    pub fn years(&self, jurisdiction: &str) -> Vec<i32> {
        let jurisdiction = normalize_jurisdiction(jurisdiction);
        self.calendars
            .keys()
            .filter(|(j, _)| *j == jurisdiction)
            .map(|(_, y)| *y)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }
}
