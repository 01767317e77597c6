use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use shared_types::ConfigError;

use crate::compliance::{DeadlineEngine, HolidayRegistry, RuleCatalog};

static ENGINE: OnceLock<DeadlineEngine> = OnceLock::new();

pub const DEFAULT_JURISDICTION: &str = "ca-superior";

/// Where the engine's configuration comes from. An unset path selects the
/// file compiled into the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub rules_path: Option<PathBuf>,
    pub holidays_path: Option<PathBuf>,
    pub jurisdiction: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules_path: None,
            holidays_path: None,
            jurisdiction: DEFAULT_JURISDICTION.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the environment (after loading `.env`, if any):
    ///   - `DEADLINE_RULES_PATH` — rule catalog file
    ///   - `DEADLINE_HOLIDAYS_PATH` — holiday calendar file
    ///   - `DEADLINE_JURISDICTION` — jurisdiction whose holidays apply
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            rules_path: non_empty("DEADLINE_RULES_PATH").map(PathBuf::from),
            holidays_path: non_empty("DEADLINE_HOLIDAYS_PATH").map(PathBuf::from),
            jurisdiction: non_empty("DEADLINE_JURISDICTION")
                .unwrap_or_else(|| DEFAULT_JURISDICTION.to_string()),
        }
    }

    /// The configured rule catalog file, or the builtin catalog.
    pub fn catalog(&self) -> Result<RuleCatalog, ConfigError> {
        match &self.rules_path {
            Some(path) => load_catalog(path),
            None => RuleCatalog::builtin(),
        }
    }

    /// The configured holiday file, or the builtin calendars.
    pub fn holidays(&self) -> Result<HolidayRegistry, ConfigError> {
        match &self.holidays_path {
            Some(path) => load_holidays(path),
            None => HolidayRegistry::builtin(),
        }
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load and validate a rule catalog file.
pub fn load_catalog(path: &Path) -> Result<RuleCatalog, ConfigError> {
    let catalog = RuleCatalog::from_toml_str(&read(path)?, &path.display().to_string())?;
    tracing::info!(
        path = %path.display(),
        case_types = catalog.case_types().count(),
        rules = catalog.len(),
        "Loaded rule catalog"
    );
    Ok(catalog)
}

/// Load a holiday calendar file.
pub fn load_holidays(path: &Path) -> Result<HolidayRegistry, ConfigError> {
    let registry = HolidayRegistry::from_toml_str(&read(path)?, &path.display().to_string())?;
    tracing::info!(
        path = %path.display(),
        jurisdictions = ?registry.jurisdictions(),
        "Loaded holiday calendars"
    );
    Ok(registry)
}

/// Build an engine from configuration. The engine sees every loaded year of
/// the configured jurisdiction.
pub fn build_engine(settings: &Settings) -> Result<DeadlineEngine, ConfigError> {
    let catalog = settings.catalog()?;
    let registry = settings.holidays()?;
    let calendar = registry.calendar_for(&settings.jurisdiction)?;
    Ok(DeadlineEngine::new(catalog, calendar))
}

/// Build the process-wide engine on first call and return it. Later calls
/// return the engine from the first successful call and ignore `settings`.
pub fn init_engine(settings: &Settings) -> Result<&'static DeadlineEngine, ConfigError> {
    if let Some(engine) = ENGINE.get() {
        return Ok(engine);
    }
    let engine = build_engine(settings)?;
    Ok(ENGINE.get_or_init(|| engine))
}

/// The process-wide engine, if [`init_engine`] has succeeded.
pub fn engine() -> Option<&'static DeadlineEngine> {
    ENGINE.get()
}
