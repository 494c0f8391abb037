use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

use crate::filter::Thresholds;
use crate::scanner::metrics::AgeBasis;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory to scan. `None` leaves the choice to the caller, which
    /// falls back to the OS temp directory.
    pub root_path: Option<String>,
    pub min_unused_hours: Option<f64>,
    pub min_age_days: Option<f64>,
    pub age_basis: AgeBasis,
    pub ignore_list_path: String,
    pub audit_log_path: String,
}

impl AppConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            min_unused_hours: self.min_unused_hours,
            min_age_days: self.min_age_days,
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .set_default("min_unused_hours", 48.0)?
        .set_default("min_age_days", 7.0)?
        .set_default("age_basis", "modified")?
        .set_default("ignore_list_path", "config/ignore_list.txt")?
        .set_default("audit_log_path", "logs/deletion_history.jsonl")?
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
