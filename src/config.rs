use std::env;

use crate::db::{
    gdp::{error::GdpError, forecast_output::GdpForecastOutput, raw_data_archive::RawDataGdpArchive},
    prod_db::ProdDb,
};

pub const CSV_PATH_VAR: &str = "GDP_CSV_PATH";
pub const DUCKDB_PATH_VAR: &str = "GDP_DUCKDB_PATH";
pub const HAS_HEADER_VAR: &str = "GDP_CSV_HAS_HEADER";

/// Where the job reads from and writes to.  Defaults come from [`ProdDb`],
/// environment variables override them, command line flags override both.
#[derive(Clone, Debug, PartialEq)]
pub struct GdpConfig {
    pub csv_path: String,
    pub duckdb_path: String,
    pub has_header: bool,
}

impl GdpConfig {
    /// Use the process environment.  Call `dotenvy` first if the settings
    /// live in an env file.
    pub fn from_env() -> Result<GdpConfig, GdpError> {
        GdpConfig::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<GdpConfig, GdpError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let archive = ProdDb::raw_data_gdp();
        let has_header = match lookup(HAS_HEADER_VAR) {
            Some(value) => parse_bool(HAS_HEADER_VAR, &value)?,
            None => true,
        };
        Ok(GdpConfig {
            csv_path: lookup(CSV_PATH_VAR).unwrap_or(archive.csv_path),
            duckdb_path: lookup(DUCKDB_PATH_VAR).unwrap_or(archive.duckdb_path),
            has_header,
        })
    }

    pub fn with_overrides(
        self,
        csv_path: Option<String>,
        duckdb_path: Option<String>,
        no_header: bool,
    ) -> GdpConfig {
        GdpConfig {
            csv_path: csv_path.unwrap_or(self.csv_path),
            duckdb_path: duckdb_path.unwrap_or(self.duckdb_path),
            has_header: self.has_header && !no_header,
        }
    }

    pub fn archive(&self) -> RawDataGdpArchive {
        RawDataGdpArchive {
            csv_path: self.csv_path.clone(),
            duckdb_path: self.duckdb_path.clone(),
        }
    }

    pub fn forecast_output(&self) -> GdpForecastOutput {
        ProdDb::gdp_forecast_output()
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, GdpError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(GdpError::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::error::Error;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() -> Result<(), Box<dyn Error>> {
        let config = GdpConfig::from_vars(|_| None)?;
        let archive = ProdDb::raw_data_gdp();
        assert_eq!(config.csv_path, archive.csv_path);
        assert_eq!(config.duckdb_path, archive.duckdb_path);
        assert!(config.has_header);
        Ok(())
    }

    #[test]
    fn env_then_flags() -> Result<(), Box<dyn Error>> {
        let env = vars(&[
            (CSV_PATH_VAR, "/tmp/gdp.csv"),
            (DUCKDB_PATH_VAR, "/tmp/gdp.duckdb"),
            (HAS_HEADER_VAR, "Yes"),
        ]);
        let config = GdpConfig::from_vars(|k| env.get(k).cloned())?;
        assert_eq!(config.csv_path, "/tmp/gdp.csv");
        assert_eq!(config.duckdb_path, "/tmp/gdp.duckdb");
        assert!(config.has_header);

        let config = config.with_overrides(Some("/data/other.csv".to_string()), None, true);
        assert_eq!(config.csv_path, "/data/other.csv");
        assert_eq!(config.duckdb_path, "/tmp/gdp.duckdb");
        assert!(!config.has_header);
        assert_eq!(config.archive().duckdb_path, "/tmp/gdp.duckdb");
        assert_eq!(config.forecast_output().table, "GDP_Forecast_Output");
        Ok(())
    }

    #[test]
    fn bad_header_setting() {
        let env = vars(&[(HAS_HEADER_VAR, "maybe")]);
        let res = GdpConfig::from_vars(|k| env.get(k).cloned());
        assert!(matches!(res, Err(GdpError::InvalidSetting { .. })));
        let env = vars(&[(HAS_HEADER_VAR, "0")]);
        let config = GdpConfig::from_vars(|k| env.get(k).cloned()).unwrap();
        assert!(!config.has_header);
    }
}
