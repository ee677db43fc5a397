use crate::db::gdp::{forecast_output::GdpForecastOutput, raw_data_archive::RawDataGdpArchive};

pub struct ProdDb {}

impl ProdDb {
    pub fn raw_data_gdp() -> RawDataGdpArchive {
        RawDataGdpArchive {
            csv_path: "/home/data/Archive/OECD/GDP/Raw/DP_LIVE_GDP.csv".to_string(),
            duckdb_path: "/home/data/Archive/DuckDB/gdp.duckdb".to_string(),
        }
    }

    pub fn gdp_forecast_output() -> GdpForecastOutput {
        GdpForecastOutput {
            table: "GDP_Forecast_Output".to_string(),
        }
    }
}
