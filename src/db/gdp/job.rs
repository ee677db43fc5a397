use duckdb::Connection;
use log::info;

use super::{
    error::GdpError,
    forecast_output::{ForecastOutput, GdpForecastOutput},
    raw_data_archive::RawDataGdpArchive,
};

#[derive(Debug)]
pub struct JobSummary {
    pub rows_loaded: usize,
    pub forecasts: ForecastOutput,
}

/// Reset the staging table, load the CSV file into it, then read the
/// non-zero forecasts.  Stops at the first error.
pub struct GdpStagingJob {
    pub archive: RawDataGdpArchive,
    pub forecast_output: GdpForecastOutput,
    pub has_header: bool,
}

impl GdpStagingJob {
    pub fn run(&self, conn: &mut Connection) -> Result<JobSummary, GdpError> {
        self.archive.reset_table(conn)?;
        let rows_loaded = self.archive.update_duckdb(conn, self.has_header)?;
        let forecasts = self.forecast_output.get_nonzero_forecasts(conn)?;
        info!(
            "done: {} rows staged, {} non-zero forecasts",
            rows_loaded,
            forecasts.rows.len()
        );
        Ok(JobSummary {
            rows_loaded,
            forecasts,
        })
    }
}
