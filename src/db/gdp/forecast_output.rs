use duckdb::Connection;
use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::utils::lib_duckdb::{quote_identifier, table_columns};

use super::error::GdpError;

pub const FORECAST_COLUMN: &str = "ForecastValue";

/// The forecast table is populated elsewhere, this crate only reads it.
#[derive(Clone, Debug)]
pub struct GdpForecastOutput {
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    /// Every column of the table, rendered as text, in column order.
    pub values: Vec<Option<String>>,
    pub forecast_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastOutput {
    pub columns: Vec<String>,
    pub rows: Vec<ForecastRow>,
}

impl GdpForecastOutput {
    /// Get all the rows with a forecast value different from zero.  Rows with
    /// a NULL forecast value are not returned.  No particular order.
    pub fn get_nonzero_forecasts(&self, conn: &Connection) -> Result<ForecastOutput, GdpError> {
        let columns = table_columns(conn, &self.table)?;
        if columns.is_empty() {
            return Err(GdpError::MissingTable(self.table.clone()));
        }
        let forecast_column = columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(FORECAST_COLUMN))
            .ok_or_else(|| GdpError::MissingColumn {
                table: self.table.clone(),
                column: FORECAST_COLUMN.to_string(),
            })?;

        let query = format!(
            r#"
SELECT
    {},
    CAST({} AS DOUBLE)
FROM {}
WHERE {} <> 0;
    "#,
            columns
                .iter()
                .map(|c| format!("CAST({} AS VARCHAR)", quote_identifier(c)))
                .join(",\n    "),
            quote_identifier(forecast_column),
            quote_identifier(&self.table),
            quote_identifier(forecast_column),
        );
        // println!("{}", query);
        let n = columns.len();
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt
            .query_map([], |row| {
                let values = (0..n)
                    .map(|i| row.get::<usize, Option<String>>(i))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ForecastRow {
                    values,
                    forecast_value: row.get(n)?,
                })
            })?
            .collect::<Result<Vec<ForecastRow>, _>>()?;
        info!("{} has {} rows with a non-zero forecast", self.table, rows.len());

        Ok(ForecastOutput { columns, rows })
    }
}
