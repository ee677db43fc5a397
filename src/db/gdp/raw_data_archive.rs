use std::fs::File;

use duckdb::{params, AccessMode, Connection};
use log::info;

use crate::utils::lib_duckdb;

use super::error::GdpError;

pub const TABLE_NAME: &str = "Raw_Data_GDP";

/// Column names and DuckDB types of the staging table, in file order.
pub const COLUMNS: [(&str, &str); 8] = [
    ("Indicator", "VARCHAR"),
    ("Indicator_Name", "VARCHAR"),
    ("Location", "VARCHAR"),
    ("Country", "VARCHAR"),
    ("Time_Period", "VARCHAR"),
    ("Value", "DOUBLE"),
    ("Flag_Code", "VARCHAR"),
    ("Flag_Description", "VARCHAR"),
];

/// One line of the GDP indicator file.  Empty fields are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub indicator: Option<String>,
    pub indicator_name: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub time_period: Option<String>,
    pub value: Option<f64>,
    pub flag_code: Option<String>,
    pub flag_description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct RawDataGdpArchive {
    pub csv_path: String,
    pub duckdb_path: String,
}

impl RawDataGdpArchive {
    /// Open the database the staging table lives in.
    pub fn open(&self, access_mode: AccessMode) -> Result<Connection, GdpError> {
        Ok(lib_duckdb::open(&self.duckdb_path, access_mode)?)
    }

    /// Drop the staging table if it's there and create it again, empty.
    pub fn reset_table(&self, conn: &Connection) -> Result<(), GdpError> {
        info!("resetting table {} ...", TABLE_NAME);
        conn.execute_batch(
            r#"
DROP TABLE IF EXISTS Raw_Data_GDP;
CREATE TABLE Raw_Data_GDP (
    Indicator VARCHAR,
    Indicator_Name VARCHAR,
    Location VARCHAR,
    Country VARCHAR,
    Time_Period VARCHAR,
    Value DOUBLE,
    Flag_Code VARCHAR,
    Flag_Description VARCHAR
);
"#,
        )?;
        Ok(())
    }

    /// Read the CSV file, mapping the 8 fields of each record by position.
    /// If `has_header` is true, the first line is skipped.
    ///
    /// Fails on the first record with the wrong number of fields or a value
    /// that is not a number.  Nothing is returned in that case.
    pub fn read_file(&self, has_header: bool) -> Result<Vec<Row>, GdpError> {
        let file = File::open(&self.csv_path).map_err(|source| GdpError::Io {
            path: self.csv_path.clone().into(),
            source,
        })?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(has_header)
            .flexible(true)
            .from_reader(file);

        let mut out: Vec<Row> = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            if record.len() != COLUMNS.len() {
                return Err(GdpError::ColumnCount {
                    line,
                    expected: COLUMNS.len(),
                    found: record.len(),
                });
            }
            let text = |i: usize| match record.get(i) {
                Some("") | None => None,
                Some(s) => Some(s.to_string()),
            };
            let value = match record.get(5).map(str::trim) {
                Some("") | None => None,
                Some(s) => Some(s.parse::<f64>().map_err(|_| GdpError::InvalidValue {
                    line,
                    value: s.to_string(),
                })?),
            };
            out.push(Row {
                indicator: text(0),
                indicator_name: text(1),
                location: text(2),
                country: text(3),
                time_period: text(4),
                value,
                flag_code: text(6),
                flag_description: text(7),
            });
        }
        Ok(out)
    }

    /// Bulk append the rows with a DuckDB appender, in a single transaction.
    /// Either all rows make it into the table or none do.
    pub fn insert_rows(&self, conn: &mut Connection, rows: &[Row]) -> Result<usize, GdpError> {
        let tx = conn.transaction()?;
        {
            let mut appender = tx.appender(TABLE_NAME)?;
            for row in rows {
                appender.append_row(params![
                    row.indicator,
                    row.indicator_name,
                    row.location,
                    row.country,
                    row.time_period,
                    row.value,
                    row.flag_code,
                    row.flag_description,
                ])?;
            }
            appender.flush()?;
        }
        tx.commit()?;
        Ok(rows.len())
    }

    /// Load the whole CSV file into the staging table.  Return the number
    /// of rows inserted.  The file is parsed completely before the first
    /// insert, so a bad file leaves the table as it was.
    pub fn update_duckdb(&self, conn: &mut Connection, has_header: bool) -> Result<usize, GdpError> {
        info!("loading {} into {} ...", self.csv_path, TABLE_NAME);
        let rows = self.read_file(has_header)?;
        let n = self.insert_rows(conn, &rows)?;
        info!("inserted {} rows", n);
        Ok(n)
    }

    pub fn row_count(&self, conn: &Connection) -> Result<usize, GdpError> {
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM Raw_Data_GDP;", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Get all the staged rows, in load order.
    pub fn get_rows(&self, conn: &Connection) -> Result<Vec<Row>, GdpError> {
        let mut stmt = conn.prepare(
            r#"
SELECT
    Indicator,
    Indicator_Name,
    Location,
    Country,
    Time_Period,
    Value,
    Flag_Code,
    Flag_Description
FROM Raw_Data_GDP
ORDER BY rowid;
    "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Row {
                    indicator: row.get(0)?,
                    indicator_name: row.get(1)?,
                    location: row.get(2)?,
                    country: row.get(3)?,
                    time_period: row.get(4)?,
                    value: row.get(5)?,
                    flag_code: row.get(6)?,
                    flag_description: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<Row>, _>>()?;
        Ok(rows)
    }
}
