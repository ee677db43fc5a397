use duckdb::{AccessMode, Config, Connection};

/// Open a DuckDB connection.  Use `":memory:"` for a throwaway in-memory database.
/// There is no retry, a locked or unreadable file is an error for the caller.
pub fn open(duckdb_path: &str, access_mode: AccessMode) -> Result<Connection, duckdb::Error> {
    let config = Config::default().access_mode(access_mode)?;
    if duckdb_path == ":memory:" {
        Connection::open_in_memory_with_flags(config)
    } else {
        Connection::open_with_flags(duckdb_path, config)
    }
}

/// Return the column names of a table in declaration order.  Only the
/// current database and schema are searched, the same place an unqualified
/// table name resolves to.  The table name is matched case-insensitively.
/// An empty vector means the table doesn't exist.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>, duckdb::Error> {
    let mut stmt = conn.prepare(
        r#"
SELECT column_name
FROM information_schema.columns
WHERE lower(table_name) = lower(?)
AND table_catalog = current_database()
AND table_schema = current_schema()
ORDER BY ordinal_position;
    "#,
    )?;
    let names = stmt
        .query_map([table], |row| row.get::<usize, String>(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(names)
}

/// Double-quote an identifier so it can be spliced into a query.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn columns_in_order() -> Result<(), Box<dyn Error>> {
        let conn = open(":memory:", AccessMode::ReadWrite)?;
        conn.execute_batch("CREATE TABLE Stats (b VARCHAR, a DOUBLE, c INTEGER);")?;
        assert_eq!(table_columns(&conn, "stats")?, vec!["b", "a", "c"]);
        assert!(table_columns(&conn, "nope")?.is_empty());
        Ok(())
    }

    #[test]
    fn columns_of_the_current_schema_only() -> Result<(), Box<dyn Error>> {
        let conn = open(":memory:", AccessMode::ReadWrite)?;
        conn.execute_batch(
            r#"
CREATE SCHEMA archive;
CREATE TABLE archive.Stats (Old_Col VARCHAR);
CREATE TABLE Stats (a DOUBLE);
"#,
        )?;
        assert_eq!(table_columns(&conn, "Stats")?, vec!["a"]);
        conn.execute_batch("DROP TABLE main.Stats;")?;
        assert!(table_columns(&conn, "Stats")?.is_empty());
        Ok(())
    }

    #[test]
    fn quoting() {
        assert_eq!(quote_identifier("ForecastValue"), "\"ForecastValue\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
