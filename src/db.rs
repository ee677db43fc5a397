pub mod gdp;
pub mod prod_db;
