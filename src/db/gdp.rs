pub mod error;
pub mod forecast_output;
pub mod job;
pub mod raw_data_archive;
