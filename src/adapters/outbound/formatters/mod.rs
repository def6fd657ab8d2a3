/// Formatter adapters for the report output formats
mod csv_formatter;
mod json_formatter;

pub use csv_formatter::CsvFormatter;
pub use json_formatter::JsonFormatter;
