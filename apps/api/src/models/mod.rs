pub mod employee;
pub mod metric;
pub mod prompt;
