pub mod config;
pub mod firing;
pub mod grouping;
pub mod log;
pub mod reminder;
