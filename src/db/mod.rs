pub mod initialize;
pub mod log;
pub mod migrate;
pub mod queries;
pub mod stats;
pub mod store;
