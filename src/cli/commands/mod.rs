pub mod checkout;
pub mod config;
pub mod db;
pub mod dismiss;
pub mod edit;
pub mod forget;
pub mod init;
pub mod list;
pub mod log;
pub mod notify;
pub mod remind;
pub mod show;
