use crate::db::store::Store;
use crate::errors::AppResult;

/// Initialize the database file at `path`.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(path: &str) -> AppResult<Store> {
    // No direct CREATE TABLE here: all schema is guaranteed by migrations.
    Store::create(path)
}
