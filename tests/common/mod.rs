use chrono::Local;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use tradebook::db;

/// Creates a fresh database under ./tests/output/ and returns a migrated
/// pool. Each test gets its own directory so tests can run in parallel.
pub fn setup_pool(test_id: &str) -> Arc<Pool<ConnectionManager<SqliteConnection>>> {
    let now = Local::now();
    let data_dir = now
        .format(&format!("./tests/output/%Y%m%d/%H%M%S%f-{}/", test_id))
        .to_string();

    let db_path = db::init(&data_dir).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    pool
}
