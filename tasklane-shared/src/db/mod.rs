/// Database layer for Tasklane
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a startup health check
/// - `migrations`: Database migration runner
pub mod migrations;
pub mod pool;
