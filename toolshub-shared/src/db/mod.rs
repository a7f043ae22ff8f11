/// Database layer for ToolsHub
///
/// - `pool`: PostgreSQL connection pool with startup health check
/// - `migrations`: Embedded schema migrations (from the workspace `migrations/` directory)
///
/// Models and their queries live in the `models` module at crate root level.

pub mod migrations;
pub mod pool;
