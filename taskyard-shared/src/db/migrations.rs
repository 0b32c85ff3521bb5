/// Database migration runner
///
/// Runs schema migrations from the `migrations/` directory at the workspace
/// root using sqlx's embedded migration system. Each migration is a plain
/// SQL file named `{version}_{name}.sql`.
///
/// # Example
///
/// ```no_run
/// use taskyard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskyard_shared::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Migrations run in order; a failed migration is rolled back and the error
/// is returned.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("../migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
