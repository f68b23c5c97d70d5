use tracing_subscriber::EnvFilter;

use crate::server::{config::Config, error::AppError, service::throttle::ThrottleService};

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG` when set and defaults to `info` otherwise.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the throttle service from the configured rates.
///
/// Counters start empty; nothing survives a restart.
pub fn build_throttle(config: &Config) -> ThrottleService {
    let rates = &config.throttle_rates;
    for (scope, scope_rates) in [
        ("default", rates.default),
        ("drones", rates.drones),
        ("pilots", rates.pilots),
    ] {
        tracing::info!(
            "Throttle scope {}: anonymous {}, authenticated {}",
            scope,
            scope_rates.anonymous,
            scope_rates.authenticated
        );
    }

    ThrottleService::new(config.throttle_rates)
}
