/// Database handle and transactions
use crate::config::DatabaseConfig;
use crate::error::{Result, StorageError};
use futures::future::BoxFuture;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::{MySql, Transaction};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

static CONNECTION: OnceCell<Database> = OnceCell::const_new();

/// Create a MySQL pool from configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the server is
/// unreachable
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool> {
    config.validate()?;

    info!(dsn = %config.dsn(), "Creating MySQL pool");

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
        .map_err(|e| StorageError::Connection(format!("{}: {e}", config.dsn())))?;

    info!(max_connections = config.max_connections, "✓ Pool created");

    Ok(pool)
}

/// Process-wide handle built from [`DatabaseConfig::load`]
///
/// The first call opens the pool; later calls reuse it.
///
/// The pool is tied to the tokio runtime that first opened it. Callers on
/// another runtime, such as a second `#[tokio::test]`, must build their
/// own [`Database`] with [`Database::connect`] instead.
pub async fn open_connection() -> Result<&'static Database> {
    CONNECTION
        .get_or_try_init(|| async {
            let config = DatabaseConfig::load()?;
            Database::connect(&config).await
        })
        .await
}

/// MySQL database handle
#[derive(Debug, Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Connect using the given configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        Ok(Self {
            pool: create_pool(config).await?,
        })
    }

    /// Create database from an existing pool (for testing)
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round-trip a trivial statement
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Run `f` inside a transaction
    ///
    /// Commits when `f` returns `Ok`; rolls back and hands the error back
    /// when it returns `Err`.
    ///
    /// ```rust,no_run
    /// use belajar_core::User;
    /// use belajar_storage::{users, Database, StorageError};
    ///
    /// # async fn example(db: &Database) -> belajar_storage::Result<()> {
    /// db.transaction(|tx| {
    ///     Box::pin(async move {
    ///         users::create(&mut **tx, &User::new("11", "adib lagi", "adib123")).await?;
    ///         users::create(&mut **tx, &User::new("12", "adib lagi dan lagi", "adib123")).await?;
    ///         Ok::<_, StorageError>(())
    ///     })
    /// })
    /// .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c mut Transaction<'static, MySql>) -> BoxFuture<'c, Result<T>>,
        T: Send,
    {
        let mut tx = self.pool.begin().await?;
        debug!("Transaction started");

        match f(&mut tx).await {
            Ok(value) => {
                tx.commit().await?;
                info!("Transaction committed");
                Ok(value)
            }
            Err(err) => {
                tx.rollback().await?;
                warn!(error = %err, "Transaction rolled back");
                Err(err)
            }
        }
    }

    /// Begin a manually scoped transaction
    ///
    /// Dropping the returned transaction without calling `commit` rolls it
    /// back.
    pub async fn begin(&self) -> Result<Transaction<'static, MySql>> {
        let tx = self.pool.begin().await?;
        debug!("Manual transaction started");
        Ok(tx)
    }
}
