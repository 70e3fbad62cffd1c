//! Store: SQLite persistence built on sqlx
//!
//! `Store` owns the connection pool; `StoreSession` is one pooled
//! connection checked out for the duration of a request. Dropping the
//! session returns the connection on every exit path.
//!
//! # Example
//!
//! ```rust,no_run
//! use inkwell_core::Store;
//!
//! #[tokio::main]
//! async fn main() -> inkwell_core::Result<()> {
//!     let store = Store::connect("sqlite://inkwell.db").await?;
//!
//!     let mut session = store.session().await?;
//!     let note = session.create_note("groceries", "eggs, milk").await?;
//!     let notes = session.list_notes().await?;
//!     assert_eq!(notes.last(), Some(&note));
//!
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod notes;
pub mod schema;

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use tracing::{debug, info};

use crate::error::Result;

pub use notes::Note;

const MAX_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection pool plus schema management
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the database at `database_url`, creating file and tables if missing
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?;
        Self::connect_with(options).await
    }

    /// Open a database file by path
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::connect_with(SqliteConnectOptions::new().filename(path)).await
    }

    pub async fn connect_with(options: SqliteConnectOptions) -> Result<Self> {
        let options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        info!("Store ready");
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        for (table, ddl) in schema::all_tables() {
            sqlx::query(ddl).execute(&self.pool).await?;
            debug!(table, "Table ensured");
        }
        Ok(())
    }

    /// Check out a connection for one unit of work
    pub async fn session(&self) -> Result<StoreSession> {
        Ok(StoreSession {
            conn: self.pool.acquire().await?,
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A single pooled connection, released on drop
pub struct StoreSession {
    conn: PoolConnection<Sqlite>,
}
