//! Game catalog using SQLite

use crate::{CatalogError, GameField};
use mygamedb_config::{StoreConfig, is_sql_identifier};
use rusqlite::{Connection, params};
use std::fmt;
use std::path::Path;

/// A game in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub platform: String,
    pub rating: String,
}

/// Renders as `name : platform : rating`; the id is never shown to users.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} : {}", self.name, self.platform, self.rating)
    }
}

/// Catalog store backed by a single SQLite table.
///
/// All writes made through a store belong to one session transaction that is
/// committed by [`CatalogStore::close`]. Dropping the store without closing it
/// rolls the session back.
pub struct CatalogStore {
    conn: Connection,
    table: String,
}

impl CatalogStore {
    /// Open or create the catalog table at `path`
    pub fn open(path: impl AsRef<Path>, table: &str) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        Self::check_table(table)?;

        let conn = Connection::open(path)?;
        tracing::info!("Opened catalog {} (table {})", path.display(), table);

        Self::init(conn, table)
    }

    /// Open the catalog described by a store configuration
    pub fn open_with(config: &StoreConfig) -> Result<Self, CatalogError> {
        Self::open(&config.path, &config.table)
    }

    /// Create an in-memory catalog (for testing)
    pub fn in_memory(table: &str) -> Result<Self, CatalogError> {
        Self::check_table(table)?;
        let conn = Connection::open_in_memory()?;

        Self::init(conn, table)
    }

    fn check_table(table: &str) -> Result<(), CatalogError> {
        if is_sql_identifier(table) {
            Ok(())
        } else {
            Err(CatalogError::InvalidTable(table.to_string()))
        }
    }

    /// Ensure the schema exists and start the session transaction
    fn init(conn: Connection, table: &str) -> Result<Self, CatalogError> {
        conn.execute_batch(&format!(
            r#"
            PRAGMA case_sensitive_like = ON;

            CREATE TABLE IF NOT EXISTS "{table}" (
                id INTEGER,
                name TEXT,
                platform TEXT,
                rating TEXT
            );

            BEGIN;
        "#
        ))?;

        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    /// Name of the backing table
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Whether any game is stored under exactly `name`
    pub fn exists(&self, name: &str) -> Result<bool, CatalogError> {
        let found: bool = self.conn.query_row(
            &format!(
                r#"SELECT EXISTS(SELECT 1 FROM "{}" WHERE name = ?1)"#,
                self.table
            ),
            params![name],
            |row| row.get(0),
        )?;
        Ok(found)
    }

    /// Id the next inserted game receives: one past the current maximum, or 1.
    ///
    /// Ids of deleted games are not tracked, so removing the highest id makes
    /// it available again.
    pub fn next_id(&self) -> Result<i64, CatalogError> {
        let id: i64 = self.conn.query_row(
            &format!(r#"SELECT COALESCE(MAX(id), 0) + 1 FROM "{}""#, self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Add a game and return its id.
    ///
    /// Callers check [`CatalogStore::exists`] first; duplicates are not
    /// rejected here.
    pub fn insert(&self, name: &str, platform: &str, rating: &str) -> Result<i64, CatalogError> {
        let id = self.next_id()?;

        self.conn.execute(
            &format!(
                r#"INSERT INTO "{}" (id, name, platform, rating) VALUES (?1, ?2, ?3, ?4)"#,
                self.table
            ),
            params![id, name, platform, rating],
        )?;

        tracing::debug!(id, name, platform, rating, "Inserted game");
        Ok(id)
    }

    /// Remove every game named exactly `name`, returning how many were removed
    pub fn delete(&self, name: &str) -> Result<usize, CatalogError> {
        let removed = self.conn.execute(
            &format!(r#"DELETE FROM "{}" WHERE name = ?1"#, self.table),
            params![name],
        )?;

        tracing::debug!(name, removed, "Deleted games");
        Ok(removed)
    }

    /// Games named exactly `name`
    pub fn find_by_exact_name(&self, name: &str) -> Result<Vec<Game>, CatalogError> {
        self.query_games(
            &format!(
                r#"SELECT id, name, platform, rating FROM "{}" WHERE name = ?1"#,
                self.table
            ),
            name,
        )
    }

    /// Games whose name starts with `prefix`, case-sensitively.
    ///
    /// `%` and `_` inside the prefix act as LIKE wildcards.
    pub fn find_by_name_prefix(&self, prefix: &str) -> Result<Vec<Game>, CatalogError> {
        self.query_games(
            &format!(
                r#"SELECT id, name, platform, rating FROM "{}" WHERE name LIKE ?1 || '%'"#,
                self.table
            ),
            prefix,
        )
    }

    /// All games ordered by name (binary collation)
    pub fn find_all_sorted_by_name(&self) -> Result<Vec<Game>, CatalogError> {
        let mut stmt = self.conn.prepare(&format!(
            r#"SELECT id, name, platform, rating FROM "{}" ORDER BY name ASC"#,
            self.table
        ))?;

        let games = stmt
            .query_map([], Self::row_to_game)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(games)
    }

    /// Games whose platform or rating equals `value`
    pub fn find_by_field(&self, field: GameField, value: &str) -> Result<Vec<Game>, CatalogError> {
        self.query_games(
            &format!(
                r#"SELECT id, name, platform, rating FROM "{}" WHERE {} = ?1"#,
                self.table,
                field.column()
            ),
            value,
        )
    }

    /// Total number of stored games
    pub fn count(&self) -> Result<usize, CatalogError> {
        let count: i64 = self.conn.query_row(
            &format!(r#"SELECT COUNT(*) FROM "{}""#, self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Commit the session and close the connection
    pub fn close(self) -> Result<(), CatalogError> {
        self.conn.execute_batch("COMMIT;")?;
        self.conn.close().map_err(|(_, e)| e)?;

        tracing::info!("Catalog committed and closed");
        Ok(())
    }

    fn query_games(&self, sql: &str, value: &str) -> Result<Vec<Game>, CatalogError> {
        let mut stmt = self.conn.prepare(sql)?;

        let games = stmt
            .query_map(params![value], Self::row_to_game)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(games)
    }

    /// Convert a row to a Game
    fn row_to_game(row: &rusqlite::Row) -> rusqlite::Result<Game> {
        Ok(Game {
            id: row.get("id")?,
            name: row.get("name")?,
            platform: row.get("platform")?,
            rating: row.get("rating")?,
        })
    }
}
