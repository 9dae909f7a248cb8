//! Database connection and operations

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable foreign keys
        conn.pragma_update(None, "foreign_keys", "ON")?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        // Run migrations
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Set a flag that expires `ttl` from now.
    pub fn set_flag(&self, name: &str, value: &str, ttl: Duration) -> Result<()> {
        let now = Utc::now();
        let expires_at = (now + ttl).to_rfc3339();

        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO flags (name, value, expires_at, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![name, value, expires_at, now.to_rfc3339()],
            )?;
            Ok(())
        })?;

        Ok(())
    }

    /// Read a flag. Absent and expired flags both read as `None`;
    /// an expired row is dropped on the way out.
    pub fn get_flag(&self, name: &str) -> Result<Option<String>> {
        let row = self.with_connection(|conn| {
            let row = conn
                .query_row(
                    "SELECT value, expires_at FROM flags WHERE name = ?1",
                    [name],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, Option<String>>(1)?,
                        ))
                    },
                )
                .optional()?;
            Ok(row)
        })?;

        let (value, expires_at) = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        if let Some(expires_str) = expires_at {
            // An unreadable horizon counts as elapsed
            let expired = DateTime::parse_from_rfc3339(&expires_str)
                .map(|dt| dt.with_timezone(&Utc) <= Utc::now())
                .unwrap_or(true);

            if expired {
                self.clear_flag(name)?;
                tracing::debug!(flag = %name, "Expired flag purged on read");
                return Ok(None);
            }
        }

        Ok(Some(value))
    }

    pub fn clear_flag(&self, name: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM flags WHERE name = ?1", [name])?;
            Ok(())
        })?;

        Ok(())
    }

    /// Drop every flag whose horizon has elapsed; returns how many went.
    pub fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now().to_rfc3339();
        let removed = self.with_connection(|conn| {
            Ok(conn.execute(
                "DELETE FROM flags WHERE expires_at IS NOT NULL AND expires_at <= ?1",
                [now.as_str()],
            )?)
        })?;

        if removed > 0 {
            tracing::debug!(count = removed, "Purged expired flags");
        }

        Ok(removed)
    }

    pub fn get_pref(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM prefs WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    pub fn set_pref(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO prefs (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })?;

        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
