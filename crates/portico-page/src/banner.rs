//! Banner dismissal
//!
//! The promotional banner stays hidden for two weeks once a visitor
//! closes it. The flag lives behind an injectable store; when the
//! store misbehaves the banner simply shows again (fail-open).

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use portico_storage::{Database, StorageError};

use crate::patch::{targets, SurfacePatch};

/// Name of the dismissal flag.
pub const DISMISS_FLAG: &str = "promo_closed";
/// Value stored for a dismissed banner.
pub const DISMISS_VALUE: &str = "1";
/// Days a dismissal holds.
pub const DISMISS_TTL_DAYS: i64 = 14;

/// Key/value store with expiry, the persistence seam for controllers.
///
/// Expired entries must read back as absent.
pub trait FlagStore: Send + Sync {
    fn get_flag(&self, name: &str) -> Result<Option<String>, StorageError>;
    fn set_flag(&self, name: &str, value: &str, ttl: Duration) -> Result<(), StorageError>;
}

impl FlagStore for Database {
    fn get_flag(&self, name: &str) -> Result<Option<String>, StorageError> {
        Database::get_flag(self, name)
    }

    fn set_flag(&self, name: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        Database::set_flag(self, name, value, ttl)
    }
}

/// In-memory store for ephemeral sessions and tests. Honors expiry
/// the same way the database does.
#[derive(Default, Clone)]
pub struct MemoryFlagStore {
    flags: Arc<Mutex<HashMap<String, (String, DateTime<Utc>)>>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get_flag(&self, name: &str) -> Result<Option<String>, StorageError> {
        let mut flags = self.flags.lock();

        match flags.get(name) {
            Some((_, expires_at)) if *expires_at <= Utc::now() => {
                flags.remove(name);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    fn set_flag(&self, name: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        self.flags
            .lock()
            .insert(name.to_string(), (value.to_string(), Utc::now() + ttl));
        Ok(())
    }
}

/// Banner dismissal controller.
#[derive(Clone)]
pub struct Banner {
    store: Arc<dyn FlagStore>,
    flag_name: String,
    ttl: Duration,
}

impl Banner {
    pub fn new(store: Arc<dyn FlagStore>) -> Self {
        Self::with_flag(store, DISMISS_FLAG, Duration::days(DISMISS_TTL_DAYS))
    }

    /// Deployment-specific flag name and horizon.
    pub fn with_flag(
        store: Arc<dyn FlagStore>,
        flag_name: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            flag_name: flag_name.into(),
            ttl,
        }
    }

    /// True while a live dismissal flag exists. An unreadable store
    /// reads as not-dismissed so the banner never vanishes for the
    /// wrong reason.
    pub fn is_dismissed(&self) -> bool {
        match self.store.get_flag(&self.flag_name) {
            Ok(flag) => flag.is_some(),
            Err(e) => {
                tracing::warn!(flag = %self.flag_name, error = %e, "Dismissal flag unreadable, showing banner");
                false
            }
        }
    }

    /// Persist the dismissal and hide the banner. The element hides
    /// even when the write fails; the flag just will not survive a
    /// reload.
    pub fn dismiss(&self) -> Vec<SurfacePatch> {
        if let Err(e) = self.store.set_flag(&self.flag_name, DISMISS_VALUE, self.ttl) {
            tracing::warn!(flag = %self.flag_name, error = %e, "Could not persist banner dismissal");
        } else {
            tracing::debug!(flag = %self.flag_name, "Banner dismissed");
        }

        vec![SurfacePatch::hide(targets::COUPON_BLOCK)]
    }

    /// Patches for the document-ready phase: hide the banner when a
    /// prior dismissal is still live, otherwise leave the markup alone
    /// (it shows the banner by default).
    pub fn ready_patches(&self) -> Vec<SurfacePatch> {
        if self.is_dismissed() {
            vec![SurfacePatch::hide(targets::COUPON_BLOCK)]
        } else {
            Vec::new()
        }
    }
}
