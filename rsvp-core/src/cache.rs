//! Local durable cache for submission lists.
//!
//! The raw [`Cache`] is a key/value text store. [`LocalCache`] layers a typed
//! list on top of one key and never fails: a broken cache degrades to an
//! empty (on restore) or stale (on persist) list.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::CacheError;
use crate::record::{Record, decode_rows};

/// Key/value text storage.
pub trait Cache: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Replace the whole value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileCache { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Cache for FileCache {
    fn read(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir)?;

        // Write-then-rename so readers never see a half-written list
        let path = self.path(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-process cache, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn read(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A typed record list stored under the record kind's fixed key.
pub struct LocalCache<R: Record> {
    cache: Arc<dyn Cache>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> LocalCache<R> {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        LocalCache {
            cache,
            _record: PhantomData,
        }
    }

    fn key(&self) -> &'static str {
        R::KIND.cache_key()
    }

    /// Overwrite the cached list with `records`. Failures are logged, not returned.
    pub fn persist(&self, records: &[R]) {
        if let Err(e) = self.try_persist(records) {
            tracing::warn!(key = self.key(), error = %e, "failed to persist cache");
        }
    }

    fn try_persist(&self, records: &[R]) -> Result<(), CacheError> {
        let json =
            serde_json::to_string(records).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.cache.write(self.key(), &json)
    }

    /// Read the cached list. Absent, malformed or non-array values yield an
    /// empty list.
    pub fn restore(&self) -> Vec<R> {
        match self.try_restore() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key = self.key(), error = %e, "failed to restore cache");
                Vec::new()
            }
        }
    }

    fn try_restore(&self) -> Result<Vec<R>, CacheError> {
        let Some(raw) = self.cache.read(self.key())? else {
            return Ok(Vec::new());
        };

        let value: Value =
            serde_json::from_str(&raw).map_err(|e| CacheError::Serialization(e.to_string()))?;

        match value {
            Value::Array(rows) => Ok(decode_rows(rows)),
            _ => Err(CacheError::Serialization(format!(
                "expected an array under '{}'",
                self.key()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Attendance, GolfRecord, GolfTag, RsvpRecord};
    use chrono::{TimeZone, Utc};

    fn rsvp(name: &str, minute: u32) -> RsvpRecord {
        RsvpRecord {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            organization: Some("Precinct 9".to_string()),
            attending: Attendance::Yes,
            guests: 3,
            message: Some("See you \"there\"".to_string()),
            timestamp: Utc
                .with_ymd_and_hms(2025, 10, 1, 9, minute, 0)
                .unwrap()
                .checked_add_signed(chrono::Duration::milliseconds(250))
                .unwrap(),
        }
    }

    #[test]
    fn persist_then_restore_round_trips() {
        let cache = LocalCache::<RsvpRecord>::new(Arc::new(MemoryCache::new()));

        for n in 0..3 {
            let records: Vec<_> = (0..n).map(|i| rsvp(&format!("Guest{i}"), i)).collect();
            cache.persist(&records);
            assert_eq!(cache.restore(), records);
        }
    }

    #[test]
    fn restore_is_empty_when_absent_malformed_or_not_an_array() {
        let raw = Arc::new(MemoryCache::new());
        let cache = LocalCache::<RsvpRecord>::new(raw.clone());
        assert!(cache.restore().is_empty());

        raw.write("rsvps_cache", "{not json").unwrap();
        assert!(cache.restore().is_empty());

        raw.write("rsvps_cache", r#"{"name":"Ann"}"#).unwrap();
        assert!(cache.restore().is_empty());
    }

    #[test]
    fn kinds_use_separate_keys() {
        let raw = Arc::new(MemoryCache::new());
        let rsvps = LocalCache::<RsvpRecord>::new(raw.clone());
        let golf = LocalCache::<GolfRecord>::new(raw.clone());

        rsvps.persist(&[rsvp("Ann", 1)]);
        golf.persist(&[GolfRecord {
            name: "Cal".to_string(),
            email: "cal@example.com".to_string(),
            handicap: None,
            party_size: 4,
            pairing_pref: None,
            notes: None,
            timestamp: Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap(),
            tag: GolfTag::Golf,
        }]);

        assert_eq!(rsvps.restore().len(), 1);
        assert_eq!(golf.restore()[0].party_size, 4);
    }

    #[test]
    fn file_cache_overwrites_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("nested"));

        assert_eq!(cache.read("rsvps_cache").unwrap(), None);

        cache.write("rsvps_cache", "[1,2,3]").unwrap();
        cache.write("rsvps_cache", "[]").unwrap();

        assert_eq!(cache.read("rsvps_cache").unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("nested/rsvps_cache.json.tmp").exists());
    }

    #[test]
    fn file_cache_round_trips_records() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::<RsvpRecord>::new(Arc::new(FileCache::new(dir.path())));
        let records = vec![rsvp("Ann", 1), rsvp("Bob", 2)];

        cache.persist(&records);

        assert_eq!(cache.restore(), records);
    }
}
