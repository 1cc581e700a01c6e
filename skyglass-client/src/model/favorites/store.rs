use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use skyglass_common::{ApodFavorite, FavoriteItem, EpicFavorite, MarsFavorite};

use super::normalize::{merge_lists, parse_uid, FavoriteUid};
use super::record::{FavoriteLists, FavoriteRecord};
use super::storage::KeyValueStore;
use crate::error::StorageError;
use crate::model::nasa::NasaEndpoints;

/// Per-dataset favorites with write-through persistence.
///
/// One mutex covers the in-memory lists and the write that follows each
/// mutation, so concurrent callers never interleave a read-modify-write.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    lists: Mutex<FavoriteLists>,
}

impl FavoritesStore {
    /// Read the three lists. Absent or malformed lists load as empty.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let lists = FavoriteLists {
            mars: read_list::<MarsFavorite>(storage.as_ref())?,
            apod: read_list::<ApodFavorite>(storage.as_ref())?,
            epic: read_list::<EpicFavorite>(storage.as_ref())?,
        };

        info!(
            "Loaded favorites: {} mars, {} apod, {} epic",
            lists.mars.len(),
            lists.apod.len(),
            lists.epic.len()
        );

        Ok(Self {
            storage,
            lists: Mutex::new(lists),
        })
    }

    fn lock(&self) -> MutexGuard<'_, FavoriteLists> {
        self.lists.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list<R: FavoriteRecord>(&self) -> Vec<R> {
        R::slot(&self.lock()).clone()
    }

    pub fn contains<R: FavoriteRecord>(&self, key: &R::Key) -> bool {
        R::slot(&self.lock()).iter().any(|r| &r.key() == key)
    }

    /// Append `record` unless its natural key is already present.
    ///
    /// Returns `false` (and writes nothing) for a duplicate.
    pub fn add<R: FavoriteRecord>(&self, record: R) -> Result<bool, StorageError> {
        let mut lists = self.lock();
        let key = record.key();
        if R::slot(&lists).iter().any(|r| r.key() == key) {
            debug!("{} favorite {:?} already present", R::DATASET, key);
            return Ok(false);
        }

        let mut updated = R::slot(&lists).clone();
        updated.push(record);
        self.persist(&updated)?;
        *R::slot_mut(&mut lists) = updated;

        info!("Added {} favorite {:?}", R::DATASET, key);
        Ok(true)
    }

    /// Remove the record with `key`. Returns `false` (and writes nothing) when absent.
    pub fn remove<R: FavoriteRecord>(&self, key: &R::Key) -> Result<bool, StorageError> {
        let mut lists = self.lock();
        let current = R::slot(&lists);
        if !current.iter().any(|r| &r.key() == key) {
            debug!("{} favorite {:?} not present", R::DATASET, key);
            return Ok(false);
        }

        let updated: Vec<R> = current.iter().filter(|r| &r.key() != key).cloned().collect();
        self.persist(&updated)?;
        *R::slot_mut(&mut lists) = updated;

        info!("Removed {} favorite {:?}", R::DATASET, key);
        Ok(true)
    }

    /// Add when absent, remove when present. Returns whether the record is now a favorite.
    pub fn toggle<R: FavoriteRecord>(&self, record: R) -> Result<bool, StorageError> {
        let key = record.key();
        if self.contains::<R>(&key) {
            self.remove::<R>(&key)?;
            Ok(false)
        } else {
            self.add(record)?;
            Ok(true)
        }
    }

    /// Remove by a display uid from [`FavoritesStore::all_items`].
    ///
    /// Unparseable uids are a no-op.
    pub fn remove_by_uid(&self, uid: &str) -> Result<bool, StorageError> {
        match parse_uid(uid) {
            Some(FavoriteUid::Mars(id)) => self.remove::<MarsFavorite>(&id),
            Some(FavoriteUid::Apod(date)) => self.remove::<ApodFavorite>(&date),
            Some(FavoriteUid::Epic { date, image }) => self.remove::<EpicFavorite>(&(date, image)),
            None => {
                warn!("Ignoring unrecognized favorite uid {}", uid);
                Ok(false)
            }
        }
    }

    /// Every favorite in display shape, newest date label first
    pub fn all_items(&self, endpoints: &NasaEndpoints) -> Vec<FavoriteItem> {
        merge_lists(&self.lock(), endpoints)
    }

    pub fn len(&self) -> usize {
        let lists = self.lock();
        lists.mars.len() + lists.apod.len() + lists.epic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist<R: FavoriteRecord>(&self, list: &[R]) -> Result<(), StorageError> {
        let json = serde_json::to_string(list).map_err(|source| StorageError::Serialize {
            key: R::STORAGE_KEY.to_string(),
            source,
        })?;
        self.storage.set(R::STORAGE_KEY, &json)
    }
}

fn read_list<R: FavoriteRecord>(storage: &dyn KeyValueStore) -> Result<Vec<R>, StorageError> {
    let Some(raw) = storage.get(R::STORAGE_KEY)? else {
        return Ok(Vec::new());
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let values = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(values) => values,
        Err(e) => {
            warn!("Discarding malformed favorites under {}: {}", R::STORAGE_KEY, e);
            return Ok(Vec::new());
        }
    };

    // A bad record costs only itself, not the rest of the list.
    let total = values.len();
    let list: Vec<R> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<R>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed favorite #{} under {}: {}", index, R::STORAGE_KEY, e);
                None
            }
        })
        .collect();

    if list.len() < total {
        warn!(
            "Kept {} of {} favorites under {}",
            list.len(),
            total,
            R::STORAGE_KEY
        );
    }
    Ok(list)
}
