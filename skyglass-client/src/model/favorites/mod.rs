///! Local favorites
///!
///! Three per-dataset lists persisted write-through to a key-value store and
///! merged into one display list on demand.

mod normalize;
mod record;
mod storage;
mod store;

pub use normalize::{merge_items, parse_uid, sort_items, FavoriteUid};
pub use record::FavoriteRecord;
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use store::FavoritesStore;
