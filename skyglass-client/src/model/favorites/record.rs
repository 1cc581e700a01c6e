use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use skyglass_common::{ApodFavorite, Dataset, EpicFavorite, MarsFavorite};

/// In-memory copy of the three persisted lists
#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct FavoriteLists {
    pub mars: Vec<MarsFavorite>,
    pub apod: Vec<ApodFavorite>,
    pub epic: Vec<EpicFavorite>,
}

/// A record kept in one of the favorites lists.
///
/// Each record type owns its storage key and its natural key; lists never
/// hold two records with the same natural key.
pub trait FavoriteRecord: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Key: PartialEq + Clone + Debug;

    const DATASET: Dataset;
    const STORAGE_KEY: &'static str;

    fn key(&self) -> Self::Key;

    #[doc(hidden)]
    fn slot(lists: &FavoriteLists) -> &Vec<Self>;

    #[doc(hidden)]
    fn slot_mut(lists: &mut FavoriteLists) -> &mut Vec<Self>;
}

impl FavoriteRecord for MarsFavorite {
    /// Photo id
    type Key = u64;

    const DATASET: Dataset = Dataset::Mars;
    const STORAGE_KEY: &'static str = "mars:favorites";

    fn key(&self) -> u64 {
        self.id
    }

    fn slot(lists: &FavoriteLists) -> &Vec<Self> {
        &lists.mars
    }

    fn slot_mut(lists: &mut FavoriteLists) -> &mut Vec<Self> {
        &mut lists.mars
    }
}

impl FavoriteRecord for ApodFavorite {
    /// Day of the picture, `YYYY-MM-DD`
    type Key = String;

    const DATASET: Dataset = Dataset::Apod;
    const STORAGE_KEY: &'static str = "apod:favorites";

    fn key(&self) -> String {
        self.date.clone()
    }

    fn slot(lists: &FavoriteLists) -> &Vec<Self> {
        &lists.apod
    }

    fn slot_mut(lists: &mut FavoriteLists) -> &mut Vec<Self> {
        &mut lists.apod
    }
}

impl FavoriteRecord for EpicFavorite {
    /// (capture timestamp, image name)
    type Key = (String, String);

    const DATASET: Dataset = Dataset::Epic;
    const STORAGE_KEY: &'static str = "epic:favorites";

    fn key(&self) -> (String, String) {
        (self.date.clone(), self.image.clone())
    }

    fn slot(lists: &FavoriteLists) -> &Vec<Self> {
        &lists.epic
    }

    fn slot_mut(lists: &mut FavoriteLists) -> &mut Vec<Self> {
        &mut lists.epic
    }
}
