///! Shared dataset entities for the skyglass workspace.
///!
///! Every value here is already validated: the client converts the loosely-typed
///! NASA wire payloads into these types at its boundary and never hands raw JSON
///! to callers.

pub mod apod;
pub mod dataset;
pub mod epic;
pub mod favorites;
pub mod mars;
pub mod neo;

pub use apod::{ApodEntry, MediaType};
pub use dataset::{Dataset, UnknownDataset};
pub use epic::{EpicCoordinates, EpicImage};
pub use favorites::{
    ApodFavorite, EpicFavorite, FavoriteItem, MarsFavorite, MarsFavoriteCamera, MarsFavoriteRover,
};
pub use mars::{MarsCamera, MarsPhoto, MarsPhotoPage, MarsRover, RoverStatus};
pub use neo::{CloseApproach, NearEarthObject, NeoFeed};
