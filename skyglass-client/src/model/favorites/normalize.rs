use std::cmp::Ordering;

use skyglass_common::{ApodFavorite, Dataset, EpicFavorite, FavoriteItem, MarsFavorite};

use super::record::FavoriteLists;
use crate::model::nasa::NasaEndpoints;

const APOD_SUBTITLE: &str = "APOD (Astronomy Picture of the Day)";
const EPIC_TITLE: &str = "EPIC — Natural Color";
const EPIC_SUBTITLE: &str = "DSCOVR · Earth";

/// Natural key recovered from a display uid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteUid {
    Mars(u64),
    Apod(String),
    Epic { date: String, image: String },
}

fn mars_item(f: &MarsFavorite) -> FavoriteItem {
    FavoriteItem {
        uid: format!("mars:{}", f.id),
        source: Dataset::Mars,
        src: f.img_src.clone(),
        title: format!("{} — {}", f.rover.name, f.camera.name),
        subtitle: Some(f.camera.full_name.clone()),
        date_label: f
            .earth_date
            .clone()
            .or_else(|| f.sol.map(|sol| format!("Sol {}", sol))),
    }
}

/// `None` for anything but pictures
fn apod_item(f: &ApodFavorite) -> Option<FavoriteItem> {
    if !f.media_type.is_image() {
        return None;
    }
    Some(FavoriteItem {
        uid: format!("apod:{}", f.date),
        source: Dataset::Apod,
        src: f.url.clone(),
        title: f.title.clone(),
        subtitle: Some(APOD_SUBTITLE.to_string()),
        date_label: Some(f.date.clone()),
    })
}

fn epic_item(f: &EpicFavorite, endpoints: &NasaEndpoints) -> FavoriteItem {
    let day = f.date.split(' ').next().unwrap_or(&f.date);
    FavoriteItem {
        uid: format!("epic:{}:{}", f.date, f.image),
        source: Dataset::Epic,
        src: endpoints.epic_image_url(&f.date, &f.image),
        title: EPIC_TITLE.to_string(),
        subtitle: Some(EPIC_SUBTITLE.to_string()),
        date_label: Some(day.to_string()),
    }
}

/// Greatest date label first, unlabelled items last.
///
/// Labels compare as plain strings, so "Sol 1000" sorts above every ISO date.
/// The sort is stable: items with equal labels keep their merge order.
pub fn sort_items(items: &mut [FavoriteItem]) {
    items.sort_by(|a, b| match (&a.date_label, &b.date_label) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => b.cmp(a),
    });
}

/// Project the three lists into display items (mars, then apod, then epic) and sort them
pub(crate) fn merge_lists(lists: &FavoriteLists, endpoints: &NasaEndpoints) -> Vec<FavoriteItem> {
    merge_items(&lists.mars, &lists.apod, &lists.epic, endpoints)
}

pub fn merge_items(
    mars: &[MarsFavorite],
    apod: &[ApodFavorite],
    epic: &[EpicFavorite],
    endpoints: &NasaEndpoints,
) -> Vec<FavoriteItem> {
    let mut items: Vec<FavoriteItem> = mars
        .iter()
        .map(mars_item)
        .chain(apod.iter().filter_map(apod_item))
        .chain(epic.iter().map(|f| epic_item(f, endpoints)))
        .collect();
    sort_items(&mut items);
    items
}

/// Parse `mars:{id}`, `apod:{date}` or `epic:{timestamp}:{image}`.
///
/// EPIC timestamps contain colons themselves, so the image name is taken
/// from after the last one.
pub fn parse_uid(uid: &str) -> Option<FavoriteUid> {
    let (source, rest) = uid.split_once(':')?;
    let dataset = source.parse::<Dataset>().ok().filter(Dataset::is_favoritable)?;
    match dataset {
        Dataset::Mars => rest.parse().ok().map(FavoriteUid::Mars),
        Dataset::Apod if !rest.is_empty() => Some(FavoriteUid::Apod(rest.to_string())),
        Dataset::Epic => {
            let (date, image) = rest.rsplit_once(':')?;
            if date.is_empty() || image.is_empty() {
                return None;
            }
            Some(FavoriteUid::Epic {
                date: date.to_string(),
                image: image.to_string(),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;
    use skyglass_common::{MarsFavoriteCamera, MarsFavoriteRover, MediaType};

    fn endpoints() -> NasaEndpoints {
        NasaEndpoints::new("https://api.nasa.gov", ApiKey::new("KEY").unwrap())
    }

    fn mars(id: u64, earth_date: Option<&str>, sol: Option<u32>) -> MarsFavorite {
        MarsFavorite {
            id,
            img_src: format!("https://mars.nasa.gov/{}.jpg", id),
            earth_date: earth_date.map(str::to_string),
            sol,
            rover: MarsFavoriteRover {
                name: "Curiosity".to_string(),
            },
            camera: MarsFavoriteCamera {
                name: "NAVCAM".to_string(),
                full_name: "Navigation Camera".to_string(),
            },
        }
    }

    fn apod(date: &str, media_type: &str) -> ApodFavorite {
        ApodFavorite {
            date: date.to_string(),
            title: format!("APOD {}", date),
            url: format!("https://apod.nasa.gov/{}.jpg", date),
            media_type: MediaType::from(media_type),
        }
    }

    #[test]
    fn test_mars_item_shape() {
        let item = mars_item(&mars(7, None, Some(1000)));
        assert_eq!(item.uid, "mars:7");
        assert_eq!(item.title, "Curiosity — NAVCAM");
        assert_eq!(item.subtitle.as_deref(), Some("Navigation Camera"));
        assert_eq!(item.date_label.as_deref(), Some("Sol 1000"));

        let dated = mars_item(&mars(8, Some("2015-06-03"), Some(1000)));
        assert_eq!(dated.date_label.as_deref(), Some("2015-06-03"));
    }

    #[test]
    fn test_apod_videos_are_not_displayed() {
        let items = merge_items(
            &[],
            &[apod("2024-01-01", "image"), apod("2024-01-02", "video")],
            &[],
            &endpoints(),
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].uid, "apod:2024-01-01");
    }

    #[test]
    fn test_epic_item_uses_archive_url_and_day_label() {
        let item = epic_item(
            &EpicFavorite {
                date: "2024-01-01 00:13:03".to_string(),
                image: "epic_1b_20240101001751".to_string(),
            },
            &endpoints(),
        );
        assert_eq!(item.uid, "epic:2024-01-01 00:13:03:epic_1b_20240101001751");
        assert_eq!(item.date_label.as_deref(), Some("2024-01-01"));
        assert_eq!(item.title, "EPIC — Natural Color");
        assert!(item
            .src
            .starts_with("https://api.nasa.gov/EPIC/archive/natural/2024/01/01/png/epic_1b_20240101001751.png"));
    }

    #[test]
    fn test_sort_descending_with_undated_last() {
        let items = merge_items(
            &[mars(1, None, None), mars(2, Some("2015-06-03"), None), mars(3, None, Some(12))],
            &[apod("2024-01-02", "image"), apod("2024-01-01", "image")],
            &[],
            &endpoints(),
        );
        let uids: Vec<&str> = items.iter().map(|i| i.uid.as_str()).collect();
        // "Sol 12" > "2024-..." as strings
        assert_eq!(uids, vec!["mars:3", "apod:2024-01-02", "apod:2024-01-01", "mars:2", "mars:1"]);
    }

    #[test]
    fn test_sort_keeps_merge_order_for_equal_labels() {
        let mut items = merge_items(
            &[mars(1, Some("2024-01-01"), None), mars(2, Some("2024-01-01"), None)],
            &[apod("2024-01-01", "image")],
            &[],
            &endpoints(),
        );
        sort_items(&mut items);
        let uids: Vec<&str> = items.iter().map(|i| i.uid.as_str()).collect();
        assert_eq!(uids, vec!["mars:1", "mars:2", "apod:2024-01-01"]);
    }

    #[test]
    fn test_parse_uid() {
        assert_eq!(parse_uid("mars:42"), Some(FavoriteUid::Mars(42)));
        assert_eq!(parse_uid("apod:2024-01-02"), Some(FavoriteUid::Apod("2024-01-02".to_string())));
        assert_eq!(
            parse_uid("epic:2024-01-01 00:13:03:epic_1b_1"),
            Some(FavoriteUid::Epic {
                date: "2024-01-01 00:13:03".to_string(),
                image: "epic_1b_1".to_string(),
            })
        );
        assert_eq!(parse_uid("mars:abc"), None);
        assert_eq!(parse_uid("neo:1"), None);
        assert_eq!(parse_uid("apod"), None);
    }
}
