//! Naming resolver — turns raw VK photo items into records with unique
//! display names derived from like counts.
//!
//! Disambiguation needs global knowledge of duplicate counts, so resolution
//! is two-pass: collect every photo's like count first, then name. A photo
//! whose count is shared by another photo in the set gets the publication
//! date appended; a full (likes, date) collision additionally gets an
//! ordinal suffix so destination paths never silently overwrite each other.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, TimeZone};

use crate::vk::types::PhotoItem;
use crate::vk::VkError;

const DATE_FORMAT: &str = "%d-%m-%Y";

/// A photo ready for upload. `name` is assigned once here and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub url: String,
    pub size_type: String,
    pub likes: u64,
    pub date: NaiveDate,
    pub name: String,
}

/// Resolve display names for a page of raw photo items.
///
/// Items missing `likes` or `sizes` indicate a response shape the caller
/// cannot use (private profile, unknown album) and fail the whole page.
pub fn resolve_names(items: &[PhotoItem]) -> Result<Vec<PhotoRecord>, VkError> {
    struct Unnamed {
        url: String,
        size_type: String,
        likes: u64,
        date: NaiveDate,
    }

    // Pass 1: pick the tallest size variant and tally like counts.
    let mut unnamed = Vec::with_capacity(items.len());
    let mut count_tally: HashMap<u64, u32> = HashMap::new();
    for item in items {
        // max_by_key keeps the last maximum, so equal-height variants
        // resolve to the later entry in the item's size list.
        let biggest = item
            .sizes
            .iter()
            .max_by_key(|s| s.height)
            .ok_or(VkError::Shape("sizes"))?;
        let likes = item.likes.as_ref().ok_or(VkError::Shape("likes"))?.count;
        let date = Local
            .timestamp_opt(item.date, 0)
            .single()
            .ok_or(VkError::Shape("date"))?
            .date_naive();
        *count_tally.entry(likes).or_insert(0) += 1;
        unnamed.push(Unnamed {
            url: biggest.url.clone(),
            size_type: biggest.size_type.clone(),
            likes,
            date,
        });
    }

    // Pass 2: name, appending the date wherever the like count is shared.
    let mut seen: HashMap<String, u32> = HashMap::new();
    let mut records = Vec::with_capacity(unnamed.len());
    for photo in unnamed {
        let base = if count_tally[&photo.likes] > 1 {
            format!("{}, {}", photo.likes, photo.date.format(DATE_FORMAT))
        } else {
            photo.likes.to_string()
        };
        let occurrence = seen.entry(base.clone()).or_insert(0);
        *occurrence += 1;
        let name = if *occurrence == 1 {
            base
        } else {
            format!("{} ({})", base, occurrence)
        };
        records.push(PhotoRecord {
            url: photo.url,
            size_type: photo.size_type,
            likes: photo.likes,
            date: photo.date,
            name,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(likes: u64, date: i64, sizes: serde_json::Value) -> PhotoItem {
        serde_json::from_value(json!({
            "id": 1,
            "date": date,
            "likes": {"count": likes},
            "sizes": sizes,
        }))
        .unwrap()
    }

    fn simple_item(likes: u64, date: i64) -> PhotoItem {
        item(
            likes,
            date,
            json!([{"type": "z", "height": 1080, "url": "https://vk.example/z"}]),
        )
    }

    fn local_date_str(timestamp: i64) -> String {
        Local
            .timestamp_opt(timestamp, 0)
            .single()
            .unwrap()
            .date_naive()
            .format(DATE_FORMAT)
            .to_string()
    }

    const DAY: i64 = 86_400;

    #[test]
    fn test_unique_counts_named_by_count_alone() {
        let items = vec![simple_item(7, 0), simple_item(12, DAY), simple_item(3, 2 * DAY)];
        let records = resolve_names(&items).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["7", "12", "3"]);
    }

    #[test]
    fn test_duplicate_counts_get_dates() {
        let items = vec![
            simple_item(12, 12 * DAY),
            simple_item(12, 40 * DAY),
            simple_item(7, 80 * DAY),
        ];
        let records = resolve_names(&items).unwrap();
        assert_eq!(records[0].name, format!("12, {}", local_date_str(12 * DAY)));
        assert_eq!(records[1].name, format!("12, {}", local_date_str(40 * DAY)));
        assert_eq!(records[2].name, "7");
    }

    #[test]
    fn test_full_collision_gets_ordinal_suffix() {
        // Same likes, same calendar day (one hour apart).
        let items = vec![
            simple_item(5, 10 * DAY),
            simple_item(5, 10 * DAY + 3600),
            simple_item(5, 10 * DAY + 7200),
        ];
        let records = resolve_names(&items).unwrap();
        let date = local_date_str(10 * DAY);
        assert_eq!(records[0].name, format!("5, {date}"));
        assert_eq!(records[1].name, format!("5, {date} (2)"));
        assert_eq!(records[2].name, format!("5, {date} (3)"));
    }

    #[test]
    fn test_names_unique_across_run() {
        let items = vec![
            simple_item(5, 0),
            simple_item(5, 0),
            simple_item(5, DAY),
            simple_item(9, 0),
        ];
        let records = resolve_names(&items).unwrap();
        let mut names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), records.len());
    }

    #[test]
    fn test_idempotent() {
        let items = vec![
            simple_item(12, 12 * DAY),
            simple_item(12, 40 * DAY),
            simple_item(7, 80 * DAY),
        ];
        let first = resolve_names(&items).unwrap();
        let second = resolve_names(&items).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tallest_variant_selected() {
        let items = vec![item(
            1,
            0,
            json!([
                {"type": "s", "height": 75, "url": "https://vk.example/s"},
                {"type": "w", "height": 2160, "url": "https://vk.example/w"},
                {"type": "x", "height": 604, "url": "https://vk.example/x"}
            ]),
        )];
        let records = resolve_names(&items).unwrap();
        assert_eq!(records[0].url, "https://vk.example/w");
        assert_eq!(records[0].size_type, "w");
    }

    #[test]
    fn test_height_tie_takes_later_variant() {
        let items = vec![item(
            1,
            0,
            json!([
                {"type": "y", "height": 800, "url": "https://vk.example/y"},
                {"type": "z", "height": 800, "url": "https://vk.example/z"}
            ]),
        )];
        let records = resolve_names(&items).unwrap();
        assert_eq!(records[0].size_type, "z");
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve_names(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_sizes_is_shape_error() {
        let items = vec![item(1, 0, json!([]))];
        assert!(matches!(
            resolve_names(&items).unwrap_err(),
            VkError::Shape("sizes")
        ));
    }

    #[test]
    fn test_missing_likes_is_shape_error() {
        let no_likes: PhotoItem = serde_json::from_value(json!({
            "id": 1,
            "date": 0,
            "sizes": [{"type": "z", "height": 10, "url": "u"}],
        }))
        .unwrap();
        assert!(matches!(
            resolve_names(&[no_likes]).unwrap_err(),
            VkError::Shape("likes")
        ));
    }
}
