use crate::enums::{AppearanceCategory, SocialPlatform};
use serde::{Deserialize, Serialize};

/// A studio album or single release.
///
/// The three value components feed different revenue streams: streaming and
/// popularity decay exponentially, retail follows the piecewise physical-sales
/// schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRelease {
    pub title: String,
    /// Release date as supplied by the document store (`YYYY-MM-DD`).
    pub release_date: String,
    pub streaming_value: f64,
    pub popularity_value: f64,
    pub retail_value: f64,
    pub track_count: u32,
}

/// A single concert or tour stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcertEvent {
    pub name: String,
    pub start_date: String,
    pub gross_value: f64,
}

/// A social or media post with its measured engagement value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform: SocialPlatform,
    pub posted_at: String,
    pub engagement_value: f64,
}

/// A merchandise sales record. Written to the ledger as-is, in its own month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchandiseRecord {
    pub date: String,
    pub sales_value: f64,
}

/// A management-arranged appearance (broadcast, variety, radio, festival).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementAppearance {
    pub title: String,
    pub start_date: String,
    pub category: AppearanceCategory,
    pub appearance_value: f64,
}

/// One artist's complete activity history, as read from the document store.
///
/// All five arrays default to empty so partial payloads deserialize cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistDataset {
    #[serde(default)]
    pub albums: Vec<AlbumRelease>,
    #[serde(default)]
    pub concerts: Vec<ConcertEvent>,
    #[serde(default)]
    pub social_posts: Vec<SocialPost>,
    #[serde(default)]
    pub merchandise: Vec<MerchandiseRecord>,
    #[serde(default)]
    pub appearances: Vec<ManagementAppearance>,
}

impl ArtistDataset {
    /// Total number of records across every category.
    pub fn record_count(&self) -> usize {
        self.albums.len()
            + self.concerts.len()
            + self.social_posts.len()
            + self.merchandise.len()
            + self.appearances.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_deserializes_with_missing_categories() {
        let json = r#"{
            "albums": [{
                "title": "First Light",
                "release_date": "2021-03-02",
                "streaming_value": 120000.0,
                "popularity_value": 45000.0,
                "retail_value": 30000.0,
                "track_count": 11
            }]
        }"#;
        let dataset: ArtistDataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.albums.len(), 1);
        assert!(dataset.concerts.is_empty());
        assert_eq!(dataset.record_count(), 1);
    }

    #[test]
    fn social_platform_uses_lowercase_wire_names() {
        let json = r#"{"platform": "youtube", "posted_at": "2022-01-01", "engagement_value": 10.0}"#;
        let post: SocialPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.platform, SocialPlatform::Youtube);
    }
}
