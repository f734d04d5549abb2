use serde::{Deserialize, Serialize};
use std::fmt;

/// The revenue streams a valuation ledger tracks.
///
/// Each variant carries a stable wire label (the key used by upstream payloads
/// and the `[weights]` configuration table). `Fandom` is part of the upstream
/// weight table but no event category in the current dataset writes to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevenueStream {
    Fandom,
    Streaming,
    AlbumPopularity,
    AlbumRetail,
    Concert,
    MediaTwitter,
    MediaYoutube,
    Merchandise,
    Management,
}

impl RevenueStream {
    pub const COUNT: usize = 9;

    /// Every stream, in ledger column order.
    pub const ALL: [RevenueStream; Self::COUNT] = [
        RevenueStream::Fandom,
        RevenueStream::Streaming,
        RevenueStream::AlbumPopularity,
        RevenueStream::AlbumRetail,
        RevenueStream::Concert,
        RevenueStream::MediaTwitter,
        RevenueStream::MediaYoutube,
        RevenueStream::Merchandise,
        RevenueStream::Management,
    ];

    /// The wire label used by upstream payloads and configuration tables.
    pub fn label(&self) -> &'static str {
        match self {
            RevenueStream::Fandom => "fv_t",
            RevenueStream::Streaming => "sv_t",
            RevenueStream::AlbumPopularity => "apv_t",
            RevenueStream::AlbumRetail => "rv_t",
            RevenueStream::Concert => "cev_t",
            RevenueStream::MediaTwitter => "mcv_twitter",
            RevenueStream::MediaYoutube => "mcv_youtube",
            RevenueStream::Merchandise => "mds_t",
            RevenueStream::Management => "mrv_t",
        }
    }

    /// The ledger column index of this stream.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for RevenueStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The platform a social post was published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Youtube,
}

impl SocialPlatform {
    /// Returns the revenue stream this platform's engagement feeds.
    pub fn stream(&self) -> RevenueStream {
        match self {
            SocialPlatform::Twitter => RevenueStream::MediaTwitter,
            SocialPlatform::Youtube => RevenueStream::MediaYoutube,
        }
    }
}

/// The kind of a management appearance (broadcast slot, variety show, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceCategory {
    Broadcast,
    Variety,
    Radio,
    Festival,
}

impl AppearanceCategory {
    pub const COUNT: usize = 4;

    /// Every category, in one-hot encoding order.
    pub const ALL: [AppearanceCategory; Self::COUNT] = [
        AppearanceCategory::Broadcast,
        AppearanceCategory::Variety,
        AppearanceCategory::Radio,
        AppearanceCategory::Festival,
    ];

    /// The one-hot feature index of this category.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// The five event categories an artist dataset supplies.
///
/// Used to attribute skip reasons back to the record that caused them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Album,
    Concert,
    SocialPost,
    Merchandise,
    Appearance,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventCategory::Album => "album",
            EventCategory::Concert => "concert",
            EventCategory::SocialPost => "social post",
            EventCategory::Merchandise => "merchandise",
            EventCategory::Appearance => "appearance",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_indices_match_column_order() {
        for (i, stream) in RevenueStream::ALL.iter().enumerate() {
            assert_eq!(stream.index(), i);
        }
    }

    #[test]
    fn stream_labels_are_unique() {
        let mut labels: Vec<&str> = RevenueStream::ALL.iter().map(|s| s.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), RevenueStream::COUNT);
    }

    #[test]
    fn platform_streams_are_distinct() {
        assert_ne!(
            SocialPlatform::Twitter.stream(),
            SocialPlatform::Youtube.stream()
        );
    }
}
