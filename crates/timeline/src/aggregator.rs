use crate::error::TimelineError;
use crate::ledger::{AlbumSnapshot, Timeline, TimelineBuilder};
use chrono::NaiveDate;
use configuration::{DecayTuning, ValuationConfig};
use core_types::{
    parse_event_date, ArtistDataset, CoreError, EventCategory, MonthIndex, RevenueStream,
};
use decay::{
    distribute_event_influence, distribute_exponential, distribute_piecewise_retail,
    influence_months,
};
use serde::Serialize;

/// How many months after its release an album stays attached to ledger
/// months as a display snapshot.
const SNAPSHOT_WINDOW_MONTHS: i32 = 6;

/// An album release whose date has been parsed and validated.
///
/// Downstream consumers (KPI calculation, forecasting) work from this type so
/// date parsing happens exactly once, here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedAlbum {
    pub title: String,
    pub release_date: NaiveDate,
    pub streaming_value: f64,
    pub popularity_value: f64,
    pub retail_value: f64,
    pub track_count: u32,
}

impl ParsedAlbum {
    /// The album's total value across its three components.
    pub fn total_value(&self) -> f64 {
        self.streaming_value + self.popularity_value + self.retail_value
    }
}

/// A record dropped during aggregation, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEvent {
    pub category: EventCategory,
    /// A human-readable handle on the record (title, name, or date string).
    pub label: String,
    pub reason: CoreError,
}

/// Everything `aggregate` produces: the frozen ledger, the validated album
/// list, and the records that had to be dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationOutcome {
    pub timeline: Timeline,
    pub albums: Vec<ParsedAlbum>,
    pub skipped: Vec<SkippedEvent>,
}

/// One parsed influence-style event, ready for distribution.
struct InfluenceEvent {
    month: MonthIndex,
    stream: RevenueStream,
    value: f64,
}

/// Builds the valuation timeline for one artist from its raw dataset.
///
/// Records with unparseable dates are skipped and reported in the outcome;
/// the ledger itself is never partially written by a bad record because every
/// date is parsed before any distribution runs.
pub fn aggregate(
    dataset: &ArtistDataset,
    config: &ValuationConfig,
) -> Result<AggregationOutcome, TimelineError> {
    let mut skipped = Vec::new();

    // --- 1. Parse every record's date up front ---
    let albums = parse_albums(dataset, &mut skipped);

    let mut concerts = Vec::with_capacity(dataset.concerts.len());
    for concert in &dataset.concerts {
        match parse_event_date(&concert.start_date) {
            Ok(date) => concerts.push(InfluenceEvent {
                month: MonthIndex::from_date(date),
                stream: RevenueStream::Concert,
                value: concert.gross_value,
            }),
            Err(reason) => skipped.push(skip(EventCategory::Concert, &concert.name, reason)),
        }
    }

    let mut posts = Vec::with_capacity(dataset.social_posts.len());
    for post in &dataset.social_posts {
        match parse_event_date(&post.posted_at) {
            Ok(date) => posts.push(InfluenceEvent {
                month: MonthIndex::from_date(date),
                stream: post.platform.stream(),
                value: post.engagement_value,
            }),
            Err(reason) => skipped.push(skip(EventCategory::SocialPost, &post.posted_at, reason)),
        }
    }

    let mut appearances = Vec::with_capacity(dataset.appearances.len());
    for appearance in &dataset.appearances {
        match parse_event_date(&appearance.start_date) {
            Ok(date) => appearances.push(InfluenceEvent {
                month: MonthIndex::from_date(date),
                stream: RevenueStream::Management,
                value: appearance.appearance_value,
            }),
            Err(reason) => {
                skipped.push(skip(EventCategory::Appearance, &appearance.title, reason))
            }
        }
    }

    let mut merchandise = Vec::with_capacity(dataset.merchandise.len());
    for record in &dataset.merchandise {
        match parse_event_date(&record.date) {
            Ok(date) => merchandise.push((MonthIndex::from_date(date), record.sales_value)),
            Err(reason) => skipped.push(skip(EventCategory::Merchandise, &record.date, reason)),
        }
    }

    // --- 2. Establish the ledger range ---
    let start = earliest_month(&albums, &concerts, &posts, &appearances, &merchandise)
        .ok_or(TimelineError::NoUsableEvents)?;
    let end = MonthIndex::from_date(config.valuation.horizon_end);
    let mut builder = TimelineBuilder::new(start, end, config.weights.clone())?;

    // --- 3. Album releases: split each value component across the horizon ---
    let residual_rate = config.valuation.residual_rate;
    let rate_override = config.valuation.decay_rate_override;
    for album in &albums {
        let release_month = MonthIndex::from_date(album.release_date);

        let streaming = distribute_exponential(
            album.streaming_value,
            release_month,
            end,
            rate_override,
            residual_rate,
        )?;
        builder.add_series(RevenueStream::Streaming, &streaming);

        let popularity = distribute_exponential(
            album.popularity_value,
            release_month,
            end,
            rate_override,
            residual_rate,
        )?;
        builder.add_series(RevenueStream::AlbumPopularity, &popularity);

        let retail = distribute_piecewise_retail(album.retail_value, release_month, end);
        builder.add_series(RevenueStream::AlbumRetail, &retail);

        // Display payload: the release stays visible on the months around it.
        for offset in 0..=SNAPSHOT_WINDOW_MONTHS {
            builder.attach_snapshot(
                release_month.plus(offset),
                AlbumSnapshot {
                    title: album.title.clone(),
                    release_date: album.release_date,
                    streaming_value: album.streaming_value,
                    popularity_value: album.popularity_value,
                    retail_value: album.retail_value,
                },
            );
        }
    }

    // --- 4. Influence-style categories ---
    let tuning = &config.decay;
    add_influence_batch(&mut builder, &concerts, tuning.concert_decay_rate, tuning);
    add_influence_batch(&mut builder, &posts, tuning.social_decay_rate, tuning);
    add_influence_batch(
        &mut builder,
        &appearances,
        tuning.appearance_decay_rate,
        tuning,
    );

    // --- 5. Merchandise: direct single-month writes ---
    for &(month, sales_value) in &merchandise {
        builder.add(month, RevenueStream::Merchandise, sales_value);
    }

    let timeline = builder.build();
    tracing::debug!(
        months = timeline.len(),
        albums = albums.len(),
        skipped = skipped.len(),
        "aggregated valuation timeline"
    );

    Ok(AggregationOutcome {
        timeline,
        albums,
        skipped,
    })
}

fn parse_albums(dataset: &ArtistDataset, skipped: &mut Vec<SkippedEvent>) -> Vec<ParsedAlbum> {
    let mut albums = Vec::with_capacity(dataset.albums.len());
    for album in &dataset.albums {
        match parse_event_date(&album.release_date) {
            Ok(release_date) => albums.push(ParsedAlbum {
                title: album.title.clone(),
                release_date,
                streaming_value: album.streaming_value,
                popularity_value: album.popularity_value,
                retail_value: album.retail_value,
                track_count: album.track_count,
            }),
            Err(reason) => skipped.push(skip(EventCategory::Album, &album.title, reason)),
        }
    }
    albums
}

/// Distributes one batch of influence events, sizing each event's window by
/// its share of the batch maximum.
fn add_influence_batch(
    builder: &mut TimelineBuilder,
    events: &[InfluenceEvent],
    decay_rate: f64,
    tuning: &DecayTuning,
) {
    let batch_max = events.iter().map(|e| e.value).fold(0.0_f64, f64::max);
    for event in events {
        let months = influence_months(
            event.value,
            batch_max,
            tuning.min_influence_months,
            tuning.max_influence_months,
        );
        let series = distribute_event_influence(event.value, event.month, decay_rate, months);
        builder.add_series(event.stream, &series);
    }
}

fn earliest_month(
    albums: &[ParsedAlbum],
    concerts: &[InfluenceEvent],
    posts: &[InfluenceEvent],
    appearances: &[InfluenceEvent],
    merchandise: &[(MonthIndex, f64)],
) -> Option<MonthIndex> {
    let album_months = albums
        .iter()
        .map(|a| MonthIndex::from_date(a.release_date));
    let event_months = concerts
        .iter()
        .chain(posts)
        .chain(appearances)
        .map(|e| e.month);
    let merch_months = merchandise.iter().map(|&(month, _)| month);
    album_months
        .chain(event_months)
        .chain(merch_months)
        .min()
}

fn skip(category: EventCategory, label: &str, reason: CoreError) -> SkippedEvent {
    tracing::warn!(%category, label, %reason, "skipping event record");
    SkippedEvent {
        category,
        label: label.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::{DecayTuning, Investment, Valuation};
    use core_types::{
        AlbumRelease, ConcertEvent, MerchandiseRecord, SocialPlatform, SocialPost, StreamWeights,
    };
    use rust_decimal_macros::dec;

    fn test_config(horizon_end: NaiveDate) -> ValuationConfig {
        ValuationConfig {
            investment: Investment {
                goal_fund: dec!(1_000_000),
                investor_share_ratio: dec!(0.5),
            },
            valuation: Valuation {
                calculation_start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
                horizon_end,
                residual_rate: 0.01,
                decay_rate_override: None,
            },
            weights: StreamWeights::default(),
            decay: DecayTuning::default(),
        }
    }

    fn album(title: &str, date: &str, streaming: f64) -> AlbumRelease {
        AlbumRelease {
            title: title.to_string(),
            release_date: date.to_string(),
            streaming_value: streaming,
            popularity_value: 0.0,
            retail_value: 0.0,
            track_count: 10,
        }
    }

    #[test]
    fn merchandise_is_written_once_in_its_own_month() {
        let dataset = ArtistDataset {
            merchandise: vec![MerchandiseRecord {
                date: "2022-03-10".to_string(),
                sales_value: 5_000.0,
            }],
            ..ArtistDataset::default()
        };
        let config = test_config(NaiveDate::from_ymd_opt(2022, 8, 31).unwrap());

        let outcome = aggregate(&dataset, &config).unwrap();
        let timeline = &outcome.timeline;
        assert_eq!(timeline.len(), 6);
        assert_eq!(
            timeline.get(0).unwrap().stream_total(RevenueStream::Merchandise),
            5_000.0
        );
        for month in timeline.months().iter().skip(1) {
            assert_eq!(month.mov, 0.0);
        }
    }

    #[test]
    fn album_streaming_sums_back_to_its_value_within_the_window() {
        let dataset = ArtistDataset {
            albums: vec![album("First Light", "2022-01-20", 120_000.0)],
            ..ArtistDataset::default()
        };
        let config = test_config(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());

        let outcome = aggregate(&dataset, &config).unwrap();
        let total: f64 = outcome
            .timeline
            .months()
            .iter()
            .map(|m| m.stream_total(RevenueStream::Streaming))
            .sum();
        assert_eq!(outcome.timeline.len(), 12);
        assert!((total - 120_000.0).abs() / 120_000.0 < 1e-6);
    }

    #[test]
    fn bad_dates_are_skipped_and_reported() {
        let dataset = ArtistDataset {
            albums: vec![album("Broken", "not-a-date", 10_000.0)],
            concerts: vec![ConcertEvent {
                name: "City Hall".to_string(),
                start_date: "2022-05-01".to_string(),
                gross_value: 30_000.0,
            }],
            ..ArtistDataset::default()
        };
        let config = test_config(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());

        let outcome = aggregate(&dataset, &config).unwrap();
        assert_eq!(outcome.skipped.len(), 1);
        let skip = &outcome.skipped[0];
        assert_eq!(skip.category, EventCategory::Album);
        assert_eq!(skip.label, "Broken");
        assert!(matches!(skip.reason, CoreError::InvalidDate { .. }));
        // The good concert still produced a ledger.
        assert!(outcome.timeline.get(0).unwrap().mov > 0.0);
    }

    #[test]
    fn nothing_usable_is_an_error() {
        let dataset = ArtistDataset {
            albums: vec![album("Broken", "??", 10_000.0)],
            ..ArtistDataset::default()
        };
        let config = test_config(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
        assert!(matches!(
            aggregate(&dataset, &config),
            Err(TimelineError::NoUsableEvents)
        ));
    }

    #[test]
    fn bigger_events_influence_more_months() {
        let dataset = ArtistDataset {
            concerts: vec![
                ConcertEvent {
                    name: "Arena".to_string(),
                    start_date: "2022-01-10".to_string(),
                    gross_value: 100_000.0,
                },
                ConcertEvent {
                    name: "Club".to_string(),
                    start_date: "2022-01-12".to_string(),
                    gross_value: 1_000.0,
                },
            ],
            ..ArtistDataset::default()
        };
        let config = test_config(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        let outcome = aggregate(&dataset, &config).unwrap();
        let concert_months = outcome
            .timeline
            .months()
            .iter()
            .filter(|m| m.stream_total(RevenueStream::Concert) > 0.0)
            .count();
        // The arena show runs the full 12-month window; the club show only
        // the minimum 3, in the same months.
        assert_eq!(concert_months, DecayTuning::default().max_influence_months as usize);
    }

    #[test]
    fn social_posts_land_on_their_platform_stream() {
        let dataset = ArtistDataset {
            social_posts: vec![SocialPost {
                platform: SocialPlatform::Youtube,
                posted_at: "2022-04-02".to_string(),
                engagement_value: 9_000.0,
            }],
            ..ArtistDataset::default()
        };
        let config = test_config(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());

        let outcome = aggregate(&dataset, &config).unwrap();
        let first = outcome.timeline.get(0).unwrap();
        assert_eq!(first.stream_total(RevenueStream::MediaYoutube), 9_000.0);
        assert_eq!(first.stream_total(RevenueStream::MediaTwitter), 0.0);
    }

    #[test]
    fn snapshots_cover_the_six_months_after_release() {
        let dataset = ArtistDataset {
            albums: vec![album("First Light", "2022-01-20", 50_000.0)],
            ..ArtistDataset::default()
        };
        let config = test_config(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());

        let outcome = aggregate(&dataset, &config).unwrap();
        for offset in 0..=6 {
            assert_eq!(
                outcome.timeline.get(offset).unwrap().album_snapshots.len(),
                1,
                "month offset {offset}"
            );
        }
        assert!(outcome.timeline.get(7).unwrap().album_snapshots.is_empty());
    }

    #[test]
    fn aggregation_is_deterministic() {
        let dataset = ArtistDataset {
            albums: vec![album("First Light", "2022-01-20", 120_000.0)],
            concerts: vec![ConcertEvent {
                name: "Arena".to_string(),
                start_date: "2022-03-05".to_string(),
                gross_value: 75_000.0,
            }],
            merchandise: vec![MerchandiseRecord {
                date: "2022-02-14".to_string(),
                sales_value: 4_200.0,
            }],
            ..ArtistDataset::default()
        };
        let config = test_config(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        let first = aggregate(&dataset, &config).unwrap();
        let second = aggregate(&dataset, &config).unwrap();
        assert_eq!(first, second);
    }
}
