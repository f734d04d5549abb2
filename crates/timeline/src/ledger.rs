use crate::error::TimelineError;
use chrono::NaiveDate;
use core_types::{MonthIndex, RevenueStream, StreamWeights};
use serde::Serialize;

/// A lightweight view of an album release attached to nearby ledger months
/// for display payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumSnapshot {
    pub title: String,
    pub release_date: NaiveDate,
    pub streaming_value: f64,
    pub popularity_value: f64,
    pub retail_value: f64,
}

/// One month of the valuation ledger.
///
/// Per-stream totals are already weighted. `mov` is derived from them at
/// build time; the field is never written to directly anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineMonth {
    pub month_end: NaiveDate,
    streams: [f64; RevenueStream::COUNT],
    /// Monthly Overall Value: the sum of all weighted stream totals.
    pub mov: f64,
    pub album_snapshots: Vec<AlbumSnapshot>,
}

impl TimelineMonth {
    /// The accumulated, weighted total for one stream in this month.
    pub fn stream_total(&self, stream: RevenueStream) -> f64 {
        self.streams[stream.index()]
    }
}

/// The frozen valuation ledger: one entry per month, ascending, gap-free,
/// from the earliest event month to the configured horizon end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    start: MonthIndex,
    months: Vec<TimelineMonth>,
}

impl Timeline {
    pub fn months(&self) -> &[TimelineMonth] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn start(&self) -> MonthIndex {
        self.start
    }

    pub fn get(&self, index: usize) -> Option<&TimelineMonth> {
        self.months.get(index)
    }

    /// The position of `month` within the ledger, if covered.
    pub fn index_of(&self, month: MonthIndex) -> Option<usize> {
        let offset = month.offset_from(self.start);
        if offset < 0 || offset as usize >= self.months.len() {
            None
        } else {
            Some(offset as usize)
        }
    }
}

/// The mutable arena the aggregator writes contributions into.
///
/// Addressed by month offset from the range start. Contributions are weighted
/// at the moment they are written; writes outside the covered range fall
/// outside the valuation window and are dropped.
pub struct TimelineBuilder {
    start: MonthIndex,
    weights: StreamWeights,
    slots: Vec<MonthSlot>,
}

#[derive(Default, Clone)]
struct MonthSlot {
    streams: [f64; RevenueStream::COUNT],
    snapshots: Vec<AlbumSnapshot>,
}

impl TimelineBuilder {
    /// Creates an arena covering `start ..= end`.
    pub fn new(
        start: MonthIndex,
        end: MonthIndex,
        weights: StreamWeights,
    ) -> Result<Self, TimelineError> {
        let span = end.offset_from(start) + 1;
        if span <= 0 {
            return Err(TimelineError::EmptyRange { start, end });
        }
        Ok(Self {
            start,
            weights,
            slots: vec![MonthSlot::default(); span as usize],
        })
    }

    pub fn start(&self) -> MonthIndex {
        self.start
    }

    /// Accumulates one contribution into a month's stream total.
    ///
    /// Only strictly positive contributions are written; the stream weight is
    /// applied here, at the single point where values enter the ledger.
    pub fn add(&mut self, month: MonthIndex, stream: RevenueStream, contribution: f64) {
        if contribution <= 0.0 {
            return;
        }
        let offset = month.offset_from(self.start);
        if offset < 0 || offset as usize >= self.slots.len() {
            tracing::trace!(%month, %stream, contribution, "contribution outside valuation window");
            return;
        }
        self.slots[offset as usize].streams[stream.index()] +=
            contribution * self.weights.weight(stream);
    }

    /// Accumulates a whole distribution series into one stream.
    pub fn add_series(&mut self, stream: RevenueStream, series: &[(MonthIndex, f64)]) {
        for &(month, contribution) in series {
            self.add(month, stream, contribution);
        }
    }

    /// Attaches a display snapshot to a month, if covered.
    pub fn attach_snapshot(&mut self, month: MonthIndex, snapshot: AlbumSnapshot) {
        let offset = month.offset_from(self.start);
        if offset < 0 || offset as usize >= self.slots.len() {
            return;
        }
        self.slots[offset as usize].snapshots.push(snapshot);
    }

    /// Freezes the arena into a `Timeline`, recomputing every month's MOV
    /// from its per-stream totals.
    pub fn build(self) -> Timeline {
        let start = self.start;
        let months = self
            .slots
            .into_iter()
            .enumerate()
            .map(|(offset, slot)| {
                let mov = slot.streams.iter().sum();
                TimelineMonth {
                    month_end: start.plus(offset as i32).month_end(),
                    streams: slot.streams,
                    mov,
                    album_snapshots: slot.snapshots,
                }
            })
            .collect();
        Timeline { start, months }
    }
}
