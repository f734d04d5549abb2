use core_types::MonthIndex;
use decay::DecayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("No events with usable dates were supplied")]
    NoUsableEvents,

    #[error("Timeline range is empty: horizon end {end} precedes the first event month {start}")]
    EmptyRange { start: MonthIndex, end: MonthIndex },

    #[error("Decay distribution failed: {0}")]
    Decay(#[from] DecayError),
}
