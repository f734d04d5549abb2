//! # Encore Core Types
//!
//! This crate defines the shared vocabulary of the valuation engine: the raw
//! artist-activity records, the revenue-stream taxonomy, the stream weight
//! table, and the canonical month arithmetic used to key the valuation ledger.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate has no knowledge of any other part of the system.
//!   Every other crate depends on it, directly or indirectly.
//! - **Untrusted input:** Event records arrive from an external document store
//!   and carry their dates as plain strings. Parsing happens exactly once, at
//!   the aggregation boundary, so a malformed record can be skipped and
//!   reported instead of corrupting the ledger.

pub mod enums;
pub mod error;
pub mod events;
pub mod month;
pub mod weights;

// Re-export the core types to provide a clean public API.
pub use enums::{AppearanceCategory, EventCategory, RevenueStream, SocialPlatform};
pub use error::CoreError;
pub use events::{
    AlbumRelease, ArtistDataset, ConcertEvent, ManagementAppearance, MerchandiseRecord, SocialPost,
};
pub use month::{parse_event_date, MonthIndex};
pub use weights::StreamWeights;
