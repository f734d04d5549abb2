use crate::enums::RevenueStream;
use serde::{Deserialize, Serialize};

/// The multiplier applied to a contribution at the moment it is written into
/// the ledger, one field per revenue stream.
///
/// Fields are named after the stream wire labels so a `[weights]` table in
/// `config.toml` maps onto this struct directly. Every weight defaults to
/// `1.0`; the mapping is total, so there is no fallback lookup path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamWeights {
    pub fv_t: f64,
    pub sv_t: f64,
    pub apv_t: f64,
    pub rv_t: f64,
    pub cev_t: f64,
    pub mcv_twitter: f64,
    pub mcv_youtube: f64,
    pub mds_t: f64,
    pub mrv_t: f64,
}

impl StreamWeights {
    /// The weight for one stream.
    pub fn weight(&self, stream: RevenueStream) -> f64 {
        match stream {
            RevenueStream::Fandom => self.fv_t,
            RevenueStream::Streaming => self.sv_t,
            RevenueStream::AlbumPopularity => self.apv_t,
            RevenueStream::AlbumRetail => self.rv_t,
            RevenueStream::Concert => self.cev_t,
            RevenueStream::MediaTwitter => self.mcv_twitter,
            RevenueStream::MediaYoutube => self.mcv_youtube,
            RevenueStream::Merchandise => self.mds_t,
            RevenueStream::Management => self.mrv_t,
        }
    }
}

impl Default for StreamWeights {
    fn default() -> Self {
        Self {
            fv_t: 1.0,
            sv_t: 1.0,
            apv_t: 1.0,
            rv_t: 1.0,
            cev_t: 1.0,
            mcv_twitter: 1.0,
            mcv_youtube: 1.0,
            mds_t: 1.0,
            mrv_t: 1.0,
        }
    }
}
