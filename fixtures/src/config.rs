//! Generator configuration.

use crate::Error;
use chrono::FixedOffset;
use std::path::PathBuf;

/// Default output directory.
pub const DEFAULT_OUTPUT: &str = "test/fixtures";

/// Default chain identifier votes are canonicalized for.
pub const DEFAULT_CHAIN_ID: &str = "chain-id";

/// Default offset from UTC (in seconds) of the zone the local time fixture is built in
/// (Hong Kong, `+08:00`).
pub const DEFAULT_ZONE_OFFSET: i32 = 8 * 60 * 60;

/// Configuration of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory the fixture files are written to (or checked against).
    pub output: PathBuf,

    /// Chain identifier votes are canonicalized for.
    pub chain_id: String,

    /// Offset from UTC (in seconds) of the zone the local time fixture is constructed in
    /// before being normalized to UTC.
    pub zone_offset: i32,
}

impl Config {
    /// Returns the zone the local time fixture is constructed in.
    pub fn zone(&self) -> Result<FixedOffset, Error> {
        FixedOffset::east_opt(self.zone_offset).ok_or(Error::InvalidZone(self.zone_offset))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            zone_offset: DEFAULT_ZONE_OFFSET,
        }
    }
}
