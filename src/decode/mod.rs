//! Decoding helpers for the API's non-standard JSON formats.
//!
//! Timestamps arrive without a zone designator (`2018-01-02T03:04:05`) on
//! most endpoints but as RFC 3339 on newer ones, and some durations are
//! sent as `h:mm:ss` strings. These modules are meant to be used with
//! `#[serde(with = "...")]` on entity fields.

pub mod time_remaining;
pub mod timestamp;

use serde_with::{DisplayFromStr, PickFirst, Same};

/// Accepts a JSON number or a string holding one; serializes as a number.
///
/// Use with `#[serde_as(as = "NumberOrString")]`.
pub type NumberOrString = PickFirst<(Same, DisplayFromStr)>;
