//! Domain types and pure logic for the vidgrab service.
//!
//! Nothing in this crate performs I/O: URL validation, format ranking,
//! size formatting, `VideoSummary` mapping and the relay's request shaping
//! all live here so they can be tested without a network or an engine.

pub mod error;
pub mod formats;
pub mod relay;
pub mod urls;
pub mod video;
