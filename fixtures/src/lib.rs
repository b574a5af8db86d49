//! Generate golden amino encodings of Tendermint records as JSON fixtures.
//!
//! # Overview
//!
//! Each [Category] of record has a fixed table of values. Every value is encoded (votes are
//! canonicalized first) and paired with the lowercase hexadecimal form of its encoding in a
//! [Fixture]. The fixtures of a category are rendered as a pretty-printed JSON array and
//! written to a single file in the output directory.
//!
//! Other implementations of the wire format are tested by decoding the `value` of each fixture,
//! encoding it themselves, and comparing against `encoding`.
//!
//! # Atomicity
//!
//! A category is rendered entirely in memory before anything is written. The rendered file is
//! written next to its destination and renamed into place, so a failure never leaves a partial
//! (or previous-run-mixed) artifact behind.

pub mod config;
pub use config::Config;
mod error;
pub use error::Error;
pub mod harness;
pub use harness::{check, generate, render, Category, Fixture};
pub mod tables;
