//! Tendermint records and their canonical amino encoding.
//!
//! # Overview
//!
//! Every record in this crate implements [amino_codec::Write] and [amino_codec::EncodeSize]
//! for its bare amino encoding, and [serde::Serialize] for the JSON rendering consumed by
//! other implementations of the same wire format.
//!
//! A [Vote] is never encoded directly: it is first reduced to a [CanonicalVote] scoped to a
//! chain (see [canonicalize]), which is what validators sign.
//!
//! # Example
//!
//! ```rust
//! use amino_codec::{util::hex, EncodeExt};
//! use amino_types::Consensus;
//!
//! let version = Consensus { block: 11, app: 15 };
//! assert_eq!(hex(&version.encode()), "080b100f");
//! ```

pub mod block;
pub mod canonical;
mod json;
pub mod time;
pub mod validator;
pub mod version;
pub mod vote;

pub use block::{BlockId, PartSetHeader};
pub use canonical::{canonicalize, CanonicalBlockId, CanonicalPartSetHeader, CanonicalVote};
pub use time::Timestamp;
pub use validator::ValidatorHashInput;
pub use version::Consensus;
pub use vote::{SignedMsgType, Vote};
