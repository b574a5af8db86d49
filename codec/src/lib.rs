//! Encode structured data in amino's canonical binary form.
//!
//! # Overview
//!
//! A binary serialization library designed to produce bit-exact encodings that independent
//! implementations of the same wire format can be checked against:
//! - Varints (unsigned, and ZigZag for signed standalone integers)
//! - Records (messages) written as keyed fields in a fixed, declared order
//! - Polymorphic values written as a registered type prefix followed by the concrete value
//!
//! Encoding is a pure function of a value (and, for polymorphic values, the immutable
//! [Registry] of their interface). There is no decoder for records: only varints can be read
//! back.
//!
//! # Example
//!
//! ```
//! use bytes::BufMut;
//! use amino_codec::{field_size, write_field, EncodeExt, EncodeSize, Message, Write};
//!
//! // Define a record
//! struct Version {
//!     block: u64,
//!     app: u64,
//! }
//!
//! impl Message for Version {
//!     type Context = ();
//! }
//!
//! // Write each field in declared order
//! impl Write for Version {
//!     fn write_cx(&self, buf: &mut impl BufMut, cx: &()) {
//!         write_field(1, &self.block, buf, cx);
//!         write_field(2, &self.app, buf, cx);
//!     }
//! }
//!
//! impl EncodeSize for Version {
//!     fn encode_size_cx(&self, cx: &()) -> usize {
//!         field_size(1, &self.block, cx) + field_size(2, &self.app, cx)
//!     }
//! }
//!
//! // Zero-valued fields are omitted
//! let encoded = Version { block: 11, app: 0 }.encode();
//! assert_eq!(encoded.as_ref(), &[0x08, 0x0b]);
//! ```

pub mod codec;
pub mod error;
pub mod field;
pub mod registry;
pub mod types;
pub mod util;
pub mod varint;

// Re-export main types and traits
pub use codec::{Encode, EncodeExt, EncodeSize, Message, Write};
pub use error::Error;
pub use field::{field_size, write_field, Field, Typ3};
pub use registry::{Interface, Prefix, Registry};
pub use types::primitives::{Fixed32, Fixed64};
