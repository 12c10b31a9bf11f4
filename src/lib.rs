//! Tagged, time-ordered UUIDv8 identifiers with base62 short forms
//!
//! ```rust
//! use uuid8::uuid8;
//!
//! let uuid = uuid8();
//! println!("{}", uuid); // e.g. "02a7a0f0-718e-8d24-9462-30e3f05c2477"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! # Field and bit layout
//!
//! The time-ordered generator produces identifiers with the following bit
//! layout, where the timestamp counts milliseconds elapsed since
//! 2022-01-01T00:00:00Z ([`TIME_REF_MS`]):
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |             rand              |  ver  |  tag  |     rand      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                      timestamp                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |            timestamp              |          sequence         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 4-bit `ver` field is set at `1000`.
//! - The 4-bit `tag` field carries an application-defined classification
//!   value installed through [`set_tag`] (or [`V8Generator::set_tag`]); zero
//!   until set.
//! - The 2-bit `var` field is set at `10`.
//! - The 48-bit `timestamp` field holds the epoch-relative millisecond
//!   timestamp of the generator.
//! - The 14-bit `sequence` field orders identifiers minted within the same
//!   millisecond. It is incremented by one (wrapping within 14 bits) for each
//!   new identifier minted within the same timestamp and randomly
//!   initialized whenever the timestamp changes.
//! - The remaining 60 `rand` bits are filled once per generator with a
//!   cryptographically strong random number and re-rolled only when the
//!   system clock is observed to move backwards.
//!
//! At most 16384 identifiers can be minted within one millisecond; past that
//! the generator rechecks the clock until it advances. When the clock moves
//! backwards, the generator refuses to mint until the clock catches up with
//! the last minted timestamp, so the (timestamp, sequence) field pair of
//! identifiers from one generator never decreases in call order.
//!
//! # Other identifier families
//!
//! Fully random UUIDv4 identifiers:
//!
//! ```rust
//! use uuid8::uuid4;
//!
//! let uuid = uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! ```
//!
//! Compact base62 short identifiers for URLs and filenames, blending the low
//! 32 bits of the timestamp with 32 fresh random bits:
//!
//! ```rust
//! use uuid8::short_id;
//!
//! let id = short_id();
//! println!("{}", id); // e.g. "3SZGiuYLmG6"
//! ```
//!
//! A v8 identifier can also be re-encoded into a twelve-byte base62 short
//! form with [`shorten_v8`].

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{parse_words, ParseError, Uuid, Variant};

pub mod codec;

mod generator;
pub use generator::{Rng, TagError, V8Generator, TIME_REF_MS};

mod source;
#[cfg(feature = "global_gen")]
pub use source::EntropySource;

mod short;
#[cfg(feature = "std")]
pub use short::{short_id_core, short_id_with, shorten_v8};

mod entry;
#[cfg(feature = "global_gen")]
pub use entry::{set_tag, short_id, uuid4, uuid8};
