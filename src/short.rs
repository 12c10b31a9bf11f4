//! Short identifiers and the short form of v8 identifiers.

#![cfg(feature = "std")]
#![cfg_attr(docsrs, doc(cfg(feature = "std")))]

use crate::generator::{epoch_ms, Rng};
use crate::{codec, Uuid};

/// Builds a short identifier from already-chosen field values.
///
/// The high 32 bits of `rand_word` are combined with the low 32 bits of the
/// epoch-relative `timestamp` into one 64-bit value, rendered in base62. The
/// layout keeps identifiers minted around the same time textually close while
/// the random half keeps the collision risk low for human-facing labels.
pub fn short_id_core(rand_word: u64, timestamp: u64) -> String {
    let msb = (rand_word & 0xffff_ffff_0000_0000) | (timestamp & 0x0000_0000_ffff_ffff);
    codec::encode_base62(&msb.to_be_bytes())
}

/// Generates a short identifier from the current timestamp and a random value
/// drawn from `rng`.
///
/// Unlike [`V8Generator::generate`](crate::V8Generator::generate), this is a
/// pure function of the clock and fresh randomness; no state is carried
/// between calls and no ordering is guaranteed within a millisecond.
pub fn short_id_with<R: Rng>(rng: &mut R) -> String {
    short_id_core(rng.next_u64(), epoch_ms())
}

/// Re-encodes a v8 identifier into its short base62 form.
///
/// The first four bytes, dominated by fixed version and variant bits and the
/// tag nibble, carry the least distinguishing information and are dropped;
/// the remaining twelve bytes are rendered in base62. This is a pure
/// re-encoding that consumes no randomness.
///
/// # Examples
///
/// ```rust
/// use uuid8::{shorten_v8, Uuid};
///
/// let e = "18c4dc0c-0c07-898f-805f-c8b89e6c0cc3".parse::<Uuid>()?;
/// assert_eq!(shorten_v8(&e), "4qC0JvdNkk2ZR8bL");
/// # Ok::<(), uuid8::ParseError>(())
/// ```
pub fn shorten_v8(uuid: &Uuid) -> String {
    codec::encode_base62(&uuid.as_bytes()[4..])
}
