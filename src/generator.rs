//! UUIDv8 generator and related types.

#[cfg(not(feature = "std"))]
use core as std;

use std::fmt;

use crate::Uuid;

/// Milliseconds between the Unix epoch and 2022-01-01T00:00:00Z, the reference
/// point for the timestamp field of v8 and short identifiers.
pub const TIME_REF_MS: u64 = 1_640_995_200_000;

/// The maximum value of the 14-bit sequence field.
const MAX_SEQUENCE: u16 = (1 << 14) - 1;

/// The tag nibble's position within the random word.
const TAG_MASK: u64 = 0x0f00;

/// Returns the current epoch-relative timestamp in milliseconds.
///
/// Clocks set before the reference point saturate at zero rather than
/// wrapping into the timestamp field.
#[cfg(feature = "std")]
pub(crate) fn epoch_ms() -> u64 {
    use std::time;
    (time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .expect("clock may have gone backwards")
        .as_millis() as u64)
        .saturating_sub(TIME_REF_MS)
}

/// A trait that defines the minimum random number generator interface for [`V8Generator`].
pub trait Rng {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;

    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Every [`rand::RngCore`] type doubles as a random source for the generator.
impl<T: rand::RngCore> Rng for T {
    fn next_u32(&mut self) -> u32 {
        rand::RngCore::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand::RngCore::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand::RngCore::fill_bytes(self, dest)
    }
}

/// Represents a UUIDv8 generator that encapsulates a sequence counter and
/// guarantees that identifiers minted within the same millisecond are ordered
/// by their (timestamp, sequence) field pair.
///
/// This type provides the interface to customize the random number generator
/// and system clock of a UUIDv8 generator. It also helps control the scope of
/// the guaranteed order of the generated UUIDs. The following example
/// guarantees the process-wide (cross-thread) monotonicity using Rust's
/// standard synchronization mechanism.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use uuid8::V8Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(V8Generator::new(OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
///
/// # State
///
/// The generator carries the last minted (timestamp, sequence) pair, a count
/// of identifiers minted within the current millisecond, and a 64-bit random
/// word whose tag nibble holds the value set through [`set_tag`]. The random
/// word is rolled once at construction and re-rolled (tag preserved) only
/// when the clock is observed to run backwards.
///
/// [`set_tag`]: V8Generator::set_tag
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct V8Generator<R> {
    timestamp: u64,
    rand_word: u64,
    sequence: u16,
    seq_count: u16,

    /// The random number generator used by the generator.
    rng: R,
}

impl<R: Rng> V8Generator<R> {
    /// Creates a generator instance, rolling the initial random word and
    /// sequence from `rng`. The tag nibble starts at zero.
    pub fn new(mut rng: R) -> Self {
        let rand_word = rng.next_u64() & !TAG_MASK;
        let sequence = (rng.next_u64() & MAX_SEQUENCE as u64) as u16;
        Self {
            timestamp: 0,
            rand_word,
            sequence,
            seq_count: 0,
            rng,
        }
    }

    /// Returns the current tag nibble value.
    pub const fn tag(&self) -> u8 {
        ((self.rand_word & TAG_MASK) >> 8) as u8
    }

    /// Sets the tag nibble embedded in every identifier minted afterwards.
    ///
    /// Values above 15 are rejected with a [`TagError`] and leave the
    /// generator state untouched. The tag persists until changed, across
    /// clock regressions included.
    pub fn set_tag(&mut self, tag: u8) -> Result<(), TagError> {
        if tag > 0x0f {
            return Err(TagError { value: tag });
        }
        self.rand_word = (self.rand_word & !TAG_MASK) | ((tag as u64) << 8);
        Ok(())
    }

    /// Generates a new UUIDv8 object from the current timestamp.
    ///
    /// This method spins when the clock has regressed below the last minted
    /// timestamp or when the 14-bit sequence space of the current millisecond
    /// is exhausted, re-reading the clock until it advances. The spin is
    /// bounded by clock granularity in the steady state (at most 16384
    /// identifiers are minted per millisecond), not by a hard deadline; a
    /// clock that never advances would stall this method.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate(&mut self) -> Uuid {
        let mut spins = 0u32;
        loop {
            if let Some(e) = self.generate_core(epoch_ms()) {
                return e;
            }
            spins += 1;
            if spins & 0x3f == 0 {
                std::thread::yield_now();
            } else {
                std::hint::spin_loop();
            }
        }
    }

    /// Generates a new UUIDv8 object from the `timestamp` passed, or returns
    /// `None` when the caller has to retry with a fresh clock reading.
    ///
    /// `None` is returned in two cases: the given timestamp is smaller than
    /// the last minted one (the random word is re-rolled, tag preserved, so
    /// that identifiers minted after the clock recovers do not collide with
    /// ones minted before the regression), or the sequence space of the
    /// current millisecond is exhausted. Either way, no identifier is minted
    /// with a timestamp smaller than an already minted one.
    ///
    /// # Panics
    ///
    /// Panics if `timestamp` does not fit in 48 bits.
    pub fn generate_core(&mut self, timestamp: u64) -> Option<Uuid> {
        assert!(timestamp < 1 << 48, "`timestamp` must fit in 48 bits");

        if timestamp < self.timestamp {
            // clock regression: re-roll the random word around the tag nibble
            self.rand_word = (self.rand_word & TAG_MASK) | (self.rng.next_u64() & !TAG_MASK);
            self.seq_count = 0;
            return None;
        }

        if timestamp == self.timestamp {
            if self.seq_count >= MAX_SEQUENCE {
                return None;
            }
            self.sequence = (self.sequence + 1) & MAX_SEQUENCE;
            self.seq_count += 1;
        } else {
            self.timestamp = timestamp;
            self.sequence = (self.rng.next_u64() & MAX_SEQUENCE as u64) as u16;
            self.seq_count = 0;
        }

        Some(Uuid::from_fields_v8(
            self.timestamp,
            self.rand_word,
            self.sequence,
        ))
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    pub fn generate_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        bytes[6] = 0x40 | (bytes[6] >> 4);
        bytes[8] = 0x80 | (bytes[8] >> 2);
        Uuid::from(bytes)
    }

    /// Generates a new short identifier utilizing the random number generator
    /// inside.
    ///
    /// See [`short_id_core`](crate::short::short_id_core) for the layout.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate_short(&mut self) -> String {
        crate::short::short_id_core(self.rng.next_u64(), epoch_ms())
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv8 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid8::V8Generator;
///
/// V8Generator::new(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: Rng> Iterator for V8Generator<R> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: Rng> std::iter::FusedIterator for V8Generator<R> {}

/// Error reported when a tag value does not fit in four bits.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TagError {
    value: u8,
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag value {} does not fit in 4 bits", self.value)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TagError {}
