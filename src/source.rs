//! Entropy source selection for the process-wide generator.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::fmt;

use rand::rngs::{adapter::ReseedingRng, OsRng};
use rand::{RngCore, SeedableRng};
use rand_chacha::{ChaCha12Core, ChaCha12Rng};

/// Number of bytes drawn from the ChaCha12 core before it is reseeded from
/// the OS.
const RESEED_THRESHOLD: u64 = 1024 * 64;

/// The random source behind the process-wide generator, selected once at
/// construction from an ordered list of candidates:
///
/// 1. a ChaCha12 generator seeded from, and periodically reseeded by, the
///    operating system's entropy source (the strategy used by
///    [`rand::rngs::ThreadRng`]);
/// 2. the operating system's entropy source used directly, if the ChaCha core
///    cannot be seeded but the OS source answers a probe read;
/// 3. a ChaCha12 generator seeded from the wall clock and the process ID.
///
/// The last candidate is not cryptographically meaningful and is announced
/// through a `tracing` warning when selected; the first two are logged at
/// debug level.
pub enum EntropySource {
    Reseeding(ReseedingRng<ChaCha12Core, OsRng>),
    Os(OsRng),
    Weak(ChaCha12Rng),
}

impl EntropySource {
    /// Probes the candidate sources in order and returns the first usable one.
    pub fn probe() -> Self {
        match ChaCha12Core::from_rng(OsRng) {
            Ok(core) => {
                tracing::debug!("selected reseeding ChaCha12 entropy source");
                Self::Reseeding(ReseedingRng::new(core, RESEED_THRESHOLD, OsRng))
            }
            Err(err) => {
                let mut probe = [0u8; 8];
                if OsRng.try_fill_bytes(&mut probe).is_ok() {
                    tracing::debug!(error = %err, "selected bare OS entropy source");
                    Self::Os(OsRng)
                } else {
                    tracing::warn!(
                        error = %err,
                        "no secure random source available; falling back to a \
                         time-seeded PRNG with degraded uniqueness guarantees"
                    );
                    Self::Weak(ChaCha12Rng::seed_from_u64(weak_seed()))
                }
            }
        }
    }
}

/// Derives a last-resort seed from the wall clock and the process ID.
fn weak_seed() -> u64 {
    use std::time;
    let nanos = time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    nanos ^ ((std::process::id() as u64) << 32)
}

impl RngCore for EntropySource {
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::Reseeding(rng) => rng.next_u32(),
            Self::Os(rng) => rng.next_u32(),
            Self::Weak(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Self::Reseeding(rng) => rng.next_u64(),
            Self::Os(rng) => rng.next_u64(),
            Self::Weak(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match self {
            Self::Reseeding(rng) => rng.fill_bytes(dest),
            Self::Os(rng) => rng.fill_bytes(dest),
            Self::Weak(rng) => rng.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        match self {
            Self::Reseeding(rng) => rng.try_fill_bytes(dest),
            Self::Os(rng) => rng.try_fill_bytes(dest),
            Self::Weak(rng) => rng.try_fill_bytes(dest),
        }
    }
}

impl fmt::Debug for EntropySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reseeding(_) => "EntropySource::Reseeding",
            Self::Os(_) => "EntropySource::Os",
            Self::Weak(_) => "EntropySource::Weak",
        })
    }
}
