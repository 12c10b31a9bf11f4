//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::generator::TagError;
use crate::Uuid;
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("uuid8: could not lock global generator")
}

/// Generates a UUIDv8 object.
///
/// This function employs a global generator and guarantees the process-wide
/// monotonic order of the (timestamp, sequence) fields of UUIDs generated
/// within the same millisecond. On Unix, this function resets the generator
/// when the process ID changes (i.e., upon process forks) to prevent
/// collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid8::uuid8();
/// println!("{}", uuid); // e.g., "02a7a0f0-718e-8d24-9462-30e3f05c2477"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuid8::uuid8().to_string();
/// ```
pub fn uuid8() -> Uuid {
    lock_global_gen().get_mut().generate()
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid8::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid {
    lock_global_gen().get_mut().generate_v4()
}

/// Generates a short identifier string.
///
/// # Examples
///
/// ```rust
/// let id = uuid8::short_id();
/// println!("{}", id); // e.g., "3SZGiuYLmG6"
/// ```
pub fn short_id() -> String {
    lock_global_gen().get_mut().generate_short()
}

/// Sets the tag nibble embedded in every UUIDv8 minted by [`uuid8`] from now
/// on.
///
/// The tag persists until changed. Values above 15 are rejected and leave the
/// global generator untouched.
///
/// # Examples
///
/// ```rust
/// uuid8::set_tag(3)?;
/// assert_eq!(uuid8::uuid8().tag(), 3);
/// # uuid8::set_tag(0)?;
/// # Ok::<(), uuid8::TagError>(())
/// ```
pub fn set_tag(tag: u8) -> Result<(), TagError> {
    lock_global_gen().get_mut().set_tag(tag)
}

mod inner {
    use crate::source::EntropySource;
    use crate::V8Generator;

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V8Generator<EntropySource>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V8Generator::new(EntropySource::probe()),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`V8Generator`] instance, resetting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V8Generator<EntropySource> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}

#[cfg(test)]
mod tests_v8 {
    use super::{set_tag, uuid8};
    use crate::Variant;

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid8().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-8[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use crate::generator::epoch_ms;
        for _ in 0..10_000 {
            let ts_now = epoch_ms() as i64;
            let timestamp = uuid8().timestamp() as i64;
            assert!((ts_now - timestamp).abs() < 16);
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = uuid8();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(8));
        }
    }

    /// Embeds the tag set through the entry point
    #[test]
    fn embeds_the_tag_set_through_the_entry_point() {
        assert!(set_tag(16).is_err());

        set_tag(9).unwrap();
        for _ in 0..100 {
            assert_eq!(uuid8().tag(), 9);
        }
        set_tag(0).unwrap();
        assert_eq!(uuid8().tag(), 0);
    }

    /// Generates no IDs sharing same timestamp and sequence under multithreading
    #[test]
    fn generates_no_ids_sharing_same_timestamp_and_sequence_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(uuid8()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert((e.timestamp(), e.sequence()));
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}
