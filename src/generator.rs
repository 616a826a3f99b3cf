use std::sync::Mutex;
use std::time::SystemTime;

#[cfg(feature = "rand")]
use std::sync::LazyLock;

#[cfg(feature = "rand")]
use rand::{rngs::StdRng, SeedableRng as _}; // cspell:disable-line

use crate::{base32, Error, Ulid, RANDOM_BITS, RANDOM_MASK, RANDOM_STEP, TAIL_MASK, TEXT_LEN, TIMESTAMP_MAX};

const RANDOM_BYTES: usize = (RANDOM_BITS / 8) as usize;

/// Source of randomness for ULID generation.
///
/// The generator treats randomness as an injected capability: anything that
/// can fill a buffer with uniformly distributed, cryptographically suitable
/// bytes. Deterministic tests can substitute a fixed sequence.
///
/// # Example
///
/// ```
/// use lexid::{RandomSource, UlidGenerator};
///
/// struct Fixed;
///
/// impl RandomSource for Fixed {
///     fn fill_bytes(&mut self, buffer: &mut [u8]) {
///         buffer.fill(0x42);
///     }
/// }
///
/// let generator = UlidGenerator::with_random_source(Box::new(Fixed));
/// let u = generator.generate_at(0).unwrap();
///
/// assert_eq!(u.timestamp(), 0);
/// ```
pub trait RandomSource: Send {
    /// Fills `buffer` with uniformly distributed random bytes.
    fn fill_bytes(&mut self, buffer: &mut [u8]);
}

#[cfg(feature = "rand")]
impl RandomSource for StdRng {
    fn fill_bytes(&mut self, buffer: &mut [u8]) {
        rand::RngCore::fill_bytes(self, buffer);
    }
}

struct State {
    random: Box<dyn RandomSource>,
    last: Option<(u64, u128)>,
}

/// Monotonic ULID generator.
///
/// Each generator owns its last-timestamp/last-randomness state behind a
/// mutex, so concurrent callers are serialized and the returned ULIDs are
/// strictly increasing for any sequence of calls on one instance.
/// Independent instances keep independent monotonic state.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use lexid::UlidGenerator;
///
/// let generator = UlidGenerator::new();
///
/// let u1 = generator.generate()?;
/// let u2 = generator.generate()?;
///
/// assert!(u1 < u2);
/// # Ok(()) }
/// ```
pub struct UlidGenerator {
    state: Mutex<State>,
}

impl UlidGenerator {
    /// Creates a generator backed by an OS-seeded random number generator.
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn new() -> Self {
        Self::with_random_source(Box::new(StdRng::from_entropy()))
    }

    /// Creates a generator with an injected randomness source.
    #[must_use]
    pub fn with_random_source(random: Box<dyn RandomSource>) -> Self {
        Self {
            state: Mutex::new(State { random, last: None }),
        }
    }

    /// Generates a ULID at the current wall-clock millisecond.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TimestampOutOfRange`] if the system clock is
    /// before the Unix epoch or past the 48-bit millisecond range (year
    /// 10889), and with [`Error::MonotonicOverflow`] if the randomness
    /// space of the current millisecond is exhausted.
    pub fn generate(&self) -> Result<Ulid, Error> {
        self.advance(wall_clock_millis()?)
    }

    /// Generates a ULID as if the clock read `millis`.
    ///
    /// A `millis` value at or before the last generated timestamp does not
    /// regress the stored timestamp; the randomness is advanced instead, so
    /// backward clock jumps keep the output monotonic.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TimestampOutOfRange`] if `millis` exceeds 48 bits,
    /// and with [`Error::MonotonicOverflow`] on randomness exhaustion.
    pub fn generate_at(&self, millis: u64) -> Result<Ulid, Error> {
        self.advance(millis)
    }

    fn advance(&self, now: u64) -> Result<Ulid, Error> {
        if now > TIMESTAMP_MAX {
            return Err(Error::TimestampOutOfRange);
        }

        // The state is a pair of plain integers and stays consistent even if
        // a panicking thread poisoned the lock.
        let mut state = self.state.lock().unwrap_or_else(|poisoned| {
            self.state.clear_poison();
            poisoned.into_inner()
        });

        let last = state.last;
        let (timestamp, randomness) = match last {
            // Same or earlier millisecond: keep the stored timestamp and
            // advance the randomness.
            Some((last_timestamp, last_randomness)) if now <= last_timestamp => {
                let bumped = last_randomness + RANDOM_STEP;
                if bumped > RANDOM_MASK {
                    return Err(Error::MonotonicOverflow);
                }
                (last_timestamp, bumped)
            }
            _ => {
                let mut buffer = [0; RANDOM_BYTES];
                state.random.fill_bytes(&mut buffer);

                let fresh = buffer
                    .iter()
                    .fold(0u128, |value, &byte| (value << 8) | u128::from(byte));

                // The low five bits never reach the output because the final
                // text character is pinned to zero. Clearing them keeps the
                // stored state equal to what the text carries, so every
                // increment is visible in the output.
                (now, fresh & !TAIL_MASK)
            }
        };

        state.last = Some((timestamp, randomness));

        let mut buffer = [0; TEXT_LEN];
        base32::encode(timestamp, randomness, &mut buffer);
        Ok(Ulid::from_text(buffer))
    }
}

#[cfg(feature = "rand")]
impl Default for UlidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn wall_clock_millis() -> Result<u64, Error> {
    let since_epoch = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|_| Error::TimestampOutOfRange)?;

    u64::try_from(since_epoch.as_millis()).map_err(|_| Error::TimestampOutOfRange)
}

#[cfg(feature = "rand")]
static DEFAULT_GENERATOR: LazyLock<UlidGenerator> = LazyLock::new(UlidGenerator::new);

/// Generates a ULID from the process-wide default generator.
///
/// # Errors
///
/// See [`UlidGenerator::generate`].
#[cfg(feature = "rand")]
pub fn generate() -> Result<Ulid, Error> {
    DEFAULT_GENERATOR.generate()
}

/// Generates a ULID from the process-wide default generator, as if the
/// clock read `millis`.
///
/// # Errors
///
/// See [`UlidGenerator::generate_at`].
#[cfg(feature = "rand")]
pub fn generate_at(millis: u64) -> Result<Ulid, Error> {
    DEFAULT_GENERATOR.generate_at(millis)
}
