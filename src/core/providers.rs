//! Injectable sources of commit hashes and timestamps.
//!
//! The repository never generates ids or reads the clock directly. Production code
//! uses [`RandomHashGenerator`] and [`SystemClock`]; tests plug in
//! [`SequentialHashGenerator`] and [`FixedClock`] so hashes and timestamps are
//! reproducible in assertions.

use crate::core::state::CommitHash;

/// Length of generated commit hashes
pub const HASH_LEN: usize = 7;

pub trait HashGenerator {
    fn next_hash(&mut self) -> CommitHash;
}

pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Pseudo-random short hashes derived from an md5 digest of the current time,
/// a per-generator counter and the process id.
#[derive(Debug, Default)]
pub struct RandomHashGenerator {
    counter: u64,
}

impl RandomHashGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HashGenerator for RandomHashGenerator {
    fn next_hash(&mut self) -> CommitHash {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let seed = format!("{nanos}:{}:{}", self.counter, std::process::id());
        self.counter = self.counter.wrapping_add(1);

        let digest = format!("{:x}", md5::compute(seed.as_bytes()));
        digest[..HASH_LEN].to_string()
    }
}

/// Deterministic hashes `0000001`, `0000002`, ...
#[derive(Debug, Default)]
pub struct SequentialHashGenerator {
    next: u64,
}

impl SequentialHashGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `start`
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }
}

impl HashGenerator for SequentialHashGenerator {
    fn next_hash(&mut self) -> CommitHash {
        self.next += 1;
        format!("{:0width$x}", self.next, width = HASH_LEN)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
