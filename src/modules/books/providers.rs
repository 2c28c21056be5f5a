//! Injected capabilities: id generation and the clock.

use rand::Rng;
use time::OffsetDateTime;

/// URL-safe alphabet used for generated ids.
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Source of unique book ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random ids of a fixed length drawn from a 64-symbol alphabet.
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    length: usize,
}

impl RandomIdGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;
    use time::Duration;

    /// Yields `book-1`, `book-2`, ...
    #[derive(Default)]
    pub struct SequentialIds(AtomicU64);

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            format!("book-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    /// Advances one second on every read.
    pub struct SteppingClock(Mutex<OffsetDateTime>);

    impl Default for SteppingClock {
        fn default() -> Self {
            Self(Mutex::new(OffsetDateTime::UNIX_EPOCH))
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> OffsetDateTime {
            let mut current = self.0.lock().unwrap();
            *current += Duration::seconds(1);
            *current
        }
    }
}
