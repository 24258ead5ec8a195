use crate::common::OBJECT_ID_BYTES;
use chrono::Utc;
use log::debug;
use rand::rngs::OsRng;
use rand::Rng;
use std::fmt::Write;
use std::sync::atomic::{AtomicU32, Ordering};

const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Produces unique identities for documents stored without an explicit key.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Generates 12 byte object ids rendered as 24 lowercase hex characters.
///
/// Layout, most significant first:
/// * 4 bytes: seconds since the Unix epoch, big-endian
/// * 5 bytes: random value fixed for the lifetime of the generator
/// * 3 bytes: counter, seeded randomly and wrapping at 2^24
///
/// Ids from one generator sort by creation second and never repeat within
/// the same second until the counter wraps.
pub struct ObjectIdGenerator {
    process_unique: [u8; 5],
    counter: AtomicU32,
}

impl ObjectIdGenerator {
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let uid = uuid.as_bytes();

        let mut process_unique = [0u8; 5];
        process_unique.copy_from_slice(&uid[uid.len() - 5..]);

        let seed = OsRng.gen::<u32>() & COUNTER_MASK;
        debug!("Initialized object id generator with counter seed {}", seed);

        ObjectIdGenerator {
            process_unique,
            counter: AtomicU32::new(seed),
        }
    }

    /// Returns the raw 12 id bytes.
    pub fn next_bytes(&self) -> [u8; OBJECT_ID_BYTES] {
        let seconds = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let count = self.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; OBJECT_ID_BYTES];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&self.process_unique);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        bytes
    }
}

impl Default for ObjectIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for ObjectIdGenerator {
    fn generate(&self) -> String {
        self.next_bytes()
            .iter()
            .fold(String::with_capacity(OBJECT_ID_BYTES * 2), |mut hex, byte| {
                write!(hex, "{:02x}", byte).ok();
                hex
            })
    }
}
