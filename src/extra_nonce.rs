use super::*;

/// Hands out extranonce1 values from the partition owned by this pool
/// instance. The top five bits carry the instance id, the remaining 27 bits
/// count connections.
#[derive(Debug)]
pub struct ExtraNonce {
    counter: AtomicU32,
    last: u32,
}

impl ExtraNonce {
    pub const EXTRANONCE1_SIZE: usize = 4;
    pub const EXTRANONCE2_SIZE: usize = 4;
    pub const PLACEHOLDER_SIZE: usize = Self::EXTRANONCE1_SIZE + Self::EXTRANONCE2_SIZE;
    pub const MAX_INSTANCE_ID: u32 = 31;

    const PARTITION_BITS: u32 = 27;

    pub fn new(instance_id: u32) -> Result<Self, PoolError> {
        if instance_id > Self::MAX_INSTANCE_ID {
            return ConfigurationSnafu {
                message: format!(
                    "instance id {instance_id} exceeds maximum {}",
                    Self::MAX_INSTANCE_ID
                ),
            }
            .fail();
        }

        let first = instance_id << Self::PARTITION_BITS;

        Ok(Self {
            counter: AtomicU32::new(first),
            last: first | ((1 << Self::PARTITION_BITS) - 1),
        })
    }

    /// Next unused extranonce1. Running out of the partition is an error
    /// rather than a wrap, since a repeated extranonce1 hands two miners the
    /// same search space.
    pub fn next(&self) -> Result<Extranonce, PoolError> {
        let previous = self
            .counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                (current < self.last).then_some(current + 1)
            })
            .map_err(|_| {
                ConfigurationSnafu {
                    message: "extranonce1 partition exhausted",
                }
                .build()
            })?;

        Ok(Extranonce::from(previous + 1))
    }

    /// The zeroed bytes standing in for extranonce1 and extranonce2 while the
    /// coinbase is built.
    pub fn placeholder() -> [u8; Self::PLACEHOLDER_SIZE] {
        [0; Self::PLACEHOLDER_SIZE]
    }
}
