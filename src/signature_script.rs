use super::*;

/// Coinbase input script, split around the extranonce gap.
///
/// `part1` is the height, the template's coinbase flags, the job timestamp and
/// the placeholder length; `part2` is the pool tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureScript {
    pub part1: Vec<u8>,
    pub part2: Vec<u8>,
    placeholder_len: usize,
}

impl SignatureScript {
    pub fn new(
        height: u64,
        flags: &[u8],
        timestamp: u64,
        placeholder_len: usize,
        tag: &str,
    ) -> Result<Self, PoolError> {
        let placeholder_byte = u8::try_from(placeholder_len).map_err(|_| {
            EncodingSnafu {
                message: format!("extranonce placeholder of {placeholder_len} bytes"),
            }
            .build()
        })?;

        let height = i64::try_from(height).map_err(|_| {
            EncodingSnafu {
                message: format!("height {height} out of range"),
            }
            .build()
        })?;

        let timestamp = i64::try_from(timestamp).map_err(|_| {
            EncodingSnafu {
                message: format!("timestamp {timestamp} out of range"),
            }
            .build()
        })?;

        let mut part1 = serialize_number(height)?;
        part1.extend_from_slice(flags);
        part1.extend(serialize_number(timestamp)?);
        part1.push(placeholder_byte);

        Ok(Self {
            part1,
            part2: serialize_string(tag)?,
            placeholder_len,
        })
    }

    /// Script length once the extranonces are filled in.
    pub fn len(&self) -> usize {
        self.part1.len() + self.placeholder_len + self.part2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
