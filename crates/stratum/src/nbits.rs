use super::*;

/// Compact network target (`bits`), eight hex digits on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct Nbits(CompactTarget);

impl Nbits {
    pub fn from_consensus(bits: u32) -> Self {
        Self(CompactTarget::from_consensus(bits))
    }

    pub fn to_consensus(self) -> u32 {
        self.0.to_consensus()
    }

    pub fn to_compact(self) -> CompactTarget {
        self.0
    }

    /// The expanded network target as a 256-bit number.
    pub fn to_target(self) -> U256 {
        U256::from_big_endian(&Target::from_compact(self.0).to_be_bytes())
    }
}

impl From<CompactTarget> for Nbits {
    fn from(bits: CompactTarget) -> Self {
        Self(bits)
    }
}

impl FromStr for Nbits {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = u32::from_str_radix(s, 16).map_err(|e| InternalError::Parse {
            message: format!("invalid nbits '{s}': {e}"),
        })?;

        Ok(Self::from_consensus(bits))
    }
}

impl Display for Nbits {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0.to_consensus())
    }
}
