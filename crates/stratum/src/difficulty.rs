use {super::*, core::cmp::Ordering};

/// The largest target, difficulty 1 for double-SHA256 coins.
pub static DIFFICULTY_1_TARGET: LazyLock<U256> =
    LazyLock::new(|| U256::from_big_endian(&Target::MAX.to_be_bytes()));

/// Share difficulty as handed out by `mining.set_difficulty`.
///
/// Algorithms whose hashes are not double-SHA256 scale the difficulty 1 target
/// by a multiplier (scrypt coins use 2^16), so converting a difficulty into a
/// target always takes the multiplier of the algorithm in use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty(f64);

impl Difficulty {
    pub fn new(difficulty: f64) -> Result<Self> {
        if !difficulty.is_finite() || difficulty <= 0.0 {
            return Err(InternalError::Parse {
                message: format!("difficulty must be finite and > 0, got {difficulty}"),
            });
        }

        Ok(Self(difficulty))
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Hash values at or below the returned target satisfy this difficulty.
    pub fn to_target(self, multiplier: u32) -> U256 {
        let base = DIFFICULTY_1_TARGET.saturating_mul(U256::from(multiplier.max(1)));

        // Past 64 bits the difficulty is an exact integer, so divide by it
        // directly instead of squeezing it into a u64 denominator.
        if self.0 >= u64::MAX as f64 {
            return to_u256(self.0).map_or(U256::zero(), |difficulty| base / difficulty);
        }

        // Scale numerator and denominator by a power of two so fractional
        // difficulties keep their precision without overflowing 256 bits.
        let headroom = (U256::MAX / base).min(U256::from(1u64 << 31)).as_u64();
        let max_scale = 1u64 << (63 - headroom.leading_zeros());

        let scale = (u64::MAX as f64 / self.0)
            .floor()
            .min(max_scale as f64)
            .max(1.0) as u64;

        let denominator = (self.0 * scale as f64).round() as u64;

        if denominator == 0 {
            return U256::MAX;
        }

        base.saturating_mul(U256::from(scale)) / U256::from(denominator)
    }

    /// Difficulty achieved by a hash interpreted as a 256-bit number.
    pub fn of_hash(hash: U256, multiplier: u32) -> f64 {
        if hash.is_zero() {
            return f64::INFINITY;
        }

        to_f64(*DIFFICULTY_1_TARGET) / to_f64(hash) * f64::from(multiplier.max(1))
    }

    /// Network difficulty encoded by compact `bits`.
    pub fn of_bits(bits: CompactTarget) -> f64 {
        Target::from_compact(bits).difficulty_float()
    }
}

/// Exact conversion of an integral `f64` of at least 2^53. `None` when the
/// value does not fit in 256 bits.
fn to_u256(value: f64) -> Option<U256> {
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i64 - 1075;
    let mantissa = (bits & ((1 << 52) - 1)) | (1 << 52);

    if exponent < 0 || exponent + 53 > 256 {
        return None;
    }

    Some(U256::from(mantissa) << exponent as usize)
}

fn to_f64(value: U256) -> f64 {
    value
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * 18_446_744_073_709_551_616.0 + *limb as f64)
}

impl PartialOrd for Difficulty {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl FromStr for Difficulty {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let difficulty = s.parse::<f64>().map_err(|e| InternalError::Parse {
            message: format!("invalid difficulty '{s}': {e}"),
        })?;

        Self::new(difficulty)
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as u64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 {
            ser.serialize_u64(self.0 as u64)
        } else {
            ser.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Int(u64),
            Float(f64),
            Str(String),
        }

        match Wire::deserialize(de)? {
            Wire::Int(n) => Self::new(n as f64),
            Wire::Float(x) => Self::new(x),
            Wire::Str(s) => s.parse(),
        }
        .map_err(de::Error::custom)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(1.0)
    }
}
