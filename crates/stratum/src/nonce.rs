use super::*;

/// Header nonce as submitted by the miner: eight hex digits, big-endian value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct Nonce(u32);

impl Nonce {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Nonce {
    fn from(nonce: u32) -> Self {
        Self(nonce)
    }
}

impl FromStr for Nonce {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 {
            return Err(InternalError::Parse {
                message: format!("nonce must be 8 hex digits, got '{s}'"),
            });
        }

        u32::from_str_radix(s, 16)
            .map(Self)
            .map_err(|e| InternalError::Parse {
                message: format!("invalid nonce '{s}': {e}"),
            })
    }
}

impl Display for Nonce {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_big_endian_hex() {
        assert_eq!("12345678".parse::<Nonce>().unwrap().get(), 0x1234_5678);
        assert_eq!(Nonce::from(0xff).to_string(), "000000ff");
        assert!("1234".parse::<Nonce>().is_err());
    }
}
