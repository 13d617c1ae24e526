use super::*;

/// Block timestamp in seconds, eight hex digits on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct Ntime(u32);

impl Ntime {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Ntime {
    fn from(ntime: u32) -> Self {
        Self(ntime)
    }
}

impl From<Ntime> for u32 {
    fn from(ntime: Ntime) -> Self {
        ntime.0
    }
}

impl FromStr for Ntime {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 {
            return Err(InternalError::Parse {
                message: format!("ntime must be 8 hex digits, got '{s}'"),
            });
        }

        u32::from_str_radix(s, 16)
            .map(Self)
            .map_err(|e| InternalError::Parse {
                message: format!("invalid ntime '{s}': {e}"),
            })
    }
}

impl Display for Ntime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_roundtrip() {
        let ntime = "539ee666".parse::<Ntime>().unwrap();
        assert_eq!(ntime.get(), 1_402_922_598);
        assert_eq!(ntime.to_string(), "539ee666");
        assert_eq!(Ntime::from(1).to_string(), "00000001");
    }

    #[test]
    fn rejects_wrong_width() {
        assert!("539ee6".parse::<Ntime>().is_err());
        assert!("539ee66600".parse::<Ntime>().is_err());
        assert!("zzzzzzzz".parse::<Ntime>().is_err());
    }
}
