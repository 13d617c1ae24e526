use super::*;

/// Block version as eight hex digits, the way `mining.notify` carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr, SerializeDisplay)]
pub struct Version(pub block::Version);

impl Version {
    pub fn to_consensus(self) -> i32 {
        self.0.to_consensus()
    }
}

impl From<i32> for Version {
    fn from(version: i32) -> Self {
        Self(block::Version::from_consensus(version))
    }
}

impl From<Version> for block::Version {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl FromStr for Version {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = u32::from_str_radix(s, 16).map_err(|e| InternalError::Parse {
            message: format!("invalid version '{s}': {e}"),
        })?;

        Ok(Self(block::Version::from_consensus(value as i32)))
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0.to_consensus() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_eight_hex_digits() {
        assert_eq!(Version(block::Version::TWO).to_string(), "00000002");
        assert_eq!(Version::from(0x2000_0000).to_string(), "20000000");
    }

    #[test]
    fn parses_wire_form() {
        assert_eq!("00000002".parse::<Version>().unwrap(), Version::from(2));
        assert_eq!(
            "ffffffff".parse::<Version>().unwrap().to_consensus(),
            -1
        );
        assert!("0x02".parse::<Version>().is_err());
    }
}
