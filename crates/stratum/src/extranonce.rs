use super::*;

/// Extranonce bytes as carried on the wire: lowercase hex, most significant
/// byte first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct Extranonce(Vec<u8>);

impl Extranonce {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The value of a four byte extranonce, `None` for any other width.
    pub fn to_u32(&self) -> Option<u32> {
        (self.0.len() == 4).then(|| BigEndian::read_u32(&self.0))
    }
}

impl From<u32> for Extranonce {
    fn from(value: u32) -> Self {
        Self(value.to_be_bytes().to_vec())
    }
}

impl FromStr for Extranonce {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| InternalError::Parse {
            message: format!("invalid extranonce hex string '{s}': {e}"),
        })?;

        Ok(Self(bytes))
    }
}

impl Display for Extranonce {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}
