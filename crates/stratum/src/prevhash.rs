use super::*;

/// Previous block hash in stratum's word-swapped form: the hash in internal
/// byte order with each 4-byte word reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct PrevHash(BlockHash);

impl PrevHash {
    pub fn to_block_hash(self) -> BlockHash {
        self.0
    }
}

impl From<BlockHash> for PrevHash {
    fn from(hash: BlockHash) -> Self {
        Self(hash)
    }
}

impl From<PrevHash> for BlockHash {
    fn from(prevhash: PrevHash) -> Self {
        prevhash.0
    }
}

fn swap_words(bytes: [u8; 32]) -> [u8; 32] {
    let mut swapped = [0u8; 32];
    for (src, dst) in bytes.chunks_exact(4).zip(swapped.chunks_exact_mut(4)) {
        BigEndian::write_u32(dst, LittleEndian::read_u32(src));
    }
    swapped
}

impl FromStr for PrevHash {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wire = <[u8; 32]>::from_hex(s).map_err(|e| InternalError::Parse {
            message: format!("invalid prevhash '{s}': {e}"),
        })?;

        Ok(Self(BlockHash::from_byte_array(swap_words(wire))))
    }
}

impl Display for PrevHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(swap_words(self.0.to_byte_array())))
    }
}
