use super::*;

/// A Merkle tree node in natural (internal) byte order. Stratum sends branch
/// hashes unreversed, unlike the display order `bitcoin` uses for
/// `TxMerkleNode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct MerkleNode([u8; 32]);

impl MerkleNode {
    pub fn from_byte_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_byte_array(self) -> [u8; 32] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parent of two nodes: double SHA-256 of their concatenation.
    pub fn join(left: &Self, right: &Self) -> Self {
        let mut concat = [0u8; 64];
        concat[..32].copy_from_slice(&left.0);
        concat[32..].copy_from_slice(&right.0);
        Self(sha256d::Hash::hash(&concat).to_byte_array())
    }
}

impl From<sha256d::Hash> for MerkleNode {
    fn from(hash: sha256d::Hash) -> Self {
        Self(hash.to_byte_array())
    }
}

impl From<MerkleNode> for TxMerkleNode {
    fn from(node: MerkleNode) -> Self {
        TxMerkleNode::from_byte_array(node.0)
    }
}

impl FromStr for MerkleNode {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <[u8; 32]>::from_hex(s)
            .map(MerkleNode)
            .map_err(|e| InternalError::Parse {
                message: format!("invalid merkle node '{s}': {e}"),
            })
    }
}

impl Display for MerkleNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Fold a coinbase hash up the branch list to the root.
pub fn merkle_root(coinbase_hash: MerkleNode, branches: &[MerkleNode]) -> MerkleNode {
    branches
        .iter()
        .fold(coinbase_hash, |node, branch| MerkleNode::join(&node, branch))
}
