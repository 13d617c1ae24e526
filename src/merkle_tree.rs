use super::*;

/// Merkle data of a job: the template transaction hashes and the branch
/// needed to fold any coinbase hash up to the root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MerkleTree {
    leaves: Vec<MerkleNode>,
    steps: Vec<MerkleNode>,
}

impl MerkleTree {
    /// `hashes` are the non-coinbase leaves in block order. The coinbase slot
    /// is left open.
    pub fn new(hashes: Vec<MerkleNode>) -> Self {
        let steps = Self::calculate_steps(&hashes);
        Self {
            leaves: hashes,
            steps,
        }
    }

    fn calculate_steps(hashes: &[MerkleNode]) -> Vec<MerkleNode> {
        let mut steps = Vec::new();

        // Index 0 is the coinbase path, always unknown.
        let mut level = Vec::with_capacity(hashes.len() + 1);
        level.push(None);
        level.extend(hashes.iter().copied().map(Some));

        while level.len() > 1 {
            if let Some(Some(sibling)) = level.get(1) {
                steps.push(*sibling);
            }

            if level.len() % 2 == 1 {
                let last = level[level.len() - 1];
                level.push(last);
            }

            let mut next = Vec::with_capacity(level.len() / 2);
            next.push(None);

            for pair in level[2..].chunks_exact(2) {
                if let [Some(left), Some(right)] = pair {
                    next.push(Some(MerkleNode::join(left, right)));
                }
            }

            level = next;
        }

        steps
    }

    pub fn steps(&self) -> &[MerkleNode] {
        &self.steps
    }

    pub fn leaves(&self) -> &[MerkleNode] {
        &self.leaves
    }

    /// Root of the tree with `first` as the coinbase leaf.
    pub fn with_first(&self, first: MerkleNode) -> MerkleNode {
        merkle_root(first, &self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COINBASE: &str = "88425f4cdd911645c68280e20c3a39e54948a089d9055e66fd329a582e101d4b";

    fn txid_leaf(display: &str) -> MerkleNode {
        let txid = display.parse::<Txid>().unwrap();
        MerkleNode::from_byte_array(txid.to_byte_array())
    }

    fn leaves(count: usize) -> Vec<MerkleNode> {
        [
            "3a1b9e330d32fef1ee42f8e86420d2be978bbe0dc5862f17da9027cf9e11f8c4",
            "4c8d72ab9b8e5c6f2c5c5cfa9c1f35a2fd0cd5ddf5b2a9d57c86f4ca93d7d5e1",
            "8e1c2c0b6d9a53e2fc6f5b6b6b4ab7d1e9c3f1a4d2b1c5e6f7a8b9c0d1e2f3a4",
        ][..count]
            .iter()
            .map(|display| txid_leaf(display))
            .collect()
    }

    fn full_tree_root(mut level: Vec<MerkleNode>) -> MerkleNode {
        while level.len() > 1 {
            if level.len() % 2 == 1 {
                level.push(level[level.len() - 1]);
            }
            level = level
                .chunks_exact(2)
                .map(|pair| MerkleNode::join(&pair[0], &pair[1]))
                .collect();
        }
        level[0]
    }

    #[track_caller]
    fn case(count: usize, steps: &[&str], root: &str) {
        let tree = MerkleTree::new(leaves(count));

        assert_eq!(
            tree.steps()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<String>>(),
            steps
        );

        let coinbase = COINBASE.parse::<MerkleNode>().unwrap();
        let root_from_steps = tree.with_first(coinbase);
        assert_eq!(root_from_steps.to_string(), root);

        let mut all = vec![coinbase];
        all.extend(tree.leaves());
        assert_eq!(full_tree_root(all), root_from_steps);
    }

    #[test]
    fn coinbase_only() {
        case(0, &[], COINBASE);
    }

    #[test]
    fn one_transaction() {
        case(
            1,
            &["c4f8119ecf2790da172f86c50dbe8b97bed22064e8f842eef1fe320d339e1b3a"],
            "1ef744e9ee64a8cc20adddd52b63fbb246bdbf664ec5f3f5ea002a179e0e5ca6",
        );
    }

    #[test]
    fn two_transactions_duplicate_the_odd_leaf() {
        case(
            2,
            &[
                "c4f8119ecf2790da172f86c50dbe8b97bed22064e8f842eef1fe320d339e1b3a",
                "1bdf9318c9df0aded3b5292189448ab211d044a882f42cdf90a9110492c36dfa",
            ],
            "77a90200040fc715ce7b45ff0324ef51268c1f169320339aa1ba9638c838f7fe",
        );
    }

    #[test]
    fn three_transactions() {
        case(
            3,
            &[
                "c4f8119ecf2790da172f86c50dbe8b97bed22064e8f842eef1fe320d339e1b3a",
                "022f1759eeba2de4fa1c64d44948c826bffccc8321ae3748f562d1595843d44b",
            ],
            "3bf8ef71faeddd32f69c14123644d186ffdd471ba0660046e3945adcaa7d171b",
        );
    }

    #[test]
    fn branch_count_is_ceil_log2() {
        for count in 1..40usize {
            let tree = MerkleTree::new(
                (0..count)
                    .map(|i| MerkleNode::from_byte_array([i as u8; 32]))
                    .collect(),
            );

            let leaves = count + 1;
            let expected = leaves.next_power_of_two().trailing_zeros() as usize;

            assert_eq!(tree.steps().len(), expected, "{leaves} leaves");

            let coinbase = MerkleNode::from_byte_array([0xee; 32]);
            let mut all = vec![coinbase];
            all.extend(tree.leaves());
            assert_eq!(tree.with_first(coinbase), full_tree_root(all));
        }
    }
}
