//! Building Bitcoin Merkle trees and inclusion paths.

use bitcoin::{hashes::Hash, Transaction};
use lightclient_utils::ensure;

use crate::{error::BitcoinMerkleError, verify::hash256_pair, Hash256};

/// A block's Merkle tree stored as a flattened array.
///
/// The first `width` slots hold the leaves (padded with `None` up to the next power of two),
/// followed by each parent level in turn; the root is the last slot. A parent whose right child
/// is absent commits to its left child twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    nodes: Vec<Option<Hash256>>,
}

impl MerkleTree {
    /// Builds the tree over the txids of a block's transactions, in block order.
    /// # Errors
    /// Returns an error if `transactions` is empty.
    pub fn from_transactions(transactions: &[Transaction]) -> Result<Self, BitcoinMerkleError> {
        Self::from_leaves(
            transactions
                .iter()
                .map(|tx| tx.compute_txid().to_byte_array())
                .collect(),
        )
    }

    /// Builds the tree over already hashed leaves.
    /// # Errors
    /// Returns an error if `leaves` is empty.
    pub fn from_leaves(leaves: Vec<Hash256>) -> Result<Self, BitcoinMerkleError> {
        ensure!(!leaves.is_empty(), BitcoinMerkleError::NoTransactions);

        let width = leaves.len().next_power_of_two();
        let mut nodes = vec![None; width * 2 - 1];
        for (slot, leaf) in nodes.iter_mut().zip(leaves) {
            *slot = Some(leaf);
        }

        let mut offset = width;
        for child in (0..nodes.len() - 1).step_by(2) {
            nodes[offset] = match (nodes[child], nodes[child + 1]) {
                (None, _) => None,
                (Some(left), None) => Some(hash256_pair(&left, &left)),
                (Some(left), Some(right)) => Some(hash256_pair(&left, &right)),
            };
            offset += 1;
        }

        Ok(Self { nodes })
    }

    /// The Merkle root, as committed to by the block header.
    #[must_use]
    pub fn root(&self) -> Option<Hash256> {
        self.nodes.last().copied().flatten()
    }

    /// Number of populated leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        let width = (self.nodes.len() + 1) / 2;
        self.nodes[..width].iter().take_while(|n| n.is_some()).count()
    }

    /// Emits the inclusion path for the leaf at `tx_index`.
    ///
    /// Returns the sibling digests from the leaf level upwards, concatenated, and the index to
    /// hand to [`crate::prove`] alongside them.
    /// # Errors
    /// Returns an error if the tree is malformed or `tx_index` is not a populated leaf.
    pub fn build_proof(&self, tx_index: usize) -> Result<(Vec<u8>, u64), BitcoinMerkleError> {
        ensure!(!self.nodes.is_empty(), BitcoinMerkleError::EmptyTree);

        let size = self.nodes.len() + 1;
        ensure!(
            size.is_power_of_two(),
            BitcoinMerkleError::IncompleteTree {
                len: self.nodes.len()
            }
        );

        let width = size / 2;
        ensure!(
            tx_index < width && self.nodes[tx_index].is_some(),
            BitcoinMerkleError::InvalidTxIndex {
                index: tx_index,
                leaf_count: self.leaf_count(),
            }
        );

        let mut path = Vec::with_capacity(32 * width.trailing_zeros() as usize);
        let mut level_offset = 0;
        let mut level_width = width;
        let mut position = tx_index;

        while level_width > 1 {
            let node = level_offset + position;
            let sibling = if position % 2 == 1 {
                self.nodes[node - 1]
            } else {
                // no right sibling: the node was paired with itself
                self.nodes[node + 1].or(self.nodes[node])
            };
            let sibling = sibling.ok_or(BitcoinMerkleError::MissingNode(node))?;
            path.extend_from_slice(&sibling);

            level_offset += level_width;
            level_width /= 2;
            position /= 2;
        }

        Ok((path, tx_index as u64))
    }
}

#[cfg(test)]
mod test {
    use bitcoin::{hashes::Hash, merkle_tree, Transaction, TxMerkleNode};
    use rstest::rstest;

    use super::MerkleTree;
    use crate::{
        error::BitcoinMerkleError, prove, test_utils::fixtures::transaction, verify::hash256,
        Hash256,
    };

    fn leaves(count: usize) -> Vec<Hash256> {
        (0..count)
            .map(|i| hash256(format!("tx-{i}").as_bytes()))
            .collect()
    }

    fn reference_root(leaves: &[Hash256]) -> Hash256 {
        merkle_tree::calculate_root(leaves.iter().map(|l| TxMerkleNode::from_byte_array(*l)))
            .unwrap()
            .to_byte_array()
    }

    #[rstest]
    fn test_round_trip_every_leaf(
        #[values(1, 2, 3, 4, 5, 7, 8, 9, 13, 16, 17, 31, 64, 100)] count: usize,
    ) {
        let leaves = leaves(count);
        let tree = MerkleTree::from_leaves(leaves.clone()).unwrap();
        let root = tree.root().unwrap();

        assert_eq!(reference_root(&leaves), root);
        assert_eq!(count, tree.leaf_count());

        for (i, leaf) in leaves.iter().enumerate() {
            let (path, index) = tree.build_proof(i).unwrap();
            assert_eq!(i as u64, index);
            assert!(prove(leaf, &root, &path, index), "leaf {i} of {count}");
            if count > 1 {
                assert!(!prove(leaf, &root, &path, index ^ 0xffff_ffff), "leaf {i} of {count}");
            }
        }
    }

    #[test]
    fn test_from_transactions_matches_block_commitment() {
        let txs: Vec<Transaction> = (0..6).map(transaction).collect();
        let tree = MerkleTree::from_transactions(&txs).unwrap();

        let expected = merkle_tree::calculate_root(
            txs.iter()
                .map(|tx| TxMerkleNode::from_raw_hash(tx.compute_txid().to_raw_hash())),
        )
        .unwrap()
        .to_byte_array();
        assert_eq!(Some(expected), tree.root());

        let (path, index) = tree.build_proof(5).unwrap();
        let txid = txs[5].compute_txid().to_byte_array();
        assert!(prove(&txid, &expected, &path, index));
    }

    #[test]
    fn test_single_leaf_has_empty_path() {
        let leaf = hash256(b"coinbase");
        let tree = MerkleTree::from_leaves(vec![leaf]).unwrap();

        assert_eq!(Some(leaf), tree.root());
        let (path, index) = tree.build_proof(0).unwrap();
        assert!(path.is_empty());
        assert_eq!(0, index);
        assert!(prove(&leaf, &leaf, &path, index));
    }

    #[test]
    fn test_empty_block_rejected() {
        assert_eq!(
            Err(BitcoinMerkleError::NoTransactions),
            MerkleTree::from_leaves(vec![])
        );
        assert_eq!(
            Err(BitcoinMerkleError::NoTransactions),
            MerkleTree::from_transactions(&[])
        );
    }

    #[rstest]
    #[case(5, 5)]
    #[case(5, 7)]
    #[case(5, 8)]
    #[case(1, 1)]
    fn test_build_proof_rejects_out_of_range_index(#[case] count: usize, #[case] index: usize) {
        let tree = MerkleTree::from_leaves(leaves(count)).unwrap();
        assert_eq!(
            Err(BitcoinMerkleError::InvalidTxIndex {
                index,
                leaf_count: count
            }),
            tree.build_proof(index)
        );
    }

    #[test]
    fn test_build_proof_rejects_malformed_tree() {
        let empty = MerkleTree { nodes: vec![] };
        assert_eq!(Err(BitcoinMerkleError::EmptyTree), empty.build_proof(0));

        let truncated = MerkleTree {
            nodes: vec![Some([1; 32]), Some([2; 32])],
        };
        assert_eq!(
            Err(BitcoinMerkleError::IncompleteTree { len: 2 }),
            truncated.build_proof(0)
        );
    }
}
