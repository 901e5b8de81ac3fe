//! Building transaction/receipt tries and generating inclusion proofs from them.

use alloy_primitives::{keccak256, B256};
use alloy_trie::{proof::ProofRetainer, HashBuilder, Nibbles};
use lightclient_utils::ensure;

use crate::{
    error::TrieDBError,
    node_store::ProofNodeStore,
    proof::TrieProof,
    types::{index_key, insertion_order, DerivableList},
};

/// A trie committing to an ordered list, keyed by RLP encoded index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie {
    /// `(key, value)` pairs in ascending key order.
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    root: B256,
}

/// Commits every item of `list` into a trie.
///
/// Items are inserted in [`insertion_order`], which is what makes the root equal to the one an
/// Ethereum block header commits to. Inserting sequentially yields an unrelated root.
pub fn build_trie<L: DerivableList + ?Sized>(list: &L) -> Trie {
    let entries: Vec<(Vec<u8>, Vec<u8>)> = insertion_order(list.len())
        .map(|index| {
            let mut value = Vec::new();
            list.encode_index(index, &mut value);
            (index_key(index as u64), value)
        })
        .collect();

    let root = hash_builder(&entries, None).root();

    Trie { entries, root }
}

fn hash_builder(entries: &[(Vec<u8>, Vec<u8>)], retainer: Option<ProofRetainer>) -> HashBuilder {
    let mut builder = HashBuilder::default();
    if let Some(retainer) = retainer {
        builder = builder.with_proof_retainer(retainer);
    }
    for (key, value) in entries {
        builder.add_leaf(Nibbles::unpack(key), value);
    }
    builder
}

impl Trie {
    /// The root hash of the trie.
    #[must_use]
    pub const fn root(&self) -> B256 {
        self.root
    }

    /// Number of committed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the trie commits to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records the nodes on the path from the root to the item at `index`.
    ///
    /// Every node is stored under its keccak hash, the root included.
    /// # Errors
    /// Returns an error if `index` is negative or past the end of the list.
    pub fn generate_proof(&self, index: i64) -> Result<TrieProof, TrieDBError> {
        let index = u64::try_from(index).map_err(|_| TrieDBError::NegativeIndex(index))?;
        let key = index_key(index);
        ensure!(
            self.entries.iter().any(|(k, _)| *k == key),
            TrieDBError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            }
        );

        let retainer = ProofRetainer::new(vec![Nibbles::unpack(&key)]);
        let mut builder = hash_builder(&self.entries, Some(retainer));
        let root = builder.root();
        debug_assert_eq!(self.root, root);

        let mut nodes = ProofNodeStore::new();
        for (_, node) in builder.take_proof_nodes().into_nodes_sorted() {
            nodes.put(keccak256(&node).as_slice(), &node);
        }

        Ok(TrieProof::new(nodes))
    }
}

#[cfg(test)]
mod test {
    use alloy_consensus::TxEnvelope;
    use alloy_eips::eip2718::Encodable2718;
    use alloy_primitives::{keccak256, B256};
    use alloy_trie::{root::ordered_trie_root_with_encoder, HashBuilder, Nibbles, EMPTY_ROOT_HASH};
    use rstest::rstest;

    use super::build_trie;
    use crate::{
        error::TrieDBError,
        test_utils::fixtures::{block_46147, encoded, receipts, transactions},
        types::index_key,
    };

    #[rstest]
    fn test_root_matches_header_commitment(#[values(1, 2, 3, 16, 17, 127, 128, 129, 130)] count: u64) {
        let txs = transactions(count);
        let expected_tx_root = ordered_trie_root_with_encoder(&txs, |tx, buf| tx.encode_2718(buf));
        assert_eq!(expected_tx_root, build_trie(&txs).root());

        let receipts = receipts(count);
        let expected_receipt_root =
            ordered_trie_root_with_encoder(&receipts, |r, buf| r.encode_2718(buf));
        assert_eq!(expected_receipt_root, build_trie(&receipts).root());
    }

    #[test]
    fn test_sequential_insertion_gives_different_root() {
        let txs = transactions(3);
        let trie = build_trie(&txs);

        // pair the sorted keys with the items in list order: index 0 lands under key 0x01
        let mut keys: Vec<Vec<u8>> = (0..3u64).map(index_key).collect();
        keys.sort();
        let mut builder = HashBuilder::default();
        for (key, tx) in keys.iter().zip(&txs) {
            builder.add_leaf(Nibbles::unpack(key), &encoded(tx));
        }

        assert_ne!(trie.root(), builder.root());
    }

    #[test]
    fn test_empty_list() {
        let trie = build_trie(&Vec::<TxEnvelope>::new());
        assert!(trie.is_empty());
        assert_eq!(EMPTY_ROOT_HASH, trie.root());
        assert_eq!(
            Err(TrieDBError::IndexOutOfRange { index: 0, len: 0 }),
            trie.generate_proof(0)
        );
    }

    #[test]
    fn test_proof_round_trip_transactions_and_receipts() {
        let txs = transactions(130);
        let receipts = receipts(130);
        let tx_trie = build_trie(&txs);
        let receipt_trie = build_trie(&receipts);

        for i in 0..130 {
            let index = i64::try_from(i).unwrap();

            let tx_proof = tx_trie.generate_proof(index).unwrap();
            assert_eq!(encoded(&txs[i]), tx_proof.verify(tx_trie.root(), index).unwrap());

            let receipt_proof = receipt_trie.generate_proof(index).unwrap();
            assert_eq!(
                encoded(&receipts[i]),
                receipt_proof.verify(receipt_trie.root(), index).unwrap()
            );

            // a receipt proof says nothing about the transactions root
            assert!(receipt_proof.verify(tx_trie.root(), index).is_err());
        }
    }

    #[test]
    fn test_proof_for_other_index_fails() {
        let txs = transactions(20);
        let trie = build_trie(&txs);
        let proof = trie.generate_proof(3).unwrap();

        // the leaf for index 4 is stored by hash and is not part of the proof
        let err = proof.verify(trie.root(), 4).unwrap_err();
        assert!(matches!(err, TrieDBError::MissingNode { .. }), "{err}");
    }

    #[test]
    fn test_mainnet_block_transactions_root() {
        let txs = block_46147::transactions();
        let trie = build_trie(&txs);
        assert_eq!(block_46147::TRANSACTIONS_ROOT, trie.root());

        let proof = trie.generate_proof(0).unwrap();
        let value = proof.verify(block_46147::TRANSACTIONS_ROOT, 0).unwrap();
        assert_eq!(encoded(&txs[0]), value);
        assert_eq!(block_46147::TX_HASH, keccak256(&value));
    }

    #[test]
    fn test_negative_index() {
        let txs = transactions(4);
        let trie = build_trie(&txs);
        assert_eq!(
            Err(TrieDBError::NegativeIndex(-1)),
            trie.generate_proof(-1)
        );

        let proof = trie.generate_proof(0).unwrap();
        assert_eq!(
            Err(TrieDBError::NegativeIndex(-1)),
            proof.verify(trie.root(), -1)
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let trie = build_trie(&transactions(4));
        assert_eq!(
            Err(TrieDBError::IndexOutOfRange { index: 4, len: 4 }),
            trie.generate_proof(4)
        );
    }

    #[test]
    fn test_wrong_root() {
        let trie = build_trie(&transactions(8));
        let proof = trie.generate_proof(2).unwrap();

        let wrong_root = B256::repeat_byte(0xaa);
        assert_eq!(
            Err(TrieDBError::MissingNode { hash: wrong_root }),
            proof.verify(wrong_root, 2)
        );
    }
}
