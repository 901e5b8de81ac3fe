//! Lists that can be committed to a trie, and the index keys they are committed under.

use alloy_eips::eip2718::Encodable2718;

/// An ordered list whose items are committed to a trie under their RLP encoded index.
///
/// Each item supplies its own binary encoding (EIP-2718 envelopes for transactions and receipts).
pub trait DerivableList {
    /// Number of items in the list.
    fn len(&self) -> usize;

    /// Whether the list is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends the encoding of the item at `index` to `out`.
    ///
    /// `index` is always in range.
    fn encode_index(&self, index: usize, out: &mut Vec<u8>);
}

impl<T: Encodable2718> DerivableList for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn encode_index(&self, index: usize, out: &mut Vec<u8>) {
        self[index].encode_2718(out);
    }
}

impl<T: Encodable2718> DerivableList for Vec<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn encode_index(&self, index: usize, out: &mut Vec<u8>) {
        self.as_slice().encode_index(index, out);
    }
}

/// The trie key for a list index: its RLP encoding as a big-endian integer.
#[must_use]
pub fn index_key(index: u64) -> Vec<u8> {
    alloy_rlp::encode(index)
}

/// The order in which list indices are inserted into the trie.
///
/// `1..=min(len - 1, 0x7f)`, then `0`, then `0x80..len`. This is ascending order of the RLP
/// encoded keys (`0` encodes as `0x80`), which the hash builder requires.
pub fn insertion_order(len: usize) -> impl Iterator<Item = usize> {
    (1..len.min(0x80))
        .chain((len > 0).then_some(0))
        .chain(0x80..len)
}
