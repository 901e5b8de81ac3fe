//! SPV Merkle path verification.

use bitcoin::hashes::{sha256d, Hash};

use crate::Hash256;

/// Bitcoin's `hash256`: SHA256 applied twice.
#[must_use]
pub fn hash256(data: &[u8]) -> Hash256 {
    sha256d::Hash::hash(data).to_byte_array()
}

/// Hashes the concatenation of two digests.
#[must_use]
pub(crate) fn hash256_pair(left: &[u8], right: &[u8]) -> Hash256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left);
    buf[32..].copy_from_slice(right);
    hash256(&buf)
}

/// Evaluates a Bitcoin Merkle inclusion proof.
///
/// * `txid`: the transaction id in internal byte order.
/// * `merkle_root`: the root committed to by the block header, internal byte order.
/// * `intermediate_nodes`: sibling digests from the leaf level upwards, concatenated.
/// * `index`: the leaf position; bit `i` tells whether the running hash is a right child at level `i`.
///
/// A block with a single transaction has `txid == merkle_root` and an empty path. An `index` with
/// bits set above the path depth is rejected, otherwise `index + 2^depth` would prove the same leaf.
#[must_use]
pub fn prove(txid: &Hash256, merkle_root: &Hash256, intermediate_nodes: &[u8], index: u64) -> bool {
    if txid == merkle_root && index == 0 && intermediate_nodes.is_empty() {
        return true;
    }

    let depth = intermediate_nodes.len() / 32;
    if u32::try_from(depth)
        .ok()
        .and_then(|depth| index.checked_shr(depth))
        .is_some_and(|high| high != 0)
    {
        return false;
    }

    let mut proof = Vec::with_capacity(intermediate_nodes.len() + 64);
    proof.extend_from_slice(txid);
    proof.extend_from_slice(intermediate_nodes);
    proof.extend_from_slice(merkle_root);

    verify_hash256_merkle(&proof, index)
}

/// Verifies a `leaf || siblings... || root` buffer.
///
/// A 32 byte buffer is accepted as is: callers must have placed the leaf themselves, which
/// [`prove`] does. An empty or 64 byte buffer is rejected, the latter since it cannot tell a
/// sibling from the root.
#[must_use]
pub fn verify_hash256_merkle(proof: &[u8], mut index: u64) -> bool {
    let len = proof.len();
    if len % 32 != 0 {
        return false;
    }
    if len == 32 {
        return true;
    }
    if len < 96 {
        return false;
    }

    let root = &proof[len - 32..];
    let mut current: Hash256 = [0u8; 32];
    current.copy_from_slice(&proof[..32]);

    for next in proof[32..len - 32].chunks_exact(32) {
        current = if index & 1 == 1 {
            hash256_pair(next, &current)
        } else {
            hash256_pair(&current, next)
        };
        index >>= 1;
    }

    current == root
}
