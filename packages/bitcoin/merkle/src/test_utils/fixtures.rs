//! Synthetic transactions and blocks with consistent Merkle commitments.

use bitcoin::{
    absolute::LockTime,
    block::{self, Header},
    hashes::Hash,
    transaction::Version,
    Amount, Block, BlockHash, CompactTarget, OutPoint, ScriptBuf, Sequence, Transaction, TxIn,
    TxMerkleNode, TxOut, Witness,
};

/// A small transaction whose txid is unique per `seed`.
#[must_use]
pub fn transaction(seed: u32) -> Transaction {
    Transaction {
        version: Version::ONE,
        lock_time: LockTime::from_consensus(seed),
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig: ScriptBuf::from_bytes(seed.to_le_bytes().to_vec()),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        output: vec![TxOut {
            value: Amount::from_sat(u64::from(seed) * 1_000),
            script_pubkey: ScriptBuf::new(),
        }],
    }
}

/// A block of `tx_count` transactions on top of `prev_blockhash`, with its Merkle root filled in.
///
/// # Panics
/// Panics if `tx_count` is zero.
#[must_use]
pub fn block(tx_count: u32, prev_blockhash: BlockHash, time: u32) -> Block {
    let mut block = Block {
        header: Header {
            version: block::Version::ONE,
            prev_blockhash,
            merkle_root: TxMerkleNode::all_zeros(),
            time,
            bits: CompactTarget::from_consensus(0x1d00_ffff),
            nonce: 0,
        },
        txdata: (0..tx_count).map(|i| transaction(time ^ i)).collect(),
    };
    block.header.merkle_root = block
        .compute_merkle_root()
        .expect("block has transactions");
    block
}

/// Main-net block 170, holding the first person-to-person transaction.
pub mod block_170 {
    use std::str::FromStr;

    use bitcoin::{
        block::Header, consensus::encode::deserialize_hex, hashes::Hash, BlockHash, Transaction,
        Txid,
    };

    use crate::Hash256;

    /// Height of the block.
    pub const HEIGHT: u64 = 170;

    /// The 80 byte header.
    pub const HEADER: &str = "0100000055bd840a78798ad0da853f68974f3d183e2bd1db6a842c1feecf222a00000000ff104ccb05421ab93e63f8c3ce5c2c2e9dbb37de2764b3a3175c8166562cac7d51b96a49ffff001d283e9e70";

    /// The block hash, as shown by block explorers.
    pub const BLOCK_HASH: &str = "00000000d1145790a8694403d4063f323d499e655c83426834d4ce2f8dd4a2ee";

    /// Txid of the coinbase at position 0.
    pub const COINBASE_TXID: &str =
        "b1fea52486ce0c62bb442b530a3f0132b826c74e473d1f2c220bfa78111c5082";

    /// The raw transaction at position 1.
    pub const TX: &str = "0100000001c997a5e56e104102fa209c6a852dd90660a20b2d9c352423edce25857fcd3704000000004847304402204e45e16932b8af514961a1d3a1a25fdf3f4f7732e9d624c6c61548ab5fb8cd410220181522ec8eca07de4860a4acdd12909d831cc56cbbac4622082221a8768d1d0901ffffffff0200ca9a3b00000000434104ae1a62fe09c5f51b13905f07f06b99a2f7159b2225f374cd378d71302fa28414e7aab37397f554a7df5f142c21c1b7303b8a0626f1baded5c72a704f7e6cd84cac00286bee0000000043410411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3ac00000000";

    /// Txid of [`TX`].
    pub const TXID: &str = "f4184fc596403b9d638783cf57adfe4c75c605f6356fbc91338530e9831e9e16";

    /// Position of [`TX`] in the block.
    pub const TX_INDEX: u64 = 1;

    /// The decoded header.
    /// # Panics
    /// Never, the constant is a valid header.
    #[must_use]
    pub fn header() -> Header {
        deserialize_hex(HEADER).expect("valid header")
    }

    /// The block hash.
    /// # Panics
    /// Never, the constant is a valid hash.
    #[must_use]
    pub fn block_hash() -> BlockHash {
        BlockHash::from_str(BLOCK_HASH).expect("valid block hash")
    }

    /// The decoded transaction at position 1.
    /// # Panics
    /// Never, the constant is a valid transaction.
    #[must_use]
    pub fn transaction() -> Transaction {
        deserialize_hex(TX).expect("valid transaction")
    }

    /// The Merkle path for [`TX`]: its only sibling is the coinbase, in internal byte order.
    /// # Panics
    /// Never, the constant is a valid txid.
    #[must_use]
    pub fn path() -> Hash256 {
        Txid::from_str(COINBASE_TXID)
            .expect("valid txid")
            .to_byte_array()
    }
}
