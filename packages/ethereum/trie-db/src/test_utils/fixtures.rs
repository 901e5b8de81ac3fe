//! Deterministic transaction and receipt lists.

use alloy_consensus::{
    Eip658Value, Receipt, ReceiptEnvelope, ReceiptWithBloom, SignableTransaction, TxEip1559,
    TxEnvelope, TxLegacy,
};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{Address, Bloom, Bytes, Signature, TxKind, U256};

fn signature(seed: u64) -> Signature {
    Signature::new(U256::from(seed + 1), U256::from(seed + 2), seed % 2 == 0)
}

/// `count` signed transactions, mixing legacy and EIP-1559 envelopes.
#[must_use]
pub fn transactions(count: u64) -> Vec<TxEnvelope> {
    (0..count)
        .map(|nonce| {
            let to = TxKind::Call(Address::repeat_byte(0x11));
            if nonce % 3 == 0 {
                let tx = TxLegacy {
                    chain_id: Some(1),
                    nonce,
                    gas_price: 1_000_000_000,
                    gas_limit: 21_000,
                    to,
                    value: U256::from(nonce),
                    ..Default::default()
                };
                TxEnvelope::Legacy(tx.into_signed(signature(nonce)))
            } else {
                let tx = TxEip1559 {
                    chain_id: 1,
                    nonce,
                    gas_limit: 50_000,
                    max_fee_per_gas: 2_000_000_000,
                    max_priority_fee_per_gas: 1_000_000,
                    to,
                    value: U256::from(nonce),
                    input: Bytes::from(nonce.to_be_bytes().to_vec()),
                    ..Default::default()
                };
                TxEnvelope::Eip1559(tx.into_signed(signature(nonce)))
            }
        })
        .collect()
}

/// `count` receipts, mixing legacy and EIP-1559 envelopes.
#[must_use]
pub fn receipts(count: u64) -> Vec<ReceiptEnvelope> {
    (0..count)
        .map(|i| {
            let receipt = ReceiptWithBloom {
                receipt: Receipt {
                    status: Eip658Value::Eip658(i % 5 != 0),
                    cumulative_gas_used: 21_000 * (i + 1),
                    logs: vec![],
                },
                logs_bloom: Bloom::ZERO,
            };
            if i % 3 == 0 {
                ReceiptEnvelope::Legacy(receipt)
            } else {
                ReceiptEnvelope::Eip1559(receipt)
            }
        })
        .collect()
}

/// The EIP-2718 encoding of `item`, the value stored in the trie for it.
#[must_use]
pub fn encoded<T: Encodable2718>(item: &T) -> Vec<u8> {
    let mut buf = Vec::new();
    item.encode_2718(&mut buf);
    buf
}

/// Main-net block 46147, the first block with a transaction.
pub mod block_46147 {
    use alloy_consensus::TxEnvelope;
    use alloy_eips::eip2718::Decodable2718;
    use alloy_primitives::{b256, hex, B256};

    /// The block's `transactionsRoot`.
    pub const TRANSACTIONS_ROOT: B256 =
        b256!("4513310fcb9f6f616972a3b948dc5d547f280849a87ebb5af0191f98b87be598");

    /// Hash of its only transaction.
    pub const TX_HASH: B256 =
        b256!("5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060");

    /// The raw signed transaction.
    pub const RAW_TX: &str = "f86780862d79883d2000825208945df9b87991262f6ba471f09758cde1c0fc1de734827a69801ca088ff6cf0fefd94db46111149ae4bfc179e9b94721fffd821d38d16464b3f71d0a045e0aff800961cfce805daef7016b9b675c137a6a41a548f7b60a3484c06a33a";

    /// The block's transaction list.
    /// # Panics
    /// Never, the constant is a valid transaction.
    #[must_use]
    pub fn transactions() -> Vec<TxEnvelope> {
        let raw = hex::decode(RAW_TX).expect("valid hex");
        vec![TxEnvelope::decode_2718(&mut raw.as_slice()).expect("valid transaction")]
    }
}
