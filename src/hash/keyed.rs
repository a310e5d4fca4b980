use crate::adrs::{Adrs, KeyAndMask};
use crate::hash::sha256::{Sha256, SHA256_BLOCK_BYTES};
use crate::hash::Node;
use crate::params::XMSS_N;

/// Domain-separation prefixes: `toByte(x, 32)` in front of every hash input.
const PREFIX_F: u32 = 0;
const PREFIX_H: u32 = 1;
const PREFIX_HASH_MSG: u32 = 2;
const PREFIX_PRF: u32 = 3;

/// Byte size of the H_msg prefix: toByte(2, 32) || r || root || toByte(idx, 32).
const H_MSG_PREFIX_BYTES: usize = 4 * XMSS_N;

/// Keyed hash functions of XMSS-SHA2_20_256, holding the seed context shared by every PRF call.
///
/// `toByte(3, 32) || SEED` is exactly one SHA-256 block, so it is absorbed once here and each
/// PRF call only clones the context and finalizes it with the 32-byte address.
#[derive(Clone, Debug)]
pub struct XmssHasher {
    seed_ctx: Sha256,
}

impl XmssHasher {
    pub fn new(seed: &[u8; XMSS_N]) -> Self {
        let mut block = [0u8; SHA256_BLOCK_BYTES];
        block[..XMSS_N].copy_from_slice(&prefix_bytes(PREFIX_PRF));
        block[XMSS_N..].copy_from_slice(seed);
        let mut seed_ctx = Sha256::new();
        seed_ctx.update(&block);

        Self { seed_ctx }
    }

    /// PRF(SEED, ADRS) = SHA-256(toByte(3, 32) || SEED || ADRS)
    pub fn prf(&self, adrs: &Adrs) -> Node {
        self.seed_ctx.clone().finalize_le_words(adrs.words())
    }

    /// F(KEY, M) = SHA-256(toByte(0, 32) || KEY || M)
    pub fn f_func(key: &Node, x: &Node) -> Node {
        let mut block = [0u32; 16];
        block[7] = PREFIX_F;
        block[8..].copy_from_slice(key);
        let mut ctx = Sha256::new();
        ctx.update1_le(&block);
        ctx.finalize_le_words(x)
    }

    /// H(KEY, M) = SHA-256(toByte(1, 32) || KEY || LEFT || RIGHT)
    pub fn h(key: &Node, left: &Node, right: &Node) -> Node {
        let mut block = [0u32; 16];
        block[7] = PREFIX_H;
        block[8..].copy_from_slice(key);
        let mut ctx = Sha256::new();
        ctx.update1_le(&block);

        block[..8].copy_from_slice(left);
        block[8..].copy_from_slice(right);
        ctx.update1_le(&block);
        ctx.finalize_le(&[])
    }

    /// Computes the randomized message digest.
    ///
    /// H_msg(r || root || toByte(idx, 32), M) = SHA-256(toByte(2, 32) || r || root || toByte(idx, 32) || M)
    ///
    /// The prefix is two whole blocks, so `message` is streamed block by block and only its
    /// tail is padded.
    pub fn h_msg(r: &[u8; XMSS_N], root: &[u8; XMSS_N], idx: u32, message: &[u8]) -> [u8; XMSS_N] {
        let mut prefix = [0u8; H_MSG_PREFIX_BYTES];
        prefix[..XMSS_N].copy_from_slice(&prefix_bytes(PREFIX_HASH_MSG));
        prefix[XMSS_N..2 * XMSS_N].copy_from_slice(r);
        prefix[2 * XMSS_N..3 * XMSS_N].copy_from_slice(root);
        prefix[H_MSG_PREFIX_BYTES - 4..].copy_from_slice(&idx.to_be_bytes());

        let mut ctx = Sha256::new();
        ctx.update(&prefix);
        ctx.absorb_and_finalize(message)
    }

    /// Combines two nodes (RFC 8391 `RAND_HASH`).
    ///
    /// Derives a key and two bitmasks from the address with key-and-mask set to 0, 1 and 2, masks
    /// both inputs and hashes them with [`XmssHasher::h`]. The caller sets type, context, level
    /// and level index; the key-and-mask word is left at 2.
    pub fn hash2(&self, left: &Node, right: &Node, adrs: &mut Adrs) -> Node {
        adrs.set_key_and_mask(KeyAndMask::Key);
        let key = self.prf(adrs);
        adrs.set_key_and_mask(KeyAndMask::Mask);
        let mask_left = self.prf(adrs);
        adrs.set_key_and_mask(KeyAndMask::MaskRight);
        let mask_right = self.prf(adrs);

        Self::h(&key, &xor(left, &mask_left), &xor(right, &mask_right))
    }
}

pub(crate) fn xor(a: &Node, b: &Node) -> Node {
    core::array::from_fn(|i| a[i] ^ b[i])
}

fn prefix_bytes(value: u32) -> [u8; XMSS_N] {
    let mut out = [0u8; XMSS_N];
    out[XMSS_N - 4..].copy_from_slice(&value.to_be_bytes());
    out
}
