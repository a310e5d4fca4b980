//! # Winternitz One-Time Signature Plus (W-OTS+), verification side
//!
//! This module recovers a W-OTS+ public key from a one-time signature and the digest it signs,
//! following the XMSS definition of W-OTS+ in RFC 8391 with w = 16 and n = 32.
//!
//! A signature holds one intermediate value per chain. The digest is expanded into 64 base-16
//! digits plus a 3-digit checksum; digit `d` says the signer revealed the value after `d` steps.
//! Verification completes each chain up to step 15. Every step derives a fresh key and bitmask
//! from the public seed and the chain's [`Adrs`], so the address must name the leaf, the chain
//! and the step for the result to match the key the signer committed to.

use crate::adrs::{Adrs, AdrsType, KeyAndMask};
use crate::hash::sha256::bytes_to_words;
use crate::hash::{xor, Node, XmssHasher};
use crate::params::{
    XMSS_N, XMSS_WOTS_LEN, XMSS_WOTS_LEN1, XMSS_WOTS_LEN2, XMSS_WOTS_LOGW, XMSS_WOTS_W,
};

/// Index of the last value of a chain, i.e. the public-key end.
const CHAIN_END: u32 = (XMSS_WOTS_W - 1) as u32;

/// Expands a message digest into the chain lengths of a W-OTS+ signature: 64 base-16 digits of
/// the digest followed by the 3 digits of its checksum.
pub fn expand_msg(msg: &[u8; XMSS_N]) -> [u8; XMSS_WOTS_LEN] {
    let mut digits = [0u8; XMSS_WOTS_LEN];
    base_w(&mut digits[..XMSS_WOTS_LEN1], msg);
    let csum = wots_checksum(&digits[..XMSS_WOTS_LEN1]);

    // Make sure expected empty zero bits are the least significant bits.
    let shift = (8 - ((XMSS_WOTS_LEN2 * XMSS_WOTS_LOGW) % 8)) % 8;
    let csum_bytes = ((csum << shift) as u16).to_be_bytes();
    base_w(&mut digits[XMSS_WOTS_LEN1..], &csum_bytes);

    digits
}

/// Converts bytes into base-w digits, most significant nibble first.
fn base_w(output: &mut [u8], input: &[u8]) {
    let mut bits = 0;
    let mut total: u8 = 0;
    let mut input_index = 0;

    for out in output.iter_mut() {
        if bits == 0 {
            total = input[input_index];
            input_index += 1;
            bits += 8;
        }

        bits -= XMSS_WOTS_LOGW;
        *out = (total >> bits) & ((XMSS_WOTS_W - 1) as u8);
    }
}

/// Sum of the distances from each message digit to the end of its chain.
fn wots_checksum(msg_base_w: &[u8]) -> u32 {
    msg_base_w
        .iter()
        .map(|&digit| CHAIN_END - u32::from(digit))
        .sum()
}

/// Advances `value` from position `start` of a chain by `steps` steps, never past the chain end.
///
/// `adrs` must hold the OTS type, the leaf and the chain; the step position and key-and-mask
/// words are set here.
pub(crate) fn gen_chain(
    hasher: &XmssHasher,
    adrs: &mut Adrs,
    mut value: Node,
    start: u32,
    steps: u32,
) -> Node {
    let end = start.saturating_add(steps).min(CHAIN_END);
    for step in start..end {
        adrs.set_level_idx(step);
        adrs.set_key_and_mask(KeyAndMask::Key);
        let key = hasher.prf(adrs);
        adrs.set_key_and_mask(KeyAndMask::Mask);
        let mask = hasher.prf(adrs);
        value = XmssHasher::f_func(&key, &xor(&value, &mask));
    }
    value
}

/// Completes a chain from position `start` to its end. With `start == 15` no step runs and
/// `value` comes back unchanged.
pub fn chain_w(hasher: &XmssHasher, adrs: &mut Adrs, value: Node, start: u32) -> Node {
    gen_chain(hasher, adrs, value, start, CHAIN_END.saturating_sub(start))
}

/// Takes a W-OTS+ signature and the expanded digest, and computes the public key it implies,
/// one node per chain, into `pk`.
///
/// `adrs` must carry the leaf index as its context; the type is forced to OTS and the chain
/// index is set per node.
pub fn pk_from_sig(
    hasher: &XmssHasher,
    adrs: &mut Adrs,
    ots: &[[u8; XMSS_N]; XMSS_WOTS_LEN],
    digits: &[u8; XMSS_WOTS_LEN],
    pk: &mut [Node; XMSS_WOTS_LEN],
) {
    adrs.set_type(AdrsType::Ots);
    let chains = ots.iter().zip(digits.iter()).zip(pk.iter_mut());
    for (i, ((sig_node, &digit), pk_node)) in chains.enumerate() {
        adrs.set_level(i as u32);
        *pk_node = chain_w(hasher, adrs, bytes_to_words(sig_node), u32::from(digit));
    }
}
