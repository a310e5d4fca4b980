//! # XMSS-SHA2_20_256 signature verification
//!
//! This module verifies XMSS signatures (RFC 8391) over an arbitrary message against a public
//! identity `root || seed`, without heap allocation. All working memory comes from a scratch
//! buffer of at least [`XMSS_WORKSPACE_BYTES`] bytes, supplied by the caller through
//! [`verify_with_scratch`] or placed on the stack by [`verify`].
//!
//! ## Verification steps
//!
//! 1. Validate inputs: scratch size and 4-byte alignment, signature alignment, public-key and
//!    signature lengths, and the leaf index bound. A failure here returns before any hashing.
//! 2. Compute the randomized digest `H_msg(r || root || idx, M)`.
//! 3. Expand it into 67 base-16 chain lengths.
//! 4. Complete the 67 W-OTS+ chains to recover the one-time public key.
//! 5. Compress that key with the L-tree into the leaf at `idx`.
//! 6. Climb the authentication path to a candidate root.
//! 7. Compare the candidate with the expected root.
//!
//! From step 2 on the outcome is either `Ok(())` or [`Error::BadSig`], in time that depends only
//! on the message length.
//!
//! ## Example
//!
//! ```rust
//! use xmss_verify::xmss::{verify, XmssPublicKey, XmssSignature};
//! use xmss_verify::params::{XMSS_PK_BYTES, XMSS_SIG_BYTES};
//! use xmss_verify::Error;
//!
//! let pk = XmssPublicKey::from([0u8; XMSS_PK_BYTES]);
//! let sig = XmssSignature::from([0u8; XMSS_SIG_BYTES]);
//!
//! // A zeroed signature is well-formed but does not verify.
//! assert_eq!(pk.verify(b"firmware image", &sig), Err(Error::BadSig));
//! assert_eq!(verify(pk.as_ref(), sig.as_ref(), b"firmware image"), Err(Error::BadSig));
//! ```
//!
//! ## Security notes
//!
//! The final root comparison is a plain byte comparison and is not constant time. Nothing in
//! verification is secret, so this only matters where the timing of rejecting a forged
//! signature must not leak how many leading root bytes matched.

use bytemuck::{Pod, Zeroable};

use crate::adrs::{Adrs, AdrsType};
use crate::error::{Error, ParamError, Result};
use crate::hash::sha256::words_to_bytes;
use crate::hash::XmssHasher;
use crate::params::{
    XMSS_IDX_BYTES, XMSS_MAX_LEAVES, XMSS_N, XMSS_PK_BYTES, XMSS_RFC_PK_BYTES,
    XMSS_SHA2_20_256_OID, XMSS_SIG_BYTES, XMSS_SIG_OFFSET_AUTH, XMSS_SIG_OFFSET_OTS,
    XMSS_SIG_OFFSET_R, XMSS_TREE_HEIGHT, XMSS_WORKSPACE_BYTES, XMSS_WOTS_LEN,
};
use crate::tree::{ltree_hash_ots, root_from_auth_path};
use crate::utils::{array_struct, is_word_aligned, Aligned};
use crate::workspace::Workspace;
use crate::wots_plus::{expand_msg, pk_from_sig};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serialization")]
use serde_big_array::BigArray;

/// A stack-allocatable scratch buffer of exactly the required size and alignment.
pub type ScratchSpace = Aligned<[u8; XMSS_WORKSPACE_BYTES]>;

/// The fields of an encoded signature: `idx || r || ots || auth_path`.
#[derive(Copy, Clone)]
#[repr(C)]
struct SignatureLayout {
    idx: [u8; XMSS_IDX_BYTES],
    r: [u8; XMSS_N],
    ots: [[u8; XMSS_N]; XMSS_WOTS_LEN],
    auth_path: [[u8; XMSS_N]; XMSS_TREE_HEIGHT],
}

const _: () = assert!(core::mem::size_of::<SignatureLayout>() == XMSS_SIG_BYTES);
const _: () = assert!(core::mem::offset_of!(SignatureLayout, r) == XMSS_SIG_OFFSET_R);
const _: () = assert!(core::mem::offset_of!(SignatureLayout, ots) == XMSS_SIG_OFFSET_OTS);
const _: () = assert!(core::mem::offset_of!(SignatureLayout, auth_path) == XMSS_SIG_OFFSET_AUTH);

// SAFETY: `SignatureLayout` is `repr(C)` over byte arrays only, so it has alignment 1 and no
// padding.
unsafe impl Zeroable for SignatureLayout {}
unsafe impl Pod for SignatureLayout {}

impl SignatureLayout {
    fn leaf_index(&self) -> u32 {
        u32::from_be_bytes(self.idx)
    }
}

fn log_rejection(e: &Error) {
    log::debug!("[XMSS] rejecting malformed input: {}", e);
}

/// Verifies `signature` on `message` under the public identity `root_seed = root || seed`,
/// using `scratch` as the only working memory.
///
/// Returns `Ok(())` for a valid signature and [`Error::BadSig`] for an invalid one. The other
/// errors report malformed inputs and are raised before any hashing, in this order:
/// * [`Error::BufferTooSmall`] if `scratch` is shorter than [`XMSS_WORKSPACE_BYTES`],
/// * [`Error::UnalignedBuffer`] if `scratch` or `signature` is not 4-byte aligned,
/// * [`Error::BadParams`] if `root_seed` is not [`XMSS_PK_BYTES`] long, `signature` is not
///   [`XMSS_SIG_BYTES`] long, or the leaf index is not below 2^20.
pub fn verify_with_scratch(
    root_seed: &[u8],
    signature: &[u8],
    scratch: &mut [u8],
    message: &[u8],
) -> Result<()> {
    let ws = Workspace::carve(scratch).inspect_err(log_rejection)?;
    let ([root, seed], sig) = validate(root_seed, signature).inspect_err(log_rejection)?;
    let idx = sig.leaf_index();

    let digest = XmssHasher::h_msg(&sig.r, root, idx, message);
    *ws.digits = expand_msg(&digest);
    log::trace!("[XMSS] leaf {}: message digest expanded", idx);

    let hasher = XmssHasher::new(seed);

    let mut ots_adrs = Adrs::from(AdrsType::Ots);
    ots_adrs.set_context_idx(idx);
    pk_from_sig(&hasher, &mut ots_adrs, &sig.ots, ws.digits, ws.pk);
    log::trace!("[XMSS] leaf {}: one-time public key recovered", idx);

    let mut ltree_adrs = Adrs::from(AdrsType::LTree);
    ltree_adrs.set_context_idx(idx);
    let leaf = ltree_hash_ots(&hasher, &mut ws.pk[..], &mut ltree_adrs);

    let mut tree_adrs = Adrs::from(AdrsType::HashTree);
    tree_adrs.set_level_idx(idx);
    let computed_root = words_to_bytes(&root_from_auth_path(
        &hasher,
        &mut tree_adrs,
        leaf,
        &sig.auth_path,
    ));
    log::trace!("[XMSS] leaf {}: root recomputed", idx);

    if computed_root == *root {
        Ok(())
    } else {
        log::debug!("[XMSS] leaf {}: recomputed root does not match", idx);
        Err(Error::BadSig)
    }
}

/// Verifies `signature` on `message` like [`verify_with_scratch`], with the scratch buffer on
/// the stack.
///
/// `signature` must still be 4-byte aligned; [`XmssSignature`] always is.
pub fn verify(root_seed: &[u8], signature: &[u8], message: &[u8]) -> Result<()> {
    let mut scratch = ScratchSpace::zeroed();
    verify_with_scratch(root_seed, signature, &mut scratch[..], message)
}

/// Checks everything but the scratch buffer and views the inputs as `[root, seed]` and the
/// signature fields.
fn validate<'a>(
    root_seed: &'a [u8],
    signature: &'a [u8],
) -> Result<(&'a [[u8; XMSS_N]; 2], &'a SignatureLayout)> {
    if !is_word_aligned(signature) {
        return Err(Error::UnalignedBuffer);
    }
    let root_seed: &[u8; XMSS_PK_BYTES] = root_seed
        .try_into()
        .map_err(|_| ParamError::BadLength(XMSS_PK_BYTES, root_seed.len()))?;
    let signature: &[u8; XMSS_SIG_BYTES] = signature
        .try_into()
        .map_err(|_| ParamError::BadLength(XMSS_SIG_BYTES, signature.len()))?;

    let sig: &SignatureLayout = bytemuck::cast_ref(signature);
    let idx = sig.leaf_index();
    if idx >= XMSS_MAX_LEAVES {
        return Err(ParamError::LeafIndexOutOfRange(idx).into());
    }
    Ok((bytemuck::cast_ref(root_seed), sig))
}

array_struct!(XmssPublicKey, XMSS_PK_BYTES);

impl XmssPublicKey {
    fn halves(&self) -> &[[u8; XMSS_N]; 2] {
        bytemuck::cast_ref(&self.0)
    }

    /// The expected Merkle root.
    pub fn root(&self) -> [u8; XMSS_N] {
        self.halves()[0]
    }

    /// The public seed keying every PRF derivation.
    pub fn seed(&self) -> [u8; XMSS_N] {
        self.halves()[1]
    }

    /// Parses the RFC 8391 encoding `OID || root || seed`, accepting only XMSS-SHA2_20_256.
    pub fn from_rfc8391_bytes(data: &[u8]) -> Result<Self> {
        let (oid, key) = match data.split_first_chunk::<4>() {
            Some(parts) if data.len() == XMSS_RFC_PK_BYTES => parts,
            _ => return Err(ParamError::BadLength(XMSS_RFC_PK_BYTES, data.len()).into()),
        };
        let oid = u32::from_be_bytes(*oid);
        if oid != XMSS_SHA2_20_256_OID {
            return Err(ParamError::UnknownOid(oid).into());
        }
        Self::try_from(key)
    }

    /// Encodes the key as `OID || root || seed` (RFC 8391).
    pub fn to_rfc8391_bytes(&self) -> [u8; XMSS_RFC_PK_BYTES] {
        let mut out = [0u8; XMSS_RFC_PK_BYTES];
        out[..4].copy_from_slice(&XMSS_SHA2_20_256_OID.to_be_bytes());
        out[4..].copy_from_slice(&self.0);
        out
    }

    /// Verifies `signature` on `message` under this key with a stack scratch buffer.
    pub fn verify(&self, message: &[u8], signature: &XmssSignature) -> Result<()> {
        verify(self.as_ref(), signature.as_ref(), message)
    }
}

array_struct!(XmssSignature, XMSS_SIG_BYTES);

impl XmssSignature {
    fn layout(&self) -> &SignatureLayout {
        bytemuck::cast_ref(&self.0)
    }

    /// The leaf index, as encoded. It is not range checked here.
    pub fn leaf_index(&self) -> u32 {
        self.layout().leaf_index()
    }

    /// The randomness `r` that went into the message digest.
    pub fn randomness(&self) -> &[u8; XMSS_N] {
        &self.layout().r
    }

    /// The `i`-th W-OTS+ signature node, or `None` past the last chain.
    pub fn ots_node(&self, i: usize) -> Option<&[u8; XMSS_N]> {
        self.layout().ots.get(i)
    }

    /// The sibling at height `k` on the authentication path, or `None` above the tree.
    pub fn auth_node(&self, k: usize) -> Option<&[u8; XMSS_N]> {
        self.layout().auth_path.get(k)
    }
}
