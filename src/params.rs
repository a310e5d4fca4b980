//! Here are the parameters of the XMSS-SHA2_20_256 parameter set (RFC 8391).
//!
//! Note that these values are not open for configuration. The message expansion, the address
//! layout and the scratch arena are all laid out for exactly this set.

/// Hash output length in bytes.
pub const XMSS_N: usize = 32;

/// Winternitz parameter.
pub const XMSS_WOTS_W: usize = 16;

/// log2 of the Winternitz parameter.
pub const XMSS_WOTS_LOGW: usize = 4;

/// Number of base-w digits covering the message digest.
pub const XMSS_WOTS_LEN1: usize = 8 * XMSS_N / XMSS_WOTS_LOGW;

/* XMSS_WOTS_LEN2 is floor(log(len_1 * (w - 1)) / log(w)) + 1; we precompute */
pub const XMSS_WOTS_LEN2: usize = 3;

/// Number of WOTS+ chains.
pub const XMSS_WOTS_LEN: usize = XMSS_WOTS_LEN1 + XMSS_WOTS_LEN2;

/// WOTS+ signature byte size.
pub const XMSS_WOTS_BYTES: usize = XMSS_WOTS_LEN * XMSS_N;

/// Height of the Merkle tree.
pub const XMSS_TREE_HEIGHT: usize = 20;

/// Number of one-time keys in the tree, i.e. the exclusive bound of a leaf index.
pub const XMSS_MAX_LEAVES: u32 = 1 << XMSS_TREE_HEIGHT;

/// Byte size of the big-endian leaf index at the front of a signature.
pub const XMSS_IDX_BYTES: usize = 4;

/// Authentication path byte size.
pub const XMSS_AUTH_BYTES: usize = XMSS_TREE_HEIGHT * XMSS_N;

/// Offset of the randomness `r` inside a signature.
pub const XMSS_SIG_OFFSET_R: usize = XMSS_IDX_BYTES;

/// Offset of the WOTS+ signature inside a signature.
pub const XMSS_SIG_OFFSET_OTS: usize = XMSS_SIG_OFFSET_R + XMSS_N;

/// Offset of the authentication path inside a signature.
pub const XMSS_SIG_OFFSET_AUTH: usize = XMSS_SIG_OFFSET_OTS + XMSS_WOTS_BYTES;

/// Signature byte size: idx || r || ots || auth.
pub const XMSS_SIG_BYTES: usize = XMSS_SIG_OFFSET_AUTH + XMSS_AUTH_BYTES;

/// Public-key byte size: root || seed.
pub const XMSS_PK_BYTES: usize = 2 * XMSS_N;

/// Object identifier of XMSS-SHA2_20_256 in the RFC 8391 public-key encoding.
pub const XMSS_SHA2_20_256_OID: u32 = 0x0000_0003;

/// Public-key byte size in the RFC 8391 encoding: OID || root || seed.
pub const XMSS_RFC_PK_BYTES: usize = 4 + XMSS_PK_BYTES;

/// Minimum byte size of the caller-supplied scratch workspace.
pub const XMSS_WORKSPACE_BYTES: usize = 2856;

/// Required alignment of the signature and scratch buffers.
pub const XMSS_BUFFER_ALIGN: usize = 4;

const _: () = assert!(XMSS_SIG_BYTES == 2820);
