//! The scratch arena of one verification.
//!
//! The caller hands over [`XMSS_WORKSPACE_BYTES`] or more bytes; the verifier never allocates.
//! The first [`XMSS_WORKSPACE_BYTES`] are viewed as an [`Arena`] holding the buffers of the
//! phases that need more than a few words:
//!
//! | Field | Bytes | Phase |
//! |---|---|---|
//! | `pk` | 67 × 32 | W-OTS+ public key, then L-tree working nodes |
//! | `digits` | 67 | expanded digest, read while recovering the public key |
//!
//! Everything is overwritten before it is read, so the arena needs no clearing between calls.

use bytemuck::{Pod, Zeroable};

use crate::error::{Error, Result};
use crate::hash::Node;
use crate::params::{XMSS_N, XMSS_WORKSPACE_BYTES, XMSS_WOTS_LEN};

const ARENA_USED_BYTES: usize = XMSS_WOTS_LEN * XMSS_N + XMSS_WOTS_LEN;

#[derive(Copy, Clone)]
#[repr(C)]
struct Arena {
    pk: [Node; XMSS_WOTS_LEN],
    digits: [u8; XMSS_WOTS_LEN],
    _reserved: [u8; XMSS_WORKSPACE_BYTES - ARENA_USED_BYTES],
}

const _: () = assert!(core::mem::size_of::<Arena>() == XMSS_WORKSPACE_BYTES);
const _: () = assert!(core::mem::offset_of!(Arena, digits) == XMSS_WOTS_LEN * XMSS_N);

// SAFETY: `Arena` is `repr(C)`, every field is `Pod` and the size assertion above rules out
// padding.
unsafe impl Zeroable for Arena {}
unsafe impl Pod for Arena {}

/// Typed views into the scratch arena.
pub(crate) struct Workspace<'a> {
    pub(crate) pk: &'a mut [Node; XMSS_WOTS_LEN],
    pub(crate) digits: &'a mut [u8; XMSS_WOTS_LEN],
}

impl<'a> Workspace<'a> {
    /// Views the front of `scratch` as the arena.
    ///
    /// Fails with [`Error::BufferTooSmall`] if `scratch` is shorter than
    /// [`XMSS_WORKSPACE_BYTES`], and with [`Error::UnalignedBuffer`] if it does not start on a
    /// 4-byte boundary. Nothing is written in either case.
    pub(crate) fn carve(scratch: &'a mut [u8]) -> Result<Self> {
        let found = scratch.len();
        let bytes = scratch
            .get_mut(..XMSS_WORKSPACE_BYTES)
            .ok_or(Error::BufferTooSmall(XMSS_WORKSPACE_BYTES, found))?;
        let arena: &mut Arena =
            bytemuck::try_from_bytes_mut(bytes).map_err(|_| Error::UnalignedBuffer)?;

        Ok(Self {
            pk: &mut arena.pk,
            digits: &mut arena.digits,
        })
    }
}
