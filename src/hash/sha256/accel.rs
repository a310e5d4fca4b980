use super::{Compress, SHA256_BLOCK_BYTES};
use sha2::digest::generic_array::GenericArray;

/// SHA-256 compression through `sha2::compress256`.
///
/// `sha2` detects SHA-NI on x86/x86_64 and the SHA2 crypto extension on aarch64 at runtime and
/// falls back to its software rounds otherwise. Words handed to [`Compress::compress_words`] are
/// serialized back to bytes first, since the intrinsics consume big-endian blocks.
#[derive(Copy, Clone, Debug, Default)]
pub struct Accelerated;

impl Compress for Accelerated {
    fn compress(&self, state: &mut [u32; 8], block: &[u8; SHA256_BLOCK_BYTES]) {
        sha2::compress256(state, core::slice::from_ref(GenericArray::from_slice(block)));
    }
}
