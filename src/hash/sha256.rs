//! # Block-level SHA-256 engine
//!
//! A SHA-256 context that only ever absorbs whole 64-byte blocks and is finalized with a short
//! tail. This is the shape every hash in XMSS verification takes: the keyed functions hash a fixed
//! number of 32-byte values, and the message digest streams the signed blob followed by a
//! partial block.
//!
//! The block compression is pluggable through [`Compress`]. [`Portable`] is a plain Rust
//! reference and [`Accelerated`] delegates to the `sha2` crate, which uses the SHA extensions of
//! the running CPU when they are present. Both produce bit-identical output. [`DefaultCompress`]
//! names the one used by the verifier and is [`Accelerated`] unless the `force-portable`
//! feature is enabled.
//!
//! The `_le` entry points exchange words in native order instead of big-endian bytes. The
//! keyed hash layer keeps node values as `[u32; 8]` so that chaining digests into the next
//! block never needs a byte swap.
//!
//! The bit-length counter is 32 bits wide, so a single context covers messages shorter than
//! 512 MiB. Longer inputs wrap the counter and produce a digest that differs from standard
//! SHA-256.

mod accel;
mod portable;

pub use accel::Accelerated;
pub use portable::Portable;

/// The compressor used by the verifier.
#[cfg(not(feature = "force-portable"))]
pub type DefaultCompress = Accelerated;
/// The compressor used by the verifier.
#[cfg(feature = "force-portable")]
pub type DefaultCompress = Portable;

/// SHA-256 block byte size.
pub const SHA256_BLOCK_BYTES: usize = 64;

/// SHA-256 output byte size.
pub const SHA256_OUTPUT_BYTES: usize = 32;

const IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// A SHA-256 block compression function.
pub trait Compress {
    /// Compresses one big-endian block into `state`.
    fn compress(&self, state: &mut [u32; 8], block: &[u8; SHA256_BLOCK_BYTES]);

    /// Compresses one block whose 16 message words are already in native order.
    fn compress_words(&self, state: &mut [u32; 8], words: &[u32; 16]) {
        let mut block = [0u8; SHA256_BLOCK_BYTES];
        for (chunk, word) in block.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        self.compress(state, &block);
    }
}

/// A SHA-256 context over whole blocks.
#[derive(Clone, Debug)]
pub struct Sha256<C: Compress = DefaultCompress> {
    state: [u32; 8],
    bit_len: u32,
    compressor: C,
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256 {
    /// Creates a context using [`DefaultCompress`].
    pub fn new() -> Self {
        Self::with_compressor(DefaultCompress::default())
    }

    /// Computes the SHA-256 digest of `data` in one call.
    pub fn digest(data: &[u8]) -> [u8; SHA256_OUTPUT_BYTES] {
        Self::new().absorb_and_finalize(data)
    }
}

impl<C: Compress> Sha256<C> {
    /// Creates a context at the standard initial value, compressing with `compressor`.
    pub fn with_compressor(compressor: C) -> Self {
        Self {
            state: IV,
            bit_len: 0,
            compressor,
        }
    }

    /// Absorbs whole blocks. `data.len()` must be a multiple of [`SHA256_BLOCK_BYTES`].
    pub fn update(&mut self, data: &[u8]) {
        debug_assert_eq!(data.len() % SHA256_BLOCK_BYTES, 0, "partial block given to update");

        let mut rest = data;
        while let Some((block, tail)) = rest.split_first_chunk::<SHA256_BLOCK_BYTES>() {
            self.compressor.compress(&mut self.state, block);
            self.bit_len = self.bit_len.wrapping_add(512);
            rest = tail;
        }
    }

    /// Absorbs exactly one block given as native-order words.
    pub fn update1_le(&mut self, words: &[u32; 16]) {
        self.compressor.compress_words(&mut self.state, words);
        self.bit_len = self.bit_len.wrapping_add(512);
    }

    /// Pads `tail` and returns the digest in big-endian bytes. `tail.len()` must be below
    /// [`SHA256_BLOCK_BYTES`].
    pub fn finalize(self, tail: &[u8]) -> [u8; SHA256_OUTPUT_BYTES] {
        words_to_bytes(&self.finalize_le(tail))
    }

    /// Pads `tail` and returns the digest as native-order words.
    pub fn finalize_le(mut self, tail: &[u8]) -> [u32; 8] {
        debug_assert!(tail.len() < SHA256_BLOCK_BYTES, "tail must be shorter than a block");

        let bit_len = self.bit_len.wrapping_add((tail.len() as u32) << 3);
        let mut block = [0u8; SHA256_BLOCK_BYTES];
        block[..tail.len()].copy_from_slice(tail);
        block[tail.len()] = 0x80;

        // No room left for the length field.
        if tail.len() >= SHA256_BLOCK_BYTES - 8 {
            self.compressor.compress(&mut self.state, &block);
            block = [0u8; SHA256_BLOCK_BYTES];
        }

        // The high half of the 64-bit length field is always zero.
        block[SHA256_BLOCK_BYTES - 4..].copy_from_slice(&bit_len.to_be_bytes());
        self.compressor.compress(&mut self.state, &block);
        self.state
    }

    /// Finalizes with a 32-byte tail given as native-order words, returning native-order words.
    pub fn finalize_le_words(mut self, tail: &[u32; 8]) -> [u32; 8] {
        let mut words = [0u32; 16];
        words[..8].copy_from_slice(tail);
        words[8] = 0x8000_0000;
        words[15] = self.bit_len.wrapping_add(256);
        self.compressor.compress_words(&mut self.state, &words);
        self.state
    }

    /// Absorbs every whole block of `data` and finalizes with the remainder.
    pub fn absorb_and_finalize(mut self, data: &[u8]) -> [u8; SHA256_OUTPUT_BYTES] {
        let full = data.len() - data.len() % SHA256_BLOCK_BYTES;
        self.update(&data[..full]);
        self.finalize(&data[full..])
    }
}

/// Serializes native-order words as big-endian bytes.
pub(crate) fn words_to_bytes(words: &[u32; 8]) -> [u8; SHA256_OUTPUT_BYTES] {
    let mut out = [0u8; SHA256_OUTPUT_BYTES];
    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// Reads big-endian bytes as native-order words.
pub(crate) fn bytes_to_words(bytes: &[u8; SHA256_OUTPUT_BYTES]) -> [u32; 8] {
    let mut out = [0u32; 8];
    for (word, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    out
}
