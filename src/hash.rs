pub mod sha256;

mod keyed;

pub use crate::hash::keyed::XmssHasher;
pub(crate) use crate::hash::keyed::xor;

/// A hash value inside the verification pipeline: 32 bytes held as native-order words.
pub type Node = [u32; 8];
