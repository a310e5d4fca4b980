//! The XMSS hash address.
//!
//! Every keyed hash call in verification takes a 32-byte address that says which structural role
//! the output plays. Nothing else separates the domains, so a field left over from a previous
//! call silently produces a different hash. The phase drivers therefore build a fresh [`Adrs`]
//! from an [`AdrsType`] and set every field they rely on before each call.

/// Word offset of the layer address. Always zero for a single tree.
pub const ADRS_OFFSET_LAYER: usize = 0;

/// Word offset of the 2-word tree address. Always zero for a single tree.
pub const ADRS_OFFSET_TREE: usize = 1;

/// Word offset of the address type.
pub const ADRS_OFFSET_TYPE: usize = 3;

/// Word offset of the OTS / L-tree address: the leaf index the computation belongs to.
pub const ADRS_OFFSET_CONTEXT: usize = 4;

/// Word offset of the chain address (OTS) or tree height (L-tree, Merkle tree).
pub const ADRS_OFFSET_LEVEL: usize = 5;

/// Word offset of the hash address (OTS) or tree index (L-tree, Merkle tree).
pub const ADRS_OFFSET_LEVEL_INDEX: usize = 6;

/// Word offset of the key-and-mask selector.
pub const ADRS_OFFSET_KEY_AND_MASK: usize = 7;

/// The three address types of XMSS. The value is written into the `type` word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum AdrsType {
    /// Hashing along a WOTS+ chain.
    Ots = 0,
    /// Compressing a WOTS+ public key into a leaf.
    LTree = 1,
    /// Combining nodes of the main Merkle tree.
    HashTree = 2,
}

/// Selects which PRF output a derivation produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum KeyAndMask {
    Key = 0,
    /// The bitmask for a chain step, or for the left input of a node combination.
    Mask = 1,
    /// The bitmask for the right input of a node combination.
    MaskRight = 2,
}

/// An XMSS address: `{layer, tree(2), type, context, level, level index, key and mask}`, held as
/// native-order words and serialized big-endian.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Adrs([u32; 8]);

impl From<AdrsType> for Adrs {
    fn from(adrs_type: AdrsType) -> Self {
        let mut adrs = Self::default();
        adrs.set_type(adrs_type);
        adrs
    }
}

impl Adrs {
    /// Specify what the hash computed with this address is for.
    pub fn set_type(&mut self, adrs_type: AdrsType) {
        self.0[ADRS_OFFSET_TYPE] = adrs_type as u32;
    }

    /// Specify which leaf (OTS keypair / L-tree) the computation belongs to.
    pub fn set_context_idx(&mut self, idx: u32) {
        self.0[ADRS_OFFSET_CONTEXT] = idx;
    }

    /// Specify the chain (OTS) or tree height (L-tree, Merkle tree).
    pub fn set_level(&mut self, level: u32) {
        self.0[ADRS_OFFSET_LEVEL] = level;
    }

    pub fn level(&self) -> u32 {
        self.0[ADRS_OFFSET_LEVEL]
    }

    /// Specify the position in the chain (OTS) or the node index within a tree level.
    pub fn set_level_idx(&mut self, level_idx: u32) {
        self.0[ADRS_OFFSET_LEVEL_INDEX] = level_idx;
    }

    pub fn level_idx(&self) -> u32 {
        self.0[ADRS_OFFSET_LEVEL_INDEX]
    }

    pub fn set_key_and_mask(&mut self, key_and_mask: KeyAndMask) {
        self.0[ADRS_OFFSET_KEY_AND_MASK] = key_and_mask as u32;
    }

    /// The address as native-order words, the form the PRF absorbs.
    pub fn words(&self) -> &[u32; 8] {
        &self.0
    }

    /// The 32-byte big-endian serialization.
    pub fn to_bytes(&self) -> [u8; 32] {
        crate::hash::sha256::words_to_bytes(&self.0)
    }
}
