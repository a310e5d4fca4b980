use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Scratch buffer too small: expected at least {0} bytes, found {1} bytes")]
    BufferTooSmall(usize, usize),
    #[error("Signature or scratch buffer is not 4-byte aligned")]
    UnalignedBuffer,
    #[error("Invalid parameters: {0}")]
    BadParams(#[from] ParamError),
    #[error("Signature verification failed")]
    BadSig,
}

impl Error {
    /// Whether the error was raised while validating inputs, before any hashing happened.
    /// Only [`Error::BadSig`] is a verdict on the signature itself.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Error::BadSig)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    #[error("Invalid length: expected {0} bytes, found {1} bytes")]
    BadLength(usize, usize),
    #[error("Leaf index {0} is outside the tree")]
    LeafIndexOutOfRange(u32),
    #[error("Unsupported public-key OID {0:#010x}")]
    UnknownOid(u32),
}

pub type Result<T> = core::result::Result<T, Error>;
