//! Allocation-free verification of XMSS-SHA2_20_256 signatures (RFC 8391, `w = 16`, `n = 32`,
//! tree height 20).
//!
//! The entry points are [`verify_with_scratch`], which does all its work inside a caller-owned
//! scratch buffer, and [`verify`], which places that buffer on the stack. [`XmssPublicKey`] and
//! [`XmssSignature`] wrap the encoded byte strings.

#![cfg_attr(not(feature = "std"), no_std)]

mod error;
mod utils;
mod workspace;

pub mod adrs;
pub mod hash;
pub mod params;
pub mod tree;
pub mod wots_plus;
pub mod xmss;

pub use crate::error::{Error, ParamError, Result};
pub use crate::hash::XmssHasher;
pub use crate::utils::Aligned;
pub use crate::xmss::{verify, verify_with_scratch, ScratchSpace, XmssPublicKey, XmssSignature};
