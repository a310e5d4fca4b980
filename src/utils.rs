use crate::params::XMSS_BUFFER_ALIGN;

pub(crate) fn is_word_aligned(bytes: &[u8]) -> bool {
    (bytes.as_ptr() as usize) % XMSS_BUFFER_ALIGN == 0
}

/// A value stored at a 4-byte aligned address.
///
/// Verification requires 4-byte aligned signature and scratch buffers; wrapping a byte array in
/// `Aligned` is the simplest way to get one without `unsafe`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct Aligned<T>(pub T);

impl<T> core::ops::Deref for Aligned<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> core::ops::DerefMut for Aligned<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<const LEN: usize> Aligned<[u8; LEN]> {
    /// A zero-filled aligned byte array.
    pub const fn zeroed() -> Self {
        Aligned([0u8; LEN])
    }
}

macro_rules! array_struct {
    ($type: ident, $size: expr) => {
        /// Holds a fixed-size byte encoding in a 4-byte aligned `u8` array.
        /// It also provides serialization via the `serialization` feature.
        #[derive(Clone, Debug)]
        #[repr(C, align(4))]
        #[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
        pub struct $type(
            #[cfg_attr(feature = "serialization", serde(with = "BigArray"))] [u8; $size],
        );

        impl AsRef<[u8]> for $type {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $size]> for $type {
            fn from(value: [u8; $size]) -> Self {
                Self(value)
            }
        }

        impl TryFrom<&[u8]> for $type {
            type Error = Error;
            fn try_from(data: &[u8]) -> core::result::Result<$type, Error> {
                if data.len() != $size {
                    Err(ParamError::BadLength($size, data.len()).into())
                } else {
                    let mut array = [0u8; $size];
                    array.copy_from_slice(data);
                    Ok($type(array))
                }
            }
        }

        impl PartialEq for $type {
            /// By no means constant time comparison
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl Eq for $type {}
    };
}

pub(crate) use array_struct;
