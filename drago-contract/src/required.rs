//! Presence checks for caller supplied arguments.

use ethers_core::types::{Address, U256};

/// A value that can be absent in the sense of a required argument: the zero address, a zero
/// amount or an empty string.
pub trait Required {
    /// Returns true if the value counts as not provided
    fn is_missing(&self) -> bool;
}

impl Required for Address {
    fn is_missing(&self) -> bool {
        self.is_zero()
    }
}

impl Required for U256 {
    fn is_missing(&self) -> bool {
        self.is_zero()
    }
}

impl Required for u32 {
    fn is_missing(&self) -> bool {
        *self == 0
    }
}

/// `false` is a legitimate flag value, so a `bool` is always present.
impl Required for bool {
    fn is_missing(&self) -> bool {
        false
    }
}

impl Required for str {
    fn is_missing(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T: Required + ?Sized> Required for &T {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

/// Returns the first missing field out of an ordered `(name, value)` list.
pub fn first_missing<'a>(
    fields: impl IntoIterator<Item = (&'static str, &'a dyn Required)>,
) -> Option<&'static str> {
    fields.into_iter().find(|(_, value)| value.is_missing()).map(|(name, _)| name)
}

/// Bails with [`DragoError::InvalidArgument`](crate::DragoError::InvalidArgument) naming the
/// first listed argument that is missing. Arguments are checked in the order given.
macro_rules! ensure_present {
    ($($field:ident),+ $(,)?) => {
        if let Some(field) = $crate::required::first_missing([
            $((stringify!($field), &$field as &dyn $crate::required::Required)),+
        ]) {
            return Err($crate::DragoError::InvalidArgument { field });
        }
    };
}

pub(crate) use ensure_present;
