//! Page number newtype for safe conversion between user-facing and internal numbering.
//!
//! Pages are shown to users 1-based, while collections index them 0-based.
//! This module centralizes the conversion so off-by-one mistakes stay in
//! one place.

use std::fmt;

use crate::error::Error;

/// A 1-based page number as shown in user-visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(usize);

impl PageNumber {
    /// Page number for a 0-based collection index.
    ///
    /// Saturates at `usize::MAX` so that bogus indices can still be shown
    /// in error messages.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index.saturating_add(1))
    }

    /// Validate a 1-based page number against the page count.
    ///
    /// Zero is never a valid page number.
    pub fn try_new(number: usize, total_pages: usize) -> Result<Self, Error> {
        if number == 0 || number > total_pages {
            return Err(Error::IndexOutOfRange {
                index: number.saturating_sub(1),
                len: total_pages,
            });
        }
        Ok(Self(number))
    }

    /// The 1-based number.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// The 0-based index for collections.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
