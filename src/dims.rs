// Copyright 2025 Dustin McAfee
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Validated frame dimensions.
//!
//! I420 stores chroma at half resolution in both directions, so every
//! [`Dimensions`] value is positive and even. The synthesizer relies on this
//! and never re-validates.

use crate::error::{Error, Result};

/// Width and height of a frame, both positive and even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Creates dimensions from values that are already positive and even.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero side and
    /// [`Error::OddDimensions`] for an odd side.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions {
                width: i64::from(width),
                height: i64::from(height),
            });
        }
        if width % 2 != 0 || height % 2 != 0 {
            return Err(Error::OddDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Validates user-supplied dimensions, rounding odd sides up to the next
    /// even value.
    ///
    /// The returned flag is `true` when either side was adjusted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] when a side is not positive or the
    /// rounded value does not fit in a `u32`.
    pub fn round_up_to_even(width: i64, height: i64) -> Result<(Self, bool)> {
        let invalid = || Error::InvalidDimensions { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid());
        }

        let even_width = width + (width & 1);
        let even_height = height + (height & 1);
        let adjusted = even_width != width || even_height != height;

        let w = u32::try_from(even_width).map_err(|_| invalid())?;
        let h = u32::try_from(even_height).map_err(|_| invalid())?;
        Ok((Self { width: w, height: h }, adjusted))
    }

    /// Luma width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Luma height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width of each chroma plane.
    #[inline]
    pub fn chroma_width(&self) -> u32 {
        self.width / 2
    }

    /// Height of each chroma plane.
    #[inline]
    pub fn chroma_height(&self) -> u32 {
        self.height / 2
    }

    /// Number of samples in the Y plane.
    #[inline]
    pub fn luma_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of samples in one chroma plane.
    #[inline]
    pub fn chroma_len(&self) -> usize {
        self.chroma_width() as usize * self.chroma_height() as usize
    }

    /// Size of a serialized I420 frame: `width * height * 3 / 2`.
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.luma_len() + 2 * self.chroma_len()
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
