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

//! Planes, frames and the I420 byte layout.
//!
//! # Wire Layout
//!
//! ```text
//! [Y: width*height bytes][U: (width/2)*(height/2) bytes][V: (width/2)*(height/2) bytes]
//! ```
//!
//! Each plane is stored row-major with no padding. There is no header, so the
//! dimensions must be known by whoever reads the file.

use bytes::{BufMut, Bytes, BytesMut};
use std::io::Write;

use crate::dims::Dimensions;
use crate::error::{Error, Result};

/// A row-major grid of 8-bit samples for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Plane {
    /// Builds a plane by evaluating `sample` at every `(x, y)` in row-major order.
    pub fn from_fn(width: u32, height: u32, mut sample: impl FnMut(u32, u32) -> u8) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(sample(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Plane width in samples.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Plane height in samples.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the plane.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "sample ({x}, {y}) out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// One row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a row of the plane.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {y} out of bounds");
        let stride = self.width as usize;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// All samples, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// A full I420 frame: one full-resolution luma plane and two half-resolution
/// chroma planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    dims: Dimensions,
    y: Plane,
    u: Plane,
    v: Plane,
}

impl Frame {
    /// Assembles a frame from its planes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] when a plane's sample count does not
    /// match the size implied by `dims`.
    pub fn from_planes(dims: Dimensions, y: Plane, u: Plane, v: Plane) -> Result<Self> {
        check_plane(&y, dims.width(), dims.height())?;
        check_plane(&u, dims.chroma_width(), dims.chroma_height())?;
        check_plane(&v, dims.chroma_width(), dims.chroma_height())?;
        Ok(Self::assemble(dims, y, u, v))
    }

    /// Assembles planes that were built from `dims` by this crate.
    pub(crate) fn assemble(dims: Dimensions, y: Plane, u: Plane, v: Plane) -> Self {
        debug_assert_eq!(y.data.len(), dims.luma_len());
        debug_assert_eq!(u.data.len(), dims.chroma_len());
        debug_assert_eq!(v.data.len(), dims.chroma_len());
        Self { dims, y, u, v }
    }

    /// Parses a headerless I420 buffer whose dimensions are known out of band.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] when `data` is not exactly
    /// `dims.frame_len()` bytes.
    pub fn from_i420(data: &[u8], dims: Dimensions) -> Result<Self> {
        if data.len() != dims.frame_len() {
            return Err(Error::LengthMismatch {
                expected: dims.frame_len(),
                actual: data.len(),
            });
        }

        let (y_bytes, rest) = data.split_at(dims.luma_len());
        let (u_bytes, v_bytes) = rest.split_at(dims.chroma_len());

        let plane = |width, height, bytes: &[u8]| Plane {
            width,
            height,
            data: bytes.to_vec(),
        };
        Ok(Self::assemble(
            dims,
            plane(dims.width(), dims.height(), y_bytes),
            plane(dims.chroma_width(), dims.chroma_height(), u_bytes),
            plane(dims.chroma_width(), dims.chroma_height(), v_bytes),
        ))
    }

    /// Frame dimensions.
    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Luma plane.
    #[inline]
    pub fn y(&self) -> &Plane {
        &self.y
    }

    /// Blue-difference chroma plane.
    #[inline]
    pub fn u(&self) -> &Plane {
        &self.u
    }

    /// Red-difference chroma plane.
    #[inline]
    pub fn v(&self) -> &Plane {
        &self.v
    }

    /// Serializes the frame as planar I420: Y, then U, then V.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.dims.frame_len());
        buf.put_slice(self.y.as_bytes());
        buf.put_slice(self.u.as_bytes());
        buf.put_slice(self.v.as_bytes());
        buf.freeze()
    }

    /// Streams the I420 bytes to `out`.
    ///
    /// # Errors
    ///
    /// Propagates any error from the writer.
    pub fn write_to<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for plane in [&self.y, &self.u, &self.v] {
            for y in 0..plane.height {
                out.write_all(plane.row(y))?;
            }
        }
        out.flush()
    }
}

fn check_plane(plane: &Plane, width: u32, height: u32) -> Result<()> {
    let expected = width as usize * height as usize;
    if plane.width != width || plane.height != height || plane.data.len() != expected {
        return Err(Error::LengthMismatch {
            expected,
            actual: plane.data.len(),
        });
    }
    Ok(())
}
