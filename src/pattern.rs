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

//! I420 test pattern synthesis.
//!
//! Every sample is a pure function of its own coordinates, so the output is
//! deterministic and independent of evaluation order.
//!
//! # Luma
//!
//! A weighted mix of four terms:
//!
//! ```text
//! horizontal = x / max(w-1, 1) * 255
//! vertical   = y / max(h-1, 1) * 255
//! diagonal   = (x+y) / (w+h-2) * 255        (0 when w+h <= 2)
//! checker    = 200 or 50, 40x40 blocks
//! Y          = 0.3*horizontal + 0.3*vertical + 0.2*diagonal + 0.2*checker
//! ```
//!
//! # Chroma
//!
//! Each chroma plane is split into quadrants with fixed base values, blended
//! 70/30 with a gradient along the plane's own axis (U horizontal, V vertical):
//!
//! ```text
//!              left        right
//! top      U=128 V=200  U=128 V=128
//! bottom   U=200 V=128  U=200 V=200
//! ```
//!
//! # Rounding
//!
//! Each intermediate term and the final blend are computed in `f64` and
//! truncated toward zero, in the same operation order as the reference
//! fixtures, so generated files match them byte for byte.

use crate::dims::Dimensions;
use crate::frame::{Frame, Plane};

/// Side length of a checkerboard block in luma pixels.
pub const CHECKER_SIZE: u32 = 40;
/// Checker term for blocks whose index sum is even.
pub const CHECKER_BRIGHT: u8 = 200;
/// Checker term for blocks whose index sum is odd.
pub const CHECKER_DARK: u8 = 50;

/// `(U, V)` base values per quadrant: top-left, top-right, bottom-left, bottom-right.
pub const QUADRANT_BASES: [(u8, u8); 4] = [(128, 200), (128, 128), (200, 128), (200, 200)];

const LUMA_WEIGHTS: [f64; 4] = [0.3, 0.3, 0.2, 0.2];
const CHROMA_BASE_WEIGHT: f64 = 0.7;
const CHROMA_GRADIENT_WEIGHT: f64 = 0.3;

/// Generates the full test pattern for `dims`.
pub fn generate(dims: Dimensions) -> Frame {
    log::debug!("generating {dims} I420 test pattern");

    let y = Plane::from_fn(dims.width(), dims.height(), |x, y| luma_at(dims, x, y));

    let (cw, ch) = (dims.chroma_width(), dims.chroma_height());
    let u = Plane::from_fn(cw, ch, |x, y| u_at(cw, ch, x, y));
    let v = Plane::from_fn(cw, ch, |x, y| v_at(cw, ch, x, y));

    Frame::assemble(dims, y, u, v)
}

/// Luma sample at `(x, y)`.
pub fn luma_at(dims: Dimensions, x: u32, y: u32) -> u8 {
    let (width, height) = (dims.width(), dims.height());

    let horizontal = gradient(x, width);
    let vertical = gradient(y, height);
    let diagonal = if u64::from(width) + u64::from(height) > 2 {
        let span = u64::from(width) + u64::from(height) - 2;
        to_sample((f64::from(x) + f64::from(y)) / span as f64 * 255.0)
    } else {
        0
    };
    let checker = checker_at(x, y);

    let [wh, wv, wd, wc] = LUMA_WEIGHTS;
    to_sample(
        f64::from(horizontal) * wh
            + f64::from(vertical) * wv
            + f64::from(diagonal) * wd
            + f64::from(checker) * wc,
    )
}

/// Checkerboard term at `(x, y)`.
#[inline]
pub fn checker_at(x: u32, y: u32) -> u8 {
    if (x / CHECKER_SIZE + y / CHECKER_SIZE) % 2 == 0 {
        CHECKER_BRIGHT
    } else {
        CHECKER_DARK
    }
}

/// `(U, V)` samples at `(u, v)` in a `chroma_width x chroma_height` plane.
pub fn chroma_at(chroma_width: u32, chroma_height: u32, u: u32, v: u32) -> (u8, u8) {
    (
        u_at(chroma_width, chroma_height, u, v),
        v_at(chroma_width, chroma_height, u, v),
    )
}

/// U sample at `(u, v)`: quadrant base blended with the horizontal gradient.
pub fn u_at(chroma_width: u32, chroma_height: u32, u: u32, v: u32) -> u8 {
    let (u_base, _) = quadrant_base(chroma_width, chroma_height, u, v);
    blend(u_base, gradient(u, chroma_width))
}

/// V sample at `(u, v)`: quadrant base blended with the vertical gradient.
pub fn v_at(chroma_width: u32, chroma_height: u32, u: u32, v: u32) -> u8 {
    let (_, v_base) = quadrant_base(chroma_width, chroma_height, u, v);
    blend(v_base, gradient(v, chroma_height))
}

#[inline]
fn quadrant_base(chroma_width: u32, chroma_height: u32, u: u32, v: u32) -> (u8, u8) {
    let right = u >= chroma_width / 2;
    let bottom = v >= chroma_height / 2;
    QUADRANT_BASES[usize::from(bottom) * 2 + usize::from(right)]
}

/// `pos / max(len-1, 1) * 255`, truncated.
#[inline]
fn gradient(pos: u32, len: u32) -> u8 {
    let span = len.saturating_sub(1).max(1);
    to_sample(f64::from(pos) / f64::from(span) * 255.0)
}

#[inline]
fn blend(base: u8, gradient: u8) -> u8 {
    to_sample(f64::from(base) * CHROMA_BASE_WEIGHT + f64::from(gradient) * CHROMA_GRADIENT_WEIGHT)
}

/// Truncates toward zero and clamps into `0..=255`.
#[inline]
fn to_sample(value: f64) -> u8 {
    value.trunc().clamp(0.0, 255.0) as u8
}
