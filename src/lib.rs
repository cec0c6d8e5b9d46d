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

//! Deterministic I420 (YUV 4:2:0 planar) test pattern generator.
//!
//! Produces synthetic fixtures for renderers that consume raw I420 frames.
//! The pattern mixes horizontal, vertical and diagonal luma gradients with a
//! 40-pixel checkerboard, and paints each chroma quadrant a different tint so
//! that plane order and subsampling mistakes are easy to spot.
//!
//! # Example
//!
//! ```
//! use i420_testgen::{generate, Dimensions};
//!
//! let dims = Dimensions::new(640, 480).unwrap();
//! let frame = generate(dims);
//! assert_eq!(frame.to_bytes().len(), 460_800);
//! ```
//!
//! The output has no header: `[Y][U][V]`, each plane row-major. See
//! [`frame`] for the layout and [`pattern`] for the sample formulas.

#![warn(missing_docs)]

pub mod dims;
pub mod error;
pub mod frame;
pub mod output;
pub mod pattern;
pub mod report;

pub use dims::Dimensions;
pub use error::{Error, Result};
pub use frame::{Frame, Plane};
pub use output::{write_frame, write_frame_until, write_frame_with, OutputConfig, WriteReport};
pub use pattern::generate;
pub use report::Summary;
