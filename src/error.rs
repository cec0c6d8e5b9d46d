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

//! Error types for pattern generation and fixture output.

use std::path::PathBuf;

/// Errors produced while validating, parsing or writing I420 frames.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Width or height is zero, negative, or does not fit the frame size type.
    #[error("invalid dimensions {width}x{height}: width and height must be positive integers")]
    InvalidDimensions {
        /// Requested width
        width: i64,
        /// Requested height
        height: i64,
    },

    /// I420 requires even dimensions so that chroma is exactly half size.
    #[error("odd dimensions {width}x{height}: I420 requires even width and height")]
    OddDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// A raw I420 buffer does not match the size implied by its dimensions.
    #[error("I420 buffer length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Bytes required by the dimensions
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// The run was stopped (Ctrl-C) before the output was complete.
    #[error("interrupted before the output was complete")]
    Interrupted,

    /// Creating the output directory or writing the file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being created or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for generator operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
