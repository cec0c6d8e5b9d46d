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

//! Human-readable summary of a generated fixture.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::dims::Dimensions;

const RULE_WIDTH: usize = 50;

/// Sizes and layout of a written I420 fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    dims: Dimensions,
    path: PathBuf,
}

impl Summary {
    /// Summary for a frame of `dims` written to `path`.
    pub fn new(dims: Dimensions, path: impl AsRef<Path>) -> Self {
        Self {
            dims,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Example command for loading the fixture in the software renderer.
    pub fn usage_hint(&self) -> String {
        format!(
            "./softrender \"{}\" {} {}",
            self.path.display(),
            self.dims.width(),
            self.dims.height()
        )
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let y_size = self.dims.luma_len();
        let uv_size = self.dims.chroma_len();
        let total = self.dims.frame_len();

        writeln!(f, "{rule}")?;
        writeln!(f, "I420 test pattern generated")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Dimensions:   {} x {}", self.dims.width(), self.dims.height())?;
        writeln!(f, "Y plane:      {} bytes", group_thousands(y_size))?;
        writeln!(f, "U plane:      {} bytes", group_thousands(uv_size))?;
        writeln!(f, "V plane:      {} bytes", group_thousands(uv_size))?;
        writeln!(
            f,
            "File size:    {} bytes ({:.1} KB)",
            group_thousands(total),
            total as f64 / 1024.0
        )?;
        writeln!(f, "Output path:  {}", self.path.display())?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Format:       I420 (YUV420 planar)")?;
        writeln!(f, "Layout:       [Y:{y_size} bytes][U:{uv_size} bytes][V:{uv_size} bytes]")?;
        write!(f, "{rule}")
    }
}

/// Formats `n` with `,` between groups of three digits.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
