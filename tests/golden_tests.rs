// Golden tests for the I420 test pattern
// Run normally: cargo test --test golden_tests
// Generate expected outputs: cargo test --test golden_tests --features generate-golden
//
// The pattern uses only f64 arithmetic truncated to u8, so the expected files
// are shared by every platform.

use i420_testgen::{generate, Dimensions, Frame};

#[cfg(feature = "generate-golden")]
use std::path::Path;

const EXPECTED_DIR: &str = "tests/expected";

/// Compare or generate golden output
fn golden_check(name: &str, data: &[u8]) {
    let path = format!("{EXPECTED_DIR}/{name}");

    #[cfg(feature = "generate-golden")]
    {
        if let Some(parent) = Path::new(&path).parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, data).unwrap();
        println!("Generated: {} ({} bytes)", path, data.len());
    }

    #[cfg(not(feature = "generate-golden"))]
    {
        let expected = std::fs::read(&path).unwrap_or_else(|e| {
            panic!(
                "Failed to read {}: {}. Run with --features generate-golden to create it.",
                path, e
            )
        });
        assert_eq!(data.len(), expected.len(), "Length mismatch in {}", name);
        if let Some(pos) = data.iter().zip(&expected).position(|(a, b)| a != b) {
            panic!(
                "Mismatch in {} at byte {}: got {}, expected {}",
                name, pos, data[pos], expected[pos]
            );
        }
    }
}

fn frame(width: u32, height: u32) -> Frame {
    generate(Dimensions::new(width, height).unwrap())
}

// --- Checkerboard crosses block edges on both axes ---

#[test]
fn golden_i420_96x80() {
    golden_check("i420_96x80.yuv", &frame(96, 80).to_bytes());
}

// --- Odd chroma dimensions (65x21) put the quadrant split off-centre ---

#[test]
fn golden_i420_130x42() {
    golden_check("i420_130x42.yuv", &frame(130, 42).to_bytes());
}

// ============================================================================
// PARSE-BACK TESTS - the golden files load as frames of the same dimensions
// ============================================================================

#[cfg(not(feature = "generate-golden"))]
#[test]
fn golden_files_parse_as_i420() {
    for (name, width, height) in [("i420_96x80.yuv", 96, 80), ("i420_130x42.yuv", 130, 42)] {
        let data = std::fs::read(format!("{EXPECTED_DIR}/{name}")).unwrap();
        let dims = Dimensions::new(width, height).unwrap();
        let parsed = Frame::from_i420(&data, dims).unwrap();
        assert_eq!(parsed, frame(width, height), "Parsed frame differs for {}", name);
    }
}
