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

//! Writing frames to disk.
//!
//! Output paths are resolved against an explicit base directory instead of
//! the process working directory. Missing parent directories are created
//! before the write, and a partially written file is removed on failure.
//!
//! [`write_frame_until`] additionally watches a stop flag (set by the fixture
//! binary's Ctrl-C handler) and abandons the write when it is raised.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::dims::Dimensions;
use crate::error::{Error, Result};
use crate::frame::Frame;

/// Where a fixture is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory that relative output paths are resolved against.
    pub base_dir: PathBuf,
    /// Output file path, absolute or relative to `base_dir`.
    pub path: PathBuf,
}

impl OutputConfig {
    /// Creates a config resolving `path` against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            path: path.into(),
        }
    }

    /// The path that will actually be written.
    pub fn resolve(&self) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            self.base_dir.join(&self.path)
        }
    }
}

/// Outcome of a successful [`write_frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Resolved path of the written file.
    pub path: PathBuf,
    /// Dimensions of the written frame.
    pub dims: Dimensions,
    /// Number of bytes written.
    pub bytes_written: usize,
    /// Parent directory created during pre-flight, if any.
    pub created_dir: Option<PathBuf>,
}

/// Writes `frame` as raw I420 to the path described by `config`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the parent directory cannot be created or the
/// file cannot be written. A partially written file is removed first.
pub fn write_frame(frame: &Frame, config: &OutputConfig) -> Result<WriteReport> {
    write_frame_with(frame, config, |file| file)
}

/// Like [`write_frame`], but gives up as soon as `stop` is set.
///
/// # Errors
///
/// Returns [`Error::Interrupted`] when `stop` is set before or during the
/// write (any partial file is removed), otherwise the errors of [`write_frame`].
pub fn write_frame_until(
    frame: &Frame,
    config: &OutputConfig,
    stop: &AtomicBool,
) -> Result<WriteReport> {
    if stop.load(Ordering::SeqCst) {
        return Err(Error::Interrupted);
    }
    write_frame_with(frame, config, |file| StopWriter { inner: file, stop }).map_err(|e| {
        if stop.load(Ordering::SeqCst) {
            Error::Interrupted
        } else {
            e
        }
    })
}

/// Writes `frame` through `wrap(file)`, removing the file if any write fails.
///
/// `wrap` sees the freshly created file and returns the writer the frame is
/// streamed into (buffered on top).
///
/// # Errors
///
/// Same as [`write_frame`].
pub fn write_frame_with<W, F>(frame: &Frame, config: &OutputConfig, wrap: F) -> Result<WriteReport>
where
    W: Write,
    F: FnOnce(File) -> W,
{
    let path = config.resolve();
    let created_dir = ensure_parent_dir(&path)?;

    if let Err(source) = write_file(frame, &path, wrap) {
        if path.is_file() {
            match fs::remove_file(&path) {
                Ok(()) => log::info!("removed partial output {}", path.display()),
                Err(e) => log::warn!("failed to remove partial output {}: {e}", path.display()),
            }
        }
        return Err(Error::Io { path, source });
    }

    let bytes_written = frame.dims().frame_len();
    log::info!("wrote {bytes_written} bytes to {}", path.display());
    Ok(WriteReport {
        path,
        dims: frame.dims(),
        bytes_written,
        created_dir,
    })
}

/// Creates the parent directory of `path` when it does not exist yet.
fn ensure_parent_dir(path: &Path) -> Result<Option<PathBuf>> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(None);
    };
    if parent.exists() {
        return Ok(None);
    }

    fs::create_dir_all(parent).map_err(|source| Error::Io {
        path: parent.to_path_buf(),
        source,
    })?;
    log::info!("created directory {}", parent.display());
    Ok(Some(parent.to_path_buf()))
}

fn write_file<W: Write>(frame: &Frame, path: &Path, wrap: impl FnOnce(File) -> W) -> io::Result<()> {
    let file = File::create(path)?;
    frame.write_to(BufWriter::new(wrap(file)))
}

/// Fails every write once the stop flag is raised.
struct StopWriter<'a, W> {
    inner: W,
    stop: &'a AtomicBool,
}

impl<W: Write> StopWriter<'_, W> {
    fn check(&self) -> io::Result<()> {
        // Not ErrorKind::Interrupted: write_all retries that kind.
        if self.stop.load(Ordering::SeqCst) {
            return Err(io::Error::other("write stopped"));
        }
        Ok(())
    }
}

impl<W: Write> Write for StopWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check()?;
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check()?;
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::generate;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let config = OutputConfig::new("/data/fixtures", "yuv/test.yuv");
        assert_eq!(config.resolve(), PathBuf::from("/data/fixtures/yuv/test.yuv"));

        let config = OutputConfig::new("/data/fixtures", "/tmp/abs.yuv");
        assert_eq!(config.resolve(), PathBuf::from("/tmp/abs.yuv"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let frame = generate(Dimensions::new(16, 8).unwrap());
        let config = OutputConfig::new(dir.path(), "nested/yuv/test_16x8.yuv");

        let report = write_frame(&frame, &config).unwrap();
        assert_eq!(report.bytes_written, 16 * 8 * 3 / 2);
        assert_eq!(report.created_dir, Some(dir.path().join("nested/yuv")));

        let written = fs::read(&report.path).unwrap();
        assert_eq!(written, frame.to_bytes().to_vec());
    }

    #[test]
    fn test_write_existing_dir_reports_none() {
        let dir = tempdir().unwrap();
        let frame = generate(Dimensions::new(4, 4).unwrap());
        let report = write_frame(&frame, &OutputConfig::new(dir.path(), "a.yuv")).unwrap();
        assert_eq!(report.created_dir, None);
        assert_eq!(report.path, dir.path().join("a.yuv"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.yuv");
        fs::write(&target, vec![0xAA; 1000]).unwrap();

        let frame = generate(Dimensions::new(4, 2).unwrap());
        write_frame(&frame, &OutputConfig::new(dir.path(), "out.yuv")).unwrap();
        assert_eq!(fs::read(&target).unwrap().len(), 12);
    }

    #[test]
    fn test_write_into_directory_path_fails() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("taken")).unwrap();

        let frame = generate(Dimensions::new(4, 2).unwrap());
        let err = write_frame(&frame, &OutputConfig::new(dir.path(), "taken")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(dir.path().join("taken").is_dir());
    }

    /// Accepts `remaining` bytes, then fails every write.
    struct FailAfter<W> {
        inner: W,
        remaining: usize,
    }

    impl<W: Write> Write for FailAfter<W> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            self.inner.write(&buf[..n])
        }

        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = tempdir().unwrap();
        // 24,576 bytes, well past the BufWriter capacity.
        let frame = generate(Dimensions::new(128, 128).unwrap());
        let config = OutputConfig::new(dir.path(), "partial.yuv");

        let err = write_frame_with(&frame, &config, |file| FailAfter {
            inner: file,
            remaining: 10_000,
        })
        .unwrap_err();

        match err {
            Error::Io { path, source } => {
                assert_eq!(path, dir.path().join("partial.yuv"));
                assert_eq!(source.kind(), io::ErrorKind::StorageFull);
            }
            other => panic!("expected Error::Io, got {other:?}"),
        }
        assert!(!dir.path().join("partial.yuv").exists());
    }

    #[test]
    fn test_write_with_passthrough_matches_write_frame() {
        let dir = tempdir().unwrap();
        let frame = generate(Dimensions::new(128, 128).unwrap());
        let config = OutputConfig::new(dir.path(), "full.yuv");

        let report = write_frame_with(&frame, &config, |file| FailAfter {
            inner: file,
            remaining: usize::MAX,
        })
        .unwrap();
        assert_eq!(fs::read(&report.path).unwrap(), frame.to_bytes().to_vec());
    }

    #[test]
    fn test_stop_flag_set_before_write() {
        let dir = tempdir().unwrap();
        let frame = generate(Dimensions::new(16, 8).unwrap());
        let stop = AtomicBool::new(true);

        let err = write_frame_until(&frame, &OutputConfig::new(dir.path(), "a.yuv"), &stop)
            .unwrap_err();
        assert!(matches!(err, Error::Interrupted));
        assert!(!dir.path().join("a.yuv").exists());
    }

    #[test]
    fn test_stop_writer_fails_once_flag_raised() {
        let stop = AtomicBool::new(false);
        let mut writer = StopWriter {
            inner: Vec::new(),
            stop: &stop,
        };
        writer.write_all(b"abc").unwrap();
        stop.store(true, Ordering::SeqCst);
        let err = writer.write_all(b"def").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(writer.inner, b"abc");
    }

    #[test]
    fn test_write_until_without_stop_writes_everything() {
        let dir = tempdir().unwrap();
        let frame = generate(Dimensions::new(64, 48).unwrap());
        let stop = AtomicBool::new(false);

        let report = write_frame_until(&frame, &OutputConfig::new(dir.path(), "b.yuv"), &stop)
            .unwrap();
        assert_eq!(report.bytes_written, 64 * 48 * 3 / 2);
        assert_eq!(fs::read(&report.path).unwrap().len(), 4608);
    }

    #[test]
    fn test_parent_is_a_file_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blocker"), b"x").unwrap();

        let frame = generate(Dimensions::new(4, 2).unwrap());
        let config = OutputConfig::new(dir.path(), "blocker/out.yuv");
        assert!(matches!(
            write_frame(&frame, &config),
            Err(Error::Io { .. })
        ));
    }
}
