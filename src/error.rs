use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

//===========================================================================//

/// Errors that end an icon generation run.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The source image does not exist.  Checked before anything is written.
    #[error("source file not found: {}", .0.display())]
    SourceMissing(PathBuf),
    /// The source image exists but could not be decoded.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        /// The file that failed to decode.
        path: PathBuf,
        /// The decoder's error.
        source: image::ImageError,
    },
    /// Resizing, encoding or writing an output failed.
    #[error("failed to produce {}: {source}", .path.display())]
    Io {
        /// The output (or directory) being produced.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

impl BuildError {
    /// Wraps I/O errors with the path they concern, for use with `map_err`.
    pub(crate) fn io_at(path: &Path) -> impl Fn(io::Error) -> BuildError + '_ {
        move |source| BuildError::Io { path: path.to_path_buf(), source }
    }

    /// The process exit status to report for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type for icon generation.
pub type BuildResult<T> = Result<T, BuildError>;

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::BuildError;
    use std::io;
    use std::path::{Path, PathBuf};

    #[test]
    fn messages_name_the_path() {
        let missing = BuildError::SourceMissing(PathBuf::from("a/b.png"));
        assert_eq!(missing.to_string(), "source file not found: a/b.png");
        let error = io::Error::new(io::ErrorKind::Other, "disk full");
        let wrapped = BuildError::io_at(Path::new("out/icon.ico"))(error);
        assert_eq!(wrapped.to_string(), "failed to produce out/icon.ico: disk full");
        assert_eq!(wrapped.exit_code(), 1);
    }
}

//===========================================================================//
