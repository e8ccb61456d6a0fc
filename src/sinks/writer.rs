//! Output destinations for the terminal sink core

use crate::core::error::{LogError, Result};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};

/// Open one writer per output path.
///
/// `"stdout"` and `"stderr"` map to the process streams; anything else
/// is opened as a file in create/append mode. Failures surface once,
/// here, with the offending path attached.
pub fn open_writers(paths: &[String]) -> Result<Vec<Box<dyn Write + Send>>> {
    paths.iter().map(|path| open_writer(path)).collect()
}

fn open_writer(path: &str) -> Result<Box<dyn Write + Send>> {
    match path {
        "stdout" => Ok(Box::new(io::stdout())),
        "stderr" => Ok(Box::new(io::stderr())),
        file_path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)
                .map_err(|err| LogError::sink(file_path, err))?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_standard_streams() {
        let writers =
            open_writers(&["stdout".to_string(), "stderr".to_string()]).unwrap();
        assert_eq!(writers.len(), 2);
    }

    #[test]
    fn test_open_file_creates_it() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let writers = open_writers(&[path.to_string_lossy().into_owned()]).unwrap();
        assert_eq!(writers.len(), 1);
        assert!(path.exists());
    }

    #[test]
    fn test_unopenable_path_reports_path() {
        let err = open_writers(&["/nonexistent-dir/deep/app.log".to_string()])
            .err()
            .unwrap();
        assert!(matches!(err, LogError::Sink { .. }));
        assert!(err.to_string().contains("/nonexistent-dir/deep/app.log"));
    }
}
