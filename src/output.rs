//! JSON output to a file or stdout.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match path {
        Some(p) => {
            std::fs::write(p, &json)
                .with_context(|| format!("failed to write output: {}", p.display()))?;
            info!(path = %p.display(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        values: Vec<f64>,
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let sample = Sample {
            name: "x",
            values: vec![1.0, 2.5],
        };
        write_json(&sample, Some(&path)).unwrap();
        let back: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back["name"], "x");
        assert_eq!(back["values"][1], 2.5);
    }

    #[test]
    fn unwritable_path() {
        let err = write_json(&1.0, Some(Path::new("/nonexistent/dir/out.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to write output"));
    }
}
