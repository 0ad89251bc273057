use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Dust configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DustConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Model parameters, one entry per group.
    #[serde(default)]
    pub model: ModelToml,

    /// Time stepping and particle settings.
    #[serde(default)]
    pub run: RunToml,

    /// Observations for the `filter` subcommand.
    #[serde(default)]
    pub data: Vec<DataToml>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    #[serde(default)]
    pub groups: Vec<GroupToml>,
}

/// SIR parameters for one group.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupToml {
    #[serde(default = "default_n")]
    pub n: f64,
    #[serde(default = "default_i0")]
    pub i0: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    pub incidence_period: Option<f64>,
}

fn default_n() -> f64 {
    1000.0
}
fn default_i0() -> f64 {
    10.0
}
fn default_beta() -> f64 {
    0.2
}
fn default_gamma() -> f64 {
    0.1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    #[serde(default)]
    pub time: f64,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_n_particles")]
    pub n_particles: usize,
    #[serde(default)]
    pub times: Vec<f64>,
}

impl Default for RunToml {
    fn default() -> Self {
        Self {
            time: 0.0,
            dt: default_dt(),
            n_particles: default_n_particles(),
            times: Vec::new(),
        }
    }
}

fn default_dt() -> f64 {
    1.0
}
fn default_n_particles() -> usize {
    100
}

/// One observation time.
///
/// `prevalence` is either a single value used for every group or one value
/// per group.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    pub time: f64,
    pub prevalence: PrevalenceToml,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PrevalenceToml {
    Shared(f64),
    PerGroup(Vec<f64>),
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<DustConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn full_config() {
        let file = write_config(
            r#"
seed = 42

[run]
time = 0.0
dt = 0.25
n_particles = 50
times = [1.0, 2.0, 3.0]

[[model.groups]]
n = 500.0
i0 = 5.0
beta = 0.3
gamma = 0.1
incidence_period = 1.0

[[model.groups]]
beta = 0.4

[[data]]
time = 1.0
prevalence = 7.0

[[data]]
time = 2.0
prevalence = [8.0, 9.0]
"#,
        );
        let cfg = load(file.path()).unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.run.n_particles, 50);
        assert_eq!(cfg.run.times, vec![1.0, 2.0, 3.0]);
        assert_eq!(cfg.model.groups.len(), 2);
        assert_eq!(cfg.model.groups[0].incidence_period, Some(1.0));
        assert_eq!(cfg.model.groups[1].n, 1000.0);
        assert_eq!(cfg.model.groups[1].beta, 0.4);
        assert_eq!(cfg.model.groups[1].incidence_period, None);
        assert_eq!(cfg.data[0].prevalence, PrevalenceToml::Shared(7.0));
        assert_eq!(cfg.data[1].prevalence, PrevalenceToml::PerGroup(vec![8.0, 9.0]));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let file = write_config("");
        let cfg = load(file.path()).unwrap();
        assert_eq!(cfg.seed, None);
        assert!(cfg.model.groups.is_empty());
        assert_eq!(cfg.run.dt, 1.0);
        assert_eq!(cfg.run.n_particles, 100);
        assert!(cfg.data.is_empty());
    }

    #[test]
    fn unknown_field_rejected() {
        let file = write_config("[run]\nsteps = 10\n");
        let err = load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse TOML config"));
    }

    #[test]
    fn missing_file() {
        let err = load(Path::new("/nonexistent/dust.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
