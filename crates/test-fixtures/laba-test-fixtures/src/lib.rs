use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    descriptions: HashMap<String, String>,
    configs: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Target measurements a description case is evaluated against.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TargetSpec {
    pub width: f64,
    pub height: f64,
    pub sibling_index: usize,
}

/// One notation with the sentence it must describe to.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptionCase {
    pub notation: String,
    #[serde(default)]
    pub target: TargetSpec,
    pub description: String,
}

pub mod descriptions {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.descriptions.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.descriptions, "description", name)?;
        read_to_string(rel)
    }

    pub fn load(name: &str) -> Result<Vec<DescriptionCase>> {
        let rel = lookup(&MANIFEST.descriptions, "description", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.descriptions, "description", name)?;
        Ok(resolve_path(rel))
    }
}

pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        Ok(resolve_path(rel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_entries_resolve() {
        for key in descriptions::keys() {
            let cases = descriptions::load(&key).expect("description fixture should load");
            assert!(!cases.is_empty(), "{key} has no cases");
        }
        for key in configs::keys() {
            assert!(configs::path(&key).unwrap().exists(), "{key} missing");
        }
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        assert!(descriptions::json("does-not-exist").is_err());
    }
}
