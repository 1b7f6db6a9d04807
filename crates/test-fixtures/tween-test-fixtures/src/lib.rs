//! Shared JSON fixtures for the tween crates' tests and benches.
//!
//! Fixture files live in the repository's `fixtures/` directory and are
//! indexed by `fixtures/manifest.json`.

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
    colors: HashMap<String, String>,
    interpolations: HashMap<String, String>,
    graphs: HashMap<String, GraphEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphEntry {
    configs: String,
    #[serde(default)]
    steps: Option<String>,
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

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

fn sorted_keys<T>(map: &HashMap<String, T>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

/// Color normalization tables: `[{ "input": .., "packed": .. }]`.
pub mod colors {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.colors)
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.colors, "color", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.colors, "color", name)?;
        super::load_json(rel)
    }
}

/// Interpolation configs with sampled expectations.
pub mod interpolations {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.interpolations)
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.interpolations, "interpolation", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.interpolations, "interpolation", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.interpolations, "interpolation", name)?;
        Ok(resolve_path(rel))
    }
}

/// Whole graphs as native configs, optionally with a script of value
/// updates and expected node values.
pub mod graphs {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.graphs)
    }

    pub fn configs_json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.graphs, "graph", name)?;
        read_to_string(&entry.configs)
    }

    pub fn configs<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.graphs, "graph", name)?;
        super::load_json(&entry.configs)
    }

    pub fn steps<T: DeserializeOwned>(name: &str) -> Result<Option<T>> {
        let entry = lookup(&MANIFEST.graphs, "graph", name)?;
        match &entry.steps {
            Some(steps) => super::load_json(steps).map(Some),
            None => Ok(None),
        }
    }

    pub fn configs_path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.graphs, "graph", name)?;
        Ok(resolve_path(&entry.configs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_resolves() {
        for name in colors::keys() {
            colors::json(&name).unwrap();
        }
        for name in interpolations::keys() {
            assert!(interpolations::path(&name).unwrap().exists(), "{name}");
        }
        for name in graphs::keys() {
            assert!(graphs::configs_path(&name).unwrap().exists(), "{name}");
            let _: Option<serde_json::Value> = graphs::steps(&name).unwrap();
        }
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!(graphs::configs_json("missing").is_err());
        assert!(colors::json("missing").is_err());
    }
}
