//! Per-network records of declared classes and deployed instances.
//!
//! Both record files are loaded in full when the scripts start and rewritten
//! in full at each checkpoint. Rewrites go through a temp file followed by a
//! rename, so a run killed mid-write never leaves a half-written record file
//! behind. Loaded entries are merged with the ones recorded during the run,
//! never dropped.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use json::JsonValue;
use starknet::core::types::Felt;

use crate::{
    constants::{DECLARATIONS_FILE, DEPLOYMENTS_FILE},
    errors::ScriptError,
};

/// A recorded contract instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    /// Address of the deployed instance
    pub address: Felt,
    /// Class hash the instance was deployed from
    pub class_hash: Felt,
}

/// Declaration & deployment records for a single network
#[derive(Debug)]
pub struct ArtifactRegistry {
    /// Directory holding the record files of the active network
    dir: PathBuf,
    /// Contract name to declared class hash
    declarations: BTreeMap<String, Felt>,
    /// Contract name to deployed instance
    deployments: BTreeMap<String, Deployment>,
}

impl ArtifactRegistry {
    /// Load the records found in `dir`, starting empty for any file that does not exist yet
    pub fn load(dir: &Path) -> Result<Self, ScriptError> {
        let mut registry = Self {
            dir: dir.to_path_buf(),
            declarations: BTreeMap::new(),
            deployments: BTreeMap::new(),
        };

        let declarations_path = registry.dir.join(DECLARATIONS_FILE);
        if declarations_path.exists() {
            let parsed = read_json(&declarations_path)?;
            for (name, value) in parsed.entries() {
                let class_hash = parse_felt(&declarations_path, name, value)?;
                registry.declarations.insert(name.to_string(), class_hash);
            }
        }

        let deployments_path = registry.dir.join(DEPLOYMENTS_FILE);
        if deployments_path.exists() {
            let parsed = read_json(&deployments_path)?;
            for (name, value) in parsed.entries() {
                let deployment = Deployment {
                    address: parse_felt(&deployments_path, name, &value["address"])?,
                    class_hash: parse_felt(&deployments_path, name, &value["class_hash"])?,
                };
                registry.deployments.insert(name.to_string(), deployment);
            }
        }

        Ok(registry)
    }

    /// The recorded class hash for `name`, if any
    pub fn class_hash(&self, name: &str) -> Option<Felt> {
        self.declarations.get(name).copied()
    }

    /// The recorded instance for `name`, if any
    pub fn deployment(&self, name: &str) -> Option<Deployment> {
        self.deployments.get(name).copied()
    }

    /// Record the class hash returned by a declare call
    pub fn record_declaration(&mut self, name: &str, class_hash: Felt) {
        self.declarations.insert(name.to_string(), class_hash);
    }

    /// Record the instance returned by a deploy call
    pub fn record_deployment(&mut self, name: &str, address: Felt, class_hash: Felt) {
        self.deployments.insert(
            name.to_string(),
            Deployment {
                address,
                class_hash,
            },
        );
    }

    /// Rewrite the declaration file with the full in-memory map
    pub fn persist_declarations(&self) -> Result<(), ScriptError> {
        let mut output = JsonValue::new_object();
        for (name, class_hash) in &self.declarations {
            output[name.as_str()] = JsonValue::String(format!("{class_hash:#x}"));
        }
        write_atomic(&self.dir.join(DECLARATIONS_FILE), output)
    }

    /// Rewrite the deployment file with the full in-memory map
    pub fn persist_deployments(&self) -> Result<(), ScriptError> {
        let mut output = JsonValue::new_object();
        for (name, deployment) in &self.deployments {
            let mut entry = JsonValue::new_object();
            entry["address"] = JsonValue::String(format!("{:#x}", deployment.address));
            entry["class_hash"] = JsonValue::String(format!("{:#x}", deployment.class_hash));
            output[name.as_str()] = entry;
        }
        write_atomic(&self.dir.join(DEPLOYMENTS_FILE), output)
    }
}

/// Parse the JSON record file at the given path
fn read_json(path: &Path) -> Result<JsonValue, ScriptError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ScriptError::Registry(format!("{}: {}", path.display(), e)))?;
    let parsed = json::parse(&contents)
        .map_err(|e| ScriptError::Registry(format!("{}: {}", path.display(), e)))?;
    if !parsed.is_object() {
        return Err(ScriptError::Registry(format!(
            "{}: expected a JSON object",
            path.display()
        )));
    }
    Ok(parsed)
}

/// Parse a hex identifier out of a record entry
fn parse_felt(path: &Path, name: &str, value: &JsonValue) -> Result<Felt, ScriptError> {
    let raw = value.as_str().ok_or_else(|| {
        ScriptError::Registry(format!(
            "{}: entry `{}` is not a hex string",
            path.display(),
            name
        ))
    })?;
    Felt::from_hex(raw).map_err(|e| {
        ScriptError::Registry(format!("{}: entry `{}`: {}", path.display(), name, e))
    })
}

/// Replace `path` with `contents` through a temp file + rename
fn write_atomic(path: &Path, contents: JsonValue) -> Result<(), ScriptError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ScriptError::Registry(format!("{}: {}", parent.display(), e)))?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json::stringify_pretty(contents, 4))
        .map_err(|e| ScriptError::Registry(format!("{}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path)
        .map_err(|e| ScriptError::Registry(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn loading_a_missing_directory_starts_empty() {
        let dir = tempdir().unwrap();
        let registry = ArtifactRegistry::load(&dir.path().join("devnet")).unwrap();
        assert_eq!(registry.class_hash("resolver"), None);
        assert_eq!(registry.deployment("resolver"), None);
    }

    #[test]
    fn records_survive_a_persist_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("devnet");

        let mut registry = ArtifactRegistry::load(&path).unwrap();
        registry.record_declaration("resolver", Felt::from_hex("0x1234").unwrap());
        registry.persist_declarations().unwrap();
        registry.record_deployment(
            "resolver",
            Felt::from_hex("0xdead").unwrap(),
            Felt::from_hex("0x1234").unwrap(),
        );
        registry.persist_deployments().unwrap();

        let reloaded = ArtifactRegistry::load(&path).unwrap();
        assert_eq!(
            reloaded.class_hash("resolver"),
            Some(Felt::from_hex("0x1234").unwrap())
        );
        assert_eq!(
            reloaded.deployment("resolver"),
            Some(Deployment {
                address: Felt::from_hex("0xdead").unwrap(),
                class_hash: Felt::from_hex("0x1234").unwrap(),
            })
        );
    }

    #[test]
    fn persisting_merges_with_previously_recorded_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("devnet");

        let mut first = ArtifactRegistry::load(&path).unwrap();
        first.record_declaration("resolver_a", Felt::ONE);
        first.persist_declarations().unwrap();

        let mut second = ArtifactRegistry::load(&path).unwrap();
        second.record_declaration("resolver_b", Felt::TWO);
        second.persist_declarations().unwrap();

        let reloaded = ArtifactRegistry::load(&path).unwrap();
        assert_eq!(reloaded.class_hash("resolver_a"), Some(Felt::ONE));
        assert_eq!(reloaded.class_hash("resolver_b"), Some(Felt::TWO));
    }

    #[test]
    fn persisting_declarations_leaves_the_deployment_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("devnet");

        let mut registry = ArtifactRegistry::load(&path).unwrap();
        registry.record_deployment("resolver", Felt::THREE, Felt::ONE);
        registry.persist_deployments().unwrap();
        let before = fs::read_to_string(path.join(DEPLOYMENTS_FILE)).unwrap();

        registry.record_declaration("resolver_b", Felt::TWO);
        registry.persist_declarations().unwrap();

        let after = fs::read_to_string(path.join(DEPLOYMENTS_FILE)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn persisting_does_not_leave_a_temp_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("devnet");

        let mut registry = ArtifactRegistry::load(&path).unwrap();
        registry.record_declaration("resolver", Felt::ONE);
        registry.persist_declarations().unwrap();

        let names: Vec<String> = fs::read_dir(&path)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec![DECLARATIONS_FILE.to_string()]);
    }

    #[test]
    fn identifiers_round_trip_through_the_hex_encoding() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("devnet");

        let class_hash = Felt::from_hex(
            "0x76e94149fc55e7ad9c5fe3b9af570970ae2cf51205f8452f39753e9497fe849",
        )
        .unwrap();
        let mut registry = ArtifactRegistry::load(&path).unwrap();
        registry.record_declaration("resolver", class_hash);
        registry.persist_declarations().unwrap();

        let reloaded = ArtifactRegistry::load(&path).unwrap();
        assert_eq!(reloaded.class_hash("resolver"), Some(class_hash));
    }

    #[test]
    fn corrupt_record_files_are_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("devnet");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join(DECLARATIONS_FILE), "[1, 2, 3]").unwrap();

        let err = ArtifactRegistry::load(&path).unwrap_err();
        assert!(matches!(err, ScriptError::Registry(_)));
    }
}
