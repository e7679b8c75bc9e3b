//! Compiled contract artifacts.
//!
//! Artifacts follow the usual Solidity toolchain layout
//! `<artifacts>/contracts/<Name>.sol/<Name>.json`, each carrying at least an
//! `abi` array and a hex `bytecode` string. Constructor arguments from the
//! deployment plan are coerced to the constructor's parameter types and
//! appended to the creation code.

use alloy::dyn_abi::{DynSolValue, JsonAbiExt, Specifier};
use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::deploy::{DeployError, DeployResult};

/// A compiled contract ready for deployment.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub name: String,
    pub abi: JsonAbi,
    /// Creation bytecode without constructor arguments.
    pub bytecode: Bytes,
    pub path: PathBuf,
}

#[derive(Deserialize)]
struct RawArtifact {
    abi: JsonAbi,
    #[serde(default)]
    bytecode: String,
}

/// Looks up artifacts by contract name.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `<name>.json`, trying the conventional location first.
    pub fn locate(&self, name: &str) -> DeployResult<PathBuf> {
        let conventional = self
            .root
            .join("contracts")
            .join(format!("{name}.sol"))
            .join(format!("{name}.json"));
        if conventional.is_file() {
            return Ok(conventional);
        }

        find_file(&self.root, &format!("{name}.json")).ok_or_else(|| DeployError::ArtifactNotFound {
            name: name.to_string(),
            dir: self.root.clone(),
        })
    }

    pub fn load(&self, name: &str) -> DeployResult<ContractArtifact> {
        let path = self.locate(name)?;
        let json = fs::read_to_string(&path).map_err(|source| DeployError::ArtifactIo {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(contract = name, path = %path.display(), "Artifact loaded");
        parse_artifact(name, &json, path)
    }
}

fn find_file(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut entries: Vec<_> = fs::read_dir(dir).ok()?.filter_map(Result::ok).collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            if let Some(found) = find_file(&path, file_name) {
                return Some(found);
            }
        } else if path.file_name().is_some_and(|n| n == file_name) {
            return Some(path);
        }
    }
    None
}

/// Parse artifact JSON.
pub fn parse_artifact(name: &str, json: &str, path: PathBuf) -> DeployResult<ContractArtifact> {
    let raw: RawArtifact = serde_json::from_str(json).map_err(|e| DeployError::InvalidArtifact {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let hex_code = raw.bytecode.trim();
    let hex_code = hex_code.strip_prefix("0x").unwrap_or(hex_code);
    if hex_code.is_empty() {
        return Err(DeployError::MissingBytecode {
            name: name.to_string(),
        });
    }
    if hex_code.contains("__") {
        return Err(DeployError::UnlinkedLibraries {
            name: name.to_string(),
        });
    }
    let bytecode = alloy::hex::decode(hex_code).map_err(|e| DeployError::InvalidArtifact {
        path: path.clone(),
        reason: format!("bytecode: {e}"),
    })?;

    Ok(ContractArtifact {
        name: name.to_string(),
        abi: raw.abi,
        bytecode: bytecode.into(),
        path,
    })
}

impl ContractArtifact {
    /// Creation code with ABI-encoded constructor arguments appended.
    pub fn creation_code(&self, args: &[String]) -> DeployResult<Bytes> {
        let Some(constructor) = &self.abi.constructor else {
            if !args.is_empty() {
                return Err(DeployError::ArgumentCount {
                    name: self.name.clone(),
                    expected: 0,
                    got: args.len(),
                });
            }
            return Ok(self.bytecode.clone());
        };

        if constructor.inputs.len() != args.len() {
            return Err(DeployError::ArgumentCount {
                name: self.name.clone(),
                expected: constructor.inputs.len(),
                got: args.len(),
            });
        }

        let values = constructor
            .inputs
            .iter()
            .zip(args)
            .enumerate()
            .map(|(index, (param, arg))| {
                let argument_err = |reason: String| DeployError::Argument {
                    name: self.name.clone(),
                    index,
                    reason,
                };
                let ty = param.resolve().map_err(|e| argument_err(e.to_string()))?;
                ty.coerce_str(arg).map_err(|e| argument_err(e.to_string()))
            })
            .collect::<DeployResult<Vec<DynSolValue>>>()?;

        let encoded = constructor
            .abi_encode_input(&values)
            .map_err(|e| DeployError::Argument {
                name: self.name.clone(),
                index: 0,
                reason: e.to_string(),
            })?;

        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(&encoded);
        Ok(code.into())
    }
}
