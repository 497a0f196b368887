use crate::index::BuiltIndex;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Bumped whenever the artifact layout changes; a stale cached artifact is
/// rejected at load time instead of being misread.
pub const FORMAT_VERSION: u32 = 1;

/// The serialized index artifact: one self-describing JSON document holding
/// the inverted index and the document store.
#[derive(Debug, Deserialize)]
pub struct Artifact {
    pub version: u32,
    pub created_at: String,
    #[serde(flatten)]
    pub built: BuiltIndex,
}

#[derive(Serialize)]
struct ArtifactRef<'a> {
    version: u32,
    created_at: &'a str,
    #[serde(flatten)]
    built: &'a BuiltIndex,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

pub fn to_json(built: &BuiltIndex, created_at: &str) -> Result<String> {
    let artifact = ArtifactRef {
        version: FORMAT_VERSION,
        created_at,
        built,
    };
    Ok(serde_json::to_string(&artifact)?)
}

/// Parse an artifact, failing closed: an unknown version is an error before
/// any field of the body is interpreted.
pub fn from_json(json: &str) -> Result<BuiltIndex> {
    let probe: VersionProbe =
        serde_json::from_str(json).context("index artifact is not valid JSON")?;
    if probe.version != FORMAT_VERSION {
        bail!(
            "index artifact version {} is not supported (expected {})",
            probe.version,
            FORMAT_VERSION
        );
    }
    let artifact: Artifact = serde_json::from_str(json).context("malformed index artifact")?;
    Ok(artifact.built)
}

pub fn save_artifact(path: &Path, built: &BuiltIndex, created_at: &str) -> Result<()> {
    let json = to_json(built, created_at)?;
    fs::write(path, json).with_context(|| format!("writing index artifact {}", path.display()))?;
    Ok(())
}

pub fn load_artifact(path: &Path) -> Result<BuiltIndex> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading index artifact {}", path.display()))?;
    from_json(&json)
}
