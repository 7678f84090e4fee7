//! Artifact Loading and Migration

use crate::schema::{ArtifactFile, SCHEMA_VERSION};
use crate::ArtifactError;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load a frozen artifact from disk, migrating older schema versions.
///
/// Absence of the file is `NotFound` so callers can treat it as a startup
/// failure distinct from corruption. Unknown future versions are rejected
/// rather than guessed at.
pub fn load_artifact(path: &Path) -> Result<ArtifactFile, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.display().to_string()));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| ArtifactError::LoadFailure(format!("{}: {e}", path.display())))?;
    let mut value: Value = serde_json::from_str(&raw)
        .map_err(|e| ArtifactError::LoadFailure(format!("{}: {e}", path.display())))?;

    let version = value
        .get("schema_version")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            ArtifactError::LoadFailure(format!("{}: missing schema_version", path.display()))
        })? as u32;

    match version {
        1 => migrate_v1(&mut value)?,
        SCHEMA_VERSION => {}
        other => {
            return Err(ArtifactError::LoadFailure(format!(
                "{}: unsupported schema_version {other} (current is {SCHEMA_VERSION})",
                path.display()
            )));
        }
    }

    let artifact: ArtifactFile = serde_json::from_value(value)
        .map_err(|e| ArtifactError::LoadFailure(format!("{}: {e}", path.display())))?;

    info!(path = %path.display(), version, "loaded frozen model artifact");
    Ok(artifact)
}

/// v1 classifiers predate `class_names`; v1 labels were always 0/1
fn migrate_v1(value: &mut Value) -> Result<(), ArtifactError> {
    let model = value
        .get_mut("model")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ArtifactError::LoadFailure("v1 artifact has no model object".to_string()))?;

    if model.get("kind").and_then(Value::as_str) == Some("classifier")
        && !model.contains_key("class_names")
    {
        model.insert(
            "class_names".to_string(),
            serde_json::json!(["0", "1"]),
        );
    }

    value["schema_version"] = serde_json::json!(SCHEMA_VERSION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ModelArtifact;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("artifact-test-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    const V2_CLASSIFIER: &str = r#"{
        "schema_version": 2,
        "model": {
            "kind": "classifier",
            "feature_names": ["a"],
            "coefficients": [1.0],
            "intercept": 0.0,
            "class_names": ["low", "high"]
        }
    }"#;

    #[test]
    fn test_load_current_version() {
        let path = write_temp("v2.json", V2_CLASSIFIER);
        let artifact = load_artifact(&path).unwrap();
        assert_eq!(artifact.schema_version, 2);
        match artifact.model {
            ModelArtifact::Classifier(params) => {
                assert_eq!(params.class_names, vec!["low", "high"])
            }
            _ => panic!("expected classifier"),
        }
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_artifact(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }

    #[test]
    fn test_corrupt_file_is_load_failure() {
        let path = write_temp("corrupt.json", "{ not json");
        let err = load_artifact(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::LoadFailure(_)));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_v1_migration_defaults_class_names() {
        let v1 = r#"{
            "schema_version": 1,
            "model": {
                "kind": "classifier",
                "feature_names": ["a"],
                "coefficients": [1.0],
                "intercept": 0.0
            }
        }"#;
        let path = write_temp("v1.json", v1);
        let artifact = load_artifact(&path).unwrap();
        assert_eq!(artifact.schema_version, 2);
        match artifact.model {
            ModelArtifact::Classifier(params) => assert_eq!(params.class_names, vec!["0", "1"]),
            _ => panic!("expected classifier"),
        }
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_future_version_rejected() {
        let v9 = V2_CLASSIFIER.replace("\"schema_version\": 2", "\"schema_version\": 9");
        let path = write_temp("v9.json", &v9);
        let err = load_artifact(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::LoadFailure(_)));
        fs::remove_file(path).ok();
    }
}
