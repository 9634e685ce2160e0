//! Output channels receiving generated artifacts and diagnostics.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, Severity};
use crate::model::GeneratedArtifact;

/// Receiver of one generation pass' output.
pub trait GeneratorHost {
    fn publish(&mut self, artifact: &GeneratedArtifact) -> Result<()>;

    fn report_diagnostic(&mut self, diagnostic: &Diagnostic);
}

/// Host for build scripts: writes artifacts to `out_dir` and forwards
/// diagnostics through Cargo's build-script directives.
#[derive(Debug)]
pub struct CargoHost {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl CargoHost {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            written: Vec::new(),
        }
    }

    /// File an artifact is written to.
    pub fn artifact_path(&self, id: &str) -> PathBuf {
        self.out_dir.join(format!("{id}.rs"))
    }

    /// Files whose content changed during this pass.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn rerun_if_changed(&self, path: &Path) {
        println!("cargo::rerun-if-changed={}", path.display());
    }
}

impl GeneratorHost for CargoHost {
    fn publish(&mut self, artifact: &GeneratedArtifact) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create directory {}", self.out_dir.display()))?;

        let path = self.artifact_path(artifact.id);

        // Only write if content has changed (avoids unnecessary recompilation)
        let should_write = match fs::read_to_string(&path) {
            Ok(existing) => existing != artifact.content,
            Err(_) => true,
        };

        if should_write {
            fs::write(&path, &artifact.content).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("dtogen-build: Generated {}", path.display());
            self.written.push(path);
        }

        Ok(())
    }

    fn report_diagnostic(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => println!("cargo::error={diagnostic}"),
            Severity::Warning => println!("cargo::warning={diagnostic}"),
        }
    }
}

/// Host keeping everything in memory.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub artifacts: Vec<GeneratedArtifact>,
    pub diagnostics: Vec<Diagnostic>,
}

impl MemoryHost {
    pub fn artifact(&self, id: &str) -> Option<&GeneratedArtifact> {
        self.artifacts.iter().find(|a| a.id == id)
    }
}

impl GeneratorHost for MemoryHost {
    fn publish(&mut self, artifact: &GeneratedArtifact) -> Result<()> {
        self.artifacts.push(artifact.clone());
        Ok(())
    }

    fn report_diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DTO_ARTIFACT;

    fn artifact(content: &str) -> GeneratedArtifact {
        GeneratedArtifact {
            id: DTO_ARTIFACT,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_cargo_host_skips_unchanged_writes() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");

        let mut host = CargoHost::new(&out_dir);
        host.publish(&artifact("pub struct ADto {}\n")).unwrap();
        assert_eq!(host.written(), [out_dir.join("generated_dto.rs")]);
        assert_eq!(
            fs::read_to_string(out_dir.join("generated_dto.rs")).unwrap(),
            "pub struct ADto {}\n"
        );

        let mut again = CargoHost::new(&out_dir);
        again.publish(&artifact("pub struct ADto {}\n")).unwrap();
        assert!(again.written().is_empty());

        again.publish(&artifact("pub struct BDto {}\n")).unwrap();
        assert_eq!(again.written().len(), 1);
    }

    #[test]
    fn test_memory_host_records_artifacts() {
        let mut host = MemoryHost::default();
        host.publish(&artifact("")).unwrap();
        assert!(host.artifact(DTO_ARTIFACT).is_some());
        assert!(host.artifact("missing").is_none());
    }
}
