//! Build-script entry point.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::emit::EmitOptions;
use crate::error::GenerateError;
use crate::host::CargoHost;
use crate::pipeline::run_pass;
use crate::scanner::scan_directory;
use crate::semantic::{Markers, SourceModel};

/// Builder for configuring and running the DTO generator.
pub struct DtoGenerator {
    scan_paths: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    crate_name: String,
    runtime_path: String,
    dto_derives: Vec<String>,
    markers: Markers,
    rerun_if_changed: bool,
}

/// What a [`DtoGenerator::run`] call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub entities: usize,
    pub mappers: usize,
    pub diagnostics: usize,
    /// Artifact files whose content changed.
    pub written: Vec<PathBuf>,
}

impl DtoGenerator {
    /// Create a new generator with default settings.
    pub fn new() -> Self {
        Self {
            scan_paths: Vec::new(),
            out_dir: None,
            crate_name: "crate".to_string(),
            runtime_path: "::dtogen".to_string(),
            dto_derives: vec!["Debug".to_string(), "Clone".to_string(), "PartialEq".to_string()],
            markers: Markers::default(),
            rerun_if_changed: true,
        }
    }

    /// Add a path to scan for entity definitions.
    ///
    /// Can be called multiple times to scan multiple directories. Module
    /// paths are computed relative to the scan path a file was found under;
    /// a file reached through several overlapping paths is scanned only for
    /// the first of them.
    pub fn scan_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scan_paths.push(path.into());
        self
    }

    /// Set the directory the artifacts are written to.
    ///
    /// Default: `$OUT_DIR`
    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    /// Set the crate name used as the root of entity paths.
    ///
    /// Default: `crate`
    pub fn crate_name(mut self, name: impl Into<String>) -> Self {
        self.crate_name = name.into();
        self
    }

    /// Set the path of the crate providing `ToDto`.
    ///
    /// Default: `::dtogen`
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Replace the derives placed on every generated transfer struct.
    ///
    /// Default: `Debug, Clone, PartialEq`
    pub fn dto_derives<I, S>(mut self, derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dto_derives = derives.into_iter().map(Into::into).collect();
        self
    }

    /// Set the name of the marker trait selecting entities.
    ///
    /// Default: `Entity`
    pub fn entity_marker(mut self, name: impl Into<String>) -> Self {
        self.markers.entity = name.into();
        self
    }

    /// Set the attribute excluding a field from the transfer struct.
    ///
    /// Default: `no_dto`
    pub fn exclude_marker(mut self, name: impl Into<String>) -> Self {
        self.markers.exclude = name.into();
        self
    }

    /// Whether to print `cargo::rerun-if-changed` for every scan path.
    ///
    /// Default: `true`
    pub fn rerun_if_changed(mut self, enabled: bool) -> Self {
        self.rerun_if_changed = enabled;
        self
    }

    /// Run the generator.
    ///
    /// This scans all configured paths, discovers entities, writes both
    /// artifacts and forwards diagnostics to Cargo.
    pub fn run(self) -> Result<GenerationSummary> {
        // Default to scanning "src/" if no paths specified
        let scan_paths = if self.scan_paths.is_empty() {
            vec![PathBuf::from("src/")]
        } else {
            self.scan_paths
        };

        let out_dir = match self.out_dir {
            Some(dir) => dir,
            None => env::var_os("OUT_DIR").map(PathBuf::from).ok_or(GenerateError::MissingOutDir)?,
        };

        let options = EmitOptions::new(&self.dto_derives, &self.runtime_path)?;

        let mut files = Vec::new();
        let mut seen = HashSet::new();
        for path in &scan_paths {
            let scanned =
                scan_directory(path, &self.crate_name).with_context(|| format!("Failed to scan {}", path.display()))?;
            for file in scanned {
                let key = fs::canonicalize(&file.path).unwrap_or_else(|_| file.path.clone());
                if seen.insert(key) {
                    files.push(file);
                } else {
                    log::debug!("{} was already scanned", file.path.display());
                }
            }
        }

        let model = SourceModel::new(files, &self.crate_name, self.markers);

        let mut host = CargoHost::new(out_dir);
        if self.rerun_if_changed {
            for path in &scan_paths {
                host.rerun_if_changed(path);
            }
        }

        let pass = run_pass(&model, &options, &mut host)?;

        let summary = GenerationSummary {
            entities: pass.entities.len(),
            mappers: pass.mapper_count,
            diagnostics: pass.diagnostics.len(),
            written: host.written().to_vec(),
        };

        if !summary.written.is_empty() {
            eprintln!(
                "dtogen-build: {} entities, {} mappers, {} diagnostics",
                summary.entities, summary.mappers, summary.diagnostics
            );
        }

        Ok(summary)
    }
}

impl Default for DtoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DTO_ARTIFACT, MAPPER_ARTIFACT};
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/lib.rs", "pub mod domain;\n");
        write(
            dir.path(),
            "src/domain/mod.rs",
            "pub mod person;\n\npub trait Aggregate: dtogen::Entity {}\n",
        );
        write(
            dir.path(),
            "src/domain/person.rs",
            r#"
            #[derive(dtogen::Entity)]
            pub struct Person {
                pub id: i32,
                #[no_dto]
                pub age: i32,
            }

            pub struct Order {
                pub id: u64,
            }

            impl super::Aggregate for Order {}
            "#,
        );
        dir
    }

    #[test]
    fn test_run_writes_artifacts() {
        let dir = project();
        let out = dir.path().join("out");

        let summary = DtoGenerator::new()
            .scan_path(dir.path().join("src"))
            .out_dir(&out)
            .rerun_if_changed(false)
            .run()
            .unwrap();

        assert_eq!(summary.entities, 2);
        assert_eq!(summary.mappers, 2);
        assert_eq!(summary.diagnostics, 0);
        assert_eq!(summary.written.len(), 2);

        let mappers = fs::read_to_string(out.join(format!("{MAPPER_ARTIFACT}.rs"))).unwrap();
        assert!(mappers.contains("crate::domain::person::Person"));
        assert!(mappers.contains("crate::domain::person::Order"));

        let dtos = fs::read_to_string(out.join(format!("{DTO_ARTIFACT}.rs"))).unwrap();
        assert!(dtos.contains("pub struct PersonDto"));
        assert!(!dtos.contains("age"));
    }

    #[test]
    fn test_second_run_writes_nothing() {
        let dir = project();
        let out = dir.path().join("out");
        let generator = || {
            DtoGenerator::new()
                .scan_path(dir.path().join("src"))
                .out_dir(&out)
                .rerun_if_changed(false)
        };

        generator().run().unwrap();
        let first = fs::read_to_string(out.join(format!("{DTO_ARTIFACT}.rs"))).unwrap();

        let summary = generator().run().unwrap();
        assert!(summary.written.is_empty());
        assert_eq!(fs::read_to_string(out.join(format!("{DTO_ARTIFACT}.rs"))).unwrap(), first);
    }

    #[test]
    fn test_custom_markers_and_derives() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "src/lib.rs",
            r#"
            pub struct Account {
                pub id: u64,
                #[hidden]
                pub password: String,
                #[no_dto]
                pub region: String,
            }

            impl DomainEntity for Account {}
            "#,
        );
        let out = dir.path().join("out");

        let summary = DtoGenerator::new()
            .scan_path(dir.path().join("src"))
            .out_dir(&out)
            .crate_name("bank")
            .runtime_path("bank_runtime")
            .dto_derives(["Debug", "serde::Serialize"])
            .entity_marker("DomainEntity")
            .exclude_marker("hidden")
            .rerun_if_changed(false)
            .run()
            .unwrap();
        assert_eq!(summary.entities, 1);

        let dtos = syn::parse_file(&fs::read_to_string(out.join(format!("{DTO_ARTIFACT}.rs"))).unwrap()).unwrap();
        let syn::Item::Struct(account) = &dtos.items[0] else {
            panic!("expected struct");
        };
        let fields: Vec<_> = account.fields.iter().map(|f| f.ident.as_ref().unwrap().to_string()).collect();
        assert_eq!(fields, ["id", "region"]);

        let mappers = fs::read_to_string(out.join(format!("{MAPPER_ARTIFACT}.rs"))).unwrap();
        assert!(mappers.contains("impl bank_runtime::ToDto for bank::Account"));
    }

    #[test]
    fn test_overlapping_scan_paths_scan_each_file_once() {
        let dir = project();
        let out = dir.path().join("out");

        let summary = DtoGenerator::new()
            .scan_path(dir.path().join("src"))
            .scan_path(dir.path().join("src/domain"))
            .out_dir(&out)
            .rerun_if_changed(false)
            .run()
            .unwrap();

        assert_eq!(summary.entities, 2);
        assert_eq!(summary.diagnostics, 0);

        let mappers = fs::read_to_string(out.join(format!("{MAPPER_ARTIFACT}.rs"))).unwrap();
        assert_eq!(mappers.matches("impl ").count(), 2);
        assert!(mappers.contains("crate::domain::person::Person"));
    }

    #[test]
    fn test_invalid_derive_is_rejected() {
        let dir = project();
        let result = DtoGenerator::new()
            .scan_path(dir.path().join("src"))
            .out_dir(dir.path().join("out"))
            .dto_derives(["not a path"])
            .rerun_if_changed(false)
            .run();

        assert!(result.is_err());
    }
}
