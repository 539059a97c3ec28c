use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use fieldgroup_lint::LintConfig;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "fieldgroup.config.yaml";

const MANIFEST_PATTERNS: &[&str] = &["**/*.fields.yaml", "**/*.fields.yml", "**/*.fields.json"];

/// A manifest file with its path and content.
pub struct ManifestFile {
    pub path: String,
    pub content: String,
}

/// Project configuration from fieldgroup.config.yaml.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub lint: LintConfig,
}

/// Read manifest files from a path (file or directory).
///
/// For a directory, `sources` glob patterns (relative to it) come from the
/// already-resolved project config; without them the directory is scanned.
pub fn read_manifest_files(
    input_path: &Path,
    sources: Option<&[String]>,
) -> Result<Vec<ManifestFile>, String> {
    if !input_path.exists() {
        return Err(format!("Path does not exist: {}", input_path.display()));
    }

    if input_path.is_file() {
        return Ok(vec![read_file(input_path)?]);
    }

    if input_path.is_dir() {
        return match sources {
            Some(patterns) if !patterns.is_empty() => read_from_patterns(patterns, input_path),
            _ => scan_directory(input_path),
        };
    }

    Err(format!(
        "Path is neither a file nor a directory: {}",
        input_path.display()
    ))
}

/// Project config for `input_path`: the explicit `--config` file if given,
/// otherwise fieldgroup.config.yaml in the input directory, otherwise defaults.
pub fn read_project_config(
    input_path: &Path,
    explicit: Option<&Path>,
) -> Result<ProjectConfig, String> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    if input_path.is_dir() {
        let config_path = input_path.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return load_config(&config_path);
        }
    }

    Ok(ProjectConfig::default())
}

fn load_config(config_path: &Path) -> Result<ProjectConfig, String> {
    let yaml_content = fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read config {}: {}", config_path.display(), e))?;

    if yaml_content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }

    tracing::debug!(path = %config_path.display(), "loading project config");
    serde_yaml::from_str(&yaml_content).map_err(|e| {
        format!(
            "Invalid YAML config {}: {}",
            config_path.display(),
            e
        )
    })
}

fn read_file(path: &Path) -> Result<ManifestFile, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(ManifestFile {
        path: path.to_string_lossy().replace('\\', "/"),
        content,
    })
}

fn glob_paths(pattern: &Path) -> Result<Vec<PathBuf>, String> {
    let pattern_str = pattern.to_string_lossy().replace('\\', "/");
    let entries = glob::glob(&pattern_str)
        .map_err(|e| format!("Invalid glob pattern '{}': {}", pattern_str, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => return Err(format!("Glob error: {}", e)),
        }
    }
    Ok(paths)
}

fn scan_directory(dir_path: &Path) -> Result<Vec<ManifestFile>, String> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for pattern in MANIFEST_PATTERNS {
        for path in glob_paths(&dir_path.join(pattern))? {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths.sort();

    tracing::debug!(dir = %dir_path.display(), files = paths.len(), "scanned directory");
    paths.iter().map(|p| read_file(p)).collect()
}

fn read_from_patterns(patterns: &[String], base_dir: &Path) -> Result<Vec<ManifestFile>, String> {
    let mut files: Vec<ManifestFile> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for pattern in patterns {
        let mut matched: Vec<PathBuf> = glob_paths(&base_dir.join(pattern))?
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();
        matched.sort();

        if matched.is_empty() {
            tracing::warn!(pattern = %pattern, "source pattern matched no files");
        }

        for path in matched {
            files.push(read_file(&path)?);
        }
    }

    Ok(files)
}
