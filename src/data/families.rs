// families.rs - Discovery of per-family protein alignment files

use std::path::{Path, PathBuf};

use regex::Regex;

/// A gene family and the path of its protein alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyFile {
    pub name: String,
    pub path: PathBuf,
}

/// List alignment files with the given extension in a directory, sorted by
/// family name. The family name is the file stem.
pub fn discover_families(
    msa_dir: &Path,
    extension: &str,
    include: Option<&Regex>,
    exclude: Option<&Regex>,
) -> Result<Vec<FamilyFile>, String> {
    let entries = std::fs::read_dir(msa_dir)
        .map_err(|e| format!("Failed to read alignment directory '{}': {}", msa_dir.display(), e))?;

    let mut families = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();

        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some(extension) {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| format!("Invalid filename: {}", path.display()))?
            .to_string();

        families.push(FamilyFile { name, path });
    }

    if let Some(include_regex) = include {
        families.retain(|family| include_regex.is_match(&family.name));
    }
    if let Some(exclude_regex) = exclude {
        families.retain(|family| !exclude_regex.is_match(&family.name));
    }

    families.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(families)
}
