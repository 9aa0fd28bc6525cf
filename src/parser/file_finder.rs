use crate::constants::DUMP_FILE_PATTERN;
use crate::errors::{AppError, AppResult};
use crate::models::EntityKind;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Locates the dump file for an entity kind.
///
/// A path pointing at a file is used as-is. A directory is scanned for files
/// matching the Discogs dump naming scheme
/// (`discogs_<date>_<kind>s.xml` or `discogs_<date>_<kind>s.xml.gz`);
/// when several dump generations are present the lexicographically last name
/// wins, which for the date-stamped scheme is the newest one.
///
/// # Errors
///
/// Returns `InvalidInput` if the path does not exist or no dump file for the
/// requested kind is found in the directory.
pub fn find_dump(input: &Path, kind: EntityKind) -> AppResult<PathBuf> {
    if input.is_file() {
        return Ok(input.to_path_buf());
    }
    if !input.is_dir() {
        return Err(AppError::InvalidInput(format!(
            "Input path {input:?} does not exist"
        )));
    }

    let pattern = Regex::new(DUMP_FILE_PATTERN)?;
    let mut candidates = Vec::new();

    for entry in std::fs::read_dir(input).map_err(AppError::from)? {
        let entry = entry.map_err(AppError::from)?;
        if !entry.file_type().map_err(AppError::from)?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(captures) = pattern.captures(name) {
            if &captures[1] == kind.dump_name() {
                candidates.push(entry.path());
            }
        }
    }

    candidates.sort();
    candidates.pop().ok_or_else(|| {
        AppError::InvalidInput(format!(
            "No {} dump file found in {input:?}",
            kind.dump_name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::File::create(path).unwrap();
    }

    #[test]
    fn test_find_dump_direct_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("whatever.xml");
        touch(&file);
        let found = find_dump(&file, EntityKind::Artist).unwrap();
        assert_eq!(found, file);
    }

    #[test]
    fn test_find_dump_matches_entity_kind() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("discogs_20230801_artists.xml.gz"));
        touch(&temp_dir.path().join("discogs_20230801_labels.xml.gz"));
        touch(&temp_dir.path().join("notes.txt"));

        let found = find_dump(temp_dir.path(), EntityKind::Label).unwrap();
        assert_eq!(
            found.file_name().unwrap().to_str().unwrap(),
            "discogs_20230801_labels.xml.gz"
        );
    }

    #[test]
    fn test_find_dump_prefers_newest_generation() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("discogs_20230701_releases.xml.gz"));
        touch(&temp_dir.path().join("discogs_20230801_releases.xml.gz"));

        let found = find_dump(temp_dir.path(), EntityKind::Release).unwrap();
        assert_eq!(
            found.file_name().unwrap().to_str().unwrap(),
            "discogs_20230801_releases.xml.gz"
        );
    }

    #[test]
    fn test_find_dump_accepts_uncompressed_xml() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("discogs_20230801_masters.xml"));
        let found = find_dump(temp_dir.path(), EntityKind::Master).unwrap();
        assert!(found.to_str().unwrap().ends_with("masters.xml"));
    }

    #[test]
    fn test_find_dump_missing_kind_errors() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("discogs_20230801_artists.xml.gz"));
        assert!(find_dump(temp_dir.path(), EntityKind::Release).is_err());
    }

    #[test]
    fn test_find_dump_nonexistent_path_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        assert!(find_dump(&missing, EntityKind::Artist).is_err());
    }
}
