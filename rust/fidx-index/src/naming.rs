use std::path::{Path, PathBuf};

use fidx_common::{Result, error::Error, verify_arg};

/// Extension shared by all index files.
pub const INDEX_FILE_EXTENSION: &str = "fidx";

/// Returns the index file name for `source` and `index_name`:
/// `{source stem}.{index_name}.fidx`.
///
/// The index name becomes part of a file name, so it must be non-empty and must
/// not contain path separators or NUL.
pub fn index_file_name(source: &Path, index_name: &str) -> Result<String> {
    verify_arg!(index_name, !index_name.is_empty());
    verify_arg!(
        index_name,
        !index_name.contains(['/', '\\', '\0']) && index_name != "." && index_name != ".."
    );

    let stem = source
        .file_stem()
        .ok_or_else(|| {
            Error::invalid_arg(
                "source",
                format!("'{}' has no file name", source.display()),
            )
        })?
        .to_string_lossy();
    Ok(format!("{stem}.{index_name}.{INDEX_FILE_EXTENSION}"))
}

/// Resolves the full index file path: inside `index_dir` when given, otherwise
/// next to the source file.
pub(crate) fn index_file_path(
    source: &Path,
    index_name: &str,
    index_dir: Option<&Path>,
) -> Result<PathBuf> {
    let file_name = index_file_name(source, index_name)?;
    let dir = match index_dir {
        Some(dir) => dir,
        None => source.parent().unwrap_or(Path::new("")),
    };
    Ok(dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{index_file_name, index_file_path};

    #[test]
    fn test_index_file_name() {
        assert_eq!(
            index_file_name(Path::new("Apex_BB_Boys_Mites.csv"), "TeamName").unwrap(),
            "Apex_BB_Boys_Mites.TeamName.fidx"
        );
        assert_eq!(
            index_file_name(Path::new("/data/archive.2024.csv"), "Id").unwrap(),
            "archive.2024.Id.fidx"
        );
        assert_eq!(
            index_file_name(Path::new("noext"), "Id").unwrap(),
            "noext.Id.fidx"
        );
    }

    #[test]
    fn test_index_name_must_be_file_safe() {
        let source = Path::new("teams.csv");
        for name in ["", "a/b", "a\\b", "..", ".", "nul\0"] {
            let err = index_file_name(source, name).unwrap_err();
            assert!(!err.is_io(), "{name:?}");
        }
        assert!(index_file_name(Path::new("/"), "Team").is_err());
    }

    #[test]
    fn test_index_file_path() {
        assert_eq!(
            index_file_path(Path::new("/data/teams.csv"), "Team", None).unwrap(),
            PathBuf::from("/data/teams.Team.fidx")
        );
        assert_eq!(
            index_file_path(Path::new("teams.csv"), "Team", None).unwrap(),
            PathBuf::from("teams.Team.fidx")
        );
        assert_eq!(
            index_file_path(
                Path::new("/data/teams.csv"),
                "Team",
                Some(Path::new("/indexes"))
            )
            .unwrap(),
            PathBuf::from("/indexes/teams.Team.fidx")
        );
    }
}
