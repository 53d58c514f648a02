use std::path::{Path, PathBuf};
use std::{fs, io};

/// Reads a fixture file, panicking with the path on failure. Test-only helper.
pub fn read_file<P: AsRef<Path>>(file_name: P) -> String {
    fs::read_to_string(&file_name)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", file_name.as_ref().display()))
}

/// Collects every file under `root` with extension `ext`, returned without the
/// extension and sorted, so `cases/a.csv` yields `cases/a` and its sibling
/// `cases/a.out` can be found by the caller.
pub fn find(root: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    let wanted = ext.trim_start_matches('.');
    let mut res = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().and_then(|e| e.to_str()) == Some(wanted) {
                res.push(path.with_extension(""));
            }
        }
    }

    res.sort();
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_strips_extension() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../test_cases");
        let cases = find(&root, ".csv").unwrap();
        assert!(!cases.is_empty());
        for case in cases {
            assert!(case.extension().is_none(), "{}", case.display());
            assert!(case.with_extension("out").exists(), "{} has no .out", case.display());
        }
    }

    #[test]
    fn test_find_missing_root() {
        assert!(find(Path::new("no/such/dir"), "csv").is_err());
    }
}
