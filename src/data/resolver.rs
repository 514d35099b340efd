use std::path::{Path, PathBuf};

use log::debug;

use super::storage::Storage;

// ---------------------------------------------------------------------------
// PathResolver – first existing match over an ordered list of roots
// ---------------------------------------------------------------------------

/// Finds a base file name under an ordered list of candidate directories.
///
/// A miss is the normal case for a sparse sweep, so it is reported as `None`
/// rather than an error.
pub struct PathResolver<'a> {
    storage: &'a dyn Storage,
    roots: Vec<PathBuf>,
}

impl<'a> PathResolver<'a> {
    pub fn new(storage: &'a dyn Storage, roots: Vec<PathBuf>) -> Self {
        PathResolver { storage, roots }
    }

    /// Working directory first, then its data subdirectory.
    pub fn for_workspace(storage: &'a dyn Storage, work_dir: &Path, data_dir: &str) -> Self {
        Self::new(
            storage,
            vec![work_dir.to_path_buf(), work_dir.join(data_dir)],
        )
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn storage(&self) -> &'a dyn Storage {
        self.storage
    }

    pub fn resolve(&self, base_name: &str) -> Option<PathBuf> {
        let found = self
            .roots
            .iter()
            .map(|root| root.join(base_name))
            .find(|candidate| self.storage.is_file(candidate));
        if found.is_none() {
            debug!("  [MISSING] {base_name}");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::storage::mem::MemStorage;

    fn resolver(storage: &MemStorage) -> PathResolver<'_> {
        PathResolver::for_workspace(storage, Path::new("work"), "data")
    }

    #[test]
    fn finds_file_in_working_directory() {
        let fs = MemStorage::new().with_file("work/run_history.dat", "0 0\n");
        assert_eq!(
            resolver(&fs).resolve("run_history.dat"),
            Some(PathBuf::from("work/run_history.dat"))
        );
    }

    #[test]
    fn falls_back_to_data_subdirectory() {
        let fs = MemStorage::new().with_file("work/data/run_history.dat", "0 0\n");
        assert_eq!(
            resolver(&fs).resolve("run_history.dat"),
            Some(PathBuf::from("work/data/run_history.dat"))
        );
    }

    #[test]
    fn working_directory_wins_when_both_exist() {
        let fs = MemStorage::new()
            .with_file("work/run_history.dat", "0 0\n")
            .with_file("work/data/run_history.dat", "1 1\n");
        assert_eq!(
            resolver(&fs).resolve("run_history.dat"),
            Some(PathBuf::from("work/run_history.dat"))
        );
    }

    #[test]
    fn absent_everywhere_is_none() {
        let fs = MemStorage::new().with_dir("work/data");
        assert_eq!(resolver(&fs).resolve("run_history.dat"), None);
    }

    #[test]
    fn directories_do_not_count_as_matches() {
        let fs = MemStorage::new().with_dir("work/run_history.dat");
        assert_eq!(resolver(&fs).resolve("run_history.dat"), None);
    }

    #[test]
    fn custom_root_order_is_respected() {
        let fs = MemStorage::new()
            .with_file("a/x.dat", "0 0\n")
            .with_file("b/x.dat", "0 0\n");
        let r = PathResolver::new(&fs, vec![PathBuf::from("b"), PathBuf::from("a")]);
        assert_eq!(r.resolve("x.dat"), Some(PathBuf::from("b/x.dat")));
    }
}
