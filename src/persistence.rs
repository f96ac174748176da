use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::{GameError, Grid, MoveRecord, Result, encode_history, to_level_bytes};
use crate::interfaces::LevelStore;

pub const LEVEL_EXTENSION: &str = "sok";
pub const HISTORY_EXTENSION: &str = "dep";

/// Levels and saves kept as plain files in one directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    /// `name` as typed when that file exists, otherwise `name.sok`. Names
    /// must stay inside the levels directory.
    pub fn level_path(&self, name: &str) -> Result<PathBuf> {
        let name = self.check_name(name)?;
        let exact = self.root.join(name);
        if exact.is_file() {
            Ok(exact)
        } else {
            Ok(self.root.join(with_extension(name, LEVEL_EXTENSION)))
        }
    }

    fn save_path(&self, name: &str, extension: &str) -> Result<PathBuf> {
        let name = self.check_name(name)?;
        Ok(self.root.join(with_extension(name, extension)))
    }

    /// A bare file name: no separators, not empty, not `.` or `..`.
    fn check_name<'a>(&self, name: &'a str) -> Result<&'a str> {
        let name = name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(GameError::io(
                self.root.join(name),
                io::Error::new(io::ErrorKind::InvalidInput, "invalid file name"),
            ));
        }
        Ok(name)
    }
}

fn with_extension(name: &str, extension: &str) -> String {
    let suffix = format!(".{extension}");
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

/// Writes through a temporary sibling so readers never see half a file.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, bytes).map_err(|source| GameError::io(&tmp, source))?;
    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        GameError::io(path, source)
    })
}

impl LevelStore for FileStore {
    fn load_level(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.level_path(name)?;
        fs::read(&path).map_err(|source| GameError::io(path, source))
    }

    fn save_level(&self, name: &str, grid: &Grid) -> Result<PathBuf> {
        let path = self.save_path(name, LEVEL_EXTENSION)?;
        write_atomic(&path, &to_level_bytes(grid))?;
        info!(path = %path.display(), "board saved");
        Ok(path)
    }

    fn save_history(&self, name: &str, moves: &[MoveRecord]) -> Result<PathBuf> {
        let path = self.save_path(name, HISTORY_EXTENSION)?;
        write_atomic(&path, &encode_history(moves))?;
        info!(path = %path.display(), moves = moves.len(), "move history saved");
        Ok(path)
    }

    fn list_levels(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|source| GameError::io(&self.root, source))?;
        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|source| GameError::io(&self.root, source))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == LEVEL_EXTENSION) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{Direction, load};

    const LEVEL: &str = "\
############
#@ $ .     #
#          #
#          #
#          #
#          #
#          #
#          #
#          #
#          #
#          #
############
";

    #[test]
    fn loads_by_name_with_or_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("first.sok"), LEVEL).unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.load_level("first").unwrap(), LEVEL.as_bytes());
        assert_eq!(store.load_level("first.sok").unwrap(), LEVEL.as_bytes());
    }

    #[test]
    fn missing_level_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store.load_level("nope").unwrap_err();
        let GameError::Io { path, source } = err else {
            panic!("expected an I/O error");
        };
        assert_eq!(path, dir.path().join("nope.sok"));
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn saved_level_reloads_identically() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let (grid, _) = load(LEVEL.as_bytes()).unwrap();

        let path = store.save_level("mine", &grid).unwrap();
        assert_eq!(path, dir.path().join("mine.sok"));
        let (reloaded, _) = load(&store.load_level("mine").unwrap()).unwrap();
        assert_eq!(reloaded, grid);
        assert!(!dir.path().join("mine.sok.tmp").exists());
    }

    #[test]
    fn history_is_written_one_letter_per_move() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let moves = [
            MoveRecord::step(Direction::Right),
            MoveRecord::push(Direction::Right),
            MoveRecord::step(Direction::Up),
        ];

        let path = store.save_history("run", &moves).unwrap();
        assert_eq!(path, dir.path().join("run.dep"));
        assert_eq!(fs::read(path).unwrap(), b"dDh");
    }

    #[test]
    fn rejects_names_with_separators() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let (grid, _) = load(LEVEL.as_bytes()).unwrap();

        assert!(store.save_level("../escape", &grid).is_err());
        assert!(store.save_level("   ", &grid).is_err());
    }

    #[test]
    fn loading_outside_the_levels_dir_is_refused() {
        let root = tempfile::tempdir().unwrap();
        let levels = root.path().join("levels");
        fs::create_dir(&levels).unwrap();
        fs::write(root.path().join("outside.sok"), LEVEL).unwrap();
        let store = FileStore::new(&levels);

        for name in ["../outside", "../outside.sok", "..", "sub/level", ""] {
            let err = store.load_level(name).unwrap_err();
            let GameError::Io { source, .. } = err else {
                panic!("expected an I/O error for {name:?}");
            };
            assert_eq!(source.kind(), io::ErrorKind::InvalidInput, "{name:?}");
        }
    }

    #[test]
    fn lists_only_level_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.sok"), LEVEL).unwrap();
        fs::write(dir.path().join("a.sok"), LEVEL).unwrap();
        fs::write(dir.path().join("a.dep"), "dd").unwrap();
        fs::create_dir(dir.path().join("dir.sok")).unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.list_levels().unwrap(), vec!["a.sok", "b.sok"]);
    }
}
