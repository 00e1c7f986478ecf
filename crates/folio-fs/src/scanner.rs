use std::fs;
use std::path::{Path, PathBuf};

use crate::io::FsError;

fn is_hidden(path: &Path) -> bool {
  path.file_name().is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Subdirectorios directos de `root`, ordenados por nombre.
///
/// Ignora los directorios ocultos (`.git`, `.github`, ...).
pub fn list_dirs(root: &Path) -> Result<Vec<PathBuf>, FsError> {
  let mut dirs = Vec::new();

  for entry in fs::read_dir(root)? {
    let path = entry?.path();
    if path.is_dir() && !is_hidden(&path) {
      dirs.push(path);
    }
  }

  dirs.sort();
  Ok(dirs)
}

/// Archivos directos de `dir` con extensión `ext`, ordenados por nombre.
///
/// Un directorio inexistente no es un error: devuelve lista vacía.
pub fn list_files_with_ext(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, FsError> {
  if !dir.is_dir() {
    return Ok(Vec::new());
  }

  let mut files = Vec::new();
  for entry in fs::read_dir(dir)? {
    let path = entry?.path();
    if path.is_file() && path.extension().is_some_and(|e| e == ext) {
      files.push(path);
    }
  }

  files.sort();
  Ok(files)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  fn names(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect()
  }

  #[test]
  fn test_list_dirs_sorted_without_hidden() {
    let tmp = tempdir().unwrap();
    for dir in ["haydn-m-missa", ".github", "caldara-te-deum", "albrechtsberger-ave"] {
      fs::create_dir(tmp.path().join(dir)).unwrap();
    }
    fs::write(tmp.path().join("README.md"), "").unwrap();

    let dirs = list_dirs(tmp.path()).unwrap();
    assert_eq!(names(&dirs), ["albrechtsberger-ave", "caldara-te-deum", "haydn-m-missa"]);
  }

  #[test]
  fn test_list_files_with_ext() {
    let tmp = tempdir().unwrap();
    for file in ["vl2.ly", "full_score.ly", "vl1.ly", "notes.txt"] {
      fs::write(tmp.path().join(file), "").unwrap();
    }

    let files = list_files_with_ext(tmp.path(), "ly").unwrap();
    assert_eq!(names(&files), ["full_score.ly", "vl1.ly", "vl2.ly"]);
    assert!(list_files_with_ext(&tmp.path().join("missing"), "ly").unwrap().is_empty());
  }
}
