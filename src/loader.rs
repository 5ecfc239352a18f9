//! Loading a folder of files into documents.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::convert::{ConvertError, MarkdownConvert};
use crate::document::Document;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("`{0}` is not a directory")]
    NotADirectory(PathBuf),
    #[error("failed to read directory `{path}`")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Lists the regular files directly inside `dir`, sorted by file name.
///
/// Subdirectories are skipped, not descended into. Fails if `dir` does not
/// exist or is not a directory.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, LoaderError> {
    if !dir.is_dir() {
        return Err(LoaderError::NotADirectory(dir.to_path_buf()));
    }
    let read_dir = |source| LoaderError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir)? {
        let path = entry.map_err(read_dir)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Converts one file into a document.
///
/// `metadata.source` is the file's base name; `metadata.title` comes from
/// the converter.
pub fn build_document(
    path: &Path,
    converter: &impl MarkdownConvert,
) -> Result<Document, LoaderError> {
    let converted = converter.convert(path)?;
    let source = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Document::new(converted.content, source, converted.title))
}

/// Loads every regular file in `dir` as a document.
///
/// Any file the converter rejects fails the whole load.
pub fn load_documents(
    dir: &Path,
    converter: &impl MarkdownConvert,
) -> Result<Vec<Document>, LoaderError> {
    let files = list_files(dir)?;
    debug!(dir = %dir.display(), file_count = files.len(), "Loading documents");
    files
        .iter()
        .map(|path| build_document(path, converter))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::convert::BuiltinConverter;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn lists_only_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.txt", "beta");
        write_file(dir.path(), "a.txt", "alpha");
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        write_file(&dir.path().join("nested"), "c.txt", "skipped");

        let files = list_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            list_files(&missing),
            Err(LoaderError::NotADirectory(_))
        ));
    }

    #[test]
    fn document_count_matches_regular_entries() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "one.txt", "first");
        write_file(dir.path(), "two.md", "# Second\n\ntext");
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let documents = load_documents(dir.path(), &BuiltinConverter).unwrap();
        assert_eq!(documents.len(), 2);
    }

    #[test]
    fn source_is_the_base_name() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "notes.md", "# Title\n\nbody");

        let documents = load_documents(dir.path(), &BuiltinConverter).unwrap();
        assert_eq!(documents[0].metadata.source, "notes.md");
        assert_eq!(documents[0].metadata.title, "Title");
    }

    #[test]
    fn empty_directory_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let documents = load_documents(dir.path(), &BuiltinConverter).unwrap();
        assert!(documents.is_empty());
    }

    #[test]
    fn ten_character_file_becomes_one_chunk() {
        use crate::splitter::RecursiveSplitter;

        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "name.txt", "call me Al");

        let documents = load_documents(dir.path(), &BuiltinConverter).unwrap();
        let chunks = RecursiveSplitter::default().split_documents(&documents);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "call me Al");
        assert_eq!(chunks[0].start_index, Some(0));
        assert_eq!(chunks[0].metadata.source, "name.txt");
    }

    #[test]
    fn unsupported_file_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "ok.txt", "fine");
        write_file(dir.path(), "weird.xyz", "not fine");

        let result = load_documents(dir.path(), &BuiltinConverter);
        assert!(matches!(result, Err(LoaderError::Convert(_))));
    }
}
