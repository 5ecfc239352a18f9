//! The markdown-conversion seam.
//!
//! Turning an arbitrary file into `(title, markdown text)` is a collaborator
//! concern; the pipeline only depends on the [`MarkdownConvert`] trait so any
//! converter can be swapped in without touching the wiring.

use std::io;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read `{path}`")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unsupported file type: `{path}`")]
    UnsupportedFileType { path: PathBuf },
    #[cfg(feature = "pdf")]
    #[error("failed to parse PDF `{path}`: {message}")]
    Pdf { path: PathBuf, message: String },
}

/// Result of converting one file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Converted {
    pub title: String,
    pub content: String,
}

/// Converts a file into a `(title, markdown text)` pair.
pub trait MarkdownConvert {
    fn convert(&self, path: &Path) -> Result<Converted, ConvertError>;
}

/// Built-in converter.
///
/// Handles `.md`/`.markdown` (title from the first H1 heading, falling back
/// to the file stem) and `.txt` (title from the file stem). With the `pdf`
/// feature enabled, `.pdf` files are converted through text extraction.
/// Anything else fails with [`ConvertError::UnsupportedFileType`].
#[derive(Debug, Default)]
pub struct BuiltinConverter;

impl MarkdownConvert for BuiltinConverter {
    fn convert(&self, path: &Path) -> Result<Converted, ConvertError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md" | "markdown") => {
                let content = read_file(path)?;
                let title = first_heading(&content).unwrap_or_else(|| file_stem(path));
                Ok(Converted { title, content })
            }
            Some("txt") => {
                let content = read_file(path)?;
                Ok(Converted {
                    title: file_stem(path),
                    content,
                })
            }
            #[cfg(feature = "pdf")]
            Some("pdf") => {
                let content =
                    pdf_extract::extract_text(path).map_err(|e| ConvertError::Pdf {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                Ok(Converted {
                    title: file_stem(path),
                    content,
                })
            }
            _ => Err(ConvertError::UnsupportedFileType {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn read_file(path: &Path) -> Result<String, ConvertError> {
    std::fs::read_to_string(path).map_err(|source| ConvertError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Text of the first H1 heading in the markdown, if any.
fn first_heading(content: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut text = String::new();
    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let title = text.trim().to_string();
                if title.is_empty() {
                    return None;
                }
                return Some(title);
            }
            Event::Text(t) | Event::Code(t) if in_h1 => text.push_str(&t),
            _ => {}
        }
    }
    None
}
