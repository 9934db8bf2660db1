//! Structural input produced by the syntax-analysis service.
//!
//! A source file is analysed from three inputs: its text, a SourceKitten
//! `structure` dump (the nested declaration tree) and, optionally, a
//! SourceKitten `syntax` dump (the flat token stream). The dumps live next
//! to the source file as `<file>.structure.json` and `<file>.syntax.json`.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a source file and its dumps.
#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(taylor::source::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The structure dump is missing.
    #[error("No structure dump found for {path}")]
    #[diagnostic(
        code(taylor::source::missing_structure),
        help("generate it with `sourcekitten structure --file <file> > <file>.structure.json`")
    )]
    MissingStructure {
        /// Source file lacking a dump.
        path: PathBuf,
    },

    /// A dump is not valid JSON of the expected shape.
    #[error("Malformed dump {path}: {source}")]
    #[diagnostic(code(taylor::source::malformed))]
    Malformed {
        /// Path of the dump.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// A node of the declaration tree, keyed the way SourceKitten writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// SourceKit kind identifier.
    #[serde(rename = "key.kind", default)]
    pub kind: String,
    /// Start byte offset.
    #[serde(rename = "key.offset", default)]
    pub offset: usize,
    /// Length in bytes.
    #[serde(rename = "key.length", default)]
    pub length: usize,
    /// Start byte offset of the body.
    #[serde(rename = "key.bodyoffset", default)]
    pub body_offset: usize,
    /// Length of the body in bytes.
    #[serde(rename = "key.bodylength", default)]
    pub body_length: usize,
    /// Declared name.
    #[serde(rename = "key.name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared type name.
    #[serde(rename = "key.typename", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Nested declarations and statements.
    #[serde(rename = "key.substructure", default, skip_serializing_if = "Vec::is_empty")]
    pub substructure: Vec<Declaration>,
}

impl Declaration {
    /// Creates a declaration of `kind` covering `length` bytes from `offset`.
    #[must_use]
    pub fn new(kind: impl Into<String>, offset: usize, length: usize) -> Self {
        Self {
            kind: kind.into(),
            offset,
            length,
            ..Self::default()
        }
    }

    /// Sets the declared name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the declared type name.
    #[must_use]
    pub fn typed(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Sets the body range.
    #[must_use]
    pub fn with_body(mut self, offset: usize, length: usize) -> Self {
        self.body_offset = offset;
        self.body_length = length;
        self
    }

    /// Appends a nested declaration.
    #[must_use]
    pub fn with_child(mut self, child: Declaration) -> Self {
        self.substructure.push(child);
        self
    }
}

/// A lexical token of the syntax map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxToken {
    /// SourceKit syntax kind identifier.
    #[serde(rename = "type")]
    pub kind: String,
    /// Start byte offset.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
}

impl SyntaxToken {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: impl Into<String>, offset: usize, length: usize) -> Self {
        Self {
            kind: kind.into(),
            offset,
            length,
        }
    }
}

/// A source file together with its structural description.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path of the source file.
    pub path: PathBuf,
    /// Full text.
    pub text: String,
    /// Root of the declaration tree.
    pub structure: Declaration,
    /// Token stream ordered by offset.
    pub tokens: Vec<SyntaxToken>,
}

impl SourceFile {
    /// Creates a source file from in-memory parts.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        text: impl Into<String>,
        structure: Declaration,
        tokens: Vec<SyntaxToken>,
    ) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            structure,
            tokens,
        }
    }

    /// Loads the file at `path` and its dumps.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its structure dump cannot be read or
    /// parsed. A missing syntax dump yields an empty token stream.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = read(path)?;

        let structure_path = Self::structure_path(path);
        if !structure_path.is_file() {
            return Err(SourceError::MissingStructure {
                path: path.to_path_buf(),
            });
        }
        let structure = parse_json(&structure_path)?;

        let syntax_path = Self::syntax_path(path);
        let tokens = if syntax_path.is_file() {
            parse_json(&syntax_path)?
        } else {
            debug!("No syntax dump for {}", path.display());
            Vec::new()
        };

        Ok(Self::new(path, text, structure, tokens))
    }

    /// Location of the structure dump for `path`.
    #[must_use]
    pub fn structure_path(path: &Path) -> PathBuf {
        sibling(path, "structure.json")
    }

    /// Location of the syntax dump for `path`.
    #[must_use]
    pub fn syntax_path(path: &Path) -> PathBuf {
        sibling(path, "syntax.json")
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn read(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| SourceError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
