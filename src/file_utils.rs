use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed; fails when a non-directory is in the way
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {:?}", path))?;
        Ok(())
    }

    // @generates: Output path for a translated document
    // @params: input_file, output_dir, target_language, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
        extension: &str,
    ) -> PathBuf {
        let stem = Self::file_stem(input_file);
        output_dir
            .as_ref()
            .join(format!("{}.{}.{}", stem, target_language, extension))
    }

    // @returns: File name without its last extension
    pub fn file_stem<P: AsRef<Path>>(path: P) -> String {
        path.as_ref()
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, replacing any previous content
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Source document of a run; never modified after loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Where the document was read from
    pub path: PathBuf,
    /// File stem used to name the outputs
    pub stem: String,
    /// Full UTF-8 content
    pub text: String,
}

impl Document {
    /// Build a document from in-memory text
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            stem: FileManager::file_stem(&path),
            path,
            text: text.into(),
        }
    }

    /// Read a UTF-8 document from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = FileManager::read_to_string(path)?;
        Ok(Self::new(path, text))
    }

    /// Output location for one target language
    pub fn output_path<P: AsRef<Path>>(&self, output_dir: P, target_language: &str) -> PathBuf {
        FileManager::generate_output_path(&self.path, output_dir, target_language, "txt")
    }
}
