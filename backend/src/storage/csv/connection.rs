use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

const REFERENCE_SUBSIDIES_FILE: &str = "reference_subsidies.csv";
const PERCENTAGE_BRACKETS_FILE: &str = "percentage_brackets.csv";

/// CsvConnection owns the data directory that holds the reference data tables
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<PathBuf>,
    /// Serializes read-modify-write cycles on the table files
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn reference_subsidies_file_path(&self) -> PathBuf {
        self.base_directory.join(REFERENCE_SUBSIDIES_FILE)
    }

    pub fn percentage_brackets_file_path(&self) -> PathBuf {
        self.base_directory.join(PERCENTAGE_BRACKETS_FILE)
    }

    /// Hold this guard across a read-modify-write of a table file
    pub fn lock_for_write(&self) -> MutexGuard<'_, ()> {
        // files are replaced atomically, so a poisoned lock leaves them intact
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace `path` with `contents` by writing a temp file and renaming it
    pub fn write_atomically(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
