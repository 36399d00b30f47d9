//! Data-directory backup before an upgrade.
//!
//! The installer is free to migrate or clobber the application's local data,
//! so when the user asks for a backup the orchestrator archives the whole
//! data directory first — and treats a failed archive as fatal for the run.
//! Proceeding without the backup the user asked for is never an option.
//!
//! The archive is a zip of the entire data tree, named
//! `<YYYY_MM_DD>_<product>.zip` and written next to the downloaded installer.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::constants::PRODUCT_TAG;
use crate::core::UpdateError;

/// Archives the application data directory.
pub struct BackupManager<'a> {
    data_path: &'a Path,
    destination: &'a Path,
}

impl<'a> BackupManager<'a> {
    /// Manager that archives `data_path` into `destination`.
    #[must_use]
    pub const fn new(data_path: &'a Path, destination: &'a Path) -> Self {
        Self {
            data_path,
            destination,
        }
    }

    /// Create the dated archive and return its path.
    ///
    /// # Errors
    ///
    /// [`UpdateError::Backup`] when the data directory is missing or any part
    /// of walking, reading, or writing the archive fails.
    pub fn create_archive(&self) -> Result<PathBuf, UpdateError> {
        if !self.data_path.is_dir() {
            return Err(UpdateError::Backup {
                message: format!("data directory {} does not exist", self.data_path.display()),
            });
        }

        let archive_path = self.destination.join(format!(
            "{}_{PRODUCT_TAG}.zip",
            Local::now().format("%Y_%m_%d")
        ));

        let file = File::create(&archive_path).map_err(|e| UpdateError::Backup {
            message: format!("creating {}: {e}", archive_path.display()),
        })?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in WalkDir::new(self.data_path) {
            let entry = entry.map_err(|e| UpdateError::Backup {
                message: format!("walking {}: {e}", self.data_path.display()),
            })?;
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(self.data_path) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }
            let name = relative.to_string_lossy().replace('\\', "/");

            if entry.file_type().is_dir() {
                zip.add_directory(name.as_str(), options).map_err(|e| UpdateError::Backup {
                    message: format!("archiving {name}: {e}"),
                })?;
            } else if entry.file_type().is_file() {
                debug!("archiving {name}");
                zip.start_file(name.as_str(), options).map_err(|e| UpdateError::Backup {
                    message: format!("archiving {name}: {e}"),
                })?;
                let mut source = File::open(path).map_err(|e| UpdateError::Backup {
                    message: format!("reading {}: {e}", path.display()),
                })?;
                io::copy(&mut source, &mut zip).map_err(|e| UpdateError::Backup {
                    message: format!("archiving {name}: {e}"),
                })?;
            }
        }

        let mut file = zip.finish().map_err(|e| UpdateError::Backup {
            message: format!("finalizing {}: {e}", archive_path.display()),
        })?;
        file.flush().map_err(|e| UpdateError::Backup {
            message: format!("finalizing {}: {e}", archive_path.display()),
        })?;

        info!("backup: {}", archive_path.display());
        Ok(archive_path)
    }
}
