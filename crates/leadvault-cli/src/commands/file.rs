//! File management CLI commands.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use leadvault_client::{DocumentSync, HttpDocumentStore};
use leadvault_core::error::AppError;
use leadvault_entity::file::UploadFile;
use leadvault_entity::intent::DocumentIntent;

use crate::commands::{parse_file_id, parse_folder_id};
use crate::output::{self, OutputFormat};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List files in a folder
    List {
        /// Folder ID (omit for the record root)
        #[arg(short, long)]
        folder_id: Option<String>,
    },
    /// Register local files for upload (metadata only)
    Upload {
        /// Destination folder ID (omit for the record root)
        #[arg(short, long)]
        folder_id: Option<String>,
        /// Local files to read metadata from
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Delete a file
    Delete {
        /// File ID
        #[arg(short, long)]
        file_id: String,
    },
    /// Move a file to another folder
    Move {
        /// File ID
        #[arg(short, long)]
        file_id: String,
        /// Destination folder ID (omit for the record root)
        #[arg(short, long)]
        destination_id: Option<String>,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// File ID
    id: String,
    /// Name
    name: String,
    /// MIME type
    mime_type: String,
    /// Size
    size: String,
    /// Last modified
    last_modified: String,
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    sync: &DocumentSync<HttpDocumentStore>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let tree = sync.load().await?;

    match &args.command {
        FileCommand::List { folder_id } => {
            let folder_id = match folder_id {
                Some(raw) => parse_folder_id(raw)?,
                None => tree.root_id(),
            };
            let folder = tree.resolve(folder_id)?;
            let rows: Vec<FileRow> = folder
                .files
                .iter()
                .map(|f| FileRow {
                    id: f.id.to_string(),
                    name: f.name.clone(),
                    mime_type: f.mime_type.clone().unwrap_or_else(|| "-".to_string()),
                    size: output::format_size(f.size_bytes),
                    last_modified: f.last_modified.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        FileCommand::Upload { folder_id, paths } => {
            let folder_id = match folder_id {
                Some(raw) => parse_folder_id(raw)?,
                None => tree.root_id(),
            };
            let files = paths
                .iter()
                .map(|p| upload_from_path(p))
                .collect::<Result<Vec<_>, _>>()?;
            let tree = tree.upload_files(folder_id, &files)?;
            sync.commit(&tree, &DocumentIntent::UploadFiles { folder_id, files })
                .await?;
            output::print_success(&format!("{} file(s) registered for upload", paths.len()));
        }
        FileCommand::Delete { file_id } => {
            let file_id = parse_file_id(file_id)?;
            let tree = tree.delete_file(file_id);
            sync.commit(&tree, &DocumentIntent::DeleteFile { file_id })
                .await?;
            output::print_success("File deleted");
        }
        FileCommand::Move {
            file_id,
            destination_id,
        } => {
            let file_id = parse_file_id(file_id)?;
            let destination_id = match destination_id {
                Some(raw) => parse_folder_id(raw)?,
                None => tree.root_id(),
            };
            let tree = tree.move_file(file_id, destination_id)?;
            sync.commit(
                &tree,
                &DocumentIntent::MoveFile {
                    file_id,
                    destination_id,
                },
            )
            .await?;
            output::print_success("File moved");
        }
    }

    Ok(())
}

/// Read upload metadata from a local file. Content never leaves disk;
/// the persistence collaborator transfers bytes out of band.
fn upload_from_path(path: &Path) -> Result<UploadFile, AppError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| AppError::invalid_operation(format!("Cannot read {}: {e}", path.display())))?;
    if !metadata.is_file() {
        return Err(AppError::invalid_operation(format!(
            "{} is not a file",
            path.display()
        )));
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            AppError::invalid_name(format!("{} has no usable file name", path.display()))
        })?
        .to_string();
    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string());
    let last_modified = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());
    Ok(UploadFile {
        name,
        mime_type,
        size_bytes: metadata.len(),
        last_modified,
    })
}
