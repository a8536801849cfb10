//! CLI command definitions and dispatch.

pub mod browse;
pub mod file;
pub mod folder;
pub mod tree;

use clap::{Parser, Subcommand};

use leadvault_client::{DocumentSync, HttpDocumentStore};
use leadvault_core::config::ClientConfig;
use leadvault_core::error::AppError;
use leadvault_core::types::{FileId, FolderId, RecordId};

use crate::output::OutputFormat;

/// LeadVault — document hierarchy client for CRM records
#[derive(Debug, Parser)]
#[command(name = "leadvault", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Business record whose documents to manage
    #[arg(short, long)]
    pub record_id: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the document hierarchy
    Tree(tree::TreeArgs),
    /// Folder management
    Folder(folder::FolderArgs),
    /// File management
    File(file::FileArgs),
    /// Browse the hierarchy interactively
    Browse,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &ClientConfig) -> Result<(), AppError> {
        let sync = build_sync(config, &self.record_id)?;
        match &self.command {
            Commands::Tree(args) => tree::execute(args, &sync, self.format).await,
            Commands::Folder(args) => folder::execute(args, &sync).await,
            Commands::File(args) => file::execute(args, &sync, self.format).await,
            Commands::Browse => browse::execute(&sync).await,
        }
    }
}

/// Helper: build the sync adapter for one record
fn build_sync(
    config: &ClientConfig,
    record_id: &str,
) -> Result<DocumentSync<HttpDocumentStore>, AppError> {
    let record_id: RecordId = record_id
        .parse()
        .map_err(|e| AppError::invalid_operation(format!("Invalid record id: {e}")))?;
    let store = HttpDocumentStore::new(&config.api)?;
    Ok(DocumentSync::new(store, record_id))
}

/// Helper: parse a folder id argument
pub fn parse_folder_id(raw: &str) -> Result<FolderId, AppError> {
    raw.parse()
        .map_err(|e| AppError::invalid_operation(format!("Invalid folder id: {e}")))
}

/// Helper: parse a file id argument
pub fn parse_file_id(raw: &str) -> Result<FileId, AppError> {
    raw.parse()
        .map_err(|e| AppError::invalid_operation(format!("Invalid file id: {e}")))
}
