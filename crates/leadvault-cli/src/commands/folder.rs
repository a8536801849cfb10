//! Folder management CLI commands.

use clap::{Args, Subcommand};
use dialoguer::Confirm;

use leadvault_client::{DocumentSync, HttpDocumentStore};
use leadvault_core::error::AppError;
use leadvault_entity::intent::DocumentIntent;

use crate::commands::parse_folder_id;
use crate::output;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Create a new folder
    Create {
        /// Folder name
        #[arg(short, long)]
        name: String,
        /// Parent folder ID (omit for the record root)
        #[arg(short, long)]
        parent_id: Option<String>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        #[arg(short, long)]
        folder_id: String,
        /// New name
        #[arg(short, long)]
        name: String,
    },
    /// Move a folder under a new parent
    Move {
        /// Folder ID
        #[arg(short, long)]
        folder_id: String,
        /// New parent folder ID (omit for the record root)
        #[arg(short, long)]
        new_parent_id: Option<String>,
    },
    /// Delete a folder and its entire subtree
    Delete {
        /// Folder ID
        #[arg(short, long)]
        folder_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    sync: &DocumentSync<HttpDocumentStore>,
) -> Result<(), AppError> {
    let tree = sync.load().await?;

    match &args.command {
        FolderCommand::Create { name, parent_id } => {
            let parent_id = match parent_id {
                Some(raw) => parse_folder_id(raw)?,
                None => tree.root_id(),
            };
            let tree = tree.create_folder(parent_id, name)?;
            sync.commit(
                &tree,
                &DocumentIntent::CreateFolder {
                    parent_id,
                    name: name.trim().to_string(),
                },
            )
            .await?;
            output::print_success(&format!("Folder '{}' created", name.trim()));
        }
        FolderCommand::Rename { folder_id, name } => {
            let folder_id = parse_folder_id(folder_id)?;
            let tree = tree.rename_folder(folder_id, name)?;
            sync.commit(
                &tree,
                &DocumentIntent::RenameFolder {
                    folder_id,
                    name: name.trim().to_string(),
                },
            )
            .await?;
            output::print_success(&format!("Folder renamed to '{}'", name.trim()));
        }
        FolderCommand::Move {
            folder_id,
            new_parent_id,
        } => {
            let folder_id = parse_folder_id(folder_id)?;
            let new_parent_id = match new_parent_id {
                Some(raw) => parse_folder_id(raw)?,
                None => tree.root_id(),
            };
            let tree = tree.move_folder(folder_id, new_parent_id)?;
            sync.commit(
                &tree,
                &DocumentIntent::MoveFolder {
                    folder_id,
                    new_parent_id,
                },
            )
            .await?;
            output::print_success("Folder moved");
        }
        FolderCommand::Delete { folder_id, yes } => {
            let folder_id = parse_folder_id(folder_id)?;
            let folder = tree.resolve(folder_id)?;
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Delete folder '{}' ({})? This removes its entire subtree",
                        folder.name,
                        output::format_size(folder.total_size_bytes)
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
                if !confirmed {
                    println!("Aborted.");
                    return Ok(());
                }
            }
            let tree = tree.delete_folder(folder_id)?;
            sync.commit(&tree, &DocumentIntent::DeleteFolder { folder_id })
                .await?;
            output::print_success("Folder deleted");
        }
    }

    Ok(())
}
