//! Print the document hierarchy.

use clap::Args;

use leadvault_client::{DocumentSync, HttpDocumentStore};
use leadvault_core::error::AppError;
use leadvault_entity::folder::Folder;
use leadvault_tree::navigation::ROOT_CRUMB_LABEL;

use crate::output::{self, OutputFormat};

/// Arguments for the tree command
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Max depth
    #[arg(short, long, default_value = "6")]
    pub depth: u32,
}

/// Execute the tree command
pub async fn execute(
    args: &TreeArgs,
    sync: &DocumentSync<HttpDocumentStore>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let tree = sync.load().await?;
    match format {
        OutputFormat::Json => output::print_item(&tree, format),
        OutputFormat::Table => {
            let root = tree.root();
            println!(
                "{}/ ({} files, {})",
                ROOT_CRUMB_LABEL,
                root.file_count,
                output::format_size(root.total_size_bytes)
            );
            render(root, 0, args.depth);
        }
    }
    Ok(())
}

fn render(folder: &Folder, depth: u32, max_depth: u32) {
    if depth >= max_depth {
        return;
    }
    let indent = "  ".repeat(depth as usize + 1);
    for file in &folder.files {
        println!(
            "{indent}{} ({})",
            file.name,
            output::format_size(file.size_bytes)
        );
    }
    for child in &folder.subfolders {
        println!(
            "{indent}├── {}/ ({} files, {})",
            child.name,
            child.file_count,
            output::format_size(child.total_size_bytes)
        );
        render(child, depth + 1, max_depth);
    }
}
