//! Interactive browser over a record's document hierarchy.
//!
//! The loop owns the current tree value: every mutation replaces it with
//! the engine's return value and mirrors the intent to the API. A failed
//! commit keeps the optimistic tree; `Refresh` reloads the server
//! snapshot and reconciles the navigation path against it.

use dialoguer::{Confirm, Input, Select};

use leadvault_client::{DocumentSync, HttpDocumentStore};
use leadvault_core::error::AppError;
use leadvault_core::types::{FileId, FolderId};
use leadvault_entity::intent::DocumentIntent;
use leadvault_tree::{DocumentTree, NavigationState};

use crate::output::{self, format_size};

/// Owned snapshot of the active folder, taken per loop turn so that menu
/// handling never borrows the tree it is about to replace.
struct FolderView {
    folder_id: FolderId,
    subfolders: Vec<(FolderId, String)>,
    files: Vec<(FileId, String)>,
    crumbs: Vec<(FolderId, String)>,
}

/// Execute the browse command
pub async fn execute(sync: &DocumentSync<HttpDocumentStore>) -> Result<(), AppError> {
    let mut tree = sync.load().await?;
    let mut nav = NavigationState::new(tree.root_id());

    loop {
        let view = render(&tree, &nav);

        let mut items: Vec<String> = view
            .subfolders
            .iter()
            .map(|(_, name)| format!("Open {name}/"))
            .collect();
        let base = items.len();
        items.extend([
            "Go up".to_string(),
            "Jump to breadcrumb".to_string(),
            "Toggle expanded".to_string(),
            "New folder".to_string(),
            "Delete folder".to_string(),
            "Delete file".to_string(),
            "Move file".to_string(),
            "Refresh".to_string(),
            "Quit".to_string(),
        ]);
        let choice = select("Action", &items)?;

        if choice < base {
            nav = nav.navigate_to(view.subfolders[choice].0);
            continue;
        }
        match choice - base {
            0 => nav = nav.navigate_up(),
            1 => {
                let labels: Vec<String> =
                    view.crumbs.iter().map(|(_, name)| name.clone()).collect();
                let pick = select("Jump to", &labels)?;
                nav = nav.navigate_to(view.crumbs[pick].0);
            }
            2 => {
                if view.subfolders.is_empty() {
                    println!("No subfolders here.");
                    continue;
                }
                let labels: Vec<String> =
                    view.subfolders.iter().map(|(_, name)| name.clone()).collect();
                let pick = select("Toggle expansion of", &labels)?;
                nav = nav.toggle_expanded(view.subfolders[pick].0);
            }
            3 => {
                let name: String = Input::new()
                    .with_prompt("Folder name")
                    .interact_text()
                    .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
                match tree.create_folder(view.folder_id, &name) {
                    Ok(updated) => {
                        tree = updated;
                        let intent = DocumentIntent::CreateFolder {
                            parent_id: view.folder_id,
                            name: name.trim().to_string(),
                        };
                        commit(sync, &tree, &intent).await;
                    }
                    Err(e) => output::print_error(&e.to_string()),
                }
            }
            4 => {
                if view.subfolders.is_empty() {
                    println!("No subfolders here.");
                    continue;
                }
                let labels: Vec<String> =
                    view.subfolders.iter().map(|(_, name)| name.clone()).collect();
                let pick = select("Delete folder", &labels)?;
                let (folder_id, name) = view.subfolders[pick].clone();
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete '{name}' and its entire subtree?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
                if !confirmed {
                    continue;
                }
                match tree.delete_folder(folder_id) {
                    Ok(updated) => {
                        tree = updated;
                        nav = nav.reconcile(&tree);
                        commit(sync, &tree, &DocumentIntent::DeleteFolder { folder_id }).await;
                    }
                    Err(e) => output::print_error(&e.to_string()),
                }
            }
            5 => {
                if view.files.is_empty() {
                    println!("No files here.");
                    continue;
                }
                let labels: Vec<String> = view.files.iter().map(|(_, name)| name.clone()).collect();
                let pick = select("Delete file", &labels)?;
                let file_id = view.files[pick].0;
                tree = tree.delete_file(file_id);
                commit(sync, &tree, &DocumentIntent::DeleteFile { file_id }).await;
            }
            6 => {
                if view.files.is_empty() {
                    println!("No files here.");
                    continue;
                }
                let labels: Vec<String> = view.files.iter().map(|(_, name)| name.clone()).collect();
                let pick = select("Move file", &labels)?;
                let file_id = view.files[pick].0;

                let mut destinations: Vec<(FolderId, String)> =
                    vec![(tree.root_id(), "Documents (root)".to_string())];
                destinations.extend(view.subfolders.iter().cloned());
                let labels: Vec<String> =
                    destinations.iter().map(|(_, name)| name.clone()).collect();
                let pick = select("Move to", &labels)?;
                let destination_id = destinations[pick].0;

                match tree.move_file(file_id, destination_id) {
                    Ok(updated) => {
                        tree = updated;
                        commit(
                            sync,
                            &tree,
                            &DocumentIntent::MoveFile {
                                file_id,
                                destination_id,
                            },
                        )
                        .await;
                    }
                    Err(e) => output::print_error(&e.to_string()),
                }
            }
            7 => {
                tree = sync.load().await?;
                nav = nav.reconcile(&tree);
            }
            _ => break,
        }
    }

    Ok(())
}

/// Print the breadcrumb trail and the active folder's listing, then
/// return an owned view of it.
fn render(tree: &DocumentTree, nav: &NavigationState) -> FolderView {
    let crumbs = nav.breadcrumbs(tree);
    let trail: Vec<&str> = crumbs.iter().map(|c| c.name.as_str()).collect();
    println!("\n{}", trail.join(" / "));

    let current = nav.current_folder(tree);
    for sub in &current.subfolders {
        let marker = if nav.is_expanded(sub.id) { "▾" } else { "▸" };
        println!(
            "  {marker} {}/ ({} files, {})",
            sub.name,
            sub.file_count,
            format_size(sub.total_size_bytes)
        );
        if nav.is_expanded(sub.id) {
            for nested in &sub.subfolders {
                println!("      {}/", nested.name);
            }
        }
    }
    for file in &current.files {
        println!("    {} ({})", file.name, format_size(file.size_bytes));
    }

    FolderView {
        folder_id: current.id,
        subfolders: current
            .subfolders
            .iter()
            .map(|f| (f.id, f.name.clone()))
            .collect(),
        files: current.files.iter().map(|f| (f.id, f.name.clone())).collect(),
        crumbs: crumbs.into_iter().map(|c| (c.id, c.name)).collect(),
    }
}

/// Mirror an intent to the API. A failed commit keeps the optimistic
/// tree; the divergence is resolved by the next refresh.
async fn commit(
    sync: &DocumentSync<HttpDocumentStore>,
    tree: &DocumentTree,
    intent: &DocumentIntent,
) {
    if let Err(e) = sync.commit(tree, intent).await {
        output::print_error(&format!("Not persisted: {e}"));
    }
}

fn select(prompt: &str, items: &[String]) -> Result<usize, AppError> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))
}
