//! Navigation state over a document tree.
//!
//! The navigation path is the only stateful element of the subsystem.
//! Its transitions are `navigate_to`, `navigate_up`, and the forced
//! truncation applied by `reconcile` after a folder on the path is
//! deleted. A dangling path segment never raises; resolution degrades
//! to the deepest surviving ancestor.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use leadvault_core::types::FolderId;
use leadvault_entity::folder::{Breadcrumb, Folder};

use crate::model::DocumentTree;

/// Display label for the root breadcrumb, independent of the stored root
/// folder name.
pub const ROOT_CRUMB_LABEL: &str = "Documents";

/// Where the user currently is in the hierarchy.
///
/// A pure value: every transition returns a new state and leaves the
/// input untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Folder ids from the root to the active folder, root first.
    path: Vec<FolderId>,
    /// Folders currently expanded in a tree-view sidebar.
    expanded: HashSet<FolderId>,
}

impl NavigationState {
    /// Start at the root with nothing expanded.
    pub fn new(root_id: FolderId) -> Self {
        Self {
            path: vec![root_id],
            expanded: HashSet::new(),
        }
    }

    /// The current path, root first. Never empty.
    pub fn path(&self) -> &[FolderId] {
        &self.path
    }

    /// Whether a folder is expanded in the sidebar.
    pub fn is_expanded(&self, folder_id: FolderId) -> bool {
        self.expanded.contains(&folder_id)
    }

    /// Resolve the active folder by walking the path from the root
    /// through child lookups.
    ///
    /// A segment that no longer resolves (e.g. the folder was deleted)
    /// silently stops the walk: the deepest surviving ancestor becomes
    /// the active folder. This never fails.
    pub fn current_folder<'a>(&self, tree: &'a DocumentTree) -> &'a Folder {
        let mut current = tree.root();
        for id in self.path.iter().skip(1) {
            match current.child(*id) {
                Some(child) => current = child.as_ref(),
                None => break,
            }
        }
        current
    }

    /// Navigate to a folder.
    ///
    /// If `folder_id` already occurs in the path, the path truncates to
    /// end at that occurrence (a breadcrumb jump-back); otherwise
    /// `folder_id` is appended (a drill-down). The asymmetry is what
    /// makes breadcrumb clicks and tree clicks behave differently.
    pub fn navigate_to(&self, folder_id: FolderId) -> Self {
        let mut next = self.clone();
        match next.path.iter().position(|id| *id == folder_id) {
            Some(pos) => next.path.truncate(pos + 1),
            None => next.path.push(folder_id),
        }
        next
    }

    /// Drop the last path element, unless already at the root.
    pub fn navigate_up(&self) -> Self {
        let mut next = self.clone();
        if next.path.len() > 1 {
            next.path.pop();
        }
        next
    }

    /// The breadcrumb trail for the current path.
    ///
    /// The root entry always carries [`ROOT_CRUMB_LABEL`] regardless of
    /// the stored root name; the trail truncates exactly where
    /// [`Self::current_folder`] stops resolving.
    pub fn breadcrumbs(&self, tree: &DocumentTree) -> Vec<Breadcrumb> {
        let current = self.current_folder(tree);
        tree.ancestors_of(current.id)
            .into_iter()
            .enumerate()
            .map(|(i, folder)| Breadcrumb {
                id: folder.id,
                name: if i == 0 {
                    ROOT_CRUMB_LABEL.to_string()
                } else {
                    folder.name.clone()
                },
            })
            .collect()
    }

    /// Flip a folder's sidebar expansion.
    pub fn toggle_expanded(&self, folder_id: FolderId) -> Self {
        let mut next = self.clone();
        if !next.expanded.remove(&folder_id) {
            next.expanded.insert(folder_id);
        }
        next
    }

    /// Re-run path resolution after a structural mutation.
    ///
    /// The path truncates past the first segment that no longer resolves
    /// and dangling ids are pruned from the expansion set. Call this
    /// after `delete_folder` or `move_folder`.
    pub fn reconcile(&self, tree: &DocumentTree) -> Self {
        let mut path = vec![tree.root_id()];
        let mut current = tree.root();
        for id in self.path.iter().skip(1) {
            match current.child(*id) {
                Some(child) => {
                    path.push(child.id);
                    current = child.as_ref();
                }
                None => break,
            }
        }
        let expanded = self
            .expanded
            .iter()
            .copied()
            .filter(|id| tree.contains_folder(*id))
            .collect();
        Self { path, expanded }
    }
}
