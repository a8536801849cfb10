//! End-to-end tests for the document tree: mutation sequences, aggregate
//! maintenance, structural sharing, and deletion cascades.

use std::sync::Arc;

use chrono::Utc;

use leadvault_core::error::ErrorKind;
use leadvault_core::types::{FolderId, RecordId};
use leadvault_entity::file::UploadFile;
use leadvault_tree::{DocumentTree, NavigationState};

fn upload(name: &str, size_bytes: u64) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        mime_type: Some("application/pdf".to_string()),
        size_bytes,
        last_modified: Utc::now(),
    }
}

fn child_id(tree: &DocumentTree, parent: FolderId, name: &str) -> FolderId {
    tree.resolve(parent)
        .expect("parent resolves")
        .subfolders
        .iter()
        .find(|f| f.name == name)
        .expect("child exists")
        .id
}

/// Root containing F1 (empty) and F2 (one 1 000 000-byte file).
fn two_folder_fixture() -> (DocumentTree, FolderId, FolderId) {
    let tree = DocumentTree::empty(RecordId::new());
    let root = tree.root_id();
    let tree = tree.create_folder(root, "F1").expect("f1");
    let tree = tree.create_folder(root, "F2").expect("f2");
    let f1 = child_id(&tree, root, "F1");
    let f2 = child_id(&tree, root, "F2");
    let tree = tree
        .upload_files(f2, &[upload("x.bin", 1_000_000)])
        .expect("upload");
    (tree, f1, f2)
}

#[test]
fn delete_empty_sibling_leaves_other_aggregates_alone() {
    let (tree, f1, f2) = two_folder_fixture();

    let tree = tree.delete_folder(f1).expect("delete");
    assert_eq!(tree.root().subfolder_count, 1);
    assert_eq!(tree.root().subfolders[0].id, f2);
    assert_eq!(tree.resolve(f2).expect("f2").total_size_bytes, 1_000_000);

    let err = tree.resolve(f1).expect_err("f1 is gone");
    assert_eq!(err.kind, ErrorKind::NotFound);
    tree.validate().expect("invariants hold");
}

#[test]
fn move_file_shifts_aggregates_between_folders() {
    let (tree, f1, f2) = two_folder_fixture();
    let x = tree.resolve(f2).expect("f2").files[0].id;

    let tree = tree.move_file(x, f1).expect("move");

    let f2_folder = tree.resolve(f2).expect("f2");
    assert!(f2_folder.files.iter().all(|f| f.id != x));
    assert_eq!(f2_folder.total_size_bytes, 0);

    let f1_folder = tree.resolve(f1).expect("f1");
    assert_eq!(f1_folder.files.len(), 1);
    assert_eq!(f1_folder.files[0].id, x);
    assert_eq!(f1_folder.files[0].folder_id, f1);
    assert_eq!(f1_folder.total_size_bytes, 1_000_000);

    assert_eq!(tree.root().total_size_bytes, 1_000_000);
    tree.validate().expect("invariants hold");
}

#[test]
fn upload_shares_every_folder_off_the_target_path() {
    let tree = DocumentTree::empty(RecordId::new());
    let root = tree.root_id();
    let tree = tree.create_folder(root, "A").expect("a");
    let tree = tree.create_folder(root, "B").expect("b");
    let a = child_id(&tree, root, "A");
    let b = child_id(&tree, root, "B");
    let tree = tree.create_folder(a, "A1").expect("a1");
    let tree = tree.create_folder(b, "B1").expect("b1");
    let a1 = child_id(&tree, a, "A1");

    let after = tree.upload_files(a1, &[upload("quote.pdf", 42)]).expect("up");

    // B's whole subtree is off the root->A->A1 path: identical handle.
    let b_before = tree.root().child(b).expect("b before");
    let b_after = after.root().child(b).expect("b after");
    assert!(Arc::ptr_eq(b_before, b_after));

    // A and A1 are on the path: rebuilt.
    let a_before = tree.root().child(a).expect("a before");
    let a_after = after.root().child(a).expect("a after");
    assert!(!Arc::ptr_eq(a_before, a_after));
    assert!(!Arc::ptr_eq(
        a_before.child(a1).expect("a1 before"),
        a_after.child(a1).expect("a1 after")
    ));

    // Aggregates bubbled up the rebuilt path.
    assert_eq!(after.resolve(a).expect("a").total_size_bytes, 42);
    assert_eq!(after.root().total_size_bytes, 42);
    after.validate().expect("invariants hold");
}

#[test]
fn deleting_a_folder_cascades_to_its_subtree() {
    let tree = DocumentTree::empty(RecordId::new());
    let root = tree.root_id();
    let tree = tree.create_folder(root, "A").expect("a");
    let a = child_id(&tree, root, "A");
    let tree = tree.create_folder(a, "B").expect("b");
    let b = child_id(&tree, a, "B");
    let tree = tree.upload_files(b, &[upload("deep.pdf", 7)]).expect("up");
    let deep = tree.resolve(b).expect("b").files[0].id;

    let tree = tree.delete_folder(a).expect("delete");
    assert_eq!(tree.resolve(a).expect_err("a").kind, ErrorKind::NotFound);
    assert_eq!(tree.resolve(b).expect_err("b").kind, ErrorKind::NotFound);
    assert!(tree.resolve_file(deep).is_none());
    assert_eq!(tree.root().total_size_bytes, 0);
    tree.validate().expect("invariants hold");
}

#[test]
fn invariants_hold_across_a_mixed_mutation_sequence() {
    let tree = DocumentTree::empty(RecordId::new());
    let root = tree.root_id();

    let tree = tree.create_folder(root, "Contracts").expect("create");
    let contracts = child_id(&tree, root, "Contracts");
    let tree = tree.create_folder(contracts, "2026").expect("create");
    let year = child_id(&tree, contracts, "2026");
    let tree = tree
        .upload_files(year, &[upload("msa.pdf", 1_024), upload("sow.pdf", 2_048)])
        .expect("upload");
    tree.validate().expect("after uploads");

    let sow = tree.resolve(year).expect("year").files[1].id;
    let tree = tree.move_file(sow, contracts).expect("move file");
    tree.validate().expect("after move_file");

    let tree = tree.rename_folder(year, "FY2026").expect("rename");
    tree.validate().expect("after rename");

    let tree = tree.create_folder(root, "Archive").expect("create");
    let archive = child_id(&tree, root, "Archive");
    let tree = tree.move_folder(year, archive).expect("move folder");
    tree.validate().expect("after move_folder");

    let tree = tree.delete_file(sow);
    tree.validate().expect("after delete_file");

    let tree = tree.delete_folder(archive).expect("delete folder");
    tree.validate().expect("after delete_folder");

    assert_eq!(tree.root().total_size_bytes, 0);
    assert_eq!(
        tree.resolve(contracts).expect("contracts").subfolder_count,
        0
    );
}

#[test]
fn deleting_the_active_folder_truncates_the_path() {
    let tree = DocumentTree::empty(RecordId::new());
    let root = tree.root_id();
    let tree = tree.create_folder(root, "A").expect("a");
    let a = child_id(&tree, root, "A");
    let tree = tree.create_folder(a, "B").expect("b");
    let b = child_id(&tree, a, "B");

    let nav = NavigationState::new(root).navigate_to(a).navigate_to(b);
    let tree = tree.delete_folder(a).expect("delete");
    let nav = nav.reconcile(&tree);

    assert_eq!(nav.path(), &[root]);
    assert_eq!(nav.current_folder(&tree).id, root);
    let crumbs = nav.breadcrumbs(&tree);
    assert_eq!(crumbs.len(), 1);
    assert_eq!(crumbs[0].name, "Documents");
}
