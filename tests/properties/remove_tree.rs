//! Property tests for recursive removal.

use std::fs;
use std::path::Path;

use proptest::prelude::*;
use tempfile::tempdir;

use rigger::remove_tree;

/// A generated filesystem tree
#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir(Vec<(String, Node)>),
    /// Symlink to a (usually dangling) relative target
    Link(String),
}

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9_.-]{1,8}")
        .unwrap()
        .prop_filter("not a dot entry", |s| s != "." && s != "..")
}

fn node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..32).prop_map(Node::File),
        Just(Node::Dir(Vec::new())),
        name().prop_map(Node::Link),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        proptest::collection::vec((name(), inner), 0..6).prop_map(Node::Dir)
    })
}

fn materialize(path: &Path, node: &Node) {
    match node {
        Node::File(bytes) => fs::write(path, bytes).unwrap(),
        Node::Dir(children) => {
            fs::create_dir(path).unwrap();
            for (name, child) in children {
                let child_path = path.join(name);
                // Duplicate names: first one wins.
                if child_path.symlink_metadata().is_err() {
                    materialize(&child_path, child);
                }
            }
        }
        #[cfg(unix)]
        Node::Link(target) => std::os::unix::fs::symlink(target, path).unwrap(),
        #[cfg(not(unix))]
        Node::Link(_) => fs::write(path, b"").unwrap(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: any generated tree is gone after removal, and removing it
    /// again still succeeds.
    #[test]
    fn property_remove_tree_leaves_nothing(tree in node()) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        materialize(&root, &tree);

        remove_tree(&root).unwrap();
        prop_assert!(root.symlink_metadata().is_err());

        remove_tree(&root).unwrap();
        prop_assert!(dir.path().exists());
    }
}
