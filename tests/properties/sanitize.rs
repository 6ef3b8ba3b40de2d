//! Property tests for the lock tree sanitizer.

use proptest::prelude::*;

use rigger::application::{format_lockfile, sanitize_lockfile};
use rigger::domain::entities::{is_vcs_reference, sanitize, LockEntry};

fn reference() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just("https://registry.npmjs.org/pkg/-/pkg-1.0.0.tgz".to_string()),
        Just("git+https://github.com/org/pkg.git#abc".to_string()),
        Just("github:org/pkg".to_string()),
        Just("pkg@^1.0.0".to_string()),
    ])
}

fn entry() -> impl Strategy<Value = LockEntry> {
    let leaf = (
        proptest::option::of("[0-9]\\.[0-9]\\.[0-9]"),
        reference(),
        reference(),
    )
        .prop_map(|(version, from, resolved)| LockEntry {
            version,
            from,
            resolved,
            ..LockEntry::default()
        });

    leaf.prop_recursive(3, 32, 4, |inner| {
        (
            proptest::option::of("[0-9]\\.[0-9]\\.[0-9]"),
            reference(),
            reference(),
            proptest::collection::btree_map("[a-z]{1,6}", inner, 0..4),
        )
            .prop_map(|(version, from, resolved, deps)| LockEntry {
                version,
                from,
                resolved,
                dependencies: Some(deps),
                ..LockEntry::default()
            })
    })
}

fn check_node(original: &LockEntry, clean: &LockEntry) -> Result<(), TestCaseError> {
    if original.version.is_none() {
        prop_assert_eq!(&clean.from, &original.from);
        prop_assert_eq!(&clean.resolved, &original.resolved);
    } else {
        if is_vcs_reference(original.resolved.as_deref()) {
            prop_assert_eq!(&clean.resolved, &original.resolved);
            prop_assert_eq!(&clean.from, &original.from);
        } else {
            prop_assert!(clean.from.is_none());
        }
        if original.resolved == original.from && !is_vcs_reference(original.resolved.as_deref()) {
            prop_assert!(clean.resolved.is_none());
        }
    }

    for (name, child) in original.children() {
        let clean_child = &clean.dependencies.as_ref().unwrap()[name];
        check_node(child, clean_child)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: sanitizing is idempotent on the tree.
    #[test]
    fn property_sanitize_idempotent(tree in entry()) {
        let once = sanitize(&tree);
        prop_assert_eq!(sanitize(&once), once);
    }

    /// PROPERTY: the serialized artifact is byte-stable under re-sanitizing.
    #[test]
    fn property_sanitized_output_byte_stable(tree in entry()) {
        let text = format_lockfile(&tree).unwrap();
        let once = sanitize_lockfile(&text).unwrap();
        let twice = sanitize_lockfile(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: field retention follows the VCS / version rules on every node.
    #[test]
    fn property_field_rules_hold_everywhere(tree in entry()) {
        check_node(&tree, &sanitize(&tree))?;
    }

    /// PROPERTY: sanitizing never adds or drops entries.
    #[test]
    fn property_entry_count_preserved(tree in entry()) {
        prop_assert_eq!(sanitize(&tree).entry_count(), tree.entry_count());
    }
}
