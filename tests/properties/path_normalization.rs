//! Property tests for view path normalization.

use proptest::prelude::*;

use std::path::Path;

use viewcache::domain::path::{normalize_root, normalize_suffix, resolve_path};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._-]{1,12}").unwrap()
}

fn logical_path() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(segment(), 1..=4)
}

fn root() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        proptest::string::string_regex("[A-Za-z0-9_-]{1,8}").unwrap(),
        1..=3,
    )
    .prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Resolving never panics on arbitrary input.
    #[test]
    fn property_resolve_never_panics(
        raw_root in "(?s).{0,64}",
        view in "(?s).{0,256}"
    ) {
        let root = normalize_root(Path::new(&raw_root));
        let _ = resolve_path(&root, &view);
    }

    /// PROPERTY: Every key starts with the root and uses `/` only.
    #[test]
    fn property_resolved_key_is_rooted(
        raw_root in root(),
        parts in logical_path(),
        leading in any::<bool>(),
    ) {
        let root = normalize_root(Path::new(&raw_root));
        let view = format!("{}{}", if leading { "\\" } else { "" }, parts.join("\\"));

        let key = resolve_path(&root, &view);

        prop_assert!(key.starts_with(&root));
        prop_assert!(!key.contains('\\'));
        prop_assert_eq!(key.to_lowercase(), key.clone());
    }

    /// PROPERTY: Resolving an already resolved key is the identity.
    #[test]
    fn property_resolve_idempotent(
        raw_root in root(),
        parts in logical_path(),
    ) {
        let root = normalize_root(Path::new(&raw_root));
        let once = resolve_path(&root, &parts.join("/"));

        prop_assert_eq!(resolve_path(&root, &once), once);
    }

    /// PROPERTY: Spellings differing only in case, separator style and a
    /// leading separator resolve to one key.
    #[test]
    fn property_equivalent_spellings_share_a_key(
        raw_root in root(),
        parts in logical_path(),
    ) {
        let root = normalize_root(Path::new(&raw_root));
        let plain = parts.join("/");
        // A logical path that itself spells the root is taken as a key
        prop_assume!(!format!("/{}", plain.to_lowercase()).starts_with(&root));
        let variants = [
            plain.clone(),
            format!("/{plain}"),
            plain.replace('/', "\\"),
            format!("\\{}", plain.to_uppercase().replace('/', "\\")),
            plain.to_lowercase(),
        ];

        let expected = resolve_path(&root, &plain);
        for variant in &variants {
            prop_assert_eq!(&resolve_path(&root, variant), &expected);
        }
    }

    /// PROPERTY: A normalized root ends with exactly one separator.
    #[test]
    fn property_root_has_single_trailing_separator(
        raw_root in root(),
        trailing in 0usize..4,
    ) {
        let with_slashes = format!("{raw_root}{}", "/".repeat(trailing));
        let root = normalize_root(Path::new(&with_slashes));

        prop_assert!(root.ends_with('/'));
        prop_assert!(!root.ends_with("//"));
        prop_assert_eq!(root, normalize_root(Path::new(&raw_root)));
    }

    /// PROPERTY: Suffix normalization is idempotent.
    #[test]
    fn property_suffix_idempotent(raw in "[*.]{0,2}[A-Za-z]{0,6}") {
        let once = normalize_suffix(&raw);
        prop_assert_eq!(normalize_suffix(&once), once);
    }
}
