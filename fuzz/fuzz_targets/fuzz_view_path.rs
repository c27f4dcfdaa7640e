#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use viewcache::domain::path::{normalize_root, resolve_path};

fuzz_target!(|data: (&str, &str)| {
    let (root, view) = data;
    let root = normalize_root(Path::new(root));
    let key = resolve_path(&root, view);

    // A resolved key always resolves to itself
    assert_eq!(resolve_path(&root, &key), key);
});
