#![allow(dead_code)]

use std::sync::Once;

use btree::{BTree, Key};
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Install a tracing subscriber once per test binary, writing through the
/// test harness capture.
///
/// Honors `RUST_LOG`; defaults to `warn` so test output stays quiet unless
/// asked for.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_test_writer()
                .with_filter(env_filter),
        );
        if subscriber.try_init().is_err() {
            eprintln!("tracing subscriber already set");
        }
    });
}

/// Build a tree of `degree` by inserting `keys` in order.
pub fn tree_with(degree: usize, keys: &[Key]) -> BTree {
    let mut tree = BTree::new(degree).expect("valid degree");
    for &key in keys {
        tree.insert(key);
    }
    tree
}

/// Panic with the rendered tree if any invariant is broken.
pub fn assert_valid(tree: &BTree, context: &str) {
    if let Err(e) = tree.check_invariants_detailed() {
        panic!("{}: {}\n{}", context, e, tree);
    }
}
