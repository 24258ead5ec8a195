use docstore::doc;
use docstore_int_test::test_util::{cleanup, create_test_context, run_test};
use std::fs;

#[test]
fn test_listing_completeness() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.set("a", &doc! { n: 1 })?;
            store.set("b/c", &doc! { n: 2 })?;

            assert_eq!(store.list("", true)?, vec!["a", "b/c"]);
            assert_eq!(store.list("", false)?, vec!["a"]);
            assert_eq!(store.list("b", true)?, vec!["b/c"]);
            assert!(store.list("missing", true)?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_listing_order() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.set("demo", &doc! { name: "foo" })?;
            store.set("business/book", &doc! { name: "bar" })?;

            assert_eq!(store.list("", true)?, vec!["business/book", "demo"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_listing_is_stable() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            for key in ["m", "a/z", "a/b/c", "z", "a/a", "k/1"] {
                store.set(key, &doc! { key: key })?;
            }

            let first = store.list("", true)?;
            assert_eq!(first, vec!["a/a", "a/b/c", "a/z", "k/1", "m", "z"]);
            assert_eq!(store.list("", true)?, first);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_listing_with_prefix_slashes() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.set("europe/contacts/tony", &doc! { n: 1 })?;
            store.set("europe/contacts/archive/cathy", &doc! { n: 2 })?;

            assert_eq!(
                store.list("/europe/contacts/", false)?,
                vec!["europe/contacts/tony"]
            );
            assert_eq!(
                store.list("europe", true)?,
                vec!["europe/contacts/archive/cathy", "europe/contacts/tony"]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_listing_ignores_other_files() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.set("demo", &doc! { n: 1 })?;
            fs::write(ctx.path().join("README.txt"), "not a document")?;
            fs::create_dir_all(ctx.path().join("empty"))?;

            assert_eq!(store.list("", true)?, vec!["demo"]);
            assert!(store.list("empty", true)?.is_empty());
            Ok(())
        },
        cleanup,
    )
}
