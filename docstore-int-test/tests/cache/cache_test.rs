use docstore::errors::ErrorKind;
use docstore::{doc, DocumentCache};
use docstore_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_cache_lifecycle() {
    run_test(
        create_test_context,
        |ctx| {
            let cache = DocumentCache::new(ctx.path().join("cache"));
            let document = doc! { name: "foo", tags: ["a", "b"] };

            assert!(cache.get("foo")?.is_none());
            assert!(cache.set("foo", &document)?);
            assert!(cache.has("foo"));
            assert_eq!(cache.get("foo")?, Some(document));

            assert!(cache.delete("foo"));
            assert!(!cache.has("foo"));
            assert!(!cache.delete("foo"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_cache_clear() {
    run_test(
        create_test_context,
        |ctx| {
            let cache = DocumentCache::new(ctx.path().join("cache"));
            for key in ["a", "b", "c"] {
                cache.set(key, &doc! { key: key })?;
            }

            cache.clear()?;
            for key in ["a", "b", "c"] {
                assert!(!cache.has(key));
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_cache_rejects_nested_keys() {
    run_test(
        create_test_context,
        |ctx| {
            let cache = DocumentCache::new(ctx.path().join("cache"));
            let err = cache.set("a/b", &doc! { n: 1 }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidKey);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_cache_entries_are_plain_documents() {
    run_test(
        create_test_context,
        |ctx| {
            let cache = DocumentCache::new(ctx.path().join("cache"));
            cache.set("foo", &doc! { n: 1 })?;

            assert_eq!(ctx.store().list("cache", true)?, vec!["cache/foo"]);
            Ok(())
        },
        cleanup,
    )
}
