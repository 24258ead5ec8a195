use docstore::common::Value;
use docstore::errors::ErrorKind;
use docstore::{doc, DocumentStore};
use docstore_int_test::test_util::{cleanup, create_test_context, create_test_docs, run_test};
use std::fs;

#[test]
fn test_round_trip() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            for (index, document) in create_test_docs().into_iter().enumerate() {
                let key = format!("contacts/{}", index);
                assert!(store.set(&key, &document)?);

                let read = store.get(&key)?;
                assert_eq!(read, document);
                assert_eq!(read.key(), Some(key.as_str()));
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_stored_file_layout() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.set("computing/programming/0321127420", &doc! {
                name: "foo",
                description: "bar",
            })?;

            let path = ctx
                .path()
                .join("computing")
                .join("programming")
                .join("0321127420.json");
            let contents = fs::read_to_string(path)?;
            assert_eq!(contents, "{\n    \"name\": \"foo\",\n    \"description\": \"bar\"\n}");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_missing_and_corrupt() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            assert_eq!(store.get("missing").unwrap_err().kind(), &ErrorKind::NotFound);

            fs::write(ctx.path().join("broken.json"), "{\"name\": ")?;
            assert_eq!(store.get("broken").unwrap_err().kind(), &ErrorKind::CorruptData);
            assert!(store.has("broken"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_failed_write_keeps_previous_version() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.set("blocked/child", &doc! { version: 1 })?;

            // replace the parent directory with a file so the next write cannot land
            fs::remove_dir_all(ctx.path().join("blocked"))?;
            fs::write(ctx.path().join("blocked"), "")?;
            assert!(!store.set("blocked/child", &doc! { version: 2 })?);

            store.set("demo", &doc! { version: 1 })?;
            let before = fs::read_dir(ctx.path())?.count();
            assert!(!store.set("blocked/other", &doc! { version: 3 })?);
            assert_eq!(fs::read_dir(ctx.path())?.count(), before);
            assert_eq!(store.get("demo")?.get("version"), Some(&Value::I64(1)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.set("a", &doc! { n: 1 })?;
            assert!(store.delete("a")?);
            assert!(!store.has("a"));
            assert_eq!(store.delete("a").unwrap_err().kind(), &ErrorKind::NotFound);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_reopen_sees_existing_documents() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.store().set("demo", &doc! { name: "foo" })?;

            let reopened = DocumentStore::open(ctx.path())?;
            assert_eq!(reopened.list("", true)?, vec!["demo"]);
            assert_eq!(reopened.root(), ctx.store().root());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_concurrent_writers_never_expose_partial_documents() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let payload: Vec<String> = (0..500).map(|i| format!("item-{}", i)).collect();
            store.set("shared", &doc! { writer: 0, payload: (payload.clone()) })?;

            let writers: Vec<_> = (1..=4)
                .map(|writer| {
                    let store = store.clone();
                    let payload = payload.clone();
                    std::thread::spawn(move || {
                        for _ in 0..25 {
                            let document = doc! { writer: writer, payload: (payload.clone()) };
                            assert!(store.set("shared", &document).unwrap());
                        }
                    })
                })
                .collect();

            for _ in 0..100 {
                let document = store.get("shared")?;
                let items = document.get("payload").and_then(Value::as_array).unwrap();
                assert_eq!(items.len(), 500);
            }

            for writer in writers {
                writer.join().unwrap();
            }

            assert_eq!(store.list("", true)?, vec!["shared"]);
            Ok(())
        },
        cleanup,
    )
}
