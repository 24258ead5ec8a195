use docstore::common::Value;
use docstore::errors::ErrorKind;
use docstore::doc;
use docstore_int_test::test_util::{cleanup, create_test_context, create_test_docs, run_test};

#[test]
fn test_update() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let mut document = doc! { name: "Tony", age: 35 };
            db.insert(&mut document, None)?;

            document.set("age", 36);
            document.unset("name");
            assert!(db.update(&document)?);

            let stored = db.get(document.id().unwrap())?;
            assert_eq!(stored.get("age"), Some(&Value::I64(36)));
            assert!(!stored.has("name"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_after_insert_with_prefix() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let mut contact = doc! { name: "Tony", age: 35 };
            db.insert(&mut contact, Some("europe"))?;

            contact.set("age", 36);
            assert!(db.update(&contact)?);

            let key = format!("europe/{}", contact.id().unwrap());
            assert_eq!(db.list("", true)?, vec![key.clone()]);
            assert_eq!(db.get(&key)?.get("age"), Some(&Value::I64(36)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_read_document_keeps_its_key() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let mut document = doc! { name: "Tony", age: 35 };
            db.insert(&mut document, Some("contacts"))?;

            let key = db.list("contacts", true)?.remove(0);
            let mut stored = db.get(&key)?;
            stored.set("age", 36);
            assert!(db.update(&stored)?);

            assert_eq!(db.list("", true)?, vec![key.clone()]);
            assert_eq!(db.get(&key)?.get("age"), Some(&Value::I64(36)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_without_identity() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            assert!(!db.update(&doc! { name: "Tony" })?);
            assert!(db.list("", true)?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_many() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let mut documents = create_test_docs();
            db.insert_many(&mut documents, None)?;

            for document in documents.iter_mut() {
                document.set("verified", true);
            }
            assert!(db.update_many(&documents)?);

            for document in &documents {
                let stored = db.get(document.id().unwrap())?;
                assert_eq!(stored.get("verified"), Some(&Value::Bool(true)));
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_many_stops_at_missing_identity() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let mut tony = doc! { name: "Tony", age: 35 };
            db.insert(&mut tony, None)?;
            tony.set("age", 36);

            let err = db
                .update_many(&[tony.clone(), doc! { name: "Cathy" }])
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NotIdentifiable);

            // earlier updates stay committed
            let stored = db.get(tony.id().unwrap())?;
            assert_eq!(stored.get("age"), Some(&Value::I64(36)));
            Ok(())
        },
        cleanup,
    )
}
