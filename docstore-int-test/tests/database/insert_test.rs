use docstore::errors::ErrorKind;
use docstore::{doc, Document};
use docstore_int_test::test_util::{cleanup, create_test_context, create_test_docs, run_test};
use std::fs;

#[test]
fn test_insert() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let mut document = doc! { name: "Tony", age: 35 };
            assert!(db.insert(&mut document, None)?);

            let id = document.id().map(String::from).unwrap();
            assert_eq!(id.len(), 24);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
            assert!(ctx.path().join(format!("{}.json", id)).is_file());

            let stored = db.get(&id)?;
            assert_eq!(stored, document);
            let keys: Vec<&String> = stored.to_map().keys().collect();
            assert_eq!(keys, vec!["_id", "name", "age"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_with_prefix() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let mut document = doc! { name: "Tony" };
            assert!(db.insert(&mut document, Some("/europe/"))?);

            let key = format!("europe/{}", document.id().unwrap());
            assert_eq!(db.list("europe", true)?, vec![key.clone()]);
            assert_eq!(db.get(&key)?.key(), Some(key.as_str()));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_rejects_identified_document() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let mut document = doc! { name: "Tony" };
            assert!(db.insert(&mut document, None)?);
            let id = document.id().map(String::from);

            assert!(!db.insert(&mut document, None)?);
            assert_eq!(document.id().map(String::from), id);
            assert_eq!(db.list("", true)?.len(), 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_many() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let mut documents = create_test_docs();
            assert!(db.insert_many(&mut documents, Some("contacts"))?);

            assert_eq!(db.list("contacts", true)?.len(), 3);
            for document in &documents {
                let key = format!("contacts/{}", document.id().unwrap());
                assert_eq!(&db.get(&key)?, document);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_many_keeps_committed_documents() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let mut identified = doc! { name: "Amanda" };
            identified.set_id("5f731f1345b65d076150a7b6");
            let mut documents: Vec<Document> = vec![doc! { name: "Tony" }, identified, doc! { name: "Cathy" }];

            let err = db.insert_many(&mut documents, None).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::WriteFailed);

            let keys = db.list("", true)?;
            assert_eq!(keys.len(), 1);
            assert_eq!(Some(keys[0].as_str()), documents[0].id());
            assert!(!documents[2].has_id());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_write_failure_is_retryable() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            fs::write(ctx.path().join("full"), "")?;

            let mut document = doc! { name: "Tony" };
            assert!(!db.insert(&mut document, Some("full"))?);
            assert!(!document.has_id());

            assert!(db.insert(&mut document, Some("contacts"))?);
            assert!(document.has_id());
            Ok(())
        },
        cleanup,
    )
}
