use docstore::errors::ErrorKind;
use docstore::filter::{ConditionSet, Conditions};
use docstore::store::{limit_to, skip_by, FindMode, FindOptions, FindResult};
use docstore::doc;
use docstore_int_test::test_util::{cleanup, create_test_context, insert_test_documents, names, run_test};
use std::fs;

#[test]
fn test_find_all() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            insert_test_documents(&store)?;

            let documents = store.find_all(&FindOptions::new())?;
            assert_eq!(names(&documents), vec!["Tony", "Cathy", "Amanda"]);
            assert_eq!(store.count(&FindOptions::new())?, 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_query_correctness() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.set("tony", &doc! { name: "Tony", age: 35 })?;
            store.set("cathy", &doc! { name: "Cathy", age: 22 })?;

            let find = |conditions: ConditionSet| store.find_list(&FindOptions::new().conditions(conditions));

            assert_eq!(find(ConditionSet::new(vec![("age >", 30)])?)?, vec!["tony"]);
            assert_eq!(find(ConditionSet::new(vec![("name LIKE", "%o_y")])?)?, vec!["tony"]);
            assert_eq!(find(ConditionSet::new(vec![("name !=", "Tony")])?)?, vec!["cathy"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_with_conditions() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            insert_test_documents(&store)?;

            let find = |conditions: ConditionSet| -> docstore::errors::DocStoreResult<Vec<String>> {
                let documents = store.find_all(&FindOptions::new().conditions(conditions))?;
                Ok(names(&documents))
            };

            assert_eq!(find(Conditions::new().gte("age", 32).build()?)?, vec!["Tony", "Amanda"]);
            assert_eq!(find(Conditions::new().lt("age", 32).build()?)?, vec!["Cathy"]);
            assert_eq!(find(Conditions::new().lte("age", 25).build()?)?, vec!["Cathy"]);
            assert!(find(Conditions::new().gt("age", "a").build()?)?.is_empty());
            assert_eq!(find(Conditions::new().like("name", "T_n%").build()?)?, vec!["Tony"]);
            assert_eq!(
                find(Conditions::new().not_like("email", "%@example.com").build()?)?,
                vec!["Cathy"]
            );
            assert_eq!(find(Conditions::new().eq("tags", "engineer").build()?)?, vec!["Tony", "Amanda"]);
            assert_eq!(
                find(Conditions::new().is_in("name", vec!["Cathy", "Amanda"]).build()?)?,
                vec!["Cathy", "Amanda"]
            );
            assert_eq!(
                find(Conditions::new().gte("age", 30).ne("name", "Amanda").build()?)?,
                vec!["Tony"]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_nested_broadcast() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            insert_test_documents(&store)?;

            let conditions = ConditionSet::from_document(&doc! { "addresses.street": "25 corp road" })?;
            let documents = store.find_all(&FindOptions::new().conditions(conditions))?;
            assert_eq!(names(&documents), vec!["Tony"]);

            let conditions = ConditionSet::from_document(&doc! {
                "addresses.city IN": ["Bristol", "Malibu"],
            })?;
            assert_eq!(store.count(&FindOptions::new().conditions(conditions))?, 2);

            let conditions = ConditionSet::from_document(&doc! { "addresses.city !=": "Malibu" })?;
            let documents = store.find_all(&FindOptions::new().conditions(conditions))?;
            assert_eq!(names(&documents), vec!["Cathy", "Amanda"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_offset_and_limit() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            insert_test_documents(&store)?;

            assert_eq!(store.find_list(&skip_by(1))?, vec!["contacts/b", "contacts/c"]);
            assert_eq!(store.find_list(&skip_by(1).limit(1))?, vec!["contacts/b"]);
            assert_eq!(store.count(&limit_to(2))?, 2);
            assert_eq!(store.count(&skip_by(2).limit(5))?, 1);
            assert!(store.find_all(&skip_by(3))?.is_empty());

            let first = store.find_first(&skip_by(1))?.unwrap();
            assert_eq!(first.key(), Some("contacts/b"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_mode() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            insert_test_documents(&store)?;
            let options = FindOptions::new()
                .prefix("contacts")
                .conditions(Conditions::new().eq("name", "Cathy").build()?);

            match store.find(FindMode::First, &options)? {
                FindResult::First(Some(document)) => assert_eq!(document.key(), Some("contacts/b")),
                other => panic!("unexpected result {:?}", other),
            }
            assert_eq!(store.find(FindMode::List, &options)?, FindResult::List(vec!["contacts/b".into()]));
            assert_eq!(store.find(FindMode::Count, &options)?, FindResult::Count(1));
            assert_eq!(store.find_by_name("all", &options)?.count(), 1);

            let err = store.find_by_name("sum", &options).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UnsupportedOperation);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_limited_to_prefix() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            insert_test_documents(&store)?;
            store.set("archive/tony", &doc! { name: "Tony", age: 70 })?;

            let options = FindOptions::new().conditions(Conditions::new().eq("name", "Tony").build()?);
            assert_eq!(store.find_list(&options)?, vec!["archive/tony", "contacts/a"]);
            assert_eq!(store.find_list(&options.clone().prefix("contacts"))?, vec!["contacts/a"]);
            assert!(store.find_list(&options.prefix("missing"))?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_search() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            insert_test_documents(&store)?;
            let conditions = ConditionSet::new(vec![("tags", "engineer")])?;

            assert_eq!(store.search("contacts", &conditions, None, 0)?, vec!["contacts/a", "contacts/c"]);
            assert_eq!(store.search("contacts", &conditions, Some(1), 1)?, vec!["contacts/c"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_corrupt_document_aborts_find() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            insert_test_documents(&store)?;
            fs::write(ctx.path().join("contacts").join("d.json"), "{ truncated")?;

            let err = store.find_all(&FindOptions::new()).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CorruptData);
            Ok(())
        },
        cleanup,
    )
}
