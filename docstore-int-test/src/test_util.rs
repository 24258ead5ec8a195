use docstore::collection::Document;
use docstore::doc;
use docstore::errors::DocStoreResult;
use docstore::{DocumentDatabase, DocumentStore};
use std::backtrace::Backtrace;
use std::path::{Path, PathBuf};
use std::{env, fs};

/// Runs a test between a setup and a teardown step.
///
/// `after` runs whether the test body returns an error or not. Errors are
/// reported with a backtrace and fail the test; panics propagate as they are.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> DocStoreResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> DocStoreResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> DocStoreResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let result = std::panic::catch_unwind(|| {
        let backtrace = Backtrace::capture();
        let ctx = before()
            .map_err(|e| (format!("Before run failed: {:?}", e), backtrace.to_string()))?;

        let test_result = test(ctx.clone());
        let after_result = after(ctx);
        match (test_result, after_result) {
            (Err(e), _) => Err((format!("Test failed: {:?}", e), backtrace.to_string())),
            (Ok(()), Err(e)) => Err((format!("After run failed: {:?}", e), backtrace.to_string())),
            (Ok(()), Ok(())) => Ok(()),
        }
    });

    match result {
        Ok(Ok(())) => {}
        Ok(Err((e, bt))) => {
            eprintln!("\n==================== TEST FAILED ====================");
            eprintln!("Error: {}", e);
            if !bt.is_empty() && !bt.contains("disabled") {
                eprintln!("\nBacktrace:\n{}", bt);
            }
            eprintln!("=====================================================\n");
            panic!("{}", e);
        }
        Err(panic_err) => std::panic::resume_unwind(panic_err),
    }
}

#[derive(Clone)]
pub struct TestContext {
    path: PathBuf,
    db: DocumentDatabase,
}

impl TestContext {
    pub fn new(path: PathBuf, db: DocumentDatabase) -> Self {
        Self { path, db }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn db(&self) -> DocumentDatabase {
        self.db.clone()
    }

    pub fn store(&self) -> DocumentStore {
        self.db.store().clone()
    }
}

pub fn random_path() -> PathBuf {
    let id = uuid::Uuid::new_v4();
    env::temp_dir().join(format!("docstore-{}", id))
}

pub fn create_test_context() -> DocStoreResult<TestContext> {
    let path = random_path();
    let db = DocumentDatabase::open(&path)?;
    Ok(TestContext::new(path, db))
}

pub fn cleanup(ctx: TestContext) -> DocStoreResult<()> {
    if ctx.path().exists() {
        fs::remove_dir_all(ctx.path())?;
    }
    Ok(())
}

pub fn create_test_docs() -> Vec<Document> {
    let tony = doc! {
        name: "Tony",
        age: 35,
        email: "tony@example.com",
        addresses: [
            { street: "25 corp road", city: "London" },
            { street: "4646 Malibu Drive", city: "Malibu" },
        ],
        tags: ["engineer", "billionaire"],
    };

    let cathy = doc! {
        name: "Cathy",
        age: 22,
        email: "cbear@hotmail.com",
        addresses: [{ street: "1 Bear Lane", city: "Bristol" }],
        tags: ["student"],
    };

    let amanda = doc! {
        name: "Amanda",
        age: 41,
        email: "amanda@example.com",
        addresses: [],
        tags: ["engineer"],
    };

    vec![tony, cathy, amanda]
}

/// Stores the test documents under `contacts/a`, `contacts/b` and
/// `contacts/c`.
pub fn insert_test_documents(store: &DocumentStore) -> DocStoreResult<()> {
    for (key, document) in ["contacts/a", "contacts/b", "contacts/c"]
        .iter()
        .zip(create_test_docs())
    {
        store.set(key, &document)?;
    }
    Ok(())
}

pub fn names(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .filter_map(|d| d.get("name").and_then(|v| v.as_str()).map(String::from))
        .collect()
}
