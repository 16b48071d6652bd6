//! Concurrent checkouts against a file-backed database.
//!
//! In-memory SQLite is one connection, so these tests use a throwaway file
//! and a multi-thread runtime to get real lock contention.

use std::path::PathBuf;
use std::time::Duration;

use kasir_core::{CheckoutLine, CoreError, Product, ProductInput};
use kasir_db::{Database, DbConfig, DbError};
use uuid::Uuid;

struct TestDb {
    db: Database,
    path: PathBuf,
}

impl TestDb {
    async fn new() -> Self {
        Self::with_lock_timeout(Duration::from_secs(10)).await
    }

    async fn with_lock_timeout(lock_timeout: Duration) -> Self {
        let path = std::env::temp_dir().join(format!("kasir-test-{}.db", Uuid::new_v4()));
        let config = DbConfig::new(&path)
            .max_connections(8)
            .lock_timeout(lock_timeout);
        let db = Database::new(config).await.unwrap();
        TestDb { db, path }
    }

    async fn product(&self, name: &str, price: i64, stock: i64) -> Product {
        self.db
            .products()
            .create(&ProductInput {
                name: name.to_string(),
                price,
                stock,
                category_id: None,
            })
            .await
            .unwrap()
    }

    async fn stock_of(&self, id: i64) -> i64 {
        self.db.products().get_by_id(id).await.unwrap().stock
    }

    async fn cleanup(self) {
        self.db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

fn spawn_checkout(
    db: &Database,
    lines: Vec<CheckoutLine>,
) -> tokio::task::JoinHandle<Result<kasir_core::Transaction, DbError>> {
    let db = db.clone();
    tokio::spawn(async move { db.transactions().checkout(&lines).await })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_product_is_never_oversold() {
    let t = TestDb::new().await;
    let a = t.product("Kopi Susu", 18_000, 5).await;

    let first = spawn_checkout(&t.db, vec![CheckoutLine::new(a.id, 3)]);
    let second = spawn_checkout(&t.db, vec![CheckoutLine::new(a.id, 3)]);
    let results = [first.await.unwrap(), second.await.unwrap()];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let failure = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert!(matches!(
        failure,
        DbError::Core(CoreError::InsufficientStock {
            available: 2,
            requested: 3,
            ..
        })
    ));

    assert_eq!(t.stock_of(a.id).await, 2);
    t.cleanup().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_disjoint_products_both_succeed() {
    let t = TestDb::new().await;
    let a = t.product("Teh", 4_000, 5).await;
    let b = t.product("Roti", 7_500, 5).await;

    let first = spawn_checkout(&t.db, vec![CheckoutLine::new(a.id, 3)]);
    let second = spawn_checkout(&t.db, vec![CheckoutLine::new(b.id, 4)]);

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();
    assert_ne!(first.id, second.id);

    assert_eq!(t.stock_of(a.id).await, 2);
    assert_eq!(t.stock_of(b.id).await, 1);
    t.cleanup().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_buyers_drain_stock_exactly() {
    let t = TestDb::new().await;
    let a = t.product("Es Krim", 10_000, 5).await;

    let handles: Vec<_> = (0..12)
        .map(|_| spawn_checkout(&t.db, vec![CheckoutLine::new(a.id, 1)]))
        .collect();

    let mut sold = 0;
    let mut refused = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => sold += 1,
            Err(DbError::Core(CoreError::InsufficientStock { available: 0, .. })) => refused += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(sold, 5);
    assert_eq!(refused, 7);
    assert_eq!(t.stock_of(a.id).await, 0);

    let committed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(t.db.pool())
        .await
        .unwrap();
    assert_eq!(committed, 5);
    t.cleanup().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_lock_wait_is_bounded_and_retryable() {
    let t = TestDb::with_lock_timeout(Duration::from_millis(200)).await;
    let a = t.product("Gula Pasir", 14_000, 5).await;

    // Another writer holds the database write lock
    let mut holder = t.db.pool().begin().await.unwrap();
    sqlx::query("UPDATE products SET stock = stock")
        .execute(&mut *holder)
        .await
        .unwrap();

    let started = std::time::Instant::now();
    let err = t
        .db
        .transactions()
        .checkout(&[CheckoutLine::new(a.id, 2)])
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Busy(_)), "unexpected error: {err:?}");
    assert!(err.is_retryable());
    assert!(started.elapsed() < Duration::from_secs(5));

    holder.rollback().await.unwrap();

    let tx = t
        .db
        .transactions()
        .checkout(&[CheckoutLine::new(a.id, 2)])
        .await
        .unwrap();
    assert_eq!(tx.total_amount, 28_000);
    assert_eq!(t.stock_of(a.id).await, 3);

    let committed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(t.db.pool())
        .await
        .unwrap();
    assert_eq!(committed, 1);
    t.cleanup().await;
}
