/// Managed and manual transactions
use belajar_core::User;
use belajar_storage::{users, Database, StorageError};
use sqlx::MySqlPool;

mod test_helpers;
use test_helpers::{count_users, count_users_with_id, init_logging};

async fn insert_first_batch(db: &Database) -> belajar_storage::Result<()> {
    db.transaction(|tx| {
        Box::pin(async move {
            users::create(&mut **tx, &User::new("11", "adib lagi", "adib123")).await?;
            users::create(&mut **tx, &User::new("12", "adib lagi dan lagi", "adib123")).await?;
            users::create(
                &mut **tx,
                &User::new("13", "adib lagi dan lagi dan lagi", "adib123"),
            )
            .await?;
            Ok::<_, StorageError>(())
        })
    })
    .await
}

#[sqlx::test(migrator = "belajar_storage::MIGRATOR")]
#[ignore = "requires a MySQL server (set DATABASE_URL)"]
async fn test_transaction_success(pool: MySqlPool) {
    init_logging();
    let db = Database::from_pool(pool.clone());

    insert_first_batch(&db)
        .await
        .expect("Transaction should commit");

    assert_eq!(count_users(&pool).await, 3);
}

/// `users.id` has no uniqueness constraint, so re-inserting "12" inside
/// a transaction does not fail and the transaction commits.
#[sqlx::test(migrator = "belajar_storage::MIGRATOR")]
#[ignore = "requires a MySQL server (set DATABASE_URL)"]
async fn test_transaction_with_duplicate_id(pool: MySqlPool) {
    let db = Database::from_pool(pool.clone());
    insert_first_batch(&db).await.unwrap();

    let result = db
        .transaction(|tx| {
            Box::pin(async move {
                users::create(&mut **tx, &User::new("14", "adib lagi", "adib123")).await?;
                users::create(&mut **tx, &User::new("12", "adib lagi dan lagi", "adib123"))
                    .await?;
                Ok::<_, StorageError>(())
            })
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(count_users_with_id(&pool, "12").await, 2);
    assert_eq!(count_users_with_id(&pool, "14").await, 1);
}

#[sqlx::test(migrator = "belajar_storage::MIGRATOR")]
#[ignore = "requires a MySQL server (set DATABASE_URL)"]
async fn test_transaction_rolls_back_on_error(pool: MySqlPool) {
    let db = Database::from_pool(pool.clone());

    let result: belajar_storage::Result<()> = db
        .transaction(|tx| {
            Box::pin(async move {
                users::create(&mut **tx, &User::new("20", "batal", "adib123")).await?;
                Err::<(), _>(StorageError::query("abort after first insert"))
            })
        })
        .await;

    assert!(matches!(result, Err(StorageError::Query(_))));
    assert_eq!(count_users_with_id(&pool, "20").await, 0);
}

#[sqlx::test(migrator = "belajar_storage::MIGRATOR")]
#[ignore = "requires a MySQL server (set DATABASE_URL)"]
async fn test_manual_transaction_success(pool: MySqlPool) {
    let db = Database::from_pool(pool.clone());
    let mut tx = db.begin().await.unwrap();

    let first = users::create(&mut *tx, &User::new("14", "adib lagi dan lagi", "adib123")).await;
    assert!(first.is_ok());

    let second = users::create(&mut *tx, &User::new("15", "adib lagi dan lagi", "adib123")).await;
    assert!(second.is_ok());

    if first.is_ok() && second.is_ok() {
        tx.commit().await.expect("Commit should succeed");
    }

    assert_eq!(count_users(&pool).await, 2);
}

#[sqlx::test(migrator = "belajar_storage::MIGRATOR")]
#[ignore = "requires a MySQL server (set DATABASE_URL)"]
async fn test_manual_transaction_dropped_rolls_back(pool: MySqlPool) {
    let db = Database::from_pool(pool.clone());

    {
        let mut tx = db.begin().await.unwrap();
        users::create(&mut *tx, &User::new("16", "tidak jadi", "adib123"))
            .await
            .unwrap();
        // Dropped without commit
    }

    assert_eq!(count_users_with_id(&pool, "16").await, 0);
}
