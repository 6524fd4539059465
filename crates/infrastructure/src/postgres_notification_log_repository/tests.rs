use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use steward_application::NotificationLogRepository;
use steward_domain::{NotificationLogEntry, Uid};

use super::PostgresNotificationLogRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for notification log tests: {error}");
    }

    Some(pool)
}

fn at_millis(millis: i64) -> DateTime<Utc> {
    match DateTime::from_timestamp_millis(millis) {
        Some(timestamp) => timestamp,
        None => panic!("timestamp in range expected"),
    }
}

#[tokio::test]
async fn appended_entries_keep_creation_order() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresNotificationLogRepository::new(pool.clone());
    let recipient = format!("notified-{}", Utc::now().timestamp_micros());
    let Ok(uid) = Uid::new(recipient.clone()) else {
        panic!("valid uid expected");
    };

    // Second entry carries the earlier timestamp, so ordering must come from insertion.
    let timestamps = [at_millis(1_700_000_000_000), at_millis(1_600_000_000_000)];
    for timestamp in timestamps {
        let entry = NotificationLogEntry::approval(uid.clone(), timestamp);
        assert!(repository.append_entry(entry).await.is_ok());
    }

    let rows = sqlx::query_as::<_, (String, DateTime<Utc>)>(
        r#"
        SELECT notification_type, ts
        FROM notification_log
        WHERE uid = $1
        ORDER BY sequence
        "#,
    )
    .bind(recipient.as_str())
    .fetch_all(&pool)
    .await;

    assert_eq!(
        rows.ok(),
        Some(vec![
            ("approval".to_owned(), timestamps[0]),
            ("approval".to_owned(), timestamps[1]),
        ])
    );
}
