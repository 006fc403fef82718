use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use db_service::{LibsqlStore, RecordStore};
use shared_lib::webhook_structs::{FieldMap, NewWebhook, WebhookId};

fn webhook(body: serde_json::Value) -> NewWebhook {
    NewWebhook {
        body,
        headers: FieldMap::from([("content-type".to_string(), "application/json".to_string())]),
        query_params: FieldMap::from([("attempt".to_string(), "1".to_string())]),
        received_at: Utc::now(),
    }
}

async fn open_store(dir: &tempfile::TempDir) -> LibsqlStore {
    LibsqlStore::open_local(dir.path().join("webhooks.db"))
        .await
        .expect("failed to open libsql store")
}

#[tokio::test]
async fn created_webhook_reads_back_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let new = webhook(json!({"event": "user.created", "nested": {"list": [1, 2.5, null]}}));
    let id = store.create(new.clone()).await.unwrap();
    assert_eq!(id, WebhookId(1));

    let record = store.get_by_id(id).await.unwrap().expect("record should exist");
    assert_eq!(record.id, id);
    assert_eq!(record.body, new.body);
    assert_eq!(record.headers, new.headers);
    assert_eq!(record.query_params, new.query_params);
    assert_eq!(record.received_at, new.received_at);
}

#[tokio::test]
async fn missing_id_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    assert!(store.get_by_id(WebhookId(999_999)).await.unwrap().is_none());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn listing_returns_every_record_in_id_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    for n in 0..4 {
        store.create(webhook(json!({ "n": n }))).await.unwrap();
    }

    let records = store.list_all().await.unwrap();
    let ids: Vec<i64> = records.iter().map(|record| record.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(records[2].body, json!({"n": 2}));
    assert_eq!(store.count().await.unwrap(), 4);

    // repeated listings are stable
    assert_eq!(store.list_all().await.unwrap(), records);
}

#[tokio::test]
async fn records_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let store = open_store(&dir).await;
        store.create(webhook(json!("kept"))).await.unwrap()
    };

    let store = open_store(&dir).await;
    let record = store.get_by_id(id).await.unwrap().expect("record should persist");
    assert_eq!(record.body, json!("kept"));
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(open_store(&dir).await);

    let handles: Vec<_> = (0..12)
        .map(|n| {
            let store = store.clone();
            tokio::spawn(async move { store.create(webhook(json!({ "n": n }))).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let id = handle.await.unwrap().unwrap();
        assert!(ids.insert(id), "id {id} was handed out twice");
    }

    assert_eq!(ids.len(), 12);
    assert_eq!(store.count().await.unwrap(), 12);
}
