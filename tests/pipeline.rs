//! Pipeline scenarios over the local backends: filesystem object store and
//! in-memory history table.

use bucketwatch::config::Config;
use bucketwatch::service;
use bucketwatch::storage::localfs::LocalFsObjectStore;
use bucketwatch::storage::memory::MemoryHistoryStore;
use bucketwatch::utils::state::AppState;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn test_config(root: &Path, chart_path: &Path) -> Config {
    Config {
        bucket: "data".into(),
        table: "bucket_size_history".into(),
        plot_bucket: "plots".into(),
        plot_key: "plot.svg".into(),
        chart_path: chart_path.to_string_lossy().into_owned(),
        object_store: "FILESYSTEM".into(),
        history_store: "MEMORY".into(),
        root_dir: root.to_string_lossy().into_owned(),
        region: "us-west-1".into(),
        endpoint: None,
        plot_url: "http://127.0.0.1:1/plot".into(),
        step_delay_secs: 0,
        window_secs: 10,
        host: "127.0.0.1".into(),
        port: 0,
    }
}

fn local_state(dir: &tempfile::TempDir) -> AppState {
    let chart = dir.path().join("plot.svg");
    let config = test_config(dir.path(), &chart);
    let object_store = Arc::new(LocalFsObjectStore::new(dir.path().join("store")));
    let history = Arc::new(MemoryHistoryStore::new());
    AppState::with_backends(config, object_store, history)
}

#[tokio::test]
async fn empty_bucket_samples_zero() {
    let dir = tempfile::tempdir().unwrap();
    let state = local_state(&dir);
    state.object_store.create_bucket("data").await.unwrap();

    let (total, count) = service::sample::calculate_size(&state).await.unwrap();
    assert_eq!((total, count), (0, 0));
}

#[tokio::test]
async fn known_contents_sample_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let state = local_state(&dir);
    state.object_store.create_bucket("data").await.unwrap();
    state
        .object_store
        .put_object("data", "a.txt", b"hello")
        .await
        .unwrap();
    state
        .object_store
        .put_object("data", "b.txt", b"world!!")
        .await
        .unwrap();

    let (total, count) = service::sample::calculate_size(&state).await.unwrap();
    assert_eq!((total, count), (12, 2));
}

#[tokio::test]
async fn provision_is_best_effort() {
    let dir = tempfile::tempdir().unwrap();
    let state = local_state(&dir);

    let outcome = service::provision::run(&state).await.unwrap();
    assert_eq!(outcome.status_code, 200);
    // A second run hits the already-exists path but still completes.
    let outcome = service::provision::run(&state).await.unwrap();
    assert_eq!(outcome.status_code, 200);
    assert!(state.object_store.list_objects("data").await.unwrap().is_empty());
}

#[tokio::test]
async fn end_to_end_single_object_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let state = local_state(&dir);
    state.object_store.create_bucket("data").await.unwrap();
    state.object_store.create_bucket("plots").await.unwrap();

    // Sole bucket content: one object of 21 bytes.
    state
        .object_store
        .put_object("data", "assignment2.txt", &[b'x'; 21])
        .await
        .unwrap();

    let outcome = service::sample::run(&state).await.unwrap();
    assert_eq!(outcome.status_code, 200);

    let samples = service::plot::query_size_history(&state).await.unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].total_size, 21);
    assert_eq!(samples[0].object_count, 1);
    assert_eq!(service::plot::get_max_size(&state).await.unwrap(), 21);

    let outcome = service::plot::run(&state).await.unwrap();
    assert_eq!(outcome.status_code, 200);

    let plots = state.object_store.list_objects("plots").await.unwrap();
    assert_eq!(plots.len(), 1);
    assert_eq!(plots[0].key, "plot.svg");
    assert!(plots[0].size > 0);
}

#[tokio::test]
async fn drive_script_leaves_single_object_and_triggers_once() {
    let dir = tempfile::tempdir().unwrap();

    let hits = Arc::new(AtomicUsize::new(0));
    let app = axum::Router::new().route(
        "/plot",
        axum::routing::post({
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    "ok"
                }
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    let chart = dir.path().join("plot.svg");
    let mut config = test_config(dir.path(), &chart);
    config.plot_url = format!("http://{addr}/plot");
    let object_store = Arc::new(LocalFsObjectStore::new(dir.path().join("store")));
    let history = Arc::new(MemoryHistoryStore::new());
    let state = AppState::with_backends(config, object_store, history);

    state.object_store.create_bucket("data").await.unwrap();
    service::drive::run(&state).await.unwrap();

    let objects = state.object_store.list_objects("data").await.unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].key, "assignment2.txt");
    assert_eq!(objects[0].size, 2);
    let body = tokio::fs::read(dir.path().join("store/data/assignment2.txt"))
        .await
        .unwrap();
    assert_eq!(body, b"21");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sample_trigger_returns_structured_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let state = local_state(&dir);
    state.object_store.create_bucket("data").await.unwrap();

    let app = bucketwatch::api::create_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/sample"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["statusCode"], 200);
    assert!(body["body"].as_str().unwrap().contains("objectCount=0"));
}
