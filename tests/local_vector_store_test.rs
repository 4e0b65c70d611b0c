use tempfile::TempDir;

use lorebook::application::ports::{
    CollectionConfig, DistanceMetric, VectorStore, VectorStoreError,
};
use lorebook::domain::{Chunk, DocumentMetadata, Embedding, FileType};
use lorebook::infrastructure::persistence::LocalVectorStore;

const COLLECTION: &str = "energy";

fn chunk(source: &str, text: &str) -> Chunk {
    Chunk::new(
        text.to_string(),
        DocumentMetadata::new(source, FileType::Txt, format!("/docs/{source}")),
    )
}

fn store(dir: &TempDir) -> LocalVectorStore {
    LocalVectorStore::new(dir.path(), COLLECTION)
}

#[tokio::test]
async fn given_new_store_when_creating_collection_then_file_is_written_once() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let config = CollectionConfig::new(3, DistanceMetric::Cosine);

    assert!(!store.collection_exists().await.unwrap());
    assert!(store.create_collection(&config).await.unwrap());
    assert!(!store.create_collection(&config).await.unwrap());

    assert!(store.collection_exists().await.unwrap());
    assert!(dir.path().join("energy.json").is_file());
}

#[tokio::test]
async fn given_missing_collection_when_searching_then_returns_collection_not_found() {
    let dir = TempDir::new().unwrap();

    let result = store(&dir)
        .search(&Embedding::new(vec![1.0, 0.0, 0.0]), 3)
        .await;

    assert!(matches!(result, Err(VectorStoreError::CollectionNotFound(_))));
}

#[tokio::test]
async fn given_missing_collection_when_upserting_then_returns_collection_not_found() {
    let dir = TempDir::new().unwrap();

    let result = store(&dir)
        .upsert(&[chunk("a.txt", "a")], &[Embedding::new(vec![1.0])])
        .await;

    assert!(matches!(result, Err(VectorStoreError::CollectionNotFound(_))));
}

#[tokio::test]
async fn given_points_when_searching_then_results_are_ranked_by_cosine_similarity() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store
        .create_collection(&CollectionConfig::new(2, DistanceMetric::Cosine))
        .await
        .unwrap();
    store
        .upsert(
            &[chunk("east.txt", "east"), chunk("north.txt", "north"), chunk("ne.txt", "ne")],
            &[
                Embedding::new(vec![1.0, 0.0]),
                Embedding::new(vec![0.0, 1.0]),
                Embedding::new(vec![0.7, 0.7]),
            ],
        )
        .await
        .unwrap();

    let results = store.search(&Embedding::new(vec![1.0, 0.1]), 2).await.unwrap();

    let sources: Vec<&str> = results
        .iter()
        .map(|r| r.chunk.metadata.source.as_str())
        .collect();
    assert_eq!(sources, vec!["east.txt", "ne.txt"]);
}

#[tokio::test]
async fn given_euclidean_collection_when_searching_then_nearest_point_ranks_first() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store
        .create_collection(&CollectionConfig::new(1, DistanceMetric::Euclidean))
        .await
        .unwrap();
    store
        .upsert(
            &[chunk("far.txt", "far"), chunk("near.txt", "near")],
            &[Embedding::new(vec![10.0]), Embedding::new(vec![1.0])],
        )
        .await
        .unwrap();

    let results = store.search(&Embedding::new(vec![0.0]), 1).await.unwrap();

    assert_eq!(results[0].chunk.metadata.source, "near.txt");
}

#[tokio::test]
async fn given_wrong_dimensions_when_upserting_then_rejects_batch() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store
        .create_collection(&CollectionConfig::new(3, DistanceMetric::Cosine))
        .await
        .unwrap();

    let result = store
        .upsert(&[chunk("a.txt", "a")], &[Embedding::new(vec![1.0, 2.0])])
        .await;

    assert!(matches!(result, Err(VectorStoreError::UpsertFailed(_))));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn given_same_chunk_id_when_upserting_again_then_point_is_replaced() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store
        .create_collection(&CollectionConfig::new(1, DistanceMetric::Cosine))
        .await
        .unwrap();
    let mut original = chunk("a.txt", "first");

    store
        .upsert(&[original.clone()], &[Embedding::new(vec![1.0])])
        .await
        .unwrap();
    original.text = "second".to_string();
    store
        .upsert(&[original], &[Embedding::new(vec![1.0])])
        .await
        .unwrap();

    let sample = store.sample(10).await.unwrap();
    assert_eq!(sample.len(), 1);
    assert_eq!(sample[0].text, "second");
}

#[tokio::test]
async fn given_persisted_points_when_reopening_then_chunks_and_metadata_round_trip() {
    let dir = TempDir::new().unwrap();
    let original = Chunk::new(
        "page text".to_string(),
        DocumentMetadata::new("a.pdf", FileType::Pdf, "/docs/a.pdf")
            .with_page(Some(7))
            .with_chunk_index(2),
    );
    {
        let store = store(&dir);
        store
            .create_collection(&CollectionConfig::new(2, DistanceMetric::DotProduct))
            .await
            .unwrap();
        store
            .upsert(&[original.clone()], &[Embedding::new(vec![0.5, 0.5])])
            .await
            .unwrap();
    }

    let reopened = store(&dir);
    let sample = reopened.sample(10).await.unwrap();

    assert_eq!(sample, vec![original]);
    assert_eq!(reopened.count().await.unwrap(), 1);
}

#[tokio::test]
async fn given_collection_when_deleting_then_file_and_cache_are_gone() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store
        .create_collection(&CollectionConfig::new(1, DistanceMetric::Cosine))
        .await
        .unwrap();

    store.delete_collection().await.unwrap();
    store.delete_collection().await.unwrap();

    assert!(!store.collection_exists().await.unwrap());
    assert!(!dir.path().join("energy.json").exists());
    assert_eq!(store.count().await.unwrap(), 0);
    assert!(store.sample(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn given_failing_disk_write_when_upserting_then_cache_keeps_persisted_state() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store
        .create_collection(&CollectionConfig::new(1, DistanceMetric::Cosine))
        .await
        .unwrap();
    // A directory at the staging path makes the temporary write fail.
    std::fs::create_dir(dir.path().join("energy.json.tmp")).unwrap();

    let result = store
        .upsert(&[chunk("a.txt", "lost")], &[Embedding::new(vec![1.0])])
        .await;

    assert!(matches!(result, Err(VectorStoreError::UpsertFailed(_))));
    assert_eq!(store.count().await.unwrap(), 0);
    assert!(store.sample(5).await.unwrap().is_empty());
    assert_eq!(LocalVectorStore::new(dir.path(), COLLECTION).count().await.unwrap(), 0);
}

#[tokio::test]
async fn given_many_points_when_upserting_in_batches_then_all_are_kept_in_order() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store
        .create_collection(&CollectionConfig::new(1, DistanceMetric::Cosine))
        .await
        .unwrap();
    let first: Vec<Chunk> = (0..50).map(|i| chunk("a.txt", &format!("a{i}"))).collect();
    let second: Vec<Chunk> = (0..50).map(|i| chunk("b.txt", &format!("b{i}"))).collect();
    let vectors = vec![Embedding::new(vec![1.0]); 50];

    store.upsert(&first, &vectors).await.unwrap();
    store.upsert(&second, &vectors).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 100);
    let sample = store.sample(100).await.unwrap();
    assert_eq!(sample[0].text, "a0");
    assert_eq!(sample[50].text, "b0");
}
