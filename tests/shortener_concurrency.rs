use std::collections::HashSet;
use std::sync::Arc;
use url_shortener::prelude::*;

fn shortener() -> Arc<ShortenerService> {
    Arc::new(ShortenerService::new(
        Arc::new(InMemoryMappingStore::new()),
        Arc::new(RandomCodeGenerator::default()),
        5,
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_encodes_produce_distinct_codes() {
    let service = shortener();

    let handles: Vec<_> = (0..100)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .encode(&format!("https://example.com/{}", i))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        codes.insert(handle.await.unwrap().code);
    }

    assert_eq!(codes.len(), 100);
    assert_eq!(service.list().await.unwrap().len(), 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_encodes_of_same_url() {
    let service = shortener();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.encode("https://example.com").await.unwrap() })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        let record = handle.await.unwrap();
        assert_eq!(record.original_url, "https://example.com");
        codes.insert(record.code);
    }

    assert_eq!(codes.len(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_decodes_count_every_visit() {
    let service = shortener();
    let code = service.encode("https://example.com").await.unwrap().code;

    let handles: Vec<_> = (0..500)
        .map(|_| {
            let service = service.clone();
            let code = code.clone();
            tokio::spawn(async move { service.decode(&code).await.unwrap() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), "https://example.com");
    }

    let stats = service.get_statistics(&code).await.unwrap();
    assert_eq!(stats.visit_count, 500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_decodes_across_codes_are_independent() {
    let service = shortener();
    let first = service.encode("https://example.com/1").await.unwrap().code;
    let second = service.encode("https://example.com/2").await.unwrap().code;

    let handles: Vec<_> = (0..90)
        .map(|i| {
            let service = service.clone();
            let code = if i % 3 == 0 { second.clone() } else { first.clone() };
            tokio::spawn(async move { service.decode(&code).await.unwrap() })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(service.get_statistics(&first).await.unwrap().visit_count, 60);
    assert_eq!(service.get_statistics(&second).await.unwrap().visit_count, 30);
}

#[tokio::test]
async fn test_round_trip_preserves_url() {
    let service = shortener();

    let urls = [
        "https://example.com",
        "http://example.com/path/with spaces?and=query&x=1#fragment",
        "https://пример.рф/путь",
        "not even a url",
    ];

    for url in urls {
        let code = service.encode(url).await.unwrap().code;
        assert_eq!(service.decode(&code).await.unwrap(), url);
    }
}

#[tokio::test]
async fn test_statistics_track_decodes_and_creation_time() {
    let service = shortener();

    let record = service.encode("https://example.com").await.unwrap();
    let fresh = service.get_statistics(&record.code).await.unwrap();
    assert_eq!(fresh.visit_count, 0);
    assert_eq!(fresh.created_at, record.created_at);

    service.decode(&record.code).await.unwrap();
    service.decode(&record.code).await.unwrap();

    let visited = service.get_statistics(&record.code).await.unwrap();
    assert_eq!(visited.visit_count, 2);
    assert_eq!(visited.created_at, record.created_at);
}

#[tokio::test]
async fn test_unknown_code_leaves_store_untouched() {
    let service = shortener();
    service.encode("https://example.com").await.unwrap();

    let result = service.decode("Missing1").await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));

    let records = service.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].visit_count, 0);
}
