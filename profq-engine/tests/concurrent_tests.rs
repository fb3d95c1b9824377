//! Concurrent use of a shared engine
//!
//! Callers run extraction methods concurrently and score each result as it
//! arrives, synchronizing only before reconciliation. One engine instance is
//! shared across tasks without locking.

use std::sync::Arc;

use profq_engine::{CandidateRecord, QualityEngine, Tier};

fn candidate(followers: i64, with_name: bool) -> CandidateRecord {
    let record = CandidateRecord::new()
        .with("username", "shared")
        .with("followers", followers)
        .with("following", 10)
        .with("posts", 3)
        .with("user_id", "42");
    if with_name {
        record.with("full_name", "Shared Name")
    } else {
        record
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_scoring_matches_sequential() {
    let engine = Arc::new(QualityEngine::default());

    let mut handles = Vec::new();
    for i in 0..64_i64 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let record = candidate(i, i % 2 == 0);
            let label = format!("method-{}", i);
            (record.clone(), engine.score(&record, &label))
        }));
    }

    for handle in handles {
        let (record, parallel) = handle.await.unwrap();
        let sequential = engine.score(&record, &parallel.source_label);
        assert_eq!(parallel, sequential);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_score_in_parallel_then_reconcile() {
    let engine = Arc::new(QualityEngine::default());

    let api = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            let record = candidate(439, true).with("is_private", false);
            let quality = engine.score(&record, "api");
            (record, quality)
        })
    };
    let html = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            let record = candidate(0, false);
            let quality = engine.score(&record, "html");
            (record, quality)
        })
    };

    let (api_record, api_quality) = api.await.unwrap();
    let (html_record, html_quality) = html.await.unwrap();

    assert_eq!(api_quality.tier, Tier::Good);
    assert_eq!(html_quality.tier, Tier::Acceptable);
    assert!(api_quality.score > html_quality.score);

    // html is primary but only acceptable; api scores strictly higher
    let canonical = engine
        .combine(Some(&html_record), Some(&api_record), "html", "api")
        .unwrap();
    assert_eq!(canonical.extraction_method, "api");
    assert_eq!(canonical.tier(), Tier::Good);
}
