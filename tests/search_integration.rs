//! End-to-end scenarios over the whole engine: indexing, ranking,
//! matching, removal, and the thin collaborators around them.

use sagitta::batch::{process_queries, process_queries_joined};
use sagitta::dedup::remove_duplicates;
use sagitta::index::{DocumentStatus, ExecutionMode, SearchConfig, SearchIndex};
use sagitta::paginate::paginate;
use sagitta::request_log::RequestLog;

const MODES: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

/// Same documents in the same order; relevance compared within a tight
/// tolerance because the parallel path may sum a document's per-word
/// contributions in a different order.
fn assert_rankings_agree(
    sequential: &[sagitta::ScoredDocument],
    parallel: &[sagitta::ScoredDocument],
    context: &str,
) {
    assert_eq!(sequential.len(), parallel.len(), "{context}");
    for (seq, par) in sequential.iter().zip(parallel) {
        assert_eq!(seq.id, par.id, "{context}");
        assert_eq!(seq.rating, par.rating, "{context}");
        assert!((seq.relevance - par.relevance).abs() < 1e-12, "{context}");
    }
}

fn cat_corpus() -> SearchIndex {
    let mut index = SearchIndex::new(["and"]).unwrap();
    index
        .add_document(
            0,
            "white cat and fancy collar",
            DocumentStatus::Actual,
            &[8, -3],
        )
        .unwrap();
    index
        .add_document(1, "cat and fancy collar", DocumentStatus::Actual, &[7, 2, 7])
        .unwrap();
    index
        .add_document(
            2,
            "black dog fluffy tail white collar",
            DocumentStatus::Actual,
            &[5, -12, 2, 1],
        )
        .unwrap();
    index
}

#[test]
fn cat_query_finds_cat_documents() {
    let index = cat_corpus();
    for mode in MODES {
        let results = index
            .find_top_documents("cat", DocumentStatus::Actual, mode)
            .unwrap();
        let mut ids: Vec<_> = results.iter().map(|doc| doc.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1]);
    }
}

#[test]
fn minus_cat_leaves_only_the_dog() {
    let index = cat_corpus();
    for mode in MODES {
        let results = index
            .find_top_documents("-cat fancy collar", DocumentStatus::Actual, mode)
            .unwrap();
        let ids: Vec<_> = results.iter().map(|doc| doc.id).collect();
        assert_eq!(ids, vec![2]);
    }
}

#[test]
fn ratings_are_truncating_averages() {
    let mut index = SearchIndex::new(["and"]).unwrap();
    index
        .add_document(0, "cat", DocumentStatus::Actual, &[8, 8])
        .unwrap();
    index
        .add_document(1, "dog", DocumentStatus::Actual, &[])
        .unwrap();
    index
        .add_document(2, "tail", DocumentStatus::Actual, &[-7, -2, -2])
        .unwrap();
    let rating_of = |query: &str| {
        index
            .find_top_documents(query, DocumentStatus::Actual, ExecutionMode::Sequential)
            .unwrap()[0]
            .rating
    };
    assert_eq!(rating_of("cat"), 8);
    assert_eq!(rating_of("dog"), 0);
    assert_eq!(rating_of("tail"), -3);
}

#[test]
fn term_frequencies_sum_to_one_for_every_document() {
    let index = cat_corpus();
    for id in index.document_ids() {
        let total: f64 = index.word_frequencies(id).values().sum();
        assert!((total - 1.0).abs() < 1e-9, "document {id}");
    }
}

#[test]
fn results_are_sorted_capped_and_tie_broken() {
    let mut index = SearchIndex::new(["and"]).unwrap();
    for id in 0..10 {
        // Same text: relevance ties everywhere, ratings must decide.
        index
            .add_document(id, "cat collar", DocumentStatus::Actual, &[id as i32])
            .unwrap();
    }
    for mode in MODES {
        let results = index
            .find_top_documents("cat", DocumentStatus::Actual, mode)
            .unwrap();
        assert_eq!(results.len(), 5);
        let ratings: Vec<_> = results.iter().map(|doc| doc.rating).collect();
        assert_eq!(ratings, vec![9, 8, 7, 6, 5]);
        for pair in results.windows(2) {
            assert!(pair[0].relevance >= pair[1].relevance - 1e-6);
        }
    }
}

#[test]
fn sequential_and_parallel_agree_on_normalized_queries() {
    let index = cat_corpus();
    for query in [
        "cat",
        "fancy collar",
        "white -dog",
        "-cat fancy collar",
        "black fluffy tail dog white collar",
    ] {
        let sequential = index
            .find_top_documents(query, DocumentStatus::Actual, ExecutionMode::Sequential)
            .unwrap();
        let parallel = index
            .find_top_documents(query, DocumentStatus::Actual, ExecutionMode::Parallel)
            .unwrap();
        assert_rankings_agree(&sequential, &parallel, query);

        for id in index.document_ids() {
            let seq_match = index
                .match_document(query, id, ExecutionMode::Sequential)
                .unwrap();
            let par_match = index
                .match_document(query, id, ExecutionMode::Parallel)
                .unwrap();
            assert_eq!(seq_match, par_match, "query {query:?}, document {id}");
        }
    }
}

#[test]
fn removal_is_observable_and_absent_removal_is_not() {
    for mode in MODES {
        let mut index = cat_corpus();
        index.remove_document(1, mode);
        assert_eq!(index.document_ids().collect::<Vec<_>>(), vec![0, 2]);
        assert!(index.word_frequencies(1).is_empty());

        let before: Vec<_> = index.document_ids().collect();
        index.remove_document(99, mode);
        assert_eq!(index.document_ids().collect::<Vec<_>>(), before);

        // The surviving cat document is still ranked.
        let results = index
            .find_top_documents("cat", DocumentStatus::Actual, ExecutionMode::Sequential)
            .unwrap();
        assert_eq!(results.iter().map(|d| d.id).collect::<Vec<_>>(), vec![0]);
    }
}

#[test]
fn duplicate_detector_keeps_lowest_id() {
    let mut index = SearchIndex::new(["and"]).unwrap();
    index
        .add_document(0, "fancy cat and collar", DocumentStatus::Actual, &[1])
        .unwrap();
    index
        .add_document(1, "black dog", DocumentStatus::Actual, &[1])
        .unwrap();
    index
        .add_document(3, "collar fancy cat cat", DocumentStatus::Actual, &[1])
        .unwrap();
    let removed = remove_duplicates(&mut index);
    assert_eq!(removed, vec![3]);
    assert_eq!(index.document_ids().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn batch_runner_matches_individual_calls() {
    let index = cat_corpus();
    let queries: Vec<String> = ["cat", "-cat fancy collar", "unicorn"]
        .iter()
        .map(|q| q.to_string())
        .collect();
    let batched = process_queries(&index, &queries).unwrap();
    for (query, batch_result) in queries.iter().zip(&batched) {
        let direct = index
            .find_top_documents(query, DocumentStatus::Actual, ExecutionMode::Sequential)
            .unwrap();
        assert_eq!(batch_result, &direct, "query {query:?}");
    }
    let joined = process_queries_joined(&index, &queries).unwrap();
    let expected: Vec<_> = batched.into_iter().flatten().collect();
    assert_eq!(joined, expected);
}

#[test]
fn request_log_counts_empty_results_in_window() {
    let index = cat_corpus();
    let mut log = RequestLog::new(&index);
    log.add_request("cat", DocumentStatus::Actual).unwrap();
    log.add_request("unicorn", DocumentStatus::Actual).unwrap();
    log.add_request("collar", DocumentStatus::Actual).unwrap();
    log.add_request("griffin", DocumentStatus::Actual).unwrap();
    assert_eq!(log.no_result_requests(), 2);
}

#[test]
fn pagination_splits_search_results() {
    let mut index = SearchIndex::new(["and"]).unwrap();
    for id in 0..5 {
        index
            .add_document(id, "cat collar", DocumentStatus::Actual, &[id as i32])
            .unwrap();
    }
    let results = index
        .find_top_documents("cat", DocumentStatus::Actual, ExecutionMode::Sequential)
        .unwrap();
    let pages = paginate(&results, 2);
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].len(), 2);
    assert_eq!(pages[2].len(), 1);
}

#[test]
fn scored_documents_serialize() {
    let index = cat_corpus();
    let results = index
        .find_top_documents("cat", DocumentStatus::Actual, ExecutionMode::Sequential)
        .unwrap();
    let json = serde_json::to_string(&results).unwrap();
    let back: Vec<sagitta::ScoredDocument> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, results);
}

#[test]
fn single_threaded_pool_still_supports_parallel_mode() {
    let mut index = SearchIndex::with_config(
        ["and"],
        SearchConfig {
            thread_pool_size: Some(1),
        },
    )
    .unwrap();
    index
        .add_document(0, "cat collar", DocumentStatus::Actual, &[3])
        .unwrap();
    let results = index
        .find_top_documents("cat", DocumentStatus::Actual, ExecutionMode::Parallel)
        .unwrap();
    assert_eq!(results.len(), 1);
    index.remove_document(0, ExecutionMode::Parallel);
    assert_eq!(index.document_count(), 0);
}
