//! The documented end-to-end behaviours, one test per scenario.

use crate::common::{add_actual, add_with_status, make_engine, make_ranked_engine};
use talpa::{
    remove_duplicates, DocumentStatus, RequestQueue, SearchError, COMPARISON_ACCURACY,
    MAX_RESULT_DOCUMENT_COUNT,
};

#[test]
fn basic_retrieval_respects_stop_words() {
    let mut engine = make_engine("fluffy");
    add_actual(&mut engine, 3, "fluffy cat fluffy tail", &[1, 2, 3]);

    let found = engine.find_top_documents("cat").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 3);

    assert!(engine.find_top_documents("fluffy").unwrap().is_empty());
    assert!(engine.find_top_documents("dog").unwrap().is_empty());
}

#[test]
fn minus_words_exclude_documents() {
    let mut engine = make_engine("fluffy");
    add_actual(&mut engine, 3, "fluffy cat fluffy tail", &[1, 2, 3]);

    assert!(engine.find_top_documents("fluffy -cat").unwrap().is_empty());
    assert!(engine.find_top_documents("-tail").unwrap().is_empty());

    let (matched, status) = engine.match_document("fluffy cat fluffy -tail", 3).unwrap();
    assert!(matched.is_empty());
    assert_eq!(status, DocumentStatus::Actual);
}

#[test]
fn relevance_orders_results_and_rating_breaks_ties() {
    let engine = make_ranked_engine();

    let found = engine.find_top_documents("fluffy well-groomed cat").unwrap();
    assert_eq!(found.len(), 3);
    for pair in found.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        let tied = (first.relevance - second.relevance).abs() < COMPARISON_ACCURACY;
        assert!(
            first.relevance > second.relevance || (tied && first.rating >= second.rating),
            "broken ordering between ids {} and {}",
            first.id,
            second.id
        );
    }
}

#[test]
fn equal_relevance_prefers_higher_rating() {
    let mut engine = make_engine("");
    add_actual(&mut engine, 1, "well-groomed cat", &[2, 2, 2]);
    add_actual(&mut engine, 2, "well-groomed cat", &[9, 9, 9]);

    let found = engine.find_top_documents("well-groomed cat").unwrap();
    assert_eq!(found[0].id, 2);
    assert_eq!(found[1].id, 1);
}

#[test]
fn idf_is_zero_for_terms_in_every_document() {
    let mut engine = make_engine("");
    add_actual(&mut engine, 0, "fluffy well-groomed cat", &[1]);
    add_actual(&mut engine, 1, "fluffy well-groomed dog", &[2]);

    let found = engine.find_top_documents("well-groomed cat").unwrap();
    assert_eq!(found[0].id, 0);
    assert!((found[0].relevance - 0.23104906018664842).abs() < 1e-12);
}

#[test]
fn ratings_use_truncated_integer_mean() {
    let mut engine = make_engine("");
    add_actual(&mut engine, 0, "fluffy cat fluffy tail", &[1, 2, 3]);
    add_actual(&mut engine, 1, "sleek dog", &[-4, -5, -6]);
    add_actual(&mut engine, 2, "stern owl", &[8, -9, 10]);

    let rating = |query: &str| engine.find_top_documents(query).unwrap()[0].rating;
    assert_eq!(rating("cat"), 2);
    assert_eq!(rating("dog"), -5);
    assert_eq!(rating("owl"), 3);
}

#[test]
fn predicate_filters_preserve_relevance_order() {
    let mut engine = make_engine("");
    add_actual(&mut engine, 0, "white cat fashion collar", &[8, -3]);
    add_actual(&mut engine, 1, "fluffy cat fluffy tail", &[7, 2, 7]);
    add_actual(&mut engine, 2, "well-groomed dog expressive eyes", &[5, -12, 2, 1]);

    let found = engine
        .find_top_documents_with_filter("fluffy well-groomed cat", |id, _, _| id % 2 == 0)
        .unwrap();
    assert!(found.iter().all(|document| document.id % 2 == 0));
    for pair in found.windows(2) {
        let tied = (pair[0].relevance - pair[1].relevance).abs() < COMPARISON_ACCURACY;
        assert!(pair[0].relevance > pair[1].relevance || tied);
    }
}

#[test]
fn duplicate_removal_keeps_smallest_id() {
    let mut engine = make_engine("");
    add_actual(&mut engine, 2, "funny pet rat", &[1]);
    add_actual(&mut engine, 5, "rat funny pet", &[2]);

    remove_duplicates(&mut engine);
    assert_eq!(engine.document_ids().collect::<Vec<_>>(), [2]);

    // Re-running changes nothing, and the surviving representative stays.
    remove_duplicates(&mut engine);
    assert_eq!(engine.document_ids().collect::<Vec<_>>(), [2]);
}

#[test]
fn sliding_window_evicts_after_a_day() {
    let mut engine = make_engine("and in at");
    add_actual(&mut engine, 1, "curly cat curly tail", &[7, 2, 7]);

    let mut queue = RequestQueue::new(&engine);
    for index in 0..1440 {
        queue.add_find_request(&format!("empty request {index}")).unwrap();
    }
    queue.add_find_request("curly cat").unwrap();

    assert_eq!(queue.get_no_result_requests(), 1439);
}

#[test]
fn results_never_exceed_the_cap() {
    let mut engine = make_engine("");
    for id in 0..20 {
        add_actual(&mut engine, id, "popular cat", &[id]);
    }
    let found = engine.find_top_documents("cat").unwrap();
    assert_eq!(found.len(), MAX_RESULT_DOCUMENT_COUNT);
}

#[test]
fn degenerate_documents_and_queries() {
    let mut engine = make_engine("the and");

    // Admissible, but never matchable.
    add_actual(&mut engine, 1, "", &[1]);
    add_actual(&mut engine, 2, "   ", &[1]);
    add_actual(&mut engine, 3, "the and the", &[1]);
    add_actual(&mut engine, 4, "visible cat", &[1]);
    assert_eq!(engine.get_document_count(), 4);

    // Stop-word-only and minus-only queries return nothing.
    assert!(engine.find_top_documents("the and").unwrap().is_empty());
    assert!(engine.find_top_documents("-cat").unwrap().is_empty());
    assert!(engine.find_top_documents("").unwrap().is_empty());

    let found = engine.find_top_documents("cat").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 4);
}

#[test]
fn status_filtering_is_a_label_not_a_gate() {
    let mut engine = make_engine("");
    add_with_status(&mut engine, 1, "banned cat", DocumentStatus::Banned, &[1]);

    // Indexed like any other document, just invisible to the default search.
    assert!(engine.find_top_documents("cat").unwrap().is_empty());
    let found = engine
        .find_top_documents_with_status("cat", DocumentStatus::Banned)
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 1);
}

#[test]
fn add_then_remove_restores_observable_state() {
    let mut engine = make_engine("the");
    add_actual(&mut engine, 1, "resident cat", &[4]);

    let count_before = engine.get_document_count();
    let ids_before: Vec<_> = engine.document_ids().collect();

    add_actual(&mut engine, 2, "transient dog", &[5]);
    engine.remove_document(2);

    assert_eq!(engine.get_document_count(), count_before);
    assert_eq!(engine.document_ids().collect::<Vec<_>>(), ids_before);
    assert!(engine.find_top_documents("dog").unwrap().is_empty());
    assert!(matches!(
        engine.get_word_frequencies(2),
        Err(SearchError::OutOfRange(_))
    ));
    assert!(matches!(
        engine.match_document("dog", 2),
        Err(SearchError::OutOfRange(_))
    ));
    assert_eq!(engine.find_top_documents("cat").unwrap().len(), 1);
}

#[test]
fn malformed_queries_are_rejected() {
    let mut engine = make_engine("");
    add_actual(&mut engine, 1, "plain cat", &[1]);

    for raw_query in ["-", "--cat", "cat -", "cat - tail", "ca\u{1f}t"] {
        assert!(
            matches!(
                engine.find_top_documents(raw_query),
                Err(SearchError::InvalidArgument(_))
            ),
            "{raw_query:?} must be rejected"
        );
    }
}
