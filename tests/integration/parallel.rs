//! Sequential/parallel agreement and the batch driver.

use crate::common::{add_actual, make_engine, make_pet_corpus};
use talpa::{process_queries, process_queries_joined, DocumentId, DocumentStatus};

const QUERIES: &[&str] = &[
    "nasty rat -not",
    "not very funny pet",
    "curly hair",
    "pet",
    "rat -curly",
    "absent words only",
];

#[test]
fn parallel_find_matches_sequential_on_every_query() {
    let engine = make_pet_corpus();
    for raw_query in QUERIES {
        assert_eq!(
            engine.find_top_documents(raw_query).unwrap(),
            engine.find_top_documents_parallel(raw_query).unwrap(),
            "query {raw_query:?}"
        );
    }
}

#[test]
fn parallel_find_with_filter_matches_sequential() {
    let engine = make_pet_corpus();
    for raw_query in QUERIES {
        let sequential = engine
            .find_top_documents_with_filter(raw_query, |id, _, rating| id % 2 == 0 && rating >= 0)
            .unwrap();
        let parallel = engine
            .find_top_documents_with_filter_parallel(raw_query, |id, _, rating| {
                id % 2 == 0 && rating >= 0
            })
            .unwrap();
        assert_eq!(sequential, parallel, "query {raw_query:?}");
    }
}

#[test]
fn parallel_match_matches_sequential() {
    let engine = make_pet_corpus();
    for raw_query in QUERIES {
        for document_id in engine.document_ids() {
            assert_eq!(
                engine.match_document(raw_query, document_id).unwrap(),
                engine.match_document_parallel(raw_query, document_id).unwrap(),
                "query {raw_query:?}, document {document_id}"
            );
        }
    }
}

#[test]
fn parallel_removal_matches_sequential() {
    let mut sequential = make_pet_corpus();
    let mut parallel = make_pet_corpus();

    for document_id in [3, 0] {
        sequential.remove_document(document_id);
        parallel.remove_document_parallel(document_id);
    }

    assert_eq!(
        sequential.document_ids().collect::<Vec<_>>(),
        parallel.document_ids().collect::<Vec<_>>()
    );
    for raw_query in QUERIES {
        assert_eq!(
            sequential.find_top_documents(raw_query).unwrap(),
            parallel.find_top_documents(raw_query).unwrap(),
            "query {raw_query:?}"
        );
    }
}

#[test]
fn batch_results_correspond_positionally() {
    let engine = make_pet_corpus();
    let batched = process_queries(&engine, QUERIES).unwrap();

    assert_eq!(batched.len(), QUERIES.len());
    for (raw_query, result) in QUERIES.iter().zip(&batched) {
        assert_eq!(result, &engine.find_top_documents(raw_query).unwrap());
    }
}

#[test]
fn joined_batch_concatenates_in_order() {
    let engine = make_pet_corpus();
    let expected: Vec<_> = process_queries(&engine, QUERIES)
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(process_queries_joined(&engine, QUERIES).unwrap(), expected);
}

#[test]
fn wide_batch_over_larger_corpus() {
    let mut engine = make_engine("the");
    let vocabulary = ["cat", "dog", "rat", "owl", "fox", "bat", "hen", "elk"];
    for id in 0..64 {
        let text = format!(
            "{} {} {}",
            vocabulary[id % vocabulary.len()],
            vocabulary[(id * 3 + 1) % vocabulary.len()],
            vocabulary[(id * 5 + 2) % vocabulary.len()],
        );
        add_actual(&mut engine, id as DocumentId, &text, &[(id % 11) as i32]);
    }

    let queries: Vec<String> = (0..32)
        .map(|index| {
            format!(
                "{} -{}",
                vocabulary[index % vocabulary.len()],
                vocabulary[(index + 4) % vocabulary.len()]
            )
        })
        .collect();

    let batched = process_queries(&engine, &queries).unwrap();
    for (raw_query, result) in queries.iter().zip(&batched) {
        assert_eq!(result, &engine.find_top_documents(raw_query).unwrap());
        assert_eq!(
            result,
            &engine.find_top_documents_parallel(raw_query).unwrap()
        );
    }
}

#[test]
fn concurrent_readers_share_the_engine() {
    let mut engine = make_engine("");
    add_actual(&mut engine, 1, "shared cat", &[1]);
    add_actual(&mut engine, 2, "shared dog", &[2]);
    let engine = &engine;

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(move || {
                for _ in 0..50 {
                    let cats = engine.find_top_documents("cat").unwrap();
                    assert_eq!(cats.len(), 1);
                    let shared = engine.find_top_documents_parallel("shared").unwrap();
                    assert_eq!(shared.len(), 2);
                }
            });
        }
    });
}

#[test]
fn status_overload_agrees_across_policies() {
    let mut engine = make_engine("");
    engine
        .add_document(1, "grim cat", DocumentStatus::Irrelevant, &[3])
        .unwrap();
    engine
        .add_document(2, "grim dog", DocumentStatus::Irrelevant, &[4])
        .unwrap();

    assert_eq!(
        engine
            .find_top_documents_with_status("grim", DocumentStatus::Irrelevant)
            .unwrap(),
        engine
            .find_top_documents_with_status_parallel("grim", DocumentStatus::Irrelevant)
            .unwrap()
    );
}
