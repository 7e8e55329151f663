use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sieve_core::types::{
    DocId, Document, DocumentStatus, ExecutionMode, HasStatus, IdParity, RatingAbove,
};
use sieve_core::{process_queries, SearchIndex};

const STATUSES: [DocumentStatus; 3] = [
    DocumentStatus::Actual,
    DocumentStatus::Irrelevant,
    DocumentStatus::Banned,
];

fn corpus(seed: u64, documents: DocId) -> (SearchIndex, StdRng, Vec<String>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let dictionary: Vec<String> = (0..200)
        .map(|i| format!("w{i}{}", (b'a' + (i % 26) as u8) as char))
        .collect();

    let mut index = SearchIndex::with_stop_words("w0a w1b w2c").unwrap();
    for id in 0..documents {
        let len = rng.random_range(1..30);
        let text: Vec<&str> = (0..len)
            .map(|_| dictionary[rng.random_range(0..dictionary.len())].as_str())
            .collect();
        let ratings: Vec<i32> = (0..rng.random_range(0..4))
            .map(|_| rng.random_range(-10..=10))
            .collect();
        let status = STATUSES[rng.random_range(0..STATUSES.len())];
        index
            .add_document(id * 3, &text.join(" "), status, &ratings)
            .unwrap();
    }
    (index, rng, dictionary)
}

fn query(rng: &mut StdRng, dictionary: &[String], words: usize) -> String {
    (0..words)
        .map(|_| {
            let word = &dictionary[rng.random_range(0..dictionary.len())];
            if rng.random_bool(0.15) {
                format!("-{word}")
            } else {
                word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parallel sums may differ from sequential ones in the last bits, so ids are
/// only compared where the relevance is not tied with a neighbour.
fn assert_same_ranking(a: &[Document], b: &[Document]) {
    assert_eq!(a.len(), b.len());
    let tied = |i: usize| {
        let near = |j: usize| (a[i].relevance - a[j].relevance).abs() < 1e-9;
        i + 1 == a.len() || near(i + 1) || (i > 0 && near(i - 1))
    };
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert_eq!(x.rating, y.rating);
        assert!((x.relevance - y.relevance).abs() < 1e-9);
        if !tied(i) {
            assert_eq!(x.id, y.id);
        }
    }
}

#[test]
fn find_top_documents_agrees() {
    let (index, mut rng, dictionary) = corpus(7, 400);
    for _ in 0..50 {
        let q = query(&mut rng, &dictionary, 12);
        for status in STATUSES {
            let seq = index
                .find_top_documents_in(ExecutionMode::Sequential, &q, &HasStatus(status))
                .unwrap();
            let par = index
                .find_top_documents_in(ExecutionMode::Parallel, &q, &HasStatus(status))
                .unwrap();
            assert_same_ranking(&seq, &par);
        }
        let seq = index
            .find_top_documents_in(ExecutionMode::Sequential, &q, &RatingAbove(0))
            .unwrap();
        let par = index
            .find_top_documents_in(ExecutionMode::Parallel, &q, &RatingAbove(0))
            .unwrap();
        assert_same_ranking(&seq, &par);
    }
}

#[test]
fn match_document_agrees() {
    let (index, mut rng, dictionary) = corpus(11, 200);
    for _ in 0..20 {
        let q = query(&mut rng, &dictionary, 20);
        for id in index.ids() {
            let seq = index
                .match_document_in(ExecutionMode::Sequential, &q, id)
                .unwrap();
            let par = index
                .match_document_in(ExecutionMode::Parallel, &q, id)
                .unwrap();
            assert_eq!(seq, par, "query {q:?}, document {id}");
        }
    }
}

#[test]
fn remove_document_agrees() {
    let (mut seq, mut rng, dictionary) = corpus(13, 300);
    let mut par = seq.clone();

    let mut ids: Vec<DocId> = seq.ids().collect();
    ids.retain(|_| rng.random_bool(0.5));
    for &id in &ids {
        assert!(seq.remove_document_in(ExecutionMode::Sequential, id));
        assert!(par.remove_document_in(ExecutionMode::Parallel, id));
    }

    assert_eq!(seq.ids().collect::<Vec<_>>(), par.ids().collect::<Vec<_>>());
    assert_eq!(seq.stats(), par.stats());
    for id in seq.ids() {
        assert_eq!(seq.word_frequencies(id), par.word_frequencies(id));
    }
    for _ in 0..20 {
        let q = query(&mut rng, &dictionary, 10);
        assert_same_ranking(
            &seq.find_top_documents(&q).unwrap(),
            &par.find_top_documents(&q).unwrap(),
        );
    }
}

#[test]
fn batch_matches_individual_queries() {
    let (index, mut rng, dictionary) = corpus(17, 250);
    let queries: Vec<String> = (0..32).map(|_| query(&mut rng, &dictionary, 6)).collect();
    let batch = process_queries(&index, &queries).unwrap();
    for (q, docs) in queries.iter().zip(&batch) {
        assert_same_ranking(docs, &index.find_top_documents(q).unwrap());
    }
}

#[test]
fn parity_predicate_only_returns_matching_ids() {
    let (index, mut rng, dictionary) = corpus(19, 200);
    for _ in 0..20 {
        let q = query(&mut rng, &dictionary, 8);
        let docs = index
            .find_top_documents_in(ExecutionMode::Parallel, &q, &IdParity::Even)
            .unwrap();
        assert!(docs.iter().all(|d| d.id % 2 == 0));
    }
}
