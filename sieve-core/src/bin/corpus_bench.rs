//! Corpus Benchmarking Tool
//!
//! Generates a random corpus and compares the sequential and parallel
//! variants of ranking, matching and removal on it.
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/corpus_bench --documents 10000 --dictionary 10000 --query-words 500
//!
//! # Log every indexed document
//! RUST_LOG=sieve_core=debug ./target/release/corpus_bench --documents 100
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Find top documents ===
//! --------------------------------
//! Mode        : Sequential
//! Elapsed     : 0.084 s
//! Checksum    : 5
//! --------------------------------
//! ```
//!
//! Run in release mode; the parallel figures depend on `RAYON_NUM_THREADS`.

use std::time::{Duration, Instant};

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sieve_core::types::{DocumentStatus, ExecutionMode, HasStatus, Result};
use sieve_core::SearchIndex;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const MODES: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

#[derive(Parser)]
struct Args {
    /// Number of generated documents
    #[arg(long, default_value_t = 10_000)]
    documents: usize,
    /// Number of distinct dictionary words
    #[arg(long, default_value_t = 10_000)]
    dictionary: usize,
    /// Maximum length of a dictionary word
    #[arg(long, default_value_t = 25)]
    max_word_len: usize,
    /// Words per generated document
    #[arg(long, default_value_t = 100)]
    words_per_document: usize,
    /// Words per generated query
    #[arg(long, default_value_t = 500)]
    query_words: usize,
    /// Probability that a query word is a minus-word
    #[arg(long, default_value_t = 0.1)]
    minus_probability: f64,
    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let dictionary = generate_dictionary(&mut rng, args.dictionary.max(1), args.max_word_len);
    let query = generate_query(&mut rng, &dictionary, args.query_words, args.minus_probability);

    let mut index = SearchIndex::new();
    let start = Instant::now();
    for id in 0..args.documents {
        let text = generate_text(&mut rng, &dictionary, args.words_per_document);
        index.add_document(id as i32, &text, DocumentStatus::Actual, &[1, 2, 3])?;
    }
    info!(
        documents = index.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "corpus indexed"
    );
    println!("Index       : {}\n", index.stats());

    println!("=== Find top documents ===");
    for mode in MODES {
        let mut found = 0;
        let elapsed = time(|| {
            let docs =
                index.find_top_documents_in(mode, &query, &HasStatus(DocumentStatus::Actual))?;
            found = docs.len();
            Ok(())
        })?;
        print_perf(mode, elapsed, found);
    }

    println!("=== Match every document ===");
    for mode in MODES {
        let mut words = 0;
        let elapsed = time(|| {
            words = 0;
            for id in index.ids() {
                words += index.match_document_in(mode, &query, id)?.0.len();
            }
            Ok(())
        })?;
        print_perf(mode, elapsed, words);
    }

    println!("=== Remove every document ===");
    for mode in MODES {
        let mut copy = index.clone();
        let ids: Vec<i32> = copy.ids().collect();
        let mut removed = 0;
        let elapsed = time(|| {
            removed = ids
                .iter()
                .filter(|&&id| copy.remove_document_in(mode, id))
                .count();
            Ok(())
        })?;
        print_perf(mode, elapsed, removed);
    }

    Ok(())
}

fn generate_word(rng: &mut StdRng, max_len: usize) -> String {
    let len = rng.random_range(1..=max_len.max(1));
    (0..len).map(|_| rng.random_range(b'a'..=b'z') as char).collect()
}

fn generate_dictionary(rng: &mut StdRng, size: usize, max_len: usize) -> Vec<String> {
    let mut words: Vec<String> = (0..size).map(|_| generate_word(rng, max_len)).collect();
    words.sort_unstable();
    words.dedup();
    words
}

fn generate_text(rng: &mut StdRng, dictionary: &[String], words: usize) -> String {
    let mut text = String::new();
    for i in 0..words {
        if i > 0 {
            text.push(' ');
        }
        text.push_str(&dictionary[rng.random_range(0..dictionary.len())]);
    }
    text
}

fn generate_query(
    rng: &mut StdRng,
    dictionary: &[String],
    words: usize,
    minus_probability: f64,
) -> String {
    let mut query = String::new();
    for i in 0..words {
        if i > 0 {
            query.push(' ');
        }
        if rng.random_bool(minus_probability.clamp(0.0, 1.0)) {
            query.push('-');
        }
        query.push_str(&dictionary[rng.random_range(0..dictionary.len())]);
    }
    query
}

fn time<F: FnMut() -> Result<()>>(mut f: F) -> Result<Duration> {
    let start = Instant::now();
    f()?;
    Ok(start.elapsed())
}

fn print_perf(mode: ExecutionMode, elapsed: Duration, checksum: usize) {
    println!("--------------------------------");
    println!("Mode        : {:?}", mode);
    println!("Elapsed     : {:.3} s", elapsed.as_secs_f64());
    println!("Checksum    : {}", checksum);
    println!("--------------------------------\n");
}
