//! Basic permutation test example.
//!
//! Registers a small synthetic corpus, encodes vowels as 1 and consonants as
//! 0, and runs the word-permutation test against every compressor.
//!
//! Run: `cargo run --example basic`

use bitstruct_core::{CharClassEncoding, Registry, classify, quick_test};

fn main() {
    let mut registry = Registry::with_builtins();

    // Phrases repeat in a fixed order, so word order carries structure.
    let text = "the cat sat on the mat and the dog ran to the log ".repeat(60);
    registry
        .register_corpus("nursery", &text)
        .expect("non-empty corpus");

    let vowels = CharClassEncoding::new("aeiou", "bcdfghjklmnpqrstvwxyz");
    registry
        .add_encoding(vowels.into_encoding(
            "vowel",
            "vowel = 1, consonant = 0",
            "vowel placement carries structure across words",
            true,
        ))
        .expect("encoding passes the registration check");

    let result = quick_test(&registry, "nursery", "vowel", 200).expect("test runs");
    println!("{}", result.summary_table());
    println!("\nClaim level: {}", classify(&result).message());
}
