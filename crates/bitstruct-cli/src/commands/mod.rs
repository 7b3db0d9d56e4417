pub mod classify;
pub mod length_scale;
pub mod list;

use std::path::Path;

use bitstruct_core::{CharClassEncoding, Corpus, EngineError, Registry};
use serde::Serialize;

use crate::EncodingArgs;

/// Print an error with its stable code and exit.
pub fn fail(err: &EngineError) -> ! {
    eprintln!("error [{}]: {err}", err.stable_code());
    std::process::exit(1);
}

/// Read a corpus file; its name is the file stem.
pub fn load_corpus(path: &str) -> Corpus {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Cannot read corpus '{path}': {e}");
            std::process::exit(1);
        }
    };
    let name = Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    match Corpus::with_metadata(name, text, path, "unknown") {
        Ok(corpus) => corpus,
        Err(e) => fail(&e.into()),
    }
}

/// Registry with the built-ins, the given corpora and the character-class
/// encoding. Returns the registered corpus names in argument order.
pub fn make_registry(paths: &[&str], encoding: &EncodingArgs) -> (Registry, Vec<String>) {
    let mut registry = Registry::with_builtins();
    let chars = CharClassEncoding::new(&encoding.ones, &encoding.zeros);
    let mut names = Vec::with_capacity(paths.len());
    for path in paths {
        let corpus = load_corpus(path);
        let mut dropped: Vec<char> = chars
            .unmapped(corpus.text())
            .into_iter()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();
        if !dropped.is_empty() {
            dropped.sort_unstable();
            log::warn!(
                "{}: {} character(s) not covered by the encoding are dropped: {:?}",
                corpus.name(),
                dropped.len(),
                &dropped[..dropped.len().min(20)]
            );
        }
        match registry.add_corpus(corpus) {
            Ok(info) => names.push(info.name),
            Err(e) => fail(&e),
        }
    }
    let description = format!("'{}' -> 1, '{}' -> 0", encoding.ones, encoding.zeros);
    let enc = chars.into_encoding(&encoding.encoding_name, description, "", false);
    if let Err(e) = registry.add_encoding(enc) {
        fail(&e);
    }
    (registry, names)
}

/// Write `value` as JSON if a path was given.
pub fn write_output<T: Serialize>(path: Option<&str>, value: &T) {
    let Some(path) = path else { return };
    match bitstruct_core::write_json(Path::new(path), value) {
        Ok(()) => println!("\nResults written to {path}"),
        Err(e) => {
            eprintln!("Failed to write {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Parse "1,2,4" into block sizes.
pub fn parse_block_sizes(raw: &str) -> Vec<usize> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(k) => k,
            Err(_) => {
                eprintln!("Invalid block size '{s}'");
                std::process::exit(1);
            }
        })
        .collect()
}
