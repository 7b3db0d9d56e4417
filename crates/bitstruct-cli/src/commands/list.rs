use bitstruct_core::Registry;

pub fn run(corpus_paths: &[String], json: bool) {
    let mut registry = Registry::with_builtins();
    for path in corpus_paths {
        if let Err(e) = registry.add_corpus(super::load_corpus(path)) {
            super::fail(&e);
        }
    }
    let catalog = registry.catalog();

    if json {
        match bitstruct_core::report::to_json(&catalog) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Failed to serialize catalog: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Null models:");
    for null in &catalog.nulls {
        let words = if null.needs_words { " [needs words]" } else { "" };
        println!("  {:<10} {}{words}", null.name, null.description);
        println!("  {:<10}   preserves: {}", "", null.preserves);
        println!("  {:<10}   destroys:  {}", "", null.destroys);
    }

    println!("\nMetrics:");
    for metric in &catalog.metrics {
        println!("  {:<10} {}", metric.name, metric.description);
    }

    if !catalog.corpora.is_empty() {
        println!("\nCorpora:");
        for corpus in &catalog.corpora {
            println!(
                "  {:<20} {:>9} chars {:>7} words  ({})",
                corpus.name, corpus.chars, corpus.words, corpus.source
            );
        }
    }
}
