//! The full claim protocol on one corpus.

use bitstruct_core::{
    ClaimAssessment, CrossCorpusComparison, ExecutorConfig, LengthScaleCurve, LengthScaleSpec,
    TestResult, TestSpec, assess, run_length_scale_test_with, run_test_with,
};
use serde::Serialize;

use crate::EncodingArgs;

pub struct ClassifyCommandConfig<'a> {
    pub corpus_path: &'a str,
    pub encoding: &'a EncodingArgs,
    pub compare: &'a [String],
    pub length_scale: bool,
    pub n_perm: usize,
    pub seed: u64,
    pub workers: usize,
    pub output_path: Option<&'a str>,
}

#[derive(Serialize)]
struct ClassifyReport {
    assessment: ClaimAssessment,
    word_perm: TestResult,
    length_scale: Option<LengthScaleCurve>,
    cross_corpus: Option<CrossCorpusComparison>,
}

pub fn run(cfg: ClassifyCommandConfig<'_>) {
    let mut paths = vec![cfg.corpus_path];
    paths.extend(cfg.compare.iter().map(String::as_str));
    let (registry, names) = super::make_registry(&paths, cfg.encoding);
    let encoding = cfg.encoding.encoding_name.as_str();
    let config = ExecutorConfig { workers: cfg.workers };

    let word_perm = |corpus: &str| {
        let spec = TestSpec::new(corpus, encoding, "word_perm")
            .with_n_perm(cfg.n_perm)
            .with_seed(cfg.seed);
        match run_test_with(&registry, &spec, &config) {
            Ok(result) => result,
            Err(e) => super::fail(&e),
        }
    };

    let target = word_perm(names[0].as_str());
    println!("{}\n", target.summary_table());

    let length_scale = if cfg.length_scale && target.robust {
        let spec = LengthScaleSpec::new(&names[0], encoding)
            .with_n_perm(cfg.n_perm)
            .with_seed(cfg.seed);
        let curve = match run_length_scale_test_with(&registry, &spec, &config) {
            Ok(curve) => curve,
            Err(e) => super::fail(&e),
        };
        println!("{}\n", curve.summary_table());
        Some(curve)
    } else {
        None
    };

    let cross_corpus = if names.len() > 1 {
        let others: Vec<TestResult> = names[1..].iter().map(|n| word_perm(n.as_str())).collect();
        let comparison = CrossCorpusComparison::from_results(&target, &others);
        for other in &comparison.others {
            let sig = if other.significant { "*" } else { "" };
            println!(
                "  vs {:<20} effect {:.4}{sig} (target {:.4})",
                other.corpus, other.effect_bits_per_char, comparison.target_effect
            );
        }
        println!();
        Some(comparison)
    } else {
        None
    };

    let assessment = assess(&target, length_scale.as_ref(), cross_corpus.as_ref());
    println!("Claim level: {}", assessment.message);
    if !assessment.reportable {
        println!("Not reportable as a structure claim (requires L3 or above).");
    }

    super::write_output(
        cfg.output_path,
        &ClassifyReport {
            assessment,
            word_perm: target,
            length_scale,
            cross_corpus,
        },
    );
}
