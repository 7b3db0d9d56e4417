//! Integration tests for bitstruct-core.
//!
//! These run the full pipeline through the public API:
//! registry → spec → encode → null loop → metrics → result → claim level.

use std::ops::Range;

use bitstruct_core::metrics::MetricInfo;
use bitstruct_core::nulls::builtin_nulls;
use bitstruct_core::{
    Bitstring, CharClassEncoding, ClaimLevel, ConfigurationError, ContractViolation,
    DegenerateCase, Encoding, EngineError, ExecutorConfig, Interpretation, LengthScaleSpec,
    Metric, NullParams, Registry, ScaleClass, TestSpec, classify, quick_test,
    run_length_scale_test, run_test, run_test_with, write_json,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const N_PERM: usize = 100;

/// Registry with the built-ins and the `a → 1, b → 0` encoding as `ab`.
fn registry() -> Registry {
    let mut registry = Registry::with_builtins();
    registry
        .add_encoding(CharClassEncoding::new("a", "b").into_encoding(
            "ab",
            "a=1 b=0, everything else dropped",
            "letter identity",
            true,
        ))
        .unwrap();
    registry
}

/// `count` words drawn uniformly from a small fixed vocabulary.
fn vocabulary_text(count: usize, seed: u64) -> String {
    let vocab = [
        "aab", "abba", "bbab", "aaaba", "babb", "abab", "bbbaa", "aabba", "baaab", "abbbab",
        "bab", "aaabbb",
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| vocab[rng.random_range(0..vocab.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Words all equal to `aab`: periodic, far more compressible than its shuffles.
fn periodic_text(count: usize) -> String {
    vec!["aab"; count].join(" ")
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn identical_specs_give_identical_results() {
    let mut registry = registry();
    registry
        .register_corpus("vocab", &vocabulary_text(400, 1))
        .unwrap();
    let spec = TestSpec::new("vocab", "ab", "random")
        .with_all_metrics()
        .with_n_perm(N_PERM)
        .with_seed(7);

    let a = run_test(&registry, &spec).unwrap();
    let b = run_test(&registry, &spec).unwrap();
    for (x, y) in a.outcomes.iter().zip(&b.outcomes) {
        assert_eq!(x.null_distribution, y.null_distribution);
        assert_eq!(x.p_value, y.p_value);
    }

    let other_seed = run_test(&registry, &spec.clone().with_seed(8)).unwrap();
    // bz2 saturates at 1.0 on short inputs, so compare a codec that resolves
    // the shuffles.
    assert_ne!(
        a.outcome("zlib").unwrap().null_distribution,
        other_seed.outcome("zlib").unwrap().null_distribution
    );
}

#[test]
fn parallel_workers_match_sequential() {
    let mut registry = registry();
    registry
        .register_corpus("vocab", &vocabulary_text(400, 2))
        .unwrap();
    let spec = TestSpec::new("vocab", "ab", "word_perm")
        .with_all_metrics()
        .with_n_perm(N_PERM + 3);

    let sequential = run_test(&registry, &spec).unwrap();
    for workers in [2, 4, 7] {
        let parallel = run_test_with(&registry, &spec, &ExecutorConfig { workers }).unwrap();
        for (s, p) in sequential.outcomes.iter().zip(&parallel.outcomes) {
            assert_eq!(s.metric, p.metric);
            assert_eq!(s.null_distribution, p.null_distribution, "workers={workers}");
            assert_eq!(s.p_value, p.p_value);
        }
    }
}

// ---------------------------------------------------------------------------
// Statistical properties
// ---------------------------------------------------------------------------

#[test]
fn p_values_are_bounded() {
    let mut registry = registry();
    registry
        .register_corpus("periodic", &periodic_text(600))
        .unwrap();
    registry
        .register_corpus("vocab", &vocabulary_text(300, 3))
        .unwrap();
    for corpus in ["periodic", "vocab"] {
        for null in ["random", "word_perm", "markov"] {
            let spec = TestSpec::new(corpus, "ab", null)
                .with_all_metrics()
                .with_n_perm(N_PERM);
            let result = run_test(&registry, &spec).unwrap();
            for o in &result.outcomes {
                assert_eq!(o.null_distribution.len(), N_PERM);
                assert!(
                    o.p_value >= 1.0 / (N_PERM as f64 + 1.0) && o.p_value <= 1.0,
                    "{corpus}/{null}/{}: p={}",
                    o.metric,
                    o.p_value
                );
            }
        }
    }
}

#[test]
fn builtin_nulls_conserve_bits() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let bits = Bitstring::from_bits((0..997).map(|_| u8::from(rng.random_bool(0.3))));
    let words: Vec<Range<usize>> = (0..99).map(|i| i * 10..i * 10 + 7).collect();
    let params = NullParams::block(13);

    for null in builtin_nulls() {
        for seed in 0..20 {
            let out = null.generate(&bits, &words, seed, &params);
            assert_eq!(out.len(), bits.len(), "{}", null.name());
            if null.info().conserves_density {
                assert_eq!(out.count_ones(), bits.count_ones(), "{}", null.name());
            }
            assert_eq!(out, null.generate(&bits, &words, seed, &params));
        }
    }
}

#[test]
fn block_larger_than_input_is_identity() {
    let bits: Bitstring = "1101001".parse().unwrap();
    let block = builtin_nulls()
        .into_iter()
        .find(|n| n.name() == "block_k")
        .unwrap();
    let out = block.generate(&bits, &[], 5, &NullParams::block(64));
    assert_eq!(out, bits);
}

#[test]
fn periodic_text_beats_random_without_claim() {
    let mut registry = registry();
    registry
        .register_corpus("periodic", &periodic_text(1000))
        .unwrap();
    let spec = TestSpec::new("periodic", "ab", "random")
        .with_all_metrics()
        .with_n_perm(N_PERM);
    let result = run_test(&registry, &spec).unwrap();
    assert!(result.robust, "{}", result.summary_table());
    assert_eq!(result.interpretation, Interpretation::WeakerNullOnly);
    assert!(result.interpretation.message().starts_with("NO CLAIM"));
    for o in &result.outcomes {
        assert!((o.p_value - 1.0 / 101.0).abs() < 1e-12);
        assert!(o.effect_bits_per_char > 0.0);
    }
    // Beating the random null alone is the floor.
    assert_eq!(classify(&result), ClaimLevel::L0);
    assert_eq!(result.claim_level(), ClaimLevel::L0);
}

#[test]
fn periodic_text_is_robust_structure_under_word_perm() {
    let mut registry = registry();
    let text = ["aab", "bba", "abab"].repeat(300).join(" ");
    registry.register_corpus("cycle", &text).unwrap();
    let result = quick_test(&registry, "cycle", "ab", N_PERM).unwrap();
    assert!(result.robust, "{}", result.summary_table());
    assert_eq!(result.interpretation, Interpretation::RobustStructure);
    assert_eq!(result.claim_level(), ClaimLevel::L3);
}

static FLAT_INFO: MetricInfo = MetricInfo {
    name: "flat",
    description: "Constant ratio, blind to structure",
};

struct FlatRatio;

impl Metric for FlatRatio {
    fn info(&self) -> &MetricInfo {
        &FLAT_INFO
    }

    fn ratio(&self, _bits: &Bitstring) -> f64 {
        0.5
    }
}

static OVERFLOW_INFO: MetricInfo = MetricInfo {
    name: "overflow",
    description: "Reports a ratio above 1",
};

struct OverflowRatio;

impl Metric for OverflowRatio {
    fn info(&self) -> &MetricInfo {
        &OVERFLOW_INFO
    }

    fn ratio(&self, _bits: &Bitstring) -> f64 {
        2.0
    }
}

static CRASHING_INFO: MetricInfo = MetricInfo {
    name: "crashing",
    description: "Panics on every input",
};

struct CrashingRatio;

impl Metric for CrashingRatio {
    fn info(&self) -> &MetricInfo {
        &CRASHING_INFO
    }

    fn ratio(&self, _bits: &Bitstring) -> f64 {
        panic!("crashing metric")
    }
}

#[test]
fn one_blind_metric_breaks_robustness() {
    let mut registry = registry();
    registry
        .register_corpus("periodic", &periodic_text(1000))
        .unwrap();
    registry.register_metric(Box::new(FlatRatio));
    let spec = TestSpec::new("periodic", "ab", "random")
        .with_all_metrics()
        .with_n_perm(N_PERM);
    let result = run_test(&registry, &spec).unwrap();

    assert_eq!(result.outcomes.len(), 4);
    let flat = result.outcome("flat").unwrap();
    assert_eq!(flat.p_value, 1.0);
    assert!(!flat.significant);
    assert!(result.outcome("zlib").unwrap().significant);
    assert!(!result.robust);
    assert_eq!(result.interpretation, Interpretation::MetricDependent);
}

#[test]
fn word_order_already_random_is_not_detected() {
    let mut registry = registry();
    registry
        .register_corpus("shuffled", &vocabulary_text(1500, 5))
        .unwrap();
    let spec = TestSpec::new("shuffled", "ab", "word_perm")
        .with_metric("zlib")
        .with_n_perm(200);
    let result = run_test(&registry, &spec).unwrap();
    let o = result.default_outcome().unwrap();

    assert!(o.p_value > 1.5 / 201.0, "p={}", o.p_value);
    assert!(
        (o.observed - o.null_mean).abs() <= 5.0 * o.null_std + 1e-12,
        "observed={} null={}±{}",
        o.observed,
        o.null_mean,
        o.null_std
    );
}

#[test]
fn bonferroni_tightens_threshold() {
    let mut registry = registry();
    registry
        .register_corpus("periodic", &periodic_text(500))
        .unwrap();
    let spec = TestSpec::new("periodic", "ab", "random")
        .with_n_perm(N_PERM)
        .with_correction(bitstruct_core::Correction::Bonferroni { encodings: 10 });
    let result = run_test(&registry, &spec).unwrap();
    assert!((result.threshold - 0.005).abs() < 1e-12);
    // 1/101 is above 0.005: not significant under the corrected threshold.
    assert!(!result.default_outcome().unwrap().significant);
}

// ---------------------------------------------------------------------------
// Length scale
// ---------------------------------------------------------------------------

#[test]
fn sixteen_bit_motif_vanishes_at_sixteen() {
    let mut registry = registry();
    let motif = "abbabaaabbbabaab";
    registry
        .register_corpus("motif", &motif.repeat(512))
        .unwrap();
    let spec = LengthScaleSpec::new("motif", "ab")
        .with_block_sizes(&[1, 2, 4, 8, 16, 32])
        .with_n_perm(N_PERM);
    let curve = run_length_scale_test(&registry, &spec).unwrap();

    assert_eq!(curve.points.len(), 6);
    for p in &curve.points[..4] {
        assert!(p.significant, "k={} p={}", p.block_size, p.p_value);
    }
    assert_eq!(curve.points[4].p_value, 1.0);
    assert!(!curve.points[4].significant);
    assert!(!curve.points[5].significant, "k=32 p={}", curve.points[5].p_value);
    assert_eq!(curve.boundary, Some(16));
    assert_eq!(curve.scale, ScaleClass::PhraseScale);
    assert!(curve.summary_table().contains("PHRASE-SCALE"));
}

// ---------------------------------------------------------------------------
// Toy corpora
// ---------------------------------------------------------------------------

#[test]
fn repeated_word_has_zero_effect() {
    let mut registry = registry();
    registry.register_corpus("toy", "ababab ababab").unwrap();
    let result = quick_test(&registry, "toy", "ab", N_PERM).unwrap();

    assert_eq!(result.spec.null, "word_perm");
    assert_eq!(result.spec.seed, 42);
    assert_eq!(result.bit_length, 12);
    assert_eq!(result.outcomes.len(), 3);
    for o in &result.outcomes {
        assert!(o.effect_bits_per_char.abs() < 1e-12, "{}: {}", o.metric, o.effect_bits_per_char);
        assert!(!o.significant);
    }
    assert_eq!(result.interpretation, Interpretation::NoEvidence);
    assert_eq!(classify(&result), ClaimLevel::L0);
}

#[test]
fn tiny_alternating_corpus_is_not_significant() {
    let mut registry = registry();
    registry.register_corpus("toy", "ab ba ab ba").unwrap();
    let result = quick_test(&registry, "toy", "ab", N_PERM).unwrap();
    assert!(!result.robust);
    assert!(result.outcomes.iter().all(|o| !o.significant));
    assert!(!classify(&result).is_reportable());
}

// ---------------------------------------------------------------------------
// Errors and degenerate input
// ---------------------------------------------------------------------------

#[test]
fn unregistered_names_fail_fast() {
    let mut registry = registry();
    registry.register_corpus("toy", "ab ba").unwrap();
    let cases = [
        TestSpec::new("missing", "ab", "random"),
        TestSpec::new("toy", "missing", "random"),
        TestSpec::new("toy", "ab", "missing"),
        TestSpec::new("toy", "ab", "random").with_metric("missing"),
    ];
    for spec in cases {
        let err = run_test(&registry, &spec.with_n_perm(N_PERM)).unwrap_err();
        assert_eq!(err.stable_code(), "CFG_UNREGISTERED", "{err}");
        assert!(err.to_string().contains("'missing'"));
    }
}

#[test]
fn too_few_permutations_rejected() {
    let mut registry = registry();
    registry.register_corpus("toy", "ab ba").unwrap();
    let spec = TestSpec::new("toy", "ab", "random").with_n_perm(99);
    assert!(matches!(
        run_test(&registry, &spec),
        Err(EngineError::Configuration(
            ConfigurationError::TooFewPermutations { requested: 99, .. }
        ))
    ));
}

#[test]
fn component_removed_after_spec_built() {
    let mut registry = registry();
    registry
        .register_corpus("periodic", &periodic_text(50))
        .unwrap();
    let spec = TestSpec::new("periodic", "ab", "random").with_n_perm(N_PERM);
    assert!(run_test(&registry, &spec).is_ok());

    registry.unregister_encoding("ab");
    let err = run_test(&registry, &spec).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigurationError::Unregistered { .. })
    ));
}

#[test]
fn block_null_without_size_rejected() {
    let mut registry = registry();
    registry.register_corpus("toy", "ab ba").unwrap();
    let spec = TestSpec::new("toy", "ab", "block_k").with_n_perm(N_PERM);
    assert_eq!(
        run_test(&registry, &spec).unwrap_err().stable_code(),
        "CFG_MISSING_BLOCK_SIZE"
    );
    let spec = spec.with_block_size(0);
    assert_eq!(
        run_test(&registry, &spec).unwrap_err().stable_code(),
        "CFG_ZERO_BLOCK_SIZE"
    );
}

#[test]
fn empty_encoding_is_degenerate() {
    let mut registry = registry();
    registry.register_corpus("other", "xyz zyx").unwrap();
    let spec = TestSpec::new("other", "ab", "random").with_n_perm(N_PERM);
    let result = run_test(&registry, &spec).unwrap();

    assert_eq!(result.degenerate, Some(DegenerateCase::EmptyBitstring));
    assert_eq!(result.bit_length, 0);
    assert_eq!(result.interpretation, Interpretation::Undefined);
    let o = result.default_outcome().unwrap();
    assert!(o.p_value.is_nan() && o.effect_bits_per_char.is_nan());
    assert!(!result.robust);
}

#[test]
fn single_word_is_degenerate_under_word_perm() {
    let mut registry = registry();
    registry.register_corpus("one", "abbaab").unwrap();
    let result = quick_test(&registry, "one", "ab", N_PERM).unwrap();
    assert_eq!(
        result.degenerate,
        Some(DegenerateCase::NoWordBoundaries { words: 1 })
    );
    assert!(result.outcomes.iter().all(|o| o.p_value.is_nan()));
    assert_eq!(classify(&result), ClaimLevel::L0);
}

#[test]
fn degenerate_result_carries_reason() {
    let mut registry = registry();
    registry.register_corpus("one", "abbaab").unwrap();
    let result = quick_test(&registry, "one", "ab", N_PERM).unwrap();
    let reason = result.degenerate_reason.as_deref().unwrap();
    assert!(reason.contains("word"), "{reason}");
    assert!(result.summary_table().contains(reason));

    let json = bitstruct_core::report::to_json(&result).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["degenerate_reason"], reason);
}

#[test]
fn out_of_range_metric_fails_on_degenerate_input() {
    let mut registry = registry();
    registry.register_corpus("one", "abbaab").unwrap();
    registry.register_metric(Box::new(OverflowRatio));
    let err = quick_test(&registry, "one", "ab", N_PERM).unwrap_err();
    assert_eq!(err.stable_code(), "CONTRACT_RATIO_OUT_OF_RANGE");
    assert!(matches!(
        err,
        EngineError::Contract(ContractViolation::RatioOutOfRange { ref metric, .. })
            if metric == "overflow"
    ));
}

#[test]
fn panicking_metric_fails_on_degenerate_input() {
    let mut registry = registry();
    registry.register_corpus("one", "abbaab").unwrap();
    registry.register_metric(Box::new(CrashingRatio));
    let err = quick_test(&registry, "one", "ab", N_PERM).unwrap_err();
    assert_eq!(err.stable_code(), "CONTRACT_COMPONENT_PANICKED");
    assert!(matches!(
        err,
        EngineError::Contract(ContractViolation::ComponentPanicked { ref name, .. })
            if name == "crashing"
    ));
}

#[test]
fn whole_text_encoding_is_not_word_compositional() {
    let mut registry = registry();
    registry.register_corpus("toy", "ab ba").unwrap();
    registry
        .add_encoding(Encoding::new(
            "has_space",
            |t: &str| (if t.contains(' ') { "1" } else { "0" }).to_string(),
            "1 if the text contains a space",
            "",
            false,
        ))
        .unwrap();

    let err = quick_test(&registry, "toy", "has_space", N_PERM).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Contract(ContractViolation::NonCompositionalEncoding { .. })
    ));

    // Nulls that ignore word spans accept it.
    let spec = TestSpec::new("toy", "has_space", "random").with_n_perm(N_PERM);
    assert!(run_test(&registry, &spec).is_ok());
}

#[test]
fn result_round_trips_through_json_file() {
    let mut registry = registry();
    registry.register_corpus("toy", "ab ba ab ba").unwrap();
    let result = quick_test(&registry, "toy", "ab", N_PERM).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toy.json");
    write_json(&path, &result).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["spec"]["null"], "word_perm");
    assert_eq!(value["outcomes"].as_array().unwrap().len(), 3);
    assert_eq!(
        value["outcomes"][0]["null_distribution"]
            .as_array()
            .unwrap()
            .len(),
        N_PERM
    );
}
