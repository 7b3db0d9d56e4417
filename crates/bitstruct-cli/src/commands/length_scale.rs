use bitstruct_core::{ExecutorConfig, LengthScaleSpec, run_length_scale_test_with};

use crate::EncodingArgs;

pub struct LengthScaleCommandConfig<'a> {
    pub corpus_path: &'a str,
    pub encoding: &'a EncodingArgs,
    pub metric: &'a str,
    pub block_sizes: &'a str,
    pub n_perm: usize,
    pub seed: u64,
    pub workers: usize,
    pub output_path: Option<&'a str>,
}

pub fn run(cfg: LengthScaleCommandConfig<'_>) {
    let (registry, names) = super::make_registry(&[cfg.corpus_path], cfg.encoding);
    let spec = LengthScaleSpec::new(&names[0], &cfg.encoding.encoding_name)
        .with_metric(cfg.metric)
        .with_block_sizes(&super::parse_block_sizes(cfg.block_sizes))
        .with_n_perm(cfg.n_perm)
        .with_seed(cfg.seed);

    println!(
        "Length-scale sweep: {} / {} under {}, block sizes {:?}...\n",
        spec.corpus, spec.encoding, spec.metric, spec.block_sizes
    );
    let config = ExecutorConfig { workers: cfg.workers };
    let curve = match run_length_scale_test_with(&registry, &spec, &config) {
        Ok(curve) => curve,
        Err(e) => super::fail(&e),
    };
    println!("{}", curve.summary_table());
    super::write_output(cfg.output_path, &curve);
}
