//! CLI for bitstruct: does your encoding compress better than its null models?

mod commands;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bitstruct")]
#[command(about = "bitstruct: permutation tests for compressible structure in encoded text")]
#[command(version = bitstruct_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Character-class encoding shared by every test command.
#[derive(Args, Clone)]
pub struct EncodingArgs {
    /// Characters mapped to '1'
    #[arg(long)]
    ones: String,

    /// Characters mapped to '0'. Characters in neither set are dropped.
    #[arg(long, default_value = "")]
    zeros: String,

    /// Name recorded for the encoding in results
    #[arg(long, default_value = "chars")]
    encoding_name: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in null models and metrics, plus any corpora given
    List {
        /// Corpus text files to load and describe
        #[arg(long = "corpus")]
        corpora: Vec<String>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run one permutation test against a chosen null model
    Test {
        /// Corpus text file
        corpus: String,

        #[command(flatten)]
        encoding: EncodingArgs,

        /// Null model: random, block_k, word_perm, markov
        #[arg(long, default_value = "word_perm")]
        null: String,

        /// Block size in bits (required for block_k)
        #[arg(long)]
        block_size: Option<usize>,

        /// Metric name, or "all" for every registered compressor
        #[arg(long, default_value = "all")]
        metric: String,

        /// Number of permutations (minimum 100)
        #[arg(long, default_value = "1000")]
        n_perm: usize,

        #[arg(long, default_value = "42")]
        seed: u64,

        /// Worker threads for the null loop; results do not depend on it
        #[arg(long, default_value = "1")]
        workers: usize,

        /// Bonferroni-correct for this many encodings tested
        #[arg(long)]
        bonferroni: Option<usize>,

        /// Write the full result as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Word permutation against every compressor (the critical null)
    Quick {
        /// Corpus text file
        corpus: String,

        #[command(flatten)]
        encoding: EncodingArgs,

        #[arg(long, default_value = "1000")]
        n_perm: usize,

        /// Write the full result as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Sweep block shuffles over block sizes to locate the structure's scale
    LengthScale {
        /// Corpus text file
        corpus: String,

        #[command(flatten)]
        encoding: EncodingArgs,

        #[arg(long, default_value = "zlib")]
        metric: String,

        /// Comma-separated, strictly increasing block sizes
        #[arg(long, default_value = "1,2,4,8,16,32,64,128")]
        block_sizes: String,

        #[arg(long, default_value = "1000")]
        n_perm: usize,

        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(long, default_value = "1")]
        workers: usize,

        /// Write the curve as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Full protocol: word permutation, length scale, cross-corpus, claim level
    Classify {
        /// Target corpus text file
        corpus: String,

        #[command(flatten)]
        encoding: EncodingArgs,

        /// Other corpus files to compare the effect against (enables L5)
        #[arg(long = "compare")]
        compare: Vec<String>,

        /// Skip the length-scale sweep (caps the level at L3)
        #[arg(long)]
        no_length_scale: bool,

        #[arg(long, default_value = "1000")]
        n_perm: usize,

        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(long, default_value = "1")]
        workers: usize,

        /// Write the assessment and its inputs as JSON
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List { corpora, json } => commands::list::run(&corpora, json),
        Commands::Test {
            corpus,
            encoding,
            null,
            block_size,
            metric,
            n_perm,
            seed,
            workers,
            bonferroni,
            output,
        } => commands::test::run(commands::test::TestCommandConfig {
            corpus_path: &corpus,
            encoding: &encoding,
            null: &null,
            block_size,
            metric: &metric,
            n_perm,
            seed,
            workers,
            bonferroni,
            output_path: output.as_deref(),
        }),
        Commands::Quick {
            corpus,
            encoding,
            n_perm,
            output,
        } => commands::test::run_quick(&corpus, &encoding, n_perm, output.as_deref()),
        Commands::LengthScale {
            corpus,
            encoding,
            metric,
            block_sizes,
            n_perm,
            seed,
            workers,
            output,
        } => commands::length_scale::run(commands::length_scale::LengthScaleCommandConfig {
            corpus_path: &corpus,
            encoding: &encoding,
            metric: &metric,
            block_sizes: &block_sizes,
            n_perm,
            seed,
            workers,
            output_path: output.as_deref(),
        }),
        Commands::Classify {
            corpus,
            encoding,
            compare,
            no_length_scale,
            n_perm,
            seed,
            workers,
            output,
        } => commands::classify::run(commands::classify::ClassifyCommandConfig {
            corpus_path: &corpus,
            encoding: &encoding,
            compare: &compare,
            length_scale: !no_length_scale,
            n_perm,
            seed,
            workers,
            output_path: output.as_deref(),
        }),
    }
}
