//! Coded Merkle tree demo.
//!
//! Builds a tree over a randomly generated, namespace-sorted dataset and
//! reports the root, layer widths and namespace ranges.
//!
//! Build & run:
//!   cargo run --release --example ncmt_demo -- --help
//!   cargo run --release --example ncmt_demo -- --leaves=128 --leaf-size=1024 --ns=16
//!   RUST_LOG=ncmt=trace cargo run --example ncmt_demo -- --batch=8
//!
//! `NCMT_*` environment variables seed the options before flags apply.

use std::env;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing_subscriber::EnvFilter;

use ncmt::{NamespaceId, NamespacedData, Ncmt, Options};

#[derive(Debug, Clone, Copy)]
struct Opts {
    leaves: usize,
    leaf_size: usize,
    ns_count: u64,
    batch: Option<usize>,
    seed: u64,
}

fn print_help_and_exit() -> ! {
    eprintln!(
        r#"ncmt_demo: build a namespaced coded Merkle tree over random data

USAGE:
  ncmt_demo [--leaves=N] [--leaf-size=B] [--ns=K] [--batch=S] [--seed=U64]

OPTIONS:
  --leaves=N      Number of leaves (multiple of the batch size, <= 128). Default: 64
  --leaf-size=B   Payload size (bytes) per leaf. Default: 512
  --ns=K          Number of distinct namespaces. Default: 8
  --batch=S       Batch size (even, >= 4). Default: NCMT_BATCH_SIZE or 4
  --seed=U64      RNG seed for reproducibility. Default: 42
  --help          Show this help.
"#
    );
    std::process::exit(0);
}

fn parse_args() -> Result<Opts> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help_and_exit();
    }
    let mut opts = Opts { leaves: 64, leaf_size: 512, ns_count: 8, batch: None, seed: 42 };

    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .with_context(|| format!("expected --key=value, got {arg}"))?;
        match key {
            "--leaves" => opts.leaves = value.parse().context("invalid --leaves")?,
            "--leaf-size" => opts.leaf_size = value.parse().context("invalid --leaf-size")?,
            "--ns" => opts.ns_count = value.parse().context("invalid --ns")?,
            "--batch" => opts.batch = Some(value.parse().context("invalid --batch")?),
            "--seed" => opts.seed = value.parse().context("invalid --seed")?,
            _ => bail!("unrecognized argument: {arg} (use --help)"),
        }
    }

    if opts.leaf_size == 0 {
        bail!("--leaf-size must be >= 1");
    }
    if opts.ns_count == 0 {
        bail!("--ns must be >= 1");
    }
    Ok(opts)
}

/// Sorted random dataset: leaf `i` gets namespace `i * ns_count / leaves`.
fn gen_data(opts: &Opts, ns_size: usize) -> Vec<NamespacedData> {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    (0..opts.leaves)
        .map(|i| {
            let ns = (i as u64 * opts.ns_count) / opts.leaves as u64;
            let mut payload = vec![0u8; opts.leaf_size];
            rng.fill_bytes(&mut payload);
            NamespacedData::new(NamespaceId::from_u64(ns, ns_size), payload)
        })
        .collect()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ncmt=debug")))
        .init();

    let opts = parse_args()?;
    let mut tree_opts = Options::from_env();
    if let Some(batch) = opts.batch {
        tree_opts = tree_opts.batch_size(batch);
    }
    let ns_size = tree_opts.namespace_size;

    println!("== ncmt_demo ==");
    println!("leaves        : {}", opts.leaves);
    println!("leaf size     : {} bytes", opts.leaf_size);
    println!("namespaces    : {} ({} bytes wide)", opts.ns_count, ns_size);
    println!("batch size    : {}", tree_opts.batch_size);
    println!("seed          : {}", opts.seed);
    println!();

    let mut tree = Ncmt::with_options(tree_opts)?;
    for data in gen_data(&opts, ns_size) {
        tree.push(data)?;
    }

    let started = Instant::now();
    let root = tree.build().context("building tree")?;
    let elapsed = started.elapsed();

    println!("root          : {}", hex(&root));
    println!("  min ns      : {}", hex(&root[..ns_size]));
    println!("  max ns      : {}", hex(&root[ns_size..2 * ns_size]));
    let widths: Vec<String> = tree.layers().iter().map(|l| l.len().to_string()).collect();
    println!("layer widths  : {}", widths.join(" -> "));
    println!("build time    : {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!();

    println!("-- namespace ranges --");
    for (id, range) in tree.namespace_ranges().iter() {
        println!("  {id}  leaves [{}, {})", range.start, range.end);
    }
    Ok(())
}
