//! # Capability tests
//! Custom scorecard test image. The scorecard starts this binary inside a
//! pod with the bundle under test mounted at `/bundle` and passes the name of
//! the test to run. The result is printed to stdout as JSON.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use capability_tests::commands::{list, run};
use capability_tests::logger;
use capability_tests::sdk::{create_sdk, DEFAULT_OPERATOR_SDK_PATH};

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Opts {
    /// Name of the test to run, e.g. capability-level-one
    #[clap(required_unless_present = "list")]
    test_name: Option<String>,
    /// Directory holding the untarred bundle under test
    #[clap(long, default_value = run::POD_BUNDLE_ROOT)]
    bundle: PathBuf,
    /// operator-sdk binary, either a path or a program name looked up in $PATH
    #[clap(long, default_value = DEFAULT_OPERATOR_SDK_PATH)]
    operator_sdk: PathBuf,
    /// Print the names of the available tests and exit
    #[clap(long)]
    list: bool,
    /// Enables debug output
    #[clap(short, long)]
    debug: bool,
    /// Write logs to this file instead of stderr
    #[clap(long)]
    log: Option<PathBuf>,
    /// Log format, text or json
    #[clap(long)]
    log_format: Option<String>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    if let Err(e) = logger::init(opts.debug, opts.log, opts.log_format) {
        eprintln!("log init failed: {:?}", e);
    }

    let sdk = create_sdk(opts.operator_sdk);
    let mut stdout = io::stdout().lock();
    match opts.test_name {
        Some(test_name) if !opts.list => {
            run::exec(&test_name, &opts.bundle, sdk, &mut stdout).context("run test")
        }
        _ => list::exec(sdk, &mut stdout).context("list tests"),
    }
}
