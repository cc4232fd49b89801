use std::io;
use std::process::ExitCode;

use avl_insert::driver::{Config, Session};
use avl_insert::render::DEFAULT_INDENT;
use avl_insert::Tree;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Insert keys into an AVL tree and inspect its shape.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of spaces per tree level when printing the tree.
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    indent: usize,

    /// Comma separated keys to insert before the menu starts.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    preload: Vec<i32>,

    /// Do not print the menu and value prompts.
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let tree: Tree<i32> = args.preload.iter().copied().collect();
    info!(preloaded = tree.len(), "starting session");

    let config = Config {
        indent: args.indent,
        prompts: !args.quiet,
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), config).with_tree(tree);

    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "session aborted");
            ExitCode::FAILURE
        }
    }
}
