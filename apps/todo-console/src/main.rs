use std::io;

use todo_console::{run, TaskStore};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .without_time()
        .init();

    let mut store = TaskStore::new();
    run(&mut store, io::stdin().lock(), io::stdout().lock())
}
