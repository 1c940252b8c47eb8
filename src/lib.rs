//! Compiles GraphQL schema definitions into a TypeScript "plain objects"
//! container type: one exported alias indexing every schema type's shape by name.
pub mod cli;
pub mod graphql;
pub mod typescript;
mod work;
mod worker_pool;

use cli::{PrintableMessage, RuntimeConfig};
use graphql::CompileConfig;

/// Compile every schema file under the configured root, returning the messages to show.
pub fn run(config: &RuntimeConfig) -> Vec<PrintableMessage> {
    let worker_pool = worker_pool::WorkerPool::new(
        usize::from(config.thread_count()),
        CompileConfig::from(config),
    );
    let root = config.root_dir_path().to_owned();
    let root_work = if root.is_file() {
        work::Work::SchemaFile(root)
    } else {
        work::Work::DirEntry(root)
    };
    worker_pool.work(vec![root_work])
}
