use crate::cli::PrintableMessage;
use crate::graphql::{self, CompileConfig};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Work {
    SchemaFile(PathBuf),
    DirEntry(PathBuf),
}

fn is_skipped_dir(path: &Path, config: &CompileConfig) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| {
            name.starts_with('.') || name == config.generated_directory_name
        })
}

impl Work {
    fn run_dir_entry(path: &Path, config: &CompileConfig) -> Result<Vec<Work>, std::io::Error> {
        let readdir = fs::read_dir(path)?;
        let mut more_work = vec![];
        for raw_entry in readdir {
            let path = raw_entry?.path();
            if path.is_dir() {
                if !is_skipped_dir(&path, config) {
                    more_work.push(Work::DirEntry(path));
                }
            } else if path.is_file() && graphql::is_schema_file(&path) {
                more_work.push(Work::SchemaFile(path));
            }
        }
        Ok(more_work)
    }

    /// Do this unit of work, returning any work discovered along the way.
    pub fn run(self, config: &CompileConfig, messages: &mut Vec<PrintableMessage>) -> Vec<Work> {
        match self {
            Work::DirEntry(path) => match Self::run_dir_entry(&path, config) {
                Ok(more_work) => more_work,
                Err(io_error) => {
                    messages.push(PrintableMessage::new_compile_error_from_read_io_error(
                        &io_error, &path,
                    ));
                    Vec::new()
                }
            },
            Work::SchemaFile(path) => {
                match graphql::compile_file(&path, config) {
                    Ok(report) => messages.extend(report.messages),
                    Err(errors) => messages.extend(errors),
                }
                Vec::new()
            }
        }
    }
}
