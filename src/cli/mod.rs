use crate::typescript::plain_objects::PLAIN_OBJECTS;
use clap::Parser;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

mod message;

pub use message::{similar_help_suggestions, LocationInformation, PrintableMessage};

const DEFAULT_RC_FILE_NAME: &str = ".plainobjectsrc.json";
const DEFAULT_GENERATED_DIRECTORY_NAME: &str = "__generated__";

#[derive(Parser, Debug)]
#[command(
    name = "plainobjects",
    author,
    version,
    about = "Compiles GraphQL schema files into TypeScript plain object type declarations."
)]
struct CliArgs {
    /// Directory to recursively compile
    #[arg(value_name = "DIR", default_value = ".")]
    root_dir: PathBuf,

    /// Path of JSON config file (defaults to DIR/.plainobjectsrc.json)
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Name of the generated container type
    #[arg(long = "container-name", value_name = "NAME")]
    container_name: Option<String>,

    /// Emit enum declarations alongside the container type
    #[arg(long = "emit-enums")]
    emit_enums: bool,

    /// Do not emit enum declarations, even if the config file enables them
    #[arg(long = "no-emit-enums", conflicts_with = "emit_enums")]
    no_emit_enums: bool,

    /// Name of the directory generated files are written to
    #[arg(long = "generated-directory-name", value_name = "NAME")]
    generated_directory_name: Option<String>,

    /// Sets the number of threads (defaults to number of CPU cores)
    #[arg(long = "num-threads", value_name = "NUMBER")]
    number_threads: Option<u8>,
}

/// Keys of the optional JSON config file
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    container_name: Option<String>,
    emit_enums: Option<bool>,
    generated_directory_name: Option<String>,
    num_threads: Option<u8>,
}

impl ConfigFile {
    fn from_path(path: &Path, required: bool) -> Result<Self, PrintableMessage> {
        if !required && !path.is_file() {
            return Ok(ConfigFile::default());
        }
        let file = File::open(path).map_err(|io_error| {
            PrintableMessage::new_compile_error_from_read_io_error(&io_error, path)
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|json_error| {
            PrintableMessage::new_simple_program_error(&format!(
                "error in config file `{}`: {json_error}",
                path.display()
            ))
        })
    }
}

/// User configured runtime configuration
#[derive(Debug)]
pub struct RuntimeConfig {
    root_dir: PathBuf,
    container_name: String,
    emit_enums: bool,
    generated_directory_name: String,
    number_threads: u8,
}

impl RuntimeConfig {
    pub fn from_cli() -> Result<Self, PrintableMessage> {
        Self::from_args(CliArgs::parse())
    }

    fn from_args(args: CliArgs) -> Result<Self, PrintableMessage> {
        let (config_path, required) = match &args.config_file {
            Some(path) => (path.clone(), true),
            None => (args.root_dir.join(DEFAULT_RC_FILE_NAME), false),
        };
        let config_file = ConfigFile::from_path(&config_path, required)?;
        let container_name = args
            .container_name
            .or(config_file.container_name)
            .unwrap_or_else(|| PLAIN_OBJECTS.to_string());
        if !is_valid_identifier(&container_name) {
            return Err(PrintableMessage::new_simple_program_error(&format!(
                "container name `{container_name}` is not a valid TypeScript identifier"
            )));
        }
        Ok(RuntimeConfig {
            root_dir: args.root_dir,
            container_name,
            emit_enums: !args.no_emit_enums
                && (args.emit_enums || config_file.emit_enums.unwrap_or(false)),
            generated_directory_name: args
                .generated_directory_name
                .or(config_file.generated_directory_name)
                .unwrap_or_else(|| DEFAULT_GENERATED_DIRECTORY_NAME.to_string()),
            number_threads: args
                .number_threads
                .or(config_file.num_threads)
                .filter(|count| *count > 0)
                .or_else(|| u8::try_from(num_cpus::get()).ok())
                .unwrap_or(4),
        })
    }

    pub fn root_dir_path(&self) -> &Path {
        &self.root_dir
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn emit_enums(&self) -> bool {
        self.emit_enums
    }

    pub fn generated_directory_name(&self) -> &str {
        &self.generated_directory_name
    }

    pub fn thread_count(&self) -> u8 {
        self.number_threads
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Prints the messages of the program to the screen, returning true if any were errors.
pub fn print_messages(messages: &[PrintableMessage]) -> bool {
    let mut has_error = false;
    for message in messages {
        has_error |= message.is_error();
        println!("{message}");
    }
    has_error
}
