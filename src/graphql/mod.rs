use crate::cli::{PrintableMessage, RuntimeConfig};
use crate::typescript;
use schema::SchemaNode;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

pub mod schema;
pub mod validate;

pub const SCHEMA_FILE_EXTENSIONS: [&str; 2] = ["graphql", "gql"];

#[derive(Debug)]
pub struct CompileReport {
    pub messages: Vec<PrintableMessage>,
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CompileConfig {
    pub container_name: String,
    pub emit_enums: bool,
    pub generated_directory_name: String,
}

impl From<&RuntimeConfig> for CompileConfig {
    fn from(from: &RuntimeConfig) -> Self {
        CompileConfig {
            container_name: from.container_name().to_string(),
            emit_enums: from.emit_enums(),
            generated_directory_name: from.generated_directory_name().to_string(),
        }
    }
}

impl From<(&str, &Path, schema::Error)> for PrintableMessage {
    fn from((contents, file_path, error): (&str, &Path, schema::Error)) -> Self {
        match error {
            schema::Error::NestedListUnsupported {
                field_name,
                position,
            } => PrintableMessage::new_compile_error(
                &format!("unsupported nested list type on field `{field_name}`"),
                file_path,
                contents,
                &position,
                Some("Plain object fields can only be a single level list."),
            ),
            schema::Error::ExtensionOfUnknownType {
                type_name,
                position,
            } => PrintableMessage::new_compile_error(
                &format!("cannot extend unknown type `{type_name}`"),
                file_path,
                contents,
                &position,
                Some("Extensions must follow a definition of the same name in this file."),
            ),
            schema::Error::ExtensionOfWrongKind {
                type_name,
                position,
            } => PrintableMessage::new_compile_error(
                &format!("extension of `{type_name}` does not match its definition"),
                file_path,
                contents,
                &position,
                Some("The extension keyword must match the kind of the original definition."),
            ),
        }
    }
}

fn read_graphql_file(path: &Path) -> Result<String, PrintableMessage> {
    File::open(path)
        .and_then(|file| {
            let mut buf_reader = BufReader::new(file);
            let mut contents = String::new();
            buf_reader.read_to_string(&mut contents)?;
            Ok(contents)
        })
        .map_err(|io_error| PrintableMessage::new_compile_error_from_read_io_error(&io_error, path))
}

fn parse_schema_file(
    contents: &str,
    file_path: &Path,
) -> Result<Vec<SchemaNode>, Vec<PrintableMessage>> {
    let parsed = graphql_parser::parse_schema::<String>(contents).map_err(|parse_error| {
        let mut error = PrintableMessage::new_simple_compile_error(&format!("{parse_error}"));
        error.with_source_information(file_path, None);
        vec![error]
    })?;
    schema::nodes_from_document(&parsed, contents).map_err(|errors| {
        errors
            .into_iter()
            .map(|error| PrintableMessage::from((contents, file_path, error)))
            .collect()
    })
}

fn makedir_p(path: &Path) -> Result<(), PrintableMessage> {
    match std::fs::create_dir(path) {
        Ok(_) => Ok(()),
        Err(ref io_error) if io_error.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(io_error) => Err(PrintableMessage::new_compile_error_from_write_io_error(
            &io_error, path,
        )),
    }
}

fn make_generated_dir(mut path: PathBuf, name: &str) -> Result<PathBuf, PrintableMessage> {
    path.push(name);
    makedir_p(&path)?;
    Ok(path)
}

fn schema_name(path: &Path) -> Result<&str, PrintableMessage> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            let mut message =
                PrintableMessage::new_simple_compile_error("schema file name is not valid UTF-8");
            message.with_source_information(path, None);
            message
        })
}

/// True when the file has nothing but blank and `#` comment lines.
fn has_no_definitions(contents: &str) -> bool {
    contents
        .lines()
        .map(str::trim_start)
        .all(|line| line.is_empty() || line.starts_with('#'))
}

pub fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map_or(false, |extension| SCHEMA_FILE_EXTENSIONS.contains(&extension))
}

pub fn compile_file(
    path: &Path,
    config: &CompileConfig,
) -> Result<CompileReport, Vec<PrintableMessage>> {
    let contents = read_graphql_file(path).map_err(|e| vec![e])?;
    if has_no_definitions(&contents) {
        let mut message = PrintableMessage::new_simple_compile_warning("empty schema file skipped");
        message.with_source_information(path, None);
        return Ok(CompileReport {
            messages: vec![message],
            output_path: None,
        });
    }
    let nodes = parse_schema_file(&contents, path)?;

    let mut messages = Vec::new();
    match validate::validate(&nodes) {
        Ok(warnings) => messages.extend(
            warnings
                .into_iter()
                .map(|warning| PrintableMessage::from((contents.as_str(), path, warning))),
        ),
        Err((errors, warnings)) => {
            messages.extend(
                errors
                    .into_iter()
                    .map(|error| PrintableMessage::from((contents.as_str(), path, error)))
                    .chain(warnings.into_iter().map(|warning| {
                        PrintableMessage::from((contents.as_str(), path, warning))
                    })),
            );
            return Err(messages);
        }
    }

    let name = match schema_name(path) {
        Ok(name) => name,
        Err(error) => {
            messages.push(error);
            return Err(messages);
        }
    };
    let options = typescript::CompileOptions {
        container_name: &config.container_name,
        emit_enums: config.emit_enums,
    };
    let the_compile = typescript::compile(name, &nodes, &options);

    let mut parent_dir = path.to_owned();
    parent_dir.pop();
    let mut generated_dir_path =
        match make_generated_dir(parent_dir, &config.generated_directory_name) {
            Ok(path) => path,
            Err(error) => {
                messages.push(error);
                return Err(messages);
            }
        };
    generated_dir_path.push(the_compile.filename);
    if let Err(io_error) = std::fs::write(&generated_dir_path, the_compile.contents) {
        messages.push(PrintableMessage::new_compile_error_from_write_io_error(
            &io_error,
            &generated_dir_path,
        ));
        return Err(messages);
    }

    Ok(CompileReport {
        messages,
        output_path: Some(generated_dir_path),
    })
}
