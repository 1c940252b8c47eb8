use colored::Colorize;
use graphql_parser::Pos;
use std::fmt;
use std::path::{Path, PathBuf};

const SIMILAR_NAME_THRESHOLD: f64 = 0.8;
const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageLevel {
    CompileError,
    CompileWarning,
    ProgramError,
}

/// A single source line pointed at by a message
#[derive(Debug)]
pub struct LocationInformation {
    line_number: usize,
    column: usize,
    line_text: String,
    help_text: Option<String>,
}

impl LocationInformation {
    pub fn new_from_line_and_column(line_number: usize, line_text: &str, column: usize) -> Self {
        LocationInformation {
            line_number,
            column,
            line_text: line_text.to_string(),
            help_text: None,
        }
    }

    pub fn new_from_contents_and_position(contents: &str, position: &Pos) -> Self {
        let line_text = contents
            .lines()
            .nth(position.line.saturating_sub(1))
            .unwrap_or("");
        Self::new_from_line_and_column(position.line, line_text, position.column)
    }

    pub fn with_help_text(&mut self, help_text: &str) -> &mut Self {
        self.help_text = Some(help_text.to_string());
        self
    }
}

/// Something to tell the user about, rendered in the style of rustc
#[derive(Debug)]
pub struct PrintableMessage {
    level: MessageLevel,
    message: String,
    file_path: Option<PathBuf>,
    location: Option<LocationInformation>,
}

impl PrintableMessage {
    fn new(level: MessageLevel, message: &str) -> Self {
        PrintableMessage {
            level,
            message: message.to_string(),
            file_path: None,
            location: None,
        }
    }

    fn new_with_location(
        level: MessageLevel,
        message: &str,
        file_path: &Path,
        contents: &str,
        position: &Pos,
        help_text: Option<&str>,
    ) -> Self {
        let mut location = LocationInformation::new_from_contents_and_position(contents, position);
        if let Some(help_text) = help_text {
            location.with_help_text(help_text);
        }
        let mut printable = Self::new(level, message);
        printable.with_source_information(file_path, Some(location));
        printable
    }

    pub fn new_compile_error(
        message: &str,
        file_path: &Path,
        contents: &str,
        position: &Pos,
        help_text: Option<&str>,
    ) -> Self {
        Self::new_with_location(
            MessageLevel::CompileError,
            message,
            file_path,
            contents,
            position,
            help_text,
        )
    }

    pub fn new_compile_warning(
        message: &str,
        file_path: &Path,
        contents: &str,
        position: &Pos,
        help_text: Option<&str>,
    ) -> Self {
        Self::new_with_location(
            MessageLevel::CompileWarning,
            message,
            file_path,
            contents,
            position,
            help_text,
        )
    }

    pub fn new_simple_compile_error(message: &str) -> Self {
        Self::new(MessageLevel::CompileError, message)
    }

    pub fn new_simple_compile_warning(message: &str) -> Self {
        Self::new(MessageLevel::CompileWarning, message)
    }

    pub fn new_simple_program_error(message: &str) -> Self {
        Self::new(MessageLevel::ProgramError, message)
    }

    pub fn new_compile_error_from_read_io_error(io_error: &std::io::Error, path: &Path) -> Self {
        Self::new_simple_compile_error(&format!(
            "could not read `{}`: {io_error}",
            path.display()
        ))
    }

    pub fn new_compile_error_from_write_io_error(io_error: &std::io::Error, path: &Path) -> Self {
        Self::new_simple_compile_error(&format!(
            "could not write `{}`: {io_error}",
            path.display()
        ))
    }

    pub fn with_source_information(
        &mut self,
        file_path: &Path,
        location: Option<LocationInformation>,
    ) -> &mut Self {
        self.file_path = Some(file_path.to_owned());
        self.location = location;
        self
    }

    pub fn is_error(&self) -> bool {
        self.level != MessageLevel::CompileWarning
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn label(&self) -> colored::ColoredString {
        match self.level {
            MessageLevel::CompileError => "error".red().bold(),
            MessageLevel::CompileWarning => "warning".yellow().bold(),
            MessageLevel::ProgramError => "program error".red().bold(),
        }
    }
}

impl fmt::Display for PrintableMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.label(), self.message)?;
        let file_path = match &self.file_path {
            Some(path) => path,
            None => return Ok(()),
        };
        let location = match &self.location {
            Some(location) => location,
            None => return writeln!(f, " {} {}", "-->".blue().bold(), file_path.display()),
        };
        let line_number = location.line_number.to_string();
        let gutter = " ".repeat(line_number.len() + 1);
        let bar = "|".blue().bold();
        writeln!(
            f,
            "{}{} {}:{}:{}",
            " ".repeat(line_number.len()),
            "-->".blue().bold(),
            file_path.display(),
            location.line_number,
            location.column,
        )?;
        writeln!(f, "{gutter}{bar}")?;
        writeln!(
            f,
            "{} {bar} {}",
            line_number.blue().bold(),
            location.line_text
        )?;
        let caret = "^".red().bold();
        writeln!(
            f,
            "{gutter}{bar} {}{caret}",
            " ".repeat(location.column.saturating_sub(1))
        )?;
        if let Some(help_text) = &location.help_text {
            writeln!(f, "{gutter}{} help: {help_text}", "=".blue().bold())?;
        }
        Ok(())
    }
}

/// Builds a "Did you mean" suffix from the candidates that look like `name`.
pub fn similar_help_suggestions(
    name: &str,
    candidates: impl Iterator<Item = String>,
) -> Option<String> {
    let mut scored = candidates
        .map(|candidate| (strsim::jaro_winkler(name, &candidate), candidate))
        .filter(|(score, _)| *score > SIMILAR_NAME_THRESHOLD)
        .collect::<Vec<_>>();
    scored.sort_by(|(a, a_name), (b, b_name)| {
        b.partial_cmp(a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a_name.cmp(b_name))
    });
    let names = scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| format!("`{candidate}`"))
        .collect::<Vec<_>>();
    match names.len() {
        0 => None,
        1 => Some(format!(" Did you mean {}?", names[0])),
        _ => Some(format!(" Did you mean one of {}?", names.join(", "))),
    }
}
