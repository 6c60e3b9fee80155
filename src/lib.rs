#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc, str::FromStr, time::Instant};

use tracing::debug;

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};

pub mod analyzer;
pub mod ast;
pub mod errors;
pub mod generator;
pub mod lexer;
pub mod macros;
pub mod optimizer;
pub mod parser;

extern crate regex;

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Which pipeline artifact `compile` should hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Parsed,
    Analyzed,
    Optimized,
    Js,
}

impl FromStr for OutputType {
    type Err = Error;

    fn from_str(requested: &str) -> Result<Self, Self::Err> {
        match requested {
            "parsed" => Ok(OutputType::Parsed),
            "analyzed" => Ok(OutputType::Analyzed),
            "optimized" => Ok(OutputType::Optimized),
            "js" => Ok(OutputType::Js),
            _ => Err(Error::new(
                ErrorImpl::UnknownOutputType {
                    requested: requested.to_string(),
                },
                Position::null(),
            )),
        }
    }
}

impl Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputType::Parsed => write!(f, "parsed"),
            OutputType::Analyzed => write!(f, "analyzed"),
            OutputType::Optimized => write!(f, "optimized"),
            OutputType::Js => write!(f, "js"),
        }
    }
}

/// Runs the pipeline up to `output_type` and returns that stage's artifact.
///
/// `parsed` only reports that the syntax is valid, `analyzed` and `optimized`
/// return a debug rendering of the typed program, `js` returns the generated
/// JavaScript.
pub fn compile(source: &str, file: Option<String>, output_type: OutputType) -> Result<String, Error> {
    let start = Instant::now();
    let tokens = lexer::lexer::tokenize(source.to_string(), file)?;
    debug!(elapsed = ?start.elapsed(), tokens = tokens.len(), "tokenized");

    let parse_start = Instant::now();
    let tree = parser::parser::parse(tokens, source)?;
    debug!(elapsed = ?parse_start.elapsed(), "parsed");
    if output_type == OutputType::Parsed {
        return Ok(String::from("Syntax is ok"));
    }

    let analyze_start = Instant::now();
    let analyzed = analyzer::analyzer::analyze(&tree)?;
    debug!(elapsed = ?analyze_start.elapsed(), statements = analyzed.statements.len(), "analyzed");
    if output_type == OutputType::Analyzed {
        return Ok(format!("{:#?}", analyzed));
    }

    let optimize_start = Instant::now();
    let optimized = optimizer::optimizer::optimize(analyzed);
    debug!(elapsed = ?optimize_start.elapsed(), "optimized");
    if output_type == OutputType::Optimized {
        return Ok(format!("{:#?}", optimized));
    }

    let generate_start = Instant::now();
    let js = generator::generator::generate(&optimized);
    debug!(elapsed = ?generate_start.elapsed(), total = ?start.elapsed(), "generated");
    Ok(js)
}

/// Finds the 1-based line holding byte `position`, the line's text and the
/// 0-based column within it.
pub fn get_line_at_position(content: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last_line = String::new();

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        last_line = line.to_string();
        start = end;
        line_number += 1;
    }

    // Past the end: point just after the last character
    if last_line.ends_with('\n') || last_line.is_empty() {
        (line_number, String::new(), 0)
    } else {
        (line_number - 1, last_line.clone(), last_line.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nThis is a test\n\nTesting { }\n";

        let (line_number, line, line_pos) = get_line_at_position(content, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(content, 38);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_position_past_end() {
        let (line_number, line, line_pos) = get_line_at_position("print(1", 7);
        assert_eq!(line_number, 1);
        assert_eq!(line, "print(1");
        assert_eq!(line_pos, 7);
    }

    #[test]
    fn test_render_error_reports_line_and_column() {
        let source = "let x = 1;\nprint(y);\n";
        let error = compile(source, Some(String::from("demo.boum")), OutputType::Js).unwrap_err();
        let rendered = render_error(&error, source);

        assert!(rendered.contains("UndeclaredName"));
        assert!(rendered.contains("-> demo.boum:2:7"));
        assert!(rendered.contains("2 | print(y);"));
    }

    #[test]
    fn test_output_type_from_str() {
        assert_eq!("js".parse::<OutputType>().unwrap(), OutputType::Js);
        assert_eq!("parsed".parse::<OutputType>().unwrap(), OutputType::Parsed);
        let error = "wasm".parse::<OutputType>().unwrap_err();
        assert_eq!(error.get_error_name(), "UnknownOutputType");
    }
}

/// Renders `error` against `source` the way the command line shows it.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: UndeclaredName (identifier `y` has not been declared)
        -> final.boum:20:9
           |
        20 | let a = y;
           | --------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    let mut rendered = String::new();

    rendered.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error));
    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        rendered.push_str(&format!("Tip: {}\n", tip));
    }
    rendered.push_str(&format!("-> {}:{}:{}\n", position.1, line, line_pos + 1));
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}
