//! Top level module which ties the stages of reading a tree document together.
//!
//! A document is lexed and parsed into a generic tree (see [`ast`]) that only
//! knows the shape of the grammar. The evaluator (see [`eval`]) then checks that
//! tree against a [`Schema`], and can build the typed tree the schema describes.
//! The [`printer`] shows either tree.
//!
//! [`run`] performs one configured [`Action`] on one input, which is all the
//! `treelang` binary does.

// I use `cargo clippy -- -D clippy::pedantic`
#![allow(
    clippy::missing_errors_doc,  // Docs? Lol.
    clippy::missing_panics_doc,  // Docs? Lmao.
    clippy::must_use_candidate,  // What?
    clippy::module_name_repetitions,  // Maybe a little weird but I'm bad at naming things.
    clippy::cast_possible_truncation,  // I know
    clippy::if_not_else,  // Actually I like this, its the gaurd pattern
    clippy::match_wildcard_for_single_variants,  // I do this on purpose
)]

pub mod arena;
pub mod ast;
pub mod eval;
pub mod parser;
pub mod printer;
pub mod schema;
pub mod token;

pub mod error;
mod util;

use arena::Limits;
use ast::Ast;
use error::TreeError;
use eval::EvalOptions;
use parser::ParseOptions;
use printer::Format;
use schema::{CastMode, Schema};

/// Name used in diagnostics.
pub const PROGRAM: &str = "treelang";

/// What to do with each input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Action {
    /// Parse only.
    None,
    /// Print the generic tree, attributes named.
    Print,
    /// Print the generic tree, attributes by position.
    Dump,
    /// Print the document back, prettily.
    Pretty,
    /// Print the document back, tersely.
    Terse,
    /// Check the document against the schema, and print its type.
    #[default]
    TypeCheck,
    /// Build the typed tree, and print its size.
    AstBuild,
    /// Build the typed tree, and print it.
    PrintObj,
    /// Print the schema instead of reading any input.
    PrintTypes,
}

/// A simple type wrapping either a file input, or a direct string input.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub enum FileOrString {
    /// Represents input via a file, given by its path.
    File(String),
    /// Represents direct string input. The first string is a "Fake Path" for use
    /// in diagnostics, such as "\<text\>". The second string is the document.
    String(String, String),
}

impl FileOrString {
    /// The name diagnostics use for this input.
    pub fn name(&self) -> &str {
        match self {
            FileOrString::File(path) | FileOrString::String(path, _) => path,
        }
    }

    fn read(&self) -> Result<String, TreeError> {
        match self {
            FileOrString::File(path) => {
                std::fs::read_to_string(path).map_err(|error| TreeError::Io { path: path.clone(), error })
            }
            FileOrString::String(_, data) => Ok(data.clone()),
        }
    }
}

/// Everything configurable about a run.
#[derive(Debug, Clone)]
pub struct Options {
    pub action: Action,
    pub casts: CastMode,
    /// Log every object the evaluator creates.
    pub trace_eval: bool,
    /// Show the offending source line under parse errors.
    pub verbose: bool,
    pub indent_dots: bool,
    /// Limits of the node arenas, for both the generic and the typed tree.
    pub node_limits: Limits,
    /// Limits of the raw arenas, for both the generic and the typed tree.
    pub raw_limits: Limits,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            action: Action::default(),
            casts: CastMode::default(),
            trace_eval: false,
            verbose: false,
            indent_dots: false,
            node_limits: Limits::NODE,
            raw_limits: Limits::RAW,
        }
    }
}

impl Options {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions { verbose: self.verbose, node_limits: self.node_limits, raw_limits: self.raw_limits }
    }

    pub fn eval_options(&self) -> EvalOptions {
        EvalOptions {
            casts: self.casts,
            trace_eval: self.trace_eval,
            node_limits: self.node_limits,
            raw_limits: self.raw_limits,
        }
    }
}

/// Performs `options.action` on one input, returning what should be printed.
pub fn run(input: &FileOrString, schema: &Schema, options: &Options) -> Result<String, TreeError> {
    if options.action == Action::PrintTypes {
        return Ok(schema.print_types());
    }

    let text = input.read()?;
    let ast = parser::parse(input.name(), &text, &options.parse_options())?;
    tracing::debug!("parsed {}: {} nodes", input.name(), ast.node_count());

    let output = match options.action {
        Action::None | Action::PrintTypes => String::new(),
        Action::Print => printer::print_ast(&ast, Format::Print, options.indent_dots)?,
        Action::Dump => printer::print_ast(&ast, Format::Dump, options.indent_dots)?,
        Action::Pretty => printer::print_ast(&ast, Format::Pretty, options.indent_dots)?,
        Action::Terse => printer::print_ast(&ast, Format::Terse, options.indent_dots)?,
        Action::TypeCheck => {
            let ty = eval::type_check(&ast, schema, &options.eval_options())?;
            format!("{}\n", schema.type_name(ty))
        }
        Action::AstBuild => {
            let built = eval::build(&ast, schema, &options.eval_options())?;
            format!("{}: {} nodes\n", schema.type_name(built.ty), built.tree.node_count())
        }
        Action::PrintObj => {
            let built = eval::build(&ast, schema, &options.eval_options())?;
            printer::print_typed(&built.tree, schema, built.root, options.indent_dots)?
        }
    };

    Ok(output)
}

/// Parses the document at `path`, with default options.
pub fn parse_file(path: String) -> Result<Ast, TreeError> {
    let input = FileOrString::File(path);
    let text = input.read()?;
    Ok(parser::parse(input.name(), &text, &ParseOptions::default())?)
}

/// Parses a document given directly, with default options.
pub fn parse_string(input: &str) -> Result<Ast, TreeError> {
    Ok(parser::parse("<text>", input, &ParseOptions::default())?)
}
