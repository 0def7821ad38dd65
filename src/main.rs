/* Reads tree documents from files, the command line, or stdin, and runs one
 * action over each of them against the demonstration schema. */

use treelang::arena::Limits;
use treelang::error::pretty_error_message;
use treelang::schema::{abc, CastMode};
use treelang::{run, Action, FileOrString, Options};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::Read;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "treelang", version, about = "Parses tree documents and checks them against a schema")]
struct Cli {
    /// Input files; with --text, the documents themselves. Reads stdin if none are given.
    inputs: Vec<String>,

    /// Take the inputs as document text instead of file paths.
    #[arg(short, long)]
    text: bool,

    #[arg(short, long, value_enum, default_value_t = Action::TypeCheck)]
    action: Action,

    /// Let a node stand for any of its base types.
    #[arg(short, long, overrides_with = "strict_casts")]
    relaxed_casts: bool,

    /// Only accept exactly the declared type (default).
    #[arg(short, long, overrides_with = "relaxed_casts")]
    strict_casts: bool,

    /// Log every object the evaluator creates.
    #[arg(long)]
    trace_eval: bool,

    /// Show the offending source line under parse errors.
    #[arg(short, long)]
    verbose: bool,

    /// Mark indentation levels with dots.
    #[arg(short, long)]
    indent_dots: bool,

    #[arg(long, default_value_t = Limits::NODE.max_objects)]
    max_nodes: usize,

    #[arg(long, default_value_t = Limits::NODE.max_bytes)]
    max_node_bytes: usize,

    #[arg(long, default_value_t = Limits::RAW.max_objects)]
    max_raw: usize,

    #[arg(long, default_value_t = Limits::RAW.max_bytes)]
    max_raw_bytes: usize,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            action: self.action,
            casts: if self.relaxed_casts { CastMode::Relaxed } else { CastMode::Strict },
            trace_eval: self.trace_eval,
            verbose: self.verbose,
            indent_dots: self.indent_dots,
            node_limits: Limits { max_objects: self.max_nodes, max_bytes: self.max_node_bytes },
            raw_limits: Limits { max_objects: self.max_raw, max_bytes: self.max_raw_bytes },
        }
    }

    fn inputs(&self) -> Result<Vec<FileOrString>, std::io::Error> {
        if self.inputs.is_empty() {
            let mut buffer = String::new();
            if self.action != Action::PrintTypes {
                std::io::stdin().read_to_string(&mut buffer)?;
            }
            return Ok(vec![FileOrString::String("<stdin>".to_string(), buffer)]);
        }

        Ok(self
            .inputs
            .iter()
            .map(|input| {
                if self.text {
                    FileOrString::String("<text>".to_string(), input.clone())
                } else {
                    FileOrString::File(input.clone())
                }
            })
            .collect())
    }
}

fn init_logging(trace_eval: bool) {
    let default = if trace_eval { "warn,treelang::eval=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).without_time().init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.trace_eval);

    let inputs = match cli.inputs() {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("{}", pretty_error_message(&format!("cannot read stdin: {err}").into()));
            return ExitCode::FAILURE;
        }
    };

    let schema = abc();
    let options = cli.options();

    // Print types once, not once per input.
    let inputs = if options.action == Action::PrintTypes { &inputs[..1] } else { &inputs[..] };

    for input in inputs {
        match run(input, &schema, &options) {
            Ok(output) => print!("{output}"),
            Err(err) => {
                eprintln!("{}", pretty_error_message(&err));
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
