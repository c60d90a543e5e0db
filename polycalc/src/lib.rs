//! The polycalc app. For an overview of the calculator's design, see
//! [libpolycalc's documentation](libpolycalc).

#![deny(missing_docs)]

mod diagnostics;
use diagnostics::{emit_line_diagnostic, sanitize_source_for_diagnostics};

mod logging;
pub use logging::init_logging;

use libpolycalc::diagnostics::Diagnostic;
use libpolycalc::{Calculator, ParserOptions};

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

/// Options to run polycalc with.
pub struct Opts {
    /// File to read input from. [None](Option::None) reads standard input.
    pub input: Option<String>,
    /// Maximum number of brackets a polynomial literal may have open at once.
    pub max_depth: usize,
    /// When true, every error line is followed by a rendered diagnostic.
    pub diagnostics: bool,
    /// When is [Some](Option::Some) diagnostic code, will explain that code.
    pub explain_diagnostic: Option<String>,
    /// When is [Some](Option::Some) level, library events up to that level are logged.
    pub log_level: Option<LevelFilter>,
    /// When true, rendered diagnostics will be colored.
    pub color: bool,
}

/// Parses [Opts](self::Opts) from the command line or given a parser that acts on the clap
/// [App](clap::App).
pub fn get_opts<P>(parser: P, color: bool) -> Result<Opts, clap::Error>
where
    P: for<'a> FnOnce(clap::App<'a, '_>) -> Result<clap::ArgMatches<'a>, clap::Error>,
{
    let app = clap::App::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .author(clap::crate_authors!())
        .arg(
            clap::Arg::with_name("input")
                .help("File to read lines of input from. Reads standard input if absent."),
        )
        .arg(
            clap::Arg::with_name("max-depth")
                .long("--max-depth")
                .value_name("n")
                .help("Maximum number of brackets a polynomial literal may have open at once.")
                .takes_value(true)
                .default_value("512"),
        )
        .arg(
            clap::Arg::with_name("diagnostics")
                .long("--diagnostics")
                .help("Follow every error line with a detailed diagnostic."),
        )
        .arg(
            clap::Arg::with_name("explain")
                .long("--explain")
                .value_name("diagnostic")
                .help("Provide a detailed explanation for a diagnostic code.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("log")
                .long("--log")
                .value_name("level")
                .help("Log calculator internals to standard error.")
                .takes_value(true)
                .possible_values(&["error", "warn", "info", "debug", "trace"]),
        );
    let matches = parser(app)?;

    let log_level = match matches.value_of("log") {
        Some(level) => Some(level.parse::<LevelFilter>().map_err(|e| {
            clap::Error::with_description(&e.to_string(), clap::ErrorKind::InvalidValue)
        })?),
        None => None,
    };

    let max_depth = match matches.value_of("max-depth") {
        Some(depth) => depth.parse::<usize>().map_err(|e| {
            clap::Error::with_description(
                &format!("invalid value '{}' for --max-depth: {}", depth, e),
                clap::ErrorKind::InvalidValue,
            )
        })?,
        None => ParserOptions::default().max_depth(),
    };

    Ok(Opts {
        input: matches.value_of("input").map(str::to_owned),
        max_depth,
        diagnostics: matches.is_present("diagnostics"),
        explain_diagnostic: matches.value_of("explain").map(str::to_owned),
        log_level,
        color,
    })
}

/// Opens the input named by `opts`.
pub fn open_input(opts: &Opts) -> io::Result<Box<dyn BufRead>> {
    Ok(match &opts.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

/// Runs polycalc end-to-end over `input`, returning the exit code.
///
/// Rejected lines are reported on `stderr` and do not change the exit code.
pub fn run_polycalc(
    opts: &Opts,
    input: impl BufRead,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> io::Result<i32> {
    if let Some(diag_code) = &opts.explain_diagnostic {
        let codes = Diagnostic::all_codes_with_explanations();
        return match codes.get::<str>(diag_code) {
            Some(explanation) => {
                write!(stdout, "{}", explanation)?;
                Ok(0)
            }
            None => {
                writeln!(stderr, "{} is not a diagnostic code", diag_code)?;
                Ok(1)
            }
        };
    }

    debug!(
        target: "polycalc::app",
        input = opts.input.as_deref().unwrap_or("<stdin>"),
        max_depth = opts.max_depth,
        "reading input"
    );
    let mut calculator = Calculator::new(ParserOptions::default().set_max_depth(opts.max_depth));
    let mut lines = 0;
    for (i, line) in input.split(b'\n').enumerate() {
        let line = line?;
        let line_no = i + 1;
        lines = line_no;
        match calculator.process_line(line_no, &line) {
            Ok(Some(output)) => writeln!(stdout, "{}", output)?,
            Ok(None) => {}
            Err(error) => {
                writeln!(stderr, "{}", error)?;
                if opts.diagnostics {
                    let source = sanitize_source_for_diagnostics(&line);
                    stderr.write_all(
                        emit_line_diagnostic(
                            opts.input.as_deref(),
                            line_no,
                            &source,
                            &error.diagnostic(),
                            opts.color,
                        )
                        .as_bytes(),
                    )?;
                }
            }
        }
    }
    debug!(target: "polycalc::app", lines, "input exhausted");
    Ok(0)
}
