use polycalc::{get_opts, init_logging, open_input, run_polycalc};
use std::io::{self, Write};
use termcolor::{BufferedStandardStream, ColorChoice, WriteColor};

fn main_impl() -> Result<(), Box<dyn std::error::Error>> {
    let mut ch_stdout = BufferedStandardStream::stdout(ColorChoice::Never);
    let mut ch_stderr = BufferedStandardStream::stderr(ColorChoice::Auto);
    let is_tty = atty::is(atty::Stream::Stderr);
    let use_color = is_tty && ch_stderr.supports_color();

    let opts = match get_opts(|app| app.get_matches_safe(), use_color) {
        Ok(opts) => opts,
        Err(e) => e.exit(),
    };
    if let Some(level) = opts.log_level {
        init_logging(level);
    }

    let input = match open_input(&opts) {
        Ok(input) => input,
        Err(e) => {
            let input = opts.input.as_deref().unwrap_or("<stdin>");
            writeln!(&mut ch_stderr, "error: cannot read {}: {}", input, e)?;
            ch_stderr.flush()?;
            std::process::exit(1);
        }
    };

    let code = run_polycalc(&opts, input, &mut ch_stdout, &mut ch_stderr);
    ch_stdout.flush()?;
    ch_stderr.flush()?;
    match code {
        Ok(code) => std::process::exit(code),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => std::process::exit(0),
        Err(e) => Err(e.into()),
    }
}

fn main() {
    let out = std::panic::catch_unwind(main_impl);

    match out {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        Err(..) => {
            eprint!(
                "\nnote: you found an internal polycalc error (ISE; it's like an ICE, but for polycalc)!\n"
            );
            std::process::exit(2);
        }
    }
}
