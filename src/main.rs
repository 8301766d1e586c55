use std::{
    io::{self, BufRead, Write},
    mem,
    path::PathBuf,
    process::ExitCode,
    thread,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use oxlang::{
    Error, Runtime, RuntimeConfig, Value,
    error::LexError,
    interpreter::lexer::{Token, tokenize},
    source::Source,
};
use tracing_subscriber::EnvFilter;

/// Stack of the interpreter thread. Large enough that the call depth bound,
/// not the host stack, stops runaway recursion.
const STACK_SIZE: usize = 256 * 1024 * 1024;
const LOG_VARIABLE: &str = "OX_LOG";
const PROMPT: &str = "ox> ";
const CONTINUATION: &str = "--> ";

/// ox is a small imperative scripting language.
#[derive(Parser, Debug)]
#[command(name = "ox", version, about, long_about = None)]
struct Args {
    /// Script to run. Starts the REPL when neither a file nor --eval is given.
    file: Option<PathBuf>,

    /// Runs a snippet of ox code instead of a file.
    #[arg(short, long, value_name = "CODE", conflicts_with = "file")]
    eval: Option<String>,

    /// Adds a library root searched by `import`. May be repeated.
    #[arg(short = 'L', long = "lib-path", value_name = "DIR")]
    lib_paths: Vec<PathBuf>,

    /// Maximum nesting of calls and imports.
    #[arg(long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,
}

fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_env(LOG_VARIABLE).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_writer(io::stderr)
                             .with_env_filter(filter)
                             .init();

    let args = Args::parse();
    let worker = thread::Builder::new().name("ox".to_string())
                                       .stack_size(STACK_SIZE)
                                       .spawn(move || run(&args))
                                       .context("can't start the interpreter thread")?;

    worker.join()
          .map_err(|_| anyhow!("the interpreter thread panicked"))?
}

fn run(args: &Args) -> Result<ExitCode> {
    let mut config = RuntimeConfig::from_env();
    for dir in args.lib_paths.iter().rev() {
        config = config.with_lib_path_first(dir.clone());
    }
    if let Some(depth) = args.max_depth {
        config = config.with_max_call_depth(depth);
    }

    if let Some(code) = &args.eval {
        return Ok(report(Runtime::with_config(config).execute(code)));
    }

    if let Some(path) = &args.file {
        let source = Source::from_path(path).with_context(|| {
                                                 format!("can't read {}", path.display())
                                             })?;
        if let Some(dir) = path.parent() {
            config = config.with_lib_path_first(dir);
        }
        return Ok(report(Runtime::with_config(config).execute_source(source)));
    }

    repl(Runtime::with_config(config))
}

fn report(result: Result<Value, Error>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Reads units from standard input until end of file.
///
/// Lines accumulate until the brackets of the buffered text balance and no
/// string or block comment is left open; the unit then runs against the one
/// persistent runtime.
fn repl(mut runtime: Runtime) -> Result<ExitCode> {
    let mut lines = io::stdin().lock().lines();
    let mut buffer = String::new();

    loop {
        prompt(if buffer.is_empty() { PROMPT } else { CONTINUATION })?;

        let Some(line) = lines.next() else {
            break;
        };
        buffer.push_str(&line?);
        buffer.push('\n');

        if !is_complete(&buffer) {
            continue;
        }

        let unit = mem::take(&mut buffer);
        if unit.trim().is_empty() {
            continue;
        }
        match runtime.execute(&unit) {
            Ok(Value::Nil) => {},
            Ok(value) => println!("{value}"),
            Err(e) => eprintln!("{e}"),
        }
    }

    println!();
    Ok(ExitCode::SUCCESS)
}

fn prompt(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}

/// Whether `text` closes every bracket it opens.
///
/// Lexing errors other than an open string or comment count as complete, so
/// the parser gets to report them.
fn is_complete(text: &str) -> bool {
    let source = Source::anonymous(text);

    match tokenize(&source) {
        Ok(lexemes) => {
            let depth: i64 = lexemes.iter()
                                    .map(|lexeme| match lexeme.token {
                                        Token::LParen | Token::LBracket | Token::LBrace => 1,
                                        Token::RParen | Token::RBracket | Token::RBrace => -1,
                                        _ => 0,
                                    })
                                    .sum();
            depth <= 0
        },
        Err(Error::Lex { kind: LexError::UnterminatedString | LexError::UnterminatedComment,
                         .. }) => false,
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::is_complete;

    #[test]
    fn units_wait_for_balanced_brackets() {
        assert!(is_complete("x = 1\n"));
        assert!(!is_complete("func f(a) {\n"));
        assert!(!is_complete("func f(a) {\n  return [a,\n"));
        assert!(is_complete("func f(a) {\n  return [a, 1]\n}\n"));
        assert!(!is_complete("s = \"open\n"));
        assert!(!is_complete("/* still\n"));
        assert!(is_complete("x = }\n"));
    }
}
