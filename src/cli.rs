//! The command-line surface: `regrep -E <pattern>`, reading the line to
//! search from standard input and mapping the result to an exit code.
//!
//! Argument parsing itself — including what happens when `-E` is missing
//! or malformed — is handled by `clap`, which already exits with status 2
//! on a usage error, matching this CLI's contract without any bespoke
//! validation code.

use std::io::{self, Read};

use clap::Parser;

use crate::Pattern;

#[derive(Parser, Debug)]
#[command(name = "regrep", version, about = "A small regular expression matcher")]
pub struct Args {
    /// The pattern to search for.
    #[arg(short = 'E', value_name = "PATTERN")]
    pub pattern: String,

    /// Print the parsed AST to stderr before attempting a match.
    #[arg(long)]
    pub debug_ast: bool,
}

/// Run the matcher end to end and return the process exit code: `0` on a
/// match, `1` on no match, `2` on any lexical, syntax, semantic, or I/O
/// error. Every exit code above `1` prints exactly one diagnostic line to
/// standard error; a clean no-match prints nothing.
pub fn run(args: Args) -> anyhow::Result<i32> {
    let mut line = Vec::new();
    io::stdin()
        .read_to_end(&mut line)
        .map_err(|e| anyhow::anyhow!("failed to read standard input: {e}"))?;

    let pattern = match Pattern::compile(args.pattern.as_bytes()) {
        Ok(pattern) => pattern,
        Err(e) => {
            eprintln!("regrep: {e}");
            return Ok(2);
        }
    };

    if args.debug_ast {
        eprintln!("{}", pattern.ast());
    }

    match pattern.search(&line) {
        Ok(Some(_)) => Ok(0),
        Ok(None) => Ok(1),
        Err(e) => {
            eprintln!("regrep: {e}");
            Ok(2)
        }
    }
}
