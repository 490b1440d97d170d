use std::process;

use clap::Parser;

use regrep::cli::Args;

fn main() {
    let args = Args::parse();
    match regrep::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("regrep: {e:#}");
            process::exit(2);
        }
    }
}
