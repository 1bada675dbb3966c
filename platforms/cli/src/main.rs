mod logging;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tmi::{Halt, ProgramLoader, TuringMachine};

/// The last executed state was accepting.
const ACCEPTED: u8 = 0;
/// The last executed state was not accepting.
const REJECTED: u8 = 1;
/// Bad arguments, unreadable program, or unresolved state reference.
const INVALID: u8 = 1;

/// Runs a single-tape Turing machine program against the tape read from stdin.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  printf 0110 | tmi demos/flip.tm
  tmi demos/parity.tm < bits.txt")]
struct Cli {
    /// Path to the program description.
    /// The initial tape is the whole of stdin, one symbol per character.
    /// Lines of the program that are skipped are reported on stderr.
    program: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            print!("{}", e.render());
            return ExitCode::from(INVALID);
        }
    };

    logging::init();

    match run(&cli) {
        Ok(Halt::Accept) => ExitCode::from(ACCEPTED),
        Ok(Halt::Reject) => ExitCode::from(REJECTED),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(INVALID)
        }
    }
}

fn run(cli: &Cli) -> Result<Halt> {
    let program = ProgramLoader::load_program(&cli.program)
        .with_context(|| format!("failed to load program {}", cli.program.display()))?;

    let input = ProgramLoader::load_tape(io::stdin().lock())
        .context("failed to read tape from stdin")?;

    let mut machine = TuringMachine::new(&program, &input);
    let halt = machine.run();
    tracing::debug!(steps = machine.step_count(), ?halt, "machine halted");

    println!("{}", machine.tape().contents());

    Ok(halt)
}
