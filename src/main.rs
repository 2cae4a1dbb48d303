/*!
main.rs - Command-line entry point.

Usage: ls8 [--trace] [--limit N] <program.ls8>

Loads the program, runs it, and exits nonzero on a machine fault or a
load error. With the `terminal` feature the machine runs interactively
in the raw-mode frontend; otherwise output goes straight to stdout.
Diagnostics always go to stderr so program output stays clean.
*/

use std::env;
use std::process;

use ls8::{HaltReason, Machine};

struct Args {
    program: String,
    trace: bool,
    limit: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut program = None;
    let mut trace = false;
    let mut limit = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--trace" => trace = true,
            "--limit" => {
                let value = args.next().ok_or("--limit needs a tick count")?;
                limit = Some(value.parse::<u64>().map_err(|_| {
                    format!("--limit: `{value}` is not a tick count")
                })?);
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option `{other}`"));
            }
            other => {
                if program.replace(other.to_string()).is_some() {
                    return Err("expected exactly one program file".into());
                }
            }
        }
    }

    let program = program.ok_or("expected a program file")?;
    Ok(Args { program, trace, limit })
}

fn run(args: &Args) -> Result<HaltReason, String> {
    let image = ls8::load_file(&args.program)
        .map_err(|e| format!("{}: {e}", args.program))?;

    #[cfg(feature = "terminal")]
    {
        let screen = ls8::term::TermScreen::new()
            .map_err(|e| format!("terminal setup failed: {e}"))?;
        let mut machine = Machine::with_screen(Box::new(screen));
        machine.load(&image).map_err(|e| e.to_string())?;
        machine.cpu_mut().set_trace(args.trace);
        if let Some(limit) = args.limit {
            let reason = machine.run_budget(limit);
            machine.stop();
            return Ok(reason.unwrap_or(HaltReason::Program));
        }
        ls8::term::run_interactive(&mut machine).map_err(|e| e.to_string())
    }

    #[cfg(not(feature = "terminal"))]
    {
        let mut machine = Machine::new();
        machine.load(&image).map_err(|e| e.to_string())?;
        machine.cpu_mut().set_trace(args.trace);
        match args.limit {
            Some(limit) => Ok(machine
                .run_budget(limit)
                .unwrap_or(HaltReason::Program)),
            None => Ok(machine.run()),
        }
    }
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("usage: ls8 [--trace] [--limit N] <program.ls8>");
            process::exit(2);
        }
    };

    match run(&args) {
        Ok(HaltReason::Program) => {}
        Ok(HaltReason::Fault(fault)) => {
            eprintln!("machine fault: {fault}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
