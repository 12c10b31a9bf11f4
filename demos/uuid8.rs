//! Simple command that prints one or '-n count' tagged time-ordered UUID strings

use std::{env, io, io::Write, process::ExitCode};

fn main() -> io::Result<ExitCode> {
    let (count, tag) = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-t tag]",
                    program.as_deref().unwrap_or("uuid8")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    if let Some(tag) = tag {
        if let Err(e) = uuid8::set_tag(tag) {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    }

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..count.unwrap_or(1) {
        writeln!(buf, "{}", uuid8::uuid8())?;
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(
    mut args: impl Iterator<Item = String>,
) -> Result<(Option<usize>, Option<u8>), String> {
    let mut count: Option<usize> = None;
    let mut tag: Option<u8> = None;
    while let Some(arg) = args.next() {
        if arg != "-n" && arg != "-t" {
            return Err(format!("unrecognized argument '{}'", arg));
        }
        let name = &arg[1..];
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", name));
        };
        if arg == "-n" {
            if count.is_some() {
                return Err(format!("option '{}' given more than once", name));
            }
            let Ok(c) = value.parse() else {
                return Err(format!("invalid argument to option '{}': '{}'", name, value));
            };
            count = Some(c);
        } else {
            if tag.is_some() {
                return Err(format!("option '{}' given more than once", name));
            }
            let Ok(t) = value.parse() else {
                return Err(format!("invalid argument to option '{}': '{}'", name, value));
            };
            tag = Some(t);
        }
    }
    Ok((count, tag))
}
