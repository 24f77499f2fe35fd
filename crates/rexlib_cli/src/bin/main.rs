use log::info;
use rexlib::{CompileFlags, DfaMatch, ExecFlags, Match, Repl, Rex, SplitPiece};
use std::env;
use std::error::Error;
use std::io::{self, Read, Write};

const VERSION: &str = "rex 0.1.0 (rexlib 0.3.0)";

type CliResult<T> = Result<T, Box<dyn Error>>;

fn print_usage() {
    eprintln!("usage: rex [options] command [pattern [subject [repl]]]");
    eprintln!("Available commands are:");
    eprintln!("  find     first match: start, end and captures");
    eprintln!("  tfind    same as find");
    eprintln!("  match    captures of the first match");
    eprintln!("  exec     first match with capture offsets");
    eprintln!("  gmatch   every match, one per line");
    eprintln!("  gsub     replace matches with template 'repl' (%0-%9, %%)");
    eprintln!("  split    pieces between matches, one per line");
    eprintln!("  dfa      every match length at the leftmost start, or 'partial' with -e PARTIAL");
    eprintln!("  flags    list flag and error names");
    eprintln!("  version  show the engine version");
    eprintln!("Available options are:");
    eprintln!("  -f flags  compile flags: shorthand (imsxU) or a number");
    eprintln!("  -e flags  exec flags: names (ANCHORED,NOTEMPTY) or a number");
    eprintln!("  -n max    replace at most 'max' matches");
    eprintln!("  -i init   start position (1-based, negative counts from the end)");
    eprintln!("  -s        print split separators");
    eprintln!("  -j        print results as JSON");
    eprintln!("  -v        show version information");
    eprintln!("  --        stop handling options");
    eprintln!("  -         read the subject from stdin");
}

fn print_version() {
    println!("{}", VERSION);
    println!("engine {}", rexlib::version_string());
}

#[derive(Default)]
struct Options {
    cflags: CompileFlags,
    eflags: ExecFlags,
    max: Option<usize>,
    init: Option<i64>,
    separators: bool,
    json: bool,
    show_version: bool,
    read_stdin: bool,
    command: Option<String>,
    args: Vec<String>,
}

fn option_value<'a>(args: &'a [String], i: usize, name: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("'{}' needs argument", name))
}

fn parse_cflags(value: &str) -> CompileFlags {
    match value.parse::<u32>() {
        Ok(bits) => CompileFlags::from_bits_retain(bits),
        Err(_) => CompileFlags::parse(value),
    }
}

fn parse_eflags(value: &str) -> Result<ExecFlags, String> {
    if let Ok(bits) = value.parse::<u32>() {
        return Ok(ExecFlags::from_bits_retain(bits));
    }
    let mut eflags = ExecFlags::empty();
    for name in value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let Some(&(_, bits)) = rexlib::match_flags().iter().find(|(n, _)| *n == name) else {
            return Err(format!("unknown exec flag '{}'", name));
        };
        eflags |= ExecFlags::from_bits_retain(bits);
    }
    Ok(eflags)
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();
    let mut opts = Options::default();
    let mut i = 1;
    let mut stop_options = false;

    while i < args.len() {
        let arg = &args[i];

        if !stop_options && arg.starts_with('-') {
            match arg.as_str() {
                "-f" => {
                    i += 1;
                    opts.cflags = parse_cflags(option_value(&args, i, "-f")?);
                }
                "-e" => {
                    i += 1;
                    opts.eflags = parse_eflags(option_value(&args, i, "-e")?)?;
                }
                "-n" => {
                    i += 1;
                    let value = option_value(&args, i, "-n")?;
                    opts.max = Some(
                        value
                            .parse()
                            .map_err(|_| format!("'-n' expects a count, got '{}'", value))?,
                    );
                }
                "-i" => {
                    i += 1;
                    let value = option_value(&args, i, "-i")?;
                    opts.init = Some(
                        value
                            .parse()
                            .map_err(|_| format!("'-i' expects an integer, got '{}'", value))?,
                    );
                }
                "-s" => {
                    opts.separators = true;
                }
                "-j" => {
                    opts.json = true;
                }
                "-v" => {
                    opts.show_version = true;
                }
                "--" => {
                    stop_options = true;
                }
                "-" => {
                    opts.read_stdin = true;
                }
                _ => {
                    return Err(format!("unrecognized option '{}'", arg));
                }
            }
        } else if opts.command.is_none() {
            opts.command = Some(arg.clone());
        } else {
            opts.args.push(arg.clone());
        }
        i += 1;
    }

    Ok(opts)
}

fn push_number(line: &mut Vec<u8>, n: usize) {
    let mut buffer = itoa::Buffer::new();
    line.extend_from_slice(buffer.format(n).as_bytes());
}

fn push_value(line: &mut Vec<u8>, value: Option<&[u8]>) {
    line.extend_from_slice(value.unwrap_or(b"false"));
}

fn push_tab(line: &mut Vec<u8>) {
    line.push(b'\t');
}

fn push_values(line: &mut Vec<u8>, values: &[Option<&[u8]>]) {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            push_tab(line);
        }
        push_value(line, *value);
    }
}

fn write_line(out: &mut impl Write, mut line: Vec<u8>) -> io::Result<()> {
    line.push(b'\n');
    out.write_all(&line)
}

#[cfg(feature = "serde")]
fn write_json(
    out: &mut impl Write,
    value: Option<Result<serde_json::Value, String>>,
) -> CliResult<bool> {
    let found = value.is_some();
    let value = value.transpose()?.unwrap_or(serde_json::Value::Null);
    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    Ok(found)
}

/// Split positional arguments into pattern, subject and the rest.
fn positionals(opts: &Options) -> CliResult<(&str, Vec<u8>, &[String])> {
    let Some((pattern, rest)) = opts.args.split_first() else {
        return Err("missing pattern".into());
    };
    if opts.read_stdin {
        let mut subject = Vec::new();
        io::stdin().read_to_end(&mut subject)?;
        return Ok((pattern.as_str(), subject, rest));
    }
    let Some((subject, rest)) = rest.split_first() else {
        return Err("missing subject (use '-' to read it from stdin)".into());
    };
    Ok((pattern.as_str(), subject.as_bytes().to_vec(), rest))
}

fn print_flags(out: &mut impl Write) -> CliResult<bool> {
    let mut buffer = itoa::Buffer::new();
    for (name, value) in rexlib::flags() {
        writeln!(out, "{}\t{}", name, buffer.format(value))?;
    }
    Ok(true)
}

/// Run one command. Ok(false) means "no match".
fn run(command: &str, opts: &Options) -> CliResult<bool> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        "flags" => return print_flags(&mut out),
        "version" => {
            writeln!(out, "{}", rexlib::version_string())?;
            return Ok(true);
        }
        _ => {}
    }

    let (pattern, subject, rest) = positionals(opts)?;
    let subject = &subject[..];
    let init = opts.init.unwrap_or(1);
    let eflags = opts.eflags;
    let mut rex = Rex::new(pattern, opts.cflags)?;
    info!("{} {:?} on {} bytes", command, pattern, subject.len());

    match command {
        "find" | "tfind" => {
            let found = rex.find(subject, init, eflags)?;
            #[cfg(feature = "serde")]
            if opts.json {
                return write_json(&mut out, found.as_ref().map(rexlib::serde::found_to_json));
            }
            let Some(found) = found else {
                writeln!(out, "nil")?;
                return Ok(false);
            };
            let mut line = Vec::new();
            push_number(&mut line, found.start);
            push_tab(&mut line);
            push_number(&mut line, found.end);
            for capture in &found.captures {
                push_tab(&mut line);
                push_value(&mut line, *capture);
            }
            write_line(&mut out, line)?;
            Ok(true)
        }
        "match" => {
            let values = rex.r#match(subject, init, eflags)?;
            #[cfg(feature = "serde")]
            if opts.json {
                return write_json(
                    &mut out,
                    values.as_deref().map(rexlib::serde::values_to_json),
                );
            }
            let Some(values) = values else {
                writeln!(out, "nil")?;
                return Ok(false);
            };
            let mut line = Vec::new();
            push_values(&mut line, &values);
            write_line(&mut out, line)?;
            Ok(true)
        }
        "exec" => {
            let exec = rex.exec(subject, init, eflags)?;
            #[cfg(feature = "serde")]
            if opts.json {
                return write_json(&mut out, exec.as_ref().map(rexlib::serde::exec_to_json));
            }
            let Some(exec) = exec else {
                writeln!(out, "nil")?;
                return Ok(false);
            };
            let mut line = Vec::new();
            push_number(&mut line, exec.start);
            push_tab(&mut line);
            push_number(&mut line, exec.end);
            for offsets in &exec.offsets {
                push_tab(&mut line);
                match offsets {
                    Some((start, end)) => {
                        push_number(&mut line, *start);
                        push_tab(&mut line);
                        push_number(&mut line, *end);
                    }
                    None => line.extend_from_slice(b"false\tfalse"),
                }
            }
            write_line(&mut out, line)?;
            Ok(true)
        }
        "gmatch" => {
            let matches: Vec<Match<'_>> = rex
                .gmatch(subject, init, eflags)
                .collect::<Result<_, _>>()?;
            #[cfg(feature = "serde")]
            if opts.json {
                let values = matches
                    .iter()
                    .map(rexlib::serde::match_to_json)
                    .collect::<Result<Vec<_>, String>>()?;
                return write_json(&mut out, Some(Ok(serde_json::Value::Array(values))));
            }
            for m in &matches {
                let mut line = Vec::new();
                push_values(&mut line, &m.values());
                write_line(&mut out, line)?;
            }
            Ok(!matches.is_empty())
        }
        "gsub" => {
            let Some(template) = rest.first() else {
                return Err("'gsub' needs a replacement".into());
            };
            let result = rex.gsub(subject, Repl::template(template), opts.max, eflags)?;
            info!(
                "{} matches, {} substitutions",
                result.matches, result.substitutions
            );
            #[cfg(feature = "serde")]
            if opts.json {
                return write_json(&mut out, Some(rexlib::serde::gsub_to_json(&result)));
            }
            write_line(&mut out, result.output)?;
            Ok(true)
        }
        "split" => {
            let pieces: Vec<SplitPiece<'_>> = rex
                .split(subject, eflags)
                .with_separators(opts.separators)
                .collect::<Result<_, _>>()?;
            #[cfg(feature = "serde")]
            if opts.json {
                return write_json(&mut out, Some(rexlib::serde::split_to_json(&pieces)));
            }
            for piece in &pieces {
                let mut line = piece.text.to_vec();
                if piece.separator.is_some() {
                    push_tab(&mut line);
                    push_values(&mut line, &piece.separator_values());
                }
                write_line(&mut out, line)?;
            }
            Ok(true)
        }
        "dfa" => {
            let result = rex.dfa_exec(subject, init, eflags)?;
            #[cfg(feature = "serde")]
            if opts.json {
                return write_json(&mut out, result.as_ref().map(rexlib::serde::dfa_to_json));
            }
            match result {
                Some(DfaMatch::Full {
                    start,
                    offsets,
                    count,
                }) => {
                    let mut line = Vec::new();
                    push_number(&mut line, start);
                    push_tab(&mut line);
                    push_number(&mut line, count);
                    for (s, e) in offsets {
                        push_tab(&mut line);
                        push_number(&mut line, s);
                        push_tab(&mut line);
                        push_number(&mut line, e);
                    }
                    write_line(&mut out, line)?;
                    Ok(true)
                }
                Some(DfaMatch::Partial) => {
                    writeln!(out, "partial")?;
                    Ok(true)
                }
                None => {
                    writeln!(out, "nil")?;
                    Ok(false)
                }
            }
        }
        _ => Err(format!("unknown command '{}'", command).into()),
    }
}

fn main() {
    env_logger::init();
    std::process::exit(rex_main());
}

fn rex_main() -> i32 {
    let opts = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("rex: {}", e);
            print_usage();
            return 2;
        }
    };

    if opts.json && !cfg!(feature = "serde") {
        eprintln!("rex: '-j' needs the serde feature");
        return 2;
    }

    if opts.show_version {
        print_version();
        if opts.command.is_none() {
            return 0;
        }
    }

    let Some(command) = opts.command.as_deref() else {
        print_usage();
        return 2;
    };

    match run(command, &opts) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("rex: {}", e);
            2
        }
    }
}
