//! Executable CLI wrapper

use rdc::errors::ExecError;
use rdc::{Interpreter, Step};
use std::io::{BufRead, ErrorKind};
use linefeed::{DefaultTerminal, Interface};

lazy_static::lazy_static! { static ref HELPMSG: &'static str = {
r##"rdc - reverse-Polish desk calculator on exact rationals

usage: rdc [OPTION ...] [FILE|EXPR|PROMPT ...]

Plain arguments are script files unless a mode option says otherwise.
With no arguments at all, rdc starts a prompt loop.

-f, --file    run the arguments as script files (implied by bare arguments)
-e, --expr    run the arguments as expressions instead of file names
-i, --inter   start the prompt loop; combined with -e/-f, enter it once the
              scripts finish. Alone, a single argument replaces the default
              prompt "> "
-d, --debug   trace each executed command on stderr
-h, --help    print this text and exit

Short options may be clustered (-ei). Script errors are reported on stderr
and execution continues; q at the top level exits with status 0."##};}

/// Line-at-a-time input source, so the interactive mode can carry a proper line editor.
trait ReadLine {
	///one line of input, [`ErrorKind::UnexpectedEof`] when the source ran out
	fn read_line(&mut self) -> std::io::Result<String>;
}
impl<T: BufRead> ReadLine for T {
	fn read_line(&mut self) -> std::io::Result<String> {
		let mut buf = String::new();
		if BufRead::read_line(self, &mut buf)? == 0 {
			return Err(ErrorKind::UnexpectedEof.into());
		}
		Ok(buf)
	}
}

struct LineEditor(Interface<DefaultTerminal>);
impl ReadLine for LineEditor {
	fn read_line(&mut self) -> std::io::Result<String> {
		use linefeed::ReadResult;
		match self.0.read_line() {
			Ok(ReadResult::Input(s)) => {
				self.0.add_history_unique(s.clone());
				Ok(s)
			},
			Ok(ReadResult::Eof) => {Err(ErrorKind::UnexpectedEof.into())},
			Ok(ReadResult::Signal(_)) => {
				self.0.cancel_read_line()?;
				Err(ErrorKind::Interrupted.into())
			},
			Err(e) => {Err(e)}
		}
	}
}

fn input_stream(prompt: &str) -> Box<dyn ReadLine> {
	match Interface::new("rdc") {	//fails when pipes are used
		Ok(iface) => {
			let _ = iface.set_prompt(prompt);
			Box::new(LineEditor(iface))
		},
		Err(_) => {	//fall back to plain stdin
			Box::new(std::io::BufReader::new(std::io::stdin()))
		}
	}
}

/// Runs one chunk of input, reporting recoverable errors on stderr.
///
/// Returns `false` once the interpreter asks to quit or the output sink breaks.
fn feed(dc: &mut Interpreter, src: &str) -> bool {
	for c in src.chars().chain(std::iter::once('\n')) {	//newline flushes literals and ends comments
		match dc.interpret(c) {
			Ok(Step::Continue) => {},
			Ok(Step::Exit) => {
				return false;
			},
			Err(ExecError::Io(e)) => {
				eprintln!("! Can't write output: {e}");
				return false;
			},
			Err(e) => {
				eprintln!("! {e}");
			}
		}
	}
	true
}

fn repl(dc: &mut Interpreter, prompt: Option<String>) {
	let prompt = prompt.unwrap_or_else(|| "> ".into());
	let mut input = input_stream(&prompt);
	loop {
		match input.read_line() {
			Ok(line) => {
				if !feed(dc, &line) {
					return;
				}
			},
			Err(e) if matches!(e.kind(), ErrorKind::UnexpectedEof | ErrorKind::Interrupted) => {
				return;
			},
			Err(e) => {
				eprintln!("! Can't read input: {e}");
				return;
			}
		}
	}
}

///how the non-flag arguments are used
#[derive(Clone, Copy)]
enum Mode {
	///script file names
	Files,
	///expressions to execute directly
	Exprs,
	///prompt loop, an argument overrides the prompt text
	Repl,
}

struct Opts {
	mode: Mode,
	///enter the prompt loop after the scripts are done
	and_repl: bool,
	debug: bool,
	args: Vec<String>,
}

fn unknown_option(arg: &str) -> ! {
	eprintln!("! Unknown option {arg}, -h prints the available ones");
	std::process::exit(1);
}

/// Collects every option into its single-letter form first, then decides the mode,
/// so `--expr` and a clustered `-ei` land in the same place.
fn parse_opts() -> Opts {
	let mut seen = String::new();
	let mut args = Vec::new();
	for arg in std::env::args().skip(1) {
		match arg.strip_prefix("--") {
			Some("file") => seen.push('f'),
			Some("expr") => seen.push('e'),
			Some("inter") => seen.push('i'),
			Some("debug") => seen.push('d'),
			Some("help") => seen.push('h'),
			Some(_) => unknown_option(&arg),
			None => {
				match arg.strip_prefix('-') {
					Some(cluster) if !cluster.is_empty() => {
						for c in cluster.chars() {
							if "fedih".contains(c) {
								seen.push(c);
							}
							else {
								unknown_option(&arg);
							}
						}
					},
					_ => args.push(arg),	//lone "-" included, could be a file name
				}
			}
		}
	}

	if seen.contains('h') {
		println!("{}", *HELPMSG);
		std::process::exit(0);
	}
	if seen.contains('e') && seen.contains('f') {
		eprintln!("! -e and -f don't combine, pick one");
		std::process::exit(1);
	}

	let and_repl = seen.contains('i');
	let mode = if seen.contains('e') {
		Mode::Exprs
	}
	else if seen.contains('f') || (!args.is_empty() && !and_repl) {
		Mode::Files	//bare arguments default to file names
	}
	else {
		Mode::Repl
	};
	Opts {
		mode,
		and_repl,
		debug: seen.contains('d'),
		args,
	}
}

fn main() {
	let opts = parse_opts();
	let mut out = std::io::stdout();
	let mut dc = Interpreter::new(&mut out);
	dc.debug = opts.debug;

	match opts.mode {
		Mode::Repl => {
			repl(&mut dc, opts.args.into_iter().next());
		},
		Mode::Exprs => {
			for ex in opts.args {
				if !feed(&mut dc, &ex) {
					return;
				}
			}
			if opts.and_repl {
				repl(&mut dc, None);
			}
		},
		Mode::Files => {
			for name in opts.args {
				match std::fs::read_to_string(&name) {
					Ok(script) => {
						if !feed(&mut dc, &script) {
							return;
						}
					},
					Err(e) => {
						eprintln!("! Can't read file {name}: {e}");
						std::process::exit(1);
					}
				}
			}
			if opts.and_repl {
				repl(&mut dc, None);
			}
		},
	}
}
