//! Interpreter core for rdc, an arbitrary-precision reverse-Polish desk calculator.
//!
//! The central type is [`Interpreter`]: construct one over an output sink and feed it
//! input one character at a time with [`Interpreter::interpret`]. Each character either
//! extends the multi-character operation currently in progress (a number or string
//! literal, a register or conditional command waiting for its register name, a comment)
//! or dispatches a complete command. Macros re-enter the same dispatcher recursively.

pub mod structs;
use structs::*;

pub(crate) mod fns;

pub mod errors;
use errors::ExecError;

pub(crate) mod conv;

pub mod num;

use std::io::Write;
use malachite::Rational;
use malachite::base::num::basic::traits::Zero;

/// What the caller should do after feeding a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use] pub enum Step {
	/// Keep feeding input
	Continue,

	/// A quit command reached the top level, stop feeding
	Exit,
}

///internal outcome of one dispatched character
enum Flow {
	///command finished or suspended itself
	Done,

	///command finished and the character must be dispatched again
	Reprocess,

	///quit requested, unwind macro frames
	Exit,
}

///register-addressed stack commands
#[derive(Clone, Copy, Debug)]
enum RegAct {
	///overwrite the register with the popped value
	Save,
	///copy the register's top onto the main stack
	Load,
	///push the popped value onto the register
	Push,
	///pop the register onto the main stack
	Pop,
}

///comparisons for conditional macros
#[derive(Clone, Copy, Debug)]
enum Cmp { Lt, Gt, Eq }

/// Multi-character operation suspended until the next character arrives.
///
/// At most one is active at a time; it is cleared before the next character is routed,
/// and re-stored only if the operation still wants more input.
enum Pending {
	Number(NumBuilder),
	Text(StrBuilder),
	Register(RegAct),
	Compare { cmp: Cmp, negated: bool },
	///`!` seen, comparison operator not yet
	Negate,
	///swallowing until end of line
	Comment,
}

#[derive(Clone, Copy)]
enum Command {
	///monadic pure function
	Fn1(fns::Mon),

	///dyadic pure function
	Fn2(fns::Dya),

	///triadic pure function
	Fn3(fns::Tri),

	///impure command
	Exec,

	///register command, consumes a register name next
	Reg(RegAct),

	///conditional macro, consumes a register name next
	Cond(Cmp),

	///begin value literal
	Lit,

	///recognized but unavailable
	Stub,

	///no command
	Space,
}

///fixed character-to-command mapping
const fn char_cmd(c: char) -> Command {
	use Command::*;
	match c {
		'0'..='9' | 'A'..='H' | '.' | '_' | '[' => Lit,
		'+' => Fn2(fns::add),
		'-' => Fn2(fns::sub),
		'*' => Fn2(fns::mul),
		'/' => Fn2(fns::div),
		'%' => Fn2(fns::rem),
		'~' => Fn2(fns::quotrem),
		'^' => Fn2(fns::pow),
		'|' => Fn3(fns::modexp),
		'v' => Fn1(fns::sqrt),
		's' => Reg(RegAct::Save),
		'l' => Reg(RegAct::Load),
		'S' => Reg(RegAct::Push),
		'L' => Reg(RegAct::Pop),
		'<' => Cond(Cmp::Lt),
		'>' => Cond(Cmp::Gt),
		'=' => Cond(Cmp::Eq),
		'p' | 'n' | 'f' | 'P' | 'c' | 'd' | 'r' | 'z'
		| 'k' | 'i' | 'o' | 'K' | 'I' | 'O'
		| 'x' | 'q' | 'Q' | '!' | '#' => Exec,
		'?' | 'a' | 'Z' | 'X' | ':' | ';' => Stub,
		_ => Space,
	}
}

///register names are exactly the lowercase letters
const fn reg_index(c: char) -> Option<usize> {
	match c {
		'a'..='z' => Some(c as usize - 'a' as usize),
		_ => None
	}
}

/// One calculator session: the main stack, the lettered registers, the numeric IO
/// parameters, and whatever multi-character operation is waiting for more input.
///
/// Storage fields are public for presets and inspection; the way in is
/// [`interpret`](Self::interpret).
pub struct Interpreter<'w> {
	/// Main stack
	pub mstk: Stack,

	/// Registers a-z, each its own stack
	pub regs: [Stack; 26],

	/// Fractional digits kept by printing and square roots
	pub precision: usize,

	/// Base for number literals, 2-16
	pub ibase: u8,

	/// Base for printed numbers, 2-16
	pub obase: u8,

	/// Report every dispatched command on stderr
	pub debug: bool,

	///operation waiting for more characters
	pending: Option<Pending>,

	///macro frames still to unwind after a quit request
	quit_level: usize,

	///sink for the printing commands
	out: &'w mut dyn Write,
}

impl<'w> Interpreter<'w> {
	/// Fresh session bound to an output sink: empty stacks, precision 0, both bases 10.
	pub fn new(out: &'w mut dyn Write) -> Self {
		Self {
			mstk: Stack::default(),
			regs: std::array::from_fn(|_| Stack::default()),
			precision: 0,
			ibase: 10,
			obase: 10,
			debug: false,
			pending: None,
			quit_level: 0,
			out,
		}
	}

	/// Feeds one character.
	///
	/// Unknown characters are ignored. A recoverable error means the offending command
	/// restored its operands; report it and keep feeding. [`Step::Exit`] means a quit
	/// command reached the top level and feeding should stop.
	pub fn interpret(&mut self, c: char) -> Result<Step, ExecError> {
		match self.step(c)? {
			Flow::Exit => Ok(Step::Exit),
			_ => Ok(Step::Continue),
		}
	}

	///routes one character, re-dispatching it once if a finished sub-parser asks for that
	fn step(&mut self, c: char) -> Result<Flow, ExecError> {
		loop {
			let flow = match self.pending.take() {
				Some(p) => self.resume(p, c)?,
				None => self.dispatch(c)?,
			};
			if let Flow::Reprocess = flow {
				//only a finished literal asks to reprocess, and it never leaves
				//another operation pending, so this loops at most once
				debug_assert!(self.pending.is_none());
				continue;
			}
			return Ok(flow);
		}
	}

	///continues the suspended operation; `self.pending` has already been cleared
	fn resume(&mut self, p: Pending, c: char) -> Result<Flow, ExecError> {
		match p {
			Pending::Number(mut nb) => {
				if nb.accept(c) {
					self.pending = Some(Pending::Number(nb));
					Ok(Flow::Done)
				}
				else {
					self.mstk.push(nb.finish(self.ibase));
					Ok(Flow::Reprocess)
				}
			},
			Pending::Text(mut sb) => {
				if let Some(s) = sb.accept(c) {
					self.mstk.push(Value::S(s));
				}
				else {
					self.pending = Some(Pending::Text(sb));
				}
				Ok(Flow::Done)
			},
			Pending::Comment => {
				if c != '\n' {
					self.pending = Some(Pending::Comment);
				}
				Ok(Flow::Done)
			},
			Pending::Negate => {
				match c {
					'<' => { self.pending = Some(Pending::Compare { cmp: Cmp::Lt, negated: true }); Ok(Flow::Done) },
					'>' => { self.pending = Some(Pending::Compare { cmp: Cmp::Gt, negated: true }); Ok(Flow::Done) },
					'=' => { self.pending = Some(Pending::Compare { cmp: Cmp::Eq, negated: true }); Ok(Flow::Done) },
					_ => Err(ExecError::NotImplemented)	//no shell escape
				}
			},
			Pending::Register(act) => self.register(act, c),
			Pending::Compare { cmp, negated } => self.conditional(cmp, negated, c),
		}
	}

	///looks the character up in the dispatch table and runs or suspends the command
	fn dispatch(&mut self, c: char) -> Result<Flow, ExecError> {
		use Command::*;
		let cmd = char_cmd(c);
		if self.debug && !matches!(cmd, Space) {
			eprintln!("\tDEBUG: {c:?}");
		}
		match cmd {
			Fn1(mon) => {
				if let Some(va) = self.mstk.pop() {
					match mon(&va, self.precision) {
						Ok(vz) => {
							for v in vz {
								self.mstk.push(v);
							}
							Ok(Flow::Done)
						},
						Err(e) => {
							self.mstk.push(va);
							Err(e)
						}
					}
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			Fn2(dya) => {
				if let Some(vb) = self.mstk.pop() {
					if let Some(va) = self.mstk.pop() {
						match dya(&va, &vb) {
							Ok(vz) => {
								for v in vz {
									self.mstk.push(v);
								}
								Ok(Flow::Done)
							},
							Err(e) => {
								self.mstk.push(va);
								self.mstk.push(vb);
								Err(e)
							}
						}
					}
					else {
						self.mstk.push(vb);
						Err(ExecError::StackTooShort)
					}
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			Fn3(tri) => {
				if let Some(vc) = self.mstk.pop() {
					if let Some(vb) = self.mstk.pop() {
						if let Some(va) = self.mstk.pop() {
							match tri(&va, &vb, &vc) {
								Ok(vz) => {
									for v in vz {
										self.mstk.push(v);
									}
									Ok(Flow::Done)
								},
								Err(e) => {
									self.mstk.push(va);
									self.mstk.push(vb);
									self.mstk.push(vc);
									Err(e)
								}
							}
						}
						else {
							self.mstk.push(vb);
							self.mstk.push(vc);
							Err(ExecError::StackTooShort)
						}
					}
					else {
						self.mstk.push(vc);
						Err(ExecError::StackTooShort)
					}
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			Reg(act) => {
				self.pending = Some(Pending::Register(act));
				Ok(Flow::Done)
			},
			Cond(cmp) => {
				self.pending = Some(Pending::Compare { cmp, negated: false });
				Ok(Flow::Done)
			},
			Lit => {
				self.pending = Some(match c {
					'[' => Pending::Text(StrBuilder::start()),
					_ => Pending::Number(NumBuilder::start(c)),
				});
				Ok(Flow::Done)
			},
			Exec => self.exec(c),
			Stub => Err(ExecError::NotImplemented),
			Space => Ok(Flow::Done),
		}
	}

	///impure commands without a post-positional argument
	fn exec(&mut self, c: char) -> Result<Flow, ExecError> {
		match c {
			'p' => {	//print top, keep it
				if let Some(v) = self.mstk.peek() {
					let vs = v.display(self.precision, self.obase);
					writeln!(self.out, "{vs}")?;
					self.out.flush()?;
					Ok(Flow::Done)
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			'n' => {	//pop and print, no newline
				if let Some(v) = self.mstk.pop() {
					let vs = v.display(self.precision, self.obase);
					write!(self.out, "{vs}")?;
					self.out.flush()?;
					Ok(Flow::Done)
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			'f' => {	//print the whole stack, top first
				for v in self.mstk.iter().rev() {
					let vs = v.display(self.precision, self.obase);
					writeln!(self.out, "{vs}")?;
				}
				self.out.flush()?;
				Ok(Flow::Done)
			},
			'P' => {	//raw print: string contents, or the integer part as big-endian bytes
				if let Some(v) = self.mstk.pop() {
					match &v {
						Value::S(s) => { write!(self.out, "{s}")?; },
						Value::N(r) => { self.out.write_all(&num::raw_bytes(r))?; },
					}
					self.out.flush()?;
					Ok(Flow::Done)
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			'c' => {
				self.mstk.clear();
				Ok(Flow::Done)
			},
			'd' => {	//duplicate the top, deep copy
				if let Some(v) = self.mstk.peek() {
					let dup = v.clone();
					self.mstk.push(dup);
					Ok(Flow::Done)
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			'r' => {	//swap the top two
				if let Some(vb) = self.mstk.pop() {
					if let Some(va) = self.mstk.pop() {
						self.mstk.push(vb);
						self.mstk.push(va);
						Ok(Flow::Done)
					}
					else {
						self.mstk.push(vb);
						Err(ExecError::StackTooShort)
					}
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			'z' => {
				self.mstk.push(Value::N(Rational::from(self.mstk.len())));
				Ok(Flow::Done)
			},
			'k' | 'i' | 'o' => {	//set a parameter from the popped value
				if let Some(va) = self.mstk.pop() {
					let val = if let Value::N(r) = &va {
						conv::r_usize(r)
					}
					else {
						None
					};
					let ok = match (c, val) {
						('k', Some(u)) => {
							self.precision = u;
							true
						},
						('i', Some(u @ 2..=16)) => {
							self.ibase = u as u8;
							true
						},
						('o', Some(u @ 2..=16)) => {
							self.obase = u as u8;
							true
						},
						_ => false	//non-numeric, negative, or out of base range
					};
					if ok {
						Ok(Flow::Done)
					}
					else {
						self.mstk.push(va);
						Err(ExecError::ValueNotNumeric)
					}
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			'K' => {
				self.mstk.push(Value::N(Rational::from(self.precision)));
				Ok(Flow::Done)
			},
			'I' => {
				self.mstk.push(Value::N(Rational::from(self.ibase as u32)));
				Ok(Flow::Done)
			},
			'O' => {
				self.mstk.push(Value::N(Rational::from(self.obase as u32)));
				Ok(Flow::Done)
			},
			'x' => {	//execute the popped string as a macro
				if let Some(va) = self.mstk.pop() {
					match va {
						Value::S(mac) => self.run_macro(&mac),
						va => {	//numbers are left alone
							self.mstk.push(va);
							Ok(Flow::Done)
						}
					}
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			'q' => {	//quit one macro frame, or the session at top level
				self.quit_level = 1;
				Ok(Flow::Exit)
			},
			'Q' => {	//quit n macro frames
				if let Some(va) = self.mstk.pop() {
					if let Value::N(r) = &va {
						self.quit_level = if *r < Rational::ZERO {
							0
						}
						else {
							conv::r_usize(r).unwrap_or(usize::MAX)
						};
						Ok(Flow::Exit)
					}
					else {
						self.mstk.push(va);
						Err(ExecError::ValueNotNumeric)
					}
				}
				else {
					Err(ExecError::StackTooShort)
				}
			},
			'!' => {
				self.pending = Some(Pending::Negate);
				Ok(Flow::Done)
			},
			'#' => {	//line comment
				self.pending = Some(Pending::Comment);
				Ok(Flow::Done)
			},
			_ => unreachable!()
		}
	}

	///register commands, `c` is the register name
	fn register(&mut self, act: RegAct, c: char) -> Result<Flow, ExecError> {
		let Some(ri) = reg_index(c) else {
			return Err(ExecError::NotARegisterName);
		};
		match act {
			RegAct::Save => {
				if let Some(va) = self.mstk.pop() {
					let reg = &mut self.regs[ri];
					reg.clear();
					reg.push(va);
				}
				else {
					return Err(ExecError::StackTooShort);
				}
			},
			RegAct::Load => {
				if let Some(rv) = self.regs[ri].peek() {
					let copy = rv.clone();
					self.mstk.push(copy);
				}
				else {
					return Err(ExecError::StackTooShort);
				}
			},
			RegAct::Push => {
				if let Some(va) = self.mstk.pop() {
					self.regs[ri].push(va);
				}
				else {
					return Err(ExecError::StackTooShort);
				}
			},
			RegAct::Pop => {
				if let Some(rv) = self.regs[ri].pop() {
					self.mstk.push(rv);
				}
				else {
					return Err(ExecError::StackTooShort);
				}
			},
		}
		Ok(Flow::Done)
	}

	/// Conditional macro, `c` is the register name. The two numbers are consumed either
	/// way; the macro string is popped from the register only when the predicate fires.
	fn conditional(&mut self, cmp: Cmp, negated: bool, c: char) -> Result<Flow, ExecError> {
		let Some(ri) = reg_index(c) else {
			return Err(ExecError::NotARegisterName);
		};
		if self.mstk.len() < 2 {
			return Err(ExecError::StackTooShort);
		}
		if self.regs[ri].is_empty() {
			return Err(ExecError::StackTooShort);
		}
		if !matches!(self.regs[ri].peek(), Some(Value::S(_))) {
			return Err(ExecError::ValueNotString);
		}

		let Some(left) = self.mstk.pop() else { unreachable!() };	//depth checked above
		let Some(right) = self.mstk.pop() else { unreachable!() };
		let fire = match (&left, &right) {
			(Value::N(la), Value::N(lb)) => {
				(match cmp {
					Cmp::Lt => la < lb,
					Cmp::Gt => la > lb,
					Cmp::Eq => la == lb,
				}) != negated
			},
			_ => {
				self.mstk.push(right);
				self.mstk.push(left);
				return Err(ExecError::ValueNotNumeric);
			}
		};

		if !fire {
			return Ok(Flow::Done);
		}
		match self.regs[ri].pop() {
			Some(Value::S(mac)) => self.run_macro(&mac),
			_ => unreachable!()	//top was checked to be a string
		}
	}

	/// Executes a captured string as if its characters were typed at the top level,
	/// then feeds one space so a trailing number literal still gets flushed.
	///
	/// When a quit surfaces from below, this frame keeps executing its remaining
	/// characters if `quit_level` has already reached zero; otherwise it counts
	/// itself off and passes the quit up.
	fn run_macro(&mut self, mac: &str) -> Result<Flow, ExecError> {
		for c in mac.chars() {
			if let Flow::Exit = self.step(c)? {
				if self.quit_level == 0 {
					continue;
				}
				self.quit_level -= 1;
				return Ok(Flow::Exit);
			}
		}
		self.step(' ')?;
		Ok(Flow::Done)
	}
}
