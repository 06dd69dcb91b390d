//! Pure operation functions over values
//!
//! Functions have 1, 2, or 3 [`&Value`](Value) parameters (monadic, dyadic, triadic) and
//! return the values to push, bottom first. Type checking happens here; operand popping
//! and restore-on-error stay with the dispatcher.

use malachite::Rational;
use malachite::base::num::basic::traits::Zero;
use crate::errors::ExecError::{self, *};
use crate::structs::Value::{self, *};
use crate::num;

/// Monadic function definition, also receives the current display precision
pub(crate) type Mon = fn(&Value, usize) -> Result<Vec<Value>, ExecError>;
/// Monadic template with standard type matching
macro_rules! mon {
	($name:ident, $k:ident $($pa:pat => $op:expr),*) => {
		pub(crate) fn $name(a: &Value, $k: usize) -> Result<Vec<Value>, ExecError> {
			match a {
				$($pa => $op,)*
				_ => Err(ValueNotNumeric)
			}
		}
	}
}

/// Dyadic function definition, the left argument sits below the right on the stack
pub(crate) type Dya = fn(&Value, &Value) -> Result<Vec<Value>, ExecError>;
/// Dyadic template with standard type matching
macro_rules! dya {
	($name:ident $($pa:pat, $pb:pat => $op:expr),*) => {
		pub(crate) fn $name(a: &Value, b: &Value) -> Result<Vec<Value>, ExecError> {
			match (a, b) {
				$(($pa, $pb) => $op,)*
				_ => Err(ValueNotNumeric)
			}
		}
	}
}

/// Triadic function definition
pub(crate) type Tri = fn(&Value, &Value, &Value) -> Result<Vec<Value>, ExecError>;
/// Triadic template with standard type matching
macro_rules! tri {
	($name:ident $($pa:pat, $pb:pat, $pc:pat => $op:expr),*) => {
		pub(crate) fn $name(a: &Value, b: &Value, c: &Value) -> Result<Vec<Value>, ExecError> {
			match (a, b, c) {
				$(($pa, $pb, $pc) => $op,)*
				_ => Err(ValueNotNumeric)
			}
		}
	}
}

dya!(add
	N(ra), N(rb) => Ok(vec![N(ra + rb)])
);

dya!(sub
	N(ra), N(rb) => Ok(vec![N(ra - rb)])
);

dya!(mul
	N(ra), N(rb) => Ok(vec![N(ra * rb)])
);

dya!(div
	N(ra), N(rb) => {
		if *rb == Rational::ZERO {
			Err(DivideByZero)
		}
		else {
			Ok(vec![N(ra / rb)])
		}
	}
);

dya!(rem
	N(ra), N(rb) => {
		let (_, rem) = num::quot_rem(ra, rb)?;
		Ok(vec![N(rem)])
	}
);

dya!(quotrem
	N(ra), N(rb) => {
		let (quot, rem) = num::quot_rem(ra, rb)?;
		Ok(vec![N(rem), N(quot)])	//quotient ends up on top
	}
);

dya!(pow
	N(ra), N(rb) => Ok(vec![N(num::pow_int(ra, rb)?)])
);

tri!(modexp
	N(ra), N(rb), N(rc) => Ok(vec![N(num::mod_exp(ra, rb, rc)?)])
);

mon!(sqrt, k
	N(ra) => Ok(vec![N(num::sqrt_prec(ra, k)?)])
);
