//! Numeric algorithms: radix-aware output and the operations that aren't plain rational arithmetic

use std::cmp::Ordering::*;
use malachite::{Integer, Natural, Rational};
use malachite::base::num::arithmetic::traits::{Abs, FloorSqrt, ModPow, Pow, Sign};
use malachite::base::num::basic::traits::Zero;
use malachite::base::num::conversion::traits::{Digits, PowerOf2DigitIterable};
use crate::conv::*;
use crate::errors::ExecError;

/// Renders `r` in base `o` with exactly `k` fractional digits.
///
/// The integer part always gets at least one digit. Fractional digits are produced by
/// repeated multiply-and-truncate, so the result is never rounded up and short fractions
/// come out zero-padded to the full `k`-digit field. Digits above 9 are uppercase.
pub fn render(r: &Rational, k: usize, o: u8) -> String {
	let neg = r.sign() == Less;
	let int = r_trunc_abs(r);
	let mut frac = r.abs() - Rational::from(&int);

	let mut res = Vec::new();
	if neg {
		res.push(b'-');
	}

	if int == Natural::ZERO {
		res.push(b'0');	//leading zero
	}
	else {
		for id in int.to_digits_desc(&Natural::from(o)) {
			res.push(chr(&id));	//integer digits
		}
	}

	if k > 0 {
		res.push(b'.');
		let ob = Rational::from(o as u32);
		for _ in 0..k {
			frac *= &ob;
			let fd = r_trunc_abs(&frac);
			res.push(chr(&fd));	//fractional digits, truncated
			frac -= Rational::from(&fd);
		}
	}

	unsafe { String::from_utf8_unchecked(res) }	//only ASCII
}

///truncated integer division: (quotient, remainder), remainder keeps the dividend's sign
pub fn quot_rem(a: &Rational, b: &Rational) -> Result<(Rational, Rational), ExecError> {
	if *b == Rational::ZERO {
		return Err(ExecError::DivideByZero);
	}
	let quot = Rational::from(r_trunc(&(a / b)));
	let rem = a - &quot * b;
	Ok((quot, rem))
}

///raises `base` to the integer part of `exp`, which must be positive
pub fn pow_int(base: &Rational, exp: &Rational) -> Result<Rational, ExecError> {
	let ei = r_trunc(exp);
	if ei <= Integer::ZERO {
		return Err(ExecError::WholeExponentsOnly);
	}
	let ue = u64::try_from(&ei).map_err(|_| ExecError::WholeExponentsOnly)?;
	Ok(base.pow(ue))
}

///modular exponentiation over the integer parts: `n^e mod m`
pub fn mod_exp(n: &Rational, e: &Rational, m: &Rational) -> Result<Rational, ExecError> {
	if r_trunc(e) <= Integer::ZERO {
		return Err(ExecError::WholeExponentsOnly);
	}
	let en = r_trunc_abs(e);
	let mn = r_trunc_abs(m);
	if mn == Natural::ZERO {
		return Err(ExecError::DivideByZero);
	}
	let nn = r_trunc_abs(n);
	Ok(Rational::from((nn % &mn).mod_pow(en, mn)))
}

/// Square root of a non-negative number, keeping `k` fractional decimal digits.
///
/// Computed as `isqrt(r * 10^2k) / 10^k`, truncated like the display schedule.
pub fn sqrt_prec(r: &Rational, k: usize) -> Result<Rational, ExecError> {
	if r.sign() == Less {
		return Err(ExecError::NoImaginaryNumbers);
	}
	let scale = Natural::from(10u8).pow(k as u64);
	let scaled = r_trunc_abs(&(r * Rational::from(&scale) * Rational::from(&scale)));
	Ok(Rational::from_naturals(scaled.floor_sqrt(), scale))
}

///integer part of the absolute value as big-endian bytes, empty for zero
pub fn raw_bytes(r: &Rational) -> Vec<u8> {
	let n = r_trunc_abs(r);
	let mut bytes: Vec<u8> = PowerOf2DigitIterable::<u8>::power_of_2_digits(&n, 8).collect();
	bytes.reverse();	//iterator yields the least significant byte first
	bytes
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rat(n: i32, d: u32) -> Rational {
		Rational::from(n) / Rational::from(d)
	}

	#[test]
	fn integers_render_plainly() {
		assert_eq!(render(&Rational::from(5050), 0, 10), "5050");
		assert_eq!(render(&Rational::from(0), 0, 10), "0");
		assert_eq!(render(&Rational::from(-42), 0, 10), "-42");
	}

	#[test]
	fn fractional_digits_truncate_and_pad() {
		assert_eq!(render(&rat(1, 3), 4, 10), "0.3333");
		assert_eq!(render(&rat(2, 3), 4, 10), "0.6666");	//truncated, not rounded
		assert_eq!(render(&rat(1, 100), 3, 10), "0.010");	//leading zero padding
		assert_eq!(render(&Rational::from(2), 4, 10), "2.0000");
	}

	#[test]
	fn high_bases_use_uppercase_digits() {
		assert_eq!(render(&Rational::from(255), 0, 16), "FF");
		assert_eq!(render(&Rational::from(5), 0, 2), "101");
		assert_eq!(render(&rat(1, 2), 4, 16), "0.8000");
	}

	#[test]
	fn quot_rem_truncates_towards_zero() {
		let (q, r) = quot_rem(&Rational::from(365), &Rational::from(7)).unwrap();
		assert_eq!(q, Rational::from(52));
		assert_eq!(r, Rational::from(1));

		let (q, r) = quot_rem(&Rational::from(-7), &Rational::from(2)).unwrap();
		assert_eq!(q, Rational::from(-3));
		assert_eq!(r, Rational::from(-1));

		assert!(matches!(
			quot_rem(&Rational::from(1), &Rational::ZERO),
			Err(ExecError::DivideByZero)
		));
	}

	#[test]
	fn exponents_must_be_positive_integers() {
		assert_eq!(pow_int(&Rational::from(3), &Rational::from(3)).unwrap(), Rational::from(27));
		assert_eq!(pow_int(&Rational::from(-2), &Rational::from(3)).unwrap(), Rational::from(-8));
		//fractional exponents lose their fraction first
		assert_eq!(pow_int(&Rational::from(2), &rat(5, 2)).unwrap(), Rational::from(4));
		assert!(matches!(pow_int(&Rational::from(2), &Rational::from(0)), Err(ExecError::WholeExponentsOnly)));
		assert!(matches!(pow_int(&Rational::from(2), &Rational::from(-1)), Err(ExecError::WholeExponentsOnly)));
	}

	#[test]
	fn modular_exponents() {
		assert_eq!(
			mod_exp(&Rational::from(2), &Rational::from(8), &Rational::from(7)).unwrap(),
			Rational::from(4)
		);
		assert!(matches!(
			mod_exp(&Rational::from(2), &Rational::from(8), &Rational::ZERO),
			Err(ExecError::DivideByZero)
		));
		assert!(matches!(
			mod_exp(&Rational::from(2), &Rational::ZERO, &Rational::from(7)),
			Err(ExecError::WholeExponentsOnly)
		));
	}

	#[test]
	fn sqrt_honors_precision() {
		assert_eq!(sqrt_prec(&Rational::from(2), 4).unwrap(), rat(14142, 10000));
		assert_eq!(sqrt_prec(&Rational::from(256), 0).unwrap(), Rational::from(16));
		assert!(matches!(sqrt_prec(&Rational::from(-1), 0), Err(ExecError::NoImaginaryNumbers)));
	}

	#[test]
	fn raw_bytes_are_big_endian() {
		assert_eq!(raw_bytes(&Rational::from(310400273487i64)), b"HELLO");
		assert_eq!(raw_bytes(&Rational::ZERO), b"");
	}
}
