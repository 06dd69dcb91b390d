//! Conversions between rationals, machine integers, and digit characters

use malachite::{Integer, Natural, Rational};
use malachite::base::num::arithmetic::traits::Abs;
use malachite::base::num::conversion::traits::{RoundingFrom, WrappingFrom};
use malachite::base::rounding_modes::RoundingMode;

///integer part, truncated towards zero
#[inline(always)] pub(crate) fn r_trunc(r: &Rational) -> Integer {
	Integer::rounding_from(r, RoundingMode::Down).0
}

///integer part of the absolute value
#[inline(always)] pub(crate) fn r_trunc_abs(r: &Rational) -> Natural {
	Natural::rounding_from(r.abs(), RoundingMode::Down).0
}

///integer part as usize, `None` if negative or too large
#[inline(always)] pub(crate) fn r_usize(r: &Rational) -> Option<usize> {
	usize::try_from(&r_trunc(r)).ok()
}

///literal digit to value: 0-9 and the extended digits A-H
pub(crate) const fn digit_val(b: u8) -> Option<u8> {
	match b {
		b'0'..=b'9' => Some(b - 0x30),
		b'A'..=b'H' => Some(b - 0x37),
		_ => None
	}
}

///digit value to character byte: 0-9A-F
#[inline(always)] pub(crate) fn chr(d: &Natural) -> u8 {
	let u = u8::wrapping_from(d);
	if u < 10 { u + 0x30 } else { u + 0x37 }
}

///fold digit values into a natural under the given base
pub(crate) fn fold_digits(digits: impl Iterator<Item = u8>, base: u8) -> Natural {
	let base = Natural::from(base);
	let mut acc = Natural::from(0u8);
	for d in digits {
		acc = acc * &base + Natural::from(d);
	}
	acc
}
