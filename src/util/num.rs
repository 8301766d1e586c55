use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts an integer operand to a real for mixed arithmetic.
///
/// Integers beyond `2^53` round to the nearest representable real, as they
/// would in any host language with IEEE doubles.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Safely converts a `usize` length to an `i64`.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the length does not fit.
///
/// ## Example
/// ```
/// use oxlang::util::num::usize_to_i64_checked;
///
/// assert_eq!(usize_to_i64_checked(3).unwrap(), 3);
/// ```
pub fn usize_to_i64_checked(value: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow)
}

/// Resolves a possibly negative index against a sequence length.
///
/// Negative indices count from the end, so `-1` is the last element.
///
/// ## Errors
/// Returns `RuntimeError::IndexOutOfBounds` if the index falls outside the
/// sequence on either side.
///
/// ## Example
/// ```
/// use oxlang::{error::RuntimeError, util::num::resolve_index};
///
/// assert_eq!(resolve_index(-1, 3).unwrap(), 2);
/// assert_eq!(resolve_index(3, 3).unwrap_err(),
///            RuntimeError::IndexOutOfBounds { index: 3, len: 3 });
/// ```
pub fn resolve_index(index: i64, len: usize) -> EvalResult<usize> {
    let out_of_bounds = || RuntimeError::IndexOutOfBounds { index, len };
    let len_signed = usize_to_i64_checked(len)?;
    let position = if index < 0 { index + len_signed } else { index };

    if !(0..len_signed).contains(&position) {
        return Err(out_of_bounds());
    }
    usize::try_from(position).map_err(|_| out_of_bounds())
}

/// Raises an integer to a non-negative integer power.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the result does not fit in an `i64`.
///
/// ## Example
/// ```
/// use oxlang::{error::RuntimeError, util::num::checked_int_pow};
///
/// assert_eq!(checked_int_pow(2, 10).unwrap(), 1024);
/// assert_eq!(checked_int_pow(-1, i64::MAX).unwrap(), -1);
/// assert_eq!(checked_int_pow(10, 19).unwrap_err(), RuntimeError::Overflow);
/// ```
pub fn checked_int_pow(base: i64, exponent: i64) -> EvalResult<i64> {
    if let Ok(exponent) = u32::try_from(exponent) {
        return base.checked_pow(exponent).ok_or(RuntimeError::Overflow);
    }
    match base {
        0 | 1 => Ok(base),
        -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => Err(RuntimeError::Overflow),
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_index;
    use crate::error::RuntimeError;

    #[test]
    fn negative_indices_count_from_the_end() {
        assert_eq!(resolve_index(-3, 3), Ok(0));
        assert_eq!(resolve_index(-4, 3),
                   Err(RuntimeError::IndexOutOfBounds { index: -4, len: 3 }));
        assert!(resolve_index(0, 0).is_err());
    }
}
