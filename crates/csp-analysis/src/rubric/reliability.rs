//! Agreement statistics between two raters labelling the same items.

use std::hash::Hash;

use csp_core::errors::ReliabilityError;
use csp_core::types::collections::FxHashMap;

/// Fraction of positions where both raters gave the same label.
///
/// Either sequence empty yields 0.0 before lengths are compared.
pub fn percent_agreement<T: Eq>(left: &[T], right: &[T]) -> Result<f64, ReliabilityError> {
    if left.is_empty() || right.is_empty() {
        return Ok(0.0);
    }
    check_lengths(left, right)?;

    let agree = left.iter().zip(right).filter(|(a, b)| a == b).count();
    Ok(agree as f64 / left.len() as f64)
}

/// Cohen's kappa: `(Po - Pe) / (1 - Pe)`.
///
/// `Pe` comes from each rater's marginal label frequencies. When both raters
/// use a single identical category `Pe` is 1 and kappa is defined as 1.0.
pub fn cohens_kappa<T: Eq + Hash>(left: &[T], right: &[T]) -> Result<f64, ReliabilityError> {
    if left.is_empty() || right.is_empty() {
        return Ok(0.0);
    }
    check_lengths(left, right)?;

    let n = left.len() as f64;
    let po = percent_agreement(left, right)?;

    let mut freq: FxHashMap<&T, (usize, usize)> = FxHashMap::default();
    for l in left {
        freq.entry(l).or_default().0 += 1;
    }
    for r in right {
        freq.entry(r).or_default().1 += 1;
    }

    let pe: f64 = freq
        .values()
        .map(|&(a, b)| (a as f64 / n) * (b as f64 / n))
        .sum();

    if pe == 1.0 {
        return Ok(1.0);
    }
    Ok((po - pe) / (1.0 - pe))
}

fn check_lengths<T>(left: &[T], right: &[T]) -> Result<(), ReliabilityError> {
    if left.len() != right.len() {
        return Err(ReliabilityError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}
