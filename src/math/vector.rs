use crate::error::{NetworkError, Result};

/// Allocates a zero-filled buffer, reporting allocator failure instead of aborting.
pub fn zeroed(len: usize) -> Result<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| NetworkError::Allocation { requested: len, source })?;
    buf.resize(len, 0.0);
    Ok(buf)
}

/// Copies `values` into a freshly reserved buffer.
pub fn copied(values: &[f64]) -> Result<Vec<f64>> {
    let mut buf = zeroed(values.len())?;
    buf.copy_from_slice(values);
    Ok(buf)
}

pub fn check_width(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(NetworkError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Weighted sum of `input` plus the bias stored in the last slot of `weights`.
///
/// Callers guarantee `weights.len() == input.len() + 1`.
pub fn net_input(weights: &[f64], input: &[f64]) -> f64 {
    let (coefficients, bias) = weights.split_at(input.len());
    let mut net = 0.0;
    for (w, x) in coefficients.iter().zip(input) {
        net += w * x;
    }
    net + bias[0]
}
