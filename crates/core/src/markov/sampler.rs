//! Weighted discrete sampling and history-advancing transitions.

use crate::core_types::Severity;
use crate::error::WeatherError;
use crate::markov::History;
use rand::Rng;
use rand_distr::StandardNormal;

/// Pick an index from unnormalized weights using one uniform draw.
///
/// Inverse-CDF sampling: the draw is scaled by the total weight and the first
/// candidate whose cumulative weight exceeds it wins. Weights need not sum to
/// one. A zero-weight candidate is never chosen, whatever the draw.
///
/// # Arguments
/// * `weights` - Non-negative, finite weight per candidate
/// * `draw` - Uniform sample in `[0, 1)`; values outside are clamped
///
/// # Errors
///
/// Returns [`WeatherError::DegenerateDistribution`] when the weights are all
/// zero, or any weight is negative or non-finite.
///
/// # Example
/// ```
/// use weather_gen_core::markov::sample_index;
///
/// assert_eq!(sample_index(&[0.0, 0.0, 0.0, 1.0], 0.0).unwrap(), 3);
/// assert_eq!(sample_index(&[1.0, 1.0], 0.75).unwrap(), 1);
/// assert!(sample_index(&[0.0, 0.0], 0.5).is_err());
/// ```
pub fn sample_index(weights: &[f32], draw: f32) -> Result<usize, WeatherError> {
    let degenerate = WeatherError::DegenerateDistribution {
        candidates: weights.len(),
    };

    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(degenerate);
    }

    let total: f32 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(degenerate);
    }

    let target = draw.clamp(0.0, 1.0) * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;

    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        if cumulative > target {
            return Ok(index);
        }
        last_positive = Some(index);
    }

    // Rounding can leave the cumulative sum a hair below a draw close to 1.
    last_positive.ok_or(degenerate)
}

/// Advance a chain by one step.
///
/// Evaluates `weight(history, candidate)` for every severity, samples the
/// next state with [`sample_index`] and returns it together with the
/// advanced history. The input history is not modified.
///
/// # Errors
///
/// Returns [`WeatherError::DegenerateDistribution`] when `weight` leaves no
/// candidate with positive weight.
pub fn transition<const N: usize, F>(
    history: History<N>,
    draw: f32,
    weight: F,
) -> Result<(Severity, History<N>), WeatherError>
where
    F: Fn(&History<N>, Severity) -> f32,
{
    let weights = Severity::ALL.map(|candidate| weight(&history, candidate));
    let index = sample_index(&weights, draw)?;
    let next = Severity::ALL[index];

    Ok((next, history.advance(next)))
}

/// Normal sample with the given mean and standard deviation.
pub(crate) fn gaussian<R: Rng>(rng: &mut R, mean: f32, std_dev: f32) -> f32 {
    let z: f32 = rng.sample(StandardNormal);
    mean + std_dev * z
}
