//! Excitation signals injected at the listener cell, one sample per step.

use crate::types::Real;

/// `len` samples with a single unit value at t = 0.
pub fn unit_impulse(len: usize) -> Vec<Real> {
    let mut signal = vec![0.0; len];
    if let Some(first) = signal.first_mut() {
        *first = 1.0;
    }
    signal
}

/// Unit-peak Gaussian pulse band-limited to roughly `max_frequency` Hz.
///
/// The pulse is delayed by four standard deviations so it starts from
/// (numerically) zero instead of switching on at full amplitude.
pub fn gaussian_pulse(len: usize, time_step: Real, max_frequency: Real) -> Vec<Real> {
    let pi = std::f64::consts::PI as Real;
    let sigma = 1.0 / (0.5 * pi * max_frequency);
    let delay = 4.0 * sigma;
    (0..len)
        .map(|n| {
            let t = n as Real * time_step - delay;
            (-(t * t) / (sigma * sigma)).exp()
        })
        .collect()
}
