//! Axis autoscaling, tick location and number formatting.

/// Fraction of the data span added on each side when autoscaling.
pub const AUTOSCALE_MARGIN: f32 = 0.05;

/// Mantissas a tick step may take, per decade.
const NICE_STEPS: [f32; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// View limits covering `[min, max]` with a 5% margin on either side.
///
/// A zero-width span is widened to one unit so a scale can still be built.
#[must_use]
pub fn autoscale(min: f32, max: f32) -> (f32, f32) {
    let span = max - min;
    if span.abs() <= f32::EPSILON * max.abs().max(1.0) {
        return (min - 0.5, max + 0.5);
    }
    (min - span * AUTOSCALE_MARGIN, max + span * AUTOSCALE_MARGIN)
}

/// Smallest "nice" step producing at most `target` intervals over `span`.
#[must_use]
pub fn nice_step(span: f32, target: usize) -> f32 {
    let span = span.abs();
    if span <= f32::EPSILON {
        return 1.0;
    }

    let raw = span / target.max(1) as f32;
    let magnitude = 10f32.powf(raw.log10().floor());

    NICE_STEPS
        .iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw * (1.0 - 1e-6))
        .unwrap_or(10.0 * magnitude)
}

/// Tick positions inside `[lo, hi]`, on multiples of a nice step.
#[must_use]
pub fn nice_ticks(lo: f32, hi: f32, target: usize) -> Vec<f32> {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let step = nice_step(hi - lo, target);
    let tolerance = step * 1e-4;

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;

    let mut ticks: Vec<f32> = (first..=last).map(|i| i as f32 * step).collect();
    // Snap values like 0.30000001 so formatting stays clean
    for t in &mut ticks {
        if t.abs() < tolerance {
            *t = 0.0;
        }
    }
    ticks.retain(|&t| t >= lo - tolerance && t <= hi + tolerance);
    ticks
}

/// Format a tick value with just enough decimals for `step`.
#[must_use]
pub fn format_tick(value: f32, step: f32) -> String {
    let mut decimals = 0usize;
    let mut scaled = step.abs();
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-3 * scaled.max(1e-12) {
        scaled *= 10.0;
        decimals += 1;
    }
    let text = format!("{value:.decimals$}");
    // Avoid "-0.0"
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

/// Format a value like C's `%g`: six significant digits, trailing zeros
/// removed, exponent notation for very large or very small magnitudes.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_general(value: f32) -> String {
    const PRECISION: i32 = 6;

    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }

    let value = f64::from(value);
    let exponent = value.abs().log10().floor() as i32;

    if (-4..PRECISION).contains(&exponent) {
        let decimals = (PRECISION - 1 - exponent).max(0) as usize;
        strip_zeros(&format!("{value:.decimals$}"))
    } else {
        let formatted = format!("{:.*e}", (PRECISION - 1) as usize, value);
        let (mantissa, exp) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", strip_zeros(mantissa), exp.abs())
    }
}

fn strip_zeros(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}
