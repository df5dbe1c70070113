use num_traits::Float;

/// Convert an `f64` literal into the working float type
///
/// # Panics
///
/// Panics if `value` cannot be represented in `E`. Every constant used in this crate fits in an
/// `f32`, so this cannot happen for the primitive float types.
pub(crate) fn constant<E: Float>(value: f64) -> E {
    E::from(value).expect("constant doesn't fit in the working float type")
}

/// Re-map `x` from the range `from_low..from_high` onto `to_low..to_high`
///
/// A value of `from_low` maps to `to_low`, `from_high` maps to `to_high` and values in between
/// are linearly interpolated. Values outside the source range are extrapolated, not clamped.
///
/// The source range must not be degenerate. When `from_high == from_low` the division produces
/// an infinity or NaN, which is returned unchanged.
///
/// # Examples
///
/// ```
/// use mq135::math::rescale;
///
/// // A 16 bit converter spanning 0..26690 mapped onto a 10 bit scale
/// let raw: f64 = rescale(26690., 0., 26690., 0., 1023.);
/// approx::assert_relative_eq!(raw, 1023.);
///
/// let midpoint: f64 = rescale(5., 0., 10., 100., 200.);
/// approx::assert_relative_eq!(midpoint, 150.);
/// ```
pub fn rescale<E: Float>(x: E, from_low: E, from_high: E, to_low: E, to_high: E) -> E {
    (x - from_low) * (to_high - to_low) / (from_high - from_low) + to_low
}
