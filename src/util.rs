/// Asserts that a numerical value is in the provided interval `[a,b]` and panics
/// with a helpful message if not
///
/// ### Example
/// ```should_panic
/// use rl_testbeds::assert_interval;
///
/// let epsilon = 2.0;
/// assert_interval!(epsilon, 0.0, 1.0);
/// ```
/// This will panic with the message "Invalid value for \`epsilon\`. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
}

/// Select the item with the highest value, folding left to right
///
/// The later item wins whenever the running best is not strictly greater, so among equal
/// values the last one is chosen.
///
/// **Panics** if `items` is empty
pub(crate) fn argmax_last<T: Copy>(items: &[T], value: impl Fn(T) -> f64) -> T {
    items
        .iter()
        .copied()
        .reduce(|a, b| if value(a) > value(b) { a } else { b })
        .expect("There is always at least one action available")
}
