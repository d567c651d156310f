//! The entropy interface the generation engine depends on.

/// A source of uniformly distributed integers and reals.
///
/// Implementations make no promise about the algorithm behind the draws,
/// only that they are uniform over the requested interval.
pub trait UniformSource {
    /// Draw an integer uniformly from `[0, bound)`.
    ///
    /// `bound` must be positive.
    fn next_uniform(&mut self, bound: u64) -> u64;

    /// Draw a real uniformly from `[0, 1)`.
    fn next_uniform_real(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for Box<S> {
    fn next_uniform(&mut self, bound: u64) -> u64 {
        (**self).next_uniform(bound)
    }

    fn next_uniform_real(&mut self) -> f64 {
        (**self).next_uniform_real()
    }
}
