//! The analyzer contract.

/// A pure text-in, result-out computation.
///
/// Implementations must return the same output for the same input and must
/// not fail: input that cannot be analyzed produces a neutral result.
pub trait Analyzer: Send + Sync {
    type Output;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn analyze(&self, text: &str) -> Self::Output;
}
