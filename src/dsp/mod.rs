pub mod detect;
pub mod grouped;
pub mod note;
pub mod segment;
pub mod spectrum;
pub mod tuning;
pub mod windowing;

/// Errors produced by the analysis core.
///
/// Every public operation validates its arguments up front and returns one of
/// these instead of letting a bad value reach the math (a non-positive
/// frequency fed to a logarithm would otherwise surface as a silent NaN and
/// a wrong note name much later).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DspError {
    /// The caller passed a value outside the operation's domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The input was valid but degenerate: nothing to analyze.
    /// Distinct from `InvalidArgument` — an empty buffer or a recording
    /// shorter than one analysis group is not a caller mistake.
    #[error("empty input: {0}")]
    EmptyInput(String),
}
