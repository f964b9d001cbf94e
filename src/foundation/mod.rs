/// Error taxonomy shared across the crate.
pub(crate) mod error;
/// Deterministic mask file naming.
pub(crate) mod key;
