/*!
 * Policy Module
 * Admission policies and the pure decision logic behind them
 */

pub(crate) mod admission;
mod types;

// Re-export public API
pub use types::{Access, Policy};
