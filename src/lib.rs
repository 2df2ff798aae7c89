/*!
 * Policy Readers-Writers Lock
 *
 * A blocking readers-writers lock whose admission policy (reader priority,
 * writer priority or strict FIFO) can be switched while threads wait on it.
 */

pub mod config;
pub mod errors;
pub mod guard;
pub mod lock;
pub mod policy;
pub mod status;
pub mod tracer;

// Re-exports
pub use config::LockConfig;
pub use errors::{InvariantViolation, PolicyParseError};
pub use guard::{Guard, GuardError, GuardMetadata, GuardResult, ReadGuard, WriteGuard};
pub use lock::ReadersWritersLock;
pub use policy::{Access, Policy};
pub use status::LockStatus;
pub use tracer::init_tracing;
