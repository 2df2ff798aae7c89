/*!
 * Guard Traits
 *
 * Core abstraction shared by read and write guards
 */

use super::{GuardMetadata, GuardResult};

/// Core guard trait
///
/// # Release
///
/// `release` gives the access back early. Dropping an active guard does the
/// same; dropping a released guard does nothing.
pub trait Guard: Send {
    /// Resource type name for logging/debugging
    fn resource_type(&self) -> &'static str;

    /// Get guard metadata
    fn metadata(&self) -> &GuardMetadata;

    /// Check if the guard still holds its access
    fn is_active(&self) -> bool;

    /// Manually release the access
    ///
    /// Returns `Err` if already released
    fn release(&mut self) -> GuardResult<()>;
}
