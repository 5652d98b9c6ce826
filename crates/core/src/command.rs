//! Command abstraction (write-side intent).

/// An immutable request describing an intended state change.
///
/// Commands are **transient**: they are validated, turned into a state change by a
/// handler, and then discarded. A rejected command leaves no trace.
///
/// ## Design Constraints
///
/// Commands must be:
/// - **Cloneable**: commands may be copied for logging or replays by the caller
/// - **Send + Sync**: commands cross thread boundaries (async handlers, workers)
/// - **'static**: commands own all of their data
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable name used in logs and traces (e.g. `"products.create"`).
    const NAME: &'static str;
}
