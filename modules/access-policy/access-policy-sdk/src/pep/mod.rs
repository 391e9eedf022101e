//! PEP (Policy Enforcement Point) helpers.
//!
//! - [`PolicyEnforcer`]: PEP object (build → evaluate → enforce)
//! - [`CallerGate`]: the enforcer bound to one caller, plugged into the
//!   secure document store as its [`AccessGate`](docstore::secure::AccessGate)

pub mod enforcer;
pub mod gate;

pub use enforcer::{EnforcerError, PolicyEnforcer};
pub use gate::CallerGate;
