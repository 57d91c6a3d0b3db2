//! CLI command implementations.
//!
//! | Module | Commands handled |
//! |--------|------------------|
//! | `run`  | `Run`            |
//! | `scan` | `Scan`           |

pub mod run;
pub mod scan;

pub use run::cmd_run;
pub use scan::cmd_scan;
