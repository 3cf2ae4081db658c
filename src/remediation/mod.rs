//! Disease label to treatment lookup.

mod table;

pub use table::{Remedy, RemediationEntry, RemediationTable};
