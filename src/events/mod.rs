//! Event types and observers.
//!
//! Submodules:
//! - [`scenephase`] – scene phase transition notifications and the observer
//!   that runs each phase's enter hook
pub mod scenephase;
