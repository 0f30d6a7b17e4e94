//! Framework-agnostic sanction logic: amounts, rates, order assembly,
//! persistence and document rendering.

pub mod amount;
pub mod document;
pub mod payment;
pub mod pdf;
pub mod roster;
pub mod sanction;
pub mod service;
pub mod store;
