//! Shared sampling scaffolding: the subject handle estimators read from and
//! the poll gate that decides which samples they see.

mod poll_gate;
mod subject;

pub use poll_gate::PollGate;
pub use subject::{StatusEffect, Subject};

#[cfg(test)]
pub(crate) mod test_support;
