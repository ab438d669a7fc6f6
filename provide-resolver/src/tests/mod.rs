//! Resolver tests
//!
//! Covers descriptor parsing, rule selection and the full evaluate path from
//! declaration text to invocation.

pub mod test_evaluate;
pub mod test_values;
