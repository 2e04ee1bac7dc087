//! Recursive trie operations, one module per verb.

pub mod get;
pub mod insert;
pub mod remove;
