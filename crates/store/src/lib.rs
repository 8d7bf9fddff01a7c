//! JSON-file persistence for prompts and categories.
//!
//! The wall's backing store is deliberately small: one pretty-printed
//! JSON file per collection under the data dir, read-modify-write per
//! operation, last writer wins. [`PromptRepository`] is the seam a
//! relational implementation would plug into.

pub mod category_store;
pub mod error;
pub mod prompt_store;

pub use category_store::CategoryStore;
pub use error::StoreError;
pub use prompt_store::{JsonPromptStore, PromptRepository};
