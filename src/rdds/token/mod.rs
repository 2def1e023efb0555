//! Token types shared by the lexer, the validator, and test tooling.

pub mod line;

pub use line::{FieldData, LineKind, Token, TokenData};
