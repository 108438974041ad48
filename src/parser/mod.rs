//! Low-level parsing infrastructure.
//!
//! This module provides the byte parser the Newick parser and the Newick
//! string scanners are built on, along with error handling and label escaping.

pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;
pub mod utils;

pub use parsing_error::{ParsingError, ParsingErrorType};
