//! Schema-driven command-line argument parsing.

mod error;
mod parser;
mod schema;

pub use error::ArgError;
pub use parser::{parse_arguments, ArgValue, ParsedArgument, ParsedArguments};
pub use schema::{FlagSchema, ValueType};
