use std::collections::HashMap;

/// The type a flag's value is decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Presence-only flag; no value is read.
    Bool,
    /// Non-negative integer.
    Int,
    /// Verbatim text.
    String,
}

/// Declares which flags the parser accepts and how each value is decoded.
///
/// Built once with the consuming `with_flag` calls and then only borrowed by
/// [`parse_arguments`](super::parse_arguments).
///
/// ## Example
///
/// ```
/// use dbeetle_config::args::{parse_arguments, FlagSchema, ValueType};
///
/// let schema = FlagSchema::new()
///     .with_flag("verbose", ValueType::Bool)
///     .with_flag("threads", ValueType::Int);
///
/// let parsed = parse_arguments(&schema, ["prog", "--verbose", "-threads=8"])?;
/// assert_eq!(parsed.get_bool("verbose"), Some(true));
/// assert_eq!(parsed.get_int("threads"), Some(8));
/// # Ok::<(), dbeetle_config::args::ArgError>(())
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct FlagSchema {
    flags: HashMap<String, ValueType>,
}

impl FlagSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a flag. Registering the same name twice keeps the later type.
    pub fn with_flag(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.flags.insert(name.into(), value_type);
        self
    }

    pub fn get(&self, name: &str) -> Option<ValueType> {
        self.flags.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
