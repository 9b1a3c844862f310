use std::collections::hash_map;
use std::collections::HashMap;

use super::{ArgError, FlagSchema, ValueType};

/// A decoded flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Bool(bool),
    Int(u64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgument {
    pub name: String,
    pub value_type: ValueType,
    pub value: ArgValue,
}

/// Flags recognised in one parse, keyed by name.
///
/// A flag given more than once holds the value of its last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    entries: HashMap<String, ParsedArgument>,
}

impl ParsedArguments {
    pub fn get(&self, name: &str) -> Option<&ParsedArgument> {
        self.entries.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name).map(|arg| &arg.value) {
            Some(ArgValue::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<u64> {
        match self.get(name).map(|arg| &arg.value) {
            Some(ArgValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name).map(|arg| &arg.value) {
            Some(ArgValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn iter(&self) -> hash_map::Values<'_, String, ParsedArgument> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, argument: ParsedArgument) {
        self.entries.insert(argument.name.clone(), argument);
    }
}

impl<'a> IntoIterator for &'a ParsedArguments {
    type Item = &'a ParsedArgument;
    type IntoIter = hash_map::Values<'a, String, ParsedArgument>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parses `argv` against `schema`.
///
/// The first element is the program name and is skipped. Only tokens that
/// start with `-` are considered; everything else is ignored. A flag is
/// written `--name=value` or `-name=value` (the value is everything after the
/// first `=`), or just `--name` for [`ValueType::Bool`] flags.
///
/// Parsing stops at the first error and no partial result is returned.
pub fn parse_arguments<I, S>(schema: &FlagSchema, argv: I) -> Result<ParsedArguments, ArgError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedArguments::default();

    for token in argv.into_iter().skip(1) {
        let token = token.as_ref();
        let Some(flag) = strip_dashes(token) else {
            continue;
        };

        let (name, raw_value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };

        let value_type = schema
            .get(name)
            .ok_or_else(|| ArgError::UnknownKey(name.to_string()))?;

        let value = match value_type {
            ValueType::Bool => ArgValue::Bool(true),
            ValueType::Int => ArgValue::Int(decode_int(name, raw_value)?),
            ValueType::String => ArgValue::String(require_value(name, raw_value)?.to_string()),
        };

        tracing::debug!(flag = name, value_type = ?value_type, "parsed argument");

        parsed.insert(ParsedArgument {
            name: name.to_string(),
            value_type,
            value,
        });
    }

    Ok(parsed)
}

/// Strips one or two leading dashes, or returns `None` for non-flag tokens.
fn strip_dashes(token: &str) -> Option<&str> {
    let rest = token.strip_prefix('-')?;
    Some(rest.strip_prefix('-').unwrap_or(rest))
}

fn require_value<'a>(name: &str, raw: Option<&'a str>) -> Result<&'a str, ArgError> {
    match raw {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ArgError::MissingValue(name.to_string())),
    }
}

fn decode_int(name: &str, raw: Option<&str>) -> Result<u64, ArgError> {
    let value = require_value(name, raw)?;
    let invalid = || ArgError::InvalidType {
        name: name.to_string(),
        value: value.to_string(),
    };

    // Negative numbers are never accepted, not even "-0".
    if value.starts_with('-') {
        return Err(invalid());
    }

    value.parse::<u64>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FlagSchema {
        FlagSchema::new()
            .with_flag("name", ValueType::String)
            .with_flag("count", ValueType::Int)
            .with_flag("verbose", ValueType::Bool)
    }

    #[test]
    fn test_long_and_short_flags() {
        let parsed =
            parse_arguments(&schema(), ["prog", "--name=backup", "-count=12"]).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get_str("name"), Some("backup"));
        assert_eq!(parsed.get_int("count"), Some(12));

        let entry = parsed.get("count").unwrap();
        assert_eq!(entry.value_type, ValueType::Int);
        assert_eq!(entry.value, ArgValue::Int(12));
    }

    #[test]
    fn test_program_name_and_positionals_are_skipped() {
        let parsed =
            parse_arguments(&schema(), ["--verbose", "positional", "--name=x"]).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get_str("name"), Some("x"));
        assert_eq!(parsed.get_bool("verbose"), None);
    }

    #[test]
    fn test_empty_argv() {
        let argv: [&str; 0] = [];
        let parsed = parse_arguments(&schema(), argv).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_bool_flag_presence() {
        let parsed = parse_arguments(&schema(), ["prog", "--verbose"]).unwrap();
        assert_eq!(parsed.get_bool("verbose"), Some(true));
    }

    #[test]
    fn test_bool_flag_ignores_value() {
        let parsed = parse_arguments(&schema(), ["prog", "--verbose=false"]).unwrap();
        assert_eq!(parsed.get_bool("verbose"), Some(true));
    }

    #[test]
    fn test_value_keeps_everything_after_first_equals() {
        let parsed =
            parse_arguments(&schema(), ["prog", "--name=postgres://u:p@h/db?a=b"]).unwrap();
        assert_eq!(parsed.get_str("name"), Some("postgres://u:p@h/db?a=b"));
    }

    #[test]
    fn test_repeated_flag_last_wins() {
        let parsed =
            parse_arguments(&schema(), ["prog", "--count=1", "--count=2", "-count=3"]).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get_int("count"), Some(3));
    }

    #[test]
    fn test_unknown_flag_fails() {
        let result = parse_arguments(&schema(), ["prog", "--name=x", "--bogus=1"]);
        assert_eq!(result, Err(ArgError::UnknownKey("bogus".into())));
    }

    #[test]
    fn test_bare_dashes_are_unknown() {
        let result = parse_arguments(&schema(), ["prog", "--"]);
        assert_eq!(result, Err(ArgError::UnknownKey(String::new())));
    }

    #[test]
    fn test_missing_values() {
        for token in ["--name", "--name=", "--count", "-count="] {
            let result = parse_arguments(&schema(), ["prog", token]);
            assert!(
                matches!(result, Err(ArgError::MissingValue(_))),
                "{token} should be missing a value"
            );
        }
    }

    #[test]
    fn test_negative_int_rejected() {
        let result = parse_arguments(&schema(), ["prog", "--count=-5"]);
        assert_eq!(
            result,
            Err(ArgError::InvalidType {
                name: "count".into(),
                value: "-5".into(),
            })
        );
    }

    #[test]
    fn test_non_numeric_int_rejected() {
        let result = parse_arguments(&schema(), ["prog", "--count=ten"]);
        assert!(matches!(result, Err(ArgError::InvalidType { .. })));
    }

    #[test]
    fn test_negative_string_value_is_allowed() {
        let parsed = parse_arguments(&schema(), ["prog", "--name=-x"]).unwrap();
        assert_eq!(parsed.get_str("name"), Some("-x"));
    }

    #[test]
    fn test_typed_getters_reject_other_types() {
        let parsed = parse_arguments(&schema(), ["prog", "--count=4"]).unwrap();
        assert_eq!(parsed.get_str("count"), None);
        assert_eq!(parsed.get_bool("count"), None);
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_debug_log_omits_values() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            parse_arguments(&schema(), ["prog", "--name=postgres://admin:hunter2@db/app"])
                .unwrap();
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("name"));
        assert!(!output.contains("hunter2"));
    }
}
