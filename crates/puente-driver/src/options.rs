//! The solver option capability.
//!
//! An option is a named, self-describing unit of configurability: keyword
//! options toggle a flag by presence alone, typed options parse a value of
//! one of the closed kinds int / double / string. Options hold shared
//! handles to their values so the owning driver or engine observes parsed
//! settings without going back through the registry.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Option lookup and parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// Name not present in the registry.
    Unknown { name: String },
    /// A keyword option was given an explicit `=value`.
    KeywordWithValue { name: String },
    /// A typed option's value token failed to parse.
    InvalidValue {
        name: String,
        value: String,
        type_name: &'static str,
    },
}

impl OptionError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            OptionError::Unknown { .. } => "OPTION_UNKNOWN",
            OptionError::KeywordWithValue { .. } => "OPTION_NO_ARGUMENT",
            OptionError::InvalidValue { .. } => "OPTION_INVALID_VALUE",
        }
    }
}

impl std::fmt::Display for OptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionError::Unknown { name } => {
                write!(f, "[{}] Unknown option \"{}\"", self.code(), name)
            }
            OptionError::KeywordWithValue { name } => {
                write!(
                    f,
                    "[{}] Option \"{}\" doesn't accept argument",
                    self.code(),
                    name
                )
            }
            OptionError::InvalidValue {
                name,
                value,
                type_name,
            } => {
                write!(
                    f,
                    "[{}] Option \"{}\": \"{}\" isn't a valid {}",
                    self.code(),
                    name,
                    value,
                    type_name
                )
            }
        }
    }
}

impl std::error::Error for OptionError {}

/// A value kind a typed option can carry.
pub trait OptionValue: Clone + 'static {
    /// Kind name used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Decode one whitespace-delimited token.
    fn parse_token(token: &str) -> Option<Self>;

    /// Encode the current value for echo and query output.
    fn format_value(&self) -> String;
}

impl OptionValue for i64 {
    const TYPE_NAME: &'static str = "int";

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    fn format_value(&self) -> String {
        self.to_string()
    }
}

impl OptionValue for f64 {
    const TYPE_NAME: &'static str = "double";

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    fn format_value(&self) -> String {
        self.to_string()
    }
}

impl OptionValue for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_token(token: &str) -> Option<Self> {
        Some(token.to_string())
    }

    fn format_value(&self) -> String {
        self.clone()
    }
}

/// A configurable unit owned by the option registry.
pub trait SolverOption {
    /// The lookup key. The parser lowercases names before lookup, so
    /// registered names should be lowercase.
    fn name(&self) -> &str;

    /// Human-readable description used for the options listing.
    fn description(&self) -> &str;

    /// Whether this option takes no argument.
    fn is_keyword(&self) -> bool {
        false
    }

    /// Render the current value.
    fn format_value(&self) -> String;

    /// Consume a value from the remaining option text and update the
    /// shared state.
    fn parse(&self, input: &mut &str) -> Result<(), OptionError>;
}

impl std::fmt::Debug for dyn SolverOption + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverOption")
            .field("name", &self.name())
            .field("value", &self.format_value())
            .finish()
    }
}

/// Take the leading non-whitespace token from `input`, advancing it.
fn take_token<'a>(input: &mut &'a str) -> &'a str {
    let end = input
        .find(|c: char| c.is_whitespace())
        .unwrap_or(input.len());
    let token = &input[..end];
    *input = &input[end..];
    token
}

/// An option parameterized over one of the [`OptionValue`] kinds.
pub struct TypedOption<T: OptionValue> {
    name: String,
    description: String,
    value: Rc<RefCell<T>>,
}

impl<T: OptionValue> TypedOption<T> {
    /// Option owning a fresh handle with the given initial value.
    pub fn new(name: impl Into<String>, description: impl Into<String>, initial: T) -> Self {
        Self::with_handle(name, description, Rc::new(RefCell::new(initial)))
    }

    /// Option bound to an existing shared handle.
    pub fn with_handle(
        name: impl Into<String>,
        description: impl Into<String>,
        value: Rc<RefCell<T>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value,
        }
    }

    /// The shared value handle.
    pub fn handle(&self) -> Rc<RefCell<T>> {
        Rc::clone(&self.value)
    }

    /// The current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T: OptionValue> SolverOption for TypedOption<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn format_value(&self) -> String {
        self.value.borrow().format_value()
    }

    fn parse(&self, input: &mut &str) -> Result<(), OptionError> {
        let token = take_token(input);
        match T::parse_token(token) {
            Some(value) => {
                *self.value.borrow_mut() = value;
                Ok(())
            }
            None => Err(OptionError::InvalidValue {
                name: self.name.clone(),
                value: token.to_string(),
                type_name: T::TYPE_NAME,
            }),
        }
    }
}

/// A keyword option: presence alone sets a shared flag.
pub struct KeywordOption {
    name: String,
    description: String,
    flag: Rc<Cell<bool>>,
}

impl KeywordOption {
    /// Keyword option owning a fresh, unset flag.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_flag(name, description, Rc::new(Cell::new(false)))
    }

    /// Keyword option bound to an existing shared flag.
    pub fn with_flag(
        name: impl Into<String>,
        description: impl Into<String>,
        flag: Rc<Cell<bool>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            flag,
        }
    }

    /// The shared flag handle.
    pub fn flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.flag)
    }

    /// Whether the keyword has been seen.
    pub fn is_set(&self) -> bool {
        self.flag.get()
    }
}

impl SolverOption for KeywordOption {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn is_keyword(&self) -> bool {
        true
    }

    fn format_value(&self) -> String {
        if self.flag.get() { "1" } else { "0" }.to_string()
    }

    fn parse(&self, _input: &mut &str) -> Result<(), OptionError> {
        self.flag.set(true);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn int_option_parses_one_token() {
        let option = TypedOption::new("iterlim", "iteration limit", 0i64);
        let mut input = "500 next";
        option.parse(&mut input).unwrap();
        assert_eq!(option.get(), 500);
        assert_eq!(input, " next");
        assert_eq!(option.format_value(), "500");
    }

    #[test]
    fn int_option_rejects_partial_token() {
        let option = TypedOption::new("iterlim", "iteration limit", 0i64);
        let mut input = "12x";
        let err = option.parse(&mut input).unwrap_err();
        assert_eq!(err.code(), "OPTION_INVALID_VALUE");
        assert!(err.to_string().contains("12x"));
        // The bad token is consumed so parsing resumes at the next one.
        assert_eq!(input, "");
        assert_eq!(option.get(), 0);
    }

    #[test]
    fn double_option_roundtrip() {
        let option = TypedOption::new("tol", "tolerance", 0.0f64);
        let mut input = "1e-6";
        option.parse(&mut input).unwrap();
        assert_eq!(option.get(), 1e-6);
    }

    #[test]
    fn string_option_takes_one_token() {
        let option = TypedOption::new("logfile", "log file name", String::new());
        let mut input = "run.log tail";
        option.parse(&mut input).unwrap();
        assert_eq!(option.get(), "run.log");
        assert_eq!(input, " tail");
    }

    #[test]
    fn keyword_option_sets_flag_and_consumes_nothing() {
        let option = KeywordOption::new("version", "report version");
        assert!(option.is_keyword());
        assert_eq!(option.format_value(), "0");
        let mut input = "rest";
        option.parse(&mut input).unwrap();
        assert!(option.is_set());
        assert_eq!(option.format_value(), "1");
        assert_eq!(input, "rest");
    }

    #[test]
    fn shared_handles_observe_parsed_values() {
        let handle = Rc::new(RefCell::new(0i64));
        let option = TypedOption::with_handle("wantsol", "solution output", Rc::clone(&handle));
        let mut input = "3";
        option.parse(&mut input).unwrap();
        assert_eq!(*handle.borrow(), 3);
    }
}
