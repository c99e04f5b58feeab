//! Declarative parameter validation
//!
//! Every operation describes its parameter constraints once, up front, with a
//! [`Checker`]. All violated constraints are collected before anything runs,
//! and are reported together as [`LexnetError::InvalidParameter`].

use std::fmt;

use crate::{LexnetError, Result};

/// A single constraint kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The parameter must be supplied
    Required,
    /// The parameter must not be supplied for this operation
    Forbidden,
    /// The parameter may not be combined with another one
    Conflicts { other: String },
    /// A non-negative integer was expected
    Negative { value: i64 },
    /// The value is below the smallest meaningful value
    BelowMinimum { value: usize, minimum: usize },
    /// The value exceeds a bound derived from the input
    ExceedsLimit {
        value: usize,
        limit: usize,
        what: &'static str,
    },
    /// A referenced file does not exist
    FileNotFound,
    /// A referenced file has the wrong extension
    WrongExtension { expected: &'static str },
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "is required"),
            Self::Forbidden => write!(f, "is not accepted here"),
            Self::Conflicts { other } => write!(f, "conflicts with `{other}`"),
            Self::Negative { value } => write!(f, "must be non-negative, got {value}"),
            Self::BelowMinimum { value, minimum } => {
                write!(f, "must be at least {minimum}, got {value}")
            }
            Self::ExceedsLimit { value, limit, what } => {
                write!(f, "must not exceed the {what} ({limit}), got {value}")
            }
            Self::FileNotFound => write!(f, "file does not exist"),
            Self::WrongExtension { expected } => write!(f, "expected a .{expected} file"),
        }
    }
}

/// A violated constraint on a named parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` {}", self.field, self.rule)
    }
}

/// Non-empty list of violations carried by [`LexnetError::InvalidParameter`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether a field has any violation
    pub fn touches(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Accumulates violations for one operation
#[derive(Debug, Default)]
pub struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(&mut self, field: impl Into<String>, rule: Rule) -> &mut Self {
        self.violations.push(Violation {
            field: field.into(),
            rule,
        });
        self
    }

    pub fn require<T>(&mut self, field: &str, value: Option<&T>) -> &mut Self {
        if value.is_none() {
            self.push(field, Rule::Required);
        }
        self
    }

    pub fn forbid<T>(&mut self, field: &str, value: Option<&T>) -> &mut Self {
        if value.is_some() {
            self.push(field, Rule::Forbidden);
        }
        self
    }

    /// Check a raw signed value; returns it as `usize` when valid
    pub fn non_negative(&mut self, field: &str, value: i64) -> Option<usize> {
        match usize::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                self.push(field, Rule::Negative { value });
                None
            }
        }
    }

    pub fn at_least(&mut self, field: &str, value: usize, minimum: usize) -> &mut Self {
        if value < minimum {
            self.push(field, Rule::BelowMinimum { value, minimum });
        }
        self
    }

    pub fn at_most(
        &mut self,
        field: &str,
        value: usize,
        limit: usize,
        what: &'static str,
    ) -> &mut Self {
        if value > limit {
            self.push(field, Rule::ExceedsLimit { value, limit, what });
        }
        self
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Ok when nothing was violated, otherwise every violation at once
    pub fn finish(self) -> Result<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(LexnetError::InvalidParameter(Violations(self.violations)))
        }
    }
}
