//! Field-level checks for host and link payloads.
//!
//! Each field runs the same checks in the same order: presence, then
//! string type, then non-empty, then ASCII alphanumeric. Fields are visited
//! in declaration order, followed by any keys outside the schema in sorted
//! order. Every violation is collected, so a multiply-invalid payload always
//! reports the same list.

use std::collections::BTreeMap;
use std::fmt;

use crate::graph::{Field, NewHost, NewLink};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Missing,
    NotString,
    Empty,
    NotAlphanumeric,
    /// Key is not part of the schema
    NotAllowed,
    /// Payload itself is not an object
    NotObject,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Missing => f.write_str("is required"),
            Rule::NotString => f.write_str("must be a string"),
            Rule::Empty => f.write_str("is not allowed to be empty"),
            Rule::NotAlphanumeric => f.write_str("must only contain alpha-numeric characters"),
            Rule::NotAllowed => f.write_str("is not allowed"),
            Rule::NotObject => f.write_str("must be an object"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub rule: Rule,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" {}", self.field, self.rule)
    }
}

/// Ordered list of violations reported by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    /// A single violation, for shape checks made before a record exists.
    pub fn single(field: impl Into<String>, rule: Rule) -> Self {
        Self(vec![FieldViolation {
            field: field.into(),
            rule,
        }])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields that failed, in the order they were checked.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.field.as_str()).collect()
    }

    fn check(&mut self, field: &str, value: Option<&Field>) {
        if let Some(rule) = rule_broken(value) {
            self.0.push(FieldViolation {
                field: field.to_string(),
                rule,
            });
        }
    }

    fn reject_unknown(&mut self, unknown: &BTreeMap<String, Field>) {
        for key in unknown.keys() {
            self.0.push(FieldViolation {
                field: key.clone(),
                rule: Rule::NotAllowed,
            });
        }
    }

    fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::ValidationFailed(self))
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

fn rule_broken(value: Option<&Field>) -> Option<Rule> {
    match value {
        None => Some(Rule::Missing),
        Some(Field::NotText) => Some(Rule::NotString),
        Some(Field::Text(s)) if s.is_empty() => Some(Rule::Empty),
        Some(Field::Text(s)) if !is_alphanumeric(s) => Some(Rule::NotAlphanumeric),
        Some(Field::Text(_)) => None,
    }
}

#[inline]
pub fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

pub fn validate_host(host: &NewHost) -> Result<()> {
    let mut violations = Violations::default();
    violations.check("name", host.name.as_ref());
    violations.reject_unknown(&host.unknown);
    violations.into_result()
}

pub fn validate_link(link: &NewLink) -> Result<()> {
    let mut violations = Violations::default();
    violations.check("from", link.from.as_ref());
    violations.check("to", link.to.as_ref());
    violations.check("description", link.description.as_ref());
    violations.reject_unknown(&link.unknown);
    violations.into_result()
}
