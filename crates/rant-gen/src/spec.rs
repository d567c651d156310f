//! Generator specifications and weighted alternatives.

use std::fmt;
use std::rc::Rc;

use rant_core::{Step, UsageError};

use crate::session::Session;
use crate::value::Value;

/// An inline generation procedure.
pub type Procedure = Rc<dyn Fn(&mut Session) -> Step<Value>>;

/// A generation operation registered under a name.
pub type NamedGenerator = Rc<dyn Fn(&mut Session, &[Value]) -> Step<Value>>;

/// How to produce a value.
#[derive(Clone)]
pub enum GenSpec {
    /// A registered generator called without arguments.
    Named(String),
    /// A registered generator called with positional arguments.
    NamedWithArgs { name: String, args: Vec<Value> },
    /// A procedure evaluated directly against the session.
    Inline(Procedure),
}

impl GenSpec {
    pub fn named(name: impl Into<String>) -> Self {
        GenSpec::Named(name.into())
    }

    pub fn with_args(name: impl Into<String>, args: Vec<Value>) -> Self {
        GenSpec::NamedWithArgs {
            name: name.into(),
            args,
        }
    }

    pub fn inline(procedure: impl Fn(&mut Session) -> Step<Value> + 'static) -> Self {
        GenSpec::Inline(Rc::new(procedure))
    }

    /// Read a spec out of a dynamic value.
    ///
    /// A string names a generator, a list headed by a string names a
    /// generator and its arguments, and a `Gen` value is taken as is.
    pub fn from_value(value: &Value) -> Result<Self, UsageError> {
        match value {
            Value::Str(name) if name.is_empty() => Err(UsageError::EmptySpec),
            Value::Str(name) => Ok(GenSpec::Named(name.clone())),
            Value::Gen(spec) => Ok(spec.clone()),
            Value::List(items) => match items.split_first() {
                None => Err(UsageError::EmptySpec),
                Some((Value::Str(name), args)) => {
                    Ok(GenSpec::with_args(name.clone(), args.to_vec()))
                }
                Some(_) => Err(UsageError::IllegalSpec(format!("{:?}", value))),
            },
            other => Err(UsageError::IllegalSpec(format!("{:?}", other))),
        }
    }
}

impl From<&str> for GenSpec {
    fn from(name: &str) -> Self {
        GenSpec::named(name)
    }
}

impl From<String> for GenSpec {
    fn from(name: String) -> Self {
        GenSpec::Named(name)
    }
}

impl fmt::Debug for GenSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenSpec::Named(name) => f.debug_tuple("Named").field(name).finish(),
            GenSpec::NamedWithArgs { name, args } => f
                .debug_struct("NamedWithArgs")
                .field("name", name)
                .field("args", args)
                .finish(),
            GenSpec::Inline(_) => f.write_str("Inline(..)"),
        }
    }
}

impl PartialEq for GenSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (GenSpec::Named(a), GenSpec::Named(b)) => a == b,
            (
                GenSpec::NamedWithArgs { name: a, args: a_args },
                GenSpec::NamedWithArgs { name: b, args: b_args },
            ) => a == b && a_args == b_args,
            (GenSpec::Inline(a), GenSpec::Inline(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// One option of a weighted choice.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedAlternative {
    /// Relative weight; an entry of weight 0 is never chosen.
    pub weight: u32,
    pub spec: GenSpec,
    /// Appended to the spec's own arguments on dispatch.
    pub extra_args: Vec<Value>,
}

impl WeightedAlternative {
    /// An alternative of weight 1.
    pub fn new(spec: impl Into<GenSpec>) -> Self {
        Self::weighted(1, spec)
    }

    pub fn weighted(weight: u32, spec: impl Into<GenSpec>) -> Self {
        Self {
            weight,
            spec: spec.into(),
            extra_args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.extra_args = args;
        self
    }

    /// Normalize a raw entry.
    ///
    /// A bare spec gets weight 1. A list starting with an integer uses it as
    /// the weight, followed by the spec and its extra arguments; any other
    /// list is a spec plus extra arguments with weight 1.
    pub fn from_value(raw: &Value) -> Result<Self, UsageError> {
        let Value::List(items) = raw else {
            return Ok(Self::new(GenSpec::from_value(raw)?));
        };
        let (weight, rest) = match items.split_first() {
            None => return Err(UsageError::EmptySpec),
            Some((Value::Int(weight), rest)) => {
                let weight =
                    u32::try_from(*weight).map_err(|_| UsageError::IllegalWeight(*weight))?;
                (weight, rest)
            }
            Some(_) => (1, items.as_slice()),
        };
        let (spec, extra_args) = rest.split_first().ok_or(UsageError::EmptySpec)?;
        Ok(Self {
            weight,
            spec: GenSpec::from_value(spec)?,
            extra_args: extra_args.to_vec(),
        })
    }
}

impl From<GenSpec> for WeightedAlternative {
    fn from(spec: GenSpec) -> Self {
        Self::new(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_from_name() {
        assert_eq!(
            GenSpec::from_value(&Value::from("integer")),
            Ok(GenSpec::named("integer"))
        );
        assert_eq!(GenSpec::from_value(&Value::from("")), Err(UsageError::EmptySpec));
    }

    #[test]
    fn test_spec_from_list() {
        let raw = Value::List(vec!["range".into(), 1i64.into(), 5i64.into()]);
        assert_eq!(
            GenSpec::from_value(&raw),
            Ok(GenSpec::with_args("range", vec![Value::Int(1), Value::Int(5)]))
        );
        assert_eq!(
            GenSpec::from_value(&Value::List(vec![])),
            Err(UsageError::EmptySpec)
        );
    }

    #[test]
    fn test_illegal_spec_names_the_form() {
        let err = GenSpec::from_value(&Value::Int(3)).unwrap_err();
        assert_eq!(err, UsageError::IllegalSpec("Int(3)".to_string()));

        let err = GenSpec::from_value(&Value::List(vec![Value::Bool(true)])).unwrap_err();
        assert!(matches!(err, UsageError::IllegalSpec(form) if form.contains("Bool(true)")));
    }

    #[test]
    fn test_inline_specs_compare_by_identity() {
        let a = GenSpec::inline(|_| Ok(Value::Nil));
        let b = GenSpec::inline(|_| Ok(Value::Nil));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(format!("{:?}", a), "Inline(..)");
    }

    #[test]
    fn test_alternative_bare_spec() {
        let alt = WeightedAlternative::from_value(&Value::from("bool")).unwrap();
        assert_eq!(alt, WeightedAlternative::new("bool"));
        assert_eq!(alt.weight, 1);
    }

    #[test]
    fn test_alternative_explicit_weight() {
        let raw = Value::List(vec![3i64.into(), "range".into(), 1i64.into(), 9i64.into()]);
        let alt = WeightedAlternative::from_value(&raw).unwrap();
        assert_eq!(alt.weight, 3);
        assert_eq!(alt.spec, GenSpec::named("range"));
        assert_eq!(alt.extra_args, vec![Value::Int(1), Value::Int(9)]);
    }

    #[test]
    fn test_alternative_implicit_weight() {
        let raw = Value::List(vec!["range".into(), 1i64.into(), 9i64.into()]);
        let alt = WeightedAlternative::from_value(&raw).unwrap();
        assert_eq!(alt.weight, 1);
        assert_eq!(alt.spec, GenSpec::named("range"));
        assert_eq!(alt.extra_args, vec![Value::Int(1), Value::Int(9)]);
    }

    #[test]
    fn test_alternative_rejects_bad_weights() {
        let negative = Value::List(vec![(-2i64).into(), "bool".into()]);
        assert_eq!(
            WeightedAlternative::from_value(&negative),
            Err(UsageError::IllegalWeight(-2))
        );

        let weight_only = Value::List(vec![4i64.into()]);
        assert_eq!(
            WeightedAlternative::from_value(&weight_only),
            Err(UsageError::EmptySpec)
        );
    }
}
