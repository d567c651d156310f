//! Resolving generator specs into values.
//!
//! Named specs are looked up in the session's registry, which starts out
//! holding the built-in generators below and can be extended with
//! [`Session::register`]. Inline specs run directly against the session.

use std::collections::HashMap;
use std::rc::Rc;

use rant_core::{CharClass, ClassName, Step, UsageError};

use crate::session::Session;
use crate::spec::{GenSpec, NamedGenerator, WeightedAlternative};
use crate::value::Value;

impl Session {
    /// Produce a value from `spec`.
    ///
    /// `extra_args` are appended to a named spec's own arguments; inline
    /// procedures close over their inputs and ignore them.
    pub fn invoke(&mut self, spec: &GenSpec, extra_args: &[Value]) -> Step<Value> {
        match spec {
            GenSpec::Named(name) => self.call_with(name, &[], extra_args),
            GenSpec::NamedWithArgs { name, args } => self.call_with(name, args, extra_args),
            GenSpec::Inline(procedure) => procedure(self),
        }
    }

    /// Call the generator registered as `name`.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Step<Value> {
        self.call_with(name, args, &[])
    }

    fn call_with(&mut self, name: &str, args: &[Value], extra_args: &[Value]) -> Step<Value> {
        if name.is_empty() {
            return Err(UsageError::EmptySpec.into());
        }
        let generator = self
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| UsageError::UnknownGenerator(name.to_string()))?;

        if extra_args.is_empty() {
            generator(self, args)
        } else {
            let all_args: Vec<Value> = args.iter().chain(extra_args).cloned().collect();
            generator(self, &all_args)
        }
    }

    /// Register a generation operation under `name`, replacing any previous one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        generator: impl Fn(&mut Session, &[Value]) -> Step<Value> + 'static,
    ) {
        self.registry.insert(name.into(), Rc::new(generator));
    }

    #[must_use]
    pub fn has_generator(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Pick one of `specs` uniformly and invoke it.
    pub fn branch(&mut self, specs: &[GenSpec]) -> Step<Value> {
        let spec = self.choose(specs)?;
        self.invoke(spec, &[])
    }

    /// Pick one of `values` uniformly.
    pub fn choose<'a, T>(&mut self, values: &'a [T]) -> Result<&'a T, UsageError> {
        if values.is_empty() {
            return Err(UsageError::EmptyChoice);
        }
        let last = i64::try_from(values.len() - 1).map_err(|_| UsageError::EmptyChoice)?;
        let index = self.range(0, last)?;
        Ok(&values[index as usize])
    }

    /// Lift a constant into generator position.
    pub fn literal<T>(&self, value: T) -> T {
        value
    }
}

fn int_arg(generator: &str, args: &[Value], index: usize) -> Result<Option<i64>, UsageError> {
    match args.get(index) {
        None | Some(Value::Nil) => Ok(None),
        Some(Value::Int(n)) => Ok(Some(*n)),
        Some(other) => Err(UsageError::bad_argument(
            generator,
            format!("expected an integer at position {}, got {:?}", index, other),
        )),
    }
}

fn no_args(generator: &str, args: &[Value]) -> Result<(), UsageError> {
    if args.is_empty() {
        Ok(())
    } else {
        let reason = format!("takes no arguments, got {}", args.len());
        Err(UsageError::bad_argument(generator, reason))
    }
}

pub(crate) fn alternatives(args: &[Value]) -> Result<Vec<WeightedAlternative>, UsageError> {
    args.iter().map(WeightedAlternative::from_value).collect()
}

fn builtin_integer(s: &mut Session, args: &[Value]) -> Step<Value> {
    let n = int_arg("integer", args, 0)?;
    Ok(Value::Int(s.integer(n)?))
}

fn builtin_positive_integer(s: &mut Session, args: &[Value]) -> Step<Value> {
    no_args("positive_integer", args)?;
    Ok(Value::Int(s.positive_integer()))
}

fn builtin_range(s: &mut Session, args: &[Value]) -> Step<Value> {
    let lo = int_arg("range", args, 0)?;
    let hi = int_arg("range", args, 1)?;
    Ok(Value::Int(s.range_opt(lo, hi)?))
}

fn builtin_float(s: &mut Session, args: &[Value]) -> Step<Value> {
    no_args("float", args)?;
    Ok(Value::Float(s.float()))
}

fn builtin_bool(s: &mut Session, args: &[Value]) -> Step<Value> {
    no_args("bool", args)?;
    Ok(Value::Bool(s.bool()))
}

fn builtin_literal(s: &mut Session, args: &[Value]) -> Step<Value> {
    match args {
        [value] => Ok(s.literal(value.clone())),
        _ => {
            let reason = format!("expected one value, got {}", args.len());
            Err(UsageError::bad_argument("literal", reason).into())
        }
    }
}

fn builtin_choose(s: &mut Session, args: &[Value]) -> Step<Value> {
    Ok(s.choose(args)?.clone())
}

fn builtin_branch(s: &mut Session, args: &[Value]) -> Step<Value> {
    let specs = args
        .iter()
        .map(GenSpec::from_value)
        .collect::<Result<Vec<_>, _>>()?;
    s.branch(&specs)
}

fn builtin_freq(s: &mut Session, args: &[Value]) -> Step<Value> {
    s.freq(&alternatives(args)?)
}

fn builtin_string(s: &mut Session, args: &[Value]) -> Step<Value> {
    let class = match args {
        [] => ClassName::Print,
        [Value::Str(name)] => name.parse()?,
        _ => {
            let reason = "expected at most one class name";
            return Err(UsageError::bad_argument("string", reason).into());
        }
    };
    Ok(Value::Str(s.string(&CharClass::Named(class))?))
}

fn builtin_array(s: &mut Session, args: &[Value]) -> Step<Value> {
    // An empty array draws nothing, so its alternatives are never read.
    if s.current_size() == 0 {
        return Ok(Value::List(Vec::new()));
    }
    Ok(Value::List(s.array(&alternatives(args)?)?))
}

fn builtin_sized(s: &mut Session, args: &[Value]) -> Step<Value> {
    let (size, spec, extra_args) = match args {
        [Value::Int(size), spec, extra_args @ ..] => {
            (*size, GenSpec::from_value(spec)?, extra_args)
        }
        _ => {
            let reason = "expected a size followed by a spec";
            return Err(UsageError::bad_argument("sized", reason).into());
        }
    };
    s.with_size(size, |s| s.invoke(&spec, extra_args))
}

/// The generators every session starts with.
pub(crate) fn builtins() -> HashMap<String, NamedGenerator> {
    let entries: [(&str, NamedGenerator); 12] = [
        ("integer", Rc::new(builtin_integer)),
        ("positive_integer", Rc::new(builtin_positive_integer)),
        ("range", Rc::new(builtin_range)),
        ("float", Rc::new(builtin_float)),
        ("bool", Rc::new(builtin_bool)),
        ("literal", Rc::new(builtin_literal)),
        ("choose", Rc::new(builtin_choose)),
        ("branch", Rc::new(builtin_branch)),
        ("freq", Rc::new(builtin_freq)),
        ("string", Rc::new(builtin_string)),
        ("array", Rc::new(builtin_array)),
        ("sized", Rc::new(builtin_sized)),
    ];
    entries
        .into_iter()
        .map(|(name, generator)| (name.to_string(), generator))
        .collect()
}
