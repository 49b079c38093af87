//! Scalar function definitions and the built-in function library.
//!
//! The library is a fixed mapping from function name to a typed scalar
//! implementation, populated once at construction. Non-deterministic
//! functions (such as `randCanonical`) receive the pipeline's random
//! source as an explicit effect: every logical call site draws
//! independently, so the library never memoizes results.

use crate::common::error::{RillError, RillResult};
use crate::types::{LogicalType, Value};
use rand::{Rng, RngCore};
use std::collections::HashMap;

/// Implementation signature for scalar functions. Arguments arrive fully
/// evaluated; non-deterministic functions draw from the supplied source.
pub type ScalarImpl = fn(&[Value], &mut dyn RngCore) -> RillResult<Value>;

/// A named scalar function with its signature metadata
#[derive(Clone)]
pub struct ScalarFunction {
    pub name: String,
    pub return_type: LogicalType,
    pub argument_types: Vec<LogicalType>,
    pub is_deterministic: bool,
    function: ScalarImpl,
}

impl std::fmt::Debug for ScalarFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarFunction")
            .field("name", &self.name)
            .field("return_type", &self.return_type)
            .field("argument_types", &self.argument_types)
            .field("is_deterministic", &self.is_deterministic)
            .finish()
    }
}

impl ScalarFunction {
    pub fn new(
        name: impl Into<String>,
        return_type: LogicalType,
        argument_types: Vec<LogicalType>,
        function: ScalarImpl,
    ) -> Self {
        Self {
            name: name.into(),
            return_type,
            argument_types,
            is_deterministic: true,
            function,
        }
    }

    pub fn non_deterministic(mut self) -> Self {
        self.is_deterministic = false;
        self
    }

    /// Invoke the function with already-evaluated arguments
    pub fn invoke(&self, args: &[Value], rng: &mut dyn RngCore) -> RillResult<Value> {
        if args.len() != self.argument_types.len() {
            return Err(RillError::InvalidArgument(format!(
                "{} takes {} argument(s), got {}",
                self.name,
                self.argument_types.len(),
                args.len()
            )));
        }
        (self.function)(args, rng)
    }
}

/// Registry of scalar functions, keyed case-insensitively by name
pub struct ScalarFunctionLibrary {
    functions: HashMap<String, ScalarFunction>,
}

impl ScalarFunctionLibrary {
    /// Create a library populated with the built-in functions
    pub fn new() -> Self {
        let mut library = Self {
            functions: HashMap::new(),
        };
        library.register_builtin_functions();
        log::debug!(
            "scalar function library initialized with {} functions",
            library.functions.len()
        );
        library
    }

    /// Create an empty library (no built-ins)
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Register a function. Later registrations shadow earlier ones.
    pub fn register(&mut self, function: ScalarFunction) {
        self.functions
            .insert(function.name.to_lowercase(), function);
    }

    /// Look up a function by name (case-insensitive)
    pub fn lookup(&self, name: &str) -> Option<&ScalarFunction> {
        self.functions.get(&name.to_lowercase())
    }

    /// Look up a function by name, or fail with `UnknownFunction`
    pub fn get(&self, name: &str) -> RillResult<&ScalarFunction> {
        self.lookup(name)
            .ok_or_else(|| RillError::UnknownFunction(name.to_string()))
    }

    /// Registered function names, sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.values().map(|f| f.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    fn register_builtin_functions(&mut self) {
        // Canonical random draw in [0, 1). Each call site draws
        // independently per row.
        self.register(
            ScalarFunction::new("randCanonical", LogicalType::Double, vec![], rand_canonical)
                .non_deterministic(),
        );
        self.register(
            ScalarFunction::new("random", LogicalType::Double, vec![], rand_canonical)
                .non_deterministic(),
        );

        self.register(ScalarFunction::new(
            "abs",
            LogicalType::Double,
            vec![LogicalType::Double],
            abs,
        ));
        self.register(ScalarFunction::new(
            "upper",
            LogicalType::Varchar,
            vec![LogicalType::Varchar],
            upper,
        ));
        self.register(ScalarFunction::new(
            "lower",
            LogicalType::Varchar,
            vec![LogicalType::Varchar],
            lower,
        ));
    }
}

impl Default for ScalarFunctionLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn rand_canonical(_args: &[Value], rng: &mut dyn RngCore) -> RillResult<Value> {
    Ok(Value::Double(rng.random::<f64>()))
}

fn abs(args: &[Value], _rng: &mut dyn RngCore) -> RillResult<Value> {
    Ok(Value::Double(args[0].try_as_f64()?.abs()))
}

fn upper(args: &[Value], _rng: &mut dyn RngCore) -> RillResult<Value> {
    Ok(Value::Varchar(args[0].try_as_string()?.to_uppercase()))
}

fn lower(args: &[Value], _rng: &mut dyn RngCore) -> RillResult<Value> {
    Ok(Value::Varchar(args[0].try_as_string()?.to_lowercase()))
}
