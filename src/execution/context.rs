//! Execution Context
//!
//! Provides shared services for one pipeline stage: the scalar function
//! library and the stage's random source. The random source is
//! dependency-injected so tests can replay draws deterministically
//! without changing evaluation semantics.

use crate::common::error::RillResult;
use crate::expression::function::ScalarFunctionLibrary;
use crate::types::Value;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fmt;
use std::sync::Arc;

/// Execution context owned by one pipeline stage
pub struct ExecutionContext {
    functions: Arc<ScalarFunctionLibrary>,
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("functions", &self.functions.function_names())
            .finish_non_exhaustive()
    }
}

impl ExecutionContext {
    /// Create a context whose random source draws from OS entropy
    pub fn new(functions: Arc<ScalarFunctionLibrary>) -> Self {
        Self {
            functions,
            rng: Box::new(StdRng::from_os_rng()),
        }
    }

    /// Create a context with a deterministic, seeded random source
    pub fn with_seed(functions: Arc<ScalarFunctionLibrary>, seed: u64) -> Self {
        Self {
            functions,
            rng: Box::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Create a context with a caller-supplied random source
    pub fn with_rng(functions: Arc<ScalarFunctionLibrary>, rng: Box<dyn RngCore>) -> Self {
        Self { functions, rng }
    }

    pub fn functions(&self) -> &ScalarFunctionLibrary {
        &self.functions
    }

    pub fn functions_arc(&self) -> Arc<ScalarFunctionLibrary> {
        self.functions.clone()
    }

    /// Dispatch a scalar function call by name with evaluated arguments
    pub fn call_function(&mut self, name: &str, args: &[Value]) -> RillResult<Value> {
        let function = self.functions.get(name)?;
        function.invoke(args, &mut *self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::RillError;

    #[test]
    fn test_call_dispatch() -> RillResult<()> {
        let mut context = ExecutionContext::with_seed(Arc::new(ScalarFunctionLibrary::new()), 1);
        let value = context.call_function("randCanonical", &[])?.try_as_f64()?;
        assert!((0.0..1.0).contains(&value));
        Ok(())
    }

    #[test]
    fn test_unknown_function() {
        let mut context = ExecutionContext::with_seed(Arc::new(ScalarFunctionLibrary::new()), 1);
        assert!(matches!(
            context.call_function("no_such_fn", &[]),
            Err(RillError::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_seeded_contexts_replay() -> RillResult<()> {
        let functions = Arc::new(ScalarFunctionLibrary::new());
        let mut a = ExecutionContext::with_seed(functions.clone(), 9);
        let mut b = ExecutionContext::with_seed(functions, 9);
        for _ in 0..10 {
            assert_eq!(
                a.call_function("randCanonical", &[])?,
                b.call_function("randCanonical", &[])?
            );
        }
        Ok(())
    }
}
