//! Built-in unary math functions

use ahash::AHashMap;
use std::fmt;
use std::sync::OnceLock;

/// Function implementation signature
pub type FunctionImpl = fn(f64) -> f64;

/// A named unary real-valued function
///
/// Two functions are equal when their names are equal.
#[derive(Clone, Copy)]
pub struct UnaryFunction {
    name: &'static str,
    implementation: FunctionImpl,
}

impl UnaryFunction {
    /// Create a function named `name` that computes `implementation`
    pub const fn new(name: &'static str, implementation: FunctionImpl) -> Self {
        Self {
            name,
            implementation,
        }
    }

    /// The name formulas use to call this function (without the `()` suffix)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply the function to `x`
    pub fn apply(&self, x: f64) -> f64 {
        (self.implementation)(x)
    }
}

impl PartialEq for UnaryFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for UnaryFunction {}

impl fmt::Debug for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UnaryFunction").field(&self.name).finish()
    }
}

/// Built-in math functions, keyed by name
const MATH_FUNCTIONS: &[UnaryFunction] = &[
    UnaryFunction::new("abs", f64::abs),
    UnaryFunction::new("sqrt", f64::sqrt),
    UnaryFunction::new("cbrt", f64::cbrt),
    UnaryFunction::new("exp", f64::exp),
    UnaryFunction::new("log", f64::ln),
    UnaryFunction::new("log10", f64::log10),
    UnaryFunction::new("sin", f64::sin),
    UnaryFunction::new("cos", f64::cos),
    UnaryFunction::new("tan", f64::tan),
    UnaryFunction::new("asin", f64::asin),
    UnaryFunction::new("acos", f64::acos),
    UnaryFunction::new("atan", f64::atan),
    UnaryFunction::new("sinh", f64::sinh),
    UnaryFunction::new("cosh", f64::cosh),
    UnaryFunction::new("tanh", f64::tanh),
    UnaryFunction::new("ceil", f64::ceil),
    UnaryFunction::new("floor", f64::floor),
];

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// The process-wide registry of built-in math functions
pub fn default_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Function registry
///
/// Lookup is by exact name: no case folding and no aliases.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: AHashMap<&'static str, UnaryFunction>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_math_functions();
        registry
    }

    /// Create a registry without any functions
    pub fn empty() -> Self {
        Self {
            functions: AHashMap::new(),
        }
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&UnaryFunction> {
        self.functions.get(name)
    }

    /// Check whether a function is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Register a function, replacing any function with the same name
    pub fn register(&mut self, function: UnaryFunction) {
        self.functions.insert(function.name(), function);
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the registry has no functions
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered function names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn register_math_functions(&mut self) {
        for function in MATH_FUNCTIONS {
            self.register(*function);
        }
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<UnaryFunction> for FunctionRegistry {
    fn from_iter<I: IntoIterator<Item = UnaryFunction>>(iter: I) -> Self {
        let mut registry = Self::empty();
        for function in iter {
            registry.register(function);
        }
        registry
    }
}
