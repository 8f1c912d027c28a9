//! Best-effort type inference for assigned values.
//!
//! Inference is a cascade of pattern checks over the right-hand side text,
//! in this order:
//!
//! 1. callback-scope heuristics (numeric literals in `fitness`/`modifyChild`)
//! 2. known receiver calls (`sim.subpopulations()`, `individual.age()`, ...)
//! 3. binary operators between two words, widening numeric operands
//! 4. literals (integer range, integer, float, string, logical)
//! 5. `c(...)`, `matrix(...)` and `list(...)` constructors
//! 6. `NULL`
//! 7. constructor calls of simulation classes and primitive vector types
//! 8. common method calls (`x.size()`)
//! 9. bare identifiers, through an optional resolver
//!
//! Anything else is `unknown`. Nothing here can fail, and constructor
//! arguments nested deeper than [`MAX_NESTING`] are `unknown` too.

use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;

use super::ScopeKind;
use super::type_tag::{
    self, FLOAT, INTEGER, LIST, LOGICAL, MIXED, NULL, PROBABILITY, STRING, UNKNOWN,
};
use crate::base::constants::{KNOWN_RECEIVERS, PRIMITIVE_TYPES, SIMULATION_CLASSES};

/// Deepest constructor or operator nesting inferred before giving up.
pub const MAX_NESTING: usize = 64;

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9.]+$").unwrap());

static LOGICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:T|F|TRUE|FALSE)$").unwrap());

static KNOWN_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({})\.(\w+)\(", KNOWN_RECEIVERS.join("|"))).unwrap()
});

static BINARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*([-+*/])\s*(\w+)$").unwrap());

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+\s*:\s*-?\d+$").unwrap());

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+$").unwrap());

static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:\d*\.\d+|\d+\.|\d+(?:\.\d*)?[eE][-+]?\d+|\.\d+[eE][-+]?\d+|INF|NAN)$")
        .unwrap()
});

static STRING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^["'].*["']$"#).unwrap());

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+)\((.*)\)").unwrap());

static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)\.(\w+)\(").unwrap());

static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

static NAMED_ARG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*=([^=].*)$").unwrap());

/// Looks up the type of an identifier already known to the caller.
pub type Resolver<'a> = &'a dyn Fn(&str) -> Option<SmolStr>;

/// Configurable inference entry point.
#[derive(Clone, Copy)]
pub struct TypeInference<'a> {
    sample_size: usize,
    resolver: Option<Resolver<'a>>,
    depth: usize,
}

impl Default for TypeInference<'_> {
    fn default() -> Self {
        Self {
            sample_size: 3,
            resolver: None,
            depth: 0,
        }
    }
}

impl<'a> TypeInference<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leading `c(...)` elements inspected.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size.max(1);
        self
    }

    /// Resolve bare identifiers (and binary operands) through `resolver`.
    pub fn with_resolver(mut self, resolver: Resolver<'a>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Infer the type tag of `value` assigned inside a `scope` region.
    pub fn infer(&self, value: &str, scope: ScopeKind) -> SmolStr {
        if self.depth > MAX_NESTING {
            return UNKNOWN.into();
        }
        let value = value.trim();

        match scope {
            ScopeKind::Fitness | ScopeKind::ModifyChild if NUMERIC_RE.is_match(value) => {
                return PROBABILITY.into();
            }
            ScopeKind::MateChoice if LOGICAL_RE.is_match(value) => return LOGICAL.into(),
            _ => {}
        }

        if let Some(caps) = KNOWN_CALL_RE.captures(value) {
            return known_call_type(&caps[1], &caps[2]).into();
        }

        // `1e-8` reads like `1e - 8`
        if let Some(caps) = BINARY_RE.captures(value).filter(|_| !FLOAT_RE.is_match(value)) {
            return self.binary_type(&caps[1], &caps[2], &caps[3]);
        }

        if RANGE_RE.is_match(value) {
            return "vector<integer>".into();
        }
        if INTEGER_RE.is_match(value) {
            return INTEGER.into();
        }
        if FLOAT_RE.is_match(value) {
            return FLOAT.into();
        }
        if STRING_RE.is_match(value) {
            return STRING.into();
        }
        if LOGICAL_RE.is_match(value) {
            return LOGICAL.into();
        }

        if value.starts_with("c(") {
            return format!("vector<{}>", self.vector_element_type(value)).into();
        }
        if value.starts_with("matrix(") {
            return format!("matrix<{}>", self.matrix_element_type(value)).into();
        }
        if value.starts_with("list(") {
            return self.list_type(value);
        }
        if value == NULL {
            return NULL.into();
        }

        if let Some(caps) = CALL_RE.captures(value) {
            return constructor_type(&caps[1]);
        }

        if let Some(caps) = METHOD_RE.captures(value) {
            return method_type(&caps[2]).into();
        }

        if IDENT_RE.is_match(value) {
            if let Some(ty) = self.resolve(value) {
                return ty;
            }
        }

        UNKNOWN.into()
    }

    /// Inference for an operand or element one level down.
    fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    fn resolve(&self, name: &str) -> Option<SmolStr> {
        self.resolver.and_then(|resolve| resolve(name))
    }

    /// Element type of a `c(...)` literal, from its first few elements.
    ///
    /// A single element type is kept as is; integers mixed with floats
    /// widen to `float`; vectors of vectors collapse their element types;
    /// anything else is `mixed`.
    pub fn vector_element_type(&self, value: &str) -> SmolStr {
        let Some(inner) = call_arguments(value.trim(), "c") else {
            return UNKNOWN.into();
        };
        let elements = split_elements(inner);
        if elements.is_empty() {
            return UNKNOWN.into();
        }

        let types = unique_types(
            elements
                .iter()
                .take(self.sample_size)
                .map(|e| self.nested().infer(e, ScopeKind::Global)),
        );

        if types.len() == 1 {
            return types[0].clone();
        }
        if types.iter().all(|t| type_tag::is_numeric(t)) {
            return FLOAT.into();
        }
        if types.iter().all(|t| type_tag::vector_element(t).is_some()) {
            let inner: Vec<&str> = types
                .iter()
                .filter_map(|t| type_tag::vector_element(t))
                .collect();
            return format!("vector<{}>", common_type(&inner)).into();
        }
        MIXED.into()
    }

    /// Element type of a `matrix(data, ...)` call, taken from its data argument.
    fn matrix_element_type(&self, value: &str) -> SmolStr {
        let Some(inner) = call_arguments(value, "matrix") else {
            return UNKNOWN.into();
        };
        let Some(data) = split_elements(inner).into_iter().next() else {
            return UNKNOWN.into();
        };
        let data = strip_argument_name(data);
        let ty = self.nested().infer(data, ScopeKind::Global);
        match type_tag::vector_element(&ty) {
            Some(element) => element.into(),
            None => ty,
        }
    }

    /// `list<T>` for homogeneous lists, `list<mixed>` otherwise, plain `list` when empty.
    fn list_type(&self, value: &str) -> SmolStr {
        let Some(inner) = call_arguments(value, "list") else {
            return LIST.into();
        };
        let elements = split_elements(inner);
        if elements.is_empty() {
            return LIST.into();
        }
        let types = unique_types(
            elements
                .iter()
                .map(|e| self.nested().infer(strip_argument_name(e), ScopeKind::Global)),
        );
        if types.len() == 1 {
            format!("list<{}>", types[0]).into()
        } else {
            format!("list<{MIXED}>").into()
        }
    }

    fn binary_type(&self, left: &str, op: &str, right: &str) -> SmolStr {
        let left = self.nested().infer(left, ScopeKind::Global);
        let right = self.nested().infer(right, ScopeKind::Global);

        if left == UNKNOWN || right == UNKNOWN {
            return UNKNOWN.into();
        }
        if left.starts_with("matrix<") || right.starts_with("matrix<") {
            return "matrix<float>".into();
        }
        if left.starts_with("vector<") || right.starts_with("vector<") {
            return "vector<float>".into();
        }
        if type_tag::is_numeric(&left) && type_tag::is_numeric(&right) {
            if op == "/" || left == FLOAT || right == FLOAT {
                return FLOAT.into();
            }
            return INTEGER.into();
        }
        UNKNOWN.into()
    }
}

/// Infer with default settings and no identifier resolution.
///
/// ```
/// use eidos::semantic::{ScopeKind, infer_type};
///
/// assert_eq!(infer_type("3.14", ScopeKind::Global), "float");
/// assert_eq!(infer_type("\"hello\"", ScopeKind::Global), "string");
/// assert_eq!(infer_type("T", ScopeKind::Global), "logical");
/// ```
pub fn infer_type(value: &str, scope: ScopeKind) -> SmolStr {
    TypeInference::new().infer(value, scope)
}

/// Element type of a `c(...)` literal with default settings.
pub fn infer_vector_type(value: &str) -> SmolStr {
    TypeInference::new().vector_element_type(value)
}

/// Return types of calls on the well-known simulation receivers.
fn known_call_type(receiver: &str, method: &str) -> &'static str {
    match (receiver, method) {
        ("sim", "generation" | "cycle" | "tick") => INTEGER,
        ("sim", "chromosome") => "Chromosome",
        ("sim", "subpopulations" | "subpopulationsWithIDs") => "vector<Subpopulation>",
        ("sim", "mutations" | "mutationsOfType") => "vector<Mutation>",
        ("sim", "countOfMutationsOfType") => INTEGER,
        ("sim", "addSubpop" | "addSubpopSplit") => "Subpopulation",
        ("individual", "genome1" | "genome2") => "Genome",
        ("individual", "fitness" | "relatedness" | "sumOfMutationsOfType") => FLOAT,
        ("individual", "age" | "countOfMutationsOfType") => INTEGER,
        ("subpop", "individuals" | "sampleIndividuals") => "vector<Individual>",
        ("subpop", "size" | "id") => INTEGER,
        ("subpop", "cachedFitness") => "vector<float>",
        ("genome", "mutations" | "mutationsOfType") => "vector<Mutation>",
        ("genome", "countOfMutationsOfType" | "mutationCount") => INTEGER,
        ("genome", "containsMutations") => LOGICAL,
        _ => UNKNOWN,
    }
}

/// Return types of common methods regardless of receiver.
fn method_type(method: &str) -> &'static str {
    match method {
        "size" | "length" | "asInteger" => INTEGER,
        "getValue" | "asFloat" => FLOAT,
        "contains" | "asLogical" => LOGICAL,
        "asString" => STRING,
        _ => UNKNOWN,
    }
}

fn constructor_type(name: &str) -> SmolStr {
    if SIMULATION_CLASSES.contains(&name) {
        return name.into();
    }
    if PRIMITIVE_TYPES.contains(&name) {
        return format!("vector<{name}>").into();
    }
    UNKNOWN.into()
}

/// The argument text of `name(...)` when `value` is exactly that call.
fn call_arguments<'v>(value: &'v str, name: &str) -> Option<&'v str> {
    value
        .strip_prefix(name)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// `name = value` named arguments reduce to `value`.
fn strip_argument_name(element: &str) -> &str {
    match NAMED_ARG_RE.captures(element) {
        Some(caps) => caps.get(2).map_or(element, |m| m.as_str().trim()),
        None => element,
    }
}

/// Deduplicate while keeping first-seen order.
fn unique_types(types: impl Iterator<Item = SmolStr>) -> Vec<SmolStr> {
    let mut unique: Vec<SmolStr> = Vec::new();
    for ty in types {
        if !unique.contains(&ty) {
            unique.push(ty);
        }
    }
    unique
}

fn common_type(types: &[&str]) -> SmolStr {
    match types {
        [] => UNKNOWN.into(),
        [only] => (*only).into(),
        _ if types.iter().all(|t| t == &types[0]) => types[0].into(),
        _ if types.iter().all(|t| type_tag::is_numeric(t)) => FLOAT.into(),
        _ => MIXED.into(),
    }
}

/// Split an argument list on top-level commas.
///
/// Commas nested in brackets or inside quoted strings do not split.
/// Elements are trimmed; empty trailing text is dropped.
pub fn split_elements(args: &str) -> Vec<&str> {
    let mut elements = Vec::new();
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in args.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                elements.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    let last = args[start..].trim();
    if !last.is_empty() {
        elements.push(last);
    }
    elements
}
