//! Language constants shared across the crate.

/// Characters that trigger a completion request.
pub const TRIGGER_CHARACTERS: &[char] = &['.', ' ', '('];

/// Receivers whose method calls have a known return type table.
pub const KNOWN_RECEIVERS: &[&str] = &["sim", "self", "individual", "subpop", "genome", "mut"];

/// Simulation object classes recognised by constructor-call inference.
pub const SIMULATION_CLASSES: &[&str] = &[
    "Individual",
    "Genome",
    "Mutation",
    "Subpopulation",
    "Species",
    "GenomicElement",
    "InteractionType",
    "GenomicElementType",
    "MutationType",
];

/// Primitive element types that double as vector constructors.
pub const PRIMITIVE_TYPES: &[&str] = &["integer", "float", "string", "logical"];
