//! Scanner tests: scopes, symbols and callback metadata found in script text.

use eidos::base::TextDocument;
use eidos::semantic::{
    Scope, ScopeKind, Symbol, SymbolManager, find_block_range, scan_document,
};
use eidos::FileId;

use crate::helpers::fixtures::*;
use crate::helpers::host_helpers::{pos, position_of};

const FILE: FileId = FileId::new(0);

fn scan(source: &str) -> SymbolManager {
    let mut manager = SymbolManager::new();
    let document = TextDocument::new("file:///test.slim", source);
    scan_document(&mut manager, FILE, &document, 3);
    manager
}

fn snapshot(manager: &SymbolManager) -> (Vec<Scope>, Vec<Symbol>) {
    (
        manager.document_scopes(FILE).to_vec(),
        manager
            .document_symbols(FILE)
            .iter()
            .map(|s| (**s).clone())
            .collect(),
    )
}

fn symbol<'a>(manager: &'a SymbolManager, name: &str) -> &'a Symbol {
    manager
        .document_symbols(FILE)
        .iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("Expected symbol '{name}'"))
}

// =============================================================================
// IDEMPOTENCE
// =============================================================================

#[test]
fn test_rescan_yields_identical_tables() {
    let mut manager = scan(NEUTRAL_MODEL);
    let first = snapshot(&manager);
    assert!(!first.0.is_empty());
    assert!(!first.1.is_empty());

    let document = TextDocument::new("file:///test.slim", NEUTRAL_MODEL);
    manager.clear_document_symbols(FILE);
    scan_document(&mut manager, FILE, &document, 3);
    assert_eq!(snapshot(&manager), first);

    // Without an explicit clear the scan still starts from scratch
    scan_document(&mut manager, FILE, &document, 3);
    assert_eq!(snapshot(&manager), first);
}

// =============================================================================
// SCOPES
// =============================================================================

#[test]
fn test_callback_scopes_with_metadata() {
    let manager = scan(NEUTRAL_MODEL);
    let callbacks: Vec<&Scope> = manager
        .document_scopes(FILE)
        .iter()
        .filter(|s| s.kind.is_callback())
        .collect();
    let kinds: Vec<ScopeKind> = callbacks.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        [
            ScopeKind::Initialize,
            ScopeKind::Early,
            ScopeKind::Late,
            ScopeKind::Fitness
        ]
    );

    let early = callbacks[1].callback.as_ref().unwrap();
    assert_eq!(early.generation, Some(1));

    let late = callbacks[2];
    let info = late.callback.as_ref().unwrap();
    assert_eq!(info.block_id.as_deref(), Some("s2"));
    assert_eq!(info.generation, Some(10));
    assert_eq!(info.end_generation, Some(20));
    assert_eq!(late.span.start, pos(9, 0));
    assert_eq!(late.span.end, pos(17, 1));
    assert_eq!(late.describe(), "late (generations 10:20)");

    let fitness = callbacks[3].callback.as_ref().unwrap();
    assert_eq!(fitness.subpopulation.as_deref(), Some("p1"));
}

#[test]
fn test_every_scope_is_non_empty_and_nested_in_parent() {
    let manager = scan(NEUTRAL_MODEL);
    for scope in manager.document_scopes(FILE) {
        assert!(!scope.span.is_empty(), "empty scope {scope:?}");
        if let Some(parent) = scope.parent {
            let parent = manager.scope(FILE, parent).unwrap();
            assert!(
                parent.span.contains(scope.span.start) && parent.span.contains(scope.span.end),
                "{scope:?} escapes {parent:?}"
            );
        }
    }
}

#[test]
fn test_block_nested_under_callback() {
    let manager = scan(NEUTRAL_MODEL);
    let inner = manager.find_scope(FILE, position_of(NEUTRAL_MODEL, "n = s.size", 0, 0));
    assert_eq!(inner.kind, ScopeKind::Block);
    let parent = manager.scope(FILE, inner.parent.unwrap()).unwrap();
    assert_eq!(parent.kind, ScopeKind::Late);
}

#[test]
fn test_function_body_scope() {
    let manager = scan(NEUTRAL_MODEL);
    let body = manager.find_scope(FILE, position_of(NEUTRAL_MODEL, "return x", 0, 0));
    assert_eq!(body.kind, ScopeKind::Function);
    assert_eq!(body.span.end, pos(24, 1));
    assert!(manager.current_scope(FILE).is_none(), "scan leaves no open scope");
}

#[test]
fn test_unterminated_block_does_not_fail() {
    assert_eq!(find_block_range(UNTERMINATED_BLOCK, 0), 0..0);
    let inner = UNTERMINATED_BLOCK.find("if").unwrap();
    assert_eq!(find_block_range(UNTERMINATED_BLOCK, inner), inner..inner);

    let manager = scan(UNTERMINATED_BLOCK);
    assert!(manager.document_scopes(FILE).is_empty());
    let names: Vec<&str> = manager
        .document_symbols(FILE)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, ["x", "y"]);
    assert_eq!(symbol(&manager, "y").scope.kind, ScopeKind::Global);
}

// =============================================================================
// SYMBOLS
// =============================================================================

#[test]
fn test_function_declaration_then_call() {
    let manager = scan(FUNCTION_THEN_CALL);

    let foo = symbol(&manager, "foo");
    assert_eq!(foo.ty, "function");
    assert_eq!(foo.scope.kind, ScopeKind::Global);
    assert_eq!(foo.value.as_deref(), Some("function(x, y)"));

    let z = symbol(&manager, "z");
    assert_eq!(z.ty, "unknown");
    assert_eq!(z.scope.kind, ScopeKind::Global);
    assert_eq!(z.value.as_deref(), Some("foo(1,2)"));

    let params: Vec<&str> = manager
        .document_symbols(FILE)
        .iter()
        .filter(|s| s.is_parameter)
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(params, ["x", "y"]);

    let found = manager.get_symbol_in(FILE, "foo", pos(1, 5)).unwrap();
    assert_eq!(found.ty, "function");
}

#[test]
fn test_inferred_types_in_model() {
    let manager = scan(NEUTRAL_MODEL);

    let n = symbol(&manager, "N");
    assert!(n.is_constant);
    assert_eq!(n.ty, "integer");
    assert_eq!(n.scope.kind, ScopeKind::Initialize);

    assert_eq!(symbol(&manager, "subs").ty, "vector<Subpopulation>");
    assert_eq!(symbol(&manager, "total").ty, "integer");
    assert_eq!(symbol(&manager, "s").ty, "Subpopulation");
    assert_eq!(symbol(&manager, "mean_size").ty, "float");
    assert_eq!(symbol(&manager, "scale").ty, "float<probability>");
}

#[test]
fn test_function_parameters() {
    let manager = scan(NEUTRAL_MODEL);
    let x = manager
        .document_symbols(FILE)
        .iter()
        .find(|s| s.is_parameter)
        .unwrap();
    assert_eq!(x.name, "x");
    assert_eq!(x.ty, "float");
    assert_eq!(x.value.as_deref(), Some("1.0"));
    assert_eq!(x.scope.kind, ScopeKind::Function);

    let inside = position_of(NEUTRAL_MODEL, "x / 2", 0, 0);
    assert!(manager.get_symbol_in(FILE, "x", inside).is_some());
    let outside = position_of(NEUTRAL_MODEL, "return scale", 0, 0);
    assert!(manager.get_symbol_in(FILE, "x", outside).is_none());
}

#[test]
fn test_comparisons_and_named_arguments_are_not_assignments() {
    let source = "sim.addSubpop(\"p1\", 10, haploid=T);\na == b;\nif (x == 1) y = 2;\n";
    let manager = scan(source);
    let names: Vec<&str> = manager
        .document_symbols(FILE)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, ["y"]);
}

#[test]
fn test_parentheses_in_strings_do_not_hide_assignments() {
    let manager = scan("s = \"(\"; x = 1;\nlabel = \"f(\" + \"x\";\ny = 2;\n");
    let names: Vec<&str> = manager
        .document_symbols(FILE)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, ["s", "x", "label", "y"]);
    assert_eq!(symbol(&manager, "x").ty, "integer");
}

#[test]
fn test_named_arguments_on_continuation_lines() {
    let source = "sim.addSubpop(\"p1\",\n    haploid=T);\nn = 5;\n";
    let manager = scan(source);
    let names: Vec<&str> = manager
        .document_symbols(FILE)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, ["n"]);
}

#[test]
fn test_alternative_assignment_operators() {
    let manager = scan("a := 1;\nb <- \"x\";\n");
    assert_eq!(symbol(&manager, "a").ty, "integer");
    assert_eq!(symbol(&manager, "b").ty, "string");
}

#[test]
fn test_define_global() {
    let manager = scan("initialize() {\n\tdefineGlobal(\"G\", 0.1);\n}\n1 late() {\n\tg = G;\n}\n");
    let global = symbol(&manager, "G");
    assert!(global.is_global);
    assert!(!global.is_constant);
    assert_eq!(global.ty, "float");

    // Bare identifiers resolve through earlier symbols
    assert_eq!(symbol(&manager, "g").ty, "float");
}
