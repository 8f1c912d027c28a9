//! Type inference tests through the public API and through scanning.

use eidos::base::TextDocument;
use eidos::semantic::{ScopeKind, SymbolManager, infer_type, infer_vector_type, scan_document};
use eidos::FileId;
use rstest::rstest;

use crate::helpers::fixtures::LITERALS;

#[rstest]
#[case("3.14", "float")]
#[case("\"hello\"", "string")]
#[case("T", "logical")]
#[case("c(1,2,3)", "vector<integer>")]
#[case("c(1, 2.5)", "vector<float>")]
#[case("sim.mutations()", "vector<Mutation>")]
#[case("individual.age()", "integer")]
#[case("4 / 2", "float")]
#[case("Subpopulation()", "Subpopulation")]
#[case("integer(5)", "vector<integer>")]
#[case("foo(1,2)", "unknown")]
fn test_infer_type_global(#[case] value: &str, #[case] expected: &str) {
    assert_eq!(infer_type(value, ScopeKind::Global), expected);
}

#[test]
fn test_vector_element_types() {
    assert_eq!(infer_vector_type("c(1, 2, 3)"), "integer");
    assert_eq!(infer_vector_type("c(1, 2.5)"), "float");
    assert_eq!(infer_vector_type("c(T, \"a\")"), "mixed");
    assert_eq!(infer_vector_type("not a vector"), "unknown");
}

#[rstest]
#[case(ScopeKind::Fitness, "0.5", "float<probability>")]
#[case(ScopeKind::ModifyChild, "1", "float<probability>")]
#[case(ScopeKind::MateChoice, "F", "logical")]
#[case(ScopeKind::Early, "0.5", "float")]
fn test_scope_heuristics(#[case] scope: ScopeKind, #[case] value: &str, #[case] expected: &str) {
    assert_eq!(infer_type(value, scope), expected);
}

#[test]
fn test_literal_assignments() {
    let file = FileId::new(0);
    let mut manager = SymbolManager::new();
    scan_document(
        &mut manager,
        file,
        &TextDocument::new("file:///literals.slim", LITERALS),
        3,
    );

    let types: Vec<(&str, &str)> = manager
        .document_symbols(file)
        .iter()
        .map(|s| (s.name.as_str(), s.ty.as_str()))
        .collect();
    assert_eq!(
        types,
        [
            ("a", "integer"),
            ("b", "float"),
            ("c", "string"),
            ("d", "logical"),
            ("e", "vector<integer>"),
            ("f", "vector<float>"),
            ("g", "NULL"),
            ("h", "vector<integer>"),
            ("i", "matrix<float>"),
            ("j", "list<mixed>"),
            ("k", "integer"),
        ]
    );
}

#[test]
fn test_sample_size_limits_vector_inspection() {
    let file = FileId::new(0);
    let document = TextDocument::new("file:///v.slim", "v = c(1, 2, 3, \"x\");");

    let mut manager = SymbolManager::new();
    scan_document(&mut manager, file, &document, 3);
    assert_eq!(manager.document_symbols(file)[0].ty, "vector<integer>");

    scan_document(&mut manager, file, &document, 4);
    assert_eq!(manager.document_symbols(file)[0].ty, "vector<mixed>");
}

#[test]
fn test_deeply_nested_literals_scan_without_overflow() {
    let depth = 20_000;
    let vector = format!("{}1{}", "c(".repeat(depth), ")".repeat(depth));
    let matrix = format!("{}1{}", "matrix(".repeat(depth), ")".repeat(depth));
    let list = format!("{}1{}", "list(".repeat(depth), ")".repeat(depth));
    let source = format!("v = {vector};\nm = {matrix};\nl = {list};\nok = 1;\n");

    let file = FileId::new(0);
    let mut manager = SymbolManager::new();
    scan_document(
        &mut manager,
        file,
        &TextDocument::new("file:///nested.slim", source),
        3,
    );

    let symbols = manager.document_symbols(file);
    let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["v", "m", "l", "ok"]);
    assert!(symbols[0].ty.starts_with("vector<vector<"));
    assert!(symbols[0].ty.contains("<unknown>"));
    assert!(symbols[1].ty.starts_with("matrix<"));
    assert!(symbols[2].ty.starts_with("list<list<"));
    assert_eq!(symbols[3].ty, "integer");
}
