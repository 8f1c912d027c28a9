//! Symbol manager resolution tests over scanned scripts.

use std::sync::Arc;

use eidos::base::{Position, TextDocument};
use eidos::semantic::{Scope, ScopeKind, SymbolManager, scan_document};
use eidos::FileId;
use rstest::rstest;

use crate::helpers::fixtures::NEUTRAL_MODEL;
use crate::helpers::host_helpers::pos;

const FILE: FileId = FileId::new(0);

fn scanned(source: &str) -> SymbolManager {
    let mut manager = SymbolManager::new();
    let document = TextDocument::new("file:///test.slim", source);
    scan_document(&mut manager, FILE, &document, 3);
    manager
}

/// Whether `a` ranks strictly ahead of `b` for scope lookup.
fn more_specific(a: &Scope, b: &Scope) -> bool {
    let (a_lines, b_lines) = (a.span.line_span(), b.span.line_span());
    a_lines < b_lines || (a_lines == b_lines && a.kind.specificity() > b.kind.specificity())
}

#[rstest]
#[case(pos(0, 3))]
#[case(pos(1, 5))]
#[case(pos(7, 2))]
#[case(pos(9, 16))]
#[case(pos(13, 4))]
#[case(pos(16, 0))]
#[case(pos(19, 3))]
#[case(pos(23, 2))]
#[case(pos(25, 0))]
fn test_find_scope_is_most_specific(#[case] position: Position) {
    let manager = scanned(NEUTRAL_MODEL);
    let found = manager.find_scope(FILE, position);
    assert!(found.span.contains(position), "{found:?} does not contain {position:?}");

    for other in manager
        .document_scopes(FILE)
        .iter()
        .filter(|s| s.span.contains(position))
    {
        assert!(
            !more_specific(other, &found),
            "{other:?} is more specific than {found:?} at {position:?}"
        );
    }
}

#[test]
fn test_find_scope_outside_everything_is_global() {
    let manager = scanned(NEUTRAL_MODEL);
    let scope = manager.find_scope(FILE, pos(25, 0));
    assert_eq!(scope.kind, ScopeKind::Global);
    assert!(scope.id.is_root());
}

#[test]
fn test_symbols_invisible_until_declared() {
    let manager = scanned(NEUTRAL_MODEL);
    for symbol in manager.document_symbols(FILE) {
        let declared = symbol.span.start;
        assert!(!manager.is_in_scope(symbol, declared), "{} visible at its start", symbol.name);
        for line in 0..declared.line {
            assert!(
                !manager.is_in_scope(symbol, pos(line, 0)),
                "{} visible on line {line} before its declaration",
                symbol.name
            );
            if let Some(found) = manager.get_symbol_in(FILE, &symbol.name, pos(line, 0)) {
                assert!(!Arc::ptr_eq(&found, symbol));
            }
        }
    }
}

#[test]
fn test_constant_visible_in_later_callback() {
    let manager = scanned(NEUTRAL_MODEL);
    let n = manager.get_symbol_in(FILE, "N", pos(7, 21)).unwrap();
    assert!(n.is_constant);
    // Declared inside initialize(), used in early()
    assert!(!n.scope.span.contains(pos(7, 21)));
}

#[test]
fn test_block_local_not_visible_after_block() {
    let manager = scanned(NEUTRAL_MODEL);
    assert!(manager.get_symbol_in(FILE, "n", pos(14, 2)).is_some());
    assert!(manager.get_symbol_in(FILE, "n", pos(16, 2)).is_none());
}

#[test]
fn test_innermost_redeclaration_wins() {
    let manager = scanned(NEUTRAL_MODEL);
    // `total` is declared in the late() body and again inside the loop
    let in_loop = manager.get_symbol_in(FILE, "total", pos(15, 0)).unwrap();
    assert_eq!(in_loop.scope.kind, ScopeKind::Block);
    let after_loop = manager.get_symbol_in(FILE, "total", pos(16, 5)).unwrap();
    assert_eq!(after_loop.scope.kind, ScopeKind::Late);
    assert_eq!(after_loop.ty, "integer");
}

#[test]
fn test_cross_document_lookup() {
    let mut manager = SymbolManager::new();
    let other = FileId::new(1);
    scan_document(&mut manager, FILE, &TextDocument::new("file:///a.slim", "a = 1;"), 3);
    scan_document(&mut manager, other, &TextDocument::new("file:///b.slim", "a = \"s\";"), 3);

    assert_eq!(manager.get_symbol_in(FILE, "a", pos(1, 0)).unwrap().ty, "integer");
    assert_eq!(manager.get_symbol_in(other, "a", pos(1, 0)).unwrap().ty, "string");
    assert!(manager.get_symbol("a", pos(1, 0)).is_some());

    manager.clear_document_symbols(other);
    assert_eq!(manager.get_symbol("a", pos(1, 0)).unwrap().file, FILE);
}

#[test]
fn test_unknown_document_and_name() {
    let manager = SymbolManager::new();
    assert!(manager.get_symbol("missing", pos(0, 0)).is_none());
    assert!(manager.document_symbols(FILE).is_empty());
    assert_eq!(manager.find_scope(FILE, pos(0, 0)).kind, ScopeKind::Global);
}
