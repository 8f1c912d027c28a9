//! Helpers for driving an `AnalysisHost` from tests.

use eidos::ide::{AnalysisHost, CompletionItem};
use eidos::{FileId, Position};
use tokio_util::sync::CancellationToken;

pub const URI: &str = "file:///test/model.slim";

/// Open `source` in a fresh host.
pub fn host_with(source: &str) -> (AnalysisHost, FileId) {
    let mut host = AnalysisHost::new();
    let file = host.open_document(URI, source);
    (host, file)
}

pub fn pos(line: usize, column: usize) -> Position {
    Position::new(line, column)
}

/// Position of the `nth` (0-based) occurrence of `needle`, shifted right by `shift` chars.
pub fn position_of(source: &str, needle: &str, nth: usize, shift: usize) -> Position {
    let offset = source
        .match_indices(needle)
        .nth(nth)
        .map(|(i, _)| i)
        .unwrap_or_else(|| panic!("'{needle}' occurrence {nth} not found"));
    let before = &source[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    Position::new(line, source[line_start..offset].chars().count() + shift)
}

pub fn hover_markdown(host: &AnalysisHost, file: FileId, position: Position) -> Option<String> {
    host.analysis()
        .hover(file, position, &CancellationToken::new())
        .map(|h| h.contents.to_markdown())
}

pub fn completions_at(
    host: &AnalysisHost,
    file: FileId,
    position: Position,
    trigger: Option<char>,
) -> Vec<CompletionItem> {
    host.analysis()
        .completions(file, position, trigger, &CancellationToken::new())
}

pub fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_ref()).collect()
}
