//! Document outline tests.

use eidos::ide::OutlineKind;
use tokio_util::sync::CancellationToken;

use crate::helpers::fixtures::NEUTRAL_MODEL;
use crate::helpers::host_helpers::{URI, host_with};

#[test]
fn test_outline_order_and_details() {
    let (host, file) = host_with(NEUTRAL_MODEL);
    let outline = host.analysis().document_symbols(file, &CancellationToken::new());

    let names: Vec<&str> = outline.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        ["N", "subs", "total", "s", "n", "total", "mean_size", "scale", "half"]
    );

    assert_eq!(outline[0].detail, "integer (initialize)");
    assert_eq!(outline[0].kind, OutlineKind::Number);
    assert_eq!(outline[1].detail, "vector<Subpopulation> (late)");
    assert_eq!(outline[1].kind, OutlineKind::Array);
    assert_eq!(outline[3].kind, OutlineKind::Class);
    assert_eq!(outline[7].detail, "float<probability> (fitness)");
    assert_eq!(outline[8].detail, "function (float)half([float x = 1.0])");
    assert_eq!(outline[8].kind, OutlineKind::Function);
    assert!(outline.iter().all(|s| s.file == file));
}

#[test]
fn test_outline_stable_across_rescans() {
    let (mut host, file) = host_with(NEUTRAL_MODEL);
    let cancel = CancellationToken::new();
    let first = host.analysis().document_symbols(file, &cancel);

    host.update_document(URI, NEUTRAL_MODEL);
    host.update_document(URI, NEUTRAL_MODEL);
    let again = host.analysis().document_symbols(file, &cancel);
    assert_eq!(first, again);
}

#[test]
fn test_outline_empty_after_close() {
    let (mut host, file) = host_with(NEUTRAL_MODEL);
    assert!(host.close_document(URI));
    assert!(
        host.analysis()
            .document_symbols(file, &CancellationToken::new())
            .is_empty()
    );
}
