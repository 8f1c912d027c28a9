//! Regex scan of document text into scopes and symbols.
//!
//! A scan rebuilds a document's tables from scratch in a fixed pass order:
//!
//! 1. scopes: simulation callback headers, then every `{` block
//! 2. `defineConstant`/`defineGlobal` declarations
//! 3. assignments (`=`, `:=`, `<-`)
//! 4. `for (x in ...)` loop variables
//! 5. `function` declarations, their body scopes and parameters
//!
//! Brace matching is a plain depth counter. Braces inside strings and
//! comments are counted like any other.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;

use super::infer::TypeInference;
use super::type_tag::{self, FUNCTION, UNKNOWN};
use super::{CallbackInfo, Scope, ScopeId, ScopeKind, Symbol, SymbolManager};
use crate::base::{FileId, Position, Span, TextDocument};

static CALLBACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?:^|\s)(?:(s\d+)\s+)?(?:(?:species|ticks)\s+(\w+)\s+)?(?:(\d+)(?:\s*:\s*(\d+))?\s+)?(initialize|first|early|late|fitness|mutationEffect|interaction|mateChoice|modifyChild|reproduction|mutation|recombination|survival)\s*\(([^)]*)\)\s*\{",
    )
    .unwrap()
});

static ASSIGNMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|\s)(\w+)\s*(?:=|:=|<-)\s*(.+?)(?:;|$)").unwrap()
});

static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|\s)function(?:\s*\(([^)]*)\)\s*|\s+)(\w+)\s*\(([^)]*)\)").unwrap()
});

static DEFINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)\b(defineConstant|defineGlobal)\s*\(\s*["'](\w+)["']\s*,\s*(.+?)\)\s*(?:;|$)"#,
    )
    .unwrap()
});

static FOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfor\s*\(\s*(\w+)\s+in\s+").unwrap());

static SUBPOP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^p\d+$").unwrap());

/// Counts of what one scan registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub scopes: usize,
    pub symbols: usize,
}

/// Rebuild `file`'s scopes and symbols from `document`.
///
/// Never fails: text that matches none of the patterns simply registers
/// nothing. `sample_size` bounds how many `c(...)` elements inference
/// inspects.
pub fn scan_document(
    manager: &mut SymbolManager,
    file: FileId,
    document: &TextDocument,
    sample_size: usize,
) -> ScanSummary {
    tracing::debug!("[SCAN] {file}: scanning {}", document.uri());
    manager.clear_document_symbols(file);

    let mut scanner = Scanner {
        manager,
        file,
        document,
        text: document.text(),
        sample_size,
        summary: ScanSummary::default(),
    };
    scanner.detect_scopes();
    scanner.scan_definitions();
    scanner.scan_assignments();
    scanner.scan_for_loops();
    scanner.scan_functions();

    let summary = scanner.summary;
    tracing::debug!(
        "[SCAN] {file}: {} scopes, {} symbols",
        summary.scopes,
        summary.symbols
    );
    summary
}

/// Byte range of the block opened by the first `{` at or after `start`.
///
/// The range runs from `start` to just past the matching `}`. When there is
/// no `{` or it is never closed, the range is empty at `start`.
pub fn find_block_range(text: &str, start: usize) -> Range<usize> {
    let start = start.min(text.len());
    let Some(open) = text[start..].find('{') else {
        return start..start;
    };

    let mut depth = 0usize;
    for (i, byte) in text.as_bytes()[start + open..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return start..start + open + i + 1;
                }
            }
            _ => {}
        }
    }
    start..start
}

struct Scanner<'a> {
    manager: &'a mut SymbolManager,
    file: FileId,
    document: &'a TextDocument,
    text: &'a str,
    sample_size: usize,
    summary: ScanSummary,
}

impl Scanner<'_> {
    fn span(&self, range: Range<usize>) -> Span {
        Span::new(
            self.document.position_at(range.start),
            self.document.position_at(range.end),
        )
    }

    fn add_scope(&mut self, scope: Scope) -> ScopeId {
        self.summary.scopes += 1;
        self.manager.add_scope(self.file, scope)
    }

    fn add_symbol(&mut self, symbol: Symbol) {
        self.summary.symbols += 1;
        self.manager.add_symbol(self.file, symbol);
    }

    /// Infer `value`, resolving identifiers against symbols visible at `at`.
    fn infer(&self, value: &str, scope: ScopeKind, at: Position) -> SmolStr {
        let manager = &*self.manager;
        let file = self.file;
        let lookup = |name: &str| manager.get_symbol_in(file, name, at).map(|s| s.ty.clone());
        TypeInference::new()
            .with_sample_size(self.sample_size)
            .with_resolver(&lookup)
            .infer(value, scope)
    }

    // ============================================================
    // Scopes
    // ============================================================

    fn detect_scopes(&mut self) {
        let text = self.text;

        for caps in CALLBACK_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let Some(kind) = caps
                .get(5)
                .and_then(|m| ScopeKind::from_callback_keyword(m.as_str()))
            else {
                continue;
            };
            let header = whole.as_str();
            let start = whole.start() + (header.len() - header.trim_start().len());
            let range = find_block_range(text, start);
            if range.is_empty() {
                tracing::debug!("[SCAN] {}: unterminated {kind} block at {start}", self.file);
                continue;
            }

            let mut info = CallbackInfo {
                block_id: caps.get(1).map(|m| m.as_str().into()),
                species: caps.get(2).map(|m| m.as_str().into()),
                generation: caps.get(3).and_then(|m| m.as_str().parse().ok()),
                end_generation: caps.get(4).and_then(|m| m.as_str().parse().ok()),
                subpopulation: None,
            };
            if let Some(args) = caps.get(6) {
                apply_callback_arguments(&mut info, args.as_str());
            }

            let span = self.span(range);
            self.add_scope(Scope::new(kind, span).with_callback(info));
        }

        for (offset, _) in text.match_indices('{') {
            let range = find_block_range(text, offset);
            if range.is_empty() {
                tracing::debug!("[SCAN] {}: unterminated block at {offset}", self.file);
                continue;
            }
            let span = self.span(range);
            let parent = self.manager.find_scope(self.file, span.start).id;
            self.add_scope(Scope::new(ScopeKind::Block, span).with_parent(parent));
        }
    }

    // ============================================================
    // Symbols
    // ============================================================

    fn scan_definitions(&mut self) {
        let text = self.text;
        for caps in DEFINE_RE.captures_iter(text) {
            let (Some(whole), Some(keyword), Some(name), Some(value)) =
                (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            let span = self.span(whole.start()..whole.end());
            let scope = self.manager.find_scope(self.file, span.start);
            let value = value.as_str().trim();
            let ty = self.infer(value, scope.kind, span.start);

            let symbol = Symbol::new(name.as_str(), ty, self.file, scope, span).with_value(value);
            let symbol = if keyword.as_str() == "defineConstant" {
                symbol.constant()
            } else {
                symbol.global()
            };
            self.add_symbol(symbol);
        }
    }

    fn scan_assignments(&mut self) {
        let text = self.text;
        for caps in ASSIGNMENT_RE.captures_iter(text) {
            let (Some(whole), Some(name), Some(value)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            let value = value.as_str().trim();
            // `==` comparisons
            if value.starts_with('=') {
                continue;
            }
            if inside_call_arguments(text, name.start()) {
                continue;
            }

            let span = self.span(name.start()..whole.end());
            let scope = self.manager.find_scope(self.file, span.start);
            let ty = self.infer(value, scope.kind, span.start);
            self.add_symbol(
                Symbol::new(name.as_str(), ty, self.file, scope, span).with_value(value),
            );
        }
    }

    fn scan_for_loops(&mut self) {
        let text = self.text;
        for caps in FOR_RE.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(sequence) = balanced_until_close(&text[whole.end()..]) else {
                continue;
            };
            let sequence = sequence.trim();

            let span = self.span(name.range());
            let scope = self.manager.find_scope(self.file, span.start);
            let sequence_ty = self.infer(sequence, scope.kind, span.start);
            let ty = element_of(&sequence_ty);
            self.add_symbol(
                Symbol::new(name.as_str(), ty, self.file, scope, span).with_value(sequence),
            );
        }
    }

    fn scan_functions(&mut self) {
        let text = self.text;
        for caps in FUNCTION_RE.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            let params = caps.get(3).map_or("", |m| m.as_str());
            let header = whole.as_str();
            let header_start = whole.start() + (header.len() - header.trim_start().len());
            let header_span = self.span(header_start..whole.end());

            let mut symbol = Symbol::new(
                name.as_str(),
                FUNCTION,
                self.file,
                Scope::global(),
                header_span,
            )
            .with_value(format!("function({})", params.trim()));
            if let Some(returns) = caps.get(1) {
                symbol.value = Some(format!(
                    "function ({}){}({})",
                    returns.as_str().trim(),
                    name.as_str(),
                    params.trim()
                ));
            }
            self.add_symbol(symbol);

            let body = find_block_range(text, whole.end());
            if body.is_empty() {
                tracing::debug!("[SCAN] {}: function {} has no body", self.file, name.as_str());
                continue;
            }
            let body_span = self.span(body);
            self.summary.scopes += 1;
            let scope_id = self
                .manager
                .push_scope(self.file, Scope::new(ScopeKind::Function, body_span));
            let Some(scope) = self.manager.scope(self.file, scope_id).cloned() else {
                self.manager.pop_scope(self.file);
                continue;
            };

            if let Some(params) = caps.get(3) {
                for param in parse_parameters(params.as_str(), params.start()) {
                    let span = self.span(param.name.clone());
                    let symbol = Symbol::new(
                        &text[param.name],
                        param.ty,
                        self.file,
                        scope.clone(),
                        span,
                    )
                    .parameter();
                    let symbol = match param.default {
                        Some(default) => symbol.with_value(default),
                        None => symbol,
                    };
                    self.add_symbol(symbol);
                }
            }
            self.manager.pop_scope(self.file);
        }
    }
}

/// Fill generation and subpopulation from a callback's argument list,
/// e.g. `early(10)` or `fitness(m1, p2)`.
fn apply_callback_arguments(info: &mut CallbackInfo, args: &str) {
    for arg in args.split(',').map(str::trim) {
        if SUBPOP_RE.is_match(arg) {
            info.subpopulation = Some(arg.into());
        } else if info.generation.is_none() {
            if let Ok(generation) = arg.parse() {
                info.generation = Some(generation);
            }
        }
    }
}

/// Whether `offset` sits inside unclosed parentheses of its statement, as
/// a named argument like `haploid=T` does.
///
/// The statement starts after the last `;`, `{` or `}` before `offset`, so
/// argument lists continued over several lines still count. Parentheses in
/// quoted strings do not.
fn inside_call_arguments(text: &str, offset: usize) -> bool {
    let statement_start = text[..offset]
        .rfind([';', '{', '}'])
        .map_or(0, |i| i + 1);

    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in text[statement_start..offset].chars() {
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
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    depth > 0
}

/// Text up to the `)` that closes an already open parenthesis.
fn balanced_until_close(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' if depth == 0 => return Some(&text[..i]),
            ')' | ']' => depth = depth.saturating_sub(1),
            '\n' if depth == 0 => return None,
            _ => {}
        }
    }
    None
}

/// Element type of a loop sequence: collections yield their element type,
/// single values themselves.
fn element_of(ty: &str) -> SmolStr {
    if let Some(element) = type_tag::collection_element(ty) {
        return element.into();
    }
    if type_tag::is_collection(ty) {
        return UNKNOWN.into();
    }
    ty.into()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Parameter {
    /// Byte range of the name in the document
    name: Range<usize>,
    ty: SmolStr,
    default: Option<String>,
}

/// Parse `integer x, [float y = 1.0], o<Individual> ind` starting at byte
/// `base` of the document.
fn parse_parameters(params: &str, base: usize) -> Vec<Parameter> {
    let mut parsed = Vec::new();
    let mut offset = 0;
    for raw in params.split(',') {
        let raw_start = base + offset;
        offset += raw.len() + 1;

        let (declaration, default) = match raw.split_once('=') {
            Some((decl, default)) => (decl, Some(default.trim().trim_end_matches(']').trim())),
            None => (raw, None),
        };
        let trimmed = declaration.trim().trim_start_matches('[').trim_end_matches(']').trim();
        if trimmed.is_empty() || trimmed == "void" {
            continue;
        }

        let mut words = trimmed.split_whitespace();
        let (ty, name) = match (words.next(), words.next()) {
            (Some(ty), Some(name)) => (normalize_declared_type(ty), name),
            (Some(name), None) => (SmolStr::new(UNKNOWN), name),
            _ => continue,
        };
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            continue;
        }
        let Some(local) = declaration.rfind(name) else {
            continue;
        };
        let start = raw_start + local;
        parsed.push(Parameter {
            name: start..start + name.len(),
            ty,
            default: default.filter(|d| !d.is_empty()).map(str::to_string),
        });
    }
    parsed
}

/// `integer$` → `integer`, `o<Individual>` → `Individual`, `i` → `integer`.
fn normalize_declared_type(declared: &str) -> SmolStr {
    let declared = declared.trim_end_matches('$');
    if let Some(class) = declared
        .strip_prefix("object<")
        .or_else(|| declared.strip_prefix("o<"))
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return class.into();
    }
    match declared {
        "i" => "integer",
        "f" => "float",
        "s" => "string",
        "l" => "logical",
        "o" | "object" => "object",
        "*" | "+" | "n" | "numeric" => UNKNOWN,
        other => other,
    }
    .into()
}
