use smol_str::SmolStr;

use crate::base::Span;

/// Index of a scope in its document's scope arena.
///
/// Index 0 is always the document's root global scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

/// What kind of lexical region a scope is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Block,
    Function,
    // Simulation callbacks
    Initialize,
    First,
    Early,
    Late,
    Fitness,
    MutationEffect,
    Interaction,
    MateChoice,
    ModifyChild,
    Reproduction,
    Mutation,
    Recombination,
    Survival,
}

impl ScopeKind {
    /// Keywords that open a simulation callback block.
    pub const CALLBACK_KEYWORDS: &'static [&'static str] = &[
        "initialize",
        "first",
        "early",
        "late",
        "fitness",
        "mutationEffect",
        "interaction",
        "mateChoice",
        "modifyChild",
        "reproduction",
        "mutation",
        "recombination",
        "survival",
    ];

    /// The callback kind opened by `keyword`, if any.
    pub fn from_callback_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "initialize" => Self::Initialize,
            "first" => Self::First,
            "early" => Self::Early,
            "late" => Self::Late,
            "fitness" => Self::Fitness,
            "mutationEffect" => Self::MutationEffect,
            "interaction" => Self::Interaction,
            "mateChoice" => Self::MateChoice,
            "modifyChild" => Self::ModifyChild,
            "reproduction" => Self::Reproduction,
            "mutation" => Self::Mutation,
            "recombination" => Self::Recombination,
            "survival" => Self::Survival,
            _ => return None,
        })
    }

    pub fn is_callback(self) -> bool {
        !matches!(self, Self::Global | Self::Block | Self::Function)
    }

    /// Ranking used to break ties between scopes of equal size.
    ///
    /// Callbacks rank above functions, functions above blocks, blocks above
    /// the global scope. All callback kinds share one tier, so two
    /// same-sized callbacks keep their registration order.
    pub fn specificity(self) -> u8 {
        match self {
            Self::Global => 0,
            Self::Block => 1,
            Self::Function => 2,
            _ => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Block => "block",
            Self::Function => "function",
            Self::Initialize => "initialize",
            Self::First => "first",
            Self::Early => "early",
            Self::Late => "late",
            Self::Fitness => "fitness",
            Self::MutationEffect => "mutationEffect",
            Self::Interaction => "interaction",
            Self::MateChoice => "mateChoice",
            Self::ModifyChild => "modifyChild",
            Self::Reproduction => "reproduction",
            Self::Mutation => "mutation",
            Self::Recombination => "recombination",
            Self::Survival => "survival",
        }
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header metadata of a simulation callback block, e.g. `s2 100:200 late()`
/// or `fitness(m1, p1)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackInfo {
    /// Script block id (`s2`)
    pub block_id: Option<SmolStr>,
    /// First generation the callback runs in
    pub generation: Option<u64>,
    /// Last generation of a `start:end` range
    pub end_generation: Option<u64>,
    /// Subpopulation argument (`p1`)
    pub subpopulation: Option<SmolStr>,
    /// Species named by a `species`/`ticks` specifier
    pub species: Option<SmolStr>,
}

/// A lexical region of a document.
///
/// Children point at their parent through [`ScopeId`]; parents do not
/// track children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub span: Span,
    pub parent: Option<ScopeId>,
    pub callback: Option<CallbackInfo>,
}

impl Scope {
    /// A scope that is not yet registered; the manager assigns its id.
    pub fn new(kind: ScopeKind, span: Span) -> Self {
        Self {
            id: ScopeId::ROOT,
            kind,
            span,
            parent: None,
            callback: None,
        }
    }

    /// The synthetic whole-document global scope.
    pub fn global() -> Self {
        Self::new(ScopeKind::Global, Span::whole_document())
    }

    pub fn with_parent(mut self, parent: ScopeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_callback(mut self, callback: CallbackInfo) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Human-readable label, e.g. `late (generation 10, p1)`.
    pub fn describe(&self) -> String {
        let Some(ref cb) = self.callback else {
            return self.kind.as_str().to_string();
        };
        let mut details = Vec::new();
        match (cb.generation, cb.end_generation) {
            (Some(start), Some(end)) => details.push(format!("generations {start}:{end}")),
            (Some(start), None) => details.push(format!("generation {start}")),
            _ => {}
        }
        if let Some(ref sub) = cb.subpopulation {
            details.push(sub.to_string());
        }
        if let Some(ref species) = cb.species {
            details.push(format!("species {species}"));
        }
        if details.is_empty() {
            self.kind.as_str().to_string()
        } else {
            format!("{} ({})", self.kind, details.join(", "))
        }
    }
}
