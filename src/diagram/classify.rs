use super::types::{ElementCategory, InteractionDirection};

/// Cardinality of a class-diagram relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    /// Multiplicity markers for the (source, target) ends of an edge
    pub fn markers(self) -> (&'static str, &'static str) {
        match self {
            Cardinality::OneToOne => ("1", "1"),
            Cardinality::OneToMany => ("1", "*"),
            Cardinality::ManyToOne => ("*", "1"),
            Cardinality::ManyToMany => ("*", "*"),
        }
    }

    /// The templated edge label for this cardinality
    pub fn label(self) -> &'static str {
        match self {
            Cardinality::OneToOne => "has one",
            Cardinality::OneToMany => "has many",
            Cardinality::ManyToOne => "belongs to",
            Cardinality::ManyToMany => "relates to",
        }
    }
}

/// Classify the cardinality of a free-text relationship sentence by phrase
/// containment. Check order is part of the contract: more specific phrases
/// are tested before more general ones, and anything unmatched falls through
/// to many-to-many.
pub fn classify_cardinality(sentence: &str) -> Cardinality {
    let s = sentence.to_lowercase();
    if s.contains("has many") || s.contains("have many") {
        Cardinality::OneToMany
    } else if s.contains("belongs to") {
        Cardinality::ManyToOne
    } else if s.contains("has one") || s.contains("has a") {
        Cardinality::OneToOne
    } else {
        Cardinality::ManyToMany
    }
}

/// Keyword table for element-category inference, first containment wins.
/// Order matters: specific terms sit above the generic terms they contain
/// or co-occur with ("payment" must be tested before "gateway", "regulator"
/// before "user"), so reordering silently changes classifications.
const CATEGORY_PATTERNS: &[(&str, ElementCategory)] = &[
    ("payment", ElementCategory::Service),
    ("gateway", ElementCategory::Infrastructure),
    ("regulator", ElementCategory::Regulation),
    ("compliance", ElementCategory::Regulation),
    ("gdpr", ElementCategory::Regulation),
    ("policy", ElementCategory::Regulation),
    ("legal", ElementCategory::Regulation),
    ("database", ElementCategory::Infrastructure),
    ("server", ElementCategory::Infrastructure),
    ("storage", ElementCategory::Infrastructure),
    ("network", ElementCategory::Infrastructure),
    ("cloud", ElementCategory::Infrastructure),
    ("weather", ElementCategory::Environment),
    ("market", ElementCategory::Environment),
    ("environment", ElementCategory::Environment),
    ("api", ElementCategory::Service),
    ("provider", ElementCategory::Service),
    ("service", ElementCategory::Service),
    ("admin", ElementCategory::Actor),
    ("customer", ElementCategory::Actor),
    ("user", ElementCategory::Actor),
    ("manager", ElementCategory::Actor),
    ("operator", ElementCategory::Actor),
    ("staff", ElementCategory::Actor),
    ("platform", ElementCategory::System),
    ("app", ElementCategory::System),
    ("system", ElementCategory::System),
];

/// Infer the category of a context element from its name.
/// Unmatched names default to `System`, the most common kind of external
/// element arriving through the legacy flat lists.
pub fn infer_category(name: &str) -> ElementCategory {
    let lower = name.to_lowercase();
    for (pattern, category) in CATEGORY_PATTERNS {
        if lower.contains(pattern) {
            return *category;
        }
    }
    ElementCategory::System
}

const BIDIRECTIONAL_MARKERS: &[&str] = &["exchange", "sync", "negotiat", "collaborat"];
const INBOUND_MARKERS: &[&str] = &["sends", "submits", "provides", "uploads", "reports", "requests"];
const OUTBOUND_MARKERS: &[&str] = &["receives", "gets", "views", "downloads", "consumes"];

/// Infer the direction of an interaction from its phrasing, seen from the
/// element's side. Explicit two-way verbs are tested first; a phrase that
/// matches both remaining marker sets is also treated as bidirectional, and
/// so is one that matches neither.
pub fn infer_direction(label: &str) -> InteractionDirection {
    let s = label.to_lowercase();
    if BIDIRECTIONAL_MARKERS.iter().any(|m| s.contains(m)) {
        return InteractionDirection::Bidirectional;
    }
    let inbound = INBOUND_MARKERS.iter().any(|m| s.contains(m));
    let outbound = OUTBOUND_MARKERS.iter().any(|m| s.contains(m));
    match (inbound, outbound) {
        (true, false) => InteractionDirection::Inbound,
        (false, true) => InteractionDirection::Outbound,
        _ => InteractionDirection::Bidirectional,
    }
}
