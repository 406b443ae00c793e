use std::collections::HashSet;

use super::sanitize::{escape_label, normalize_id};
use super::types::{ContextElement, ElementCategory, Finding, InteractionDirection, ValidationResult};

/// Fewest external elements a compliant context diagram may have.
/// Below this the decomposition is considered too coarse.
pub const MIN_ELEMENTS: usize = 8;
/// Most external elements a compliant context diagram may have.
pub const MAX_ELEMENTS: usize = 20;

const MIN_CATEGORY_SPREAD: usize = 3;

/// Default system label. Deliberately generic: naming the actual product
/// this early anchors the conversation on a solution instead of the problem.
pub const DEFAULT_SYSTEM_LABEL: &str = "The System";

/// Names too generic to say anything about the element behind them
const GENERIC_NAMES: &[&str] = &[
    "users", "system", "data", "people", "things", "stuff", "misc", "other",
];

/// Collective nouns that usually hide several distinct actor roles
const COLLECTIVE_ACTOR_NAMES: &[&str] = &[
    "customers",
    "employees",
    "staff",
    "stakeholders",
    "members",
    "clients",
    "partners",
    "vendors",
];

/// Run every context-diagram rule and report all violations together.
/// Rules are independent; none short-circuits another.
pub fn validate_context(elements: &[ContextElement]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let n = elements.len();
    if n < MIN_ELEMENTS {
        errors.push(Finding::new(
            "CX01",
            format!("context diagram needs at least {MIN_ELEMENTS} elements, found {n}"),
        ));
    }
    if n > MAX_ELEMENTS {
        errors.push(Finding::new(
            "CX02",
            format!("context diagram allows at most {MAX_ELEMENTS} elements, found {n}"),
        ));
    }

    for element in elements {
        if element.interactions.is_empty() {
            errors.push(Finding::new(
                "CX03",
                format!("element '{}' has no interactions with the system", element.name),
            ));
        }
    }

    let mut seen = HashSet::new();
    for element in elements {
        if !seen.insert(element.name.to_lowercase()) {
            errors.push(Finding::new(
                "CX04",
                format!("duplicate element name '{}'", element.name),
            ));
        }
    }

    for element in elements {
        for interaction in &element.interactions {
            if interaction.label.chars().any(char::is_uppercase) {
                errors.push(Finding::new(
                    "CX05",
                    format!(
                        "interaction label '{}' on element '{}' must be lower-case",
                        interaction.label, element.name
                    ),
                ));
            }
        }
    }

    let categories: HashSet<_> = elements.iter().map(|e| e.category).collect();
    if categories.len() < MIN_CATEGORY_SPREAD {
        warnings.push(Finding::new(
            "CX06",
            format!(
                "only {} element categories represented, aim for at least {MIN_CATEGORY_SPREAD}",
                categories.len()
            ),
        ));
    }

    for element in elements {
        let lower = element.name.trim().to_lowercase();
        if GENERIC_NAMES.contains(&lower.as_str()) {
            warnings.push(Finding::new(
                "CX07",
                format!("element name '{}' is too generic to be useful", element.name),
            ));
        }
    }

    for element in elements {
        if element.category != ElementCategory::Actor {
            continue;
        }
        let lower = element.name.trim().to_lowercase();
        if COLLECTIVE_ACTOR_NAMES.contains(&lower.as_str()) {
            warnings.push(Finding::new(
                "CX08",
                format!(
                    "actor '{}' is a collective noun, split it into concrete sub-roles",
                    element.name
                ),
            ));
        }
    }

    let mut result = ValidationResult::from_findings(errors, warnings);
    result.element_count = n;
    result
}

/// Strict generation path: full validation plus complete markup.
/// Markup is produced even when validation fails, so callers can preview
/// a non-compliant diagram alongside its remediation list.
pub fn generate_context(
    system_label: &str,
    elements: &[ContextElement],
) -> (String, ValidationResult) {
    (emit(system_label, elements, None), validate_context(elements))
}

/// Relaxed generation path for data still being gathered: renders whatever
/// is available under a draft comment and skips the strict validator.
pub fn generate_context_draft(
    system_label: &str,
    elements: &[ContextElement],
) -> (String, ValidationResult) {
    let note = format!(
        "draft context: {} of {} required elements captured",
        elements.len(),
        MIN_ELEMENTS
    );
    let mut validation = ValidationResult::neutral();
    validation.element_count = elements.len();
    (emit(system_label, elements, Some(&note)), validation)
}

fn emit(system_label: &str, elements: &[ContextElement], draft_note: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(note) = draft_note {
        out.push_str(&format!("%% {}\n", note));
    }
    out.push_str("flowchart TB\n");
    out.push_str("    subgraph boundary[\" \"]\n");
    out.push_str(&format!("        sys([\"{}\"])\n", escape_label(system_label)));
    out.push_str("    end\n");

    let ids = assign_element_ids(elements);

    if elements.is_empty() {
        out.push_str("    empty[\"No context elements captured yet\"]\n");
    }
    for (element, id) in elements.iter().zip(&ids) {
        out.push_str(&format!("    {}[\"{}\"]\n", id, escape_label(&element.name)));
    }

    for (element, id) in elements.iter().zip(&ids) {
        for interaction in &element.interactions {
            let label = interaction.label.trim();
            match interaction.direction {
                InteractionDirection::Inbound => {
                    out.push_str(&edge(id, "sys", label));
                }
                InteractionDirection::Outbound => {
                    out.push_str(&edge("sys", id, label));
                }
                InteractionDirection::Bidirectional => {
                    let (to_system, from_system) = split_bidirectional(label);
                    out.push_str(&edge(id, "sys", to_system));
                    out.push_str(&edge("sys", id, from_system));
                }
            }
        }
    }

    // Monochrome, two visual weights: a hard compliance requirement of the
    // methodology, not a styling preference.
    out.push_str("    classDef system fill:#ffffff,stroke:#000000,stroke-width:3px\n");
    out.push_str("    classDef element fill:#ffffff,stroke:#000000,stroke-width:1px\n");
    out.push_str("    class sys system\n");
    if !ids.is_empty() {
        out.push_str(&format!("    class {} element\n", ids.join(",")));
    }
    out.push_str("    style boundary fill:none,stroke:#000000,stroke-dasharray: 5 5\n");
    out
}

fn edge(from: &str, to: &str, label: &str) -> String {
    if label.is_empty() {
        format!("    {} --> {}\n", from, to)
    } else {
        format!("    {} -->|\"{}\"| {}\n", from, escape_label(label), to)
    }
}

/// A bidirectional label splits on its first comma into the two phrases for
/// each direction; without a comma the same phrase is used both ways.
fn split_bidirectional(label: &str) -> (&str, &str) {
    match label.split_once(',') {
        Some((first, second)) if !second.trim().is_empty() => (first.trim(), second.trim()),
        _ => (label, label),
    }
}

/// Stable, collision-free node ids in element order. The `e_` prefix keeps
/// element ids out of the namespace used by `sys` and `boundary`.
fn assign_element_ids(elements: &[ContextElement]) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut ids = Vec::with_capacity(elements.len());
    for element in elements {
        let base = format!("e_{}", normalize_id(&element.name));
        let mut candidate = base.clone();
        let mut suffix = 2;
        while !taken.insert(candidate.clone()) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        ids.push(candidate);
    }
    ids
}
