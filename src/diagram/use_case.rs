use std::collections::{HashMap, HashSet};

use super::sanitize::{escape_label, normalize_id};
use super::types::{Actor, ActorType, Finding, GenerateOptions, UseCase, ValidationResult};

const MAX_READABLE_USE_CASES: usize = 15;

const DEFAULT_BOUNDARY_LABEL: &str = "The System";

/// Run every use-case rule and report all violations together.
pub fn validate_use_cases(actors: &[Actor], use_cases: &[UseCase]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if actors.is_empty() {
        errors.push(Finding::new("UC01", "no actors defined"));
    }
    if use_cases.is_empty() {
        errors.push(Finding::new("UC02", "no use cases defined"));
    }

    for uc in use_cases {
        if !actors.iter().any(|a| a.name.eq_ignore_ascii_case(&uc.actor)) {
            errors.push(Finding::new(
                "UC03",
                format!("use case '{}' references unknown actor '{}'", uc.name, uc.actor),
            ));
        }
    }

    let by_id: HashMap<&str, &UseCase> =
        use_cases.iter().map(|uc| (uc.id.as_str(), uc)).collect();

    // Each use case is checked independently so every entry point of a
    // multi-member cycle produces its own finding.
    for uc in use_cases {
        if include_cycle(uc, &by_id) {
            errors.push(Finding::new(
                "UC04",
                format!("use case '{}' is part of an include cycle", uc.name),
            ));
        }
    }
    for uc in use_cases {
        if extends_cycle(uc, &by_id) {
            errors.push(Finding::new(
                "UC05",
                format!("use case '{}' is part of an extends cycle", uc.name),
            ));
        }
    }

    for actor in actors {
        let referenced = use_cases
            .iter()
            .any(|uc| uc.actor.eq_ignore_ascii_case(&actor.name));
        if !referenced {
            warnings.push(Finding::new(
                "UC06",
                format!("actor '{}' has no associated use cases", actor.name),
            ));
        }
    }

    for uc in use_cases {
        if uc.description.trim().is_empty() {
            warnings.push(Finding::new(
                "UC07",
                format!("use case '{}' has no description", uc.name),
            ));
        }
    }

    if use_cases.len() > MAX_READABLE_USE_CASES {
        warnings.push(Finding::new(
            "UC08",
            format!(
                "{} use cases exceed the readable limit of {MAX_READABLE_USE_CASES}, consider splitting the diagram",
                use_cases.len()
            ),
        ));
    }

    let mut seen = HashSet::new();
    for uc in use_cases {
        if !seen.insert(uc.name.to_lowercase()) {
            warnings.push(Finding::new(
                "UC09",
                format!("duplicate use case name '{}'", uc.name),
            ));
        }
    }

    let mut result = ValidationResult::from_findings(errors, warnings);
    result.actor_count = actors.len();
    result.use_case_count = use_cases.len();
    result
}

/// Reachability test over the include graph, starting from the direct
/// includes of `start`. References to unknown ids are skipped here; the
/// validator reports them separately as unresolved.
fn include_cycle(start: &UseCase, by_id: &HashMap<&str, &UseCase>) -> bool {
    let mut stack: Vec<&str> = start.includes.iter().map(String::as_str).collect();
    let mut visited = HashSet::new();
    while let Some(id) = stack.pop() {
        if id == start.id {
            return true;
        }
        if !visited.insert(id) {
            continue;
        }
        if let Some(uc) = by_id.get(id) {
            stack.extend(uc.includes.iter().map(String::as_str));
        }
    }
    false
}

/// The extends relation is single-valued, so cycle detection is a pointer
/// chase with a visited set.
fn extends_cycle(start: &UseCase, by_id: &HashMap<&str, &UseCase>) -> bool {
    let mut visited = HashSet::new();
    let mut current = start.extends.as_deref();
    while let Some(id) = current {
        if id == start.id {
            return true;
        }
        if !visited.insert(id) {
            return false;
        }
        current = by_id.get(id).and_then(|uc| uc.extends.as_deref());
    }
    false
}

/// Generate the use-case diagram and its validation result. Markup is
/// produced even when validation fails; relationship edges whose endpoints
/// do not resolve are dropped from markup (the validator has already
/// reported them).
pub fn generate_use_cases(
    actors: &[Actor],
    use_cases: &[UseCase],
    options: &GenerateOptions,
) -> (String, ValidationResult) {
    let validation = validate_use_cases(actors, use_cases);
    (emit(actors, use_cases, options), validation)
}

fn emit(actors: &[Actor], use_cases: &[UseCase], options: &GenerateOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("flowchart {}\n", options.direction.token()));

    if actors.is_empty() && use_cases.is_empty() {
        out.push_str("    empty[\"No actors or use cases captured yet\"]\n");
        return out;
    }

    let actor_ids = assign_ids(actors.iter().map(|a| a.name.as_str()), "a_");
    let uc_ids = assign_ids(use_cases.iter().map(|uc| uc.id.as_str()), "u_");
    let uc_index: HashMap<&str, usize> = use_cases
        .iter()
        .enumerate()
        .map(|(i, uc)| (uc.id.as_str(), i))
        .collect();

    for (actor, id) in actors.iter().zip(&actor_ids) {
        let label = if options.show_actor_roles && !actor.role.trim().is_empty() {
            format!("{} ({})", actor.name, actor.role.trim())
        } else {
            actor.name.clone()
        };
        out.push_str(&format!("    {}[\"{}\"]\n", id, escape_label(&label)));
    }

    if !use_cases.is_empty() {
        let boundary_label = options
            .system_label
            .as_deref()
            .unwrap_or(DEFAULT_BOUNDARY_LABEL);
        let indent = if options.system_boundary {
            out.push_str(&format!(
                "    subgraph system[\"{}\"]\n",
                escape_label(boundary_label)
            ));
            "        "
        } else {
            "    "
        };

        if options.group_by_category {
            emit_grouped_use_cases(&mut out, use_cases, &uc_ids, indent);
        } else {
            for (uc, id) in use_cases.iter().zip(&uc_ids) {
                out.push_str(&format!("{}{}([\"{}\"])\n", indent, id, escape_label(&uc.name)));
            }
        }

        if options.system_boundary {
            out.push_str("    end\n");
        }
    }

    // One association edge per use case, solid for primary actors, dashed
    // for secondary and external ones.
    for (uc, uc_id) in use_cases.iter().zip(&uc_ids) {
        let actor_pos = actors
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(&uc.actor));
        if let Some(pos) = actor_pos {
            let arrow = match actors[pos].actor_type {
                ActorType::Primary => "-->",
                ActorType::Secondary | ActorType::External => "-.->",
            };
            out.push_str(&format!("    {} {} {}\n", actor_ids[pos], arrow, uc_id));
        }
    }

    for (source, target, label) in relationship_edges(use_cases, &uc_ids, &uc_index) {
        out.push_str(&format!("    {} -.->|\"{}\"| {}\n", source, label, target));
    }

    emit_styles(&mut out, actors, &actor_ids, &uc_ids);
    out
}

fn emit_grouped_use_cases(out: &mut String, use_cases: &[UseCase], uc_ids: &[String], indent: &str) {
    // Categories keep their first-appearance order.
    let mut order: Vec<&str> = Vec::new();
    for uc in use_cases {
        if let Some(category) = uc.category.as_deref() {
            if !order.contains(&category) {
                order.push(category);
            }
        }
    }

    for (uc, id) in use_cases.iter().zip(uc_ids) {
        if uc.category.is_none() {
            out.push_str(&format!("{}{}([\"{}\"])\n", indent, id, escape_label(&uc.name)));
        }
    }
    for category in order {
        out.push_str(&format!(
            "{}subgraph g_{}[\"{}\"]\n",
            indent,
            normalize_id(category),
            escape_label(category)
        ));
        for (uc, id) in use_cases.iter().zip(uc_ids) {
            if uc.category.as_deref() == Some(category) {
                out.push_str(&format!("{}    {}([\"{}\"])\n", indent, id, escape_label(&uc.name)));
            }
        }
        out.push_str(&format!("{}end\n", indent));
    }
}

/// Collect the four relationship edge kinds in declaration order, dropping
/// unresolved endpoints and exact duplicates.
fn relationship_edges<'a>(
    use_cases: &[UseCase],
    uc_ids: &'a [String],
    uc_index: &HashMap<&str, usize>,
) -> Vec<(&'a str, &'a str, &'static str)> {
    fn push<'b>(
        edges: &mut Vec<(&'b str, &'b str, &'static str)>,
        source: &'b str,
        target: &'b str,
        label: &'static str,
    ) {
        let edge = (source, target, label);
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    let mut edges: Vec<(&str, &str, &'static str)> = Vec::new();
    for (i, uc) in use_cases.iter().enumerate() {
        for included in &uc.includes {
            if let Some(&j) = uc_index.get(included.as_str()) {
                push(&mut edges, &uc_ids[i], &uc_ids[j], "include");
            }
        }
        if let Some(base) = uc.extends.as_deref() {
            if let Some(&j) = uc_index.get(base) {
                push(&mut edges, &uc_ids[i], &uc_ids[j], "extends");
            }
        }
        for extending in &uc.extended_by {
            if let Some(&j) = uc_index.get(extending.as_str()) {
                push(&mut edges, &uc_ids[j], &uc_ids[i], "extends");
            }
        }
        if let Some(parent) = uc.generalizes.as_deref() {
            if let Some(&j) = uc_index.get(parent) {
                push(&mut edges, &uc_ids[i], &uc_ids[j], "generalizes");
            }
        }
        if let Some(trigger) = uc.triggered_by.as_deref() {
            if let Some(&j) = uc_index.get(trigger) {
                push(&mut edges, &uc_ids[j], &uc_ids[i], "trigger");
            }
        }
    }
    edges
}

fn emit_styles(out: &mut String, actors: &[Actor], actor_ids: &[String], uc_ids: &[String]) {
    out.push_str("    classDef primaryActor fill:#ffffff,stroke:#000000,stroke-width:2px\n");
    out.push_str(
        "    classDef secondaryActor fill:#ffffff,stroke:#000000,stroke-width:1px,stroke-dasharray: 5 5\n",
    );
    out.push_str("    classDef usecase fill:#ffffff,stroke:#000000,stroke-width:1px\n");

    let primary: Vec<&str> = actors
        .iter()
        .zip(actor_ids)
        .filter(|(a, _)| a.actor_type == ActorType::Primary)
        .map(|(_, id)| id.as_str())
        .collect();
    let secondary: Vec<&str> = actors
        .iter()
        .zip(actor_ids)
        .filter(|(a, _)| a.actor_type != ActorType::Primary)
        .map(|(_, id)| id.as_str())
        .collect();

    if !primary.is_empty() {
        out.push_str(&format!("    class {} primaryActor\n", primary.join(",")));
    }
    if !secondary.is_empty() {
        out.push_str(&format!("    class {} secondaryActor\n", secondary.join(",")));
    }
    if !uc_ids.is_empty() {
        out.push_str(&format!("    class {} usecase\n", uc_ids.join(",")));
    }
}

fn assign_ids<'a>(names: impl Iterator<Item = &'a str>, prefix: &str) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut ids = Vec::new();
    for name in names {
        let base = format!("{}{}", prefix, normalize_id(name));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::types::FlowDirection;

    fn actor(name: &str) -> Actor {
        Actor {
            name: name.to_string(),
            role: String::new(),
            actor_type: ActorType::Primary,
            position: None,
        }
    }

    fn use_case(id: &str, name: &str, actor: &str) -> UseCase {
        UseCase {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            actor: actor.to_string(),
            includes: Vec::new(),
            extended_by: Vec::new(),
            extends: None,
            generalizes: None,
            triggered_by: None,
            category: None,
        }
    }

    #[test]
    fn extends_between_resolved_use_cases_emits_one_edge() {
        let actors = vec![actor("Customer"), actor("Admin")];
        let mut uc3 = use_case("UC3", "Filtered browse", "Customer");
        uc3.extends = Some("UC1".to_string());
        let use_cases = vec![
            use_case("UC1", "Browse catalog", "Customer"),
            use_case("UC2", "Manage inventory", "Admin"),
            uc3,
        ];

        let (markup, validation) =
            generate_use_cases(&actors, &use_cases, &GenerateOptions::default());
        assert!(validation.passed);
        let extends_edges = markup
            .lines()
            .filter(|l| l.contains("-.->|\"extends\"|"))
            .count();
        assert_eq!(extends_edges, 1);
        assert!(markup.contains("u_uc3 -.->|\"extends\"| u_uc1"));
    }

    #[test]
    fn include_cycle_reports_every_member() {
        let actors = vec![actor("Customer")];
        let mut a = use_case("A", "First", "Customer");
        a.includes = vec!["B".to_string()];
        let mut b = use_case("B", "Second", "Customer");
        b.includes = vec!["A".to_string()];

        let result = validate_use_cases(&actors, &[a, b]);
        assert!(!result.passed);
        assert_eq!(result.errors.iter().filter(|f| f.code == "UC04").count(), 2);
    }

    #[test]
    fn extends_cycle_is_detected() {
        let actors = vec![actor("Customer")];
        let mut a = use_case("A", "First", "Customer");
        a.extends = Some("B".to_string());
        let mut b = use_case("B", "Second", "Customer");
        b.extends = Some("A".to_string());

        let result = validate_use_cases(&actors, &[a, b]);
        assert!(!result.passed);
        assert_eq!(result.errors.iter().filter(|f| f.code == "UC05").count(), 2);
    }

    #[test]
    fn unknown_actor_is_an_error_and_drops_the_association() {
        let actors = vec![actor("Customer")];
        let use_cases = vec![use_case("UC1", "Browse", "Ghost")];
        let (markup, validation) =
            generate_use_cases(&actors, &use_cases, &GenerateOptions::default());
        assert!(validation.errors.iter().any(|f| f.code == "UC03"));
        assert!(!markup.contains("a_customer -->"));
        // The use case itself still renders.
        assert!(markup.contains("u_uc1([\"Browse\"])"));
    }

    #[test]
    fn extended_by_generalizes_and_trigger_edges() {
        let actors = vec![actor("Customer")];
        let mut base = use_case("UC1", "Checkout", "Customer");
        base.extended_by = vec!["UC2".to_string()];
        let mut gift = use_case("UC2", "Gift checkout", "Customer");
        gift.generalizes = Some("UC1".to_string());
        let mut notify = use_case("UC3", "Notify warehouse", "Customer");
        notify.triggered_by = Some("UC1".to_string());

        let (markup, _) =
            generate_use_cases(&actors, &[base, gift, notify], &GenerateOptions::default());
        assert!(markup.contains("u_uc2 -.->|\"extends\"| u_uc1"));
        assert!(markup.contains("u_uc2 -.->|\"generalizes\"| u_uc1"));
        assert!(markup.contains("u_uc1 -.->|\"trigger\"| u_uc3"));
    }

    #[test]
    fn unresolved_relationship_ids_are_dropped_from_markup() {
        let actors = vec![actor("Customer")];
        let mut uc = use_case("UC1", "Browse", "Customer");
        uc.includes = vec!["NOPE".to_string()];
        let (markup, _) = generate_use_cases(&actors, &[uc], &GenerateOptions::default());
        assert!(!markup.contains("include"));
    }

    #[test]
    fn soft_checks_warn_without_failing() {
        let actors = vec![actor("Customer"), actor("Bystander")];
        let mut uc = use_case("UC1", "Browse", "Customer");
        uc.description = String::new();
        let result = validate_use_cases(&actors, &[uc]);
        assert!(result.passed);
        assert!(result.warnings.iter().any(|f| f.code == "UC06"));
        assert!(result.warnings.iter().any(|f| f.code == "UC07"));
    }

    #[test]
    fn too_many_use_cases_and_duplicate_names_warn() {
        let actors = vec![actor("Customer")];
        let mut use_cases: Vec<UseCase> = (0..16)
            .map(|i| use_case(&format!("UC{}", i), &format!("Case {}", i), "Customer"))
            .collect();
        use_cases[1].name = "case 0".to_string();
        let result = validate_use_cases(&actors, &use_cases);
        assert!(result.warnings.iter().any(|f| f.code == "UC08"));
        assert!(result.warnings.iter().any(|f| f.code == "UC09"));
    }

    #[test]
    fn empty_input_yields_placeholder_with_errors() {
        let (markup, validation) = generate_use_cases(&[], &[], &GenerateOptions::default());
        assert!(markup.contains("No actors or use cases captured yet"));
        assert!(!validation.passed);
        assert!(validation.errors.iter().any(|f| f.code == "UC01"));
        assert!(validation.errors.iter().any(|f| f.code == "UC02"));
    }

    #[test]
    fn options_shape_the_markup() {
        let mut customer = actor("Customer");
        customer.role = "shopper".to_string();
        let mut helper = actor("Support Bot");
        helper.actor_type = ActorType::Secondary;
        let mut browse = use_case("UC1", "Browse", "Customer");
        browse.category = Some("Shopping".to_string());
        let mut assist = use_case("UC2", "Assist", "Support Bot");
        assist.category = Some("Support".to_string());

        let options = GenerateOptions {
            direction: FlowDirection::TopDown,
            system_boundary: true,
            show_actor_roles: true,
            group_by_category: true,
            system_label: Some("Shop".to_string()),
        };
        let (markup, _) =
            generate_use_cases(&[customer, helper], &[browse, assist], &options);
        assert!(markup.starts_with("flowchart TB\n"));
        assert!(markup.contains("a_customer[\"Customer (shopper)\"]"));
        assert!(markup.contains("subgraph system[\"Shop\"]"));
        assert!(markup.contains("subgraph g_shopping[\"Shopping\"]"));
        assert!(markup.contains("a_support_bot -.-> u_uc2"));
        assert!(markup.contains("class a_support_bot secondaryActor"));
    }
}
