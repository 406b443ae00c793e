use std::collections::HashSet;

use super::classify::classify_cardinality;
use super::sanitize::{sanitize_member, type_ident};
use super::types::{DataEntity, ValidationResult};

const PLACEHOLDER_ATTRIBUTE: &str = "id";

/// Generate a class diagram from data entities. This generator has no rules
/// of its own: free text that cannot be resolved is dropped rather than
/// reported, so the validation result is always neutral.
pub fn generate_class(entities: &[DataEntity]) -> (String, ValidationResult) {
    let mut validation = ValidationResult::neutral();
    validation.entity_count = entities.len();

    let mut out = String::new();
    out.push_str("classDiagram\n");

    if entities.is_empty() {
        out.push_str("    class Placeholder {\n");
        out.push_str("        no entities defined\n");
        out.push_str("    }\n");
        return (out, validation);
    }

    let idents = assign_idents(entities);

    for (entity, ident) in entities.iter().zip(&idents) {
        if *ident == entity.name {
            out.push_str(&format!("    class {} {{\n", ident));
        } else {
            out.push_str(&format!("    class {}[\"{}\"] {{\n", ident, entity.name));
        }
        let mut wrote_attribute = false;
        for attribute in &entity.attributes {
            let member = sanitize_member(attribute);
            if member.is_empty() {
                continue;
            }
            out.push_str(&format!("        {}\n", member));
            wrote_attribute = true;
        }
        if !wrote_attribute {
            out.push_str(&format!("        {}\n", PLACEHOLDER_ATTRIBUTE));
        }
        out.push_str("    }\n");
    }

    for (i, entity) in entities.iter().enumerate() {
        for sentence in &entity.relationships {
            if let Some(j) = resolve_target(i, sentence, entities) {
                let cardinality = classify_cardinality(sentence);
                let (from_marker, to_marker) = cardinality.markers();
                out.push_str(&format!(
                    "    {} \"{}\" --> \"{}\" {} : {}\n",
                    idents[i],
                    from_marker,
                    to_marker,
                    idents[j],
                    cardinality.label()
                ));
            }
        }
    }

    (out, validation)
}

/// Find the target of a relationship sentence: the first *other* entity
/// whose name appears in the sentence, case-insensitively. The originating
/// entity is excluded so self-referential phrasing never matches itself.
/// Sentences that mention no other entity resolve to nothing and the
/// sentence is dropped.
fn resolve_target(origin: usize, sentence: &str, entities: &[DataEntity]) -> Option<usize> {
    let lower = sentence.to_lowercase();
    entities
        .iter()
        .enumerate()
        .find(|(i, entity)| {
            *i != origin
                && !entity.name.trim().is_empty()
                && lower.contains(&entity.name.to_lowercase())
        })
        .map(|(i, _)| i)
}

fn assign_idents(entities: &[DataEntity]) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut idents = Vec::with_capacity(entities.len());
    for entity in entities {
        let base = type_ident(&entity.name);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while !taken.insert(candidate.clone()) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
        idents.push(candidate);
    }
    idents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, attributes: &[&str], relationships: &[&str]) -> DataEntity {
        DataEntity {
            name: name.to_string(),
            attributes: attributes.iter().map(|s| s.to_string()).collect(),
            relationships: relationships.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn belongs_to_produces_many_to_one_edge() {
        let entities = vec![
            entity("User", &["id", "email"], &[]),
            entity("Order", &["id", "total"], &["Order belongs to User"]),
        ];
        let (markup, validation) = generate_class(&entities);
        assert!(validation.passed);
        assert_eq!(validation.entity_count, 2);
        assert!(markup.contains("class User {"));
        assert!(markup.contains("Order \"*\" --> \"1\" User : belongs to"));
    }

    #[test]
    fn unresolved_sentences_are_dropped_silently() {
        let entities = vec![
            entity("User", &["id"], &["User dreams of electric sheep"]),
            entity("Order", &["id"], &[]),
        ];
        let (markup, validation) = generate_class(&entities);
        assert!(validation.passed);
        assert!(!markup.contains("-->"));
    }

    #[test]
    fn own_name_does_not_match_as_target() {
        let entities = vec![
            entity("Order", &["id"], &["Order contains Order lines"]),
            entity("User", &["id"], &[]),
        ];
        let (markup, _) = generate_class(&entities);
        assert!(!markup.contains("Order \"*\" --> \"*\" Order"));
    }

    #[test]
    fn entity_without_attributes_gets_placeholder() {
        let (markup, _) = generate_class(&[entity("Ghost", &[], &[])]);
        assert!(markup.contains("class Ghost {\n        id\n    }"));
    }

    #[test]
    fn zero_entities_still_produce_valid_markup() {
        let (markup, validation) = generate_class(&[]);
        assert!(markup.starts_with("classDiagram\n"));
        assert!(markup.contains("class Placeholder {"));
        assert!(validation.passed);
        assert_eq!(validation.entity_count, 0);
    }

    #[test]
    fn spaced_names_are_aliased() {
        let entities = vec![
            entity("Order Item", &["sku"], &[]),
            entity("Order", &["id"], &["Order has many Order Item rows"]),
        ];
        let (markup, _) = generate_class(&entities);
        assert!(markup.contains("class OrderItem[\"Order Item\"] {"));
        assert!(markup.contains("Order \"1\" --> \"*\" OrderItem : has many"));
    }
}
