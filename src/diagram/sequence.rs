/// Arrow tokens that only appear in sequence diagrams. A flowchart arrow
/// like `-->` is deliberately absent: on its own it is not evidence of a
/// sequence diagram.
const SEQUENCE_ARROWS: &[&str] = &["->>", "-->>", "-x", "--x", "-)", "--)"];

/// Classify whether a markup blob is a Mermaid sequence diagram.
///
/// Checked in order: the declaration keyword at the top, the keyword
/// anywhere on its own line (tolerating a preceding init directive), and
/// finally a heuristic requiring *both* a participant/actor declaration and
/// a sequence-specific arrow token.
pub fn is_sequence_diagram(markup: &str) -> bool {
    if markup.trim_start().starts_with("sequenceDiagram") {
        return true;
    }
    if markup.lines().any(|line| line.trim() == "sequenceDiagram") {
        return true;
    }

    let mut has_participant = false;
    let mut has_arrow = false;
    for line in markup.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("participant ") || trimmed.starts_with("actor ") {
            has_participant = true;
        }
        if SEQUENCE_ARROWS.iter().any(|arrow| line.contains(arrow)) {
            has_arrow = true;
        }
        if has_participant && has_arrow {
            return true;
        }
    }
    false
}

/// Remove style-class directives from sequence-diagram markup, where that
/// dialect does not support them: `classDef` lines, `class` assignment
/// lines and inline `:::class` annotations. Markup that is not a sequence
/// diagram is returned unchanged, since those directives are valid in other
/// dialects. Safe to call unconditionally and idempotent.
pub fn clean_sequence_syntax(markup: &str) -> String {
    if !is_sequence_diagram(markup) {
        return markup.to_string();
    }

    let mut lines = Vec::new();
    for line in markup.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("classDef ") || trimmed.starts_with("class ") {
            continue;
        }
        match line.find(":::") {
            Some(pos) => lines.push(line[..pos].trim_end()),
            None => lines.push(line),
        }
    }

    let mut cleaned = lines.join("\n");
    if markup.ends_with('\n') && !cleaned.ends_with('\n') {
        cleaned.push('\n');
    }
    cleaned
}
