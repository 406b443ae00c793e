use crate::diagram::ValidationResult;

/// Render a validation result as plain text for terminal output: status
/// line, then every error, then every warning, then the non-zero counters.
pub fn render_text(result: &ValidationResult) -> String {
    let mut out = String::new();
    let status = if result.passed { "passed" } else { "failed" };
    out.push_str(&format!(
        "validation {} ({} errors, {} warnings)\n",
        status,
        result.errors.len(),
        result.warnings.len()
    ));
    for finding in &result.errors {
        out.push_str(&format!("  error {}: {}\n", finding.code, finding.message));
    }
    for finding in &result.warnings {
        out.push_str(&format!("  warning {}: {}\n", finding.code, finding.message));
    }

    let counters = [
        ("elements", result.element_count),
        ("actors", result.actor_count),
        ("use cases", result.use_case_count),
        ("entities", result.entity_count),
    ];
    for (label, count) in counters {
        if count > 0 {
            out.push_str(&format!("  {}: {}\n", label, count));
        }
    }
    out
}
