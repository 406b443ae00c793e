use std::path::Path;

use crate::diagram::GenerateOptions;

/// Load a render profile from a file, trying TOML first and then YAML
/// (profiles are commonly written in either).
pub fn load_profile(path: &Path) -> Result<GenerateOptions, String> {
    if !path.exists() || !path.is_file() {
        return Err(format!("Profile file not found: {}", path.display()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read profile file: {}", e))?;

    if let Ok(options) = from_toml(&content) {
        Ok(options)
    } else if let Ok(options) = from_yaml(&content) {
        Ok(options)
    } else {
        Err("Failed to parse profile file as TOML or YAML".to_string())
    }
}

pub fn from_toml(content: &str) -> Result<GenerateOptions, String> {
    toml::from_str(content).map_err(|e| format!("Failed to parse profile TOML: {}", e))
}

pub fn from_yaml(content: &str) -> Result<GenerateOptions, String> {
    serde_yaml::from_str(content).map_err(|e| format!("Failed to parse profile YAML: {}", e))
}

#[cfg(test)]
mod tests {
    use super::{from_toml, from_yaml};
    use crate::diagram::FlowDirection;

    #[test]
    fn toml_profile_overrides_defaults() {
        let options = from_toml(
            "direction = \"TB\"\nsystemBoundary = false\nsystemLabel = \"Shop\"\n",
        )
        .expect("profile parses");
        assert_eq!(options.direction, FlowDirection::TopDown);
        assert!(!options.system_boundary);
        assert_eq!(options.system_label.as_deref(), Some("Shop"));
        // Unset fields keep their defaults.
        assert!(!options.group_by_category);
    }

    #[test]
    fn yaml_profile_parses_with_td_alias() {
        let options = from_yaml("direction: TD\nshowActorRoles: true\n").expect("profile parses");
        assert_eq!(options.direction, FlowDirection::TopDown);
        assert!(options.show_actor_roles);
    }

    #[test]
    fn garbage_is_rejected_by_both_parsers() {
        assert!(from_toml(": not toml").is_err());
        assert!(from_yaml("{unterminated").is_err());
    }
}
