use serde::{Deserialize, Serialize};

/// Layout direction of generated flowcharts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirection {
    #[serde(rename = "TB", alias = "TD")]
    TopDown,
    #[serde(rename = "BT")]
    BottomUp,
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RL")]
    RightLeft,
}

impl FlowDirection {
    pub fn token(self) -> &'static str {
        match self {
            FlowDirection::TopDown => "TB",
            FlowDirection::BottomUp => "BT",
            FlowDirection::LeftRight => "LR",
            FlowDirection::RightLeft => "RL",
        }
    }
}

impl Default for FlowDirection {
    fn default() -> Self {
        FlowDirection::LeftRight
    }
}

/// How an actor relates to the system boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Primary,
    Secondary,
    External,
}

impl Default for ActorType {
    fn default() -> Self {
        ActorType::Primary
    }
}

/// A person or system that interacts with use cases.
/// Names are unique per diagram, compared case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(rename = "type", default)]
    pub actor_type: ActorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// A single use case with its declared relationships.
/// Relationship fields reference other use cases by id; references that do
/// not resolve are dropped during generation and reported during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generalizes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A data entity with free-text attributes and relationship sentences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEntity {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub relationships: Vec<String>,
}

/// Category of an element outside the system boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementCategory {
    Actor,
    System,
    Environment,
    Infrastructure,
    Regulation,
    Service,
}

/// Direction of an interaction, seen from the element's side:
/// inbound flows element -> system, outbound flows system -> element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionDirection {
    Inbound,
    Outbound,
    Bidirectional,
}

/// A labeled interaction between a context element and the system.
/// Labels are required to be lower-case as written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub label: String,
    pub direction: InteractionDirection,
}

/// An element outside the system boundary that interacts with it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextElement {
    pub id: String,
    pub name: String,
    pub category: ElementCategory,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// Rich context-diagram input: an optional system label plus elements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    #[serde(default)]
    pub elements: Vec<ContextElement>,
}

/// The full requirements bundle handed to the dispatcher.
/// `context` is the rich form; `external_elements` is the legacy flat list
/// the dispatcher falls back to when no rich context is supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub use_cases: Vec<UseCase>,
    #[serde(default)]
    pub entities: Vec<DataEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_elements: Vec<String>,
}

/// Generation options for the use-case generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOptions {
    pub direction: FlowDirection,
    pub system_boundary: bool,
    pub show_actor_roles: bool,
    pub group_by_category: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_label: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            direction: FlowDirection::default(),
            system_boundary: true,
            show_actor_roles: false,
            group_by_category: false,
            system_label: None,
        }
    }
}

/// One validation finding: a stable rule code plus a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub code: String,
    pub message: String,
}

impl Finding {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Finding {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of validating one diagram's input data.
/// Errors are hard gates (`passed` is false when any exist), warnings are
/// advisory only. Both lists are always computed in full, never
/// short-circuited, so callers can present a complete remediation list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub passed: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    #[serde(default)]
    pub element_count: usize,
    #[serde(default)]
    pub actor_count: usize,
    #[serde(default)]
    pub use_case_count: usize,
    #[serde(default)]
    pub entity_count: usize,
}

impl ValidationResult {
    /// A passing result with no findings and zeroed counters, used for
    /// generators that have no rules of their own and for placeholder paths.
    pub fn neutral() -> Self {
        ValidationResult {
            passed: true,
            ..Default::default()
        }
    }

    pub(crate) fn from_findings(errors: Vec<Finding>, warnings: Vec<Finding>) -> Self {
        ValidationResult {
            passed: errors.is_empty(),
            errors,
            warnings,
            ..Default::default()
        }
    }
}
