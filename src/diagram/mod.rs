mod class;
mod classify;
mod context;
mod dispatch;
mod sanitize;
mod sequence;
mod types;
mod use_case;

pub use class::generate_class;
pub use classify::{classify_cardinality, infer_category, infer_direction, Cardinality};
pub use context::{
    generate_context, generate_context_draft, validate_context, DEFAULT_SYSTEM_LABEL,
    MAX_ELEMENTS, MIN_ELEMENTS,
};
pub use dispatch::generate;
pub use sanitize::{escape_label, normalize_id};
pub use sequence::{clean_sequence_syntax, is_sequence_diagram};
pub use types::{
    Actor, ActorType, ContextElement, ContextSpec, DataEntity, ElementCategory, Finding,
    FlowDirection, GenerateOptions, Interaction, InteractionDirection, RequirementsDoc, UseCase,
    ValidationResult,
};
pub use use_case::{generate_use_cases, validate_use_cases};
