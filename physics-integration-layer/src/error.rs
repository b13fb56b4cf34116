use crate::materials::MaterialHandle;

/// Configuration-time misuse of the contact rules.
///
/// Nothing on the query path returns these - they are raised while the rules are being defined or
/// while bodies are being attached to them, so that mistakes surface at setup instead of in the
/// middle of a simulation step.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ContactRulesError {
    #[error("Collision group {group} is used by a body but was never declared in any collision rule")]
    UndeclaredGroup { group: i32 },
    #[error("Material {field} must be a finite non-negative number, got {value}")]
    InvalidMaterialDescriptor { field: &'static str, value: f32 },
    #[error("{0:?} was not issued by this material resolver")]
    UnknownMaterial(MaterialHandle),
}
