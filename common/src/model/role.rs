use serde::{Deserialize, Serialize};

/// The three permanent role keys. They can never be removed from the
/// dictionary; additional keys are generated at runtime.
pub const MANAGER: &str = "Manager";
pub const COLLABORATOR: &str = "Collaborator";
pub const INTERN: &str = "Intern";

pub fn is_built_in(key: &str) -> bool {
    key == MANAGER || key == COLLABORATOR || key == INTERN
}

/// One entry of the role-label dictionary: a stable key mapped to the
/// human-readable label shown in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleLabel {
    pub key: String,
    pub label: String,
}

impl RoleLabel {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> RoleLabel {
        RoleLabel {
            key: key.into(),
            label: label.into(),
        }
    }

    /// The dictionary as seeded on first run.
    pub fn built_in() -> Vec<RoleLabel> {
        vec![
            RoleLabel::new(MANAGER, "Gerente"),
            RoleLabel::new(COLLABORATOR, "Colaborador"),
            RoleLabel::new(INTERN, "Estagiário"),
        ]
    }
}
