use thiserror::Error;

use crate::core::types::SoldierId;

/// A precondition of a commit was not met.
///
/// Always produced before any state is touched: a commit that returns one of
/// these has left every roster, ledger and fund balance exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Operation needs {required} soldiers, {assigned} assigned")]
    NotEnoughSoldiers { required: usize, assigned: usize },

    #[error("Required item {item}: {required} needed, {staged} staged")]
    MissingRequiredItem { item: String, required: u32, staged: u32 },

    #[error("Insufficient funds: {required} needed, {available} available")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("Insufficient {item}: {required} needed, {available} in storage")]
    InsufficientItems { item: String, required: u32, available: u32 },

    #[error("No free living quarters ({used}/{available} used)")]
    InsufficientQuarters { used: u32, available: u32 },

    #[error("Soldier {0} is not available for assignment")]
    SoldierUnavailable(SoldierId),

    #[error("Soldier {0} already has a pending transformation")]
    TransformationPending(SoldierId),

    #[error("Soldier is not eligible: {0}")]
    NotEligible(String),

    #[error("Nothing to stage: requested {requested} of {item}, {available} in storage")]
    NothingToStage { item: String, requested: u32, available: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Operation {0} was already performed and cannot be repeated")]
    DuplicateAttempt(String),

    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown soldier: {0}")]
    UnknownSoldier(SoldierId),

    #[error("Unknown soldier type: {0}")]
    UnknownSoldierType(String),
}

pub type Result<T> = std::result::Result<T, ProjectError>;

/// Errors raised while loading a rule catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rule {rule} references unknown {kind} {name}")]
    DanglingReference { rule: String, kind: &'static str, name: String },

    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_into_project_error() {
        let err: ProjectError = ValidationError::NotEnoughSoldiers { required: 2, assigned: 1 }.into();
        assert!(matches!(err, ProjectError::Validation(_)));
        assert_eq!(err.to_string(), "Operation needs 2 soldiers, 1 assigned");
    }

    #[test]
    fn test_messages_name_the_subject() {
        let err = ProjectError::UnknownSoldier(SoldierId(4));
        assert_eq!(err.to_string(), "Unknown soldier: soldier#4");

        let err = CatalogError::DanglingReference {
            rule: "STR_OP_SABOTAGE".into(),
            kind: "item",
            name: "STR_PISTOL".into(),
        };
        assert!(err.to_string().contains("STR_PISTOL"));
    }
}
