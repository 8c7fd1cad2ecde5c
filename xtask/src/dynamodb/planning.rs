//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    /// Key attribute names in schema order (partition first).
    pub key_names: Vec<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists with a different primary key; DynamoDB cannot change it in place.
    KeySchemaMismatch {
        table_name: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    match current {
        None => DeployPlan::CreateTable {
            config: desired.clone(),
        },
        Some(state) => {
            let expected = desired.key_names();
            if state.key_names == expected {
                DeployPlan::NoChanges {
                    table_name: desired.table_name.clone(),
                }
            } else {
                DeployPlan::KeySchemaMismatch {
                    table_name: desired.table_name.clone(),
                    expected,
                    found: state.key_names.clone(),
                }
            }
        }
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!(
                    "  Partition key: {} ({})",
                    config.partition_key.name,
                    config.partition_key.attribute_type.descriptor()
                ),
            ];
            if let Some(sk) = &config.sort_key {
                lines.push(format!(
                    "  Sort key: {} ({})",
                    sk.name,
                    sk.attribute_type.descriptor()
                ));
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        DeployPlan::KeySchemaMismatch {
            table_name,
            expected,
            found,
        } => vec![
            format!("~ Table '{}' has an incompatible key schema", table_name),
            format!("  Expected: {}", expected.join(", ")),
            format!("  Found: {}", found.join(", ")),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::pieces_table_config;

    fn active(keys: &[&str]) -> TableState {
        TableState {
            status: TableStatus::Active,
            key_names: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let desired = pieces_table_config();
        let plan = calculate_deploy_plan(None, &desired);

        assert_eq!(plan, DeployPlan::CreateTable { config: desired });
    }

    #[test]
    fn test_matching_table_needs_no_changes() {
        let plan = calculate_deploy_plan(Some(&active(&["PieceId", "Year"])), &pieces_table_config());

        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "Pieces".to_string()
            }
        );
    }

    #[test]
    fn test_different_keys_are_a_mismatch() {
        let plan = calculate_deploy_plan(Some(&active(&["PieceId"])), &pieces_table_config());

        assert_eq!(
            plan,
            DeployPlan::KeySchemaMismatch {
                table_name: "Pieces".to_string(),
                expected: vec!["PieceId".to_string(), "Year".to_string()],
                found: vec!["PieceId".to_string()],
            }
        );
    }

    #[test]
    fn test_destroy_plan() {
        assert_eq!(
            calculate_destroy_plan(Some(&active(&["PieceId", "Year"])), "Pieces"),
            DestroyPlan::DeleteTable {
                table_name: "Pieces".to_string()
            }
        );
        assert_eq!(
            calculate_destroy_plan(None, "Pieces"),
            DestroyPlan::AlreadyGone {
                table_name: "Pieces".to_string()
            }
        );
    }

    #[test]
    fn test_format_create_plan() {
        let lines = format_deploy_plan(&DeployPlan::CreateTable {
            config: pieces_table_config(),
        });

        assert_eq!(
            lines,
            vec![
                "+ Create table: Pieces",
                "  Partition key: PieceId (S)",
                "  Sort key: Year (N)",
                "  Billing: PAY_PER_REQUEST",
            ]
        );
    }
}
