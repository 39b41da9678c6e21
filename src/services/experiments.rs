//! Experiment aggregate business logic.
//!
//! Handlers delegate here; this module owns authorization (ownership with an
//! admin bypass), name validation and the hydration of sequences with their
//! resolved network profiles.

use std::collections::HashMap;

use tracing::info;

use crate::db::DbPool;
use crate::entity::{experiment, experiment_sequence};
use crate::error::{AppError, AppResult};
use crate::models::{
    AuthenticatedUser, CreateExperimentRequest, ExperimentResponse, ExperimentStatus,
    ExperimentStatusResponse, NetworkResponse, SequenceResponse, UpdateExperimentRequest,
};
use crate::services::storage::Storage;

/// Ownership check with the admin bypass.
pub(crate) fn authorize_owner(
    user: &AuthenticatedUser,
    exp: &experiment::Model,
    action: &str,
) -> AppResult<()> {
    if exp.owner_id == user.id || user.role.is_elevated() {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Only the owner can {} this experiment",
            action
        )))
    }
}

const MAX_NAME_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 250;

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "experiment name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(AppError::InvalidInput(format!(
            "experiment name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> AppResult<()> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(AppError::InvalidInput(format!(
            "experiment description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

fn parse_status(exp: &experiment::Model) -> AppResult<ExperimentStatus> {
    ExperimentStatus::parse(&exp.status).ok_or_else(|| {
        AppError::Database(format!(
            "Experiment {} has invalid status '{}'",
            exp.id, exp.status
        ))
    })
}

/// Load an experiment or fail with 404.
pub async fn load_experiment(pool: &DbPool, id: i32) -> AppResult<experiment::Model> {
    pool.get_experiment_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Experiment {} not found", id)))
}

/// Resolve every network profile the given sequences reference, one query.
async fn fetch_networks(
    pool: &DbPool,
    sequences: &[experiment_sequence::Model],
) -> AppResult<HashMap<i32, NetworkResponse>> {
    let mut ids: Vec<i32> = sequences
        .iter()
        .flat_map(|s| [s.topology_id, s.disruption_profile_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();

    Ok(pool
        .get_networks_by_ids(&ids)
        .await?
        .into_iter()
        .map(|n| (n.id, NetworkResponse::from(n)))
        .collect())
}

/// Assemble aggregate views from already-fetched rows, preserving the
/// order of `experiments` and of each experiment's sequences.
fn assemble(
    experiments: Vec<experiment::Model>,
    sequences: Vec<experiment_sequence::Model>,
    networks: &HashMap<i32, NetworkResponse>,
) -> AppResult<Vec<ExperimentResponse>> {
    let mut grouped: HashMap<i32, Vec<SequenceResponse>> = HashMap::new();
    for s in sequences {
        grouped
            .entry(s.experiment_id)
            .or_default()
            .push(SequenceResponse {
                sequence_id: s.id,
                topology: networks.get(&s.topology_id).cloned(),
                disruption_profile: networks.get(&s.disruption_profile_id).cloned(),
                encoding_parameters: s.encoding_parameters,
            });
    }

    let mut responses = Vec::with_capacity(experiments.len());
    for exp in experiments {
        let status = parse_status(&exp)?;
        responses.push(ExperimentResponse {
            sequences: grouped.remove(&exp.id).unwrap_or_default(),
            id: exp.id,
            name: exp.name,
            description: exp.description,
            owner_id: exp.owner_id,
            status,
            created_at: exp.created_at,
        });
    }
    Ok(responses)
}

/// Build the full aggregate view of one experiment.
async fn hydrate(pool: &DbPool, exp: experiment::Model) -> AppResult<ExperimentResponse> {
    let sequences = pool.list_sequences(exp.id).await?;
    let networks = fetch_networks(pool, &sequences).await?;
    assemble(vec![exp], sequences, &networks)?
        .pop()
        .ok_or_else(|| AppError::Database("Hydration produced no aggregate".to_string()))
}

/// Create an experiment with its initial sequences, owned by the caller.
pub async fn create(
    pool: &DbPool,
    user: &AuthenticatedUser,
    req: CreateExperimentRequest,
) -> AppResult<ExperimentResponse> {
    validate_name(&req.name)?;
    validate_description(&req.description)?;

    if pool.get_experiment_by_name(&req.name).await?.is_some() {
        return Err(AppError::Conflict(
            "experiment name must be unique".to_string(),
        ));
    }

    let created = pool
        .create_experiment(&req.name, &req.description, user.id, &req.sequences)
        .await?;

    info!(
        "Experiment '{}' (id {}) created by user {}",
        created.name, created.id, user.username
    );

    hydrate(pool, created).await
}

/// List experiments: admins and super admins see all, others their own.
pub async fn list(pool: &DbPool, user: &AuthenticatedUser) -> AppResult<Vec<ExperimentResponse>> {
    let owner_filter = if user.role.is_elevated() {
        None
    } else {
        Some(user.id)
    };

    let experiments = pool.list_experiments(owner_filter).await?;

    // Three queries for the whole listing, regardless of its length
    let ids: Vec<i32> = experiments.iter().map(|e| e.id).collect();
    let sequences = pool.list_sequences_for_experiments(&ids).await?;
    let networks = fetch_networks(pool, &sequences).await?;

    assemble(experiments, sequences, &networks)
}

/// Get one experiment as its full aggregate.
pub async fn get(
    pool: &DbPool,
    user: &AuthenticatedUser,
    id: i32,
) -> AppResult<ExperimentResponse> {
    let exp = load_experiment(pool, id).await?;
    authorize_owner(user, &exp, "access")?;
    hydrate(pool, exp).await
}

/// Get the status label of an experiment.
pub async fn get_status(
    pool: &DbPool,
    user: &AuthenticatedUser,
    id: i32,
) -> AppResult<ExperimentStatusResponse> {
    let exp = load_experiment(pool, id).await?;
    authorize_owner(user, &exp, "access")?;
    let status = parse_status(&exp)?;
    Ok(ExperimentStatusResponse { status })
}

/// Apply a partial update, including sequence additions and removals.
pub async fn update(
    pool: &DbPool,
    user: &AuthenticatedUser,
    id: i32,
    req: UpdateExperimentRequest,
) -> AppResult<ExperimentResponse> {
    let exp = load_experiment(pool, id).await?;
    authorize_owner(user, &exp, "update")?;

    if let Some(ref description) = req.description {
        validate_description(description)?;
    }

    if let Some(ref name) = req.name {
        validate_name(name)?;
        // Renaming to the current name is a no-op, not a conflict.
        if *name != exp.name && pool.get_experiment_by_name(name).await?.is_some() {
            return Err(AppError::Conflict(
                "experiment name must be unique".to_string(),
            ));
        }
    }

    let updated = pool
        .update_experiment(
            exp,
            req.name,
            req.description,
            req.status,
            &req.add_sequences,
            &req.remove_sequence_ids,
        )
        .await?;

    hydrate(pool, updated).await
}

/// Delete an experiment and its stored result files.
pub async fn delete(
    pool: &DbPool,
    storage: &Storage,
    user: &AuthenticatedUser,
    id: i32,
) -> AppResult<()> {
    let exp = load_experiment(pool, id).await?;
    authorize_owner(user, &exp, "delete")?;

    pool.delete_experiment(id).await?;
    storage.remove_result_dir(id).await?;

    info!(
        "Experiment '{}' (id {}) deleted by user {}",
        exp.name, id, user.username
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Utc;

    fn experiment_owned_by(owner_id: i32) -> experiment::Model {
        experiment::Model {
            id: 1,
            name: "exp".to_string(),
            description: String::new(),
            owner_id,
            status: "PENDING".to_string(),
            created_at: Utc::now(),
        }
    }

    fn user_with(id: i32, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            username: format!("user{}", id),
            role,
        }
    }

    #[test]
    fn test_owner_is_authorized() {
        let exp = experiment_owned_by(1);
        assert!(authorize_owner(&user_with(1, Role::User), &exp, "update").is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let exp = experiment_owned_by(1);
        assert!(matches!(
            authorize_owner(&user_with(2, Role::User), &exp, "update"),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_admin_bypasses_ownership() {
        let exp = experiment_owned_by(1);
        assert!(authorize_owner(&user_with(2, Role::Admin), &exp, "delete").is_ok());
        assert!(authorize_owner(&user_with(2, Role::SuperAdmin), &exp, "delete").is_ok());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Exp1").is_ok());
        assert!(matches!(
            validate_name(""),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_name("   "),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_name(&"x".repeat(51)),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_description_length() {
        assert!(validate_description("short").is_ok());
        assert!(matches!(
            validate_description(&"x".repeat(251)),
            Err(AppError::InvalidInput(_))
        ));
    }

    fn sequence(id: i32, experiment_id: i32) -> experiment_sequence::Model {
        experiment_sequence::Model {
            id,
            experiment_id,
            topology_id: 10,
            disruption_profile_id: 11,
            encoding_parameters: serde_json::json!({"codec": "h264"}),
        }
    }

    #[test]
    fn test_assemble_groups_sequences_per_experiment() {
        let mut second = experiment_owned_by(1);
        second.id = 2;
        let experiments = vec![experiment_owned_by(1), second];
        let sequences = vec![sequence(100, 1), sequence(101, 2), sequence(102, 1)];

        let responses = assemble(experiments, sequences, &HashMap::new()).unwrap();
        assert_eq!(responses.len(), 2);

        let ids: Vec<Vec<i32>> = responses
            .iter()
            .map(|r| r.sequences.iter().map(|s| s.sequence_id).collect())
            .collect();
        assert_eq!(ids[0], vec![100, 102]);
        assert_eq!(ids[1], vec![101]);
    }

    #[test]
    fn test_assemble_experiment_without_sequences_is_empty() {
        let responses = assemble(vec![experiment_owned_by(1)], Vec::new(), &HashMap::new()).unwrap();
        assert_eq!(responses.len(), 1);
        assert!(responses[0].sequences.is_empty());
    }

    #[test]
    fn test_assemble_resolves_networks_from_map() {
        let networks: HashMap<i32, NetworkResponse> = [(
            10,
            NetworkResponse {
                id: 10,
                name: "lan".to_string(),
                packet_loss: None,
                delay_ms: Some(5),
                jitter_ms: None,
                bandwidth_kbps: None,
            },
        )]
        .into_iter()
        .collect();

        let responses =
            assemble(vec![experiment_owned_by(1)], vec![sequence(100, 1)], &networks).unwrap();
        let seq = &responses[0].sequences[0];
        assert_eq!(seq.topology.as_ref().map(|n| n.id), Some(10));
        // Profile 11 is not in the map, stays unresolved
        assert!(seq.disruption_profile.is_none());
    }

    #[test]
    fn test_parse_status_rejects_unknown_label() {
        let mut exp = experiment_owned_by(1);
        exp.status = "RUNNING".to_string();
        assert!(parse_status(&exp).is_err());
        exp.status = "COMPLETE".to_string();
        assert_eq!(parse_status(&exp).unwrap(), ExperimentStatus::Complete);
    }
}
