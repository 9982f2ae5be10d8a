use crate::domain::model::ReservedNameSet;
use crate::domain::ports::GroupRegistry;
use crate::utils::error::{DistributeError, Result};
use crate::utils::validation::validate_non_empty_string;

pub const MESSAGE_INDEX_NEGATIVE: &str = "Index should be positive.";

/// Name of the group at zero-based `slot`: `prefix` followed by `slot + 1`.
pub fn group_name(prefix: &str, slot: usize) -> String {
    format!("{}{}", prefix, slot + 1)
}

/// Derives every prospective group name and checks them all against the
/// registry before anything is created.
///
/// Either every name is free and the full set is returned, or the first
/// collision is reported and nothing is reserved. The check is not locked:
/// a group created by someone else between this call and materialization
/// still surfaces as `DuplicateGroupName` from the registry itself.
pub fn reserve<G: GroupRegistry + ?Sized>(
    prefix: &str,
    group_count: usize,
    registry: &G,
) -> Result<ReservedNameSet> {
    validate_non_empty_string("name_prefix", prefix)?;
    if group_count == 0 {
        tracing::warn!("Received a non-positive group count for name reservation");
        return Err(DistributeError::invalid_argument(
            "group_count",
            MESSAGE_INDEX_NEGATIVE,
        ));
    }

    let names: Vec<String> = (0..group_count).map(|slot| group_name(prefix, slot)).collect();

    if let Some(taken) = names.iter().find(|name| registry.exists_by_name(name)) {
        tracing::warn!("Another group named {} exists in the registry", taken);
        return Err(DistributeError::DuplicateGroupName {
            name: taken.clone(),
        });
    }

    tracing::debug!("Reserved group names {:?}", names);
    Ok(ReservedNameSet::new(names))
}
