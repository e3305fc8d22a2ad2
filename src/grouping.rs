//! Grouping-state propagation between tables that hold the same rows
//!
//! A rename or pass-through projection of a grouped table must carry the same
//! GROUP BY bookkeeping as its source. Rather than re-encoding the grouping,
//! the destination's grouping and size terms are tied to the source's and the
//! destination starts sharing the source's `groups_considered` and lineage.

use crate::env::{MISC_LABEL, SymbolicEnv};
use crate::error::{Result, SymtabError};
use crate::schema::TableSchema;

/// What a propagation asserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagationSummary {
    /// Group slots covered (`0..max(groups_considered)`)
    pub group_slots: usize,
    /// Tuple slots covered (`0..ancestor bound`)
    pub tuple_slots: usize,
    /// Formulas appended, including the size equality
    pub assertions: usize,
}

/// Make `copy_to`'s grouping state identical to `copy_from`'s.
///
/// For every group slot below the largest considered group count and every
/// tuple slot of `copy_from`'s first ancestor, asserts
/// `grouping(copy_to, tuple, group) == grouping(copy_from, tuple, group)`,
/// then `size(copy_to) == size(copy_from)`, all labelled `"misc"`. Afterwards
/// `copy_to` shares `copy_from`'s `groups_considered` and lineage handles.
///
/// Group slots form the dense range `0..max`, not the literal considered
/// set; for a sparse set this ties a few extra slots, which is harmless since
/// both tables hold the same rows.
///
/// Fails without asserting anything when `copy_from` has no ancestors or no
/// considered group counts, when a considered group count exceeds the first
/// ancestor's bound, or when `copy_to`'s bound differs from that bound.
pub fn propagate_grouping<E: SymbolicEnv>(
    copy_from: &TableSchema,
    copy_to: &mut TableSchema,
    env: &mut E,
) -> Result<PropagationSummary> {
    let ancestor = copy_from
        .ancestors()
        .first()
        .ok_or(SymtabError::NoAncestors {
            table: copy_from.table_id(),
        })?;
    let group_slots = copy_from
        .ctx()
        .groups_considered()
        .max()
        .ok_or(SymtabError::NoGroupsConsidered {
            table: copy_from.table_id(),
        })?;
    let tuple_slots = ancestor.bound();
    // Grouping `n` rows yields at most `n` groups.
    if group_slots > tuple_slots {
        return Err(SymtabError::GroupCountExceedsBound {
            table: copy_from.table_id(),
            groups: group_slots,
            bound: tuple_slots,
        });
    }
    if copy_to.bound() != tuple_slots {
        return Err(SymtabError::BoundMismatch {
            table: copy_to.table_id(),
            expected: tuple_slots,
            found: copy_to.bound(),
        });
    }

    let (from_id, to_id) = (copy_from.table_id(), copy_to.table_id());

    let capacity = group_slots
        .checked_mul(tuple_slots)
        .and_then(|n| n.checked_add(1))
        .ok_or(SymtabError::SlotOverflow { table: from_id })?;

    // Build the whole batch first so the store never sees a partial one.
    let mut batch = Vec::with_capacity(capacity);
    for group_id in 0..group_slots {
        for tuple_id in 0..tuple_slots {
            let lhs = env.grouping(to_id, tuple_id, group_id);
            let rhs = env.grouping(from_id, tuple_id, group_id);
            batch.push(env.equal(&lhs, &rhs));
        }
    }
    let lhs = env.size(to_id);
    let rhs = env.size(from_id);
    batch.push(env.equal(&lhs, &rhs));

    let assertions = batch.len();
    env.formulas_mut().extend(batch, MISC_LABEL);

    copy_to
        .ctx()
        .share_groups_considered(copy_from.ctx().groups_considered());
    copy_to.share_lineage(copy_from.lineage());

    tracing::debug!(
        from = %from_id,
        to = %to_id,
        group_slots,
        tuple_slots,
        assertions,
        "propagated grouping state"
    );

    Ok(PropagationSummary {
        group_slots,
        tuple_slots,
        assertions,
    })
}
