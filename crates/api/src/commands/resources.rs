//! Member and allocation commands

use resplan_domain::{
    Allocation, Member, MemberUtilization, MonthKey, Project, ResplanError, Result,
};
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Utilization grid for a range of months.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMatrix {
    pub months: Vec<MonthKey>,
    pub members: Vec<MemberUtilization>,
}

/// Matrix over the configured window around the current month
///
/// # Errors
/// Never fails today; the signature matches the other commands.
pub fn resource_matrix(ctx: &AppContext) -> Result<ResourceMatrix> {
    execute_logged("resources::resource_matrix", || {
        let store = ctx.store.read();
        let planning = &ctx.config.planning;
        let months =
            store.matrix_window(planning.matrix_months_before, planning.matrix_months_after);
        let members = store.resource_matrix(&months);
        Ok(ResourceMatrix { months, members })
    })
}

/// Matrix over explicit months
///
/// # Errors
/// `InvalidInput` when no months are given.
pub fn resource_matrix_for(ctx: &AppContext, months: Vec<MonthKey>) -> Result<ResourceMatrix> {
    execute_logged("resources::resource_matrix_for", || {
        if months.is_empty() {
            return Err(ResplanError::InvalidInput("at least one month is required".into()));
        }
        let members = ctx.store.read().resource_matrix(&months);
        Ok(ResourceMatrix { months, members })
    })
}

/// Summed allocation percentage of one member in one month
///
/// # Errors
/// `NotFound` for an unknown member.
pub fn member_utilization(ctx: &AppContext, member_id: &str, month: MonthKey) -> Result<u32> {
    execute_logged("resources::member_utilization", || {
        let store = ctx.store.read();
        if store.member(member_id).is_none() {
            return Err(ResplanError::NotFound(format!("member {member_id}")));
        }
        Ok(store.member_utilization(member_id, month))
    })
}

/// # Errors
/// `InvalidInput` for a duplicate id; persistence errors from saving.
pub fn add_member(ctx: &AppContext, member: Member) -> Result<()> {
    execute_logged("resources::add_member", || {
        ctx.store.write().add_member(member)?;
        ctx.save()
    })
}

/// Replace a member's fields
///
/// # Errors
/// `NotFound` for an unknown member; persistence errors from saving.
pub fn update_member(ctx: &AppContext, member: Member) -> Result<()> {
    execute_logged("resources::update_member", || {
        ctx.store.write().update_member(member)?;
        ctx.save()
    })
}

/// Remove a member and every allocation they hold
///
/// # Errors
/// `NotFound` for an unknown member; persistence errors from saving.
pub fn delete_member(ctx: &AppContext, member_id: &str) -> Result<Member> {
    execute_logged("resources::delete_member", || {
        let member = ctx.store.write().delete_member(member_id)?;
        ctx.save()?;
        Ok(member)
    })
}

/// Add an allocation; allocations against a lead are saved as prospects.
///
/// # Errors
/// `NotFound` for an unknown member or project, `InvalidInput` for a
/// duplicate id, or persistence errors from saving.
pub fn add_allocation(ctx: &AppContext, allocation: Allocation) -> Result<()> {
    execute_logged("resources::add_allocation", || {
        {
            let mut store = ctx.store.write();
            let against_lead =
                store.project(&allocation.project_id).is_some_and(Project::is_lead);
            if against_lead {
                store.add_prospect_allocation(allocation)?;
            } else {
                store.add_allocation(allocation)?;
            }
        }
        ctx.save()
    })
}

/// Replace an allocation's fields
///
/// # Errors
/// `NotFound` for an unknown allocation, member or project; persistence
/// errors from saving.
pub fn update_allocation(ctx: &AppContext, allocation: Allocation) -> Result<()> {
    execute_logged("resources::update_allocation", || {
        ctx.store.write().update_allocation(allocation)?;
        ctx.save()
    })
}

/// # Errors
/// `NotFound` for an unknown allocation; persistence errors from saving.
pub fn delete_allocation(ctx: &AppContext, allocation_id: &str) -> Result<Allocation> {
    execute_logged("resources::delete_allocation", || {
        let allocation = ctx.store.write().delete_allocation(allocation_id)?;
        ctx.save()?;
        Ok(allocation)
    })
}
