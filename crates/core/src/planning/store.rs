//! The planning store
//!
//! Owns the canonical collections of projects, members and allocations plus
//! the forecast weights. Queries delegate to the pure engines in
//! [`crate::forecast`] and [`crate::allocation`]; mutations keep referential
//! integrity (deletes cascade to allocations) and queue one history entry per
//! changed record. Queued entries reach the recorder only through
//! [`PlanningStore::flush_history`], which the owner calls once the plan has
//! been persisted.
//!
//! The store is plain data behind `&mut self`. Callers that share it wrap it
//! in a single lock.

use std::collections::HashSet;
use std::sync::Arc;

use resplan_domain::utils::calendar::months_around;
use resplan_domain::{
    AiAdvice, Allocation, AllocationKind, CalcMode, Collection, FiscalYearSummary, HistoryAction,
    HistoryEntry, HistoryFilter, Member, MemberUtilization, MonthKey, MonthlySales,
    PipelineStats, ProbabilityWeights, Project, ProjectStatus, ResplanError, Result,
};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::ports::PlanSnapshot;
use crate::allocation::{
    convert_lead_allocations, member_matrix, utilization_by_member_month, ConversionOutcome,
};
use crate::clock::Clock;
use crate::forecast::{current_fiscal_year, fiscal_year_summary, monthly_sales, pipeline_stats};
use crate::history::{calculate_diff, new_entry, HistoryRecorder};

const DIFF_IGNORED: &[&str] = &["id"];

/// In-memory source of truth for the plan.
pub struct PlanningStore {
    projects: Vec<Project>,
    members: Vec<Member>,
    allocations: Vec<Allocation>,
    weights: ProbabilityWeights,
    history: Arc<dyn HistoryRecorder>,
    pending: Mutex<Vec<HistoryEntry>>,
    clock: Arc<dyn Clock>,
    actor: String,
}

impl PlanningStore {
    /// An empty plan with default weights.
    pub fn new(history: Arc<dyn HistoryRecorder>, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects: Vec::new(),
            members: Vec::new(),
            allocations: Vec::new(),
            weights: ProbabilityWeights::default(),
            history,
            pending: Mutex::new(Vec::new()),
            clock,
            actor: resplan_domain::constants::DEFAULT_ACTOR.to_string(),
        }
    }

    /// Restore a saved plan.
    ///
    /// # Errors
    /// Returns `ResplanError::InvalidInput` if the snapshot contains duplicate
    /// ids, a project with an invalid date range, or weights above 100.
    pub fn from_snapshot(
        snapshot: PlanSnapshot,
        history: Arc<dyn HistoryRecorder>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        ensure_unique("project", snapshot.projects.iter().map(Project::id))?;
        ensure_unique("member", snapshot.members.iter().map(|m| m.id.as_str()))?;
        ensure_unique("allocation", snapshot.allocations.iter().map(|a| a.id.as_str()))?;
        for project in &snapshot.projects {
            project.validate()?;
        }
        snapshot.weights.validate()?;

        let dangling = snapshot
            .allocations
            .iter()
            .filter(|a| {
                !snapshot.projects.iter().any(|p| p.id() == a.project_id)
                    || !snapshot.members.iter().any(|m| m.id == a.member_id)
            })
            .count();
        if dangling > 0 {
            warn!(dangling, "snapshot contains allocations for unknown projects or members");
        }

        info!(
            projects = snapshot.projects.len(),
            members = snapshot.members.len(),
            allocations = snapshot.allocations.len(),
            "planning store restored"
        );

        Ok(Self {
            projects: snapshot.projects,
            members: snapshot.members,
            allocations: snapshot.allocations,
            weights: snapshot.weights,
            history,
            pending: Mutex::new(Vec::new()),
            clock,
            actor: resplan_domain::constants::DEFAULT_ACTOR.to_string(),
        })
    }

    /// Actor name written to history entries.
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Copy of the current state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            projects: self.projects.clone(),
            members: self.members.clone(),
            allocations: self.allocations.clone(),
            weights: self.weights,
        }
    }

    /* ---------------------------------------------------------------------- */
    /* Collections */
    /* ---------------------------------------------------------------------- */

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    #[must_use]
    pub const fn weights(&self) -> &ProbabilityWeights {
        &self.weights
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /* ---------------------------------------------------------------------- */
    /* Derived Views */
    /* ---------------------------------------------------------------------- */

    #[must_use]
    pub fn leads(&self) -> Vec<&Project> {
        self.projects_with_status(ProjectStatus::Lead)
    }

    #[must_use]
    pub fn active_projects(&self) -> Vec<&Project> {
        self.projects_with_status(ProjectStatus::Active)
    }

    #[must_use]
    pub fn completed_projects(&self) -> Vec<&Project> {
        self.projects_with_status(ProjectStatus::Completed)
    }

    #[must_use]
    pub fn on_hold_projects(&self) -> Vec<&Project> {
        self.projects_with_status(ProjectStatus::OnHold)
    }

    fn projects_with_status(&self, status: ProjectStatus) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.status() == status).collect()
    }

    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn allocation(&self, id: &str) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn allocations_for_member(&self, member_id: &str) -> Vec<&Allocation> {
        self.allocations.iter().filter(|a| a.member_id == member_id).collect()
    }

    #[must_use]
    pub fn allocations_for_project(&self, project_id: &str) -> Vec<&Allocation> {
        self.allocations.iter().filter(|a| a.project_id == project_id).collect()
    }

    #[must_use]
    pub fn member_utilization(&self, member_id: &str, month: MonthKey) -> u32 {
        utilization_by_member_month(&self.allocations, member_id, month)
    }

    #[must_use]
    pub fn resource_matrix(&self, months: &[MonthKey]) -> Vec<MemberUtilization> {
        member_matrix(&self.members, &self.allocations, &self.projects, months)
    }

    /// Months shown by the resource matrix around the current month.
    #[must_use]
    pub fn matrix_window(&self, before: u32, after: u32) -> Vec<MonthKey> {
        months_around(self.clock.today(), before, after)
    }

    #[must_use]
    pub fn monthly_sales(&self, months: &[MonthKey], mode: CalcMode) -> Vec<MonthlySales> {
        monthly_sales(&self.projects, months, &self.weights, mode)
    }

    /// # Errors
    /// Returns `ResplanError::InvalidDate` for an unrepresentable fiscal year.
    pub fn sales_summary(&self, fiscal_year: i32, mode: CalcMode) -> Result<FiscalYearSummary> {
        fiscal_year_summary(&self.projects, fiscal_year, &self.weights, mode)
    }

    #[must_use]
    pub fn current_fiscal_year(&self) -> i32 {
        current_fiscal_year(self.clock.as_ref())
    }

    #[must_use]
    pub fn pipeline_stats(&self) -> PipelineStats {
        pipeline_stats(&self.projects, self.members.len(), &self.weights)
    }

    /// Recorded history; entries still queued are not included.
    ///
    /// # Errors
    /// Propagates failures of the history recorder.
    pub fn history(&self, filter: &HistoryFilter) -> Result<Vec<HistoryEntry>> {
        self.history.entries(filter)
    }

    /// History entries produced by mutations since the last flush.
    #[must_use]
    pub fn pending_history(&self) -> Vec<HistoryEntry> {
        self.pending.lock().clone()
    }

    /// Hand queued history entries to the recorder, oldest first.
    ///
    /// Returns how many entries were passed on. A failing recorder is logged
    /// and never fails the caller.
    pub fn flush_history(&self) -> usize {
        let entries = std::mem::take(&mut *self.pending.lock());
        let count = entries.len();
        for entry in entries {
            if let Err(error) = self.history.record(entry) {
                warn!(%error, "failed to record history entry");
            }
        }
        if count > 0 {
            debug!(count, "history flushed");
        }
        count
    }

    /* ---------------------------------------------------------------------- */
    /* Projects */
    /* ---------------------------------------------------------------------- */

    /// # Errors
    /// `InvalidInput` for a duplicate id or an invalid date range.
    pub fn add_project(&mut self, project: Project) -> Result<()> {
        project.validate()?;
        if self.project(project.id()).is_some() {
            return Err(duplicate("project", project.id()));
        }

        self.emit_change(
            Collection::Projects,
            HistoryAction::Create,
            project.id(),
            project.name(),
            None,
            to_json(&project).as_ref(),
        );
        debug!(project_id = %project.id(), status = %project.status(), "project added");
        self.projects.push(project);
        Ok(())
    }

    /// Replace a project's fields.
    ///
    /// A lead stays a lead and a contract stays a contract; use
    /// [`Self::convert_lead`] to win a lead.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `InvalidInput` for a variant change or
    /// an invalid date range.
    pub fn update_project(&mut self, project: Project) -> Result<()> {
        project.validate()?;
        let index = self.project_index(project.id())?;
        let current = &self.projects[index];

        match (current, &project) {
            (Project::Lead(_), Project::Contract(_)) => {
                return Err(ResplanError::InvalidInput(format!(
                    "project {} is a lead; convert it instead of changing its status",
                    project.id()
                )));
            }
            (Project::Contract(_), Project::Lead(_)) => {
                return Err(ResplanError::InvalidInput(format!(
                    "project {} is contracted and cannot return to lead",
                    project.id()
                )));
            }
            _ => {}
        }

        self.emit_change(
            Collection::Projects,
            HistoryAction::Update,
            project.id(),
            project.name(),
            to_json(current).as_ref(),
            to_json(&project).as_ref(),
        );
        self.projects[index] = project;
        Ok(())
    }

    /// Remove a project and every allocation against it.
    ///
    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn delete_project(&mut self, id: &str) -> Result<Project> {
        let index = self.project_index(id)?;
        let project = self.projects.remove(index);
        let removed = self.remove_allocations_where(|a| a.project_id == id);

        self.emit_delete(Collection::Projects, project.id(), project.name(), &project);
        info!(project_id = %id, cascaded = removed, "project deleted");
        Ok(project)
    }

    /// Win a lead: it becomes an active contract, its pre-sales allocations
    /// are deleted and its prospective allocations become committed.
    ///
    /// Either everything changes or nothing does.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `InvalidInput` if the project is not a
    /// lead.
    pub fn convert_lead(
        &mut self,
        id: &str,
        actual_revenue: Option<u64>,
    ) -> Result<ConversionOutcome> {
        let index = self.project_index(id)?;
        let Project::Lead(lead) = &self.projects[index] else {
            return Err(ResplanError::InvalidInput(format!("project {id} is not a lead")));
        };

        let before = to_json(&self.projects[index]);
        let converted = Project::Contract(lead.clone().convert(actual_revenue));
        let outcome = convert_lead_allocations(&self.allocations, id);

        self.projects[index] = converted;
        self.allocations.clone_from(&outcome.allocations);

        let project = &self.projects[index];
        self.emit_change(
            Collection::Projects,
            HistoryAction::Convert,
            id,
            project.name(),
            before.as_ref(),
            to_json(project).as_ref(),
        );
        for allocation in &outcome.removed {
            self.emit_delete(Collection::Allocations, &allocation.id, &allocation.role, allocation);
        }
        for promoted in &outcome.promoted {
            if let Some(allocation) = self.allocation(promoted) {
                let mut entry = self.entry(
                    Collection::Allocations,
                    HistoryAction::Update,
                    promoted,
                    &allocation.role,
                );
                entry.changes = calculate_diff(
                    to_json(&allocation.clone().with_kind(AllocationKind::Prospective)).as_ref(),
                    to_json(allocation).as_ref(),
                    DIFF_IGNORED,
                );
                self.emit(entry);
            }
        }

        info!(
            project_id = %id,
            removed = outcome.removed.len(),
            promoted = outcome.promoted.len(),
            "lead converted"
        );
        Ok(outcome)
    }

    /// Keep an advice reply on the project it was asked for.
    ///
    /// # Errors
    /// `NotFound` for an unknown project.
    pub fn add_advice(&mut self, project_id: &str, advice: AiAdvice) -> Result<()> {
        let index = self.project_index(project_id)?;
        let before = to_json(&self.projects[index]);
        self.projects[index].details_mut().ai_advices.push(advice);

        let project = &self.projects[index];
        self.emit_change(
            Collection::Projects,
            HistoryAction::Update,
            project_id,
            project.name(),
            before.as_ref(),
            to_json(project).as_ref(),
        );
        Ok(())
    }

    fn project_index(&self, id: &str) -> Result<usize> {
        self.projects
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| ResplanError::NotFound(format!("project {id}")))
    }

    /* ---------------------------------------------------------------------- */
    /* Members */
    /* ---------------------------------------------------------------------- */

    /// # Errors
    /// `InvalidInput` for a duplicate or empty id.
    pub fn add_member(&mut self, member: Member) -> Result<()> {
        if member.id.trim().is_empty() {
            return Err(ResplanError::InvalidInput("member id must not be empty".into()));
        }
        if self.member(&member.id).is_some() {
            return Err(duplicate("member", &member.id));
        }

        self.emit_change(
            Collection::Members,
            HistoryAction::Create,
            &member.id,
            &member.name,
            None,
            to_json(&member).as_ref(),
        );
        self.members.push(member);
        Ok(())
    }

    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn update_member(&mut self, member: Member) -> Result<()> {
        let index = self.member_index(&member.id)?;
        self.emit_change(
            Collection::Members,
            HistoryAction::Update,
            &member.id,
            &member.name,
            to_json(&self.members[index]).as_ref(),
            to_json(&member).as_ref(),
        );
        self.members[index] = member;
        Ok(())
    }

    /// Remove a member and every allocation of theirs.
    ///
    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn delete_member(&mut self, id: &str) -> Result<Member> {
        let index = self.member_index(id)?;
        let member = self.members.remove(index);
        let removed = self.remove_allocations_where(|a| a.member_id == id);

        self.emit_delete(Collection::Members, &member.id, &member.name, &member);
        info!(member_id = %id, cascaded = removed, "member deleted");
        Ok(member)
    }

    fn member_index(&self, id: &str) -> Result<usize> {
        self.members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| ResplanError::NotFound(format!("member {id}")))
    }

    /* ---------------------------------------------------------------------- */
    /* Allocations */
    /* ---------------------------------------------------------------------- */

    /// # Errors
    /// `InvalidInput` for a duplicate id, `NotFound` if the member or project
    /// does not exist.
    pub fn add_allocation(&mut self, allocation: Allocation) -> Result<()> {
        if self.allocation(&allocation.id).is_some() {
            return Err(duplicate("allocation", &allocation.id));
        }
        self.check_references(&allocation)?;

        self.emit_change(
            Collection::Allocations,
            HistoryAction::Create,
            &allocation.id,
            &allocation.role,
            None,
            to_json(&allocation).as_ref(),
        );
        self.allocations.push(allocation);
        Ok(())
    }

    /// Reserve capacity against a lead.
    ///
    /// The allocation is stored as prospective unless it is pre-sales effort.
    ///
    /// # Errors
    /// As [`Self::add_allocation`], plus `InvalidInput` if the project is not
    /// a lead.
    pub fn add_prospect_allocation(&mut self, mut allocation: Allocation) -> Result<()> {
        let is_lead = self.project(&allocation.project_id).is_some_and(Project::is_lead);
        if !is_lead {
            return Err(ResplanError::InvalidInput(format!(
                "prospect allocations need a lead, {} is not one",
                allocation.project_id
            )));
        }
        if allocation.kind != AllocationKind::PreSales {
            allocation.kind = AllocationKind::Prospective;
        }
        self.add_allocation(allocation)
    }

    /// # Errors
    /// `NotFound` for an unknown id or a missing member/project.
    pub fn update_allocation(&mut self, allocation: Allocation) -> Result<()> {
        let index = self
            .allocations
            .iter()
            .position(|a| a.id == allocation.id)
            .ok_or_else(|| ResplanError::NotFound(format!("allocation {}", allocation.id)))?;
        self.check_references(&allocation)?;

        self.emit_change(
            Collection::Allocations,
            HistoryAction::Update,
            &allocation.id,
            &allocation.role,
            to_json(&self.allocations[index]).as_ref(),
            to_json(&allocation).as_ref(),
        );
        self.allocations[index] = allocation;
        Ok(())
    }

    /// # Errors
    /// `NotFound` for an unknown id.
    pub fn delete_allocation(&mut self, id: &str) -> Result<Allocation> {
        let index = self
            .allocations
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| ResplanError::NotFound(format!("allocation {id}")))?;
        let allocation = self.allocations.remove(index);
        self.emit_delete(Collection::Allocations, &allocation.id, &allocation.role, &allocation);
        Ok(allocation)
    }

    fn check_references(&self, allocation: &Allocation) -> Result<()> {
        if self.member(&allocation.member_id).is_none() {
            return Err(ResplanError::NotFound(format!("member {}", allocation.member_id)));
        }
        if self.project(&allocation.project_id).is_none() {
            return Err(ResplanError::NotFound(format!("project {}", allocation.project_id)));
        }
        Ok(())
    }

    fn remove_allocations_where(&mut self, predicate: impl Fn(&Allocation) -> bool) -> usize {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.allocations).into_iter().partition(|a| predicate(a));
        self.allocations = kept;
        for allocation in &removed {
            self.emit_delete(Collection::Allocations, &allocation.id, &allocation.role, allocation);
        }
        removed.len()
    }

    /* ---------------------------------------------------------------------- */
    /* Weights */
    /* ---------------------------------------------------------------------- */

    /// # Errors
    /// `InvalidInput` if any weight is above 100.
    pub fn set_weights(&mut self, weights: ProbabilityWeights) -> Result<()> {
        weights.validate()?;
        let missing = weights.missing();
        if !missing.is_empty() {
            warn!(?missing, "brackets without a weight will forecast as zero");
        }
        info!(?weights, "probability weights updated");
        self.weights = weights;
        Ok(())
    }

    pub fn reset_weights(&mut self) {
        self.weights = ProbabilityWeights::default();
        info!("probability weights reset to defaults");
    }

    /* ---------------------------------------------------------------------- */
    /* History */
    /* ---------------------------------------------------------------------- */

    fn entry(
        &self,
        collection: Collection,
        action: HistoryAction,
        record_id: &str,
        target_name: &str,
    ) -> HistoryEntry {
        new_entry(collection, action, record_id, target_name, &self.actor, self.clock.now())
    }

    fn emit_change(
        &self,
        collection: Collection,
        action: HistoryAction,
        record_id: &str,
        target_name: &str,
        before: Option<&Value>,
        after: Option<&Value>,
    ) {
        let changes = calculate_diff(before, after, DIFF_IGNORED);
        if changes.is_empty() && action == HistoryAction::Update {
            return;
        }
        let mut entry = self.entry(collection, action, record_id, target_name);
        entry.changes = changes;
        self.emit(entry);
    }

    fn emit_delete<T: Serialize>(
        &self,
        collection: Collection,
        record_id: &str,
        target_name: &str,
        record: &T,
    ) {
        let mut entry = self.entry(collection, HistoryAction::Delete, record_id, target_name);
        entry.snapshot = to_json(record);
        self.emit(entry);
    }

    fn emit(&self, entry: HistoryEntry) {
        self.pending.lock().push(entry);
    }
}

impl std::fmt::Debug for PlanningStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanningStore")
            .field("projects", &self.projects.len())
            .field("members", &self.members.len())
            .field("allocations", &self.allocations.len())
            .field("weights", &self.weights)
            .field("pending_history", &self.pending.lock().len())
            .field("actor", &self.actor)
            .finish_non_exhaustive()
    }
}

fn to_json<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

fn duplicate(kind: &str, id: &str) -> ResplanError {
    ResplanError::InvalidInput(format!("{kind} {id} already exists"))
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(duplicate(kind, id));
        }
    }
    Ok(())
}
