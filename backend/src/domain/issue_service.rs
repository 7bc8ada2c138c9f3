//! Issue workflow: creation, department routing, and status transitions.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::auth::Actor;
use crate::domain::error::DomainError;
use crate::domain::issue::{Issue, IssueFilter, IssuePriority, IssueReporter, IssueStatus, IssueTitle};
use crate::domain::ports::{DepartmentRepository, IssueRepository};

/// Validated inputs for opening an issue.
#[derive(Debug, Clone)]
pub struct NewIssue {
    /// Short summary.
    pub title: IssueTitle,
    /// Free-text description.
    pub description: String,
    /// Department to route the issue to.
    pub department_id: Uuid,
    /// Room the issue concerns, when any.
    pub room_id: Option<Uuid>,
    /// Urgency; defaults to medium.
    pub priority: IssuePriority,
}

/// Issue workflow use-cases over the repository ports.
#[derive(Clone)]
pub struct IssueService {
    issues: Arc<dyn IssueRepository>,
    departments: Arc<dyn DepartmentRepository>,
}

impl IssueService {
    /// Wire the service to its ports.
    pub fn new(issues: Arc<dyn IssueRepository>, departments: Arc<dyn DepartmentRepository>) -> Self {
        Self {
            issues,
            departments,
        }
    }

    /// Open an issue on behalf of the acting staff member or guest.
    ///
    /// Guests may only report issues for their own room; a missing room on a
    /// guest report is filled in from the stay.
    pub async fn create(&self, actor: Actor, new_issue: NewIssue) -> Result<Issue, DomainError> {
        self.require_department(new_issue.department_id).await?;

        let (reporter, room_id) = match actor {
            Actor::Staff { id, .. } => (IssueReporter::Staff { id }, new_issue.room_id),
            Actor::Guest { id, room_id } => {
                if let Some(requested) = new_issue.room_id
                    && requested != room_id
                {
                    return Err(DomainError::forbidden(
                        "guests may only report issues for their own room",
                    ));
                }
                (IssueReporter::Guest { id }, Some(room_id))
            }
        };

        let issue = Issue::open(
            new_issue.title,
            new_issue.description,
            new_issue.department_id,
            room_id,
            reporter,
            new_issue.priority,
        );
        self.issues.create(&issue).await?;
        info!(issue_id = %issue.id, reference = %issue.reference, "issue opened");
        Ok(issue)
    }

    /// List issues visible to the actor, applying the filter.
    ///
    /// Guests only ever see their own reports, regardless of the filter.
    pub async fn list(&self, actor: Actor, mut filter: IssueFilter) -> Result<Vec<Issue>, DomainError> {
        if let Actor::Guest { id, .. } = actor {
            filter.reporter = Some(IssueReporter::Guest { id });
        }
        Ok(self.issues.list(&filter).await?)
    }

    /// Fetch a single issue visible to the actor.
    pub async fn get(&self, actor: Actor, id: Uuid) -> Result<Issue, DomainError> {
        let issue = self.require_issue(id).await?;
        if let Actor::Guest { id: guest_id, .. } = actor
            && issue.reporter != (IssueReporter::Guest { id: guest_id })
        {
            // Hide other reporters' issues entirely rather than admitting
            // their existence.
            return Err(DomainError::not_found("issue not found"));
        }
        Ok(issue)
    }

    /// Move an issue along its workflow.
    ///
    /// Resolving requires non-empty remarks; reopening a resolved issue back
    /// to `in_progress` keeps the previous remarks for the audit trail.
    pub async fn update_status(
        &self,
        id: Uuid,
        next: IssueStatus,
        remarks: Option<String>,
    ) -> Result<Issue, DomainError> {
        let mut issue = self.require_issue(id).await?;
        if !issue.status.can_transition(next) {
            return Err(DomainError::invalid_request(format!(
                "issue cannot move from {} to {}",
                issue.status, next
            ))
            .with_details(json!({ "from": issue.status, "to": next })));
        }
        if next == IssueStatus::Resolved {
            let remarks = remarks
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| {
                    DomainError::invalid_request("resolution remarks are required to resolve")
                })?;
            issue.resolution_remarks = Some(remarks.to_owned());
        }
        issue.status = next;
        issue.updated_at = Utc::now();
        self.issues.update(&issue).await?;
        info!(issue_id = %issue.id, status = %issue.status, "issue status updated");
        Ok(issue)
    }

    /// Re-route an issue to another department.
    pub async fn reroute(&self, id: Uuid, department_id: Uuid) -> Result<Issue, DomainError> {
        self.require_department(department_id).await?;
        let mut issue = self.require_issue(id).await?;
        issue.department_id = department_id;
        issue.updated_at = Utc::now();
        self.issues.update(&issue).await?;
        Ok(issue)
    }

    async fn require_issue(&self, id: Uuid) -> Result<Issue, DomainError> {
        self.issues
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("issue not found"))
    }

    async fn require_department(&self, id: Uuid) -> Result<(), DomainError> {
        self.departments
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::invalid_request("unknown department"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::department::Department;
    use crate::domain::error::ErrorCode;
    use crate::domain::role::RoleScope;
    use crate::test_support::{InMemoryDepartmentRepository, InMemoryIssueRepository};
    use rstest::rstest;

    struct Fixture {
        departments: Arc<InMemoryDepartmentRepository>,
        service: IssueService,
        housekeeping: Department,
    }

    async fn fixture() -> Fixture {
        let issues = Arc::new(InMemoryIssueRepository::default());
        let departments = Arc::new(InMemoryDepartmentRepository::default());
        let housekeeping = Department::new("Housekeeping", None);
        departments.create(&housekeeping).await.expect("seed");
        let service = IssueService::new(issues, departments.clone());
        Fixture {
            departments,
            service,
            housekeeping,
        }
    }

    fn staff_actor() -> Actor {
        Actor::Staff {
            id: Uuid::new_v4(),
            scope: RoleScope::Staff,
        }
    }

    fn guest_actor(room_id: Uuid) -> (Actor, Uuid) {
        let id = Uuid::new_v4();
        (Actor::Guest { id, room_id }, id)
    }

    fn new_issue(department_id: Uuid, room_id: Option<Uuid>) -> NewIssue {
        NewIssue {
            title: IssueTitle::new("Leaking shower head").expect("valid title"),
            description: "Water pooling on the bathroom floor".to_owned(),
            department_id,
            room_id,
            priority: IssuePriority::default(),
        }
    }

    #[tokio::test]
    async fn staff_report_keeps_requested_room() {
        let fx = fixture().await;
        let room_id = Uuid::new_v4();
        let issue = fx
            .service
            .create(staff_actor(), new_issue(fx.housekeeping.id, Some(room_id)))
            .await
            .expect("created");
        assert_eq!(issue.room_id, Some(room_id));
        assert_eq!(issue.status, IssueStatus::Open);
    }

    #[tokio::test]
    async fn guest_report_is_pinned_to_own_room() {
        let fx = fixture().await;
        let room_id = Uuid::new_v4();
        let (actor, guest_id) = guest_actor(room_id);

        let issue = fx
            .service
            .create(actor, new_issue(fx.housekeeping.id, None))
            .await
            .expect("created");
        assert_eq!(issue.room_id, Some(room_id));
        assert_eq!(issue.reporter, IssueReporter::Guest { id: guest_id });
    }

    #[tokio::test]
    async fn guest_cannot_report_for_another_room() {
        let fx = fixture().await;
        let (actor, _) = guest_actor(Uuid::new_v4());

        let err = fx
            .service
            .create(actor, new_issue(fx.housekeeping.id, Some(Uuid::new_v4())))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn unknown_department_is_rejected() {
        let fx = fixture().await;
        let err = fx
            .service
            .create(staff_actor(), new_issue(Uuid::new_v4(), None))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn resolving_requires_remarks() {
        let fx = fixture().await;
        let issue = fx
            .service
            .create(staff_actor(), new_issue(fx.housekeeping.id, None))
            .await
            .expect("created");
        fx.service
            .update_status(issue.id, IssueStatus::InProgress, None)
            .await
            .expect("picked up");

        let err = fx
            .service
            .update_status(issue.id, IssueStatus::Resolved, None)
            .await
            .expect_err("remarks required");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);

        let blank = fx
            .service
            .update_status(issue.id, IssueStatus::Resolved, Some("   ".to_owned()))
            .await
            .expect_err("blank remarks rejected");
        assert_eq!(blank.code(), ErrorCode::InvalidRequest);

        let resolved = fx
            .service
            .update_status(
                issue.id,
                IssueStatus::Resolved,
                Some("Replaced the washer".to_owned()),
            )
            .await
            .expect("resolved");
        assert_eq!(
            resolved.resolution_remarks.as_deref(),
            Some("Replaced the washer")
        );
    }

    #[rstest]
    #[case(IssueStatus::Resolved)]
    #[tokio::test]
    async fn open_issue_cannot_jump_ahead(#[case] target: IssueStatus) {
        let fx = fixture().await;
        let issue = fx
            .service
            .create(staff_actor(), new_issue(fx.housekeeping.id, None))
            .await
            .expect("created");

        let err = fx
            .service
            .update_status(issue.id, target, Some("done".to_owned()))
            .await
            .expect_err("transition rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn reopening_keeps_previous_remarks() {
        let fx = fixture().await;
        let issue = fx
            .service
            .create(staff_actor(), new_issue(fx.housekeeping.id, None))
            .await
            .expect("created");
        fx.service
            .update_status(issue.id, IssueStatus::InProgress, None)
            .await
            .expect("picked up");
        fx.service
            .update_status(issue.id, IssueStatus::Resolved, Some("Fixed".to_owned()))
            .await
            .expect("resolved");

        let reopened = fx
            .service
            .update_status(issue.id, IssueStatus::InProgress, None)
            .await
            .expect("reopened");
        assert_eq!(reopened.status, IssueStatus::InProgress);
        assert_eq!(reopened.resolution_remarks.as_deref(), Some("Fixed"));
    }

    #[tokio::test]
    async fn guests_only_see_their_own_issues() {
        let fx = fixture().await;
        let room_id = Uuid::new_v4();
        let (guest, _) = guest_actor(room_id);
        let (other_guest, _) = guest_actor(Uuid::new_v4());

        let own = fx
            .service
            .create(guest, new_issue(fx.housekeeping.id, None))
            .await
            .expect("created");
        fx.service
            .create(other_guest, new_issue(fx.housekeeping.id, None))
            .await
            .expect("created");
        fx.service
            .create(staff_actor(), new_issue(fx.housekeeping.id, None))
            .await
            .expect("created");

        let visible = fx
            .service
            .list(guest, IssueFilter::default())
            .await
            .expect("listed");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, own.id);

        let err = fx
            .service
            .get(other_guest, own.id)
            .await
            .expect_err("hidden");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn reroute_validates_target_department() {
        let fx = fixture().await;
        let issue = fx
            .service
            .create(staff_actor(), new_issue(fx.housekeeping.id, None))
            .await
            .expect("created");

        let err = fx
            .service
            .reroute(issue.id, Uuid::new_v4())
            .await
            .expect_err("unknown department");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);

        let maintenance = Department::new("Maintenance", None);
        fx.departments.create(&maintenance).await.expect("seed");
        let rerouted = fx
            .service
            .reroute(issue.id, maintenance.id)
            .await
            .expect("rerouted");
        assert_eq!(rerouted.department_id, maintenance.id);
    }
}
