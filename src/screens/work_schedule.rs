use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::work_schedule as api;
use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult, ValidationError};
use crate::model::work_schedule::{
    WorkSchedule, WorkScheduleLocation, WorkScheduleLocationPayload, WorkSchedulePayload,
    WorkScheduleTime, WorkScheduleTimePayload,
};
use crate::screens::{Confirm, confirmed, report};
use crate::view::{ListView, Notifier, Searchable, Toast};

impl Searchable for WorkSchedule {
    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.name,
            self.work_arrangement,
            self.description.as_deref().unwrap_or_default()
        )
    }
}

/// Result of assigning a schedule to one employee.
#[derive(Debug)]
pub struct AssignmentOutcome {
    pub employee_id: Uuid,
    pub result: ClientResult<()>,
}

/// Outcomes of a bulk assignment, one per employee, in request order.
#[derive(Debug, Default)]
pub struct AssignmentReport {
    pub outcomes: Vec<AssignmentOutcome>,
}

impl AssignmentReport {
    pub fn succeeded(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| o.employee_id)
    }

    pub fn failed(&self) -> impl Iterator<Item = (Uuid, &ClientError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.employee_id, e)))
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

pub struct WorkScheduleScreen {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    pub list: ListView<WorkSchedule>,
}

impl WorkScheduleScreen {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        client.require_session()?.require_admin()?;
        Ok(Self {
            client,
            notifier,
            list: ListView::new(10),
        })
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let client = &self.client;
        self.list
            .load(|| api::list(client), "Failed to load work schedules")
            .await
    }

    pub async fn create(&mut self, payload: &WorkSchedulePayload) -> ClientResult<WorkSchedule> {
        let outcome = api::create(&self.client, payload).await;
        let schedule = report(
            self.notifier.as_ref(),
            outcome,
            "Work schedule created",
            "Failed to create work schedule",
        )?;
        self.refresh().await.ok();
        Ok(schedule)
    }

    pub async fn update(
        &mut self,
        id: Uuid,
        payload: &WorkSchedulePayload,
    ) -> ClientResult<WorkSchedule> {
        let outcome = api::update(&self.client, id, payload).await;
        let schedule = report(
            self.notifier.as_ref(),
            outcome,
            "Work schedule updated",
            "Failed to update work schedule",
        )?;
        self.refresh().await.ok();
        Ok(schedule)
    }

    pub async fn delete(&mut self, id: Uuid, confirm: &dyn Confirm) -> ClientResult<()> {
        let outcome = match confirmed(confirm, "Delete this work schedule?") {
            Ok(()) => api::delete(&self.client, id).await,
            Err(e) => Err(e),
        };
        report(
            self.notifier.as_ref(),
            outcome,
            "Work schedule deleted",
            "Failed to delete work schedule",
        )?;
        self.refresh().await.ok();
        Ok(())
    }

    /// Add a working day. One entry per weekday.
    pub async fn add_time(
        &mut self,
        schedule_id: Uuid,
        payload: &WorkScheduleTimePayload,
    ) -> ClientResult<WorkScheduleTime> {
        let duplicate = self
            .list
            .items()
            .iter()
            .find(|s| s.id == schedule_id)
            .is_some_and(|s| s.time_for(payload.day_of_week).is_some());
        let outcome = if duplicate {
            Err(ValidationError::new(
                "day_of_week",
                format!("{} already has working hours", payload.day_of_week),
            )
            .into())
        } else {
            api::add_time(&self.client, schedule_id, payload).await
        };
        let time = report(
            self.notifier.as_ref(),
            outcome,
            "Working hours added",
            "Failed to add working hours",
        )?;
        self.refresh().await.ok();
        Ok(time)
    }

    pub async fn remove_time(&mut self, schedule_id: Uuid, time_id: Uuid) -> ClientResult<()> {
        let outcome = api::delete_time(&self.client, schedule_id, time_id).await;
        report(
            self.notifier.as_ref(),
            outcome,
            "Working hours removed",
            "Failed to remove working hours",
        )?;
        self.refresh().await.ok();
        Ok(())
    }

    pub async fn add_location(
        &mut self,
        schedule_id: Uuid,
        payload: &WorkScheduleLocationPayload,
    ) -> ClientResult<WorkScheduleLocation> {
        let outcome = api::add_location(&self.client, schedule_id, payload).await;
        let location = report(
            self.notifier.as_ref(),
            outcome,
            "Location added",
            "Failed to add location",
        )?;
        self.refresh().await.ok();
        Ok(location)
    }

    pub async fn remove_location(
        &mut self,
        schedule_id: Uuid,
        location_id: Uuid,
    ) -> ClientResult<()> {
        let outcome = api::delete_location(&self.client, schedule_id, location_id).await;
        report(
            self.notifier.as_ref(),
            outcome,
            "Location removed",
            "Failed to remove location",
        )?;
        self.refresh().await.ok();
        Ok(())
    }

    /// Assign the schedule to every employee concurrently. Each call is
    /// independent; failures are reported per employee and never stop the
    /// others.
    pub async fn assign(&self, schedule_id: Uuid, employee_ids: &[Uuid]) -> AssignmentReport {
        let calls = employee_ids.iter().map(|&employee_id| {
            let client = &self.client;
            async move {
                let result = api::assign(client, schedule_id, employee_id)
                    .await
                    .map(|_| ());
                AssignmentOutcome {
                    employee_id,
                    result,
                }
            }
        });
        let report = AssignmentReport {
            outcomes: join_all(calls).await,
        };

        let ok = report.succeeded().count();
        let failed = report.outcomes.len() - ok;
        for (employee_id, e) in report.failed() {
            warn!(%schedule_id, %employee_id, error = %e, "Schedule assignment failed");
        }
        info!(%schedule_id, ok, failed, "Schedule assigned");

        if failed == 0 {
            self.notifier
                .success(&format!("Schedule assigned to {ok} employee(s)"));
        } else {
            self.notifier.notify(Toast::Error(format!(
                "Schedule assigned to {ok} employee(s), {failed} failed"
            )));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{ScriptedTransport, client_with};
    use crate::screens::AssumeYes;
    use crate::view::{LoadState, MemoryNotifier, Toast};
    use chrono::{NaiveTime, Weekday};
    use serde_json::json;

    fn screen(transport: Arc<ScriptedTransport>) -> (WorkScheduleScreen, MemoryNotifier) {
        let notifier = MemoryNotifier::new();
        let screen =
            WorkScheduleScreen::new(client_with(transport, "admin"), Arc::new(notifier.clone()))
                .unwrap();
        (screen, notifier)
    }

    #[tokio::test]
    async fn partial_failure_is_reported_per_employee() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(200, json!({"message": "Assigned"}))
                .reply(422, json!({"message": "Employee already has a schedule"}))
                .reply(200, json!({"message": "Assigned"})),
        );
        let (screen, notifier) = screen(transport.clone());
        let employees = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];

        let report = screen.assign(Uuid::new_v4(), &employees).await;

        assert_eq!(transport.requests().len(), 3);
        assert!(!report.is_complete());
        assert_eq!(report.succeeded().collect::<Vec<_>>(), vec![employees[0], employees[2]]);
        let failed: Vec<_> = report.failed().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, employees[1]);
        assert_eq!(
            failed[0].1.toast_message("Failed to assign schedule"),
            "Employee already has a schedule"
        );
        assert_eq!(
            notifier.last(),
            Some(Toast::Error("Schedule assigned to 2 employee(s), 1 failed".into()))
        );
    }

    #[tokio::test]
    async fn second_entry_for_same_weekday_sends_nothing() {
        let schedule_id = Uuid::new_v4();
        let transport = Arc::new(ScriptedTransport::new().ok(json!([{
            "id": schedule_id,
            "name": "Office hours",
            "work_arrangement": "WFO",
            "times": [{
                "id": Uuid::new_v4(),
                "day_of_week": "Mon",
                "clock_in_time": "08:00:00",
                "clock_out_time": "17:00:00"
            }]
        }])));
        let (mut screen, _) = screen(transport.clone());
        screen.refresh().await.unwrap();

        let payload = WorkScheduleTimePayload {
            day_of_week: Weekday::Mon,
            clock_in_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            clock_out_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            break_start_time: None,
            break_end_time: None,
            late_tolerance_minutes: 15,
        };
        assert!(screen.add_time(schedule_id, &payload).await.is_err());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn accepted_removals_succeed_when_refetch_fails() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(200, json!({"message": "Deleted"}))
                .reply(500, json!({}))
                .reply(200, json!({"message": "Deleted"}))
                .reply(500, json!({}))
                .reply(200, json!({"message": "Deleted"})),
        );
        let (mut screen, notifier) = screen(transport.clone());
        let schedule_id = Uuid::new_v4();

        screen.delete(schedule_id, &AssumeYes).await.unwrap();
        screen.remove_time(schedule_id, Uuid::new_v4()).await.unwrap();
        screen
            .remove_location(schedule_id, Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(transport.requests().len(), 6);
        assert_eq!(notifier.last(), Some(Toast::Success("Location removed".into())));
        assert!(matches!(screen.list.state(), LoadState::Failed(_)));
    }
}
