use tracing::info;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::forms::work_schedule::{validate_location, validate_schedule, validate_time};
use crate::model::work_schedule::{
    AssignSchedule, WorkSchedule, WorkScheduleLocation, WorkScheduleLocationPayload,
    WorkSchedulePayload, WorkScheduleTime, WorkScheduleTimePayload,
};
use crate::models::MessageResponse;
use crate::routes;

pub async fn list(client: &ApiClient) -> ClientResult<Vec<WorkSchedule>> {
    client.get(routes::WORK_SCHEDULES).await
}

pub async fn get(client: &ApiClient, id: Uuid) -> ClientResult<WorkSchedule> {
    client.get(&routes::work_schedule(id)).await
}

pub async fn create(
    client: &ApiClient,
    payload: &WorkSchedulePayload,
) -> ClientResult<WorkSchedule> {
    validate_schedule(payload)?;
    let schedule: WorkSchedule = client.post(routes::WORK_SCHEDULES, payload).await?;
    info!(
        schedule_id = %schedule.id,
        arrangement = %schedule.work_arrangement,
        "Work schedule created"
    );
    Ok(schedule)
}

pub async fn update(
    client: &ApiClient,
    id: Uuid,
    payload: &WorkSchedulePayload,
) -> ClientResult<WorkSchedule> {
    validate_schedule(payload)?;
    client.put(&routes::work_schedule(id), payload).await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> ClientResult<MessageResponse> {
    client.delete(&routes::work_schedule(id)).await
}

// Times

pub async fn add_time(
    client: &ApiClient,
    schedule_id: Uuid,
    payload: &WorkScheduleTimePayload,
) -> ClientResult<WorkScheduleTime> {
    validate_time(payload)?;
    client
        .post(&routes::work_schedule_times(schedule_id), payload)
        .await
}

pub async fn update_time(
    client: &ApiClient,
    schedule_id: Uuid,
    time_id: Uuid,
    payload: &WorkScheduleTimePayload,
) -> ClientResult<WorkScheduleTime> {
    validate_time(payload)?;
    client
        .put(&routes::work_schedule_time(schedule_id, time_id), payload)
        .await
}

pub async fn delete_time(
    client: &ApiClient,
    schedule_id: Uuid,
    time_id: Uuid,
) -> ClientResult<MessageResponse> {
    client
        .delete(&routes::work_schedule_time(schedule_id, time_id))
        .await
}

// Locations

pub async fn add_location(
    client: &ApiClient,
    schedule_id: Uuid,
    payload: &WorkScheduleLocationPayload,
) -> ClientResult<WorkScheduleLocation> {
    validate_location(payload)?;
    client
        .post(&routes::work_schedule_locations(schedule_id), payload)
        .await
}

pub async fn update_location(
    client: &ApiClient,
    schedule_id: Uuid,
    location_id: Uuid,
    payload: &WorkScheduleLocationPayload,
) -> ClientResult<WorkScheduleLocation> {
    validate_location(payload)?;
    client
        .put(
            &routes::work_schedule_location(schedule_id, location_id),
            payload,
        )
        .await
}

pub async fn delete_location(
    client: &ApiClient,
    schedule_id: Uuid,
    location_id: Uuid,
) -> ClientResult<MessageResponse> {
    client
        .delete(&routes::work_schedule_location(schedule_id, location_id))
        .await
}

/// Assign the schedule to one employee.
pub async fn assign(
    client: &ApiClient,
    schedule_id: Uuid,
    employee_id: Uuid,
) -> ClientResult<MessageResponse> {
    client
        .post(
            &routes::work_schedule_assign(schedule_id),
            &AssignSchedule { employee_id },
        )
        .await
}
