use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::model::geo::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum WorkArrangement {
    /// Work from office: clock-in must happen inside a schedule location.
    Wfo,
    /// Work from anywhere
    Wfa,
    Hybrid,
}

impl WorkArrangement {
    pub fn requires_location(&self) -> bool {
        !matches!(self, WorkArrangement::Wfa)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkSchedule {
    pub id: Uuid,
    pub name: String,
    pub work_arrangement: WorkArrangement,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub times: Vec<WorkScheduleTime>,
    #[serde(default)]
    pub locations: Vec<WorkScheduleLocation>,
}

impl WorkSchedule {
    pub fn time_for(&self, day: Weekday) -> Option<&WorkScheduleTime> {
        self.times.iter().find(|t| t.day_of_week == day)
    }

    /// Nearest configured location that contains `point`, if any.
    pub fn matching_location(&self, point: &GeoPoint) -> Option<&WorkScheduleLocation> {
        self.locations
            .iter()
            .filter(|l| l.contains(point))
            .min_by(|a, b| a.distance_m(point).total_cmp(&b.distance_m(point)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkScheduleTime {
    pub id: Uuid,
    pub day_of_week: Weekday,
    pub clock_in_time: NaiveTime,
    pub clock_out_time: NaiveTime,
    #[serde(default)]
    pub break_start_time: Option<NaiveTime>,
    #[serde(default)]
    pub break_end_time: Option<NaiveTime>,
    #[serde(default)]
    pub late_tolerance_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkScheduleLocation {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

impl WorkScheduleLocation {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn distance_m(&self, point: &GeoPoint) -> f64 {
        self.center().distance_m(point)
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.distance_m(point) <= self.radius_m
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkSchedulePayload {
    pub name: String,
    pub work_arrangement: WorkArrangement,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkScheduleTimePayload {
    pub day_of_week: Weekday,
    pub clock_in_time: NaiveTime,
    pub clock_out_time: NaiveTime,
    pub break_start_time: Option<NaiveTime>,
    pub break_end_time: Option<NaiveTime>,
    pub late_tolerance_minutes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkScheduleLocationPayload {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssignSchedule {
    pub employee_id: Uuid,
}
