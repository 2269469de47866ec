use crate::error::ValidationError;
use crate::model::geo::GeoPoint;
use crate::model::work_schedule::{
    WorkSchedulePayload, WorkScheduleLocationPayload, WorkScheduleTimePayload,
};

pub const MAX_LATE_TOLERANCE_MINUTES: u32 = 120;
pub const MAX_GEOFENCE_RADIUS_M: f64 = 10_000.0;

pub fn validate_schedule(payload: &WorkSchedulePayload) -> Result<(), ValidationError> {
    if payload.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Schedule name is required"));
    }
    Ok(())
}

pub fn validate_time(payload: &WorkScheduleTimePayload) -> Result<(), ValidationError> {
    if payload.clock_out_time <= payload.clock_in_time {
        return Err(ValidationError::new(
            "clock_out_time",
            "Clock-out time must be after clock-in time",
        ));
    }
    match (payload.break_start_time, payload.break_end_time) {
        (Some(start), Some(end)) => {
            if end <= start {
                return Err(ValidationError::new(
                    "break_end_time",
                    "Break must end after it starts",
                ));
            }
            if start < payload.clock_in_time || end > payload.clock_out_time {
                return Err(ValidationError::new(
                    "break_start_time",
                    "Break must be within working hours",
                ));
            }
        }
        (None, None) => {}
        _ => {
            return Err(ValidationError::new(
                "break_end_time",
                "Break needs both a start and an end time",
            ));
        }
    }
    if payload.late_tolerance_minutes > MAX_LATE_TOLERANCE_MINUTES {
        return Err(ValidationError::new(
            "late_tolerance_minutes",
            format!("Late tolerance cannot exceed {MAX_LATE_TOLERANCE_MINUTES} minutes"),
        ));
    }
    Ok(())
}

pub fn validate_location(payload: &WorkScheduleLocationPayload) -> Result<(), ValidationError> {
    if payload.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Location name is required"));
    }
    if !GeoPoint::new(payload.latitude, payload.longitude).is_valid() {
        return Err(ValidationError::new("latitude", "Coordinates are out of range"));
    }
    if !(payload.radius_m > 0.0 && payload.radius_m <= MAX_GEOFENCE_RADIUS_M) {
        return Err(ValidationError::new(
            "radius_m",
            format!("Radius must be between 1 and {MAX_GEOFENCE_RADIUS_M} metres"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day(clock_in: NaiveTime, clock_out: NaiveTime) -> WorkScheduleTimePayload {
        WorkScheduleTimePayload {
            day_of_week: Weekday::Mon,
            clock_in_time: clock_in,
            clock_out_time: clock_out,
            break_start_time: None,
            break_end_time: None,
            late_tolerance_minutes: 15,
        }
    }

    #[test]
    fn clock_out_must_follow_clock_in() {
        assert!(validate_time(&day(t(8, 0), t(17, 0))).is_ok());
        assert_eq!(
            validate_time(&day(t(17, 0), t(8, 0))).unwrap_err().field,
            "clock_out_time"
        );
    }

    #[test]
    fn break_must_be_complete_and_inside_hours() {
        let mut payload = day(t(8, 0), t(17, 0));
        payload.break_start_time = Some(t(12, 0));
        assert!(validate_time(&payload).is_err());

        payload.break_end_time = Some(t(13, 0));
        assert!(validate_time(&payload).is_ok());

        payload.break_end_time = Some(t(18, 0));
        assert!(validate_time(&payload).is_err());
    }

    #[test]
    fn geofence_radius_bounds() {
        let mut loc = WorkScheduleLocationPayload {
            name: "HQ".into(),
            latitude: -6.2,
            longitude: 106.8,
            radius_m: 0.0,
        };
        assert_eq!(validate_location(&loc).unwrap_err().field, "radius_m");
        loc.radius_m = 150.0;
        assert!(validate_location(&loc).is_ok());
        loc.latitude = -100.0;
        assert_eq!(validate_location(&loc).unwrap_err().field, "latitude");
    }
}
