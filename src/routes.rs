//! Endpoint paths of the HRIS API, relative to the configured base URL.

use uuid::Uuid;

// Auth
pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_LOGOUT: &str = "/auth/logout";
pub const AUTH_ME: &str = "/auth/me";

// Attendance
pub const ATTENDANCE: &str = "/attendance";
pub const ATTENDANCE_TODAY: &str = "/attendance/today";
pub const ATTENDANCE_CLOCK_IN: &str = "/attendance/clock-in";
pub const ATTENDANCE_CLOCK_OUT: &str = "/attendance/clock-out";

pub fn attendance(id: Uuid) -> String {
    format!("{ATTENDANCE}/{id}")
}

pub fn attendance_approve(id: Uuid) -> String {
    format!("{ATTENDANCE}/{id}/approve")
}

pub fn attendance_reject(id: Uuid) -> String {
    format!("{ATTENDANCE}/{id}/reject")
}

// Leave
pub const LEAVE_REQUESTS: &str = "/leave/requests";
pub const LEAVE_QUOTA: &str = "/leave/quota";
pub const LEAVE_QUOTA_ADJUST: &str = "/leave/quota/adjust";
pub const LEAVE_TYPES: &str = "/leave/types";

pub fn leave_request_action(id: Uuid, action: &str) -> String {
    format!("{LEAVE_REQUESTS}/{id}/{action}")
}

pub fn leave_type(id: Uuid) -> String {
    format!("{LEAVE_TYPES}/{id}")
}

// Payroll
pub const PAYROLL_RECORDS: &str = "/payroll/records";
pub const PAYROLL_FINALIZE: &str = "/payroll/finalize";
pub const PAYROLL_SETTINGS: &str = "/payroll/settings";

pub fn payroll_record(id: Uuid) -> String {
    format!("{PAYROLL_RECORDS}/{id}")
}

// Subscription
pub const SUBSCRIPTION: &str = "/subscription";
pub const SUBSCRIPTION_PLANS: &str = "/subscription/plans";
pub const SUBSCRIPTION_CHECKOUT: &str = "/subscription/checkout";
pub const SUBSCRIPTION_UPGRADE: &str = "/subscription/upgrade";
pub const SUBSCRIPTION_DOWNGRADE: &str = "/subscription/downgrade";
pub const SUBSCRIPTION_CHANGE_SEATS: &str = "/subscription/change-seats";
pub const SUBSCRIPTION_CANCEL: &str = "/subscription/cancel";
pub const SUBSCRIPTION_INVOICES: &str = "/subscription/invoices";

pub fn invoice_cancel(id: Uuid) -> String {
    format!("{SUBSCRIPTION_INVOICES}/{id}/cancel")
}

// Employees
pub const EMPLOYEES: &str = "/employees";

pub fn employee(id: Uuid) -> String {
    format!("{EMPLOYEES}/{id}")
}

// Master data: `/branches`, `/grades`, `/positions`
pub fn master_item(collection: &str, id: Uuid) -> String {
    format!("{collection}/{id}")
}

// Work schedules
pub const WORK_SCHEDULES: &str = "/work-schedules";

pub fn work_schedule(id: Uuid) -> String {
    format!("{WORK_SCHEDULES}/{id}")
}

pub fn work_schedule_times(schedule_id: Uuid) -> String {
    format!("{WORK_SCHEDULES}/{schedule_id}/times")
}

pub fn work_schedule_time(schedule_id: Uuid, time_id: Uuid) -> String {
    format!("{WORK_SCHEDULES}/{schedule_id}/times/{time_id}")
}

pub fn work_schedule_locations(schedule_id: Uuid) -> String {
    format!("{WORK_SCHEDULES}/{schedule_id}/locations")
}

pub fn work_schedule_location(schedule_id: Uuid, location_id: Uuid) -> String {
    format!("{WORK_SCHEDULES}/{schedule_id}/locations/{location_id}")
}

pub fn work_schedule_assign(schedule_id: Uuid) -> String {
    format!("{WORK_SCHEDULES}/{schedule_id}/assign")
}

// Company
pub const COMPANIES: &str = "/companies";
