pub mod attendance;
pub mod company;
pub mod employee;
pub mod geo;
pub mod leave_quota;
pub mod leave_request;
pub mod leave_type;
pub mod master_data;
pub mod payroll;
pub mod role;
pub mod subscription;
pub mod work_schedule;
