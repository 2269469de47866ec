//! One module per endpoint family. Every function is a single request; the
//! server stays the owner of all state.

pub mod attendance;
pub mod company;
pub mod employee;
pub mod leave;
pub mod master_data;
pub mod payroll;
pub mod subscription;
pub mod work_schedule;
