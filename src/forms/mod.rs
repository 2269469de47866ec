//! Client-side validation run before a request is issued. The server stays
//! authoritative; these checks only keep obviously invalid requests off the
//! wire.

pub mod clock;
pub mod company;
pub mod employee;
pub mod leave_request;
pub mod upload;
pub mod work_schedule;
