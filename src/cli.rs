use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime, Weekday};
use clap::{Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use hris_client::model::attendance::AttendanceStatus;
use hris_client::model::employee::{EmploymentStatus, EmploymentType};
use hris_client::model::leave_request::{LeaveDurationType, LeaveStatus};
use hris_client::model::payroll::PayrollStatus;
use hris_client::model::subscription::BillingCycle;
use hris_client::model::work_schedule::WorkArrangement;

#[derive(Parser, Debug)]
#[command(name = "hris", version, about = "Command line client for the HRIS API")]
pub struct Cli {
    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Answer yes to every confirmation
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and print the access token to export as HRIS_TOKEN
    Login {
        email: String,
        #[arg(long, env = "HRIS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Revoke the current token on the server
    Logout,
    /// Show the logged in user
    Whoami,
    #[command(subcommand)]
    Attendance(AttendanceCmd),
    #[command(subcommand)]
    Leave(LeaveCmd),
    #[command(subcommand)]
    Employee(EmployeeCmd),
    #[command(subcommand)]
    Payroll(PayrollCmd),
    #[command(subcommand)]
    Subscription(SubscriptionCmd),
    /// Branches, grades and positions
    Master {
        #[arg(value_enum)]
        kind: MasterKind,
        #[command(subcommand)]
        action: MasterCmd,
    },
    #[command(subcommand)]
    Schedule(ScheduleCmd),
    #[command(subcommand)]
    Company(CompanyCmd),
}

#[derive(Args, Debug, Default)]
pub struct Paging {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 10)]
    pub per_page: u32,
}

#[derive(Args, Debug)]
pub struct ClockArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
    /// Selfie taken for this clock event
    #[arg(long)]
    pub photo: PathBuf,
    #[arg(long)]
    pub notes: Option<String>,
    /// Schedule location the employee is clocking in at
    #[arg(long)]
    pub location_id: Option<Uuid>,
}

#[derive(Subcommand, Debug)]
pub enum AttendanceCmd {
    List {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        status: Option<AttendanceStatus>,
        #[arg(long)]
        employee: Option<Uuid>,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    Today,
    ClockIn(ClockArgs),
    ClockOut(ClockArgs),
    Approve { id: Uuid },
    Reject {
        id: Uuid,
        #[arg(long)]
        reason: String,
    },
    Delete { id: Uuid },
    /// Counts per status, as on the dashboard chart
    Summary {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        employee: Option<Uuid>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LeaveCmd {
    List {
        #[arg(long)]
        status: Option<LeaveStatus>,
        #[arg(long)]
        employee: Option<Uuid>,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    Request {
        /// Leave type id, code or name
        #[arg(long = "type")]
        leave_type: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long, default_value = "full_day")]
        duration: LeaveDurationType,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        attachment: Option<PathBuf>,
    },
    Approve { id: Uuid },
    Reject {
        id: Uuid,
        #[arg(long)]
        reason: String,
    },
    Cancel { id: Uuid },
    Quota {
        #[arg(long)]
        employee: Option<Uuid>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Add or remove days from an employee's balance
    Adjust {
        #[arg(long)]
        employee: Uuid,
        #[arg(long = "type")]
        leave_type: Uuid,
        #[arg(long)]
        year: i32,
        #[arg(long, allow_hyphen_values = true)]
        delta: f64,
        #[arg(long)]
        reason: String,
    },
    Types,
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCmd {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        branch: Option<Uuid>,
        #[arg(long)]
        status: Option<EmploymentStatus>,
        #[command(flatten)]
        paging: Paging,
    },
    Show { id: Uuid },
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, default_value = "permanent")]
        employment_type: EmploymentType,
        #[arg(long)]
        join_date: NaiveDate,
        #[arg(long)]
        branch: Option<Uuid>,
        #[arg(long)]
        position: Option<Uuid>,
        #[arg(long)]
        grade: Option<Uuid>,
    },
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        status: Option<EmploymentStatus>,
        #[arg(long)]
        branch: Option<Uuid>,
        #[arg(long)]
        position: Option<Uuid>,
    },
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum PayrollCmd {
    List {
        #[arg(long, requires = "year")]
        month: Option<u32>,
        #[arg(long, requires = "month")]
        year: Option<i32>,
        #[arg(long)]
        status: Option<PayrollStatus>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Mark draft payroll of a period as paid
    Finalize {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
        /// Records to finalize; every draft of the period when omitted
        ids: Vec<Uuid>,
    },
    Settings {
        #[arg(long)]
        payday: Option<u32>,
        #[arg(long)]
        late_tolerance: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionCmd {
    Plans,
    Show,
    Checkout {
        #[arg(long)]
        plan: Uuid,
        #[arg(long, default_value = "monthly")]
        cycle: BillingCycle,
        #[arg(long)]
        seats: u32,
    },
    Upgrade {
        #[arg(long)]
        plan: Uuid,
    },
    Downgrade {
        #[arg(long)]
        plan: Uuid,
    },
    Seats { seats: u32 },
    Cancel,
    Invoices,
    CancelInvoice { id: Uuid },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasterKind {
    Branch,
    Grade,
    Position,
}

/// Fields accepted by every master data kind; each kind uses its own.
#[derive(Args, Debug, Default, Clone)]
pub struct MasterFields {
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub level: Option<u32>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum MasterCmd {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        name: String,
        #[command(flatten)]
        fields: MasterFields,
    },
    Rename { id: Uuid, name: String },
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCmd {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "WFO")]
        arrangement: WorkArrangement,
        #[arg(long)]
        description: Option<String>,
    },
    Delete { id: Uuid },
    AddTime {
        schedule: Uuid,
        #[arg(long)]
        day: Weekday,
        #[arg(long = "in")]
        clock_in: NaiveTime,
        #[arg(long = "out")]
        clock_out: NaiveTime,
        #[arg(long)]
        break_start: Option<NaiveTime>,
        #[arg(long)]
        break_end: Option<NaiveTime>,
        #[arg(long, default_value_t = 0)]
        tolerance: u32,
    },
    AddLocation {
        schedule: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long)]
        radius: f64,
    },
    /// Assign a schedule to several employees at once
    Assign {
        schedule: Uuid,
        #[arg(required = true)]
        employees: Vec<Uuid>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompanyCmd {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        logo: Option<PathBuf>,
    },
}
