//! Runs one parsed CLI command against the API.

use std::cmp::Ordering;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use chrono::Utc;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::info;
use uuid::Uuid;

use hris_client::api;
use hris_client::auth::handlers;
use hris_client::auth::session::Session;
use hris_client::capture::{FilePhotoCapture, FixedLocationProvider};
use hris_client::forms::clock::{ClockForm, ClockKind};
use hris_client::forms::company::CompanyForm;
use hris_client::forms::leave_request::LeaveRequestForm;
use hris_client::forms::upload::ATTACHMENT_POLICY;
use hris_client::http::HttpTransport;
use hris_client::model::attendance::{AttendanceFilter, AttendanceStatus};
use hris_client::model::employee::{BankDetails, CreateEmployee, EmployeeQuery, UpdateEmployee};
use hris_client::model::leave_quota::QuotaAdjustment;
use hris_client::model::leave_request::LeaveFilter;
use hris_client::model::master_data::{
    Branch, BranchPayload, Grade, GradePayload, MasterData, Position, PositionPayload,
};
use hris_client::model::payroll::{PayrollPeriod, PayrollQuery, PayrollStatus};
use hris_client::model::work_schedule::{
    WorkScheduleLocationPayload, WorkSchedulePayload, WorkScheduleTimePayload,
};
use hris_client::models::PageRequest;
use hris_client::screens::attendance::AttendanceScreen;
use hris_client::screens::company::CompanySetup;
use hris_client::screens::employee::EmployeeScreen;
use hris_client::screens::leave::{LeaveAction, LeaveScreen};
use hris_client::screens::master_data::CrudManager;
use hris_client::screens::payroll::PayrollScreen;
use hris_client::screens::subscription::{CheckoutRedirect, SubscriptionScreen};
use hris_client::screens::work_schedule::WorkScheduleScreen;
use hris_client::screens::{AssumeYes, Confirm};
use hris_client::view::{Notifier, SearchDebouncer, Searchable, TracingNotifier};
use hris_client::{ApiClient, ClientError, Config};

use crate::cli::{
    AttendanceCmd, Cli, ClockArgs, Command, CompanyCmd, EmployeeCmd, LeaveCmd, MasterCmd,
    MasterFields, MasterKind, PayrollCmd, ScheduleCmd, SubscriptionCmd,
};

/// Asks on the terminal; anything but `y`/`yes` declines.
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

struct Ctx {
    client: ApiClient,
    config: Config,
    notifier: Arc<dyn Notifier>,
    confirm: Box<dyn Confirm>,
    json: bool,
}

impl Ctx {
    fn print<T: Serialize>(&self, value: &T, human: impl FnOnce()) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human();
        }
        Ok(())
    }
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let transport = HttpTransport::new(config.base_url(), config.request_timeout)
        .context("Failed to build HTTP client")?;
    let anonymous = ApiClient::new(Arc::new(transport));

    if let Command::Login { email, password } = &cli.command {
        let session = handlers::login(&anonymous, email, password)
            .await
            .context("Login failed")?;
        println!("Logged in as {} ({})", session.username, session.role);
        println!("export HRIS_TOKEN={}", session.token());
        return Ok(());
    }

    // the plan catalogue is public
    let client = match (&cli.command, config.token.as_deref()) {
        (Command::Subscription(SubscriptionCmd::Plans), None) => anonymous,
        (_, token) => {
            let token = token
                .ok_or_else(|| anyhow!("Not logged in: run `hris login` and export HRIS_TOKEN"))?;
            let session = Session::from_token(token).context("HRIS_TOKEN is not a valid token")?;
            if session.is_expired(Utc::now()) {
                bail!("Session expired at {}, run `hris login` again", session.expires_at);
            }
            anonymous.with_session(session)
        }
    };

    let confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm)
    };
    let ctx = Ctx {
        client,
        config,
        notifier: Arc::new(TracingNotifier),
        confirm,
        json: cli.json,
    };

    match cli.command {
        Command::Login { .. } => Ok(()),
        Command::Logout => {
            let response = handlers::logout(&ctx.client).await?;
            println!("{}", response.message.as_deref().unwrap_or("Logged out"));
            println!("unset HRIS_TOKEN");
            Ok(())
        }
        Command::Whoami => whoami(&ctx).await,
        Command::Attendance(cmd) => attendance(&ctx, cmd).await,
        Command::Leave(cmd) => leave(&ctx, cmd).await,
        Command::Employee(cmd) => employee(&ctx, cmd).await,
        Command::Payroll(cmd) => payroll(&ctx, cmd).await,
        Command::Subscription(cmd) => subscription(&ctx, cmd).await,
        Command::Master { kind, action } => match kind {
            MasterKind::Branch => master::<Branch>(&ctx, action).await,
            MasterKind::Grade => master::<Grade>(&ctx, action).await,
            MasterKind::Position => master::<Position>(&ctx, action).await,
        },
        Command::Schedule(cmd) => schedule(&ctx, cmd).await,
        Command::Company(cmd) => company(&ctx, cmd).await,
    }
}

async fn whoami(ctx: &Ctx) -> anyhow::Result<()> {
    let session = ctx.client.require_session()?;
    println!("{} ({})", session.username, session.role);
    println!("Session valid until {}", session.expires_at);
    if session.employee_id.is_some() {
        let me = handlers::me(&ctx.client).await?;
        ctx.print(&me, || {
            println!("{} {} {}", me.employee_code, me.full_name, me.employment_status)
        })?;
    }
    Ok(())
}

async fn attendance(ctx: &Ctx, cmd: AttendanceCmd) -> anyhow::Result<()> {
    let mut screen = AttendanceScreen::new(ctx.client.clone(), ctx.notifier.clone());
    match cmd {
        AttendanceCmd::List {
            from,
            to,
            status,
            employee,
            search,
            paging,
        } => {
            screen.filter = AttendanceFilter {
                start_date: from,
                end_date: to,
                status,
                employee_id: employee,
            };
            screen.page = PageRequest::new(paging.page, paging.per_page);
            screen.refresh().await?;
            if let Some(q) = search {
                screen.list.set_query(q);
            }
            let rows = screen.list.filtered();
            ctx.print(&rows, || {
                for a in &rows {
                    println!(
                        "{}  {}  {:<16} {:<18} in {} out {}",
                        a.id,
                        a.date,
                        a.status,
                        a.employee_name.as_deref().unwrap_or("-"),
                        fmt_opt(a.clock_in_time.map(|t| t.format("%H:%M").to_string())),
                        fmt_opt(a.clock_out_time.map(|t| t.format("%H:%M").to_string())),
                    );
                }
                print_meta(screen.list.page(), screen.list.page_count());
            })
        }
        AttendanceCmd::Today => {
            let today = api::attendance::today(&ctx.client).await?;
            ctx.print(&today, || match &today {
                Some(a) => println!(
                    "{} {}: in {} out {}",
                    a.date,
                    a.status,
                    fmt_opt(a.clock_in_time),
                    fmt_opt(a.clock_out_time)
                ),
                None => println!("Not clocked in today"),
            })
        }
        AttendanceCmd::ClockIn(args) => clock(ctx, &mut screen, ClockKind::In, args).await,
        AttendanceCmd::ClockOut(args) => clock(ctx, &mut screen, ClockKind::Out, args).await,
        AttendanceCmd::Approve { id } => {
            screen.approve(id).await?;
            println!("Approved {id}");
            Ok(())
        }
        AttendanceCmd::Reject { id, reason } => {
            screen.reject(id, &reason).await?;
            println!("Rejected {id}");
            Ok(())
        }
        AttendanceCmd::Delete { id } => {
            screen.delete(id, ctx.confirm.as_ref()).await?;
            println!("Deleted {id}");
            Ok(())
        }
        AttendanceCmd::Summary { from, to, employee } => {
            screen.filter = AttendanceFilter {
                start_date: from,
                end_date: to,
                status: None,
                employee_id: employee,
            };
            screen.page = PageRequest::new(1, 100);
            screen.refresh().await?;
            let summary = screen.summary();
            ctx.print(&summary, || {
                for status in AttendanceStatus::iter() {
                    println!("{:<18} {}", status, summary.count(status));
                }
                println!("late minutes       {}", summary.total_late_minutes);
                println!("working hours      {:.1}", summary.total_working_hours);
            })
        }
    }
}

async fn clock(
    ctx: &Ctx,
    screen: &mut AttendanceScreen,
    kind: ClockKind,
    args: ClockArgs,
) -> anyhow::Result<()> {
    let mut form = ClockForm::new(kind);
    let provider = FixedLocationProvider::new(args.lat, args.lon);
    form.capture_location(&provider, ctx.config.geolocation_timeout)
        .await;
    let camera = FilePhotoCapture::new(&args.photo);
    form.capture_photo(&camera).await;
    form.notes = args.notes;
    form.schedule_location_id = args.location_id;

    let record = screen.submit_clock(&form).await?;
    ctx.print(&record, || {
        println!("{} recorded: {} ({})", kind, record.date, record.status);
        if record.late_minutes > 0 {
            println!("Late by {} minute(s)", record.late_minutes);
        }
    })
}

async fn leave(ctx: &Ctx, cmd: LeaveCmd) -> anyhow::Result<()> {
    let mut screen = LeaveScreen::new(ctx.client.clone(), ctx.notifier.clone());
    match cmd {
        LeaveCmd::List {
            status,
            employee,
            search,
            paging,
        } => {
            screen.filter = LeaveFilter {
                employee_id: employee,
                leave_type_id: None,
                status,
            };
            screen.page = PageRequest::new(paging.page, paging.per_page);
            screen.refresh().await?;
            if let Some(q) = search {
                screen.requests.set_query(q);
            }
            let rows = screen.requests.filtered();
            ctx.print(&rows, || {
                for r in &rows {
                    println!(
                        "{}  {} -> {}  {:>4} day(s)  {:<16} {}",
                        r.id,
                        r.start_date,
                        r.end_date,
                        r.total_days,
                        r.status,
                        r.leave_type_name.as_deref().unwrap_or("-"),
                    );
                }
                print_meta(screen.requests.page(), screen.requests.page_count());
            })
        }
        LeaveCmd::Request {
            leave_type,
            start,
            end,
            duration,
            reason,
            attachment,
        } => {
            screen.load_types().await?;
            screen.load_quotas(None, None).await?;
            let needle = leave_type.to_lowercase();
            let chosen = screen
                .types
                .iter()
                .find(|t| {
                    t.id.to_string() == needle
                        || t.name.to_lowercase() == needle
                        || t.code.as_deref().is_some_and(|c| c.to_lowercase() == needle)
                })
                .cloned()
                .ok_or_else(|| anyhow!("Unknown leave type: {leave_type}"))?;

            let mut form = LeaveRequestForm {
                leave_type: Some(chosen),
                duration_type: duration,
                reason,
                ..Default::default()
            };
            form.set_start_date(start);
            form.set_end_date(end)?;
            if let Some(path) = attachment {
                form.attachment = Some(ATTACHMENT_POLICY.load(&path)?);
            }

            let submitted = screen.submit_request(&form).await?;
            if let Some(warning) = &submitted.quota_warning {
                eprintln!("warning: {warning}");
            }
            let request = submitted.request;
            ctx.print(&request, || {
                println!(
                    "Requested {} day(s), {} -> {} ({})",
                    request.total_days, request.start_date, request.end_date, request.status
                )
            })
        }
        LeaveCmd::Approve { id } => leave_action(&mut screen, id, LeaveAction::Approve).await,
        LeaveCmd::Reject { id, reason } => {
            leave_action(&mut screen, id, LeaveAction::Reject(reason)).await
        }
        LeaveCmd::Cancel { id } => {
            if !ctx.confirm.confirm("Cancel this leave request?") {
                return Err(ClientError::Cancelled.into());
            }
            leave_action(&mut screen, id, LeaveAction::Cancel).await
        }
        LeaveCmd::Quota { employee, year } => {
            screen.load_quotas(employee, year).await?;
            ctx.print(&screen.quotas, || {
                for q in &screen.quotas {
                    let flag = if q.is_inconsistent() { " (!)" } else { "" };
                    println!(
                        "{:<20} {}  available {:>5}  used {:>5}  pending {:>5}{flag}",
                        q.leave_type_name.as_deref().unwrap_or("-"),
                        q.year,
                        q.available_quota,
                        q.used_quota,
                        q.pending_quota,
                    );
                }
            })
        }
        LeaveCmd::Adjust {
            employee,
            leave_type,
            year,
            delta,
            reason,
        } => {
            let adjustment = QuotaAdjustment {
                employee_id: employee,
                leave_type_id: leave_type,
                year,
                adjustment: delta,
                reason,
            };
            let quota = screen.adjust_quota(&adjustment).await?;
            ctx.print(&quota, || {
                println!("Available quota is now {}", quota.available_quota)
            })
        }
        LeaveCmd::Types => {
            screen.load_types().await?;
            ctx.print(&screen.types, || {
                for t in &screen.types {
                    println!(
                        "{}  {:<20} {:<6} quota {:>4}{}{}",
                        t.id,
                        t.name,
                        t.code.as_deref().unwrap_or("-"),
                        t.default_quota,
                        if t.is_paid { "  paid" } else { "" },
                        if t.requires_attachment { "  attachment" } else { "" },
                    );
                }
            })
        }
    }
}

async fn leave_action(
    screen: &mut LeaveScreen,
    id: Uuid,
    action: LeaveAction,
) -> anyhow::Result<()> {
    screen.refresh().await?;
    screen.run_action(id, action).await?;
    println!("Done");
    Ok(())
}

async fn employee(ctx: &Ctx, cmd: EmployeeCmd) -> anyhow::Result<()> {
    let mut screen = EmployeeScreen::new(
        ctx.client.clone(),
        ctx.notifier.clone(),
        SearchDebouncer::new(ctx.config.search_debounce),
    )?;
    match cmd {
        EmployeeCmd::List {
            search,
            branch,
            status,
            paging,
        } => {
            screen.query = EmployeeQuery {
                search,
                branch_id: branch,
                status,
            };
            screen.page = PageRequest::new(paging.page, paging.per_page);
            screen.refresh().await?;
            let rows = screen.list.page_items();
            ctx.print(&rows, || {
                for e in &rows {
                    println!(
                        "{}  {:<10} {:<24} {:<12} {}",
                        e.id,
                        e.employee_code,
                        e.full_name,
                        e.employment_status,
                        e.branch_name.as_deref().unwrap_or("-"),
                    );
                }
                print_meta(screen.list.page(), screen.list.page_count());
            })
        }
        EmployeeCmd::Show { id } => {
            let e = api::employee::get(&ctx.client, id).await?;
            ctx.print(&e, || {
                println!("{} {}", e.employee_code, e.full_name);
                println!("email    {}", e.email.as_deref().unwrap_or("-"));
                println!("phone    {}", e.phone.as_deref().unwrap_or("-"));
                println!("position {}", e.position_name.as_deref().unwrap_or("-"));
                println!("branch   {}", e.branch_name.as_deref().unwrap_or("-"));
                println!("type     {} / {}", e.employment_type, e.employment_status);
                println!("joined   {}", fmt_opt(e.join_date));
            })
        }
        EmployeeCmd::Create {
            code,
            name,
            email,
            phone,
            employment_type,
            join_date,
            branch,
            position,
            grade,
        } => {
            let payload = CreateEmployee {
                employee_code: code,
                full_name: name,
                email,
                phone,
                position_id: position,
                branch_id: branch,
                grade_id: grade,
                employment_type,
                join_date,
                bank: BankDetails::default(),
            };
            let created = screen.create(&payload).await?;
            ctx.print(&created, || println!("Created {} ({})", created.full_name, created.id))
        }
        EmployeeCmd::Update {
            id,
            name,
            email,
            phone,
            status,
            branch,
            position,
        } => {
            let payload = UpdateEmployee {
                full_name: name,
                email,
                phone,
                employment_status: status,
                branch_id: branch,
                position_id: position,
                ..Default::default()
            };
            let updated = screen.update(id, &payload).await?;
            ctx.print(&updated, || println!("Updated {}", updated.full_name))
        }
        EmployeeCmd::Delete { id } => {
            screen.delete(id, ctx.confirm.as_ref()).await?;
            println!("Deleted {id}");
            Ok(())
        }
    }
}

async fn payroll(ctx: &Ctx, cmd: PayrollCmd) -> anyhow::Result<()> {
    let mut screen = PayrollScreen::new(ctx.client.clone(), ctx.notifier.clone())?;
    match cmd {
        PayrollCmd::List {
            month,
            year,
            status,
            paging,
        } => {
            screen.query = PayrollQuery {
                period: period(month, year)?,
                status,
                employee_id: None,
            };
            screen.page = PageRequest::new(paging.page, paging.per_page);
            screen.refresh().await?;
            let rows = screen.list.page_items();
            let totals = screen.totals();
            ctx.print(&rows, || {
                for p in &rows {
                    println!(
                        "{}  {}  {:<22} gross {:>14} net {:>14}  {}",
                        p.id,
                        p.period,
                        p.employee_name.as_deref().unwrap_or("-"),
                        p.gross_salary,
                        p.net_salary,
                        p.status,
                    );
                }
                println!(
                    "total gross {} deductions {} net {}",
                    totals.gross, totals.deductions, totals.net
                );
                print_meta(screen.list.page(), screen.list.page_count());
            })
        }
        PayrollCmd::Finalize { month, year, ids } => {
            screen.query = PayrollQuery {
                period: period(Some(month), Some(year))?,
                status: None,
                employee_id: None,
            };
            screen.page = PageRequest::new(1, 100);
            screen.refresh().await?;
            let selected: Vec<Uuid> = if ids.is_empty() {
                screen
                    .list
                    .items()
                    .iter()
                    .filter(|p| p.status == PayrollStatus::Draft)
                    .map(|p| p.id)
                    .collect()
            } else {
                ids
            };
            let response = screen.finalize(&selected, ctx.confirm.as_ref()).await?;
            println!("{}", response.message.as_deref().unwrap_or("Payroll finalized"));
            Ok(())
        }
        PayrollCmd::Settings {
            payday,
            late_tolerance,
        } => {
            let mut settings = screen.settings().await?;
            if payday.is_some() || late_tolerance.is_some() {
                if let Some(day) = payday {
                    settings.payday = day;
                }
                if let Some(minutes) = late_tolerance {
                    settings.late_tolerance_minutes = minutes;
                }
                settings = screen.save_settings(&settings).await?;
            }
            ctx.print(&settings, || {
                println!("payday                 {}", settings.payday);
                println!("late tolerance         {} min", settings.late_tolerance_minutes);
                println!("late deduction/min     {}", settings.late_deduction_per_minute);
                println!("early leave/min        {}", settings.early_leave_deduction_per_minute);
                println!("overtime rate/hour     {}", settings.overtime_rate_per_hour);
            })
        }
    }
}

fn period(month: Option<u32>, year: Option<i32>) -> anyhow::Result<Option<PayrollPeriod>> {
    match (month, year) {
        (Some(m), Some(y)) => PayrollPeriod::new(m, y)
            .map(Some)
            .ok_or_else(|| anyhow!("Invalid payroll period {m}/{y}")),
        _ => Ok(None),
    }
}

async fn subscription(ctx: &Ctx, cmd: SubscriptionCmd) -> anyhow::Result<()> {
    if matches!(cmd, SubscriptionCmd::Plans) {
        let plans = api::subscription::plans(&ctx.client).await?;
        return ctx.print(&plans, || {
            for p in &plans {
                println!(
                    "{}  {:<16} tier {}  {}/seat/month  {}/seat/year  seats {}..{}",
                    p.id,
                    p.name,
                    p.tier,
                    p.price_per_seat_monthly,
                    p.price_per_seat_yearly,
                    p.min_seats,
                    fmt_opt(p.max_seats),
                );
            }
        });
    }

    let mut screen = SubscriptionScreen::new(ctx.client.clone(), ctx.notifier.clone())?;
    screen.refresh().await?;
    let confirm = ctx.confirm.as_ref();
    let redirect = match cmd {
        SubscriptionCmd::Plans => return Ok(()),
        SubscriptionCmd::Show => {
            return ctx.print(&screen.current, || match &screen.current {
                Some(s) => {
                    println!("{} ({}, {})", s.plan.name, s.status, s.billing_cycle);
                    println!(
                        "seats {} used {} free {}",
                        s.seats,
                        s.used_seats,
                        s.available_seats()
                    );
                    println!("period ends {}", fmt_opt(s.current_period_end));
                    if s.is_trialing(Utc::now()) {
                        println!("trial ends {}", fmt_opt(s.trial_end));
                    }
                    if s.cancel_at_period_end {
                        println!("cancels at the end of the period");
                    }
                }
                None => println!("No subscription"),
            });
        }
        SubscriptionCmd::Invoices => {
            let rows = screen.invoices.items();
            return ctx.print(&rows, || {
                for i in rows {
                    println!(
                        "{}  {:<16} {:>14}  {:<10} {}",
                        i.id,
                        i.number,
                        i.amount,
                        i.status,
                        i.payment_url.as_deref().unwrap_or(""),
                    );
                }
            });
        }
        SubscriptionCmd::CancelInvoice { id } => {
            screen.cancel_invoice(id, confirm).await?;
            println!("Invoice cancelled");
            return Ok(());
        }
        SubscriptionCmd::Checkout { plan, cycle, seats } => {
            screen.checkout(plan, cycle, seats, confirm).await?
        }
        SubscriptionCmd::Upgrade { plan } => {
            expect_direction(&screen, plan, true)?;
            screen.change_plan(plan, confirm).await?
        }
        SubscriptionCmd::Downgrade { plan } => {
            expect_direction(&screen, plan, false)?;
            screen.change_plan(plan, confirm).await?
        }
        SubscriptionCmd::Seats { seats } => screen.change_seats(seats, confirm).await?,
        SubscriptionCmd::Cancel => screen.cancel(confirm).await?,
    };

    match redirect {
        CheckoutRedirect::Payment(url) => {
            info!(%url, "Redirecting to payment");
            println!("Complete the payment at: {url}");
        }
        CheckoutRedirect::Done(message) => {
            println!("{}", message.as_deref().unwrap_or("Done"))
        }
    }
    Ok(())
}

fn expect_direction(
    screen: &SubscriptionScreen,
    plan_id: Uuid,
    upgrade: bool,
) -> anyhow::Result<()> {
    let (Some(current), Some(target)) = (
        screen.current.as_ref(),
        screen.plans.iter().find(|p| p.id == plan_id),
    ) else {
        return Ok(());
    };
    match (upgrade, target.tier.cmp(&current.plan.tier)) {
        (true, Ordering::Less) => bail!("{} is a lower tier, use `downgrade`", target.name),
        (false, Ordering::Greater) => bail!("{} is a higher tier, use `upgrade`", target.name),
        _ => Ok(()),
    }
}

/// Builds the create/rename payload of each master data kind from flags.
trait MasterArgs: MasterData + Searchable + Serialize {
    fn payload(
        name: String,
        fields: &MasterFields,
        existing: Option<&Self>,
    ) -> anyhow::Result<Self::Payload>;
}

impl MasterArgs for Branch {
    fn payload(
        name: String,
        fields: &MasterFields,
        existing: Option<&Self>,
    ) -> anyhow::Result<BranchPayload> {
        Ok(BranchPayload {
            name,
            address: fields
                .address
                .clone()
                .or_else(|| existing.and_then(|b| b.address.clone())),
            phone: fields
                .phone
                .clone()
                .or_else(|| existing.and_then(|b| b.phone.clone())),
        })
    }
}

impl MasterArgs for Grade {
    fn payload(
        name: String,
        fields: &MasterFields,
        existing: Option<&Self>,
    ) -> anyhow::Result<GradePayload> {
        let level = fields
            .level
            .or(existing.map(|g| g.level))
            .ok_or_else(|| anyhow!("--level is required for grades"))?;
        Ok(GradePayload { name, level })
    }
}

impl MasterArgs for Position {
    fn payload(
        name: String,
        fields: &MasterFields,
        existing: Option<&Self>,
    ) -> anyhow::Result<PositionPayload> {
        Ok(PositionPayload {
            name,
            description: fields
                .description
                .clone()
                .or_else(|| existing.and_then(|p| p.description.clone())),
        })
    }
}

async fn master<K: MasterArgs>(ctx: &Ctx, cmd: MasterCmd) -> anyhow::Result<()> {
    let mut manager = CrudManager::<K>::new(ctx.client.clone(), ctx.notifier.clone())?;
    manager.refresh().await?;
    match cmd {
        MasterCmd::List { search } => {
            if let Some(q) = search {
                manager.list.set_query(q);
            }
            let rows = manager.list.filtered();
            ctx.print(&rows, || {
                for k in &rows {
                    println!("{}  {}", k.id(), k.name());
                }
            })
        }
        MasterCmd::Create { name, fields } => {
            let payload = K::payload(name, &fields, None)?;
            let created = manager.create(&payload).await?;
            println!("Created {} {}", K::LABEL, created.id());
            Ok(())
        }
        MasterCmd::Rename { id, name } => {
            let existing = manager
                .list
                .items()
                .iter()
                .find(|k| k.id() == id)
                .cloned()
                .ok_or_else(|| anyhow!("Unknown {} {id}", K::LABEL))?;
            let payload = K::payload(name, &MasterFields::default(), Some(&existing))?;
            let updated = manager.update(id, &payload).await?;
            println!("Renamed to {}", updated.name());
            Ok(())
        }
        MasterCmd::Delete { id } => {
            manager.delete(id, ctx.confirm.as_ref()).await?;
            println!("Deleted {} {id}", K::LABEL);
            Ok(())
        }
    }
}

async fn schedule(ctx: &Ctx, cmd: ScheduleCmd) -> anyhow::Result<()> {
    let mut screen = WorkScheduleScreen::new(ctx.client.clone(), ctx.notifier.clone())?;
    match cmd {
        ScheduleCmd::List => {
            screen.refresh().await?;
            let rows = screen.list.items();
            ctx.print(&rows, || {
                for s in rows {
                    println!("{}  {:<24} {}", s.id, s.name, s.work_arrangement);
                    for t in &s.times {
                        println!(
                            "    {}  {} - {}  tolerance {} min",
                            t.day_of_week,
                            t.clock_in_time,
                            t.clock_out_time,
                            t.late_tolerance_minutes
                        );
                    }
                    for l in &s.locations {
                        println!("    @ {:<20} {}  r={}m", l.name, l.center(), l.radius_m);
                    }
                }
            })
        }
        ScheduleCmd::Create {
            name,
            arrangement,
            description,
        } => {
            let payload = WorkSchedulePayload {
                name,
                work_arrangement: arrangement,
                description,
            };
            let created = screen.create(&payload).await?;
            if created.work_arrangement.requires_location() {
                eprintln!("note: add at least one location with `hris schedule add-location`");
            }
            println!("Created schedule {}", created.id);
            Ok(())
        }
        ScheduleCmd::Delete { id } => {
            screen.delete(id, ctx.confirm.as_ref()).await?;
            println!("Deleted schedule {id}");
            Ok(())
        }
        ScheduleCmd::AddTime {
            schedule,
            day,
            clock_in,
            clock_out,
            break_start,
            break_end,
            tolerance,
        } => {
            screen.refresh().await?;
            let payload = WorkScheduleTimePayload {
                day_of_week: day,
                clock_in_time: clock_in,
                clock_out_time: clock_out,
                break_start_time: break_start,
                break_end_time: break_end,
                late_tolerance_minutes: tolerance,
            };
            screen.add_time(schedule, &payload).await?;
            println!("Added {day} {clock_in} - {clock_out}");
            Ok(())
        }
        ScheduleCmd::AddLocation {
            schedule,
            name,
            lat,
            lon,
            radius,
        } => {
            let payload = WorkScheduleLocationPayload {
                name,
                latitude: lat,
                longitude: lon,
                radius_m: radius,
            };
            let location = screen.add_location(schedule, &payload).await?;
            println!("Added location {} ({})", location.name, location.id);
            Ok(())
        }
        ScheduleCmd::Assign {
            schedule,
            employees,
        } => {
            let report = screen.assign(schedule, &employees).await;
            for employee_id in report.succeeded() {
                println!("assigned  {employee_id}");
            }
            for (employee_id, e) in report.failed() {
                println!(
                    "failed    {employee_id}: {}",
                    e.toast_message("Failed to assign schedule")
                );
            }
            if report.is_complete() {
                Ok(())
            } else {
                bail!("Some assignments failed")
            }
        }
    }
}

async fn company(ctx: &Ctx, cmd: CompanyCmd) -> anyhow::Result<()> {
    let setup = CompanySetup::new(ctx.client.clone(), ctx.notifier.clone())?;
    match cmd {
        CompanyCmd::Create {
            name,
            email,
            phone,
            address,
            logo,
        } => {
            let form = CompanyForm {
                name,
                email,
                phone,
                address,
                logo,
            };
            let company = setup.submit(&form).await?;
            ctx.print(&company, || println!("Created company {} ({})", company.name, company.id))
        }
    }
}

fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_meta(page: usize, pages: usize) {
    println!("page {page}/{pages}");
}
