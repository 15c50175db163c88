use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use attendance_client::api::{AttendanceStatus, DateRange, Location, PunchRequest};

#[derive(Parser, Debug)]
#[command(
    name = "attendance-cli",
    about = "Mark session attendance and record student punches",
    version
)]
pub struct Cli {
    /// API base URL [default: $ATTENDANCE_API_BASE_URL or http://localhost:3000/api]
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Bearer token [default: $ATTENDANCE_API_TOKEN]
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List attendance records of a session
    Session { session_id: i64 },
    /// Mark a student's attendance for a session
    Mark {
        session_id: i64,
        student_id: i64,
        #[arg(long, value_name = "STATUS")]
        status: StatusArg,
        /// Flag the record as manually entered
        #[arg(long)]
        manual: bool,
    },
    /// List a student's attendance records
    Student {
        student_id: i64,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Punch in for today
    PunchIn(PunchArgs),
    /// Punch out for today
    PunchOut(PunchArgs),
    /// Show today's punch
    Today,
    /// Show punch history
    History {
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusArg {
    Present,
    Absent,
    ManualPresent,
}

impl From<StatusArg> for AttendanceStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Present => AttendanceStatus::Present,
            StatusArg::Absent => AttendanceStatus::Absent,
            StatusArg::ManualPresent => AttendanceStatus::ManualPresent,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct RangeArgs {
    /// First day, YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,
    /// Last day, YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,
}

impl From<&RangeArgs> for DateRange {
    fn from(args: &RangeArgs) -> Self {
        DateRange::new(args.from, args.to)
    }
}

#[derive(Args, Debug, Default)]
pub struct PunchArgs {
    /// Photo reference
    #[arg(long)]
    pub photo: Option<String>,
    /// Fingerprint reference
    #[arg(long)]
    pub fingerprint: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,
    #[arg(long)]
    pub address: Option<String>,
}

impl From<&PunchArgs> for PunchRequest {
    fn from(args: &PunchArgs) -> Self {
        let has_location =
            args.latitude.is_some() || args.longitude.is_some() || args.address.is_some();
        let location = if has_location {
            Some(Location {
                latitude: args.latitude,
                longitude: args.longitude,
                address: args.address.clone(),
            })
        } else {
            None
        };
        PunchRequest {
            photo: args.photo.clone(),
            fingerprint: args.fingerprint.clone(),
            location,
        }
    }
}
