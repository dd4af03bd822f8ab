use crate::application::{BookingApp, Config, SummaryFormat};
use crate::domain::{
    StayRange, is_booking_entry_valid, is_selectable_on, to_date_with_offset, to_local_date,
};
use crate::infrastructure::FileLogger;
use anyhow::Context;
use chrono::{FixedOffset, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookings")]
#[command(about = "Record travel bookings for the current session")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive booking list (default)
    Tui {
        /// Print the final bookings after the session ends
        #[arg(short, long, value_enum)]
        summary: Option<SummaryFormat>,
    },
    /// Check whether a booking entry would be accepted
    Check {
        /// Guest name
        #[arg(short, long)]
        name: Option<String>,
        /// Arrival date (YYYY-MM-DD format)
        #[arg(short, long)]
        arrival: Option<String>,
        /// Departure date (YYYY-MM-DD format)
        #[arg(short, long)]
        departure: Option<String>,
    },
    /// Convert an epoch-millisecond timestamp to a calendar date
    Date {
        #[arg(allow_negative_numbers = true)]
        millis: i64,
        /// UTC offset such as +02:00 (defaults to the local offset)
        #[arg(short, long)]
        offset: Option<FixedOffset>,
    },
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let config = Config::from_env()?;

        let logger = FileLogger::new(&config.log_path, config.log_level);
        if let Err(e) = logger.and_then(FileLogger::install) {
            eprintln!("Warning: logging disabled: {:#}", e);
        }

        match cli.command {
            Some(Commands::Tui { summary }) => Self::run_tui(config, summary),
            Some(Commands::Check {
                name,
                arrival,
                departure,
            }) => {
                let arrival = arrival.as_deref().map(parse_date).transpose()?;
                let departure = departure.as_deref().map(parse_date).transpose()?;
                check(arrival, departure, name.as_deref())
            }
            Some(Commands::Date { millis, offset }) => {
                println!("{}", describe_timestamp(millis, offset));
                Ok(())
            }
            None => Self::run_tui(config, None),
        }
    }

    fn run_tui(config: Config, summary: Option<SummaryFormat>) -> anyhow::Result<()> {
        let mut app = BookingApp::new(config);
        app.run_tui()?;

        // The terminal is restored by now, so stdout is ours again
        if let Some(format) = summary {
            println!("{}", app.summary(format)?);
        }
        Ok(())
    }
}

fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

fn check(
    arrival: Option<NaiveDate>,
    departure: Option<NaiveDate>,
    name: Option<&str>,
) -> anyhow::Result<()> {
    if !is_booking_entry_valid(arrival, departure, name) {
        anyhow::bail!("Invalid booking entry");
    }

    println!("valid");
    if let (Some(arrival), Some(departure)) = (arrival, departure) {
        if !StayRange::is_ordered(arrival, departure) {
            println!("note: departure {} is before arrival {}", departure, arrival);
        }
    }
    Ok(())
}

fn describe_timestamp(millis: i64, offset: Option<FixedOffset>) -> String {
    let (date, today) = match offset {
        Some(offset) => (
            to_date_with_offset(millis, offset),
            Utc::now().with_timezone(&offset).date_naive(),
        ),
        None => (to_local_date(millis), Local::now().date_naive()),
    };

    let selectable = if is_selectable_on(date, today) {
        "selectable"
    } else {
        "not selectable"
    };
    format!("{} ({})", date, selectable)
}
