use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use route_planner::domain::{Itinerary, format_duration};
use route_planner::feed::load_schedule;
use route_planner::planner::{
    Deadline, Planner, ScheduleIndex, SearchConfig, SearchPolicy, SearchRequest,
};

#[derive(Parser)]
#[command(name = "route-planner", about = "Find bus and train itineraries between cities")]
struct Args {
    /// Path to the JSON schedule feed
    #[arg(short, long, value_name = "FILE")]
    schedule: PathBuf,

    /// City to start from
    #[arg(long, required_unless_present = "list_cities")]
    from: Option<String>,

    /// City to travel to
    #[arg(long, required_unless_present = "list_cities")]
    to: Option<String>,

    /// Maximum number of legs per itinerary (at most the default)
    #[arg(long, default_value_t = SearchConfig::default().max_legs)]
    max_legs: usize,

    /// Travel date (YYYY-MM-DD); searches every route running that day
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Minimum minutes between arriving and departing at a transfer
    #[arg(long, default_value_t = SearchConfig::default().min_connection_mins)]
    min_connection: i64,

    /// Give up after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print every city in the schedule and exit
    #[arg(long)]
    list_cities: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_itinerary(number: usize, itinerary: &Itinerary) {
    let changes = match itinerary.transfer_count() {
        0 => "direct".to_string(),
        1 => "1 change".to_string(),
        n => format!("{n} changes"),
    };
    println!(
        "Option {number}: {changes}, fare {:.2}, {}",
        itinerary.total_fare(),
        format_duration(itinerary.total_duration()),
    );
    for leg in itinerary.legs() {
        println!("  {leg}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    let legs = load_schedule(&args.schedule)?;
    let index = ScheduleIndex::build(legs);
    tracing::info!(
        schedule = %args.schedule.display(),
        legs = index.leg_count(),
        cities = index.city_count(),
        "Loaded schedule"
    );

    if args.list_cities {
        for city in index.all_cities() {
            println!("{city}");
        }
        return Ok(());
    }

    let (Some(from), Some(to)) = (args.from, args.to) else {
        return Err("--from and --to are required".into());
    };

    let unknown: Vec<&str> = [from.as_str(), to.as_str()]
        .into_iter()
        .filter(|city| !index.contains_city(city))
        .collect();
    if !unknown.is_empty() {
        eprintln!("Unknown city: {}", unknown.join(", "));
        eprintln!("Known cities: {}", index.all_cities().join(", "));
        return Ok(());
    }

    let config = SearchConfig {
        min_connection_mins: args.min_connection,
        ..SearchConfig::default()
    };
    if args.max_legs > config.max_legs {
        return Err(format!("--max-legs must be at most {}", config.max_legs).into());
    }
    let planner = Planner::new(&index, &config);
    let request = SearchRequest::new(
        from,
        to,
        args.max_legs,
        SearchPolicy::for_travel_date(args.date),
    );
    let deadline = args
        .timeout_ms
        .map(|ms| Deadline::after(Duration::from_millis(ms)));

    let result = planner.search(&request, deadline)?;

    if result.itineraries.is_empty() {
        println!("No itineraries found");
        return Ok(());
    }

    for (i, itinerary) in result.itineraries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_itinerary(i + 1, itinerary);
    }

    Ok(())
}
