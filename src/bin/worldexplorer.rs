use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use worldexplorer::{storage, Client, DateSpec, Indicator};

#[derive(Parser, Debug)]
#[command(
    name = "worldexplorer",
    version,
    about = "Fetch World Bank country & indicator data"
)]
struct Cli {
    /// Base URL of the World Bank API.
    #[arg(long, default_value = "https://api.worldbank.org")]
    base_url: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all countries.
    Countries(CountriesArgs),
    /// Look up a single country by its code (e.g., BRA or BR).
    Country { code: String },
    /// Fetch an indicator series for one country.
    Series(SeriesArgs),
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// Save the list as CSV instead of printing it.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum IndicatorArg {
    TotalPopulation,
    MalePopulation,
    FemalePopulation,
    LifeExpectancy,
    AdultMaleLiteracy,
    AdultFemaleLiteracy,
    MaleSurvivalTo65,
    FemaleSurvivalTo65,
}

impl From<IndicatorArg> for Indicator {
    fn from(arg: IndicatorArg) -> Self {
        match arg {
            IndicatorArg::TotalPopulation => Indicator::TotalPopulation,
            IndicatorArg::MalePopulation => Indicator::MalePopulation,
            IndicatorArg::FemalePopulation => Indicator::FemalePopulation,
            IndicatorArg::LifeExpectancy => Indicator::LifeExpectancy,
            IndicatorArg::AdultMaleLiteracy => Indicator::AdultMaleLiteracy,
            IndicatorArg::AdultFemaleLiteracy => Indicator::AdultFemaleLiteracy,
            IndicatorArg::MaleSurvivalTo65 => Indicator::MaleSurvivalTo65,
            IndicatorArg::FemaleSurvivalTo65 => Indicator::FemaleSurvivalTo65,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct SeriesArgs {
    /// Country code (e.g., BRA).
    #[arg(short, long)]
    country: String,
    /// Indicator to fetch.
    #[arg(short, long, value_enum)]
    indicator: IndicatorArg,
    /// Year (YYYY) or range (YYYY:YYYY).
    #[arg(short = 'd', long, default_value = "2000:2020")]
    date: String,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = Client::new(&cli.base_url)?;
    match cli.cmd {
        Command::Countries(args) => cmd_countries(&client, args),
        Command::Country { code } => cmd_country(&client, &code),
        Command::Series(args) => cmd_series(&client, args),
    }
}

fn cmd_countries(client: &Client, args: CountriesArgs) -> Result<()> {
    let countries = client.all_countries()?;
    if let Some(path) = args.out.as_ref() {
        storage::save_countries_csv(&countries, path)?;
        eprintln!("Saved {} countries to {}", countries.len(), path.display());
    } else {
        for c in &countries {
            println!("{}  {}  {}  ({})", c.id, c.iso2_code, c.name, c.capital_city);
        }
    }
    Ok(())
}

fn cmd_country(client: &Client, code: &str) -> Result<()> {
    let c = client.country(code)?;
    println!("{} ({} / {})", c.name, c.id, c.iso2_code);
    println!("capital: {}", c.capital_city);
    match (c.longitude, c.latitude) {
        (Some(lon), Some(lat)) => println!("coordinates: {lon}, {lat}"),
        _ => println!("coordinates: not reported"),
    }
    Ok(())
}

fn cmd_series(client: &Client, args: SeriesArgs) -> Result<()> {
    let date: DateSpec = args.date.parse()?;
    let indicator = Indicator::from(args.indicator);
    let country = client.country(&args.country)?;
    let points = client.indicator_series(&country, indicator, &date)?;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_series_csv(&points, path)?,
            "json" => storage::save_series_json(&points, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", points.len(), path.display());
    } else {
        println!("{}: {}", country.name, indicator.label());
        for p in &points {
            println!("{}  {}", p.date, fmt_opt(p.value));
        }
    }
    Ok(())
}
