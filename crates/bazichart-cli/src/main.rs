//! Command-line front end: one submission per invocation.
//!
//! Validates the arguments, calls the calculation service, prints the
//! rendered report to stdout, and writes the three chart PNGs next to it.

use std::path::PathBuf;

use anyhow::Context;
use bazichart::report::{Report, StarCategory};
use bazichart::{
    rasterize_to_file, BirthInput, CalculationClient, CalendarType, Dashboard, DashboardView,
    Gender, ELEMENTS_FILE_NAME, PILLARS_FILE_NAME, SHARE_CARD_FILE_NAME, SHARE_CARD_SIZE,
    WIDE_CHART_SIZE,
};
use chrono::Datelike;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CalendarArg {
    Solar,
    Lunar,
}

impl From<CalendarArg> for CalendarType {
    fn from(value: CalendarArg) -> Self {
        match value {
            CalendarArg::Solar => CalendarType::Solar,
            CalendarArg::Lunar => CalendarType::Lunar,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "bazichart",
    version,
    about = "Render a Bazi (Four Pillars) report with exportable charts"
)]
struct Cli {
    /// Birth year (1900-2100)
    year: i32,
    /// Birth month (1-12)
    month: u32,
    /// Birth day (1-31)
    day: u32,
    /// Birth hour (0-23); omit if unknown
    hour: Option<u32>,

    #[arg(long, value_enum, default_value_t = GenderArg::Male)]
    gender: GenderArg,

    /// Calendar the birth date is expressed in
    #[arg(long, value_enum, default_value_t = CalendarArg::Solar)]
    calendar: CalendarArg,

    /// Calculation service endpoint
    #[arg(long, default_value = bazichart::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Directory for the exported chart images
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Skip writing the PNG chart files
    #[arg(long)]
    no_charts: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let input = BirthInput {
        year: cli.year,
        month: cli.month,
        day: cli.day,
        hour: cli.hour,
        gender: cli.gender.into(),
        calendar_type: cli.calendar.into(),
    };

    let client = CalculationClient::new(&cli.endpoint);
    let mut dashboard = Dashboard::new(client, chrono::Local::now().year());

    let report = match dashboard.submit(&input).await {
        DashboardView::Report(report) => report.as_ref().clone(),
        DashboardView::Error(message) => anyhow::bail!("{message}"),
        DashboardView::Empty => anyhow::bail!("no result"),
    };

    print_report(&report);

    if !cli.no_charts {
        std::fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("creating {}", cli.out_dir.display()))?;

        let share = dashboard
            .build_share_card()
            .context("no result to draw the share card from")?;
        rasterize_to_file(
            share,
            &cli.out_dir.join(SHARE_CARD_FILE_NAME),
            SHARE_CARD_SIZE.0,
            SHARE_CARD_SIZE.1,
            "white",
        )?;

        let charts = dashboard.charts();
        let (w, h) = WIDE_CHART_SIZE;
        rasterize_to_file(
            charts.pillars_chart(),
            &cli.out_dir.join(PILLARS_FILE_NAME),
            w,
            h,
            "white",
        )?;
        rasterize_to_file(
            charts.elements_chart(),
            &cli.out_dir.join(ELEMENTS_FILE_NAME),
            w,
            h,
            "white",
        )?;

        println!();
        println!(
            "Charts written to {} ({}, {}, {})",
            cli.out_dir.display(),
            PILLARS_FILE_NAME,
            ELEMENTS_FILE_NAME,
            SHARE_CARD_FILE_NAME
        );
    }

    Ok(())
}

fn heading(title: &str) {
    println!();
    println!("== {title} ==");
}

fn print_report(report: &Report) {
    heading("Four Pillars");
    for card in &report.pillars {
        let element = card
            .element
            .map(|e| format!("  [{e}]"))
            .unwrap_or_default();
        println!("  {:<10} {}{}", card.label, card.value, element);
    }

    heading("Five Elements");
    for bar in &report.element_bars {
        let status = bar
            .status
            .as_deref()
            .map(|s| format!("  ({s})"))
            .unwrap_or_default();
        println!("  {:<10} {:>6.1}{}", bar.element.display_name(), bar.score, status);
    }
    if let Some(strength) = report.strength {
        println!("  strength: {strength}");
    }
    if let Some(balance) = report.balance {
        println!("  balance:  {balance}");
    }

    heading("Ten Gods");
    for god in &report.ten_gods {
        println!("  {} ({})", god.name, god.code);
    }

    heading("Patterns");
    println!("  primary:   {}", report.primary_pattern);
    println!("  secondary: {}", report.secondary_pattern);

    if !report.stars.is_empty() {
        heading("Spiritual Stars");
        for star in &report.stars {
            let tag = match star.category {
                StarCategory::Auspicious => "auspicious",
                StarCategory::Inauspicious => "inauspicious",
                StarCategory::Special => "special",
            };
            println!("  {} ({tag})", star.name);
        }
    }

    if let Some(reading) = &report.strength_reading {
        heading("Strength");
        println!("  {}: {}", reading.verdict, reading.description);
        for rec in reading.recommendations {
            println!("  - {rec}");
        }
    }
    if let Some(climate) = &report.climate {
        heading("Climate");
        println!("  {}: {}", climate.verdict, climate.description);
        for rec in climate.recommendations {
            println!("  - {rec}");
        }
    }

    heading("Basic Info");
    println!("  gregorian:   {}", report.gregorian_date);
    println!("  lunar:       {}", report.lunar_date);
    println!("  life palace: {}", report.life_palace);
    println!("  body palace: {}", report.body_palace);
    println!("  taiyuan:     {}", report.taiyuan);
    println!("  solar terms: {}", report.solar_terms);

    heading("Luck Cycles");
    for cycle in &report.luck_cycles {
        let marker = if cycle.current { "  <- current" } else { "" };
        println!(
            "  {}  {}-{}{marker}",
            cycle.label, cycle.start_year, cycle.end_year
        );
    }

    heading("Personality");
    println!("  {}", report.personality.character);
    println!("  {}", report.personality.strengths);
    println!("  {}", report.personality.growth);

    heading("Life Guidance");
    println!("  Career:        {}", report.guidance.career);
    println!("  Relationships: {}", report.guidance.relationships);
    println!("  Health:        {}", report.guidance.health);
    println!("  Purpose:       {}", report.guidance.purpose);

    heading("Classical Reference");
    println!("  {} {}", report.quote.source, report.quote.quote);
    println!("  {}", report.quote.translation);
}
