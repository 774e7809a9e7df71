// File: crates/demo/src/main.rs
// Summary: Demo loads a population CSV (age,male,female) and renders all chart families on the render queue.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strata_core::charts::{
    AgeCount, BarChart, BoxCategory, BoxPlot, LineChart, LineSeries, PopulationPyramid, ScatterPlot, MAX_AGE,
};
use strata_core::{theme, Chart, ChartConfig, Decimal, OutputFormat, RenderQueue, RetryPolicy};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Accept path from CLI or fall back to generated data
    let ages = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(raw);
            load_population_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => {
            tracing::info!("no input file given; using generated population");
            generated_population()
        }
    };
    if ages.is_empty() {
        anyhow::bail!("no rows loaded; expected columns age,male,female");
    }
    tracing::info!(rows = ages.len(), "loaded population");

    let theme = std::env::var("STRATA_THEME").map(|name| theme::find(&name)).unwrap_or_default();
    let base = ChartConfig::default().with_theme(theme);
    let out_dir = PathBuf::from("target/out");
    let queue = RenderQueue::new(RetryPolicy::default())?;
    let mut pending = Vec::new();

    // 1) Pyramid
    let pyramid = PopulationPyramid::new(ages.clone())?.with_open_age(85)?;
    let cfg = base.clone().with_title("Population by age and sex").with_labels("Population", "Age");
    pending.push(("pyramid", queue.submit_to_file(Chart::new(pyramid, cfg), out_dir.join("pyramid.png"), OutputFormat::Png)?));

    // 2) Bars of total population per ten years
    let totals: Vec<Decimal> = decades(&ages).into_iter().map(|(_, m, f)| m + f).collect();
    let bars = BarChart::from_counts(Decimal::ZERO, Decimal::TEN, &totals)?.with_series_name("Total");
    let cfg = base.clone().with_title("Population per decade of age").with_labels("Age", "Population");
    pending.push(("bar", queue.submit_to_file(Chart::new(bars, cfg), out_dir.join("bars.png"), OutputFormat::Png)?));

    // 3) Lines per sex
    let male = LineSeries::new("Male", ages.iter().map(|a| (Decimal::from(a.age), a.male)));
    let female = LineSeries::new("Female", ages.iter().map(|a| (Decimal::from(a.age), a.female)));
    let cfg = base.clone().with_title("Population by single year of age").with_labels("Age", "Population");
    pending.push(("line", queue.submit_to_file(Chart::new(LineChart::new(vec![male, female])?, cfg), out_dir.join("lines.png"), OutputFormat::Png)?));

    // 4) Box plot of single-year counts per decade
    let categories = ages
        .chunks(10)
        .map(|chunk| {
            let name = format!("{}s", chunk[0].age);
            BoxCategory::new(name, chunk.iter().map(|a| a.male + a.female).collect())
        })
        .collect();
    let cfg = base.clone().with_title("Spread of yearly counts per decade").with_labels("Decade", "Population");
    pending.push(("box", queue.submit_to_file(Chart::new(BoxPlot::new(categories)?, cfg), out_dir.join("box.jpg"), OutputFormat::Jpeg)?));

    // 5) Scatter of male vs female counts with regression
    let points = ages.iter().map(|a| (a.male, a.female)).collect();
    let cfg = base.with_title("Female vs male counts").with_labels("Male", "Female").with_zero_lines(true);
    pending.push(("scatter", queue.submit_to_file(Chart::new(ScatterPlot::new(points)?, cfg), out_dir.join("scatter.bmp"), OutputFormat::Bmp)?));

    for (name, handle) in pending {
        let size = handle.wait_timeout(Duration::from_secs(60)).with_context(|| format!("rendering {name}"))?;
        println!("Wrote {name} chart ({}x{})", size.width, size.height);
    }
    queue.shutdown(Duration::from_secs(5))?;
    Ok(())
}

/// Load `age,male,female` rows. Header names are matched case-insensitively.
fn load_population_csv(path: &Path) -> Result<Vec<AgeCount>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    let idx = |name: &str| headers.iter().position(|h| h == name).with_context(|| format!("missing column '{name}'"));
    let (i_age, i_male, i_female) = (idx("age")?, idx("male")?, idx("female")?);

    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let field = |i: usize| rec.get(i).unwrap_or_default();
        let parsed = (
            field(i_age).parse::<u32>(),
            field(i_male).parse::<Decimal>(),
            field(i_female).parse::<Decimal>(),
        );
        match parsed {
            (Ok(age), ..) if age > MAX_AGE => tracing::warn!(line = line + 2, age, "skipping implausible age"),
            (Ok(age), Ok(male), Ok(female)) => out.push(AgeCount::new(age, male, female)),
            _ => tracing::warn!(line = line + 2, "skipping unparsable row"),
        }
    }
    out.sort_by_key(|a| a.age);
    Ok(out)
}

/// Smooth synthetic population with a post-war bulge.
fn generated_population() -> Vec<AgeCount> {
    (0..=100u32)
        .map(|age| {
            let a = i64::from(age);
            let decline = 1200 - a * 9;
            let bulge = if (55..=70).contains(&a) { 250 - (a - 62).abs() * 25 } else { 0 };
            let male = (decline + bulge - a * 2).max(10);
            let female = (decline + bulge + a).max(15);
            AgeCount::new(age, Decimal::from(male), Decimal::from(female))
        })
        .collect()
}

fn decades(ages: &[AgeCount]) -> Vec<(u32, Decimal, Decimal)> {
    let mut out: Vec<(u32, Decimal, Decimal)> = Vec::new();
    for a in ages {
        let lower = a.age / 10 * 10;
        match out.iter_mut().find(|(l, _, _)| *l == lower) {
            Some(entry) => {
                entry.1 += a.male;
                entry.2 += a.female;
            }
            None => out.push((lower, a.male, a.female)),
        }
    }
    out.sort_by_key(|(l, _, _)| *l);
    out
}
