use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use markdown_advisor::data::filter::{
    drilldown_indices, filtered_indices, init_filter_state,
};
use markdown_advisor::data::loader::load_file;
use markdown_advisor::metrics::{
    avg_optimal_discount, best_stage, compute_stage_metrics, record_metrics,
    revenue_by_category_season, revenue_by_category_stage, StageMetrics,
};
use markdown_advisor::{simulate, DiscountModel, ProductDataset, Stage};

const USAGE: &str = "\
Usage: markdown-advisor <dataset.csv|dataset.json> [options]

Options:
  --category <NAME>   keep only this category (repeatable)
  --season <NAME>     keep only this season (repeatable)
  --brand <NAME>      narrow the product drill-down to one brand
  --product <NAME>    per-product drill-down, recommendation and simulation
";

struct Args {
    path: PathBuf,
    categories: Vec<String>,
    seasons: Vec<String>,
    brand: Option<String>,
    product: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut path = None;
    let mut categories = Vec::new();
    let mut seasons = Vec::new();
    let mut brand = None;
    let mut product = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--category" => {
                categories.push(args.next().context("--category needs a value")?)
            }
            "--season" => seasons.push(args.next().context("--season needs a value")?),
            "--brand" => brand = Some(args.next().context("--brand needs a value")?),
            "--product" => product = Some(args.next().context("--product needs a value")?),
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if path.is_none() => path = Some(PathBuf::from(other)),
            other => bail!("unexpected argument '{other}'\n\n{USAGE}"),
        }
    }

    Ok(Args {
        path: path.with_context(|| format!("missing dataset path\n\n{USAGE}"))?,
        categories,
        seasons,
        brand,
        product,
    })
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = parse_args()?;
    let dataset = load_file(&args.path)
        .with_context(|| format!("loading {}", args.path.display()))?;
    if dataset.is_empty() {
        bail!("dataset {} contains no products", args.path.display());
    }

    let metrics = compute_stage_metrics(&dataset);
    let model = DiscountModel::fit(&dataset).context("fitting discount model")?;

    // Global filters: names given on the command line, everything otherwise.
    let mut filters = init_filter_state(&dataset);
    if !args.categories.is_empty() {
        filters.categories = restrict("category", &dataset.categories, &args.categories)?;
    }
    if !args.seasons.is_empty() {
        filters.seasons = restrict("season", &dataset.seasons, &args.seasons)?;
    }
    let visible = filtered_indices(&dataset, &filters);
    if visible.is_empty() {
        bail!("no products match the selected filters");
    }

    print_kpis(&dataset, &metrics, &visible);
    print_category_stage_pivot(&dataset, &metrics, &visible);
    print_category_season_table(&dataset, &metrics, &visible);

    if let Some(name) = &args.product {
        print_drilldown(&dataset, &model, &visible, args.brand.as_deref(), name)?;
    }

    println!("model in-sample MAE: {:.4}", model.mean_absolute_error(&dataset));
    Ok(())
}

/// Keep only the requested values, rejecting names the dataset doesn't have.
fn restrict(
    what: &str,
    available: &BTreeSet<String>,
    requested: &[String],
) -> Result<BTreeSet<String>> {
    let mut selected = BTreeSet::new();
    for name in requested {
        if !available.contains(name) {
            bail!(
                "unknown {what} '{name}' (available: {})",
                available.iter().cloned().collect::<Vec<_>>().join(", ")
            );
        }
        selected.insert(name.clone());
    }
    Ok(selected)
}

// ---------------------------------------------------------------------------
// Report sections
// ---------------------------------------------------------------------------

fn print_kpis(
    dataset: &ProductDataset,
    metrics: &[StageMetrics],
    visible: &[usize],
) {
    println!("=== Markdown performance ({} products) ===", visible.len());
    if let Some((stage, revenue)) = best_stage(metrics, visible) {
        println!("best markdown stage:    {stage}");
        println!("revenue at best stage:  {revenue:.0}");
    }
    if let Some(avg) = avg_optimal_discount(dataset, visible) {
        println!("avg optimal discount:   {:.0}%", avg * 100.0);
    }
    println!();
}

fn print_category_stage_pivot(
    dataset: &ProductDataset,
    metrics: &[StageMetrics],
    visible: &[usize],
) {
    println!("--- Revenue by markdown stage (per category) ---");
    let pivot = revenue_by_category_stage(dataset, metrics, visible);

    let categories: BTreeSet<&String> = pivot.keys().map(|(c, _)| c).collect();
    print!("{:<16}", "Category");
    for stage in Stage::ALL {
        print!("{:>12}", stage.label());
    }
    println!();
    for category in categories {
        print!("{category:<16}");
        for stage in Stage::ALL {
            let revenue = pivot
                .get(&(category.clone(), stage))
                .copied()
                .unwrap_or(0.0);
            print!("{revenue:>12.0}");
        }
        println!();
    }
    println!();
}

fn print_category_season_table(
    dataset: &ProductDataset,
    metrics: &[StageMetrics],
    visible: &[usize],
) {
    println!("--- Season x Category total revenue (all stages) ---");
    for ((category, season), revenue) in
        revenue_by_category_season(dataset, metrics, visible)
    {
        println!("{category:<16}{season:<10}{revenue:>12.0}");
    }
    println!();
}

fn print_drilldown(
    dataset: &ProductDataset,
    model: &DiscountModel,
    visible: &[usize],
    brand: Option<&str>,
    name: &str,
) -> Result<()> {
    let pool = drilldown_indices(dataset, visible, None, brand);
    let idx = pool
        .iter()
        .copied()
        .find(|&i| dataset.records[i].product_name == name)
        .with_context(|| format!("product '{name}' not found in the filtered view"))?;
    let record = &dataset.records[idx];

    println!(
        "--- {} | {} | {} ---",
        record.product_name, record.brand, record.season
    );
    println!(
        "{:<7}{:>12}{:>10}{:>12}{:>14}",
        "Stage", "Markdown %", "Sales", "Revenue", "Sell-through"
    );
    for m in record_metrics(record, idx) {
        println!(
            "{:<7}{:>12.1}{:>10.0}{:>12.0}{:>14.2}",
            m.stage.label(),
            m.markdown * 100.0,
            m.sales,
            m.revenue,
            m.sell_through,
        );
    }

    let discount = model.recommend(record);
    let outcome = simulate(record, discount)?;
    println!(
        "recommended discount: {:.1}% -> est. sales {:.0}, est. revenue {:.0}",
        discount * 100.0,
        outcome.sales,
        outcome.revenue
    );
    println!();
    Ok(())
}
