use clap::{Parser, Subcommand};
use pvt_core::{CoreError, Quantity, UnitKind, si};
use pvt_correlations::{
    Category, CorrelationError, Evaluation, Grid, InputSet, InputValue, Registry,
    RegistryBuilder, SweepDefinition, SweepType, Tuning,
};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Correlation(#[from] CorrelationError),

    #[error(transparent)]
    Unit(#[from] CoreError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Invalid input '{0}': expected NAME=VALUE[UNIT]")]
    Input(String),

    #[error("{0} range warning(s) raised in strict mode")]
    Strict(usize),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "pvt-cli")]
#[command(about = "PVT correlation catalog and evaluator", long_about = None)]
struct Cli {
    /// Additional YAML catalog loaded after the built-in one (repeatable)
    #[arg(long = "catalog", global = true)]
    catalogs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List output categories and how many correlations each has
    Categories,
    /// List correlation names
    List {
        /// Only correlations of this category
        #[arg(long)]
        category: Option<Category>,
        /// Only correlations visible in this grid (blackoil, drygas, wetgas)
        #[arg(long)]
        grid: Option<Grid>,
    },
    /// Search names, titles and authors
    Search { query: String },
    /// Show the parameter schema of a correlation
    Describe {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a correlation, e.g. `eval PbStanding yg=0.75 rsb=500 api=35 t=150F`
    Eval {
        name: String,
        /// Inputs as NAME=VALUE, with an optional unit suffix
        inputs: Vec<String>,
        /// Additive tuning constant
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        tune_c: f64,
        /// Multiplicative tuning constant
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        tune_m: f64,
        /// Fail when any range warning is raised
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        json: bool,
        /// Also print the result in SI units
        #[arg(long)]
        si: bool,
    },
    /// Evaluate a correlation while one input varies, printing CSV
    Sweep {
        name: String,
        /// Swept parameter or synonym
        #[arg(long)]
        param: String,
        #[arg(long, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Unit of --from and --to
        #[arg(long)]
        unit: Option<UnitKind>,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        /// Fixed inputs as NAME=VALUE, with an optional unit suffix
        inputs: Vec<String>,
    },
    /// Convert a quantity, e.g. `convert 150F Rankine`
    Convert { quantity: String, target: UnitKind },
    /// List the supported unit kinds
    Units,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let Cli { catalogs, command } = cli;
    match command {
        Commands::Convert { quantity, target } => cmd_convert(&quantity, target),
        Commands::Units => {
            cmd_units();
            Ok(())
        }
        command => run_with_registry(&load_registry(&catalogs)?, command),
    }
}

fn run_with_registry(registry: &Registry, command: Commands) -> CliResult<()> {
    match command {
        Commands::Categories => cmd_categories(registry),
        Commands::List { category, grid } => cmd_list(registry, category, grid),
        Commands::Search { query } => cmd_search(registry, &query),
        Commands::Describe { name, json } => cmd_describe(registry, &name, json),
        Commands::Eval {
            name,
            inputs,
            tune_c,
            tune_m,
            strict,
            json,
            si,
        } => {
            let inputs = parse_inputs(&inputs)?;
            let tuning = Tuning { c: tune_c, m: tune_m };
            cmd_eval(registry, &name, &inputs, tuning, strict, json, si)
        }
        Commands::Sweep {
            name,
            param,
            from,
            to,
            points,
            unit,
            log,
            inputs,
        } => {
            let sweep_type = if log {
                SweepType::Logarithmic
            } else {
                SweepType::Linear
            };
            let mut sweep = SweepDefinition::new(param, from, to, points, sweep_type)?;
            if let Some(unit) = unit {
                sweep = sweep.with_unit(unit);
            }
            cmd_sweep(registry, &name, &parse_inputs(&inputs)?, &sweep)
        }
        Commands::Convert { .. } | Commands::Units => Ok(()),
    }
}

fn load_registry(catalogs: &[PathBuf]) -> CliResult<Registry> {
    let mut builder = RegistryBuilder::new().with_builtin_catalog()?;
    for path in catalogs {
        let added = builder.load_yaml_file(path)?;
        tracing::info!(path = %path.display(), correlations = added, "loaded extra catalog");
    }
    Ok(builder.build()?)
}

/// Parse `NAME=VALUE[UNIT]` arguments. A bare number is taken in the unit the
/// correlation declares for that name.
fn parse_inputs(args: &[String]) -> CliResult<InputSet> {
    let mut inputs = InputSet::new();
    for arg in args {
        let (name, value) = arg
            .split_once('=')
            .filter(|(n, v)| !n.trim().is_empty() && !v.trim().is_empty())
            .ok_or_else(|| CliError::Input(arg.clone()))?;
        let value = match value.trim().parse::<f64>() {
            Ok(v) => InputValue::Raw(v),
            Err(_) => InputValue::Quantity(Quantity::parse(value, None)?),
        };
        inputs.insert(name.trim(), value);
    }
    Ok(inputs)
}

fn cmd_categories(registry: &Registry) -> CliResult<()> {
    for category in registry.list_categories() {
        println!(
            "{:<40} {:>3}",
            category.name(),
            registry.list_by_category(category).len()
        );
    }
    Ok(())
}

fn cmd_list(registry: &Registry, category: Option<Category>, grid: Option<Grid>) -> CliResult<()> {
    let names = match category {
        Some(category) => registry.list_by_category(category),
        None => registry.list_correlations(),
    };
    let visible = grid.map(|g| registry.list_visible(g));
    for name in names {
        if visible.as_ref().is_none_or(|v| v.contains(&name)) {
            println!("{name}");
        }
    }
    Ok(())
}

fn cmd_search(registry: &Registry, query: &str) -> CliResult<()> {
    let hits = registry.search(query);
    if hits.is_empty() {
        println!("No correlation matches '{query}'");
    }
    for name in hits {
        let title = registry
            .lookup_by_name(name)?
            .metadata
            .title
            .clone()
            .unwrap_or_default();
        println!("{name:<32} {title}");
    }
    Ok(())
}

fn cmd_describe(registry: &Registry, name: &str, json: bool) -> CliResult<()> {
    let schema = registry.describe(name)?;
    if json {
        println!("{}", schema.to_json()?);
    } else {
        print!("{schema}");
    }
    Ok(())
}

fn cmd_eval(
    registry: &Registry,
    name: &str,
    inputs: &InputSet,
    tuning: Tuning,
    strict: bool,
    json: bool,
    show_si: bool,
) -> CliResult<()> {
    let eval = registry.evaluate_tuned(name, inputs, tuning)?;
    for warning in &eval.warnings {
        tracing::warn!(correlation = name, "{warning}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
    } else {
        print_evaluation(name, &eval, show_si);
    }

    if strict && !eval.warnings.is_empty() {
        return Err(CliError::Strict(eval.warnings.len()));
    }
    Ok(())
}

fn print_evaluation(name: &str, eval: &Evaluation, show_si: bool) {
    println!("{name} = {}", eval.value);
    if eval.variant_used != name {
        println!("  variant: {}", eval.variant_used);
    }
    if show_si {
        if let Some(q) = si::to_si(&eval.value) {
            println!("  SI: {} {}", q.base_value(), q.base_symbol());
        }
    }
    for warning in &eval.warnings {
        println!("  warning: {warning}");
    }
}

fn cmd_sweep(
    registry: &Registry,
    name: &str,
    inputs: &InputSet,
    sweep: &SweepDefinition,
) -> CliResult<()> {
    tracing::info!("{sweep}");
    let result = registry.sweep(name, inputs, sweep, Tuning::default())?;

    println!("{},{}", result.parameter, result.correlation);
    for point in &result.points {
        match &point.result {
            Ok(eval) => println!("{},{}", point.input, eval.value.value()),
            Err(err) => {
                println!("{},", point.input);
                tracing::warn!(input = point.input, "{err}");
            }
        }
    }
    if result.num_failed > 0 {
        eprintln!(
            "{} of {} points failed",
            result.num_failed,
            result.points.len()
        );
    }
    Ok(())
}

fn cmd_convert(quantity: &str, target: UnitKind) -> CliResult<()> {
    let converted = Quantity::parse(quantity, None)?.convert(target)?;
    println!("{converted}");
    Ok(())
}

fn cmd_units() {
    for unit in UnitKind::ALL {
        println!("{:<26} {}", unit.symbol(), unit.description());
    }
}
