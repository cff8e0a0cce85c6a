//! # Site Estimate CLI
//!
//! Terminal front end over the `estimate_core` calculator catalog: list and
//! inspect calculators, run one from flags or interactively, keep results
//! in a project file and print a PDF report.

mod cli;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use estimate_core::catalog;
use estimate_core::config::EstimateConfig;
use estimate_core::file_io::{load_project, save_project, FileLock};
use estimate_core::form::FormState;
use estimate_core::formula::{FormulaCategory, FormulaSpec};
use estimate_core::presenter::{render_text, ResultTable};
use estimate_core::project::{EstimateProject, SavedCalculation};
use estimate_core::report::render_calculation_pdf;

use cli::{Cli, Commands, FormValues};

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = EstimateConfig::load_or_default(&cli.config);
    debug!(path = %cli.config.display(), "config loaded");

    match cli.command {
        Commands::List { category } => list(category.as_deref()),
        Commands::Show { id } => show(&id, &config),
        Commands::Calc { id, values, json, detail } => calc(&id, &values, json, detail, &config),
        Commands::Prompt { id } => prompt(&id, &config),
        Commands::Save { project, id, values, label } => save(&project, &id, &values, &label, &config),
        Commands::History { project, id } => {
            let path = project.unwrap_or_else(|| config.history_file.clone());
            history(&path, id.as_deref(), &config)
        }
        Commands::Report { id, values, output, title } => report(&id, &values, &output, &title, &config),
    }
}

// ============================================================================
// Form Helpers
// ============================================================================

/// Form for `id` with the configured metal, the selects, then the inputs
fn build_form(id: &str, values: &FormValues, config: &EstimateConfig) -> Result<FormState> {
    let mut form = FormState::for_id(id)?;
    preselect_metal(&mut form, config)?;

    for (key, value) in &values.selects {
        form.select(key, value)
            .with_context(|| format!("--select {}={}", key, value))?;
    }
    for (key, value) in &values.inputs {
        form.set(key, value.as_str())
            .with_context(|| format!("-i {}={}", key, value))?;
    }
    form.calculate();
    Ok(form)
}

fn preselect_metal(form: &mut FormState, config: &EstimateConfig) -> Result<()> {
    let metal = config.default_metal.value();
    let offered = form
        .spec()
        .input("metalType")
        .is_some_and(|field| field.option(metal).is_some());
    if offered {
        form.select("metalType", metal)?;
    }
    Ok(())
}

fn print_result(form: &FormState, config: &EstimateConfig) {
    if let Some(table) = form.result(&config.presentation) {
        print!("{}", render_text(&table));
    }
}

// ============================================================================
// Commands
// ============================================================================

fn list(category: Option<&str>) -> Result<()> {
    let categories = match category {
        Some(name) => match FormulaCategory::parse(name) {
            Some(c) => vec![c],
            None => bail!("unknown category '{}'", name),
        },
        None => catalog::categories(),
    };

    for category in categories {
        println!("{}", category.display_name());
        for spec in catalog::in_category(category) {
            println!("  {:<28} {}", spec.id, spec.title);
        }
        println!();
    }
    Ok(())
}

fn show(id: &str, config: &EstimateConfig) -> Result<()> {
    let spec = catalog::get(id)?;
    println!("{} ({})", spec.title, spec.category.display_name());
    println!();
    println!("Inputs:");
    for field in &spec.fields {
        if field.is_select() {
            let options: Vec<&str> = field.options().iter().map(|o| o.value).collect();
            println!("  {:<22} {} [{}] default {}", field.key, field.label, options.join(", "), field.default);
        } else {
            let mut unit = config.presentation.input_unit(field.unit);
            if let Some(imperial) = field.imperial_unit {
                unit = format!("{} / {}", unit, config.presentation.input_unit(imperial));
            }
            println!("  {:<22} {} ({}) {}", field.key, field.label, field.symbol, unit);
        }
    }
    println!();
    println!("Outputs:");
    for output in spec.output_schema() {
        println!(
            "  {:<22} {} [{}] = {}",
            output.key,
            output.label,
            output.unit.label(&config.presentation),
            output.formula
        );
    }
    Ok(())
}

fn calc(id: &str, values: &FormValues, json: bool, detail: bool, config: &EstimateConfig) -> Result<()> {
    let form = build_form(id, values, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&form.detail_view(&config.presentation))?);
        return Ok(());
    }

    print_result(&form, config);
    if detail {
        print_detail(&form, config);
    }
    Ok(())
}

fn print_detail(form: &FormState, config: &EstimateConfig) {
    let view = form.detail_view(&config.presentation);
    println!();
    println!("Calculation Data:");
    for datum in &view.calculation_data {
        println!("  {:<24} {:<4} {}", datum.label, datum.symbol, datum.value);
    }
    println!();
    println!("Formulas:");
    for line in &view.outputs {
        println!("  {} = {}", line.label, line.formula);
        println!("    {}", line.value);
    }
}

fn save(path: &Path, id: &str, values: &FormValues, label: &str, config: &EstimateConfig) -> Result<()> {
    let form = build_form(id, values, config)?;

    let user = if config.prepared_by.is_empty() { "estimate" } else { config.prepared_by.as_str() };
    let _lock = FileLock::acquire(path, user)?;

    let mut project = if path.exists() {
        load_project(path)?
    } else {
        let mut project = EstimateProject::new(config.prepared_by.clone(), "", "");
        project.settings.presentation = config.presentation.clone();
        project.settings.default_metal = config.default_metal;
        project
    };

    let label = if label.is_empty() { form.spec().title } else { label };
    let item = project.add_calculation(SavedCalculation::from_form(&form, label));
    save_project(&project, path)?;

    print_result(&form, config);
    println!("Saved {} to {} ({} items)", item, path.display(), project.item_count());
    Ok(())
}

fn history(path: &Path, id: Option<&str>, config: &EstimateConfig) -> Result<()> {
    let project = load_project(path).with_context(|| format!("opening {}", path.display()))?;
    let entries = match id {
        Some(id) => project.history_for(id),
        None => project.history(),
    };

    if entries.is_empty() {
        println!("No saved calculations.");
        return Ok(());
    }

    for (_, calc) in entries {
        println!(
            "{}  {:<28} {:<24} {}",
            calc.saved_at.format("%Y-%m-%d %H:%M"),
            calc.formula_id,
            calc.label,
            summary(calc, config)
        );
    }
    Ok(())
}

/// Total banner of a saved calculation, recomputed with the current formulas
fn summary(calc: &SavedCalculation, config: &EstimateConfig) -> String {
    let Ok(spec) = catalog::get(&calc.formula_id) else {
        return "(calculator removed)".to_string();
    };
    banner(spec, calc, config).unwrap_or_default()
}

fn banner(spec: &FormulaSpec, calc: &SavedCalculation, config: &EstimateConfig) -> Option<String> {
    let outputs = spec.evaluate(&calc.form_inputs());
    ResultTable::build(spec, &outputs, &config.presentation)
        .total
        .map(|t| format!("{}: {}", t.label, t.amount))
}

fn report(id: &str, values: &FormValues, output: &Path, title: &str, config: &EstimateConfig) -> Result<()> {
    let form = build_form(id, values, config)?;
    let pdf = render_calculation_pdf(form.spec(), &form.inputs(), &config.presentation, title, &config.prepared_by)?;
    fs::write(output, &pdf).with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {} ({} bytes)", output.display(), pdf.len());
    Ok(())
}

// ============================================================================
// Interactive Prompt
// ============================================================================

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt(id: &str, config: &EstimateConfig) -> Result<()> {
    let mut form = FormState::for_id(id)?;
    preselect_metal(&mut form, config)?;

    println!("{}", form.spec().title);
    println!("{}", "=".repeat(form.spec().title.chars().count()));
    println!("Press Enter to keep the value in brackets.");
    println!();

    for field in &form.spec().fields {
        if field.is_select() {
            for (n, option) in field.options().iter().enumerate() {
                println!("  {}) {}", n + 1, option.label);
            }
            let Some(answer) = read_line(&format!("{} [{}]: ", field.label, form.value(field.key))) else {
                break;
            };
            if answer.is_empty() {
                continue;
            }
            let chosen = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| field.options().get(i))
                .map(|o| o.value)
                .unwrap_or(answer.as_str());
            if let Err(e) = form.select(field.key, chosen) {
                eprintln!("  {}", e);
            }
        } else {
            let unit = config.presentation.input_unit(field.unit_for(&form.inputs()));
            let Some(answer) = read_line(&format!("{} {} [{}]: ", field.label, unit, form.value(field.key))) else {
                break;
            };
            if !answer.is_empty() {
                form.set(field.key, answer)?;
            }
        }
    }

    form.calculate();
    println!();
    print_result(&form, config);
    Ok(())
}
