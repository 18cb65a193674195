//! # Solar Sizing CLI
//!
//! Terminal front-end for the sizing engine. Asks for the bill and the
//! equipment choices (Enter keeps the suggested value), prints the
//! proposal summary and its JSON, and can save or reopen `.spf` projects.
//!
//! ```text
//! solar_cli [--settings <file>] [--load <file.spf>] [--save <file.spf>]
//! solar_cli --list <dir>
//! solar_cli --delete <file.spf>
//! ```

mod logging;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use solar_core::calculations::inverter::OverloadBand;
use solar_core::catalog::{inverter_labels, RoofType};
use solar_core::file_io::{
    delete_project, list_projects, load_project_with_lock_check, save_project, FileLock,
};
use solar_core::{EngineSettings, Project, SolarError, SolarResult, SystemReport};

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Default)]
struct Args {
    settings: Option<PathBuf>,
    load: Option<PathBuf>,
    save: Option<PathBuf>,
    list: Option<PathBuf>,
    delete: Option<PathBuf>,
}

fn parse_args(args: impl Iterator<Item = String>) -> SolarResult<Args> {
    let mut parsed = Args::default();
    let mut args = args;

    while let Some(flag) = args.next() {
        let slot = match flag.as_str() {
            "--settings" => &mut parsed.settings,
            "--load" => &mut parsed.load,
            "--save" => &mut parsed.save,
            "--list" => &mut parsed.list,
            "--delete" => &mut parsed.delete,
            other => {
                return Err(SolarError::invalid_input("argument", other, "Unknown flag"));
            }
        };
        let value = args.next().ok_or_else(|| SolarError::missing_field(flag.clone()))?;
        *slot = Some(PathBuf::from(value));
    }

    Ok(parsed)
}

// ============================================================================
// Prompts
// ============================================================================

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    read_line(&format!("{} [{}]: ", prompt, default))
        .and_then(|s| s.replace(',', ".").parse().ok())
        .unwrap_or(default)
}

fn prompt_u32(prompt: &str, default: u32) -> u32 {
    read_line(&format!("{} [{}]: ", prompt, default))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_string(prompt: &str, default: &str) -> String {
    read_line(&format!("{} [{}]: ", prompt, default)).unwrap_or_else(|| default.to_string())
}

fn prompt_roof(default: RoofType) -> RoofType {
    println!("Roof types:");
    for (i, roof) in RoofType::ALL.iter().enumerate() {
        println!("  {}) {}", i + 1, roof);
    }
    let choice = prompt_u32("Roof type", position_of(default));
    RoofType::ALL
        .get((choice as usize).wrapping_sub(1))
        .copied()
        .unwrap_or(default)
}

fn position_of(roof: RoofType) -> u32 {
    RoofType::ALL
        .iter()
        .position(|r| *r == roof)
        .map_or(1, |i| i as u32 + 1)
}

fn prompt_inverter(current: &str) -> String {
    println!("Inverters:");
    for (i, label) in inverter_labels().iter().enumerate() {
        println!("  {}) {}", i + 1, label);
    }

    match read_line("Inverter number or label [keep]: ") {
        None => current.to_string(),
        Some(entry) => inverter_choice(&entry, current),
    }
}

/// Menu number (1 = automatic) or a free-form label.
fn inverter_choice(entry: &str, current: &str) -> String {
    match entry.parse::<usize>() {
        Ok(n) => n
            .checked_sub(1)
            .and_then(|i| inverter_labels().get(i).copied())
            .map_or_else(|| current.to_string(), str::to_string),
        Err(_) => entry.to_string(),
    }
}

/// Walk the user through a new proposal.
fn interactive_project(settings: &EngineSettings) -> Project {
    let client = prompt_string("Client name", "Cliente");
    let phone = prompt_string("Client phone", "");
    let mut project = Project::with_settings(client, phone, settings);
    let mut input = project.input.clone();

    let bill = prompt_f64("Monthly bill (R$)", input.bill_amount);
    input = input.with_bill(bill);

    let modules = prompt_u32("Module count", input.module_count);
    input = input.with_module_count(modules);
    input.modules_per_string = prompt_u32("Modules per string", input.modules_per_string);

    input.roof_type = prompt_roof(input.roof_type);
    input.selected_inverter = prompt_inverter(&input.selected_inverter);

    let kit_cost = prompt_f64("Kit cost (R$)", input.kit_cost);
    let margin = prompt_f64("Margin (%)", input.profit_margin_pct);
    input = input.with_kit_cost(kit_cost).with_margin(margin);

    let price = prompt_f64("Sale price (R$)", input.investment_amount);
    if price != input.investment_amount {
        input = input.with_investment(price);
    }
    input.down_payment = Some(input.investment_amount * settings.down_payment_fraction);

    project.set_input(input);
    project
}

// ============================================================================
// Output
// ============================================================================

fn print_report(project: &Project, report: &SystemReport) {
    let specs = &report.specs;

    println!("═══════════════════════════════════════");
    println!("  PROPOSTA - {}", project.meta.client_name);
    println!("═══════════════════════════════════════");
    println!();
    println!("System:");
    println!("  Array:     {} × {} W = {:.2} kWp", project.input.module_count, project.input.effective_module_power_w(), specs.total_power_kw);
    println!("  Inverter:  {}", specs.suggested_inverter);
    println!("  Range:     {}", specs.inverter_range);
    println!("  Overload:  {} {} {}", specs.overload, specs.overload_band.display_name(), band_icon(specs.overload_band));
    println!("  Strings:   {}", specs.string_config_text);
    println!();
    println!("AC circuit:");
    println!("  Current:   {:.1} A", specs.nominal_current_a);
    println!("  Cable:     {}", specs.cable_gauge);
    println!("  Breaker:   {}", specs.breaker_rating);
    println!();
    println!("Roof:");
    println!("  Area:      {:.1} m²", specs.area_required_m2);
    println!("  Weight:    {:.0} kg", specs.total_weight_kg);
    println!();
    println!("Generation (kWh):");
    for month in &report.production {
        println!("  {}  {:>6}", month.month, month.generation_kwh);
    }
    println!("  Year  {:>6}  (avg {}/month)", report.production_summary.yearly_kwh, report.production_summary.monthly_avg_kwh);
    println!();
    println!("Finance:");
    println!("  Investment:  R$ {:.2}", report.payment.investment);
    println!("  Down:        R$ {:.2} ({:.0}%)", report.payment.down_payment, report.payment.down_payment_pct);
    println!("  Payback:     {}", report.payback);
    println!("  25 years:    R$ {:.2}", report.financials.total_savings_25_years);
    println!();
    println!("Checklist:");
    for item in &report.checklist {
        if item.observation.is_empty() {
            println!("  [{}] {} - {}", item.id, item.label, item.quantity);
        } else {
            println!("  [{}] {} - {} ({})", item.id, item.label, item.quantity, item.observation);
        }
    }
    println!("═══════════════════════════════════════");
}

fn band_icon(band: OverloadBand) -> &'static str {
    match band {
        OverloadBand::Ideal => "[OK]",
        OverloadBand::Low | OverloadBand::High => "[CHECK]",
    }
}

// ============================================================================
// Entry point
// ============================================================================

fn print_history(dir: &std::path::Path) -> SolarResult<()> {
    let projects = list_projects(dir)?;
    if projects.is_empty() {
        println!("No saved proposals in {}", dir.display());
        return Ok(());
    }
    for entry in &projects {
        println!(
            "{}  {:<30} {}",
            entry.meta.modified.format("%Y-%m-%d %H:%M"),
            entry.meta.client_name,
            entry.path.display()
        );
    }
    Ok(())
}

fn run() -> SolarResult<()> {
    let args = parse_args(std::env::args().skip(1))?;

    if let Some(dir) = &args.list {
        return print_history(dir);
    }
    if let Some(path) = &args.delete {
        delete_project(path)?;
        println!("Deleted {}", path.display());
        return Ok(());
    }

    let settings = match &args.settings {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::default(),
    };

    let mut project = match &args.load {
        Some(path) => {
            let (project, lock) = load_project_with_lock_check(path)?;
            if let Some(lock) = lock {
                tracing::warn!(holder = %lock.holder(), "project is open elsewhere, changes will not be saved over it");
            }
            project
        }
        None => {
            println!("Solar Sizing CLI - Dimensionamento Fotovoltaico");
            println!("===============================================");
            println!();
            interactive_project(&settings)
        }
    };

    if let Err(e) = project.input.validate() {
        tracing::warn!(error = %e, "input has entries worth reviewing");
    }

    let report = project.refresh(&settings);

    println!();
    print_report(&project, &report);

    println!();
    println!("JSON Output:");
    let json = serde_json::to_string_pretty(&report).map_err(|e| SolarError::serialization(e.to_string()))?;
    println!("{}", json);

    if let Some(path) = &args.save {
        let user = std::env::var("USER").unwrap_or_else(|_| "solar_cli".to_string());
        let _lock = FileLock::acquire(path, user)?;
        save_project(&project, path)?;
        println!();
        println!("Saved to {}", path.display());
    }

    Ok(())
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error [{}]: {}", e.error_code(), e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}
