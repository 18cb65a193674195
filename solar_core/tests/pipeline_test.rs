//! End-to-end checks over the public API: input record in, proposal out.

use solar_core::calculations::checklist::{update_label, update_observation};
use solar_core::calculations::financial::project_financials;
use solar_core::calculations::{compute_payback, estimate_module_count, size_system, suggest_string_size};
use solar_core::catalog::{conductor_for_current, RoofType};
use solar_core::file_io::{load_project, save_project};
use solar_core::settings::SavingsBasis;
use solar_core::{evaluate, EngineSettings, Project, SystemInput};

fn ten_kilowatt_input() -> SystemInput {
    SystemInput {
        module_count: 20,
        module_power_w: 500,
        modules_per_string: 10,
        ..SystemInput::default()
    }
}

#[test]
fn bill_to_proposal() {
    let settings = EngineSettings::default();
    let input = SystemInput::from_settings(&settings).with_bill(650.0);
    assert!(input.validate().is_ok());

    let report = evaluate(&input, &[], &settings);

    assert_eq!(input.module_count, 9);
    assert_eq!(input.modules_per_string, 9);
    assert!((report.specs.total_power_kw - 5.175).abs() < 1e-9);
    assert_eq!(report.specs.inverter_power_kw, 3.6);
    assert_eq!(report.specs.string_config_text, "1 Strings de 9 módulos");
    assert_eq!(report.production.len(), 12);
    assert_eq!(report.payback, "27.7 meses");
    assert_eq!(report.checklist[0].label, "Painéis Solares");
}

#[test]
fn estimator_rejects_non_positive_inputs() {
    assert_eq!(estimate_module_count(0.0, 0.95, 5.8, 575), 0);
    assert_eq!(estimate_module_count(-100.0, 0.95, 5.8, 575), 0);
    assert_eq!(estimate_module_count(650.0, 0.0, 5.8, 575), 0);
    assert_eq!(estimate_module_count(650.0, -1.0, 5.8, 575), 0);
}

#[test]
fn string_planner_bounds() {
    for n in 1..=19 {
        assert_eq!(suggest_string_size(n), n);
    }
    for n in 20..=400 {
        let size = suggest_string_size(n);
        assert!(size >= 1 && size <= 19, "{} modules -> {}", n, size);
    }
}

#[test]
fn sizing_is_idempotent() {
    let input = ten_kilowatt_input();
    assert_eq!(size_system(&input), size_system(&input));
}

#[test]
fn ten_kilowatt_array_gets_seven_kilowatt_inverter() {
    let specs = size_system(&ten_kilowatt_input());

    assert_eq!(specs.total_power_kw, 10.0);
    assert_eq!(specs.inverter_power_kw, 7.0);
    assert!(!specs.is_three_phase);
    assert_eq!(specs.suggested_inverter, "Inversor 7kW (Mono/Bifásico 220V)");
    assert_eq!(specs.overload, "143%");
    assert_eq!(specs.cable_gauge, "10.0mm²");
    assert_eq!(specs.breaker_rating, "50A");
    assert_eq!(specs.string_config_text, "2 Strings de 10 módulos");
}

#[test]
fn conductor_table_boundary() {
    let at_limit = conductor_for_current(21.0);
    assert_eq!((at_limit.cable_gauge, at_limit.breaker_rating), ("2.5mm²", "20A"));

    let above = conductor_for_current(21.01);
    assert_eq!((above.cable_gauge, above.breaker_rating), ("4.0mm²", "25A"));
}

#[test]
fn payback_text() {
    assert_eq!(compute_payback(18000.0, 0.0), "---");
    assert_eq!(compute_payback(18000.0, -50.0), "---");
    assert_eq!(compute_payback(18000.0, 600.0), "30.0 meses");
}

#[test]
fn twenty_five_year_savings() {
    let projection = project_financials(18000.0, 600.0);
    assert_eq!(projection.annual_savings, 7200.0);
    assert!((projection.total_savings_25_years - 395_024.49).abs() < 0.01);
    assert!((projection.net_savings_25_years - 377_024.49).abs() < 0.01);
}

#[test]
fn checklist_survives_regeneration() {
    let settings = EngineSettings::default();
    let input = SystemInput::default();
    let mut checklist = evaluate(&input, &[], &settings).checklist;

    update_observation(&mut checklist, "1", "Módulos bifaciais");
    update_label(&mut checklist, "8", "Inversor do cliente");

    let bigger = input.with_module_count(20).with_bill(1500.0);
    let report = evaluate(&bigger, &checklist, &settings);

    assert_eq!(report.checklist[0].observation, "Módulos bifaciais");
    assert_eq!(report.checklist[0].quantity.to_string(), bigger.module_count.to_string());
    assert_eq!(report.checklist[1].label, report.specs.suggested_inverter);
}

#[test]
fn roof_change_updates_mounting_kit() {
    let settings = EngineSettings::default();
    let input = SystemInput::default();
    let first = evaluate(&input, &[], &settings);

    let slab = SystemInput { roof_type: RoofType::Slab, ..input };
    let second = evaluate(&slab, &first.checklist, &settings);
    assert_eq!(second.checklist[5].observation, "Estrutura de Triângulo (Laje)");
}

#[test]
fn generation_basis_changes_payback_only() {
    let input = SystemInput::default();
    let bill = evaluate(&input, &[], &EngineSettings::default());
    let generation = evaluate(
        &input,
        &[],
        &EngineSettings {
            savings_basis: SavingsBasis::Generation,
            ..EngineSettings::default()
        },
    );

    assert_eq!(bill.specs, generation.specs);
    assert_eq!(bill.production, generation.production);
    assert_ne!(bill.payback, generation.payback);
}

#[test]
fn saved_project_reproduces_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cliente.spf");
    let settings = EngineSettings::default();

    let mut project = Project::new("Cliente", "(21) 97777-0000");
    project.set_input(project.input.clone().with_bill(980.0).with_location(-3.7, -38.5));
    let before = project.refresh(&settings);
    update_observation(&mut project.checklist, "7", "Conectores extras");
    save_project(&project, &path).unwrap();

    let mut loaded = load_project(&path).unwrap();
    let after = loaded.refresh(&settings);

    assert_eq!(loaded.input.hsp, 6.0);
    assert_eq!(after.specs, before.specs);
    assert_eq!(after.payback, before.payback);
    assert_eq!(after.checklist[7].observation, "Conectores extras");
}
