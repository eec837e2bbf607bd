use std::fs;
use std::path::PathBuf;

use mo_workflow_scheduler::api::run_config_dto::RunConfigDto;
use mo_workflow_scheduler::domain::optimizer::{AlgorithmParams, AlgorithmType};
use mo_workflow_scheduler::domain::topology::TopologyScenario;
use mo_workflow_scheduler::error::Error;
use mo_workflow_scheduler::experiment::{ExperimentOverrides, ExperimentSettings, run_scenario, run_scenario_in_batches, run_single};
use mo_workflow_scheduler::loader::parser::{parse_json_file, parse_json_str};
use mo_workflow_scheduler::run_experiment;

fn small_config() -> RunConfigDto {
    parse_json_file(format!("{}/tests/data/run_config_small.json", env!("CARGO_MANIFEST_DIR"))).unwrap()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mo_workflow_scheduler_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_parse_run_config() {
    let config = small_config();

    assert!(config.validate().is_ok());
    assert_eq!(config.execution.as_ref().unwrap().runs, 2);
    assert_eq!(config.execution.as_ref().unwrap().base_seed, 7);
    assert_eq!(config.nodes.as_ref().unwrap().edge.as_ref().unwrap().zone.as_deref(), Some("dam"));
    assert_eq!(config.algorithms.mojs.population_size, 8);
    assert_eq!(config.algorithms.mojs.mutation_rate, 0.05);
    assert_eq!(config.algorithms.random.sample_count, 20);
    assert!(config.network.as_ref().unwrap().variability.enabled);
}

#[test]
fn test_missing_sections_are_reported() {
    let empty: RunConfigDto = parse_json_str("{}").unwrap();
    assert!(matches!(empty.validate(), Err(Error::ConfigurationError(_))));

    let mut no_runs = small_config();
    no_runs.execution.as_mut().unwrap().runs = 0;
    assert!(matches!(no_runs.validate(), Err(Error::ConfigurationError(_))));

    let mut no_fog = small_config();
    no_fog.nodes.as_mut().unwrap().fog = None;
    assert!(matches!(no_fog.validate(), Err(Error::ConfigurationError(_))));

    let mut blank_type = small_config();
    blank_type.workflow.as_mut().unwrap().workflow_type = Some("  ".to_string());
    assert!(matches!(blank_type.validate(), Err(Error::ConfigurationError(_))));
}

#[test]
fn test_algorithm_parameters_are_range_checked() {
    assert!(AlgorithmParams::default().validate().is_ok());
    assert!(small_config().algorithms.validate().is_ok());

    let broken: &[(&str, fn(&mut AlgorithmParams))] = &[
        ("evaporation rate of one", |p| p.moaco.evaporation_rate = 1.0),
        ("evaporation rate of zero", |p| p.moaco.evaporation_rate = 0.0),
        ("zero pheromone floor", |p| p.moaco.pheromone_floor = 0.0),
        ("zero initial pheromone", |p| p.moaco.initial_pheromone = 0.0),
        ("negative cost weight", |p| p.moaco.cost_weight = -1.0),
        ("no ants", |p| p.moaco.ant_count = 0),
        ("negative mutation rate", |p| p.mojs.mutation_rate = -3.0),
        ("restart ratio above one", |p| p.mojs.restart_ratio = 7.0),
        ("leader probability above one", |p| p.mojs.leader_probability = 1.5),
        ("not-a-number guided probability", |p| p.mojs.final_guided_probability = f64::NAN),
        ("empty population", |p| p.mojs.population_size = 0),
        ("no stagnation budget", |p| p.mojs.stagnation_limit = 0),
        ("empty jellyfish archive", |p| p.mojs.archive_max_size = 0),
        ("no random samples", |p| p.random.sample_count = 0),
        ("empty random archive", |p| p.random.archive_max_size = 0),
    ];

    for &(label, breaks) in broken {
        let mut config = small_config();
        breaks(&mut config.algorithms);
        assert!(matches!(config.validate(), Err(Error::ConfigurationError(_))), "accepted {}", label);
    }
}

#[test]
fn test_settings_reject_invalid_algorithm_section() {
    let mut config = small_config();
    config.algorithms.moaco.evaporation_rate = 1.0;
    config.algorithms.moaco.pheromone_floor = 0.0;
    config.algorithms.moaco.initial_pheromone = 0.0;
    config.algorithms.mojs.mutation_rate = -3.0;
    config.algorithms.mojs.restart_ratio = 7.0;

    assert!(matches!(ExperimentSettings::from_dto(config, ExperimentOverrides::default()), Err(Error::ConfigurationError(_))));
}

#[test]
fn test_malformed_json_is_a_deserialization_error() {
    let result: mo_workflow_scheduler::error::Result<RunConfigDto> = parse_json_str("{ \"workflow\": ");

    assert!(matches!(result, Err(Error::DeserializationError(_))));
}

#[test]
fn test_overrides_take_precedence() {
    let overrides = ExperimentOverrides { runs: Some(1), base_seed: Some(42), scenarios: vec!["poor_network".to_string()], output_dir: None };

    let settings = ExperimentSettings::from_dto(small_config(), overrides).unwrap();

    assert_eq!(settings.runs, 1);
    assert_eq!(settings.base_seed, 42);
    assert_eq!(settings.scenarios, vec![TopologyScenario::PoorNetwork]);
    assert_eq!(settings.tasks.len(), 12);
    assert_eq!(settings.seed_for(3), 45);
}

#[test]
fn test_unknown_scenario_fails_configuration() {
    let overrides = ExperimentOverrides { scenarios: vec!["moon_base".to_string()], ..ExperimentOverrides::default() };

    assert!(matches!(ExperimentSettings::from_dto(small_config(), overrides), Err(Error::ConversionError(_))));
}

#[test]
fn test_single_run_produces_every_strategy() {
    let settings = ExperimentSettings::from_dto(small_config(), ExperimentOverrides::default()).unwrap();

    let run = run_single(&settings, TopologyScenario::NearCloud, 0).unwrap();

    assert_eq!(run.seed, 7);
    assert_eq!(run.results.len(), 4);
    assert_eq!(run.result(AlgorithmType::Greedy).unwrap().archive.len(), 1);
    assert!(run.result(AlgorithmType::Random).unwrap().hypervolume_history.is_empty());
    assert_eq!(run.result(AlgorithmType::Mojs).unwrap().hypervolume_history.len(), 5);
    assert_eq!(run.result(AlgorithmType::Moaco).unwrap().hypervolume_history.len(), 5);
    for result in &run.results {
        assert!(!result.archive.is_empty());
        assert!(result.archive.len() <= 10);
        assert!(result.hypervolume >= 0.0);
    }

    let row = run.summary_row();
    assert_eq!(row.ref_f1, run.reference_point[0]);
    assert_eq!(row.pareto_greedy, 1);
}

#[test]
fn test_scenario_runs_are_reproducible_and_ordered() {
    let settings = ExperimentSettings::from_dto(small_config(), ExperimentOverrides::default()).unwrap();

    let first = run_scenario(&settings, TopologyScenario::NearCloud).unwrap();
    let second = run_scenario(&settings, TopologyScenario::NearCloud).unwrap();

    assert_eq!(first.iter().map(|run| run.seed).collect::<Vec<_>>(), vec![7, 8]);
    for (a, b) in first.iter().zip(&second) {
        for (x, y) in a.results.iter().zip(&b.results) {
            assert_eq!(x.archive, y.archive);
            assert_eq!(x.hypervolume_history, y.hypervolume_history);
        }
    }
}

#[test]
fn test_batched_runs_keep_seed_order() {
    let overrides = ExperimentOverrides { runs: Some(5), ..ExperimentOverrides::default() };
    let settings = ExperimentSettings::from_dto(small_config(), overrides).unwrap();

    let batched = run_scenario_in_batches(&settings, TopologyScenario::NearCloud, 2).unwrap();
    let serial = run_scenario_in_batches(&settings, TopologyScenario::NearCloud, 1).unwrap();

    assert_eq!(batched.iter().map(|run| run.seed).collect::<Vec<_>>(), vec![7, 8, 9, 10, 11]);
    assert_eq!(batched.iter().map(|run| run.run).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    for (a, b) in batched.iter().zip(&serial) {
        for (x, y) in a.results.iter().zip(&b.results) {
            assert_eq!(x.archive, y.archive);
        }
    }
}

#[test]
fn test_experiment_writes_result_files() {
    let output_dir = scratch_dir("export");
    let overrides = ExperimentOverrides { runs: Some(1), output_dir: Some(output_dir.clone()), ..ExperimentOverrides::default() };
    let settings = ExperimentSettings::from_dto(small_config(), overrides).unwrap();

    let runs = run_experiment(&settings).unwrap();

    assert_eq!(runs.len(), 1);
    let scenario_dir = output_dir.join("near_cloud");
    for file in ["pareto_mojs.csv", "pareto_aco.csv", "pareto_random.csv", "pareto_greedy.csv", "hv_mojs.csv", "hv_aco.csv"] {
        assert!(scenario_dir.join("run_0").join(file).is_file(), "missing {}", file);
    }
    assert!(!scenario_dir.join("run_0").join("hv_random.csv").exists());

    let summary = fs::read_to_string(scenario_dir.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("run,seed,ref_f1,ref_f2,ref_f3,pareto_mojs"));

    let greedy = fs::read_to_string(scenario_dir.join("run_0").join("pareto_greedy.csv")).unwrap();
    assert_eq!(greedy.lines().next(), Some("f1_makespan,f2_cost,f3_energy"));
    assert_eq!(greedy.lines().count(), 2);

    let _ = fs::remove_dir_all(&output_dir);
}
