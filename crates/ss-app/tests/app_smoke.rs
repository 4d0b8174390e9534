//! Demo declarations run end to end against the dry-run engine.

use std::path::{Path, PathBuf};

use ss_app::*;
use ss_batch::{BatchProgressEvent, BatchStage};
use ss_engine::DryRunEngine;

fn demo(name: &str) -> PathBuf {
    Path::new("../../demos").join(name)
}

fn output_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ss_app_{}", test));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn summaries_describe_each_demo() {
    let thrust = summarize(&load_declaration(&demo("thrust_curve.yaml")).unwrap()).unwrap();
    assert_eq!(thrust.kind, "thrust curve");
    assert_eq!(thrust.case_count, 5);
    assert_eq!(thrust.independent, "Wind speed");
    assert_eq!(thrust.monitors, vec!["Rotor aero Thrust", "Rotor aero Power", "Surge max"]);

    let harmonic = summarize(&load_declaration(&demo("harmonic_motion.yaml")).unwrap()).unwrap();
    // surge: 2 periods, pitch: 3 amplitudes, heave does not oscillate
    assert_eq!(harmonic.case_count, 5);
    assert!(harmonic.modal);

    let seeds = summarize(&load_declaration(&demo("wave_seed.json")).unwrap()).unwrap();
    assert_eq!(seeds.case_count, 4);
    assert_eq!(seeds.independent, "Case");
}

#[test]
fn planned_cases_carry_their_directives() {
    let declaration = load_declaration(&demo("thrust_curve.yaml")).unwrap();
    let cases = list_planned_cases(&declaration).unwrap();
    assert_eq!(cases[0].id, "wind_speed_5.0");
    assert_eq!(
        cases[0].directives,
        vec![
            "Environment.WindType = \"Constant\"",
            "Environment.WindDirection = 180.0",
            "Environment.WindSpeed = 5.0",
        ]
    );
}

#[test]
fn thrust_curve_demo_persists_cases_and_aggregate() {
    let out = output_dir("thrust_curve");
    let path = demo("thrust_curve.yaml");
    let request = BatchRequest {
        declaration_path: &path,
        options: RunOptions {
            output_dir: Some(out.clone()),
            ..RunOptions::default()
        },
    };
    let mut engine = DryRunEngine::new();
    let response = run_batch(&request, &mut engine).unwrap();

    assert_eq!(response.case_count, 5);
    assert_eq!(
        response.aggregate.independent().values,
        vec![5.0, 10.0, 15.0, 20.0, 25.0]
    );
    let batch_dir = response.batch_dir.unwrap();
    assert!(batch_dir.join("aggregate.csv").exists());
    assert!(batch_dir.join("aggregate.json").exists());

    let case_dir = batch_dir.join("cases").join("wind_speed_10.0");
    assert!(case_dir.join("model.dat").exists());
    assert!(case_dir.join("statics.csv").exists());
    assert!(case_dir.join("dynamics.json").exists());
    assert!(!case_dir.join("simulation.sim").exists());

    let (manifest, cases) = load_batch(&path, Some(&out), &response.batch_id).unwrap();
    assert_eq!(manifest.kind, "thrust curve");
    assert_eq!(manifest.completed_cases.len(), 5);
    assert_eq!(cases.len(), 5);
    assert_eq!(cases[1].case_id, "wind_speed_10.0");
    assert_eq!(cases[1].independent_value, 10.0);

    assert_eq!(list_batches(&path, Some(&out)).unwrap(), vec![response.batch_id]);
}

#[test]
fn harmonic_demo_runs_every_oscillating_case() {
    let out = output_dir("harmonic");
    let path = demo("harmonic_motion.yaml");
    let request = BatchRequest {
        declaration_path: &path,
        options: RunOptions {
            output_dir: Some(out),
            ..RunOptions::default()
        },
    };
    let mut engine = DryRunEngine::new();
    let response = run_batch(&request, &mut engine).unwrap();

    assert_eq!(
        response.aggregate.table().column_names(),
        vec!["Case", "Fairlead tension max", "Dynamic x"]
    );
    assert_eq!(engine.dynamics_runs(), 5);
    // 1 + 12 + 3 directives per case
    assert_eq!(engine.applied().len(), 5 * 16);
}

#[test]
fn no_save_leaves_nothing_on_disk() {
    let out = output_dir("no_save");
    let path = demo("wave_seed.json");
    let request = BatchRequest {
        declaration_path: &path,
        options: RunOptions {
            save: false,
            output_dir: Some(out.clone()),
            ..RunOptions::default()
        },
    };
    let mut engine = DryRunEngine::new();
    let mut stages = Vec::new();
    let response = run_batch_with_progress(&request, &mut engine, Some(&mut |e: BatchProgressEvent| stages.push(e.stage))).unwrap();

    assert!(response.batch_dir.is_none());
    assert_eq!(response.case_count, 4);
    assert!(!out.exists());
    assert_eq!(stages.last(), Some(&BatchStage::Completed));
}

#[test]
fn batch_id_ignores_save_section() {
    let out = output_dir("batch_id");
    let path = demo("wave_seed.json");
    let run = |save: bool| {
        let request = BatchRequest {
            declaration_path: &path,
            options: RunOptions {
                save,
                output_dir: Some(out.clone()),
                ..RunOptions::default()
            },
        };
        run_batch(&request, &mut DryRunEngine::new()).unwrap().batch_id
    };
    assert_eq!(run(false), run(true));
}

#[test]
fn rerunning_an_unseeded_batch_replaces_the_stored_cases() {
    let out = output_dir("unseeded_rerun");
    std::fs::create_dir_all(&out).unwrap();
    let demo = std::fs::read_to_string(demo("wave_seed.json")).unwrap();
    let unseeded = demo.replace("\"generator seed\": 20240611,", "");
    assert_ne!(unseeded, demo);
    let path = out.join("unseeded.json");
    std::fs::write(&path, unseeded).unwrap();

    let run = || {
        let request = BatchRequest {
            declaration_path: &path,
            options: RunOptions {
                output_dir: Some(out.clone()),
                ..RunOptions::default()
            },
        };
        run_batch(&request, &mut DryRunEngine::new()).unwrap()
    };
    let first = run();
    let second = run();
    assert_eq!(first.batch_id, second.batch_id);

    let (manifest, cases) = load_batch(&path, Some(&out), &second.batch_id).unwrap();
    assert_eq!(manifest.completed_cases.len(), 4);
    assert_eq!(cases.len(), 4);
    let ids: Vec<String> = cases.iter().map(|c| c.case_id.clone()).collect();
    assert_eq!(ids, manifest.completed_cases);
    let indices: Vec<usize> = cases.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn missing_declaration_is_reported_with_its_path() {
    let err = load_declaration(Path::new("../../demos/missing.yaml")).unwrap_err();
    assert!(matches!(err, AppError::DeclarationRead { .. }));
}

#[test]
fn unknown_batch_is_not_found() {
    let out = output_dir("unknown");
    let err = load_batch(&demo("thrust_curve.yaml"), Some(&out), "deadbeef").unwrap_err();
    assert!(matches!(err, AppError::BatchNotFound(_)));
}
