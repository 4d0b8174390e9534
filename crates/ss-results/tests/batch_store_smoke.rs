use ss_results::*;

#[test]
fn save_and_list_cases() {
    let temp_dir = std::env::temp_dir().join("ss_results_store_smoke");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = BatchStore::new(&temp_dir, "abc123").unwrap();

    for (index, speed) in [5.0, 10.0].into_iter().enumerate() {
        let case_id = format!("wind_speed_{:?}", speed);
        let mut manifest = CaseManifest::new(&case_id, index);
        manifest.independent_value = speed;
        manifest.directives = vec![format!("Environment.WindSpeed = {:?}", speed)];
        manifest.row = vec![speed * 2.0];

        let mut results = ResultStore::new();
        results
            .append_column(Phase::Dynamics, "Time", vec![0.0, 0.1])
            .unwrap();
        manifest.files = store
            .save_tables(&case_id, &results, &[ExportFormat::Csv, ExportFormat::Json])
            .unwrap();
        store.save_case_manifest(&manifest).unwrap();
    }

    assert!(store.has_case("wind_speed_5.0"));
    assert!(!store.has_case("wind_speed_15.0"));

    let cases = store.list_cases().unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].case_id, "wind_speed_5.0");
    assert_eq!(cases[1].row, vec![20.0]);
    assert_eq!(cases[0].files, vec!["dynamics.csv", "dynamics.json"]);
    assert!(store.case_dir("wind_speed_10.0").join("dynamics.csv").exists());

    let err = store.load_case_manifest("missing").unwrap_err();
    assert!(matches!(err, ResultsError::CaseNotFound { .. }));

    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[test]
fn aggregate_and_batch_manifest() {
    let temp_dir = std::env::temp_dir().join("ss_results_aggregate_smoke");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = BatchStore::new(&temp_dir, "def456").unwrap();
    assert!(matches!(
        store.load_manifest().unwrap_err(),
        ResultsError::BatchNotFound { .. }
    ));

    let aggregate = finalize_batch(
        "Wind speed",
        &[5.0, 10.0],
        &["Rotor aero Thrust".to_string()],
        &[vec![100.0], vec![400.0]],
    )
    .unwrap();
    let files = store.save_aggregate(&aggregate, &[ExportFormat::Csv]).unwrap();
    assert_eq!(files, vec!["aggregate.csv"]);

    let csv = std::fs::read_to_string(store.batch_dir().join("aggregate.csv")).unwrap();
    assert_eq!(csv, "Wind speed;Rotor aero Thrust\n5.0;100.0\n10.0;400.0\n");

    let manifest = BatchManifest {
        batch_id: "def456".to_string(),
        name: "Thrust".to_string(),
        kind: "thrust curve".to_string(),
        timestamp: "2026-02-25T12:00:00Z".to_string(),
        engine_version: "dry-run".to_string(),
        case_count: 2,
        completed_cases: vec!["wind_speed_5.0".to_string(), "wind_speed_10.0".to_string()],
        aggregate_files: files,
    };
    store.save_manifest(&manifest).unwrap();
    assert_eq!(store.load_manifest().unwrap(), manifest);

    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[test]
fn declaration_without_directory_uses_sibling_folder() {
    let temp_dir = std::env::temp_dir().join("ss_results_for_declaration");
    let _ = std::fs::remove_dir_all(&temp_dir);
    std::fs::create_dir_all(&temp_dir).unwrap();

    let store =
        BatchStore::for_declaration(&temp_dir.join("sweep.yaml"), None, "h1").unwrap();
    assert_eq!(
        store.batch_dir(),
        temp_dir.join(".seasweep").join("batches").join("h1")
    );

    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[test]
fn clear_drops_the_previous_run() {
    let temp_dir = std::env::temp_dir().join("ss_results_clear");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = BatchStore::new(&temp_dir, "feed01").unwrap();
    store.save_case_manifest(&CaseManifest::new("seed_7", 0)).unwrap();
    let aggregate = finalize_batch("Case", &[1.0], &[], &[vec![]]).unwrap();
    store.save_aggregate(&aggregate, &[ExportFormat::Csv, ExportFormat::Json]).unwrap();
    std::fs::write(store.batch_dir().join("notes.txt"), "kept").unwrap();

    store.clear().unwrap();

    assert!(store.list_cases().unwrap().is_empty());
    assert!(!store.batch_dir().join("aggregate.csv").exists());
    assert!(!store.batch_dir().join("aggregate.json").exists());
    assert!(matches!(
        store.load_manifest().unwrap_err(),
        ResultsError::BatchNotFound { .. }
    ));
    assert!(store.batch_dir().join("notes.txt").exists());

    let _ = std::fs::remove_dir_all(&temp_dir);
}
