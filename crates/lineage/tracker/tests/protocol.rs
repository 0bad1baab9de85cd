//! End-to-end scenarios for the bidirectional registration protocol.

use lineage_tracker::{
    listing, ArtifactId, LineageError, LineageGraph, SaveMode, SharedEventCounter, TrackerConfig,
    TypeTag,
};

const RAW_DATA_CUBE: TypeTag = TypeTag::from_static("RawDataCube");
const DATA_CUBE: TypeTag = TypeTag::from_static("DataCube");
const DIFFRACTION_SLICE: TypeTag = TypeTag::from_static("DiffractionSlice");
const REAL_SLICE: TypeTag = TypeTag::from_static("RealSlice");
const POINT_LIST: TypeTag = TypeTag::from_static("PointList");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn graph_at(index: i64) -> (LineageGraph, SharedEventCounter) {
    init_tracing();
    let counter = SharedEventCounter::starting_at(index);
    (LineageGraph::new(counter.clone()), counter)
}

// =========================================================================
// Construction
// =========================================================================

#[test]
fn constructed_artifact_is_registered_with_its_origin() {
    let (mut g, _) = graph_at(0);
    let o1 = g.create_origin("scan", RAW_DATA_CUBE).unwrap();
    assert!(g.registry(o1).unwrap().is_empty());

    let a = g.create(Some(o1), Some(true), "binned", DATA_CUBE).unwrap();

    let entries = g.registry(o1).unwrap().list_all();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        (entries[0].index, entries[0].name.as_str(), &entries[0].kind, entries[0].artifact),
        (0, "binned", &DATA_CUBE, a)
    );
    assert!(g.contains(o1, a).unwrap());
    assert!(g.has_origin(a, o1).unwrap());
    assert!(g.save_behavior(a, o1).unwrap());
}

#[test]
fn modification_log_trails_the_counter_by_one() {
    let (mut g, counter) = graph_at(5);
    let a = g.create(None, None, "scan", RAW_DATA_CUBE).unwrap();
    assert_eq!(g.artifact(a).unwrap().modification_log(), &[4]);

    counter.advance_by(4);
    assert_eq!(g.record_modification(a).unwrap(), 8);
    assert_eq!(g.artifact(a).unwrap().modification_log(), &[4, 8]);
}

#[test]
fn origin_datasets_may_stay_without_origins() {
    let (mut g, counter) = graph_at(0);
    let raw = g.create_origin("scan", RAW_DATA_CUBE).unwrap();
    for _ in 0..3 {
        counter.advance();
        g.record_modification(raw).unwrap();
    }
    g.create(Some(raw), None, "dp", DIFFRACTION_SLICE).unwrap();

    assert!(g.origins(raw).unwrap().is_empty());
    assert!(g.verify().is_ok());
}

// =========================================================================
// Cross-registration
// =========================================================================

#[test]
fn second_registry_links_without_disturbing_the_first() {
    let (mut g, _) = graph_at(0);
    let o1 = g.create_origin("first", RAW_DATA_CUBE).unwrap();
    let o2 = g.create_origin("second", RAW_DATA_CUBE).unwrap();
    let a = g.create(Some(o1), Some(true), "virtual bf", REAL_SLICE).unwrap();

    g.register(o2, a, Some(false), None).unwrap();

    assert!(g.has_origin(a, o1).unwrap());
    assert!(g.has_origin(a, o2).unwrap());
    assert!(g.save_behavior(a, o1).unwrap());
    assert!(!g.save_behavior(a, o2).unwrap());
    assert!(g.contains(o1, a).unwrap());
    assert!(g.contains(o2, a).unwrap());
}

#[test]
fn either_entry_point_converges_to_the_same_state() {
    let (mut from_artifact, _) = graph_at(0);
    let (mut from_registry, _) = graph_at(0);

    for g in [&mut from_artifact, &mut from_registry] {
        let o1 = g.create_origin("first", RAW_DATA_CUBE).unwrap();
        let o2 = g.create_origin("second", RAW_DATA_CUBE).unwrap();
        g.create(Some(o1), Some(true), "peaks", POINT_LIST).unwrap();
        assert_eq!((o1, o2), (ArtifactId(0), ArtifactId(1)));
    }
    let (o2, a) = (ArtifactId(1), ArtifactId(2));

    from_artifact.add_origin(a, Some(o2), Some(false)).unwrap();
    from_registry.register(o2, a, Some(false), None).unwrap();

    for g in [&from_artifact, &from_registry] {
        assert_eq!(g.origins(a).unwrap(), vec![ArtifactId(0), o2]);
        assert_eq!(g.registry(o2).unwrap().list_all().len(), 1);
        assert!(!g.save_behavior(a, o2).unwrap());
        assert!(g.verify().is_ok());
    }
    assert_eq!(
        from_artifact.registry(o2).unwrap().list_all(),
        from_registry.registry(o2).unwrap().list_all()
    );
}

#[test]
fn last_write_wins_on_repeated_add_origin() {
    let (mut g, _) = graph_at(0);
    let o = g.create_origin("scan", RAW_DATA_CUBE).unwrap();
    let a = g.create(Some(o), None, "peaks", POINT_LIST).unwrap();

    g.add_origin(a, Some(o), Some(true)).unwrap();
    g.add_origin(a, Some(o), Some(false)).unwrap();

    assert_eq!(g.origins(a).unwrap(), vec![o]);
    assert!(!g.save_behavior(a, o).unwrap());
    assert_eq!(g.registry(o).unwrap().len(), 1);
}

#[test]
fn save_policy_differs_between_origins() {
    let (mut g, _) = graph_at(0);
    let o1 = g.create_origin("first", RAW_DATA_CUBE).unwrap();
    let o2 = g.create_origin("second", RAW_DATA_CUBE).unwrap();
    let a = g.create(Some(o1), Some(false), "virtual df", REAL_SLICE).unwrap();
    g.add_origin(a, Some(o2), Some(true)).unwrap();

    assert_eq!(g.save_plan(o1).unwrap().entries[0].mode, SaveMode::IdentityOnly);
    assert_eq!(g.save_plan(o2).unwrap().entries[0].mode, SaveMode::Full);

    g.set_save_behavior(a, o1, true).unwrap();
    assert_eq!(g.save_plan(o1).unwrap().entries[0].mode, SaveMode::Full);
    assert!(g.save_behavior(a, o2).unwrap());
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn unknown_origin_query_leaves_artifact_untouched() {
    let (mut g, _) = graph_at(0);
    let o1 = g.create_origin("first", RAW_DATA_CUBE).unwrap();
    let o3 = g.create_origin("third", RAW_DATA_CUBE).unwrap();
    let a = g.create(Some(o1), Some(true), "binned", DATA_CUBE).unwrap();
    let before = g.artifact(a).unwrap().clone();

    assert_eq!(
        g.save_behavior(a, o3),
        Err(LineageError::UnknownOrigin {
            artifact: a,
            origin: o3
        })
    );

    let after = g.artifact(a).unwrap();
    assert_eq!(after.origin_links(), before.origin_links());
    assert_eq!(after.modification_log(), before.modification_log());
}

#[test]
fn positional_lookup_past_the_end() {
    let (mut g, _) = graph_at(0);
    let o = g.create_origin("scan", RAW_DATA_CUBE).unwrap();
    let a = g.create(Some(o), None, "binned", DATA_CUBE).unwrap();
    let registry = g.registry(o).unwrap();

    assert_eq!(registry.get_by_index(0).unwrap(), a);
    assert_eq!(
        registry.get_by_index(1),
        Err(LineageError::IndexOutOfRange { index: 1, len: 1 })
    );
}

// =========================================================================
// Queries and listing
// =========================================================================

#[test]
fn registry_queries_over_a_processing_session() {
    let (mut g, counter) = graph_at(0);
    let raw = g.create_origin("scan", RAW_DATA_CUBE).unwrap();
    let make = |g: &mut LineageGraph, name: &str, kind: TypeTag| {
        counter.advance();
        g.create(Some(raw), None, name, kind).unwrap()
    };
    let cube = make(&mut g, "binned", DATA_CUBE);
    let dp = make(&mut g, "", DIFFRACTION_SLICE);
    let bf = make(&mut g, "virtual bf", REAL_SLICE);
    let df = make(&mut g, "virtual df", REAL_SLICE);
    let mask = make(&mut g, "", REAL_SLICE);

    let registry = g.registry(raw).unwrap();
    let ids = |entries: Vec<&lineage_tracker::RegistryEntry>| -> Vec<ArtifactId> {
        entries.into_iter().map(|e| e.artifact).collect()
    };

    assert_eq!(ids(registry.sort_by_name()), vec![cube, bf, df, dp, mask]);
    assert_eq!(ids(registry.sort_by_type(None)), vec![cube, dp, bf, df, mask]);
    assert_eq!(ids(registry.sort_by_type(Some(&REAL_SLICE))), vec![bf, df, mask]);
    assert_eq!(registry.find_by_name("virtual", false), vec![bf, df]);
    assert_eq!(registry.find_by_name("virtual bf", true), vec![bf]);
    assert_eq!(registry.get_by_index(2).unwrap(), bf);

    let table = listing::render(registry.sort_by_type(None), &g.config().listing);
    assert!(table.contains("DiffractionSlice"));
    assert!(table.find("binned").unwrap() < table.find("virtual bf").unwrap());
}

#[test]
fn config_loaded_from_toml_drives_defaults() {
    init_tracing();
    let config = TrackerConfig::from_toml("default_save_behavior = false").unwrap();
    let mut g = LineageGraph::with_config(SharedEventCounter::new(), config);
    let raw = g.create_origin("scan", RAW_DATA_CUBE).unwrap();
    let a = g.create(Some(raw), None, "peaks", POINT_LIST).unwrap();

    assert!(!g.save_behavior(a, raw).unwrap());
    assert_eq!(g.save_plan(raw).unwrap().identity_only().count(), 1);
}
