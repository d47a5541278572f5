//! Integration tests for tablefuse.

use std::io::Write;
use tempfile::NamedTempFile;

use tablefuse::{
    fuse_join, fuse_stitch, BlendGroup, ColumnCorrespondence, DataTable, ExactNameMatcher,
    FuseConfig, FuseError, FusionPlan, FusionRequest, MatchOutcome, MatchStrategy, RunOutcome,
    TableFuse,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
    DataTable::new(
        headers.into_iter().map(String::from).collect(),
        rows.into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect(),
        b',',
    )
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_csv() {
    let file = create_test_file("id,name\n1,x\n2,y\n");

    let fuse = TableFuse::new();
    let (table, source) = fuse.load(file.path()).expect("Load failed");

    assert_eq!(source.row_count, 2);
    assert_eq!(source.column_count, 2);
    assert_eq!(source.format, "csv");
    assert_eq!(source.encoding, "utf-8");
    assert!(source.hash.starts_with("sha256:"));
    assert_eq!(table.headers, vec!["id", "name"]);
}

#[test]
fn test_load_tsv_auto_detect() {
    let file = create_test_file("id\tname\n1\tx\n2\ty\n");

    let fuse = TableFuse::new();
    let (_, source) = fuse.load(file.path()).expect("Load failed");

    assert_eq!(source.format, "tsv");
}

#[test]
fn test_load_empty_file_is_empty_input() {
    let file = create_test_file("");

    let err = TableFuse::new().load(file.path()).unwrap_err();
    assert!(matches!(err, FuseError::EmptyInput(_)));
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn test_exact_matching_is_set_intersection() {
    let a = make_table(vec!["id", "name", "ts"], vec![vec!["1", "x", "t0"]]);
    let b = make_table(vec!["ts", "city", "id"], vec![vec!["t0", "p", "1"]]);

    let forward = ExactNameMatcher::candidates(&a, &b).unwrap();
    let backward = ExactNameMatcher::candidates(&b, &a).unwrap();

    let mut forward_sorted = forward.clone();
    let mut backward_sorted = backward.clone();
    forward_sorted.sort();
    backward_sorted.sort();

    assert_eq!(forward_sorted, vec!["id", "ts"]);
    assert_eq!(forward_sorted, backward_sorted);
}

// =============================================================================
// Join fusion
// =============================================================================

#[test]
fn test_join_end_to_end_example() {
    // A = {id:[1,2], name:[x,y]}, B = {id:[2,3], city:[p,q]}, key = id.
    let a = make_table(vec!["id", "name"], vec![vec!["1", "x"], vec!["2", "y"]]);
    let b = make_table(vec!["id", "city"], vec![vec!["2", "p"], vec!["3", "q"]]);

    let fused = fuse_join(&a, &b, &["id".to_string()]).unwrap();

    assert_eq!(fused.row_count(), 3);
    let ids: Vec<&str> = fused.column_by_name("id").unwrap();
    assert_eq!(ids, vec!["1", "2", "3"]);

    // id=1 has no city; id=3 has no name; id=2 has both.
    assert_eq!(fused.rows[0], vec!["1", "x", ""]);
    assert_eq!(fused.rows[1], vec!["2", "y", "p"]);
    assert_eq!(fused.rows[2], vec!["3", "", "q"]);
}

#[test]
fn test_join_is_commutative_up_to_column_order() {
    let a = make_table(
        vec!["id", "name"],
        vec![vec!["1", "x"], vec!["2", "y"], vec!["4", "z"]],
    );
    let b = make_table(vec!["id", "city"], vec![vec!["2", "p"], vec!["3", "q"]]);

    let ab = fuse_join(&a, &b, &["id".to_string()]).unwrap();
    let ba = fuse_join(&b, &a, &["id".to_string()]).unwrap();

    // Project both results to (id, name, city) and compare as row sets.
    let project = |t: &DataTable| -> Vec<(String, String, String)> {
        let id = t.column_index("id").unwrap();
        let name = t.column_index("name").unwrap();
        let city = t.column_index("city").unwrap();
        let mut rows: Vec<_> = t
            .rows
            .iter()
            .map(|r| (r[id].clone(), r[name].clone(), r[city].clone()))
            .collect();
        rows.sort();
        rows
    };

    assert_eq!(project(&ab), project(&ba));
}

#[test]
fn test_join_never_loses_rows() {
    let a = make_table(
        vec!["k", "va"],
        vec![vec!["1", "a"], vec!["2", "b"], vec!["2", "c"]],
    );
    let b = make_table(vec!["k", "vb"], vec![vec!["2", "d"], vec!["9", "e"]]);

    let fused = fuse_join(&a, &b, &["k".to_string()]).unwrap();

    assert!(fused.row_count() >= a.row_count().max(b.row_count()));
    let keys: Vec<&str> = fused.column_by_name("k").unwrap();
    for key in ["1", "2", "9"] {
        assert!(keys.contains(&key), "key {key} missing from join output");
    }
}

// =============================================================================
// Row-stitch fusion
// =============================================================================

#[test]
fn test_stitch_end_to_end_example() {
    // A = {v:[10,20]}, B = {v:[30,40]}, correspondence (v,v).
    let a = make_table(vec!["v"], vec![vec!["10"], vec!["20"]]);
    let b = make_table(vec!["v"], vec![vec!["30"], vec!["40"]]);

    let fused = fuse_stitch(&a, &b, &[ColumnCorrespondence::new("v", "v")]).unwrap();

    assert_eq!(fused.headers, vec!["v"]);
    assert_eq!(
        fused.column_by_name("v").unwrap(),
        vec!["10", "20", "30", "40"]
    );
}

#[test]
fn test_stitch_row_count_is_sum_even_without_pairs() {
    let a = make_table(vec!["x", "y"], vec![vec!["1", "2"], vec!["3", "4"]]);
    let b = make_table(vec!["p"], vec![vec!["5"], vec!["6"], vec!["7"]]);

    let fused = fuse_stitch(&a, &b, &[]).unwrap();
    assert_eq!(fused.row_count(), 5);
}

// =============================================================================
// Full pipeline
// =============================================================================

#[test]
fn test_pipeline_join_drop_blend_export() {
    let file_a = create_test_file("id,name,x\n1,alice,10\n2,bob,30\n");
    let file_b = create_test_file("id,y\n1,20\n2,50\n");

    let fuse = TableFuse::new();
    let result = fuse
        .run(&FusionRequest {
            file_a: file_a.path().to_path_buf(),
            file_b: file_b.path().to_path_buf(),
            plan: FusionPlan::Join {
                keys: vec!["id".to_string()],
            },
            drop: vec!["name".to_string()],
            blends: vec![BlendGroup::new("x", "y", 0.5)],
        })
        .unwrap();

    assert_eq!(result.report.outcome, RunOutcome::Fused);
    let table = result.table.unwrap();
    assert_eq!(table.headers, vec!["id", "x", "y", "optimized_x_y"]);
    assert_eq!(table.rows[0], vec!["1", "10", "20", "15"]);

    let csv = String::from_utf8(result.export.unwrap()).unwrap();
    assert_eq!(
        csv,
        ",id,x,y,optimized_x_y\n0,1,10,20,15\n1,2,30,50,40\n"
    );
}

#[test]
fn test_pipeline_invalid_selection_produces_nothing() {
    let file_a = create_test_file("id,name\n1,x\n");
    let file_b = create_test_file("id,city\n1,p\n");

    let result = TableFuse::new()
        .run(&FusionRequest {
            file_a: file_a.path().to_path_buf(),
            file_b: file_b.path().to_path_buf(),
            plan: FusionPlan::Join {
                keys: vec!["city".to_string()],
            },
            drop: Vec::new(),
            blends: Vec::new(),
        })
        .unwrap();

    assert_eq!(result.report.outcome, RunOutcome::SkippedInvalidSelection);
    assert!(result.table.is_none());
    assert!(result.export.is_none());
}

#[test]
fn test_pipeline_all_dropped_skips_blend_and_export() {
    let file_a = create_test_file("id,x\n1,10\n");
    let file_b = create_test_file("id,y\n1,20\n");

    let result = TableFuse::new()
        .run(&FusionRequest {
            file_a: file_a.path().to_path_buf(),
            file_b: file_b.path().to_path_buf(),
            plan: FusionPlan::Join {
                keys: vec!["id".to_string()],
            },
            drop: vec!["id".to_string(), "x".to_string(), "y".to_string()],
            blends: vec![BlendGroup::new("x", "y", 0.5)],
        })
        .unwrap();

    assert_eq!(result.report.outcome, RunOutcome::AllColumnsDropped);
    assert!(result.export.is_none());
    assert!(result.report.notices.is_empty());
}

#[test]
fn test_pipeline_stitch_mode() {
    let file_a = create_test_file("temp,site\n20,s1\n21,s2\n");
    let file_b = create_test_file("temperature,station\n19,x1\n");

    let result = TableFuse::new()
        .run(&FusionRequest {
            file_a: file_a.path().to_path_buf(),
            file_b: file_b.path().to_path_buf(),
            plan: FusionPlan::Stitch {
                pairs: vec![ColumnCorrespondence::new("temp", "temperature")],
            },
            drop: Vec::new(),
            blends: Vec::new(),
        })
        .unwrap();

    let table = result.table.unwrap();
    assert_eq!(table.headers, vec!["temp", "site", "station"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(
        table.column_by_name("temp").unwrap(),
        vec!["20", "21", "19"]
    );
}

#[test]
fn test_report_serializes_to_json() {
    let file_a = create_test_file("id\n1\n");
    let file_b = create_test_file("id\n2\n");

    let result = TableFuse::new()
        .run(&FusionRequest {
            file_a: file_a.path().to_path_buf(),
            file_b: file_b.path().to_path_buf(),
            plan: FusionPlan::Join {
                keys: vec!["id".to_string()],
            },
            drop: Vec::new(),
            blends: Vec::new(),
        })
        .unwrap();

    let json = result.report.to_json().unwrap();
    assert!(json.contains("\"outcome\": \"fused\""));
    assert!(json.contains("\"rows\": 2"));
}

// =============================================================================
// Scored matching through the facade
// =============================================================================

#[test]
fn test_scored_matching_proposes_renamed_columns() {
    let fuse = TableFuse::with_config(FuseConfig {
        strategy: MatchStrategy::Scored { threshold: 0.7 },
        ..FuseConfig::default()
    });

    let a = make_table(
        vec!["temp_c", "site"],
        vec![vec!["20.5", "s1"], vec!["21.0", "s2"]],
    );
    let b = make_table(
        vec!["temp_celsius", "label"],
        vec![vec!["19.5", "x1"], vec!["22.0", "x2"]],
    );

    match fuse.match_columns(&a, &b).unwrap() {
        MatchOutcome::Scored { pairs } => {
            assert!(!pairs.is_empty());
            assert_eq!(pairs[0].column_a, "temp_c");
            assert_eq!(pairs[0].column_b, "temp_celsius");
        }
        MatchOutcome::ExactName { .. } => panic!("expected scored outcome"),
    }
}

// =============================================================================
// GBK-encoded input
// =============================================================================

#[test]
fn test_gbk_encoded_file() {
    // "温度,站点" header + one data row, encoded as GBK.
    let header = "温度,站点\n20,s1\n";
    let (bytes, _, _) = encoding_rs::GBK.encode(header);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();

    let fuse = TableFuse::with_config(FuseConfig {
        parser: tablefuse::ParserConfig::with_encoding_label("gbk").unwrap(),
        ..FuseConfig::default()
    });
    let (table, source) = fuse.load(file.path()).unwrap();

    assert_eq!(source.encoding, "gbk");
    assert_eq!(table.headers, vec!["温度", "站点"]);
}
