use wikicount::{analyze, stub_demo, AnalysisRequest, IgnoreSet, PipelineConfig, StubFetcher};

fn library() -> StubFetcher {
    StubFetcher::new()
        .with_page(
            "Library",
            "A library is a collection of books. The library lends books.",
            ["Book", "Librarian"],
        )
        .with_page("Book", "A book is a medium for recording information.", ["Library"])
        .with_page("Librarian", "A librarian works in a library.", ["Book"])
}

#[tokio::test]
async fn analysis_over_small_graph() {
    let fetcher = library();
    let request = AnalysisRequest::new("Library")
        .with_depth(1)
        .with_ignore(IgnoreSet::from_words(["a", "is", "the", "of", "in", "for"]));

    let analysis = analyze(&fetcher, &request, &Default::default()).await;

    assert_eq!(analysis.pages_visited, 3);
    assert_eq!(analysis.pages_missing, 0);
    assert!(analysis.start_error.is_none());
    assert_eq!(analysis.table.words().next(), Some("library"));
    assert_eq!(analysis.table.get("library").unwrap().word_count, 3);
    assert_eq!(analysis.table.get("books").unwrap().word_count, 2);

    let percent_sum: f64 = analysis.table.iter().map(|(_, f)| f.frequency_percent).sum();
    assert!((percent_sum - 100.0).abs() < 0.01, "sum was {percent_sum}");
}

#[tokio::test]
async fn yaml_config_drives_walk_and_ranking() {
    let config = PipelineConfig::from_yaml(
        r#"
version: "1.0"
walker:
  max_concurrent_fetches: 2
  max_depth_limit: 1
ranking:
  ignore_words: ["A", "is"]
"#,
    )
    .expect("valid config");

    let request = AnalysisRequest::new("Library")
        .with_depth(1)
        .with_ignore(config.ranking.ignore_words.iter().collect())
        .with_percentile(99.0);
    request
        .validate(config.walker.max_depth_limit)
        .expect("depth within limit");

    let analysis = analyze(&library(), &request, &config.walk_config()).await;

    assert_eq!(analysis.table.len(), 1);
    assert_eq!(analysis.table.words().next(), Some("library"));
    assert!(AnalysisRequest::new("Library")
        .with_depth(2)
        .validate(config.walker.max_depth_limit)
        .is_err());
}

#[tokio::test]
async fn demo_table_serializes_as_ordered_pairs() {
    let analysis = stub_demo(0, 0.0).await;

    let json = serde_json::to_string(&analysis.table).expect("serialize");
    assert!(json.starts_with("{\"rust\":[2,"), "{json}");
}
