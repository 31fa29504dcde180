//! End-to-end extraction tests

use std::sync::Arc;

use sentrank::graph::similarity::build_similarity_graph;
use sentrank::nlp::{FilterPolicy, NlpPipeline};
use sentrank::{
    converge, rank, FilterMode, InitialScores, PipelineObserver, SimilarityGraph,
    StageTimingObserver, StopwordFilter, TextRank, TextRankConfig, TextRankError, TextUnit,
    Tokenizer,
};

const TELEPORT: f64 = 1.0 - 0.85;

fn config() -> TextRankConfig {
    TextRankConfig::default().with_initial_scores(InitialScores::constant(1.0))
}

fn units(text: &str) -> Vec<TextUnit> {
    let tokenizer = Tokenizer::new();
    tokenizer
        .split_sentences(text)
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let features = tokenizer.tokenize(&s);
            TextUnit::new(i, s, features)
        })
        .collect()
}

fn english() -> FilterPolicy {
    FilterPolicy::stopwords(Arc::new(StopwordFilter::new("en")))
}

/// Counts edges of every graph it is shown
#[derive(Default)]
struct GraphProbe {
    edges: Vec<usize>,
}

impl PipelineObserver for GraphProbe {
    fn on_graph(&mut self, graph: &SimilarityGraph) {
        self.edges.push(graph.num_edges());
    }
}

#[test]
fn identical_pair_outranks_unrelated_sentence() {
    let text = "The cat sat on the mat. Quantum physics explains particles. \
                The cat sat on the mat.";
    let engine = TextRank::new(config()).unwrap();

    let mut probe = GraphProbe::default();
    let extraction = engine
        .extract_sentences_with_observer(text, &mut probe)
        .unwrap();

    assert_eq!(probe.edges, vec![1]);
    assert!(extraction.converged);

    let order: Vec<_> = extraction.units.iter().map(|u| u.index).collect();
    assert_eq!(order, vec![0, 2, 1]);
    assert!((extraction.units[0].score - 1.0).abs() < 1e-9);
    assert!((extraction.units[1].score - 1.0).abs() < 1e-9);
    assert_eq!(extraction.units[2].score, TELEPORT);
}

#[test]
fn single_sentence_scores_teleport() {
    let mut graph = build_similarity_graph(units("Cats sleep all day."), &english());
    assert_eq!(graph.num_nodes(), 1);
    assert_eq!(graph.num_edges(), 0);

    let report = converge(&mut graph, &TextRankConfig::default()).unwrap();
    assert!(report.converged);

    let ranked = rank(&graph, 10);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].text, "Cats sleep all day.");
    assert_eq!(ranked[0].score, TELEPORT);
}

#[test]
fn empty_input_ranks_nothing() {
    let mut graph = build_similarity_graph(Vec::new(), &english());
    let report = converge(&mut graph, &config()).unwrap();

    assert_eq!(report.iterations, 0);
    assert!(rank(&graph, 5).is_empty());

    let engine = TextRank::new(config()).unwrap();
    assert!(engine.extract_sentences("").unwrap().is_empty());
    assert!(engine.extract_keywords("").unwrap().is_empty());
}

#[test]
fn disconnected_text_keeps_input_order() {
    // Untagged tokens never pass the tagged filter, so no edges form
    let engine =
        TextRank::new(config().with_sentence_filter(FilterMode::Tagged)).unwrap();
    let extraction = engine
        .extract_sentences("Dogs bark. Dogs bark. Dogs bark.")
        .unwrap();

    let order: Vec<_> = extraction.units.iter().map(|u| u.index).collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert!(extraction.units.iter().all(|u| u.score == TELEPORT));
}

#[test]
fn constant_seed_is_deterministic() {
    let text = "Rust is a systems language. Rust programs are fast. \
                Memory safety comes from ownership. Ownership makes programs safe.";
    let engine = TextRank::new(config()).unwrap();

    let first = engine.extract_sentences(text).unwrap();
    let second = engine.extract_sentences(text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn seeded_uniform_is_reproducible() {
    let text = "Rust is a systems language. Rust programs are fast. \
                Memory safety comes from ownership. Ownership makes programs safe.";
    let engine = TextRank::new(
        TextRankConfig::default().with_initial_scores(InitialScores::seeded(10.0, 7)),
    )
    .unwrap();

    assert_eq!(
        engine.extract_sentences(text).unwrap(),
        engine.extract_sentences(text).unwrap()
    );
}

#[test]
fn parallel_build_matches_sequential() {
    let text = "Graphs have nodes. Nodes have edges. Edges have weights. \
                Weights rank nodes. Ranking sorts nodes.";
    let sequential = TextRank::new(config().with_parallel_threshold(usize::MAX)).unwrap();
    let parallel = TextRank::new(config().with_parallel_threshold(1)).unwrap();

    assert_eq!(
        sequential.extract_sentences(text).unwrap(),
        parallel.extract_sentences(text).unwrap()
    );
}

#[test]
fn extra_stopwords_cut_edges() {
    let text = "Trump said hello. Trump said goodbye.";

    let plain = TextRank::new(config()).unwrap();
    let mut probe = GraphProbe::default();
    plain
        .extract_sentences_with_observer(text, &mut probe)
        .unwrap();
    assert_eq!(probe.edges, vec![1]);

    let filtered = TextRank::new(config().with_stopwords(["trump", "said"])).unwrap();
    let mut probe = GraphProbe::default();
    filtered
        .extract_sentences_with_observer(text, &mut probe)
        .unwrap();
    assert_eq!(probe.edges, vec![0]);
}

#[test]
fn keywords_rank_hub_first() {
    let text = "Machine learning is a field of artificial intelligence. \
                Machine learning models learn from data.";
    let engine = TextRank::new(config()).unwrap();
    let extraction = engine.extract_keywords(text).unwrap();

    let texts = extraction.texts();
    assert_eq!(texts[0], "learning");
    assert!(!texts.contains(&"is"));
    assert!(!texts.contains(&"."));
    // One node per lowercase form
    assert_eq!(texts.iter().filter(|t| t.eq_ignore_ascii_case("machine")).count(), 1);
}

#[test]
fn symbols_are_never_keywords() {
    let engine = TextRank::new(config()).unwrap();
    let extraction = engine
        .extract_keywords("Stocks rose 5 % today. Bonds fell 3 % today. Gold rose 2 % # $ too.")
        .unwrap();

    let texts = extraction.texts();
    assert!(!texts.is_empty());
    for symbol in ["%", "#", "$"] {
        assert!(!texts.contains(&symbol));
    }
}

#[test]
fn shared_symbol_does_not_link_sentences() {
    let engine = TextRank::new(config()).unwrap();
    let extraction = engine.extract_sentences("Prices rose %. Cats sleep %.").unwrap();

    assert!(extraction.units.iter().all(|u| u.score == TELEPORT));
}

#[test]
fn summary_restores_document_order() {
    let text = "Solar panels convert sunlight. Wind is also renewable. \
                Solar panels need sunlight. Panels on roofs capture sunlight.";
    let engine = TextRank::new(config()).unwrap();
    let summary = engine.summarize(text, 2).unwrap();

    assert_eq!(summary.len(), 2);
    assert!(summary.sentences.windows(2).all(|w| w[0].index < w[1].index));
    assert!(!summary.text().contains("Wind"));
}

#[test]
fn stage_timings_cover_pipeline() {
    let mut obs = StageTimingObserver::new();
    TextRank::new(config())
        .unwrap()
        .extract_keywords_with_observer("Fast graphs rank words.", &mut obs)
        .unwrap();

    let names: Vec<_> = obs.stages().iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["segment", "graph", "converge", "rank"]);
    assert!(obs.get("graph").and_then(|r| r.nodes).is_some_and(|n| n > 0));
}

#[test]
fn config_from_json_drives_engine() {
    let config = TextRankConfig::from_json(
        r#"{"top_n": 1, "initial_scores": {"kind": "constant", "value": 1.0}}"#,
    )
    .unwrap();
    let engine = TextRank::new(config).unwrap();

    let extraction = engine
        .extract_sentences("Dogs bark loudly. Dogs bark often. Cats sleep.")
        .unwrap();
    assert_eq!(extraction.units.len(), 1);
    assert_eq!(extraction.units[0].index, 0);
}

#[test]
fn extraction_serializes() {
    let extraction = TextRank::new(config())
        .unwrap()
        .extract_sentences("Dogs bark. Dogs run.")
        .unwrap();
    let value = serde_json::to_value(&extraction).unwrap();

    assert_eq!(value["converged"], serde_json::json!(true));
    assert_eq!(value["units"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["units"][0]["text"], serde_json::json!("Dogs bark."));
}

#[test]
fn invalid_config_is_reported() {
    let err = TextRank::new(config().with_window_size(0)).unwrap_err();
    assert!(matches!(err, TextRankError::InvalidConfig(_)));
}
