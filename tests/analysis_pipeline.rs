use repo_analyzer::{Analyzer, AnalyzerError, Config, DiffRequest};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

mod common;
use common::{init_empty_repo, init_repo_with_files, FixedGateway};

fn analyzer(gateway: FixedGateway) -> Analyzer {
    Analyzer::new(Arc::new(gateway), Arc::new(Config::default()))
}

const VALID_SUMMARY: &str = r#"Here is your summary:
{
  "pitch": "A tiny demo project.",
  "problem_solved": "Shows how analysis works.",
  "tech_stack": ["Python"],
  "current_status": "Early prototype",
  "contribution_friendliness": "8 - small and approachable",
  "suggested_roadmap": ["Add a CLI", "Add CI", "Write docs"]
}"#;

#[tokio::test]
async fn empty_cloneable_repo_yields_all_false_health() {
    let origin = TempDir::new().unwrap();
    init_empty_repo(origin.path());

    let analyzer = analyzer(FixedGateway::returning(VALID_SUMMARY));
    let analysis = analyzer
        .analyze_repository(origin.path().to_str().unwrap())
        .await
        .unwrap();

    assert!(!analysis.health_report.readme_is_present);
    assert!(!analysis.health_report.build_successful);
    assert!(!analysis.health_report.tests_found_and_passed);
    assert_eq!(analysis.health, analysis.health_report);
    assert_eq!(analysis.summary["pitch"], "A tiny demo project.");
}

#[tokio::test]
async fn repo_with_readme_is_reported_present() {
    let origin = TempDir::new().unwrap();
    init_repo_with_files(
        origin.path(),
        &[
            ("README.md", "# Demo\nA demo project.\n"),
            ("main.py", "print('hello')\n"),
        ],
    );

    let analyzer = analyzer(FixedGateway::returning(VALID_SUMMARY));
    let analysis = analyzer
        .analyze_repository(origin.path().to_str().unwrap())
        .await
        .unwrap();

    assert!(analysis.health_report.readme_is_present);
    // No test files committed, so the test signal must stay false no matter
    // what the test command would have said.
    assert!(!analysis.health_report.tests_found_and_passed);
}

#[tokio::test]
async fn unparseable_model_text_yields_documented_error_shape() {
    let origin = TempDir::new().unwrap();
    init_empty_repo(origin.path());

    let analyzer = analyzer(FixedGateway::returning(
        "I am sorry, I cannot produce JSON today.",
    ));
    let analysis = analyzer
        .analyze_repository(origin.path().to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(
        analysis.summary,
        json!({
            "error": "Failed to parse AI summary.",
            "raw_response": "I am sorry, I cannot produce JSON today.",
        })
    );
}

#[tokio::test]
async fn clone_failure_is_a_client_error() {
    let analyzer = analyzer(FixedGateway::returning(VALID_SUMMARY));
    let result = analyzer
        .analyze_repository("/definitely/not/a/repository")
        .await;

    match result {
        Err(e) => assert!(e.is_client_error()),
        Ok(_) => panic!("expected clone failure"),
    }
}

#[tokio::test]
async fn gateway_failure_surfaces_as_server_error() {
    let origin = TempDir::new().unwrap();
    init_empty_repo(origin.path());

    let analyzer = analyzer(FixedGateway::failing("backend unreachable"));
    let result = analyzer
        .analyze_repository(origin.path().to_str().unwrap())
        .await;

    match result {
        Err(e @ AnalyzerError::Llm(_)) => assert!(!e.is_client_error()),
        other => panic!("expected LLM error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn diff_endpoint_always_returns_required_keys() {
    let analyzer = analyzer(FixedGateway::returning("not json"));
    let request = DiffRequest {
        diff: "+ added".to_string(),
        previous_summary: String::new(),
        project_title: "Project".to_string(),
    };

    let value = analyzer.analyze_diff(&request).await.unwrap();
    for key in ["contribution_summary", "updated_project_summary", "next_steps"] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(value["raw_ai_response"], "not json");
}
