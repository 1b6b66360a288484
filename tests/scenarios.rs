use std::fs;

use college_fit::aid::{estimate_aid, AidConfig};
use college_fit::colleges::{compare, default_colleges, CompareRequest};
use college_fit::config::{load_config, validate_config};
use college_fit::interview::{self, InterviewConfig, PracticeSession};
use college_fit::prompt::Prompter;
use college_fit::quiz::{self, QuizConfig, QuizRecord};
use college_fit::scoring::{
    Candidate, CriterionConfig, Direction, FilterConfig, FilterKind, Profile, ScoringConfig, ScoringEngine,
    ScoringError, ScoringMode,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn bounded_score_for_exact_sat_match() {
    let engine = ScoringEngine::new(&ScoringConfig::default()).unwrap();
    let college = Candidate::new("Tech Institute")
        .with("tuition", 45000.0)
        .with("sat_avg", 1450.0)
        .with("acceptance_rate", 0.25)
        .with("location", "MA");
    let profile = Profile::new()
        .with("sat", 1450.0)
        .with("budget", 50000.0)
        .with("location", "any");

    let result = engine.score(0, &college, &profile);

    // 40 + 30 + 0.25 * 30
    assert!(close(result.score, 77.5));
    assert!(!result.incomplete);
    assert_eq!(result.breakdown.len(), 3);
}

#[test]
fn compare_ranks_default_colleges() {
    let colleges = default_colleges();
    let engine = ScoringEngine::new(&ScoringConfig::default()).unwrap();
    let request = CompareRequest {
        sat: 1300.0,
        budget: 40000.0,
        location: Some("any".to_string()),
    };

    let matches = compare(&colleges, &engine, &request, 3);
    let names: Vec<&str> = matches.iter().map(|m| m.college.name.as_str()).collect();

    assert_eq!(matches.len(), 3);
    assert_eq!(names[0], "State University");
    assert!(close(matches[0].result.score, 250.0 / 300.0 * 40.0 + 30.0 + 19.5));
    assert!(matches
        .windows(2)
        .all(|w| w[0].result.score >= w[1].result.score));
}

#[test]
fn compare_with_location_filter() {
    let colleges = default_colleges();
    let engine = ScoringEngine::new(&ScoringConfig::default()).unwrap();
    let request = CompareRequest {
        sat: 1400.0,
        budget: 60000.0,
        location: Some("NY".to_string()),
    };

    let matches = compare(&colleges, &engine, &request, 5);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].college.name, "Liberal Arts College");

    let request = CompareRequest {
        location: Some("WA".to_string()),
        ..request
    };
    assert!(compare(&colleges, &engine, &request, 5).is_empty());
}

#[test]
fn bounded_engine_rejects_maxima_not_summing_to_ceiling() {
    let config = ScoringConfig {
        mode: ScoringMode::Bounded,
        ceiling: Some(100.0),
        criteria: vec![
            CriterionConfig::distance("sat", "sat_avg", 50.0, 300.0),
            CriterionConfig::threshold("budget", "tuition", 30.0, Direction::AtMost),
        ],
        filters: Some(vec![FilterConfig::new(FilterKind::Equals, "location")]),
        top_k: None,
    };

    match ScoringEngine::new(&config) {
        Err(ScoringError::InvalidConfig(problems)) => {
            assert_eq!(problems.len(), 1);
            assert!(problems[0].contains("100"));
        }
        other => panic!("expected invalid config, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn quiz_scenario_breaks_ties_by_first_touched() {
    let config = QuizConfig::default();
    let accumulator = quiz::score_answers(&config.questions, &["a", "a", "a"]).unwrap();

    let recommendations = config.recommendations(&accumulator, 3);
    let majors: Vec<(&str, i64)> = recommendations
        .iter()
        .map(|r| (r.major.as_str(), r.score))
        .collect();

    // Engineering and Physics tie at 5; Engineering was touched first
    assert_eq!(majors, vec![("Math", 6), ("Engineering", 5), ("Physics", 5)]);
    assert!(recommendations.iter().all(|r| !r.description.is_empty()));
}

#[test]
fn quiz_rejects_unknown_answer() {
    let config = QuizConfig::default();
    let err = quiz::score_answers(&config.questions, &["a", "e", "a"]).unwrap_err();
    assert!(err.to_string().contains("Question 2"));
}

#[test]
fn quiz_history_persists_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quiz_results.json");
    let config = QuizConfig::default();
    let accumulator = quiz::score_answers(&config.questions, &["c", "c", "d"]).unwrap();

    quiz::append_record(
        &path,
        QuizRecord {
            taken_at: chrono::Utc::now(),
            answers: vec!["c".into(), "c".into(), "d".into()],
            recommendations: config.recommendations(&accumulator, 2),
        },
    )
    .unwrap();

    let history = quiz::load_history(&path).unwrap();
    let last = history.last().unwrap();
    assert_eq!(last.recommendations[0].major, "Art");
    assert_eq!(last.recommendations[0].score, 9);
}

#[test]
fn config_file_drives_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        r#"
scoring:
  mode: bounded
  ceiling: 10
  top_k: 1
  criteria:
    - { name: budget, kind: threshold, attribute: tuition, max: 10 }
colleges:
  - { name: Pricey College, tuition: 70000, sat_avg: 1400, acceptance_rate: 0.3, location: WA }
  - { name: Budget College, tuition: 9000, sat_avg: 1100, acceptance_rate: 0.8, location: WA }
"#,
    )
    .unwrap();

    let config = load_config(Some(path)).unwrap();
    assert!(validate_config(&config).is_ok());

    let scoring = config.effective_scoring();
    let engine = ScoringEngine::new(&scoring).unwrap();
    let colleges = config.effective_colleges();
    let request = CompareRequest {
        sat: 1200.0,
        budget: 20000.0,
        location: None,
    };

    let matches = compare(&colleges, &engine, &request, scoring.effective_top_k());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].college.name, "Budget College");
    assert!(close(matches[0].result.score, 10.0));
}

#[test]
fn additive_config_reports_every_problem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        r#"
scoring:
  mode: additive
  ceiling: 100
  criteria: []
"#,
    )
    .unwrap();

    let config = load_config(Some(path)).unwrap();
    assert_eq!(config.effective_scoring().mode, ScoringMode::Additive);
    let errors = validate_config(&config).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.starts_with("scoring.")));
}

#[test]
fn aid_estimate_from_defaults() {
    let estimate = estimate_aid(&AidConfig::default(), 45000.0, 3.85, 50000.0).unwrap();
    // need: min(35000, 45000); merit: 12500; total capped at 47500
    assert!(close(estimate.need_based, 35000.0));
    assert!(close(estimate.merit, 12500.0));
    assert!(close(estimate.total, 47500.0));
    assert!(close(estimate.net_cost, 2500.0));
    assert!(close(estimate.loans, 0.0));
}

#[test]
fn interview_practice_saves_answered_questions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interview_practice.json");
    let questions = InterviewConfig::default().select(3, 0);

    let input = "I grew up in a small town and love building things with my hands\nskip\nquit\n";
    let mut prompter = Prompter::new(std::io::Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let responses = interview::run_practice(&mut prompter, &questions).unwrap();

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].question, "Tell me about yourself.");

    interview::append_session(
        &path,
        PracticeSession {
            practiced_at: chrono::Utc::now(),
            responses,
        },
    )
    .unwrap();
    let log = interview::load_log(&path).unwrap();
    assert_eq!(log.sessions.len(), 1);
    assert_eq!(log.sessions[0].responses[0].word_count(), 14);
}
