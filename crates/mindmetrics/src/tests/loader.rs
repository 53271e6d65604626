use std::fs;

use mindmetrics_core::{Field, Intervention, ParameterError, SurveyYear};
use tempfile::TempDir;

use crate::loader::{LoadError, ScenarioFile, ScenarioOverrides, load_dataset, load_scenario};

const ROWS: &str = r#"[
    {"year": 2014, "treatment": "Yes", "age": 37, "gender": "Female",
     "work_interfere": "Often", "benefits": "Yes", "no_employees": "6-25"},
    {"year": 2014, "treatment": 0, "age": "NA", "gender": "",
     "work_interfere": "NA", "benefits": "Don't know"},
    {"year": 2016, "treatment": 1, "age": 29, "gender": "Male",
     "work_interfere": "Never", "benefits": "No", "tech_company": "Yes"}
]"#;

#[test]
fn test_load_dataset_normalizes_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("survey.json");
    fs::write(&path, ROWS).unwrap();

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.len(), 3);

    let rows = dataset.records();
    assert_eq!(rows[0].treatment, 1);
    assert_eq!(rows[0].age, Some(37.0));
    assert_eq!(rows[0].label(Field::NoEmployees), Some("6-25"));

    assert_eq!(rows[1].treatment, 0);
    assert_eq!(rows[1].age, None);
    assert_eq!(rows[1].label(Field::Gender), None);
    assert_eq!(rows[1].label(Field::WorkInterfere), None);
    assert_eq!(rows[1].label(Field::Benefits), Some("Don't know"));

    assert_eq!(rows[2].year, SurveyYear::Y2016);
    assert_eq!(rows[2].label(Field::TechCompany), Some("Yes"));
}

#[test]
fn test_load_dataset_errors() {
    let dir = TempDir::new().unwrap();

    let missing = load_dataset(&dir.path().join("nope.json"));
    assert!(matches!(missing, Err(LoadError::Io(_))));

    let cases = [
        ("not json", "not json"),
        ("bad_year.json", r#"[{"year": 2015, "treatment": 0}]"#),
        ("bad_treatment.json", r#"[{"year": 2014, "treatment": 2}]"#),
        ("no_treatment.json", r#"[{"year": 2014}]"#),
    ];
    for (name, content) in cases {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        assert!(
            matches!(load_dataset(&path), Err(LoadError::Parse(_))),
            "{name} should fail to parse"
        );
    }
}

#[test]
fn test_load_scenario_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenario.yaml");
    fs::write(
        &path,
        "params:\n  avg_salary: 120000\n  headcount: 400\n  interventions:\n    - Therapy Coverage\n    - Flexible Hours\npolicy:\n  effectiveness: 0.3\n",
    )
    .unwrap();

    let scenario = load_scenario(&path).unwrap();
    assert_eq!(scenario.params.avg_salary, 120_000.0);
    assert_eq!(scenario.params.headcount, 400);
    // Unnamed fields keep their defaults
    assert_eq!(scenario.params.participation_pct, 65.0);
    assert_eq!(scenario.params.interventions.len(), 2);
    assert!(
        scenario
            .params
            .interventions
            .contains(&Intervention::TherapyCoverage)
    );
    assert_eq!(scenario.policy.effectiveness, 0.3);
    assert_eq!(scenario.policy.retention_multiplier, 2.0);
}

#[test]
fn test_empty_scenario_is_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.yaml");
    fs::write(&path, "\n").unwrap();
    assert_eq!(load_scenario(&path).unwrap(), ScenarioFile::default());
}

#[test]
fn test_overrides_replace_and_validate() {
    let mut scenario = ScenarioFile::default();
    let overrides = ScenarioOverrides {
        headcount: Some(1_000),
        interventions: vec!["mental-health-days".to_string()],
        ..Default::default()
    };
    scenario.apply(&overrides).unwrap();
    assert_eq!(scenario.params.headcount, 1_000);
    assert_eq!(
        scenario.params.interventions.iter().copied().collect::<Vec<_>>(),
        vec![Intervention::MentalHealthDays]
    );

    let out_of_range = ScenarioOverrides {
        participation: Some(150.0),
        ..Default::default()
    };
    assert!(matches!(
        ScenarioFile::default().apply(&out_of_range),
        Err(ParameterError::OutOfRange {
            parameter: "participation_pct",
            ..
        })
    ));

    let unknown = ScenarioOverrides {
        interventions: vec!["yoga".to_string()],
        ..Default::default()
    };
    assert_eq!(
        ScenarioFile::default().apply(&unknown),
        Err(ParameterError::UnknownIntervention("yoga".to_string()))
    );
}
