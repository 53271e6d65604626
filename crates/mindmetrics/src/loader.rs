//! Dataset and scenario file loading.
//!
//! The dataset is a JSON array of row objects keyed by column name. Survey
//! exports disagree on how they spell things, so rows are normalized here
//! before they reach [`Dataset::new`]:
//! - `treatment` may be `0`/`1` or `"No"`/`"Yes"`
//! - empty strings and `"NA"` are missing answers
//! - `age` may be a number or a numeric string
//!
//! The scenario file is YAML with optional `params:` and `policy:` sections.

use std::fs;
use std::path::Path;

use mindmetrics_core::{
    Dataset, Field, Intervention, ParameterError, PolicyConfig, ScenarioParams, SurveyRecord,
    SurveyYear,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error types for file loading
#[derive(Debug)]
pub enum LoadError {
    /// I/O error (file not found, permission denied, etc.)
    Io(String),
    /// Parse error (invalid JSON/YAML, bad row)
    Parse(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "IO error: {}", msg),
            LoadError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

/// Scenario inputs as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub params: ScenarioParams,
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl ScenarioFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }
}

/// Command-line values that take precedence over the scenario file
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ScenarioOverrides {
    /// Average annual salary, dollars
    #[arg(long)]
    pub salary: Option<f64>,

    /// Annual program cost per employee, dollars
    #[arg(long)]
    pub program_cost: Option<f64>,

    /// Number of employees
    #[arg(long)]
    pub headcount: Option<u32>,

    /// Expected participation, percent
    #[arg(long)]
    pub participation: Option<f64>,

    /// Intervention to include (repeatable); replaces the file's selection
    #[arg(long = "intervention")]
    pub interventions: Vec<String>,
}

impl ScenarioFile {
    /// Apply overrides, then check the result against the parameter ranges
    /// and policy constraints
    pub fn apply(&mut self, overrides: &ScenarioOverrides) -> Result<(), ParameterError> {
        let params = &mut self.params;
        if let Some(salary) = overrides.salary {
            params.avg_salary = salary;
        }
        if let Some(cost) = overrides.program_cost {
            params.program_cost = cost;
        }
        if let Some(headcount) = overrides.headcount {
            params.headcount = headcount;
        }
        if let Some(participation) = overrides.participation {
            params.participation_pct = participation;
        }
        if !overrides.interventions.is_empty() {
            params.interventions = overrides
                .interventions
                .iter()
                .map(|name| name.parse::<Intervention>())
                .collect::<Result<_, _>>()?;
        }

        params.validate()?;
        self.policy.validate()
    }
}

/// Load a scenario file. An empty file yields the defaults.
pub fn load_scenario(path: &Path) -> Result<ScenarioFile, LoadError> {
    let content = fs::read_to_string(path)
        .map_err(|e| LoadError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    if content.trim().is_empty() {
        return Ok(ScenarioFile::default());
    }

    ScenarioFile::from_yaml(&content)
        .map_err(|e| LoadError::Parse(format!("Failed to parse YAML: {}", e)))
}

/// Load and normalize the survey dataset
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let content = fs::read_to_string(path)
        .map_err(|e| LoadError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let dataset = parse_dataset(&content)?;
    tracing::info!(
        rows = dataset.len(),
        path = %path.display(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parse a JSON array of rows into a validated [`Dataset`]
pub fn parse_dataset(json: &str) -> Result<Dataset, LoadError> {
    let rows: Vec<Map<String, Value>> = serde_json::from_str(json)
        .map_err(|e| LoadError::Parse(format!("Failed to parse JSON: {}", e)))?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| parse_row(i, row))
        .collect::<Result<Vec<_>, _>>()?;

    Dataset::new(records).map_err(|e| LoadError::Parse(e.to_string()))
}

fn parse_row(index: usize, row: &Map<String, Value>) -> Result<SurveyRecord, LoadError> {
    let bad = |msg: String| LoadError::Parse(format!("row {index}: {msg}"));

    let year = row
        .get(Field::Year.name())
        .and_then(value_as_integer)
        .ok_or_else(|| bad("missing or non-numeric year".to_string()))?;
    let year = u16::try_from(year)
        .map_err(|_| bad(format!("survey year out of range: {year}")))
        .and_then(|y| SurveyYear::try_from(y).map_err(|e| bad(e.to_string())))?;

    let mut record = SurveyRecord::new(year);
    record.treatment = parse_treatment(row.get(Field::Treatment.name())).map_err(bad)?;
    record.age = parse_age(row.get("age")).map_err(bad)?;

    for field in Field::FEATURES {
        if field == Field::Treatment {
            continue;
        }
        let label = match row.get(field.name()) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => normalize_label(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(if *b { "Yes" } else { "No" }.to_string()),
            Some(other) => return Err(bad(format!("{}: unexpected value {}", field, other))),
        };
        record.set_label(field, label.as_deref());
    }

    Ok(record)
}

/// `None` for blank and `NA` answers, otherwise the trimmed label
fn normalize_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NA") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn value_as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Out-of-range integers are passed through so `Dataset::new` reports the row
fn parse_treatment(value: Option<&Value>) -> Result<u8, String> {
    match value {
        Some(Value::String(s)) => match s.trim() {
            "Yes" | "yes" | "1" => Ok(1),
            "No" | "no" | "0" => Ok(0),
            other => Err(format!("unrecognized treatment {other:?}")),
        },
        Some(Value::Bool(b)) => Ok(u8::from(*b)),
        Some(v) => value_as_integer(v)
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| format!("unrecognized treatment {v}")),
        None => Err("missing treatment".to_string()),
    }
}

fn parse_age(value: Option<&Value>) -> Result<Option<f64>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => match normalize_label(s) {
            None => Ok(None),
            Some(s) => s
                .parse::<f64>()
                .map(Some)
                .map_err(|_| format!("age is not a number: {s:?}")),
        },
        Some(other) => Err(format!("age is not a number: {other}")),
    }
}
