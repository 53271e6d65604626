//! Report assembly and rendering.
//!
//! A [`Report`] groups the engine outputs the way the dashboard pages do:
//! - **Overview**: dataset summary, treatment trend, support perception
//! - **Diagnostics**: cross-tabs, interference distribution, correlations
//! - **Insights**: risk, baselines and the three projection models
//!
//! Rendering is either structured (YAML/JSON via serde) or plain text tables.

use std::fmt::Write;

use clap::ValueEnum;
use mindmetrics_core::correlation::{CorrelationMatrix, TargetCorrelation};
use mindmetrics_core::crosstab::{self, CrossTab, Distribution};
use mindmetrics_core::projection::{
    Baselines, BenefitsProjection, InterventionProjection, RoiProjection, benefits_projection,
    intervention_projection, roi_projection,
};
use mindmetrics_core::rates::{self, DatasetSummary, SupportTrends, TreatmentTrend};
use mindmetrics_core::risk::{self, RiskProfile, RiskSummary};
use mindmetrics_core::{
    CorrelationCache, Dataset, Field, ParameterError, PolicyConfig, ScenarioParams,
};
use serde::Serialize;

use crate::format::{format_coefficient, format_currency, format_percentage, format_points};

/// Number of features listed against `treatment` in the text report
const TOP_CORRELATIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Yaml,
    Json,
}

/// Which pages a report contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Diagnostics,
    Insights,
    All,
}

impl Page {
    fn includes(self, other: Page) -> bool {
        self == Page::All || self == other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub summary: DatasetSummary,
    pub treatment: TreatmentTrend,
    pub support: SupportTrends,
}

impl Overview {
    pub fn build(dataset: &Dataset) -> Self {
        Self {
            summary: rates::dataset_summary(dataset),
            treatment: rates::treatment_trend(dataset),
            support: rates::support_trends(dataset),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub treatment_by_gender: CrossTab,
    pub treatment_by_company_size: CrossTab,
    pub treatment_by_family_history: CrossTab,
    pub interference: Distribution,
    pub interference_by_benefits: CrossTab,
    pub interference_by_company_size: CrossTab,
    /// Every encoded feature against the two targets, strongest first
    pub correlations: Vec<TargetCorrelation>,
    pub risk_factor_correlation: CorrelationMatrix,
}

impl Diagnostics {
    pub fn build(dataset: &Dataset, cache: &mut CorrelationCache) -> Self {
        let report = cache.get_or_compute(dataset);
        Self {
            treatment_by_gender: crosstab::treatment_by_gender(dataset),
            treatment_by_company_size: crosstab::treatment_by_company_size(dataset),
            treatment_by_family_history: crosstab::treatment_by_family_history(dataset),
            interference: crosstab::interference_distribution(dataset),
            interference_by_benefits: crosstab::interference_by_benefits(dataset),
            interference_by_company_size: crosstab::interference_by_company_size(dataset),
            correlations: report.targets.clone(),
            risk_factor_correlation: risk::risk_factor_correlation(dataset),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub params: ScenarioParams,
    pub risk: RiskSummary,
    pub risk_profiles: Vec<RiskProfile>,
    pub baselines: Baselines,
    pub benefits: BenefitsProjection,
    pub roi: RoiProjection,
    pub interventions: InterventionProjection,
}

impl Insights {
    pub fn build(
        dataset: &Dataset,
        params: &ScenarioParams,
        policy: &PolicyConfig,
    ) -> Result<Self, ParameterError> {
        let baselines = Baselines::from_dataset(dataset, policy);
        Ok(Self {
            params: params.clone(),
            risk: risk::risk_summary(dataset, policy.high_risk_threshold),
            risk_profiles: risk::risk_profiles(dataset),
            benefits: benefits_projection(params, &baselines, policy)?,
            roi: roi_projection(params, &baselines, policy)?,
            interventions: intervention_projection(params, &baselines, policy)?,
            baselines,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<Overview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
}

impl Report {
    /// Run every metric the requested page needs
    pub fn build(
        dataset: &Dataset,
        cache: &mut CorrelationCache,
        params: &ScenarioParams,
        policy: &PolicyConfig,
        page: Page,
    ) -> Result<Self, ParameterError> {
        let insights = if page.includes(Page::Insights) {
            Some(Insights::build(dataset, params, policy)?)
        } else {
            None
        };

        Ok(Self {
            overview: page
                .includes(Page::Overview)
                .then(|| Overview::build(dataset)),
            diagnostics: page
                .includes(Page::Diagnostics)
                .then(|| Diagnostics::build(dataset, cache)),
            insights,
        })
    }

    pub fn render(&self, format: OutputFormat) -> color_eyre::Result<String> {
        Ok(match format {
            OutputFormat::Text => render_text(self),
            OutputFormat::Yaml => serde_saphyr::to_string(self)?,
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }
}

// ============================================================================
// Text rendering
// ============================================================================

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    if let Some(overview) = &report.overview {
        write_overview(&mut out, overview);
    }
    if let Some(diagnostics) = &report.diagnostics {
        write_diagnostics(&mut out, diagnostics);
    }
    if let Some(insights) = &report.insights {
        write_insights(&mut out, insights);
    }
    out
}

fn heading(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "== {title} ==");
}

fn write_overview(out: &mut String, overview: &Overview) {
    heading(out, "Overview");

    let summary = &overview.summary;
    let years: Vec<String> = summary.years.iter().map(ToString::to_string).collect();
    let _ = writeln!(
        out,
        "Records: {}  Variables: {}  Years: {}",
        summary.total_records,
        summary.variables,
        years.join(", ")
    );

    let _ = writeln!(out, "\nMissing values:");
    let width = summary
        .missing
        .iter()
        .map(|m| m.column.len())
        .max()
        .unwrap_or(0);
    for column in &summary.missing {
        let _ = writeln!(out, "  {:<width$}  {}", column.column, column.missing);
    }

    let _ = writeln!(out, "\nTreatment seeking by year:");
    for (year, split) in &overview.treatment.by_year {
        let _ = writeln!(
            out,
            "  {year}  sought {}  did not {}",
            format_percentage(split.sought_treatment),
            format_percentage(split.no_treatment)
        );
    }
    if let Some(delta) = overview.treatment.delta {
        let _ = writeln!(out, "  Change 2014 -> 2016: {}", format_points(delta));
    }

    let _ = writeln!(out, "\nWorkplace support (share answering Yes):");
    let width = overview
        .support
        .series
        .iter()
        .map(|s| s.label.len())
        .max()
        .unwrap_or(0);
    for series in &overview.support.series {
        let cells: Vec<String> = series
            .rates
            .iter()
            .map(|(year, rate)| format!("{year} {:>6}", format_percentage(*rate)))
            .collect();
        let _ = writeln!(out, "  {:<width$}  {}", series.label, cells.join("  "));
    }
}

fn write_table(
    out: &mut String,
    title: &str,
    row_labels: &[String],
    column_labels: &[String],
    cells: &[Vec<u64>],
) {
    let _ = writeln!(out, "\n{title}:");
    let label_width = row_labels.iter().map(String::len).max().unwrap_or(0);
    let widths: Vec<usize> = column_labels
        .iter()
        .enumerate()
        .map(|(j, label)| {
            cells
                .iter()
                .map(|row| row[j].to_string().len())
                .chain(std::iter::once(label.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let _ = write!(out, "  {:<label_width$}", "");
    for (label, width) in column_labels.iter().zip(&widths) {
        let _ = write!(out, "  {label:>width$}");
    }
    out.push('\n');

    for (label, row) in row_labels.iter().zip(cells) {
        let _ = write!(out, "  {label:<label_width$}");
        for (count, width) in row.iter().zip(&widths) {
            let _ = write!(out, "  {count:>width$}");
        }
        out.push('\n');
    }
}

fn write_crosstab(out: &mut String, table: &CrossTab) {
    let title = format!(
        "{} by {}",
        table.column_field.display_name(),
        table.row_field.display_name()
    );
    write_table(
        out,
        &title,
        &table.row_labels,
        &table.column_labels,
        &table.counts,
    );
}

fn write_diagnostics(out: &mut String, diagnostics: &Diagnostics) {
    heading(out, "Diagnostics");

    write_crosstab(out, &diagnostics.treatment_by_gender);
    write_crosstab(out, &diagnostics.treatment_by_company_size);
    write_crosstab(out, &diagnostics.treatment_by_family_history);

    let interference = &diagnostics.interference;
    let _ = writeln!(out, "\n{} distribution:", interference.field.display_name());
    let total: u64 = interference.counts.iter().sum();
    for (label, count) in interference.labels.iter().zip(&interference.counts) {
        let share = if total == 0 {
            0.0
        } else {
            *count as f64 / total as f64
        };
        let _ = writeln!(out, "  {label:<10}  {count:>6}  {:>6}", format_percentage(share));
    }

    write_crosstab(out, &diagnostics.interference_by_benefits);
    write_crosstab(out, &diagnostics.interference_by_company_size);

    let treatment = Field::Treatment.name();
    let top: Vec<&TargetCorrelation> = diagnostics
        .correlations
        .iter()
        .filter(|c| c.feature != treatment)
        .take(TOP_CORRELATIONS)
        .collect();
    let _ = writeln!(out, "\nStrongest correlations with treatment:");
    let width = top.iter().map(|c| c.feature.len()).max().unwrap_or(0);
    for c in top {
        let _ = writeln!(
            out,
            "  {:<width$}  treatment {}  work_interfere {}",
            c.feature,
            format_coefficient(c.treatment),
            format_coefficient(c.work_interfere)
        );
    }

    let matrix = &diagnostics.risk_factor_correlation;
    let _ = writeln!(out, "\nRisk factor correlation:");
    let width = matrix.columns.iter().map(String::len).max().unwrap_or(0);
    for (name, row) in matrix.columns.iter().zip(matrix.rows()) {
        let cells: Vec<String> = row.iter().map(|v| format_coefficient(*v)).collect();
        let _ = writeln!(out, "  {name:<width$}  {}", cells.join(" "));
    }
}

fn write_insights(out: &mut String, insights: &Insights) {
    heading(out, "Insights");

    let params = &insights.params;
    let interventions: Vec<&str> = params.interventions.iter().map(|i| i.name()).collect();
    let _ = writeln!(
        out,
        "Scenario: salary {}  program cost {}/employee  headcount {}  participation {:.0}%",
        format_currency(params.avg_salary),
        format_currency(params.program_cost),
        params.headcount,
        params.participation_pct
    );
    let _ = writeln!(
        out,
        "Interventions: {}",
        if interventions.is_empty() {
            "none".to_string()
        } else {
            interventions.join(", ")
        }
    );

    let risk = &insights.risk;
    let _ = writeln!(out, "\nRisk (threshold {:.2}):", risk.threshold);
    let _ = writeln!(
        out,
        "  High risk: {} of {}  untreated: {} ({})",
        risk.high_risk,
        risk.respondents,
        risk.high_risk_untreated,
        format_percentage(risk.untreated_high_risk_share)
    );
    for profile in &insights.risk_profiles {
        let s = &profile.summary;
        let _ = writeln!(
            out,
            "  {:<15} {:<9} n={:<5} min {:.2}  q1 {:.2}  median {:.2}  q3 {:.2}  max {:.2}",
            profile.company_size.label(),
            if profile.treated { "treated" } else { "untreated" },
            profile.count,
            s.min,
            s.q1,
            s.median,
            s.q3,
            s.max
        );
    }

    let benefits = &insights.benefits;
    let _ = writeln!(out, "\nBenefits comparison:");
    let _ = writeln!(
        out,
        "  Loss rate with benefits {}  without {}",
        format_percentage(benefits.loss_rate_with_benefits),
        format_percentage(benefits.loss_rate_without_benefits)
    );
    let _ = writeln!(
        out,
        "  Savings per employee {}  total {}  recommended budget {}/employee",
        format_currency(benefits.savings_per_employee),
        format_currency(benefits.total_savings),
        format_currency(benefits.recommended_budget_per_employee)
    );

    let roi = &insights.roi;
    let _ = writeln!(out, "\nProgram ROI:");
    let _ = writeln!(
        out,
        "  Baseline loss {}  adjusted {}  savings {}",
        format_currency(roi.baseline_loss),
        format_currency(roi.adjusted_loss),
        format_currency(roi.savings)
    );
    let _ = writeln!(
        out,
        "  Program cost {}  ROI {}",
        format_currency(roi.program_cost_total),
        format_percentage(roi.roi)
    );
    for segment in &roi.segments {
        let _ = writeln!(
            out,
            "  {:<15} savings potential {}",
            segment.company_size.label(),
            format_currency(segment.savings_potential)
        );
    }

    let projection = &insights.interventions;
    let effect = projection.treatment_rate_increase;
    let reduction = projection.interference_reduction;
    let _ = writeln!(out, "\nIntervention impact:");
    let _ = writeln!(
        out,
        "  Treatment rate {} -> +{} to +{}",
        format_percentage(projection.baseline_treatment_rate),
        format_percentage(effect.min),
        format_percentage(effect.max)
    );
    let _ = writeln!(
        out,
        "  High interference {} -> -{} to -{}",
        format_percentage(projection.baseline_high_interference_rate),
        format_percentage(reduction.min),
        format_percentage(reduction.max)
    );
    let _ = writeln!(
        out,
        "  Productivity gain {}  retention gain {}  cost {}  net {}",
        format_currency(projection.productivity_gain),
        format_currency(projection.retention_gain),
        format_currency(projection.implementation_cost),
        format_currency(projection.net_benefit)
    );
}
