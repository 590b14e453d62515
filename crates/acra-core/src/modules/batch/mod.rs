//! Drives the solver over every `mu0` case and reassembles the per-case tables
//! into aligned optical-thickness and optical-depth series.

mod model;

pub use model::{BatchResult, CaseSeries};

use crate::domain::{AcraError, AcraResult, BatchInput, CaseForcing, ForcingMode};
use crate::modules::input::load_input_document;
use crate::modules::solver::{ProcessSolver, SolverColumn, SolverTable};
use crate::modules::template::{Template, TemplateContext, TemplateValue};
use crate::modules::traits::SolverExecutor;
use crate::numerics::{concatenate, cumulative_sum, modified_cosine, offset_cumulative_sum};
use std::path::PathBuf;
use tracing::{debug, info};

pub const ZMU0: &str = "ZMU0";
pub const ZMU0_DASH: &str = "ZMU0_DASH";
pub const LFORCEEO: &str = "LFORCEEO";
pub const ZDEOSI: &str = "ZDEOSI";
pub const ZUEOSI: &str = "ZUEOSI";
pub const NLEV: &str = "NLEV";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchOptions {
    /// Vertical level count the forcing profiles must match, when known.
    pub expected_levels: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRunnerConfig {
    pub namelist_path: PathBuf,
    pub input_path: PathBuf,
    pub solver_program: PathBuf,
    pub options: BatchOptions,
}

/// Loads the namelist template and input document, then runs the batch
/// against the solver executable.
pub fn run_batch_from_config(config: &BatchRunnerConfig) -> AcraResult<BatchResult> {
    let template = Template::load(&config.namelist_path)?;
    let input = load_input_document(&config.input_path)?;
    let solver = ProcessSolver::new(&config.solver_program);
    run_batch(&input, &template, &solver, &config.options)
}

/// Runs every case in input order. The first failing case aborts the batch
/// and no partial result is returned.
pub fn run_batch<S>(
    input: &BatchInput,
    template: &Template,
    solver: &S,
    options: &BatchOptions,
) -> AcraResult<BatchResult>
where
    S: SolverExecutor + ?Sized,
{
    info!(
        cases = input.case_count(),
        forcing = %input.forcing,
        "starting solver batch"
    );

    let mut result = BatchResult::with_capacity(input.case_count());
    for (case, &mu0) in input.mu0.iter().enumerate() {
        let mu0_dash = modified_cosine(mu0);
        let table = solve_case(input, template, solver, options, case, mu0, mu0_dash)
            .map_err(|error| error.for_case(case))?;
        debug!(case, mu0, mu0_dash, levels = table.level_count(), "case solved");
        result.push_case(mu0, mu0_dash, derive_case_series(&table, mu0_dash));
    }

    info!(cases = result.case_count(), "solver batch finished");
    Ok(result)
}

fn solve_case<S>(
    input: &BatchInput,
    template: &Template,
    solver: &S,
    options: &BatchOptions,
    case: usize,
    mu0: f64,
    mu0_dash: f64,
) -> AcraResult<SolverTable>
where
    S: SolverExecutor + ?Sized,
{
    let context = case_context(&input.forcing, case, mu0, mu0_dash, options)?;
    let namelist = template.render(&context)?;
    let table = solver.execute(&namelist)?;

    if let Some(profiles) = input.forcing.case(case) {
        validate_solved_levels(&table, profiles)?;
    }
    Ok(table)
}

pub fn case_context(
    forcing: &ForcingMode,
    case: usize,
    mu0: f64,
    mu0_dash: f64,
    options: &BatchOptions,
) -> AcraResult<TemplateContext> {
    let mut context = TemplateContext::new();
    context
        .insert(ZMU0, TemplateValue::Real(mu0))
        .insert(ZMU0_DASH, TemplateValue::Real(mu0_dash));

    if let Some(levels) = options.expected_levels {
        let levels = i64::try_from(levels).map_err(|_| {
            AcraError::input_validation(
                "INPUT.LEVEL_COUNT",
                format!("level count {} is out of range", levels),
            )
        })?;
        context.insert(NLEV, TemplateValue::Integer(levels));
    }

    match forcing {
        ForcingMode::Disabled => {
            context
                .insert(LFORCEEO, TemplateValue::Bool(false))
                .insert(ZDEOSI, TemplateValue::Absent)
                .insert(ZUEOSI, TemplateValue::Absent);
        }
        ForcingMode::Enabled { .. } => {
            let profiles = forcing.case(case).ok_or_else(|| {
                AcraError::input_validation(
                    "INPUT.FORCING_SHAPE",
                    "no optical thickness profiles for this case",
                )
            })?;
            validate_profile_lengths(profiles, options.expected_levels)?;

            // The solver expects the upward profile divided by 2 mu0'.
            let scale = 2.0 * mu0_dash;
            let upward = profiles.upward.iter().map(|value| value / scale).collect();
            context
                .insert(LFORCEEO, TemplateValue::Bool(true))
                .insert(ZDEOSI, TemplateValue::RealArray(profiles.downward.to_vec()))
                .insert(ZUEOSI, TemplateValue::RealArray(upward));
        }
    }

    Ok(context)
}

fn validate_profile_lengths(
    profiles: CaseForcing<'_>,
    expected_levels: Option<usize>,
) -> AcraResult<()> {
    let downward = profiles.downward.len();
    let upward = profiles.upward.len();

    if downward == 0 || downward != upward {
        return Err(AcraError::template_render(
            "TEMPLATE.PROFILE_LENGTH",
            format!(
                "'{}' has {} levels but '{}' has {}",
                ZDEOSI, downward, ZUEOSI, upward
            ),
        ));
    }

    if let Some(levels) = expected_levels.filter(|levels| *levels != downward) {
        return Err(AcraError::template_render(
            "TEMPLATE.PROFILE_LENGTH",
            format!(
                "optical thickness profiles have {} levels but the solver expects {}",
                downward, levels
            ),
        ));
    }

    Ok(())
}

fn validate_solved_levels(table: &SolverTable, profiles: CaseForcing<'_>) -> AcraResult<()> {
    let levels = table.level_count();
    if levels != profiles.downward.len() {
        return Err(AcraError::parse(
            "PARSE.SOLVER_LEVELS",
            format!(
                "solver returned {} levels but the optical thickness profiles have {}",
                levels,
                profiles.downward.len()
            ),
        ));
    }
    Ok(())
}

/// Undoes the upward normalisation and integrates both hemispheres. Upward
/// depth continues from the full downward path.
pub fn derive_case_series(table: &SolverTable, mu0_dash: f64) -> CaseSeries {
    let scale = 2.0 * mu0_dash;
    let optical_thickness_downward = table.column(SolverColumn::OpticalThicknessDownward);
    let optical_thickness_upward = table
        .column(SolverColumn::OpticalThicknessUpward)
        .into_iter()
        .map(|value| value * scale)
        .collect::<Vec<_>>();

    let total_downward: f64 = optical_thickness_downward.iter().sum();
    let optical_depth_downward = cumulative_sum(&optical_thickness_downward);
    let optical_depth_upward = offset_cumulative_sum(total_downward, &optical_thickness_upward);

    CaseSeries {
        pressure: table.column(SolverColumn::Pressure),
        heating_rate_shortwave: table.column(SolverColumn::HeatingRateShortwave),
        heating_rate_longwave: table.column(SolverColumn::HeatingRateLongwave),
        optical_depth: concatenate(&optical_depth_downward, &optical_depth_upward),
        optical_thickness: concatenate(&optical_thickness_downward, &optical_thickness_upward),
        optical_thickness_downward,
        optical_thickness_upward,
        optical_depth_downward,
        optical_depth_upward,
    }
}
