// Create, update and delete handlers shared by the one-shot CLI and subcommands

use crate::cli::{AddRequest, DeleteArgs, EditArgs};
use crate::config::Config;
use crate::core::data::Indicator;
use crate::core::operations::{EditOutcome, ScorecardService};
use crate::core::traits::IndicatorStore;
use crate::utils::error::{AppResult, FlowResult, handle_flow};
use crate::utils::format::format_score;
use crate::utils::{self, OutputStyle};

pub fn handle_add_request<S: IndicatorStore>(
    service: &ScorecardService<S>,
    config: &Config,
    request: &AddRequest,
) -> AppResult<Indicator> {
    let weight = request.weight.unwrap_or(config.general.default_weight);
    let indicator = service.add_indicator(
        &request.perspective,
        &request.name,
        request.target,
        request.actual,
        Some(weight),
    )?;

    print_added(&indicator);
    Ok(indicator)
}

pub fn print_added(indicator: &Indicator) {
    handle_flow(FlowResult::Success(format!(
        "KPI '{}' added under '{}' with score: {}",
        indicator.name,
        indicator.perspective,
        OutputStyle::score(indicator.score, &format_score(indicator.score))
    )));
}

pub fn handle_edit_command<S: IndicatorStore>(
    service: &ScorecardService<S>,
    args: &EditArgs,
) -> AppResult<()> {
    let outcome = service.edit_indicator(&args.perspective, &args.name, args.target, args.actual)?;
    report_edit_outcome(&outcome);
    Ok(())
}

pub fn report_edit_outcome(outcome: &EditOutcome) {
    match outcome {
        EditOutcome::Updated(indicator) => {
            handle_flow(FlowResult::Success(format!("KPI '{}' updated", indicator.name)));
            OutputStyle::print_indicator_detailed(indicator);
        }
        EditOutcome::NotFound { perspective, name } => handle_flow(FlowResult::NotFound {
            item_type: "KPI".to_string(),
            search_term: format!("{} / {}", perspective, name),
        }),
    }
}

pub fn handle_delete_command<S: IndicatorStore>(
    service: &ScorecardService<S>,
    args: &DeleteArgs,
) -> AppResult<()> {
    if !args.force
        && !utils::prompt_yes_no(&format!(
            "Delete KPI '{}' from '{}'?",
            args.name, args.perspective
        ))?
    {
        handle_flow(FlowResult::Cancelled("KPI not deleted".to_string()));
        return Ok(());
    }

    let removed = service.remove_indicator(&args.perspective, &args.name)?;
    report_delete_outcome(&args.perspective, &args.name, removed);
    Ok(())
}

pub fn report_delete_outcome(perspective: &str, name: &str, removed: bool) {
    if removed {
        handle_flow(FlowResult::Success(format!(
            "KPI '{}' deleted from '{}'",
            name, perspective
        )));
    } else {
        println!(
            "{}",
            OutputStyle::muted(&format!("No KPI '{}' under '{}', nothing to delete", name, perspective))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::SqliteStore;
    use crate::utils::error::AppError;

    fn service() -> ScorecardService<SqliteStore> {
        ScorecardService::new(SqliteStore::open_in_memory().unwrap())
    }

    fn request(weight: Option<f64>) -> AddRequest {
        AddRequest {
            perspective: "Financial".to_string(),
            name: "Revenue Growth".to_string(),
            target: 100.0,
            actual: 80.0,
            weight,
        }
    }

    #[test]
    fn test_add_request_uses_configured_default_weight() {
        let svc = service();
        let mut config = Config::default();
        config.general.default_weight = 2.0;

        let kpi = handle_add_request(&svc, &config, &request(None)).unwrap();
        assert_eq!(kpi.weight, 2.0);
        assert_eq!(kpi.score, 80.0);
    }

    #[test]
    fn test_add_request_surfaces_rejections() {
        let svc = service();
        let config = Config::default();
        handle_add_request(&svc, &config, &request(Some(1.0))).unwrap();

        let err = handle_add_request(&svc, &config, &request(Some(1.0))).unwrap_err();
        assert!(matches!(err, AppError::DuplicateIndicator { .. }));

        let mut bad = request(None);
        bad.perspective = "Sales".to_string();
        let err = handle_add_request(&svc, &config, &bad).unwrap_err();
        assert!(matches!(err, AppError::InvalidPerspective(_)));
    }

    #[test]
    fn test_forced_delete_and_missing_edit_are_not_errors() {
        let svc = service();
        let args = DeleteArgs {
            perspective: "Learning & Growth".to_string(),
            name: "Nonexistent".to_string(),
            force: true,
        };
        handle_delete_command(&svc, &args).unwrap();

        let edit = EditArgs {
            perspective: "Customer".to_string(),
            name: "NPS".to_string(),
            target: 50.0,
            actual: 40.0,
        };
        handle_edit_command(&svc, &edit).unwrap();
        assert_eq!(svc.store().count().unwrap(), 0);
    }
}
