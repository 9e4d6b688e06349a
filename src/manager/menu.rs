// Interactive menu shell

use tracing::debug;

use crate::config::Config;
use crate::core::data::Perspective;
use crate::core::operations::ScorecardService;
use crate::core::traits::IndicatorStore;
use crate::manager::crud::{print_added, report_delete_outcome, report_edit_outcome};
use crate::manager::query::print_report;
use crate::utils::error::{AppError, AppResult, FlowResult, handle_flow, report_error};
use crate::utils::{self, OutputStyle};

/// Actions offered by the interactive menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    ViewReport,
    Edit,
    Delete,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::Add,
        MenuAction::ViewReport,
        MenuAction::Edit,
        MenuAction::Delete,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Add => "Add KPI",
            MenuAction::ViewReport => "View report",
            MenuAction::Edit => "Edit KPI",
            MenuAction::Delete => "Delete KPI",
            MenuAction::Exit => "Exit",
        }
    }

    /// Resolve a menu choice: the 1-based number, the full label, or the
    /// label without its "KPI" suffix, ignoring case and surrounding space.
    pub fn resolve(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        if let Ok(index) = normalized.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied());
        }
        Self::ALL.into_iter().find(|action| {
            let label = action.label().to_lowercase();
            label == normalized || label.strip_suffix(" kpi") == Some(normalized.as_str())
        })
    }
}

pub fn run_menu<S: IndicatorStore>(service: &ScorecardService<S>, config: &Config) -> AppResult<()> {
    println!("{}", OutputStyle::title("Balanced Scorecard"));

    loop {
        print_menu();
        let Some(choice) = utils::prompt_input("Select an option: ")? else {
            println!();
            break;
        };

        let Some(action) = MenuAction::resolve(&choice) else {
            println!("{}", OutputStyle::warning(&format!("Invalid option: '{}'", choice)));
            continue;
        };
        debug!("Menu action {:?}", action);

        let result = match action {
            MenuAction::Add => add_flow(service, config),
            MenuAction::ViewReport => print_report(service, &config.general.report_format, false),
            MenuAction::Edit => edit_flow(service),
            MenuAction::Delete => delete_flow(service),
            MenuAction::Exit => break,
        };

        match result {
            Ok(()) => {}
            Err(err) if err.is_rejection() => report_error(&err),
            Err(err) => return Err(err),
        }
    }

    println!("{}", OutputStyle::muted("Goodbye!"));
    Ok(())
}

fn print_menu() {
    println!();
    for (i, action) in MenuAction::ALL.iter().enumerate() {
        println!("  {}. {}", OutputStyle::info(&(i + 1).to_string()), action.label());
    }
}

fn cancelled() -> AppResult<()> {
    handle_flow(FlowResult::Cancelled("Input ended, action cancelled".to_string()));
    Ok(())
}

fn select_perspective() -> AppResult<Option<Perspective>> {
    println!("Perspectives:");
    for (i, p) in Perspective::ALL.iter().enumerate() {
        println!("  {}. {}", OutputStyle::info(&(i + 1).to_string()), p);
    }

    let Some(input) = utils::prompt_input("Perspective (number or name): ")? else {
        return Ok(None);
    };
    Perspective::resolve(&input)
        .map(Some)
        .ok_or(AppError::InvalidPerspective(input))
}

fn ask_number(field: &str) -> AppResult<Option<f64>> {
    match utils::prompt_input(&format!("{}: ", OutputStyle::label(field)))? {
        Some(input) => utils::parse_number(field, &input).map(Some),
        None => Ok(None),
    }
}

fn add_flow<S: IndicatorStore>(service: &ScorecardService<S>, config: &Config) -> AppResult<()> {
    let Some(perspective) = select_perspective()? else { return cancelled() };
    let Some(name) = utils::prompt_input(&format!("{}: ", OutputStyle::label("KPI name")))? else {
        return cancelled();
    };

    let similar: Vec<_> = service
        .similar_indicators(perspective, &name)?
        .into_iter()
        .filter(|kpi| kpi.name != name.trim())
        .collect();
    if let Some(existing) = similar.first() {
        let question = format!("A KPI named '{}' already exists under '{}'. Add anyway?", existing.name, perspective);
        if !utils::prompt_yes_no(&question)? {
            handle_flow(FlowResult::Cancelled("KPI not added".to_string()));
            return Ok(());
        }
    }

    let Some(target) = ask_number("Target")? else { return cancelled() };
    let Some(actual) = ask_number("Actual")? else { return cancelled() };

    let weight_prompt = format!("{} [{}]: ", OutputStyle::label("Weight"), config.general.default_weight);
    let Some(weight_input) = utils::prompt_input(&weight_prompt)? else { return cancelled() };
    let weight = if weight_input.is_empty() {
        config.general.default_weight
    } else {
        utils::parse_number("Weight", &weight_input)?
    };

    let indicator = service.add_indicator(perspective.label(), &name, target, actual, Some(weight))?;
    print_added(&indicator);
    Ok(())
}

fn edit_flow<S: IndicatorStore>(service: &ScorecardService<S>) -> AppResult<()> {
    let Some(perspective) = select_perspective()? else { return cancelled() };
    let Some(name) = utils::prompt_input(&format!("{}: ", OutputStyle::label("KPI name")))? else {
        return cancelled();
    };
    let Some(target) = ask_number("New target")? else { return cancelled() };
    let Some(actual) = ask_number("New actual")? else { return cancelled() };

    let outcome = service.edit_indicator(perspective.label(), &name, target, actual)?;
    report_edit_outcome(&outcome);
    Ok(())
}

fn delete_flow<S: IndicatorStore>(service: &ScorecardService<S>) -> AppResult<()> {
    let Some(perspective) = select_perspective()? else { return cancelled() };
    let Some(name) = utils::prompt_input(&format!("{}: ", OutputStyle::label("KPI name")))? else {
        return cancelled();
    };

    let removed = service.remove_indicator(perspective.label(), &name)?;
    report_delete_outcome(perspective.label(), name.trim(), removed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_number() {
        assert_eq!(MenuAction::resolve("1"), Some(MenuAction::Add));
        assert_eq!(MenuAction::resolve(" 2 "), Some(MenuAction::ViewReport));
        assert_eq!(MenuAction::resolve("5"), Some(MenuAction::Exit));
        assert_eq!(MenuAction::resolve("0"), None);
        assert_eq!(MenuAction::resolve("6"), None);
    }

    #[test]
    fn test_resolve_by_label_ignores_case() {
        assert_eq!(MenuAction::resolve("add kpi"), Some(MenuAction::Add));
        assert_eq!(MenuAction::resolve("ADD"), Some(MenuAction::Add));
        assert_eq!(MenuAction::resolve("View Report"), Some(MenuAction::ViewReport));
        assert_eq!(MenuAction::resolve("edit"), Some(MenuAction::Edit));
        assert_eq!(MenuAction::resolve("Delete KPI"), Some(MenuAction::Delete));
        assert_eq!(MenuAction::resolve("exit"), Some(MenuAction::Exit));
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        assert_eq!(MenuAction::resolve(""), None);
        assert_eq!(MenuAction::resolve("view"), None);
        assert_eq!(MenuAction::resolve("quit"), None);
    }

    #[test]
    fn test_labels_are_distinct() {
        for (i, a) in MenuAction::ALL.iter().enumerate() {
            for b in &MenuAction::ALL[i + 1..] {
                assert_ne!(a.label().to_lowercase(), b.label().to_lowercase());
            }
        }
    }
}
