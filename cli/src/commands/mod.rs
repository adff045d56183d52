mod bmi;
mod dashboard;
mod helpers;
mod meal;
mod plan;
mod user;
mod weight;

use fitplan_core::Tracker;

use crate::charts::TerminalCharts;

pub(crate) type CliTracker<'s> = Tracker<'s, TerminalCharts>;

/// Something the user named does not exist. The message has already been
/// printed; `main` exits with status 2.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub(crate) struct NotFound(pub(crate) String);

pub(crate) use bmi::cmd_bmi;
pub(crate) use dashboard::cmd_dashboard;
pub(crate) use meal::{cmd_meal_delete, cmd_meal_list, cmd_meal_log};
pub(crate) use plan::{cmd_plan_diet, cmd_plan_workout};
pub(crate) use user::{cmd_user_login, cmd_user_register};
pub(crate) use weight::{cmd_weight_log, cmd_weight_reset, cmd_weight_trend};
