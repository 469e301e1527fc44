mod helpers;
mod log;
mod onboard;
mod options;
mod settings;
mod summary;
mod target;
mod weight;

pub(crate) use log::{cmd_add, cmd_remove, cmd_today};
pub(crate) use onboard::cmd_onboard;
pub(crate) use options::cmd_options;
pub(crate) use settings::{
    cmd_reset, cmd_settings_reminders, cmd_settings_reset_time, cmd_settings_show,
};
pub(crate) use summary::{cmd_history, cmd_progress};
pub(crate) use target::{cmd_target_recalc, cmd_target_set, cmd_target_show};
pub(crate) use weight::{cmd_weight_delete, cmd_weight_history, cmd_weight_log, cmd_weight_show};
