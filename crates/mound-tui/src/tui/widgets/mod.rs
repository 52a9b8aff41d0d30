// TUI widget modules for each browser panel and overlay.

pub mod help_bar;
pub mod metrics_help;
pub mod player_card;
pub mod player_list;
pub mod quit_confirm;
pub mod search_bar;
pub mod status_bar;
pub mod team_filter;
