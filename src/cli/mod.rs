mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_assign, handle_design, handle_init, handle_lookup, handle_order, handle_receive,
    handle_share, handle_theme, handle_view,
};
