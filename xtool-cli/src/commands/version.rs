//! Implementation of the 'version' subcommand.

use console::style;
use log::info;
use owo_colors::OwoColorize;
use xtool_core::terminal;

/// Project homepage printed by `xtool version`.
pub const PROJECT_URL: &str = "https://www.github.com/cdzombak/xtool";

pub fn run_version() {
    let use_color = terminal::should_use_color();
    let headline = format!("xtool {}", env!("CARGO_PKG_VERSION"));

    if use_color {
        info!("{}", style(headline).bold().white());
        info!("{}", PROJECT_URL.cyan());
    } else {
        info!("{headline}");
        info!("{PROJECT_URL}");
    }
    info!("");
    info!("a photo workflow tool");
    info!("");
    info!("(particularly useful for tricking raw processors into");
    info!(" handling files from unsupported cameras)");
    info!("");
    if use_color {
        info!("{}", "run `xtool help` for usage.".magenta());
    } else {
        info!("run `xtool help` for usage.");
    }
    info!("");
}
