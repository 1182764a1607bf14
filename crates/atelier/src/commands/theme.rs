use std::io::Write;
use std::path::Path;

use anyhow::Result;
use atelier_theme::{Document, ThemeController};

use super::preference_store;
use crate::cli::{ThemeAction, ThemeArgs};

pub fn run(args: ThemeArgs, preferences: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let store = preference_store(preferences)?;
    let mut controller = ThemeController::new(Document::atelier(), store);
    controller.mount();

    let mode = match args.action.unwrap_or(ThemeAction::Get) {
        ThemeAction::Get => controller.theme(),
        ThemeAction::Set { mode } => {
            controller.set_theme(mode);
            mode
        }
        ThemeAction::Toggle => controller.toggle_theme(),
    };
    writeln!(out, "{mode}")?;
    Ok(())
}
