use scribe_core::view::Command;

use crate::commands::common::{parse_date, App};
use crate::commands::show::print_screen;
use crate::error::CliError;

pub fn run_home(app: &mut App) -> Result<(), CliError> {
    app.apply(Command::SelectHome)?;
    print_screen(&app.screen()?);
    Ok(())
}

/// Date view for the given `YYYY-MM-DD`, or today
pub fn run_date(app: &mut App, date: Option<&str>) -> Result<(), CliError> {
    let command = match date {
        Some(value) => Command::PickDate(parse_date(value)?),
        None => Command::ShowDateView,
    };

    app.apply(command)?;
    print_screen(&app.screen()?);
    Ok(())
}
