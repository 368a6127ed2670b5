// Structural Patterns
// Runs every structural demo in catalogue order.

use anyhow::Result;
use design_patterns::catalog::{self, Family};
use design_patterns::{telemetry, Narrator, Settings};

fn main() -> Result<()> {
    let settings = Settings::discover(None)?;
    telemetry::init(&settings.logging.level);
    Narrator::set_color(settings.narration.color);

    let narrator = Narrator::stdout();
    narrator.say("Structural Patterns");
    narrator.say("===================");
    narrator.blank();

    catalog::run_all(catalog::by_family(Family::Structural), &narrator, &settings)?;
    Ok(())
}
