// Creational Patterns
// Runs every creational demo in catalogue order.

use anyhow::Result;
use design_patterns::catalog::{self, Family};
use design_patterns::{telemetry, Narrator, Settings};

fn main() -> Result<()> {
    let settings = Settings::discover(None)?;
    telemetry::init(&settings.logging.level);
    Narrator::set_color(settings.narration.color);

    let narrator = Narrator::stdout();
    narrator.say("Creational Patterns");
    narrator.say("===================");
    narrator.blank();

    catalog::run_all(catalog::by_family(Family::Creational), &narrator, &settings)?;
    Ok(())
}
