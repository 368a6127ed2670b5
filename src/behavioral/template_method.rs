// Template Method: one fixed preparation algorithm, parameterized by the
// steps a recipe supplies.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    BoilWater,
    Brew,
    Pour,
    Condiments,
    Extras,
    Serve,
}

/// The capabilities a beverage plugs into [`prepare`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: &'static str,
    pub brew: &'static str,
    pub condiments: &'static str,
    pub extras: Option<&'static str>,
    pub wants_extras: bool,
}

impl Recipe {
    pub fn tea() -> Self {
        Self {
            name: "Tea",
            brew: "Steeping the tea bag...",
            condiments: "Adding lemon",
            extras: Some("Adding a spoonful of honey"),
            wants_extras: true,
        }
    }

    pub fn coffee() -> Self {
        Self {
            name: "Coffee",
            brew: "Dripping coffee through the filter...",
            condiments: "Adding sugar and milk",
            extras: None,
            wants_extras: false,
        }
    }

    pub fn hot_chocolate() -> Self {
        Self {
            name: "Hot Chocolate",
            brew: "Mixing cocoa powder...",
            condiments: "Adding milk and vanilla",
            extras: Some("Topping with marshmallows and whipped cream"),
            wants_extras: true,
        }
    }
}

/// Runs the fixed skeleton and returns the steps that were performed.
/// Extras run only when the recipe both has them and wants them.
pub fn prepare(recipe: &Recipe, narrator: &Narrator) -> Vec<Step> {
    let mut steps = Vec::with_capacity(6);
    narrator.say(format_args!("Preparing {}:", recipe.name));

    narrator.bullet("Boiling water");
    steps.push(Step::BoilWater);

    narrator.bullet(recipe.brew);
    steps.push(Step::Brew);

    narrator.bullet("Pouring into cup");
    steps.push(Step::Pour);

    narrator.bullet(recipe.condiments);
    steps.push(Step::Condiments);

    if let (true, Some(extras)) = (recipe.wants_extras, recipe.extras) {
        narrator.bullet(extras);
        steps.push(Step::Extras);
    }

    narrator.bullet(format_args!("{} is ready. Enjoy!", recipe.name));
    steps.push(Step::Serve);

    debug!(recipe = recipe.name, steps = steps.len(), "prepared");
    steps
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    for recipe in [Recipe::tea(), Recipe::coffee(), Recipe::hot_chocolate()] {
        narrator.blank();
        prepare(&recipe, narrator);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_order_is_fixed() {
        let narrator = Narrator::captured();
        let steps = prepare(&Recipe::coffee(), &narrator);
        assert_eq!(
            steps,
            vec![
                Step::BoilWater,
                Step::Brew,
                Step::Pour,
                Step::Condiments,
                Step::Serve
            ]
        );
        assert!(narrator.contains("Dripping coffee through the filter"));
    }

    #[test]
    fn test_extras_hook() {
        let narrator = Narrator::captured();
        let steps = prepare(&Recipe::tea(), &narrator);
        assert_eq!(steps[4], Step::Extras);
        assert!(narrator.contains("honey"));
    }

    #[test]
    fn test_declined_extras_are_skipped() {
        let narrator = Narrator::captured();
        let recipe = Recipe {
            wants_extras: false,
            ..Recipe::hot_chocolate()
        };
        let steps = prepare(&recipe, &narrator);
        assert!(!steps.contains(&Step::Extras));
        assert!(!narrator.contains("marshmallows"));
    }
}
