// Catalogue: every demo by name and family, plus lookup and a runner that
// prints the heading before handing over to the demo.

use crate::config::Settings;
use crate::error::{PatternError, Result};
use crate::narration::Narrator;
use crate::{behavioral, creational, structural};
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Family {
    Creational,
    Structural,
    Behavioral,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Creational, Family::Structural, Family::Behavioral];
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Creational => "Creational",
            Family::Structural => "Structural",
            Family::Behavioral => "Behavioral",
        };
        f.write_str(name)
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "creational" => Ok(Family::Creational),
            "structural" => Ok(Family::Structural),
            "behavioral" | "behavioural" => Ok(Family::Behavioral),
            other => Err(format!("unknown pattern family '{}'", other)),
        }
    }
}

pub type DemoFn = fn(&Narrator, &Settings) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Demo {
    pub name: &'static str,
    pub family: Family,
    pub summary: &'static str,
    pub run: DemoFn,
}

impl fmt::Debug for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Demo")
            .field("name", &self.name)
            .field("family", &self.family)
            .finish()
    }
}

impl Demo {
    /// "chain-of-responsibility" -> "Chain Of Responsibility"
    pub fn title(&self) -> String {
        self.name
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

const fn demo(name: &'static str, family: Family, summary: &'static str, run: DemoFn) -> Demo {
    Demo {
        name,
        family,
        summary,
        run,
    }
}

pub static CATALOG: &[Demo] = &[
    demo(
        "abstract-factory",
        Family::Creational,
        "Mac and Windows factories build matching widget families",
        creational::abstract_factory::demo,
    ),
    demo(
        "builder",
        Family::Creational,
        "A director drives a step builder to full and minimal products",
        creational::builder::demo,
    ),
    demo(
        "factory-method",
        Family::Creational,
        "Creator subtypes decide which product to instantiate",
        creational::factory_method::demo,
    ),
    demo(
        "prototype",
        Family::Creational,
        "Game characters cloned from a configured prototype",
        creational::prototype::demo,
    ),
    demo(
        "singleton",
        Family::Creational,
        "A lazily created app config shared by every caller",
        creational::singleton::demo,
    ),
    demo(
        "adapter",
        Family::Structural,
        "An audio player plays VLC and MP4 through a media adapter",
        structural::adapter::demo,
    ),
    demo(
        "bridge",
        Family::Structural,
        "Payment processors and payment methods vary independently",
        structural::bridge::demo,
    ),
    demo(
        "composite",
        Family::Structural,
        "Items and bundles of items priced through one interface",
        structural::composite::demo,
    ),
    demo(
        "decorator",
        Family::Structural,
        "Condiments wrap a coffee and add to its cost",
        structural::decorator::demo,
    ),
    demo(
        "facade",
        Family::Structural,
        "One home theater object drives four subsystems",
        structural::facade::demo,
    ),
    demo(
        "flyweight",
        Family::Structural,
        "A forest shares tree types between thousands of trees",
        structural::flyweight::demo,
    ),
    demo(
        "proxy",
        Family::Structural,
        "A proxy image loads the real one on first display",
        structural::proxy::demo,
    ),
    demo(
        "chain-of-responsibility",
        Family::Behavioral,
        "Support tickets travel up a chain of tiers",
        behavioral::chain::demo,
    ),
    demo(
        "command",
        Family::Behavioral,
        "A remote control with slots, history and undo",
        behavioral::command::demo,
    ),
    demo(
        "iterator",
        Family::Behavioral,
        "A product collection walked with custom iterators",
        behavioral::iterator::demo,
    ),
    demo(
        "mediator",
        Family::Behavioral,
        "Chat users talk only through a room",
        behavioral::mediator::demo,
    ),
    demo(
        "memento",
        Family::Behavioral,
        "An editor saves and restores snapshots of its text",
        behavioral::memento::demo,
    ),
    demo(
        "observer",
        Family::Behavioral,
        "Weather displays react to new measurements",
        behavioral::observer::demo,
    ),
    demo(
        "state",
        Family::Behavioral,
        "A bank account changes rules as its tier changes",
        behavioral::state::demo,
    ),
    demo(
        "strategy",
        Family::Behavioral,
        "A shopping cart pays with a swappable strategy",
        behavioral::strategy::demo,
    ),
    demo(
        "template-method",
        Family::Behavioral,
        "Hot beverages share one preparation skeleton",
        behavioral::template_method::demo,
    ),
    demo(
        "visitor",
        Family::Behavioral,
        "Price, spec and upgrade visitors walk computer parts",
        behavioral::visitor::demo,
    ),
];

/// Case-insensitive lookup; `_` and spaces count as `-`.
pub fn find(name: &str) -> Result<&'static Demo> {
    let wanted: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect();

    CATALOG
        .iter()
        .find(|demo| demo.name == wanted)
        .or_else(|| match wanted.as_str() {
            "chain" => CATALOG.iter().find(|demo| demo.name == "chain-of-responsibility"),
            _ => None,
        })
        .ok_or_else(|| PatternError::UnknownDemo(name.to_string()))
}

pub fn by_family(family: Family) -> impl Iterator<Item = &'static Demo> {
    CATALOG.iter().filter(move |demo| demo.family == family)
}

pub fn run(demo: &Demo, narrator: &Narrator, settings: &Settings) -> Result<()> {
    info!(demo = demo.name, family = %demo.family, "running demo");
    narrator.heading(&format!("{} Pattern", demo.title()));
    (demo.run)(narrator, settings)?;
    narrator.blank();
    Ok(())
}

/// Runs each demo in turn, stopping at the first error.
pub fn run_all<'a>(
    demos: impl IntoIterator<Item = &'a Demo>,
    narrator: &Narrator,
    settings: &Settings,
) -> Result<usize> {
    let mut ran = 0;
    for demo in demos {
        run(demo, narrator, settings)?;
        ran += 1;
    }
    Ok(ran)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = CATALOG.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), CATALOG.len());
        assert_eq!(CATALOG.len(), 22);
    }

    #[test]
    fn test_family_sizes() {
        assert_eq!(by_family(Family::Creational).count(), 5);
        assert_eq!(by_family(Family::Structural).count(), 7);
        assert_eq!(by_family(Family::Behavioral).count(), 10);
    }

    #[test]
    fn test_find_is_forgiving() {
        assert_eq!(find("Template_Method").unwrap().name, "template-method");
        assert_eq!(find("  proxy ").unwrap().name, "proxy");
        assert_eq!(find("chain").unwrap().name, "chain-of-responsibility");
    }

    #[test]
    fn test_find_unknown() {
        let err = find("interpreter").unwrap_err();
        assert!(matches!(err, PatternError::UnknownDemo(ref n) if n == "interpreter"));
    }

    #[test]
    fn test_title() {
        assert_eq!(find("chain").unwrap().title(), "Chain Of Responsibility");
        assert_eq!(find("facade").unwrap().title(), "Facade");
    }

    #[test]
    fn test_family_parse() {
        assert_eq!("Structural".parse::<Family>(), Ok(Family::Structural));
        assert!("functional".parse::<Family>().is_err());
        assert_eq!(Family::Behavioral.to_string(), "Behavioral");
    }

    #[test]
    fn test_run_prints_heading() {
        let narrator = Narrator::captured();
        run(find("decorator").unwrap(), &narrator, &Settings::for_tests()).unwrap();
        assert_eq!(narrator.lines()[1], "=== Decorator Pattern ===");
        assert!(narrator.contains("Simple coffee"));
    }
}
