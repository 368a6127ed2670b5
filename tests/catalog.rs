use design_patterns::catalog::{self, Family, CATALOG};
use design_patterns::{Narrator, PatternError, Settings};

#[test]
fn every_demo_runs_and_narrates() {
    let settings = Settings::for_tests();

    for demo in CATALOG {
        let narrator = Narrator::captured();
        catalog::run(demo, &narrator, &settings)
            .unwrap_or_else(|e| panic!("{} failed: {}", demo.name, e));

        let lines = narrator.lines();
        assert!(
            lines.len() > 4,
            "{} narrated only {} lines",
            demo.name,
            lines.len()
        );
        assert_eq!(lines[1], format!("=== {} Pattern ===", demo.title()));
    }
}

#[test]
fn families_partition_the_catalogue() {
    let total: usize = Family::ALL
        .iter()
        .map(|&family| catalog::by_family(family).count())
        .sum();
    assert_eq!(total, CATALOG.len());
}

#[test]
fn run_all_counts_demos() {
    let narrator = Narrator::captured();
    let ran = catalog::run_all(
        catalog::by_family(Family::Creational),
        &narrator,
        &Settings::for_tests(),
    )
    .unwrap();
    assert_eq!(ran, 5);
    assert!(narrator.contains("=== Singleton Pattern ==="));
}

#[test]
fn lookup_by_every_name() {
    for demo in CATALOG {
        let found = catalog::find(&demo.name.replace('-', "_").to_uppercase()).unwrap();
        assert_eq!(found.name, demo.name);
    }
    assert!(matches!(
        catalog::find("visitors"),
        Err(PatternError::UnknownDemo(_))
    ));
}

#[test]
fn flyweight_demo_is_deterministic_with_seed() {
    let settings = Settings::for_tests();
    let first = Narrator::captured();
    let second = Narrator::captured();

    catalog::run(catalog::find("flyweight").unwrap(), &first, &settings).unwrap();
    catalog::run(catalog::find("flyweight").unwrap(), &second, &settings).unwrap();
    assert_eq!(first.lines(), second.lines());
}
