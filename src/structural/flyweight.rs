// Flyweight: thousands of trees share a handful of immutable tree types.
// The factory is an explicit object owned by the caller; nothing is global.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

macro_rules! tree_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let label = match self {
                    $($name::$variant => $label),+
                };
                f.write_str(label)
            }
        }
    };
}

tree_enum!(TreeName {
    Oak => "OAK",
    Pine => "PINE",
    Birch => "BIRCH",
    Maple => "MAPLE",
    Willow => "WILLOW",
    Spruce => "SPRUCE",
});

tree_enum!(TreeColor {
    Green => "GREEN",
    DarkGreen => "DARK_GREEN",
    LightGreen => "LIGHT_GREEN",
    YellowGreen => "YELLOW_GREEN",
    BlueGreen => "BLUE_GREEN",
});

tree_enum!(TreeTexture {
    Bark => "BARK",
    Smooth => "SMOOTH",
    Rough => "ROUGH",
    Cracked => "CRACKED",
    Peeling => "PEELING",
});

pub type TreeKey = (TreeName, TreeColor, TreeTexture);

/// Intrinsic state, shared by every tree of this kind.
#[derive(Debug, PartialEq, Eq)]
pub struct TreeType {
    pub name: TreeName,
    pub color: TreeColor,
    pub texture: TreeTexture,
}

impl TreeType {
    pub fn key(&self) -> TreeKey {
        (self.name, self.color, self.texture)
    }

    pub fn draw(&self, canvas: &str, x: u32, y: u32, narrator: &Narrator) {
        narrator.say(format_args!(
            "   Drawing {} tree [{}, {}] at ({}, {}) on {}",
            self.name, self.color, self.texture, x, y, canvas
        ));
    }
}

impl fmt::Display for TreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.color, self.texture)
    }
}

// ============================================================================
// Factory
// ============================================================================

#[derive(Debug, Default)]
pub struct TreeFactory {
    types: HashMap<TreeKey, Rc<TreeType>>,
}

impl TreeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared type for this key, creating it on first request.
    pub fn get_tree_type(
        &mut self,
        name: TreeName,
        color: TreeColor,
        texture: TreeTexture,
    ) -> Rc<TreeType> {
        let key = (name, color, texture);
        if let Some(existing) = self.types.get(&key) {
            debug!(%name, %color, %texture, "tree type cache hit");
            return Rc::clone(existing);
        }

        let kind = Rc::new(TreeType {
            name,
            color,
            texture,
        });
        self.types.insert(key, Rc::clone(&kind));
        info!(%name, %color, %texture, total = self.types.len(), "tree type created");
        kind
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Forgets every cached type. Trees already planted keep theirs.
    pub fn clear(&mut self) {
        self.types.clear();
    }

    /// Cached types in key order.
    pub fn cached_types(&self) -> Vec<Rc<TreeType>> {
        let mut types: Vec<Rc<TreeType>> = self.types.values().cloned().collect();
        types.sort_by_key(|kind| kind.key());
        types
    }
}

// ============================================================================
// Context
// ============================================================================

#[derive(Debug, Clone)]
pub struct Tree {
    pub x: u32,
    pub y: u32,
    pub kind: Rc<TreeType>,
}

impl Tree {
    pub fn draw(&self, canvas: &str, narrator: &Narrator) {
        self.kind.draw(canvas, self.x, self.y, narrator);
    }
}

/// Rough per-object costs used for the savings estimate.
pub const BYTES_PER_UNSHARED_TREE: usize = 170;
pub const BYTES_PER_TYPE: usize = 12;
pub const BYTES_PER_TREE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    pub trees: usize,
    pub types: usize,
    pub without_sharing: usize,
    pub with_sharing: usize,
}

impl MemoryStats {
    pub fn saved(&self) -> usize {
        self.without_sharing.saturating_sub(self.with_sharing)
    }

    pub fn reduction_percent(&self) -> f64 {
        if self.without_sharing == 0 {
            return 0.0;
        }
        self.saved() as f64 / self.without_sharing as f64 * 100.0
    }
}

pub fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[derive(Debug, Default)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plant_tree(
        &mut self,
        factory: &mut TreeFactory,
        x: u32,
        y: u32,
        name: TreeName,
        color: TreeColor,
        texture: TreeTexture,
    ) -> &Tree {
        let kind = factory.get_tree_type(name, color, texture);
        self.trees.push(Tree { x, y, kind });
        &self.trees[self.trees.len() - 1]
    }

    /// Plants `count` trees at random coordinates in a 1000x1000 area with
    /// random kinds.
    pub fn plant_random(&mut self, factory: &mut TreeFactory, count: usize, rng: &mut impl Rng) {
        self.trees.reserve(count);
        for _ in 0..count {
            let x = rng.gen_range(0..1000);
            let y = rng.gen_range(0..1000);
            let name = TreeName::ALL[rng.gen_range(0..TreeName::ALL.len())];
            let color = TreeColor::ALL[rng.gen_range(0..TreeColor::ALL.len())];
            let texture = TreeTexture::ALL[rng.gen_range(0..TreeTexture::ALL.len())];
            self.plant_tree(factory, x, y, name, color, texture);
        }
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn draw(&self, canvas: &str, narrator: &Narrator) {
        narrator.say(format_args!("Drawing forest on {}:", canvas));
        for tree in &self.trees {
            tree.draw(canvas, narrator);
        }
    }

    pub fn memory_stats(&self, factory: &TreeFactory) -> MemoryStats {
        let trees = self.trees.len();
        let types = factory.type_count();
        MemoryStats {
            trees,
            types,
            without_sharing: trees * BYTES_PER_UNSHARED_TREE,
            with_sharing: types * BYTES_PER_TYPE + trees * BYTES_PER_TREE,
        }
    }
}

fn report(stats: &MemoryStats, narrator: &Narrator) {
    narrator.say("Memory statistics:");
    narrator.bullet(format_args!("Total trees: {}", stats.trees));
    narrator.bullet(format_args!("Unique tree types: {}", stats.types));
    narrator.bullet(format_args!(
        "Without sharing: ~{}",
        format_bytes(stats.without_sharing)
    ));
    narrator.bullet(format_args!("With sharing: ~{}", format_bytes(stats.with_sharing)));
    narrator.bullet(format_args!(
        "Saved: ~{} ({:.1}%)",
        format_bytes(stats.saved()),
        stats.reduction_percent()
    ));
}

fn list_types(factory: &TreeFactory, narrator: &Narrator) {
    narrator.say("Cached tree types:");
    for kind in factory.cached_types() {
        narrator.bullet(kind);
    }
}

pub fn demo(narrator: &Narrator, settings: &Settings) -> Result<()> {
    let mut factory = TreeFactory::new();

    narrator.section("Small forest, planted by hand");
    let mut forest = Forest::new();
    let plan = [
        (10, 20, TreeName::Oak, TreeColor::Green, TreeTexture::Bark),
        (30, 40, TreeName::Oak, TreeColor::Green, TreeTexture::Bark),
        (50, 60, TreeName::Oak, TreeColor::Green, TreeTexture::Bark),
        (70, 80, TreeName::Pine, TreeColor::DarkGreen, TreeTexture::Rough),
        (90, 100, TreeName::Pine, TreeColor::DarkGreen, TreeTexture::Rough),
        (110, 120, TreeName::Oak, TreeColor::LightGreen, TreeTexture::Bark),
        (130, 140, TreeName::Birch, TreeColor::LightGreen, TreeTexture::Smooth),
    ];
    for (x, y, name, color, texture) in plan {
        let before = factory.type_count();
        forest.plant_tree(&mut factory, x, y, name, color, texture);
        if factory.type_count() > before {
            narrator.say(format_args!(
                "  New tree type created and cached (total types: {})",
                factory.type_count()
            ));
        } else {
            narrator.say(format_args!(
                "  Reusing existing tree type (total types: {})",
                factory.type_count()
            ));
        }
    }
    list_types(&factory, narrator);
    forest.draw("Canvas1", narrator);
    report(&forest.memory_stats(&factory), narrator);

    let count = settings.flyweight.random_trees;
    narrator.section(&format!("Large forest, {} random trees", count));
    factory.clear();
    let mut rng = match settings.flyweight.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut large = Forest::new();
    large.plant_random(&mut factory, count, &mut rng);
    narrator.say(format_args!("Finished planting {} trees", large.tree_count()));
    report(&large.memory_stats(&factory), narrator);

    narrator.section("Verifying that types are shared");
    factory.clear();
    let oak1 = factory.get_tree_type(TreeName::Oak, TreeColor::Green, TreeTexture::Bark);
    let oak2 = factory.get_tree_type(TreeName::Oak, TreeColor::Green, TreeTexture::Bark);
    if Rc::ptr_eq(&oak1, &oak2) {
        narrator.say("oak1 and oak2 are the same object in memory");
    } else {
        narrator.say("oak1 and oak2 are different objects (sharing is broken)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_identical_keys_share_one_type() {
        let mut factory = TreeFactory::new();
        let mut forest = Forest::new();
        for i in 0..3 {
            forest.plant_tree(&mut factory, i, i, TreeName::Oak, TreeColor::Green, TreeTexture::Bark);
        }

        assert_eq!(factory.type_count(), 1);
        assert_eq!(forest.tree_count(), 3);
        let trees = forest.trees();
        assert!(Rc::ptr_eq(&trees[0].kind, &trees[2].kind));
    }

    #[test]
    fn test_clear_keeps_planted_trees_intact() {
        let mut factory = TreeFactory::new();
        let mut forest = Forest::new();
        forest.plant_tree(&mut factory, 1, 2, TreeName::Pine, TreeColor::DarkGreen, TreeTexture::Rough);

        factory.clear();
        assert_eq!(factory.type_count(), 0);
        assert_eq!(forest.trees()[0].kind.name, TreeName::Pine);

        let fresh = factory.get_tree_type(TreeName::Pine, TreeColor::DarkGreen, TreeTexture::Rough);
        assert!(!Rc::ptr_eq(&fresh, &forest.trees()[0].kind));
    }

    #[test]
    fn test_memory_stats() {
        let mut factory = TreeFactory::new();
        let mut forest = Forest::new();
        for i in 0..3 {
            forest.plant_tree(&mut factory, i, i, TreeName::Oak, TreeColor::Green, TreeTexture::Bark);
        }
        let stats = forest.memory_stats(&factory);
        assert_eq!(stats.without_sharing, 510);
        assert_eq!(stats.with_sharing, 12 + 36);
        assert_eq!(stats.saved(), 462);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(1_700_000), "1.62 MB");
    }

    #[test]
    fn test_seeded_planting_is_reproducible() {
        let plant = |seed| {
            let mut factory = TreeFactory::new();
            let mut forest = Forest::new();
            forest.plant_random(&mut factory, 50, &mut StdRng::seed_from_u64(seed));
            forest
                .trees()
                .iter()
                .map(|t| (t.x, t.y, t.kind.key()))
                .collect::<Vec<_>>()
        };
        assert_eq!(plant(42), plant(42));
    }

    #[test]
    fn test_random_forest_types_bounded_by_combinations() {
        let mut factory = TreeFactory::new();
        let mut forest = Forest::new();
        forest.plant_random(&mut factory, 2000, &mut StdRng::seed_from_u64(1));

        let max = TreeName::ALL.len() * TreeColor::ALL.len() * TreeTexture::ALL.len();
        assert!(factory.type_count() <= max);
        assert_eq!(forest.tree_count(), 2000);
    }

    fn key() -> impl Strategy<Value = TreeKey> {
        (
            prop::sample::select(TreeName::ALL.to_vec()),
            prop::sample::select(TreeColor::ALL.to_vec()),
            prop::sample::select(TreeTexture::ALL.to_vec()),
        )
    }

    proptest! {
        #[test]
        fn prop_instances_match_distinct_keys(keys in prop::collection::vec(key(), 0..200)) {
            let mut factory = TreeFactory::new();
            let mut forest = Forest::new();
            for (i, (name, color, texture)) in keys.iter().enumerate() {
                forest.plant_tree(&mut factory, i as u32, 0, *name, *color, *texture);
            }

            let distinct: HashSet<TreeKey> = keys.iter().copied().collect();
            prop_assert_eq!(factory.type_count(), distinct.len());
            prop_assert_eq!(forest.tree_count(), keys.len());

            for tree in forest.trees() {
                let (name, color, texture) = tree.kind.key();
                let cached = factory.get_tree_type(name, color, texture);
                prop_assert!(Rc::ptr_eq(&cached, &tree.kind));
            }
        }
    }
}
