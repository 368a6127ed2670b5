// Composite: catalogue items and bundles of items share one interface, so a
// whole home-office setup prices itself the same way a mouse does.

use crate::config::Settings;
use crate::error::{PatternError, Result};
use crate::narration::Narrator;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub name: String,
    children: Vec<Component>,
}

impl Composite {
    pub fn children(&self) -> &[Component] {
        &self.children
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Leaf(Leaf),
    Composite(Composite),
}

impl Component {
    pub fn leaf(name: impl Into<String>, price: f64) -> Self {
        Component::Leaf(Leaf {
            name: name.into(),
            price,
        })
    }

    pub fn composite(name: impl Into<String>) -> Self {
        Component::Composite(Composite {
            name: name.into(),
            children: Vec::new(),
        })
    }

    /// Builder-style `add` for assembling trees in one expression.
    pub fn with(mut self, child: Component) -> Result<Self> {
        self.add(child)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        match self {
            Component::Leaf(leaf) => &leaf.name,
            Component::Composite(group) => &group.name,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Component::Composite(_))
    }

    pub fn total_price(&self) -> f64 {
        match self {
            Component::Leaf(leaf) => leaf.price,
            Component::Composite(group) => group.children.iter().map(Component::total_price).sum(),
        }
    }

    /// Zero for leaves.
    pub fn child_count(&self) -> usize {
        match self {
            Component::Leaf(_) => 0,
            Component::Composite(group) => group.children.len(),
        }
    }

    pub fn add(&mut self, child: Component) -> Result<()> {
        let group = self.as_group_mut("add")?;
        debug!(parent = %group.name, child = child.name(), "child added");
        group.children.push(child);
        Ok(())
    }

    /// Removes the first direct child with this name. `Ok(None)` when no
    /// child matches.
    pub fn remove(&mut self, name: &str) -> Result<Option<Component>> {
        let group = self.as_group_mut("remove")?;
        let removed = group
            .children
            .iter()
            .position(|child| child.name() == name)
            .map(|pos| group.children.remove(pos));
        Ok(removed)
    }

    pub fn child(&self, index: usize) -> Result<&Component> {
        match self {
            Component::Leaf(leaf) => Err(PatternError::unsupported("child", leaf.name.as_str())),
            Component::Composite(group) => group
                .children
                .get(index)
                .ok_or_else(|| PatternError::out_of_bounds(index, group.children.len())),
        }
    }

    pub fn child_mut(&mut self, index: usize) -> Result<&mut Component> {
        let group = self.as_group_mut("child_mut")?;
        let len = group.children.len();
        group
            .children
            .get_mut(index)
            .ok_or_else(|| PatternError::out_of_bounds(index, len))
    }

    /// Narrates the tree, one line per node, indented by depth.
    pub fn operation(&self, narrator: &Narrator) {
        self.narrate(narrator, 0);
    }

    fn narrate(&self, narrator: &Narrator, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Component::Leaf(leaf) => {
                narrator.say(format_args!("{}- {} (${:.2})", indent, leaf.name, leaf.price));
            }
            Component::Composite(group) => {
                narrator.say(format_args!("{}{}:", indent, group.name));
                for child in &group.children {
                    child.narrate(narrator, depth + 1);
                }
            }
        }
    }

    fn as_group_mut(&mut self, operation: &'static str) -> Result<&mut Composite> {
        match self {
            Component::Leaf(leaf) => Err(PatternError::unsupported(operation, leaf.name.as_str())),
            Component::Composite(group) => Ok(group),
        }
    }
}

fn home_office() -> Result<Component> {
    let peripherals = Component::composite("Computer Peripherals")
        .with(Component::leaf("Wireless Mouse", 25.99))?
        .with(Component::leaf("Mechanical Keyboard", 79.99))?
        .with(Component::leaf("27\" Monitor", 299.99))?
        .with(Component::leaf("HDMI Cable", 12.99))?;

    let pc = Component::composite("PC Components")
        .with(Component::leaf("Intel i7 Processor", 349.99))?
        .with(Component::leaf("16GB RAM", 89.99))?
        .with(Component::leaf("512GB SSD", 69.99))?
        .with(Component::leaf("ATX Motherboard", 159.99))?;

    let furniture = Component::composite("Office Furniture")
        .with(Component::leaf("Ergonomic Chair", 249.99))?
        .with(Component::leaf("Standing Desk", 399.99))?
        .with(Component::leaf("LED Desk Lamp", 39.99))?;

    Component::composite("Complete Home Office Setup")
        .with(peripherals)?
        .with(pc)?
        .with(furniture)
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let mut setup = home_office()?;

    narrator.section("Product catalog");
    setup.operation(narrator);

    narrator.section("Price calculation");
    for i in 0..setup.child_count() {
        let group = setup.child(i)?;
        narrator.say(format_args!("{} total: ${:.2}", group.name(), group.total_price()));
    }
    narrator.say(format_args!("{} total: ${:.2}", setup.name(), setup.total_price()));

    narrator.section("Uniform treatment");
    let mouse = setup.child(0)?.child(0)?.clone();
    let peripherals = setup.child(0)?.clone();
    for item in [&mouse, &peripherals] {
        narrator.say(format_args!(
            "Processing: {} (composite: {})",
            item.name(),
            item.is_composite()
        ));
        item.operation(narrator);
    }

    narrator.section("Dynamic modification");
    let peripherals = setup.child_mut(0)?;
    narrator.say("Adding webcam to peripherals...");
    peripherals.add(Component::leaf("HD Webcam", 59.99))?;
    narrator.say(format_args!("New peripherals total: ${:.2}", peripherals.total_price()));

    narrator.say("Removing HDMI cable from peripherals...");
    peripherals.remove("HDMI Cable")?;
    narrator.say(format_args!(
        "Updated peripherals total: ${:.2}",
        peripherals.total_price()
    ));
    peripherals.operation(narrator);

    narrator.section("Leaf boundaries");
    let mut mouse = mouse;
    if let Err(err) = mouse.add(Component::leaf("Mouse pad", 9.99)) {
        narrator.say(format_args!("Rejected: {}", err));
    }

    narrator.section("Accessing children");
    let pc = setup.child(1)?;
    narrator.say(format_args!("Items in {}: {}", pc.name(), pc.child_count()));
    narrator.say(format_args!("First item: {}", pc.child(0)?.name()));

    Ok(())
}
