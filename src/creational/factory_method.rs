// Factory Method: creators share `perform_action` but each decides which
// product it builds.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;

pub trait Product {
    fn name(&self) -> &'static str;
    fn use_product(&self, narrator: &Narrator);
}

pub struct ProductA;

impl Product for ProductA {
    fn name(&self) -> &'static str {
        "ProductA"
    }

    fn use_product(&self, narrator: &Narrator) {
        narrator.say("  Using ProductA");
    }
}

pub struct ProductB;

impl Product for ProductB {
    fn name(&self) -> &'static str {
        "ProductB"
    }

    fn use_product(&self, narrator: &Narrator) {
        narrator.say("  Using ProductB");
    }
}

pub trait Creator {
    fn create_product(&self) -> Box<dyn Product>;

    /// Creates a product and uses it. Returns the product's name.
    fn perform_action(&self, narrator: &Narrator) -> &'static str {
        let product = self.create_product();
        product.use_product(narrator);
        product.name()
    }
}

pub struct CreatorA;

impl Creator for CreatorA {
    fn create_product(&self) -> Box<dyn Product> {
        Box::new(ProductA)
    }
}

pub struct CreatorB;

impl Creator for CreatorB {
    fn create_product(&self) -> Box<dyn Product> {
        Box::new(ProductB)
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let creators: [(&str, Box<dyn Creator>); 2] =
        [("CreatorA", Box::new(CreatorA)), ("CreatorB", Box::new(CreatorB))];

    for (label, creator) in &creators {
        narrator.say(format_args!("Using {}:", label));
        creator.perform_action(narrator);
    }
    Ok(())
}
