// Builder: a director drives a step-by-step builder; the builder decides
// what each part looks like.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    pub part_a: Option<String>,
    pub part_b: Option<String>,
    pub part_c: Option<String>,
}

impl Product {
    /// Built parts in order; unbuilt parts are skipped.
    pub fn parts(&self) -> Vec<&str> {
        [&self.part_a, &self.part_b, &self.part_c]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect()
    }

    pub fn show_parts(&self, narrator: &Narrator) {
        narrator.say("Product parts:");
        for part in self.parts() {
            narrator.bullet(part);
        }
    }
}

pub trait ProductBuilder {
    fn build_part_a(&mut self);
    fn build_part_b(&mut self);
    fn build_part_c(&mut self);

    /// Hands over the product and leaves the builder ready for a new one.
    fn finish(&mut self) -> Product;
}

#[derive(Debug, Default)]
pub struct ConcreteProductBuilder {
    product: Product,
}

impl ProductBuilder for ConcreteProductBuilder {
    fn build_part_a(&mut self) {
        self.product.part_a = Some("PartA built by ConcreteProductBuilder".to_string());
    }

    fn build_part_b(&mut self) {
        self.product.part_b = Some("PartB built by ConcreteProductBuilder".to_string());
    }

    fn build_part_c(&mut self) {
        self.product.part_c = Some("PartC built by ConcreteProductBuilder".to_string());
    }

    fn finish(&mut self) -> Product {
        std::mem::take(&mut self.product)
    }
}

pub struct Director<B: ProductBuilder> {
    builder: B,
}

impl<B: ProductBuilder> Director<B> {
    pub fn new(builder: B) -> Self {
        Self { builder }
    }

    pub fn construct(&mut self) -> Product {
        self.builder.build_part_a();
        self.builder.build_part_b();
        self.builder.build_part_c();
        self.builder.finish()
    }

    pub fn construct_minimal(&mut self) -> Product {
        self.builder.build_part_a();
        self.builder.finish()
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let mut director = Director::new(ConcreteProductBuilder::default());

    narrator.say("Full product:");
    director.construct().show_parts(narrator);

    narrator.blank();
    narrator.say("Minimal product:");
    director.construct_minimal().show_parts(narrator);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_construction() {
        let mut director = Director::new(ConcreteProductBuilder::default());
        let product = director.construct();
        assert_eq!(product.parts().len(), 3);
        assert_eq!(
            product.part_b.as_deref(),
            Some("PartB built by ConcreteProductBuilder")
        );
    }

    #[test]
    fn test_builder_resets_between_products() {
        let mut director = Director::new(ConcreteProductBuilder::default());
        director.construct();

        let minimal = director.construct_minimal();
        assert!(minimal.part_a.is_some());
        assert_eq!(minimal.part_b, None);
        assert_eq!(minimal.part_c, None);
    }

    #[test]
    fn test_show_parts_narrates_built_parts_only() {
        let narrator = Narrator::captured();
        let mut director = Director::new(ConcreteProductBuilder::default());
        director.construct_minimal().show_parts(&narrator);
        assert_eq!(narrator.count("built by"), 1);
    }
}
