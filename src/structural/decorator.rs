// Decorator: condiments wrap a coffee and add to its description and cost.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;

pub trait Coffee {
    fn description(&self) -> String;
    fn cost(&self) -> f64;
}

pub struct SimpleCoffee;

impl Coffee for SimpleCoffee {
    fn description(&self) -> String {
        "Simple coffee".to_string()
    }

    fn cost(&self) -> f64 {
        2.00
    }
}

pub struct Milk {
    inner: Box<dyn Coffee>,
}

impl Milk {
    pub fn new(inner: Box<dyn Coffee>) -> Self {
        Self { inner }
    }
}

impl Coffee for Milk {
    fn description(&self) -> String {
        format!("{}, milk", self.inner.description())
    }

    fn cost(&self) -> f64 {
        self.inner.cost() + 0.50
    }
}

pub struct Sugar {
    inner: Box<dyn Coffee>,
}

impl Sugar {
    pub fn new(inner: Box<dyn Coffee>) -> Self {
        Self { inner }
    }
}

impl Coffee for Sugar {
    fn description(&self) -> String {
        format!("{}, sugar", self.inner.description())
    }

    fn cost(&self) -> f64 {
        self.inner.cost() + 0.20
    }
}

pub struct Whip {
    inner: Box<dyn Coffee>,
}

impl Whip {
    pub fn new(inner: Box<dyn Coffee>) -> Self {
        Self { inner }
    }
}

impl Coffee for Whip {
    fn description(&self) -> String {
        format!("{}, whip", self.inner.description())
    }

    fn cost(&self) -> f64 {
        self.inner.cost() + 0.70
    }
}

fn serve(coffee: &dyn Coffee, narrator: &Narrator) {
    narrator.say(format_args!("{} -> ${:.2}", coffee.description(), coffee.cost()));
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let plain: Box<dyn Coffee> = Box::new(SimpleCoffee);
    serve(plain.as_ref(), narrator);

    let with_milk = Box::new(Milk::new(plain));
    serve(with_milk.as_ref(), narrator);

    let sweet = Box::new(Sugar::new(with_milk));
    serve(sweet.as_ref(), narrator);

    let deluxe = Whip::new(sweet);
    serve(&deluxe, narrator);

    narrator.blank();
    let double_milk = Milk::new(Box::new(Milk::new(Box::new(SimpleCoffee))));
    serve(&double_milk, narrator);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacked_costs() {
        let coffee = Whip::new(Box::new(Sugar::new(Box::new(Milk::new(Box::new(SimpleCoffee))))));
        assert!((coffee.cost() - 3.40).abs() < 1e-9);
        assert_eq!(coffee.description(), "Simple coffee, milk, sugar, whip");
    }

    #[test]
    fn test_same_decorator_twice() {
        let coffee = Sugar::new(Box::new(Sugar::new(Box::new(SimpleCoffee))));
        assert!((coffee.cost() - 2.40).abs() < 1e-9);
    }
}
