// Iterator: a product collection exposes sequential access without revealing
// how it stores its items.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

#[derive(Debug, Default)]
pub struct ProductCollection {
    items: Vec<Product>,
}

impl ProductCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, product: Product) {
        self.items.push(product);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> ProductIter<'_> {
        ProductIter {
            collection: self,
            position: 0,
        }
    }
}

/// Cursor over a borrowed collection.
pub struct ProductIter<'a> {
    collection: &'a ProductCollection,
    position: usize,
}

impl<'a> Iterator for ProductIter<'a> {
    type Item = &'a Product;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.collection.items.get(self.position)?;
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.collection.items.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProductIter<'_> {}

impl<'a> IntoIterator for &'a ProductCollection {
    type Item = &'a Product;
    type IntoIter = ProductIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ProductCollection {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Product> for ProductCollection {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let mut products = ProductCollection::new();
    products.add(Product::new("Laptop", 1200.0));
    products.add(Product::new("Phone", 800.0));
    products.add(Product::new("Headphones", 150.0));

    narrator.say(format_args!("Iterating over {} products:", products.len()));
    for product in &products {
        narrator.bullet(format_args!("{}: ${:.2}", product.name, product.price));
    }

    let total: f64 = products.iter().map(|p| p.price).sum();
    narrator.say(format_args!("Total: ${:.2}", total));

    let affordable: Vec<String> = products
        .into_iter()
        .filter(|p| p.price < 1000.0)
        .map(|p| p.name)
        .collect();
    narrator.say(format_args!("Under $1000: {}", affordable.join(", ")));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProductCollection {
        [
            Product::new("Laptop", 1200.0),
            Product::new("Phone", 800.0),
            Product::new("Headphones", 150.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_iterates_in_insertion_order() {
        let products = sample();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Laptop", "Phone", "Headphones"]);
    }

    #[test]
    fn test_exact_size() {
        let products = sample();
        let mut iter = products.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    #[test]
    fn test_empty_collection() {
        let products = ProductCollection::new();
        assert!(products.is_empty());
        assert_eq!(products.iter().next(), None);
    }
}
