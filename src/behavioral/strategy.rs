// Strategy: the cart delegates checkout to whichever payment strategy is
// currently plugged in.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub method: &'static str,
    pub amount: f64,
}

pub trait PaymentStrategy {
    fn name(&self) -> &'static str;
    fn pay(&self, amount: f64, narrator: &Narrator) -> Payment;
}

pub struct CreditCardPayment {
    card_number: String,
    #[allow(dead_code)]
    cvv: String,
}

impl CreditCardPayment {
    pub fn new(card_number: impl Into<String>, cvv: impl Into<String>) -> Self {
        Self {
            card_number: card_number.into(),
            cvv: cvv.into(),
        }
    }

    /// `**** **** **** 3456` for any card of at least four digits.
    pub fn masked(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().collect();
        let last4: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("**** **** **** {}", last4)
    }
}

impl PaymentStrategy for CreditCardPayment {
    fn name(&self) -> &'static str {
        "Credit Card"
    }

    fn pay(&self, amount: f64, narrator: &Narrator) -> Payment {
        narrator.say(format_args!(
            "Paid ${:.2} using Credit Card ({})",
            amount,
            self.masked()
        ));
        Payment {
            method: self.name(),
            amount,
        }
    }
}

pub struct PayPalPayment {
    email: String,
    #[allow(dead_code)]
    password: String,
}

impl PayPalPayment {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl PaymentStrategy for PayPalPayment {
    fn name(&self) -> &'static str {
        "PayPal"
    }

    fn pay(&self, amount: f64, narrator: &Narrator) -> Payment {
        narrator.say(format_args!(
            "Paid ${:.2} using PayPal (account: {})",
            amount, self.email
        ));
        Payment {
            method: self.name(),
            amount,
        }
    }
}

pub struct BitcoinPayment {
    wallet: String,
}

impl BitcoinPayment {
    pub fn new(wallet: impl Into<String>) -> Self {
        Self {
            wallet: wallet.into(),
        }
    }

    /// First ten characters of the wallet followed by `...`.
    pub fn short_wallet(&self) -> String {
        let head: String = self.wallet.chars().take(10).collect();
        format!("{}...", head)
    }
}

impl PaymentStrategy for BitcoinPayment {
    fn name(&self) -> &'static str {
        "Bitcoin"
    }

    fn pay(&self, amount: f64, narrator: &Narrator) -> Payment {
        narrator.say(format_args!(
            "Paid ${:.2} using Bitcoin (wallet: {})",
            amount,
            self.short_wallet()
        ));
        Payment {
            method: self.name(),
            amount,
        }
    }
}

// ============================================================================
// Context
// ============================================================================

pub struct ShoppingCart {
    amount: f64,
    strategy: Option<Box<dyn PaymentStrategy>>,
    narrator: Narrator,
}

impl ShoppingCart {
    pub fn new(amount: f64, narrator: Narrator) -> Self {
        Self {
            amount,
            strategy: None,
            narrator,
        }
    }

    pub fn set_payment_strategy(&mut self, strategy: impl PaymentStrategy + 'static) {
        self.strategy = Some(Box::new(strategy));
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// `None` when no strategy has been chosen yet.
    pub fn checkout(&self) -> Option<Payment> {
        match &self.strategy {
            Some(strategy) => Some(strategy.pay(self.amount, &self.narrator)),
            None => {
                warn!(amount = self.amount, "checkout without a payment method");
                self.narrator.say("Please select a payment method!");
                None
            }
        }
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let mut cart = ShoppingCart::new(150.00, narrator.clone());

    narrator.say("Checkout before choosing a payment method:");
    cart.checkout();

    narrator.section("Paying with a credit card");
    cart.set_payment_strategy(CreditCardPayment::new("1234567890123456", "123"));
    cart.checkout();

    narrator.section("Switching to PayPal");
    cart.set_payment_strategy(PayPalPayment::new("user@example.com", "password"));
    cart.checkout();

    narrator.section("Switching to Bitcoin");
    cart.set_payment_strategy(BitcoinPayment::new("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"));
    cart.checkout();

    Ok(())
}
