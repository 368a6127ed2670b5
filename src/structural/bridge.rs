// Bridge: payment processors (one-time, recurring) and payment methods
// (card, PayPal, crypto) vary independently; a processor holds whichever
// method it was given and can swap it at runtime.

use crate::config::{LatencySettings, Settings};
use crate::error::Result;
use crate::narration::Narrator;
use chrono::{Days, Local, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub method: &'static str,
    pub amount: f64,
}

fn millis_now() -> i64 {
    Local::now().timestamp_millis()
}

// ============================================================================
// Implementor: payment methods
// ============================================================================

pub trait PaymentMethod {
    fn name(&self) -> &'static str;
    fn max_amount(&self) -> f64;

    /// Rejects non-positive amounts and amounts above the method's limit,
    /// narrating the reason.
    fn validate(&self, amount: f64, narrator: &Narrator) -> bool {
        if amount <= 0.0 {
            narrator.say("   Invalid amount");
            return false;
        }
        if amount > self.max_amount() {
            narrator.say(format_args!(
                "   Amount exceeds {} limit (${:.2})",
                self.name(),
                self.max_amount()
            ));
            return false;
        }
        true
    }

    fn pay(&self, amount: f64, narrator: &Narrator) -> Transaction;
}

pub struct CreditCard {
    delay: Duration,
}

impl CreditCard {
    pub const LIMIT: f64 = 50_000.0;

    pub fn new(latency: &LatencySettings) -> Self {
        Self {
            delay: latency.delay(latency.card_ms),
        }
    }
}

impl PaymentMethod for CreditCard {
    fn name(&self) -> &'static str {
        "Credit Card"
    }

    fn max_amount(&self) -> f64 {
        Self::LIMIT
    }

    fn pay(&self, amount: f64, narrator: &Narrator) -> Transaction {
        narrator.say("CREDIT CARD PAYMENT");
        narrator.say(format_args!("   Amount: ${:.2}", amount));
        narrator.say("   Checking available credit and authorizing...");
        thread::sleep(self.delay);

        let id = format!("CC-{}", millis_now() % 1_000_000);
        narrator.say(format_args!("   Credit card payment successful! Transaction ID: {}", id));
        Transaction {
            id,
            method: self.name(),
            amount,
        }
    }
}

pub struct PayPal {
    delay: Duration,
}

impl PayPal {
    pub const LIMIT: f64 = 100_000.0;

    pub fn new(latency: &LatencySettings) -> Self {
        Self {
            delay: latency.delay(latency.paypal_ms),
        }
    }
}

impl PaymentMethod for PayPal {
    fn name(&self) -> &'static str {
        "PayPal"
    }

    fn max_amount(&self) -> f64 {
        Self::LIMIT
    }

    fn pay(&self, amount: f64, narrator: &Narrator) -> Transaction {
        narrator.say("PAYPAL PAYMENT");
        narrator.say(format_args!("   Amount: ${:.2}", amount));
        narrator.say("   Authenticating account and processing through gateway...");
        thread::sleep(self.delay);

        let id = format!("PP-{}", millis_now() % 1_000_000);
        narrator.say(format_args!("   PayPal payment successful! Transaction ID: {}", id));
        narrator.say("   Confirmation email sent to PayPal account");
        Transaction {
            id,
            method: self.name(),
            amount,
        }
    }
}

pub struct Crypto {
    delay: Duration,
}

impl Crypto {
    pub const LIMIT: f64 = 1_000_000.0;
    pub const RECOMMENDED_MIN: f64 = 1.0;

    pub fn new(latency: &LatencySettings) -> Self {
        Self {
            delay: latency.delay(latency.crypto_ms),
        }
    }
}

impl PaymentMethod for Crypto {
    fn name(&self) -> &'static str {
        "Cryptocurrency"
    }

    fn max_amount(&self) -> f64 {
        Self::LIMIT
    }

    /// Same limits as the other methods, plus a non-fatal warning for dust
    /// amounts.
    fn validate(&self, amount: f64, narrator: &Narrator) -> bool {
        if amount <= 0.0 {
            narrator.say("   Invalid amount");
            return false;
        }
        if amount > Self::LIMIT {
            narrator.say(format_args!(
                "   Amount exceeds crypto transaction limit (${:.2})",
                Self::LIMIT
            ));
            return false;
        }
        if amount < Self::RECOMMENDED_MIN {
            narrator.say("   Warning: Amount below minimum recommended ($1.00)");
        }
        true
    }

    fn pay(&self, amount: f64, narrator: &Narrator) -> Transaction {
        narrator.say("CRYPTOCURRENCY PAYMENT");
        narrator.say(format_args!("   Amount: ${:.2}", amount));
        narrator.say("   Broadcasting to blockchain network...");
        thread::sleep(self.delay);

        let id = format!("0x{:X}", millis_now());
        narrator.say(format_args!("   Cryptocurrency payment successful! TX Hash: {}", id));
        Transaction {
            id,
            method: self.name(),
            amount,
        }
    }
}

// ============================================================================
// Abstraction: payment processors
// ============================================================================

pub trait PaymentProcessor {
    fn method(&self) -> &dyn PaymentMethod;
    fn set_payment_method(&mut self, method: Box<dyn PaymentMethod>);
    fn process_payment(&mut self, amount: f64) -> bool;

    fn method_name(&self) -> &'static str {
        self.method().name()
    }
}

fn validate_payment(method: &dyn PaymentMethod, amount: f64, narrator: &Narrator) -> bool {
    narrator.say("Validating payment...");
    let ok = method.validate(amount, narrator);
    if !ok {
        warn!(method = method.name(), amount, "payment rejected");
        narrator.say("Payment validation failed!");
    }
    ok
}

pub struct OnlinePayment {
    method: Box<dyn PaymentMethod>,
    receipts: Vec<Transaction>,
    narrator: Narrator,
}

impl OnlinePayment {
    pub fn new(method: Box<dyn PaymentMethod>, narrator: Narrator) -> Self {
        Self {
            method,
            receipts: Vec::new(),
            narrator,
        }
    }

    /// Completed transactions, oldest first.
    pub fn receipts(&self) -> &[Transaction] {
        &self.receipts
    }
}

impl PaymentProcessor for OnlinePayment {
    fn method(&self) -> &dyn PaymentMethod {
        self.method.as_ref()
    }

    fn set_payment_method(&mut self, method: Box<dyn PaymentMethod>) {
        self.narrator
            .say(format_args!("Payment method changed to: {}", method.name()));
        self.method = method;
    }

    fn process_payment(&mut self, amount: f64) -> bool {
        let n = &self.narrator;
        n.say(format_args!("ONE-TIME ONLINE PAYMENT via {}", self.method.name()));
        if !validate_payment(self.method.as_ref(), amount, n) {
            return false;
        }
        n.say("Validation passed");

        let tx = self.method.pay(amount, n);
        n.say("Receipt:");
        n.say("   Payment Type: One-Time Online");
        n.say(format_args!("   Amount: ${:.2}", tx.amount));
        n.say(format_args!("   Method: {}", tx.method));
        n.say(format_args!("   Date: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));
        n.say("   Status: COMPLETED");
        info!(id = %tx.id, method = tx.method, amount, "online payment completed");
        self.receipts.push(tx);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Schedule {
    /// Due date one period after `from`. `None` only past chrono's date range.
    pub fn next_after(self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Schedule::Daily => from.checked_add_days(Days::new(1)),
            Schedule::Weekly => from.checked_add_days(Days::new(7)),
            Schedule::Monthly => from.checked_add_months(Months::new(1)),
            Schedule::Yearly => from.checked_add_months(Months::new(12)),
        }
    }

    fn period(self) -> &'static str {
        match self {
            Schedule::Daily => "day",
            Schedule::Weekly => "week",
            Schedule::Monthly => "month",
            Schedule::Yearly => "year",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Schedule::Daily => "DAILY",
            Schedule::Weekly => "WEEKLY",
            Schedule::Monthly => "MONTHLY",
            Schedule::Yearly => "YEARLY",
        };
        f.write_str(label)
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Schedule::Daily),
            "weekly" => Ok(Schedule::Weekly),
            "monthly" => Ok(Schedule::Monthly),
            "yearly" => Ok(Schedule::Yearly),
            other => Err(format!("unknown schedule: {}", other)),
        }
    }
}

pub struct RecurringPayment {
    method: Box<dyn PaymentMethod>,
    schedule: Schedule,
    active: Option<Transaction>,
    narrator: Narrator,
}

impl RecurringPayment {
    pub fn new(method: Box<dyn PaymentMethod>, narrator: Narrator) -> Self {
        Self {
            method,
            schedule: Schedule::default(),
            active: None,
            narrator,
        }
    }

    pub fn setup_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
        self.narrator
            .say(format_args!("Recurring schedule set to: {}", schedule));
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn next_payment(&self, from: NaiveDate) -> Option<NaiveDate> {
        self.schedule.next_after(from)
    }

    /// The first charge of the current subscription, if one is active.
    pub fn active_subscription(&self) -> Option<&Transaction> {
        self.active.as_ref()
    }
}

impl PaymentProcessor for RecurringPayment {
    fn method(&self) -> &dyn PaymentMethod {
        self.method.as_ref()
    }

    fn set_payment_method(&mut self, method: Box<dyn PaymentMethod>) {
        self.narrator
            .say(format_args!("Payment method changed to: {}", method.name()));
        self.method = method;
    }

    fn process_payment(&mut self, amount: f64) -> bool {
        let n = &self.narrator;
        n.say(format_args!(
            "RECURRING SUBSCRIPTION PAYMENT via {} ({})",
            self.method.name(),
            self.schedule
        ));
        if !validate_payment(self.method.as_ref(), amount, n) {
            return false;
        }
        n.say("Validation passed");
        n.say("Setting up recurring payment schedule...");

        let tx = self.method.pay(amount, n);
        let today = Local::now().date_naive();
        n.say("Subscription Details:");
        n.say(format_args!(
            "   Amount: ${:.2} per {}",
            amount,
            self.schedule.period()
        ));
        n.say(format_args!("   Method: {}", tx.method));
        n.say(format_args!("   Start Date: {}", today));
        if let Some(next) = self.next_payment(today) {
            n.say(format_args!("   Next Payment: {}", next));
        }
        n.say("   Status: ACTIVE");
        info!(id = %tx.id, schedule = %self.schedule, amount, "subscription activated");
        self.active = Some(tx);
        true
    }
}

pub fn demo(narrator: &Narrator, settings: &Settings) -> Result<()> {
    let latency = &settings.latency;

    narrator.section("Different processor/method combinations");
    let mut card = OnlinePayment::new(Box::new(CreditCard::new(latency)), narrator.clone());
    card.process_payment(149.99);
    narrator.blank();
    let mut paypal = OnlinePayment::new(Box::new(PayPal::new(latency)), narrator.clone());
    paypal.process_payment(299.50);
    narrator.blank();
    let mut crypto = OnlinePayment::new(Box::new(Crypto::new(latency)), narrator.clone());
    crypto.process_payment(1500.00);
    narrator.blank();
    let mut monthly = RecurringPayment::new(Box::new(CreditCard::new(latency)), narrator.clone());
    monthly.process_payment(9.99);

    narrator.section("Switching payment methods at runtime");
    let mut payment = OnlinePayment::new(Box::new(CreditCard::new(latency)), narrator.clone());
    narrator.say(format_args!("Initial method: {}", payment.method_name()));
    payment.process_payment(99.99);
    narrator.blank();
    payment.set_payment_method(Box::new(PayPal::new(latency)));
    payment.process_payment(99.99);
    narrator.blank();
    payment.set_payment_method(Box::new(Crypto::new(latency)));
    payment.process_payment(99.99);
    narrator.say(format_args!("{} receipts issued", payment.receipts().len()));

    narrator.section("Recurring payments with schedules");
    let mut subscription = RecurringPayment::new(Box::new(PayPal::new(latency)), narrator.clone());
    subscription.setup_schedule(Schedule::Weekly);
    subscription.process_payment(19.99);
    narrator.blank();
    subscription.setup_schedule(Schedule::Monthly);
    subscription.set_payment_method(Box::new(Crypto::new(latency)));
    subscription.process_payment(49.99);

    narrator.section("Rejected payments");
    card.process_payment(75_000.0);
    card.process_payment(0.0);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latency() -> LatencySettings {
        LatencySettings::disabled()
    }

    #[test]
    fn test_limits() {
        let narrator = Narrator::captured();
        let card = CreditCard::new(&latency());
        assert!(card.validate(50_000.0, &narrator));
        assert!(!card.validate(50_000.01, &narrator));
        assert!(PayPal::new(&latency()).validate(75_000.0, &narrator));
        assert!(Crypto::new(&latency()).validate(500_000.0, &narrator));
    }

    #[test]
    fn test_non_positive_rejected_everywhere() {
        let narrator = Narrator::captured();
        let methods: Vec<Box<dyn PaymentMethod>> = vec![
            Box::new(CreditCard::new(&latency())),
            Box::new(PayPal::new(&latency())),
            Box::new(Crypto::new(&latency())),
        ];
        for method in &methods {
            assert!(!method.validate(0.0, &narrator), "{}", method.name());
            assert!(!method.validate(-5.0, &narrator), "{}", method.name());
        }
    }

    #[test]
    fn test_crypto_dust_warns_but_passes() {
        let narrator = Narrator::captured();
        assert!(Crypto::new(&latency()).validate(0.5, &narrator));
        assert!(narrator.contains("below minimum recommended"));
    }

    #[test]
    fn test_rejected_payment_issues_no_receipt() {
        let narrator = Narrator::captured();
        let mut payment = OnlinePayment::new(Box::new(CreditCard::new(&latency())), narrator.clone());

        assert!(!payment.process_payment(60_000.0));
        assert!(payment.receipts().is_empty());
        assert!(narrator.contains("Payment validation failed!"));

        assert!(payment.process_payment(10.0));
        assert_eq!(payment.receipts().len(), 1);
        assert!(payment.receipts()[0].id.starts_with("CC-"));
    }

    #[test]
    fn test_runtime_switch() {
        let narrator = Narrator::captured();
        let mut payment = OnlinePayment::new(Box::new(CreditCard::new(&latency())), narrator.clone());
        payment.set_payment_method(Box::new(PayPal::new(&latency())));

        assert_eq!(payment.method_name(), "PayPal");
        assert!(payment.process_payment(60_000.0));
        assert!(narrator.contains("Payment method changed to: PayPal"));
    }

    #[test]
    fn test_schedule_next_payment() {
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            Schedule::Monthly.next_after(jan31),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            Schedule::Weekly.next_after(jan31),
            NaiveDate::from_ymd_opt(2024, 2, 7)
        );
        assert_eq!(
            Schedule::Yearly.next_after(jan31),
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert_eq!(
            Schedule::Daily.next_after(jan31),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
    }

    #[test]
    fn test_recurring_defaults_to_monthly() {
        let narrator = Narrator::captured();
        let mut sub = RecurringPayment::new(Box::new(PayPal::new(&latency())), narrator.clone());
        assert_eq!(sub.schedule(), Schedule::Monthly);

        sub.setup_schedule("weekly".parse().unwrap());
        assert!(sub.process_payment(19.99));
        assert!(sub.active_subscription().is_some());
        assert!(narrator.contains("per week"));
    }
}
