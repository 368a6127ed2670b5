// State: a bank account whose behavior depends on its tier. Tiers are a
// closed set, so the state is an enum and every transition lives in one
// `&mut self` method that writes balance and tier together.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use std::fmt;
use tracing::{info, warn};

pub const GOLD_THRESHOLD: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Silver,
    Gold,
    Overdrawn,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Overdrawn => "Overdrawn",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Deposit,
    Withdrawal,
}

/// What one deposit or withdrawal did. `applied` is zero when the operation
/// was refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub requested: f64,
    pub applied: f64,
    pub from: Tier,
    pub to: Tier,
}

impl Operation {
    pub fn changed_tier(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    owner: String,
    balance: f64,
    tier: Tier,
    narrator: Narrator,
}

impl Account {
    pub fn new(owner: impl Into<String>, narrator: Narrator) -> Self {
        Self {
            owner: owner.into(),
            balance: 0.0,
            tier: Tier::Silver,
            narrator,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn deposit(&mut self, amount: f64) -> Operation {
        let from = self.tier;
        self.balance += amount;
        self.narrator.say(format_args!(
            "Deposited ${:.2} ({} account)",
            amount, from
        ));

        self.tier = match from {
            Tier::Silver if self.balance > GOLD_THRESHOLD => Tier::Gold,
            Tier::Overdrawn if self.balance > 0.0 => Tier::Silver,
            other => other,
        };
        self.announce(from);

        Operation {
            kind: OperationKind::Deposit,
            requested: amount,
            applied: amount,
            from,
            to: self.tier,
        }
    }

    pub fn withdraw(&mut self, amount: f64) -> Operation {
        let from = self.tier;
        let applied = match from {
            Tier::Overdrawn => {
                self.narrator
                    .say("Account is overdrawn. Withdrawals are not allowed.");
                warn!(owner = %self.owner, amount, "withdrawal refused while overdrawn");
                0.0
            }
            Tier::Silver | Tier::Gold if self.balance >= amount => {
                self.balance -= amount;
                self.narrator
                    .say(format_args!("Withdrew ${:.2} ({} account)", amount, from));
                amount
            }
            Tier::Silver | Tier::Gold => {
                self.narrator.say(format_args!(
                    "Insufficient funds to withdraw ${:.2} (balance ${:.2})",
                    amount, self.balance
                ));
                self.tier = Tier::Overdrawn;
                0.0
            }
        };
        self.announce(from);

        Operation {
            kind: OperationKind::Withdrawal,
            requested: amount,
            applied,
            from,
            to: self.tier,
        }
    }

    pub fn check_balance(&self) {
        let note = match self.tier {
            Tier::Silver => "standard account",
            Tier::Gold => "premium benefits active",
            Tier::Overdrawn => "please deposit funds to restore the account",
        };
        self.narrator.say(format_args!(
            "{} account balance: ${:.2} ({})",
            self.tier, self.balance, note
        ));
    }

    fn announce(&self, from: Tier) {
        if from != self.tier {
            info!(owner = %self.owner, %from, to = %self.tier, balance = self.balance, "tier changed");
            self.narrator.say(format_args!(
                "Account moved from {} to {}",
                from, self.tier
            ));
        }
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let mut account = Account::new("Jordan", narrator.clone());
    account.check_balance();

    let steps: [(OperationKind, f64); 5] = [
        (OperationKind::Deposit, 500.0),
        (OperationKind::Withdrawal, 100.0),
        (OperationKind::Deposit, 600.0),
        (OperationKind::Withdrawal, 1200.0),
        (OperationKind::Deposit, 300.0),
    ];

    for (kind, amount) in steps {
        narrator.blank();
        match kind {
            OperationKind::Deposit => account.deposit(amount),
            OperationKind::Withdrawal => account.withdraw(amount),
        };
        account.check_balance();
    }

    narrator.blank();
    narrator.say("Trying to withdraw while overdrawn:");
    let mut overdrawn = Account::new("Sam", narrator.clone());
    overdrawn.withdraw(50.0);
    overdrawn.withdraw(10.0);
    overdrawn.check_balance();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn account() -> Account {
        Account::new("test", Narrator::captured())
    }

    #[test]
    fn test_two_deposits_reach_gold() {
        let mut acc = account();
        let first = acc.deposit(500.0);
        assert_eq!(first.to, Tier::Silver);

        let second = acc.deposit(600.0);
        assert!(second.changed_tier());
        assert_eq!(acc.tier(), Tier::Gold);
        assert_eq!(acc.balance(), 1100.0);
    }

    #[test]
    fn test_exactly_threshold_stays_silver() {
        let mut acc = account();
        acc.deposit(1000.0);
        assert_eq!(acc.tier(), Tier::Silver);
    }

    #[test]
    fn test_overdraw_keeps_balance() {
        let mut acc = account();
        acc.deposit(500.0);
        let op = acc.withdraw(800.0);

        assert_eq!(op.applied, 0.0);
        assert_eq!(op.to, Tier::Overdrawn);
        assert_eq!(acc.balance(), 500.0);
    }

    #[test]
    fn test_deposit_recovers_overdrawn() {
        let mut acc = account();
        acc.withdraw(1.0);
        assert_eq!(acc.tier(), Tier::Overdrawn);

        acc.deposit(300.0);
        assert_eq!(acc.tier(), Tier::Silver);
    }

    #[test]
    fn test_overdrawn_refuses_withdrawal() {
        let narrator = Narrator::captured();
        let mut acc = Account::new("test", narrator.clone());
        acc.withdraw(10.0);
        acc.withdraw(10.0);
        assert!(narrator.contains("Withdrawals are not allowed"));
    }

    #[test]
    fn test_gold_survives_withdrawal() {
        let mut acc = account();
        acc.deposit(2000.0);
        acc.withdraw(1500.0);
        assert_eq!(acc.tier(), Tier::Gold);
        assert_eq!(acc.balance(), 500.0);
    }

    proptest! {
        #[test]
        fn prop_withdrawal_over_balance_overdraws(
            deposit in 0u32..5000,
            extra in 1u32..5000,
        ) {
            let mut acc = account();
            acc.deposit(f64::from(deposit));
            let before = acc.balance();

            let op = acc.withdraw(before + f64::from(extra));
            prop_assert_eq!(op.to, Tier::Overdrawn);
            prop_assert_eq!(acc.balance(), before);
        }
    }
}
