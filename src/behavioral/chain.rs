// Chain of Responsibility: support tickets escalate through tiers until one
// handler accepts them or the chain runs out.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Basic,
    Moderate,
    Critical,
    Executive,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Basic,
        Priority::Moderate,
        Priority::Critical,
        Priority::Executive,
    ];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Basic => "BASIC",
            Priority::Moderate => "MODERATE",
            Priority::Critical => "CRITICAL",
            Priority::Executive => "EXECUTIVE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub customer: String,
    pub issue: String,
    pub priority: Priority,
}

impl Ticket {
    pub fn new(customer: impl Into<String>, issue: impl Into<String>, priority: Priority) -> Self {
        Self {
            customer: customer.into(),
            issue: issue.into(),
            priority,
        }
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.priority, self.customer, self.issue)
    }
}

// ============================================================================
// Resolvers: the varying part of each link
// ============================================================================

pub trait TicketResolver {
    fn name(&self) -> &str;
    fn can_handle(&self, ticket: &Ticket) -> bool;
    fn resolve(&self, ticket: &Ticket, narrator: &Narrator);
}

/// Accepts exactly one priority tier.
pub struct TierSupport {
    name: &'static str,
    accepts: Priority,
    solution: &'static str,
}

impl TierSupport {
    pub fn level1() -> Self {
        Self {
            name: "Level 1 Support",
            accepts: Priority::Basic,
            solution: "Provided standard troubleshooting steps",
        }
    }

    pub fn level2() -> Self {
        Self {
            name: "Level 2 Support",
            accepts: Priority::Moderate,
            solution: "Performed advanced diagnostics and configuration",
        }
    }

    pub fn level3() -> Self {
        Self {
            name: "Level 3 Support",
            accepts: Priority::Critical,
            solution: "Deployed emergency patch and system recovery",
        }
    }

    pub fn manager() -> Self {
        Self {
            name: "Manager Support",
            accepts: Priority::Executive,
            solution: "Personally addressed with priority escalation to engineering team",
        }
    }
}

impl TicketResolver for TierSupport {
    fn name(&self) -> &str {
        self.name
    }

    fn can_handle(&self, ticket: &Ticket) -> bool {
        ticket.priority == self.accepts
    }

    fn resolve(&self, ticket: &Ticket, narrator: &Narrator) {
        narrator.say(format_args!("    {} handled: {}", self.name, ticket));
        narrator.say(format_args!("      Solution: {}", self.solution));
    }
}

// ============================================================================
// The chain itself
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `hops` counts the escalations before the ticket was accepted.
    Handled { by: String, hops: usize },
    Unresolved { last: String },
}

impl Resolution {
    pub fn handler(&self) -> Option<&str> {
        match self {
            Resolution::Handled { by, .. } => Some(by),
            Resolution::Unresolved { .. } => None,
        }
    }
}

/// One link of the chain. The successor is fixed at construction, so chains
/// are built back to front and can never form a cycle.
pub struct SupportHandler {
    resolver: Box<dyn TicketResolver>,
    next: Option<Rc<SupportHandler>>,
}

impl SupportHandler {
    pub fn last(resolver: impl TicketResolver + 'static) -> Rc<Self> {
        Rc::new(Self {
            resolver: Box::new(resolver),
            next: None,
        })
    }

    pub fn with_next(resolver: impl TicketResolver + 'static, next: Rc<SupportHandler>) -> Rc<Self> {
        Rc::new(Self {
            resolver: Box::new(resolver),
            next: Some(next),
        })
    }

    pub fn name(&self) -> &str {
        self.resolver.name()
    }

    pub fn next(&self) -> Option<&Rc<SupportHandler>> {
        self.next.as_ref()
    }

    pub fn handle(&self, ticket: &Ticket, narrator: &Narrator) -> Resolution {
        let mut current = self;
        let mut hops = 0;

        loop {
            if current.resolver.can_handle(ticket) {
                current.resolver.resolve(ticket, narrator);
                return Resolution::Handled {
                    by: current.name().to_string(),
                    hops,
                };
            }

            match &current.next {
                Some(next) => {
                    narrator.say(format_args!(
                        "    {} cannot handle this. Escalating...",
                        current.name()
                    ));
                    debug!(from = current.name(), to = next.name(), ticket = %ticket, "escalating");
                    current = &**next;
                    hops += 1;
                }
                None => {
                    narrator.say(format_args!(
                        "    {} cannot handle this and no further escalation available!",
                        current.name()
                    ));
                    narrator.say(format_args!("    Ticket remains unresolved: {}", ticket));
                    warn!(last = current.name(), ticket = %ticket, "ticket unresolved");
                    return Resolution::Unresolved {
                        last: current.name().to_string(),
                    };
                }
            }
        }
    }
}

/// The reference wiring: Level 1 -> Level 2 -> Level 3 -> Manager.
pub struct SupportChain {
    pub level1: Rc<SupportHandler>,
    pub level2: Rc<SupportHandler>,
    pub level3: Rc<SupportHandler>,
    pub manager: Rc<SupportHandler>,
}

impl SupportChain {
    pub fn standard() -> Self {
        let manager = SupportHandler::last(TierSupport::manager());
        let level3 = SupportHandler::with_next(TierSupport::level3(), manager.clone());
        let level2 = SupportHandler::with_next(TierSupport::level2(), level3.clone());
        let level1 = SupportHandler::with_next(TierSupport::level1(), level2.clone());
        Self {
            level1,
            level2,
            level3,
            manager,
        }
    }

    /// Names of the links reachable from the head, in order.
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut cursor = Some(&self.level1);
        while let Some(handler) = cursor {
            names.push(handler.name().to_string());
            cursor = handler.next();
        }
        names
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    narrator.say("Building the support chain...");
    let chain = SupportChain::standard();
    narrator.say(format_args!("  Chain established: {}", chain.names().join(" -> ")));

    narrator.section("Processing support tickets");
    let tickets = [
        Ticket::new("John Doe", "Password reset request", Priority::Basic),
        Ticket::new("Jane Smith", "Software installation issue", Priority::Moderate),
        Ticket::new("Bob Johnson", "Server outage affecting production", Priority::Critical),
        Ticket::new(
            "Alice Williams",
            "VIP client complaint requiring immediate attention",
            Priority::Executive,
        ),
    ];
    for (i, ticket) in tickets.iter().enumerate() {
        narrator.blank();
        narrator.say(format_args!("Ticket {}: {}", i + 1, ticket));
        chain.level1.handle(ticket, narrator);
    }

    narrator.section("Different entry points");
    narrator.say("Starting from Level 2 (skipping Level 1):");
    let ticket = Ticket::new("Charlie Brown", "Database corruption issue", Priority::Critical);
    narrator.say(format_args!("  {}", ticket));
    chain.level2.handle(&ticket, narrator);

    narrator.blank();
    narrator.say("Starting from Level 3 with a basic ticket:");
    let ticket = Ticket::new("Eve Adams", "Forgot username", Priority::Basic);
    narrator.say(format_args!("  {}", ticket));
    chain.level3.handle(&ticket, narrator);

    narrator.blank();
    narrator.say("Starting directly from Manager:");
    let ticket = Ticket::new("Diana Prince", "Board member urgent request", Priority::Executive);
    narrator.say(format_args!("  {}", ticket));
    chain.manager.handle(&ticket, narrator);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct AcceptAll;

    impl TicketResolver for AcceptAll {
        fn name(&self) -> &str {
            "Catch-all"
        }
        fn can_handle(&self, _ticket: &Ticket) -> bool {
            true
        }
        fn resolve(&self, ticket: &Ticket, narrator: &Narrator) {
            narrator.say(format!("caught {}", ticket));
        }
    }

    #[test]
    fn test_critical_handled_by_level3() {
        let narrator = Narrator::captured();
        let chain = SupportChain::standard();
        let ticket = Ticket::new("Bob", "Outage", Priority::Critical);

        let resolution = chain.level1.handle(&ticket, &narrator);

        assert_eq!(
            resolution,
            Resolution::Handled {
                by: "Level 3 Support".to_string(),
                hops: 2
            }
        );
        assert!(narrator.contains("Level 1 Support cannot handle this. Escalating..."));
        assert!(narrator.contains("Level 2 Support cannot handle this. Escalating..."));
        assert_eq!(narrator.count("Escalating"), 2);
        assert!(narrator.contains("Level 3 Support handled: [CRITICAL] Bob: Outage"));
    }

    #[test]
    fn test_basic_handled_without_escalation() {
        let narrator = Narrator::captured();
        let chain = SupportChain::standard();
        let ticket = Ticket::new("John", "Password", Priority::Basic);

        let resolution = chain.level1.handle(&ticket, &narrator);
        assert_eq!(resolution.handler(), Some("Level 1 Support"));
        assert_eq!(narrator.count("Escalating"), 0);
    }

    #[test]
    fn test_mid_chain_entry_cannot_go_backwards() {
        let narrator = Narrator::captured();
        let chain = SupportChain::standard();
        let ticket = Ticket::new("Eve", "Username", Priority::Basic);

        let resolution = chain.level3.handle(&ticket, &narrator);

        assert_eq!(
            resolution,
            Resolution::Unresolved {
                last: "Manager Support".to_string()
            }
        );
        assert!(narrator.contains("no further escalation available"));
        assert!(narrator.contains("Ticket remains unresolved: [BASIC] Eve: Username"));
    }

    #[test]
    fn test_overlapping_predicates_first_match_wins() {
        let narrator = Narrator::captured();
        let tail = SupportHandler::last(AcceptAll);
        let head = SupportHandler::with_next(TierSupport::level1(), tail);

        let basic = Ticket::new("A", "basic", Priority::Basic);
        assert_eq!(head.handle(&basic, &narrator).handler(), Some("Level 1 Support"));

        let critical = Ticket::new("B", "critical", Priority::Critical);
        assert_eq!(head.handle(&critical, &narrator).handler(), Some("Catch-all"));
        assert!(narrator.contains("caught [CRITICAL] B: critical"));
    }

    #[test]
    fn test_chain_names_in_order() {
        let chain = SupportChain::standard();
        assert_eq!(
            chain.names(),
            vec![
                "Level 1 Support",
                "Level 2 Support",
                "Level 3 Support",
                "Manager Support"
            ]
        );
    }

    #[test]
    fn test_ticket_display() {
        let ticket = Ticket::new("Jane Smith", "Install issue", Priority::Moderate);
        assert_eq!(ticket.to_string(), "[MODERATE] Jane Smith: Install issue");
    }

    fn priority() -> impl Strategy<Value = Priority> {
        prop::sample::select(Priority::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_exactly_one_handler(priorities in prop::collection::vec(priority(), 1..20)) {
            let chain = SupportChain::standard();
            for p in priorities {
                let narrator = Narrator::captured();
                let ticket = Ticket::new("C", "issue", p);
                let resolution = chain.level1.handle(&ticket, &narrator);

                prop_assert!(resolution.handler().is_some());
                prop_assert_eq!(narrator.count(" handled: "), 1);
            }
        }
    }
}
