// Mediator: chat users only ever talk to the room; the room decides who
// receives each message.

use crate::config::Settings;
use crate::error::{PatternError, Result};
use crate::narration::Narrator;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(usize);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub text: String,
}

pub trait ChatUser {
    fn name(&self) -> &str;

    /// Display name used in narration, e.g. `Charlie (Premium)`.
    fn label(&self) -> String {
        self.name().to_string()
    }

    fn receive(&mut self, from: &str, text: &str, narrator: &Narrator);

    fn inbox(&self) -> &[Message];
}

pub struct BasicUser {
    name: String,
    inbox: Vec<Message>,
}

impl BasicUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inbox: Vec::new(),
        }
    }
}

impl ChatUser for BasicUser {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&mut self, from: &str, text: &str, narrator: &Narrator) {
        narrator.say(format_args!("  {} received from {}: {}", self.label(), from, text));
        self.inbox.push(Message {
            from: from.to_string(),
            text: text.to_string(),
        });
    }

    fn inbox(&self) -> &[Message] {
        &self.inbox
    }
}

pub struct PremiumUser {
    name: String,
    inbox: Vec<Message>,
}

impl PremiumUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inbox: Vec::new(),
        }
    }
}

impl ChatUser for PremiumUser {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> String {
        format!("{} (Premium)", self.name)
    }

    fn receive(&mut self, from: &str, text: &str, narrator: &Narrator) {
        narrator.say(format_args!("  {} received from {}: {}", self.label(), from, text));
        self.inbox.push(Message {
            from: from.to_string(),
            text: text.to_string(),
        });
    }

    fn inbox(&self) -> &[Message] {
        &self.inbox
    }
}

// ============================================================================
// The mediator
// ============================================================================

pub struct ChatRoom {
    name: String,
    members: Vec<(UserId, Box<dyn ChatUser>)>,
    next_id: usize,
    narrator: Narrator,
}

impl ChatRoom {
    pub fn new(name: impl Into<String>, narrator: Narrator) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            next_id: 0,
            narrator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn join(&mut self, user: Box<dyn ChatUser>) -> UserId {
        let id = UserId(self.next_id);
        self.next_id += 1;
        self.narrator
            .say(format_args!("{} joined {}", user.label(), self.name));
        debug!(room = %self.name, user = user.name(), %id, "joined");
        self.members.push((id, user));
        id
    }

    pub fn leave(&mut self, id: UserId) -> Result<Box<dyn ChatUser>> {
        let pos = self.position(id)?;
        let (_, user) = self.members.remove(pos);
        self.narrator
            .say(format_args!("{} left {}", user.label(), self.name));
        Ok(user)
    }

    /// Delivers `text` to every member except the sender and returns how many
    /// members received it.
    pub fn send(&mut self, from: UserId, text: &str) -> Result<usize> {
        let pos = self.position(from)?;
        let sender = self.members[pos].1.label();
        self.narrator.say(format_args!("{} sends: {}", sender, text));

        let mut delivered = 0;
        for (id, user) in self.members.iter_mut() {
            if *id == from {
                continue;
            }
            user.receive(&sender, text, &self.narrator);
            delivered += 1;
        }
        debug!(room = %self.name, from = %from, delivered, "message relayed");
        Ok(delivered)
    }

    pub fn user(&self, id: UserId) -> Result<&dyn ChatUser> {
        let pos = self.position(id)?;
        Ok(self.members[pos].1.as_ref())
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    fn position(&self, id: UserId) -> Result<usize> {
        self.members
            .iter()
            .position(|(member, _)| *member == id)
            .ok_or_else(|| PatternError::UnknownParticipant {
                room: self.name.clone(),
                id: id.0,
            })
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let mut room = ChatRoom::new("Design Patterns Chat", narrator.clone());

    narrator.section("Users joining");
    let alice = room.join(Box::new(BasicUser::new("Alice")));
    let bob = room.join(Box::new(BasicUser::new("Bob")));
    let charlie = room.join(Box::new(PremiumUser::new("Charlie")));
    let diana = room.join(Box::new(BasicUser::new("Diana")));

    narrator.section("Conversation");
    room.send(alice, "Hi everyone!")?;
    narrator.blank();
    room.send(charlie, "Hello Alice! Welcome to the chat.")?;
    narrator.blank();
    room.send(bob, "Has anyone tried the Mediator pattern?")?;

    narrator.section("Bob leaves");
    room.leave(bob)?;

    narrator.section("Conversation continues");
    room.send(diana, "Bob just left. Anyone still here?")?;
    narrator.blank();
    room.send(alice, "Yes, still here!")?;

    narrator.blank();
    narrator.say(format_args!(
        "{} members remain; {} has {} messages",
        room.member_count(),
        room.user(charlie)?.label(),
        room.user(charlie)?.inbox().len()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> (ChatRoom, Narrator, UserId, UserId, UserId) {
        let narrator = Narrator::captured();
        let mut room = ChatRoom::new("test", narrator.clone());
        let a = room.join(Box::new(BasicUser::new("Alice")));
        let b = room.join(Box::new(BasicUser::new("Bob")));
        let c = room.join(Box::new(PremiumUser::new("Charlie")));
        (room, narrator, a, b, c)
    }

    #[test]
    fn test_sender_does_not_receive_own_message() {
        let (mut room, _narrator, a, b, c) = room();
        let delivered = room.send(a, "hello").unwrap();

        assert_eq!(delivered, 2);
        assert!(room.user(a).unwrap().inbox().is_empty());
        assert_eq!(room.user(b).unwrap().inbox()[0].text, "hello");
        assert_eq!(room.user(c).unwrap().inbox()[0].from, "Alice");
    }

    #[test]
    fn test_premium_label_in_narration() {
        let (mut room, narrator, a, _b, c) = room();
        room.send(c, "premium says hi").unwrap();

        assert!(narrator.contains("Charlie (Premium) sends: premium says hi"));
        assert_eq!(room.user(a).unwrap().inbox()[0].from, "Charlie (Premium)");
    }

    #[test]
    fn test_departed_user_stops_receiving() {
        let (mut room, _narrator, a, b, _c) = room();
        let bob = room.leave(b).unwrap();
        assert_eq!(bob.name(), "Bob");

        assert_eq!(room.send(a, "after").unwrap(), 1);
        assert_eq!(room.member_count(), 2);
        assert!(bob.inbox().is_empty());
    }

    #[test]
    fn test_unknown_participant() {
        let (mut room, _narrator, _a, b, _c) = room();
        room.leave(b).unwrap();

        let err = room.send(b, "ghost").unwrap_err();
        assert!(matches!(err, PatternError::UnknownParticipant { id: 1, .. }));
        assert!(room.leave(b).is_err());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let (mut room, _narrator, a, _b, _c) = room();
        room.leave(a).unwrap();
        let d = room.join(Box::new(BasicUser::new("Diana")));
        assert_ne!(a, d);
    }
}
