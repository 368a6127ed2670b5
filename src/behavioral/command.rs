// Command: a smart-home remote with per-slot on/off commands and a single
// undo stack shared across every slot.

use crate::config::Settings;
use crate::error::{PatternError, Result};
use crate::narration::Narrator;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

// ============================================================================
// Receivers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    location: String,
    on: bool,
}

impl Light {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            on: false,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    fn set(&mut self, on: bool, narrator: &Narrator) {
        self.on = on;
        let state = if on { "ON" } else { "OFF" };
        narrator.say(format_args!("{} light is {}", self.location, state));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tv {
    location: String,
    on: bool,
    volume: u8,
}

impl Tv {
    pub const DEFAULT_VOLUME: u8 = 10;
    pub const MAX_VOLUME: u8 = 100;

    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            on: false,
            volume: Self::DEFAULT_VOLUME,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    fn set_power(&mut self, on: bool, narrator: &Narrator) {
        self.on = on;
        let state = if on { "ON" } else { "OFF" };
        narrator.say(format_args!("{} TV is {}", self.location, state));
    }

    /// Returns false when the TV is off and nothing changed.
    fn set_volume(&mut self, volume: u8, narrator: &Narrator) -> bool {
        if !self.on {
            narrator.say(format_args!("{} TV is off. Turn it on first.", self.location));
            return false;
        }
        self.volume = volume.min(Self::MAX_VOLUME);
        narrator.say(format_args!("{} TV volume: {}", self.location, self.volume));
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thermostat {
    temperature: i32,
}

impl Default for Thermostat {
    fn default() -> Self {
        Self { temperature: 72 }
    }
}

impl Thermostat {
    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    fn increase(&mut self, narrator: &Narrator) {
        self.temperature += 1;
        narrator.say(format_args!("Temperature increased to {}°F", self.temperature));
    }

    fn decrease(&mut self, narrator: &Narrator) {
        self.temperature -= 1;
        narrator.say(format_args!("Temperature decreased to {}°F", self.temperature));
    }
}

// ============================================================================
// Commands
// ============================================================================

pub trait Command: CommandClone {
    fn name(&self) -> &'static str;
    fn execute(&mut self, narrator: &Narrator);
    fn undo(&mut self, narrator: &Narrator);
}

/// Lets the remote execute a fresh copy of a slot's command, so every entry
/// on the undo stack carries its own captured state.
pub trait CommandClone {
    fn clone_box(&self) -> Box<dyn Command>;
}

impl<T> CommandClone for T
where
    T: Command + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

#[derive(Clone)]
pub struct NoCommand;

impl Command for NoCommand {
    fn name(&self) -> &'static str {
        "NoCommand"
    }
    fn execute(&mut self, _narrator: &Narrator) {}
    fn undo(&mut self, _narrator: &Narrator) {}
}

#[derive(Clone)]
pub struct LightOn {
    light: Rc<RefCell<Light>>,
    previous: Option<bool>,
}

impl LightOn {
    pub fn new(light: Rc<RefCell<Light>>) -> Self {
        Self {
            light,
            previous: None,
        }
    }
}

impl Command for LightOn {
    fn name(&self) -> &'static str {
        "LightOn"
    }

    fn execute(&mut self, narrator: &Narrator) {
        let mut light = self.light.borrow_mut();
        self.previous = Some(light.is_on());
        light.set(true, narrator);
    }

    fn undo(&mut self, narrator: &Narrator) {
        if let Some(previous) = self.previous.take() {
            self.light.borrow_mut().set(previous, narrator);
        }
    }
}

#[derive(Clone)]
pub struct LightOff {
    light: Rc<RefCell<Light>>,
    previous: Option<bool>,
}

impl LightOff {
    pub fn new(light: Rc<RefCell<Light>>) -> Self {
        Self {
            light,
            previous: None,
        }
    }
}

impl Command for LightOff {
    fn name(&self) -> &'static str {
        "LightOff"
    }

    fn execute(&mut self, narrator: &Narrator) {
        let mut light = self.light.borrow_mut();
        self.previous = Some(light.is_on());
        light.set(false, narrator);
    }

    fn undo(&mut self, narrator: &Narrator) {
        if let Some(previous) = self.previous.take() {
            self.light.borrow_mut().set(previous, narrator);
        }
    }
}

#[derive(Clone)]
pub struct TvOn {
    tv: Rc<RefCell<Tv>>,
    previous: Option<bool>,
}

impl TvOn {
    pub fn new(tv: Rc<RefCell<Tv>>) -> Self {
        Self { tv, previous: None }
    }
}

impl Command for TvOn {
    fn name(&self) -> &'static str {
        "TvOn"
    }

    fn execute(&mut self, narrator: &Narrator) {
        let mut tv = self.tv.borrow_mut();
        self.previous = Some(tv.is_on());
        tv.set_power(true, narrator);
    }

    fn undo(&mut self, narrator: &Narrator) {
        if let Some(previous) = self.previous.take() {
            self.tv.borrow_mut().set_power(previous, narrator);
        }
    }
}

#[derive(Clone)]
pub struct TvOff {
    tv: Rc<RefCell<Tv>>,
    previous: Option<bool>,
}

impl TvOff {
    pub fn new(tv: Rc<RefCell<Tv>>) -> Self {
        Self { tv, previous: None }
    }
}

impl Command for TvOff {
    fn name(&self) -> &'static str {
        "TvOff"
    }

    fn execute(&mut self, narrator: &Narrator) {
        let mut tv = self.tv.borrow_mut();
        self.previous = Some(tv.is_on());
        tv.set_power(false, narrator);
    }

    fn undo(&mut self, narrator: &Narrator) {
        if let Some(previous) = self.previous.take() {
            self.tv.borrow_mut().set_power(previous, narrator);
        }
    }
}

/// Volume commands remember the volume they replaced, but only when the
/// change actually happened (the TV was on).
#[derive(Clone)]
pub struct TvVolumeUp {
    tv: Rc<RefCell<Tv>>,
    previous: Option<u8>,
}

impl TvVolumeUp {
    pub fn new(tv: Rc<RefCell<Tv>>) -> Self {
        Self { tv, previous: None }
    }
}

impl Command for TvVolumeUp {
    fn name(&self) -> &'static str {
        "TvVolumeUp"
    }

    fn execute(&mut self, narrator: &Narrator) {
        let mut tv = self.tv.borrow_mut();
        let before = tv.volume();
        if tv.set_volume(before.saturating_add(1), narrator) {
            self.previous = Some(before);
        }
    }

    fn undo(&mut self, narrator: &Narrator) {
        if let Some(previous) = self.previous.take() {
            self.tv.borrow_mut().set_volume(previous, narrator);
        }
    }
}

#[derive(Clone)]
pub struct TvVolumeDown {
    tv: Rc<RefCell<Tv>>,
    previous: Option<u8>,
}

impl TvVolumeDown {
    pub fn new(tv: Rc<RefCell<Tv>>) -> Self {
        Self { tv, previous: None }
    }
}

impl Command for TvVolumeDown {
    fn name(&self) -> &'static str {
        "TvVolumeDown"
    }

    fn execute(&mut self, narrator: &Narrator) {
        let mut tv = self.tv.borrow_mut();
        let before = tv.volume();
        if tv.set_volume(before.saturating_sub(1), narrator) {
            self.previous = Some(before);
        }
    }

    fn undo(&mut self, narrator: &Narrator) {
        if let Some(previous) = self.previous.take() {
            self.tv.borrow_mut().set_volume(previous, narrator);
        }
    }
}

#[derive(Clone)]
pub struct ThermostatUp {
    thermostat: Rc<RefCell<Thermostat>>,
}

impl ThermostatUp {
    pub fn new(thermostat: Rc<RefCell<Thermostat>>) -> Self {
        Self { thermostat }
    }
}

impl Command for ThermostatUp {
    fn name(&self) -> &'static str {
        "ThermostatUp"
    }

    fn execute(&mut self, narrator: &Narrator) {
        self.thermostat.borrow_mut().increase(narrator);
    }

    fn undo(&mut self, narrator: &Narrator) {
        self.thermostat.borrow_mut().decrease(narrator);
    }
}

#[derive(Clone)]
pub struct ThermostatDown {
    thermostat: Rc<RefCell<Thermostat>>,
}

impl ThermostatDown {
    pub fn new(thermostat: Rc<RefCell<Thermostat>>) -> Self {
        Self { thermostat }
    }
}

impl Command for ThermostatDown {
    fn name(&self) -> &'static str {
        "ThermostatDown"
    }

    fn execute(&mut self, narrator: &Narrator) {
        self.thermostat.borrow_mut().decrease(narrator);
    }

    fn undo(&mut self, narrator: &Narrator) {
        self.thermostat.borrow_mut().increase(narrator);
    }
}

// ============================================================================
// Invoker
// ============================================================================

struct Slot {
    on: Box<dyn Command>,
    off: Box<dyn Command>,
}

pub struct RemoteControl {
    slots: Vec<Slot>,
    history: Vec<Box<dyn Command>>,
    narrator: Narrator,
}

impl RemoteControl {
    pub fn new(slot_count: usize, narrator: Narrator) -> Self {
        let slots = (0..slot_count)
            .map(|_| Slot {
                on: Box::new(NoCommand),
                off: Box::new(NoCommand),
            })
            .collect();
        Self {
            slots,
            history: Vec::new(),
            narrator,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn set_command(
        &mut self,
        slot: usize,
        on: impl Command + 'static,
        off: impl Command + 'static,
    ) -> Result<()> {
        let len = self.slots.len();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or_else(|| PatternError::out_of_bounds(slot, len))?;
        entry.on = Box::new(on);
        entry.off = Box::new(off);
        Ok(())
    }

    pub fn press_on(&mut self, slot: usize) -> Result<()> {
        let command = self.slot(slot)?.on.clone_box();
        self.run(command);
        Ok(())
    }

    pub fn press_off(&mut self, slot: usize) -> Result<()> {
        let command = self.slot(slot)?.off.clone_box();
        self.run(command);
        Ok(())
    }

    /// Undoes the most recent press on any slot. Returns false when there
    /// was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(mut command) => {
                debug!(command = command.name(), remaining = self.history.len(), "undo");
                command.undo(&self.narrator);
                self.narrator.say("Undo executed");
                true
            }
            None => {
                warn!("undo requested with empty history");
                self.narrator.say("No command to undo");
                false
            }
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn slot(&self, slot: usize) -> Result<&Slot> {
        self.slots
            .get(slot)
            .ok_or_else(|| PatternError::out_of_bounds(slot, self.slots.len()))
    }

    fn run(&mut self, mut command: Box<dyn Command>) {
        debug!(command = command.name(), "execute");
        command.execute(&self.narrator);
        self.history.push(command);
    }
}

impl fmt::Display for RemoteControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "------ Remote Control ------")?;
        for (i, slot) in self.slots.iter().enumerate() {
            writeln!(f, "[slot {}] {:<14} {}", i, slot.on.name(), slot.off.name())?;
        }
        Ok(())
    }
}

pub fn demo(narrator: &Narrator, settings: &Settings) -> Result<()> {
    let living_room_light = Rc::new(RefCell::new(Light::new("Living Room")));
    let kitchen_light = Rc::new(RefCell::new(Light::new("Kitchen")));
    let tv = Rc::new(RefCell::new(Tv::new("Living Room")));
    let thermostat = Rc::new(RefCell::new(Thermostat::default()));

    let mut remote = RemoteControl::new(settings.command.remote_slots.max(4), narrator.clone());
    remote.set_command(
        0,
        LightOn::new(living_room_light.clone()),
        LightOff::new(living_room_light.clone()),
    )?;
    remote.set_command(
        1,
        LightOn::new(kitchen_light.clone()),
        LightOff::new(kitchen_light),
    )?;
    remote.set_command(2, TvOn::new(tv.clone()), TvOff::new(tv.clone()))?;
    remote.set_command(
        3,
        ThermostatUp::new(thermostat.clone()),
        ThermostatDown::new(thermostat.clone()),
    )?;
    for line in remote.to_string().lines() {
        narrator.say(line);
    }

    narrator.section("Increasing TV volume directly (TV still off)");
    TvVolumeUp::new(tv.clone()).execute(narrator);

    narrator.section("Turning on living room light");
    remote.press_on(0)?;
    narrator.section("Turning on kitchen light");
    remote.press_on(1)?;
    narrator.section("Turning on TV");
    remote.press_on(2)?;
    narrator.section("Increasing temperature twice");
    remote.press_on(3)?;
    remote.press_on(3)?;

    narrator.section("Undo last command (temperature)");
    remote.undo();
    narrator.section("Undo again (temperature)");
    remote.undo();
    narrator.section("Undo again (TV)");
    remote.undo();

    narrator.section("Turning off living room light");
    remote.press_off(0)?;
    narrator.section("Undo (turn light back on)");
    remote.undo();

    narrator.blank();
    narrator.say(format_args!(
        "Thermostat back at {}°F, living room light {}",
        thermostat.borrow().temperature(),
        if living_room_light.borrow().is_on() { "on" } else { "off" }
    ));
    Ok(())
}
