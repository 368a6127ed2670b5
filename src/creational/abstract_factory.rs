// Abstract Factory: one factory per platform produces a matching family of
// widgets, so a form never mixes Mac and Windows controls.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use std::fmt;
use std::str::FromStr;

pub trait Button {
    fn paint(&self) -> String;
}

pub trait Checkbox {
    fn paint(&self) -> String;
}

pub trait GuiFactory {
    fn platform(&self) -> Platform;
    fn create_button(&self) -> Box<dyn Button>;
    fn create_checkbox(&self) -> Box<dyn Checkbox>;
}

// ============================================================================
// Mac family
// ============================================================================

pub struct MacButton;
impl Button for MacButton {
    fn paint(&self) -> String {
        "Rendering a Mac-style Button".to_string()
    }
}

pub struct MacCheckbox;
impl Checkbox for MacCheckbox {
    fn paint(&self) -> String {
        "Rendering a Mac-style Checkbox".to_string()
    }
}

pub struct MacFactory;
impl GuiFactory for MacFactory {
    fn platform(&self) -> Platform {
        Platform::Mac
    }
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(MacButton)
    }
    fn create_checkbox(&self) -> Box<dyn Checkbox> {
        Box::new(MacCheckbox)
    }
}

// ============================================================================
// Windows family
// ============================================================================

pub struct WindowsButton;
impl Button for WindowsButton {
    fn paint(&self) -> String {
        "Rendering a Windows-style Button".to_string()
    }
}

pub struct WindowsCheckbox;
impl Checkbox for WindowsCheckbox {
    fn paint(&self) -> String {
        "Rendering a Windows-style Checkbox".to_string()
    }
}

pub struct WindowsFactory;
impl GuiFactory for WindowsFactory {
    fn platform(&self) -> Platform {
        Platform::Windows
    }
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(WindowsButton)
    }
    fn create_checkbox(&self) -> Box<dyn Checkbox> {
        Box::new(WindowsCheckbox)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Windows,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Mac => f.write_str("Mac"),
            Platform::Windows => f.write_str("Windows"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mac" | "macos" => Ok(Platform::Mac),
            "windows" | "win" => Ok(Platform::Windows),
            other => Err(format!("unknown platform: {}", other)),
        }
    }
}

pub fn factory_for(platform: Platform) -> Box<dyn GuiFactory> {
    match platform {
        Platform::Mac => Box::new(MacFactory),
        Platform::Windows => Box::new(WindowsFactory),
    }
}

/// Paints one button and one checkbox from the same factory.
pub fn render_form(factory: &dyn GuiFactory) -> Vec<String> {
    vec![
        factory.create_button().paint(),
        factory.create_checkbox().paint(),
    ]
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    for platform in [Platform::Mac, Platform::Windows] {
        narrator.blank();
        narrator.say(format_args!("{} GUI:", platform));
        let factory = factory_for(platform);
        for line in render_form(factory.as_ref()) {
            narrator.bullet(line);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families_never_mix() {
        for platform in [Platform::Mac, Platform::Windows] {
            let factory = factory_for(platform);
            assert_eq!(factory.platform(), platform);

            let style = format!("{}-style", platform);
            for painted in render_form(factory.as_ref()) {
                assert!(painted.contains(&style), "{painted} is not {style}");
            }
        }
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("MAC".parse::<Platform>(), Ok(Platform::Mac));
        assert_eq!("win".parse::<Platform>(), Ok(Platform::Windows));
        assert!("beos".parse::<Platform>().is_err());
    }
}
