// Page settings. Everything has a default matching the stock page, and the
// host can override any subset by handing a JSON string to `start`.

use crate::color::Color;
use crate::error::SetupError;
use crate::particle::SpawnRanges;
use log::LevelFilter;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub canvas_id: String,
    pub field: FieldConfig,
    pub chat: ChatConfig,
    pub preview: Option<PreviewConfig>,
    pub log_level: LevelFilter,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            canvas_id: "particleCanvas".to_string(),
            field: FieldConfig::default(),
            chat: ChatConfig::default(),
            preview: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let config: PageConfig = serde_json::from_str(json).map_err(SetupError::Config)?;
        config.field.validate()?;
        Ok(config)
    }
}

/// How proximity lines are gathered each frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Linking {
    /// Move every particle, then link each unordered pair once.
    FrameConsistent,
    /// Move and link one particle at a time against the whole collection,
    /// itself included, seeing whatever positions the others hold so far.
    InPlace,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub link_distance: f64,
    pub link_opacity: f64,
    pub link_width: f64,
    pub color: Color,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_speed: f64,
    pub linking: Linking,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let spawn = SpawnRanges::default();
        FieldConfig {
            particle_count: 70,
            link_distance: 150.0,
            link_opacity: 0.15,
            link_width: 1.0,
            color: Color::default(),
            min_radius: spawn.min_radius,
            max_radius: spawn.max_radius,
            min_opacity: spawn.min_opacity,
            max_speed: spawn.max_speed,
            linking: Linking::FrameConsistent,
        }
    }
}

impl FieldConfig {
    /// Rejects ranges that would spawn particles the canvas cannot draw.
    pub fn validate(&self) -> Result<(), SetupError> {
        let invalid = |msg: String| -> Result<(), SetupError> { Err(SetupError::InvalidConfig(msg)) };
        if !(self.min_radius >= 0.0 && self.max_radius >= self.min_radius) {
            return invalid(format!(
                "radius range [{}, {}) must be non-negative and ordered",
                self.min_radius, self.max_radius
            ));
        }
        if !(0.0..=1.0).contains(&self.min_opacity) {
            return invalid(format!("min_opacity {} outside [0, 1]", self.min_opacity));
        }
        if !(0.0..=1.0).contains(&self.link_opacity) {
            return invalid(format!("link_opacity {} outside [0, 1]", self.link_opacity));
        }
        if !(self.max_speed >= 0.0 && self.max_speed.is_finite()) {
            return invalid(format!("max_speed {} must be finite and non-negative", self.max_speed));
        }
        if !(self.link_distance > 0.0 && self.link_width > 0.0) {
            return invalid(format!(
                "link_distance {} and link_width {} must be positive",
                self.link_distance, self.link_width
            ));
        }
        Ok(())
    }

    pub fn spawn_ranges(&self) -> SpawnRanges {
        SpawnRanges {
            min_radius: self.min_radius,
            max_radius: self.max_radius,
            min_opacity: self.min_opacity,
            max_speed: self.max_speed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub endpoint: String,
    pub messages_id: String,
    pub form_id: String,
    pub input_id: String,
    pub user_name: String,
    pub assistant_name: String,
    /// Used when the service rejects a request without saying why.
    pub rejected_text: String,
    /// The only thing a user ever sees when a request fails.
    pub apology_text: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            endpoint: "https://api.illussion.art/chat".to_string(),
            messages_id: "chat-messages".to_string(),
            form_id: "chat-form".to_string(),
            input_id: "user-input".to_string(),
            user_name: "You".to_string(),
            assistant_name: "Illussion Neiro".to_string(),
            rejected_text: "Произошла ошибка при получении ответа".to_string(),
            apology_text: "Извините, произошла ошибка. Попробуйте позже.".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub target_id: String,
    pub initial_text: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            target_id: "content".to_string(),
            initial_text: String::new(),
        }
    }
}
