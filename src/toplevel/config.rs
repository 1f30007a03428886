use std::path::Path;
use std::time::Duration;

use super::super::components::stroke::Stroke;
use super::super::components::stroke::DEFAULT_LINE_WIDTH;
use super::error::Error;
use super::palette::parse_color;

#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub spiral: SpiralSettings,
    pub style: StyleSettings,
    pub window: WindowSettings,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SpiralSettings {
    pub t: f64,
    pub square_number: usize,
    #[serde(with = "serde_duration")]
    pub delay: Duration,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct StyleSettings {
    pub color: String,
    pub background: String,
    pub canvas_divisor: f64,
    pub stroke_divisor: f64,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct WindowSettings {
    pub size: (u32, u32),
    pub title: String,
    pub hint: String,
}

impl Default for SpiralSettings {
    fn default() -> Self {
        Self {
            t: 0.1,
            square_number: 50,
            delay: Duration::from_millis(100),
        }
    }
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            color: "#f2c".into(),
            background: "#000".into(),
            canvas_divisor: 2.2,
            stroke_divisor: 500.0,
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            size: (960, 540),
            title: "spiral".into(),
            hint: "click anywhere to draw".into(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let config = match path {
            Some(path) => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.spiral.validate()?;
        self.style.validate()
    }
}

impl SpiralSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.square_number == 0 {
            Err(Error::InvalidConfig("square number must be positive".into()))?;
        }
        if !self.t.is_finite() {
            Err(Error::InvalidConfig(format!(
                "interpolation factor must be finite, got {}",
                self.t
            )))?;
        }
        Ok(())
    }

    /// Factors for the four canvases, mirrored so neighbours spin in opposite directions.
    pub fn factors(&self) -> [f64; 4] {
        let t = self.t;
        [1.0 - t, t, t, 1.0 - t]
    }
}

impl StyleSettings {
    pub fn validate(&self) -> Result<(), Error> {
        for (name, divisor) in [
            ("canvas divisor", self.canvas_divisor),
            ("stroke divisor", self.stroke_divisor),
        ] {
            if !(divisor.is_finite() && divisor > 0.0) {
                Err(Error::InvalidConfig(format!(
                    "{name} must be positive, got {divisor}"
                )))?;
            }
        }
        parse_color(&self.color)?;
        parse_color(&self.background)?;
        Ok(())
    }

    pub fn stroke(&self, layout: &Layout) -> Result<Stroke, Error> {
        Ok(Stroke {
            width: layout.line_width,
            color: parse_color(&self.color)?,
        })
    }
}

/// Canvas dimensions derived from the viewport at the moment drawing starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub canvas_size: u32,
    pub line_width: f64,
}

impl Layout {
    pub fn from_viewport(width: f64, height: f64, style: &StyleSettings) -> Self {
        // Fractional canvas sizes truncate.
        let canvas_size = (width.min(height) / style.canvas_divisor).floor().max(0.0) as u32;
        let line_width = (width / style.stroke_divisor).round();
        if line_width <= 0.0 {
            log::warn!(
                "stroke width rounds to {line_width} for viewport width {width}, keeping {DEFAULT_LINE_WIDTH}"
            );
        }
        Self {
            canvas_size,
            // A zero line width is ignored by the context.
            line_width: if line_width > 0.0 {
                line_width
            } else {
                DEFAULT_LINE_WIDTH
            },
        }
    }
}

mod serde_duration {
    use std::time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'d, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: serde::Deserializer<'d>,
    {
        let value: String = serde::Deserialize::deserialize(deserializer)?;
        humantime::parse_duration(&value).map_err(serde::de::Error::custom)
    }
}
