//! The `matrix` command
//!
//! Reconfigures the background animation through the [`ControlBus`]. Numeric
//! arguments must parse and lie inside the range printed in their usage line;
//! anything else is reported with that usage line.

use std::sync::Arc;

use async_trait::async_trait;

use super::{CommandContext, CommandHandler};
use crate::animation::ControlBus;
use crate::error::{Error, Result};
use crate::models::Output;

const SPEED_USAGE: &str = "Usage: matrix speed <number> (1-10)";
const OPACITY_USAGE: &str = "Usage: matrix opacity <number> (0.1-1.0)";
const COLOR_USAGE: &str = "Usage: matrix color <hex_color> (e.g., #ff0000)";
const CHARSET_USAGE: &str = "Usage: matrix charset <set_name> (matrix, binary, hex, symbols, letters, numbers, katakana, hiragana)";
const FONT_SIZE_USAGE: &str = "Usage: matrix fontsize <number> (8-32)";
const TRAIL_USAGE: &str = "Usage: matrix trail <number> (0.01-0.2)";
const PRESET_USAGE: &str = "Usage: matrix preset <name> (matrix, binary, fire, ocean)";

/// Help text shown for `matrix help`, no subcommand, or an unknown one
pub const MATRIX_HELP: &str = "Matrix animation commands:
  matrix pause    - Pause the animation
  matrix resume   - Resume the animation
  matrix speed <number> - Set animation speed (1-10)
  matrix opacity <number> - Set animation opacity (0.1-1.0)
  matrix color <hex> - Set animation color (e.g., #ff0000)
  matrix charset <set> - Set character set (matrix, binary, hex, symbols, letters, numbers, katakana, hiragana)
  matrix fontsize <number> - Set font size (8-32)
  matrix trail <number> - Set trail opacity (0.01-0.2)
  matrix preset <name> - Apply preset (matrix, binary, fire, ocean)
  matrix status   - Show current animation status
  matrix help     - Show this help message";

/// Named looks: (name, color, character set, confirmation)
const PRESETS: &[(&str, &str, &str, &str)] = &[
    (
        "matrix",
        "#00ff41",
        "matrix",
        "Matrix preset applied: Green color with Japanese characters",
    ),
    (
        "binary",
        "#00ffff",
        "binary",
        "Binary preset applied: Cyan color with binary digits",
    ),
    (
        "fire",
        "#ff0000",
        "symbols",
        "Fire preset applied: Red color with symbols",
    ),
    (
        "ocean",
        "#0080ff",
        "letters",
        "Ocean preset applied: Blue color with letters",
    ),
];

/// Handler for `matrix <subcommand> [value]`
pub struct MatrixCommand {
    bus: Arc<ControlBus>,
}

impl MatrixCommand {
    pub fn new(bus: Arc<ControlBus>) -> Self {
        Self { bus }
    }

    fn run(&self, args: &[String]) -> Result<Output> {
        let subcommand = args.first().map(|s| s.to_lowercase()).unwrap_or_default();
        let value = args.get(1).map(String::as_str);

        match subcommand.as_str() {
            "pause" => {
                self.bus.pause();
                Ok(Output::success("Matrix animation paused"))
            }
            "resume" => {
                self.bus.resume();
                Ok(Output::success("Matrix animation resumed"))
            }
            "speed" => {
                let speed = number_in(value, (1.0, 10.0), "speed", SPEED_USAGE)?;
                self.bus.set_speed(speed);
                Ok(Output::success(format!("Matrix animation speed set to {}", speed)))
            }
            "opacity" => {
                let opacity = number_in(value, (0.1, 1.0), "opacity", OPACITY_USAGE)?;
                self.bus.set_opacity(opacity);
                Ok(Output::success(format!(
                    "Matrix animation opacity set to {}",
                    opacity
                )))
            }
            "color" => {
                let color = required(value, "color", COLOR_USAGE)?;
                self.bus.set_color(color);
                Ok(Output::success(format!("Matrix animation color set to {}", color)))
            }
            "charset" => {
                let charset = required(value, "charset", CHARSET_USAGE)?;
                self.bus.set_character_set(charset);
                Ok(Output::success(format!(
                    "Matrix animation character set changed to {}",
                    charset
                )))
            }
            "fontsize" => {
                let size = number_in(value, (8.0, 32.0), "fontsize", FONT_SIZE_USAGE)?;
                self.bus.set_font_size(size);
                Ok(Output::success(format!(
                    "Matrix animation font size set to {}",
                    size
                )))
            }
            "trail" => {
                let trail = number_in(value, (0.01, 0.2), "trail", TRAIL_USAGE)?;
                self.bus.set_trail_opacity(trail);
                Ok(Output::success(format!(
                    "Matrix animation trail opacity set to {}",
                    trail
                )))
            }
            "preset" => self.apply_preset(required(value, "preset", PRESET_USAGE)?),
            "status" => Ok(Output::info(self.bus.current_state().status_report())),
            _ => Ok(Output::info(MATRIX_HELP)),
        }
    }

    fn apply_preset(&self, name: &str) -> Result<Output> {
        let Some((_, color, charset, message)) = PRESETS
            .iter()
            .find(|(preset, ..)| preset.eq_ignore_ascii_case(name))
        else {
            return Ok(Output::error("Available presets: matrix, binary, fire, ocean"));
        };

        self.bus.set_color(color);
        self.bus.set_character_set(charset);
        Ok(Output::success(*message))
    }
}

#[async_trait]
impl CommandHandler for MatrixCommand {
    async fn execute(&self, _ctx: &CommandContext<'_>, args: &[String]) -> Result<Output> {
        self.run(args)
    }
}

fn required<'a>(value: Option<&'a str>, parameter: &str, usage: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::invalid_parameter(parameter, usage))
}

fn number_in(
    value: Option<&str>,
    (min, max): (f64, f64),
    parameter: &str,
    usage: &str,
) -> Result<f64> {
    required(value, parameter, usage)?
        .parse::<f64>()
        .ok()
        .filter(|n| (min..=max).contains(n))
        .ok_or_else(|| Error::invalid_parameter(parameter, usage))
}
