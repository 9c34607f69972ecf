//! Built-in commands
//!
//! Most of these only present profile content from the configuration. The
//! text is rendered once, when the registry is built; only `date`, `resume`
//! and `sudo` compute anything per call.

use std::sync::Arc;

use chrono::Local;
use rand::seq::SliceRandom;

use super::matrix::MatrixCommand;
use super::{Command, CommandContext, CommandRegistry};
use crate::animation::ControlBus;
use crate::config::{Config, ProfileConfig, ProfileItem};
use crate::error::Result;
use crate::models::Output;

/// Format of the `date` command
pub const DATE_FORMAT: &str = "%A, %B %-d, %Y %I:%M:%S %p";

/// Confirmation printed by `theme`
pub const THEME_TOGGLED: &str = "Theme toggled successfully!";

const SUDO_RESPONSES: &[&str] = &[
    "Nice try! But this is a portfolio, not a real terminal.",
    "Access denied. You don't have sudo privileges here!",
    "sudo: portfolio: command not found in real world",
    "Error: Cannot grant admin access to a demo terminal",
    "sudo make me a sandwich? I'm a terminal, not a kitchen!",
];

/// Build the registry with every built-in command
pub fn default_registry(config: &Config, bus: Arc<ControlBus>) -> CommandRegistry {
    let profile = &config.profile;
    let delay = config.terminal.typing_delay_ms;
    let mut registry = CommandRegistry::new();

    registry.register(Command::from_fn(
        "help",
        "Display all available commands with descriptions",
        help,
    ));
    registry.register(static_markup(
        "about",
        "Show personal introduction and background",
        render_about(profile),
        Some(delay),
    ));
    registry.register(static_markup(
        "skills",
        "Display technical skills with proficiency levels",
        render_items("Core skills", &profile.skills, ItemStyle::Labelled),
        None,
    ));
    registry.register(static_markup(
        "projects",
        "Show portfolio projects",
        render_items("Projects", &profile.projects, ItemStyle::Dashed),
        Some(delay),
    ));
    registry.register(static_markup(
        "contact",
        "Display contact information and social links",
        format!(
            "{}\n\nFeel free to reach out for opportunities, collaborations, or just to say hello!",
            render_items("Contact", &profile.contact, ItemStyle::Labelled)
        ),
        None,
    ));
    registry.register(static_markup(
        "experience",
        "List professional work experience",
        render_experience(profile),
        Some(delay),
    ));
    registry.register(static_markup(
        "education",
        "Show educational background and qualifications",
        render_list("Education", &profile.education),
        None,
    ));

    let resume_url = profile.resume_url.clone();
    registry.register(Command::from_fn(
        "resume",
        "Download or view resume",
        move |_, _| {
            Ok(Output::info(format!(
                "# Resume\n\nDownload the resume: {}\n\nResume last updated: {}",
                resume_url,
                Local::now().format("%-m/%-d/%Y")
            ))
            .markup())
        },
    ));

    registry.register(
        Command::from_fn("clear", "Clear the terminal screen", |_, _| {
            Ok(Output::info(""))
        })
        .with_alias("cls"),
    );
    registry.register(static_markup(
        "whoami",
        "Display current user information",
        render_whoami(),
        None,
    ));
    registry.register(Command::from_fn(
        "date",
        "Show current date and time",
        |_, _| Ok(Output::info(Local::now().format(DATE_FORMAT).to_string())),
    ));
    registry.register(Command::from_fn(
        "sudo",
        "Execute commands with administrator privileges",
        |_, _| {
            let response = SUDO_RESPONSES
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or("Access denied.");
            Ok(Output::warning(response))
        },
    ));
    registry.register(Command::from_fn(
        "theme",
        "Toggle between dark and light themes",
        |_, _| Ok(Output::success(THEME_TOGGLED)),
    ));
    registry.register(Command::new(
        "matrix",
        "Control Matrix background animation",
        MatrixCommand::new(bus),
    ));
    registry.register(static_markup(
        "languages",
        "Display spoken languages proficiency",
        render_items("Languages", &profile.languages, ItemStyle::Dashed),
        None,
    ));
    registry.register(static_markup(
        "proglangs",
        "Display programming languages proficiency",
        render_items(
            "Programming languages",
            &profile.programming_languages,
            ItemStyle::Dashed,
        ),
        None,
    ));
    registry.register(static_markup(
        "interests",
        "Display personal interests and hobbies",
        render_items("Interests", &profile.interests, ItemStyle::Dashed),
        None,
    ));

    registry
}

fn help(ctx: &CommandContext<'_>, _args: &[String]) -> Result<Output> {
    let listing: Vec<String> = ctx
        .registry
        .commands()
        .iter()
        .map(|command| format!("- **{}** - {}", command.name(), command.description()))
        .collect();

    Ok(Output::info(format!(
        "# Available commands\n\n{}\n\nTip: Use Tab for auto-completion and Up/Down for command history.",
        listing.join("\n")
    ))
    .markup())
}

/// Command that always answers with the same markup
fn static_markup(
    name: &str,
    description: &str,
    content: String,
    reveal_delay_ms: Option<u64>,
) -> Command {
    Command::from_fn(name, description, move |_, _| {
        let output = Output::info(content.clone()).markup();
        Ok(match reveal_delay_ms {
            Some(delay) if delay > 0 => output.with_reveal_delay(delay),
            _ => output,
        })
    })
}

#[derive(Clone, Copy)]
enum ItemStyle {
    /// `- **label:** detail`
    Labelled,
    /// `- **label** - detail`
    Dashed,
}

fn render_items(heading: &str, items: &[ProfileItem], style: ItemStyle) -> String {
    let mut out = format!("# {}\n", heading);
    for item in items {
        out.push('\n');
        match (style, item.detail.is_empty()) {
            (_, true) => out.push_str(&format!("- **{}**", item.label)),
            (ItemStyle::Labelled, false) => {
                out.push_str(&format!("- **{}:** {}", item.label, item.detail))
            }
            (ItemStyle::Dashed, false) => {
                out.push_str(&format!("- **{}** - {}", item.label, item.detail))
            }
        }
    }
    out
}

fn render_list(heading: &str, lines: &[String]) -> String {
    let mut out = format!("# {}\n", heading);
    for line in lines {
        out.push_str(&format!("\n- {}", line));
    }
    out
}

fn render_about(profile: &ProfileConfig) -> String {
    let mut out = format!("# {}\n**{}**", profile.name, profile.title);
    if !profile.location.is_empty() {
        out.push_str(&format!("\n{}", profile.location));
    }
    out.push_str(&format!("\n\n{}", profile.about));
    out
}

fn render_experience(profile: &ProfileConfig) -> String {
    let mut out = String::from("# Experience");
    for position in &profile.experience {
        out.push_str(&format!("\n\n**{}**\n{}", position.role, position.company));
        if !position.location.is_empty() {
            out.push_str(&format!(" - {}", position.location));
        }
        if !position.period.is_empty() {
            out.push_str(&format!("\n{}", position.period));
        }
        for highlight in &position.highlights {
            out.push_str(&format!("\n- {}", highlight));
        }
    }
    out
}

fn render_whoami() -> String {
    [
        "**User:** guest".to_string(),
        "**Host:** portfolio-terminal".to_string(),
        format!("**Shell:** matrixterm v{}", env!("CARGO_PKG_VERSION")),
        format!("**Platform:** {}", std::env::consts::OS),
        "**Access Level:** Visitor".to_string(),
    ]
    .join("\n")
}
