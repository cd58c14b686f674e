use std::io::IsTerminal;

use anstyle::{AnsiColor, Effects, Style};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

pub(crate) fn current_output_style() -> OutputStyle {
    if std::env::var_os("NO_COLOR").is_some() {
        return OutputStyle::Plain;
    }
    if matches!(std::env::var("TERM").as_deref(), Ok("dumb")) {
        return OutputStyle::Plain;
    }
    if !std::io::stdout().is_terminal() {
        return OutputStyle::Plain;
    }
    OutputStyle::Rich
}

fn heading_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn version_style() -> Style {
    Style::new().fg_color(Some(AnsiColor::BrightCyan.into()))
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

pub(crate) fn render_heading(style: OutputStyle, text: &str) -> String {
    match style {
        OutputStyle::Plain => text.to_string(),
        OutputStyle::Rich => colorize(heading_style(), text),
    }
}

pub(crate) fn render_version_line(style: OutputStyle, version: &str, routines: usize) -> String {
    let noun = if routines == 1 { "routine" } else { "routines" };
    match style {
        OutputStyle::Plain => format!("  {version}: {routines} {noun}"),
        OutputStyle::Rich => format!(
            "  {}: {routines} {noun}",
            colorize(version_style(), version)
        ),
    }
}
