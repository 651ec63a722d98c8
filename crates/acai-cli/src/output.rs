// Copyright (C) 2026  ACAI Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Shared output formatting for the `acai` command.
//!
//! Progress text goes to stdout, errors to stderr. Each line is built by a
//! `*_line` function so the text can be checked without a terminal.

use console::style;

/// Print a success message with a green checkmark.
pub fn success(msg: &str) {
    println!("{}", success_line(msg));
}

/// Print an error message to stderr with a red cross.
pub fn error(msg: &str) {
    eprintln!("{}", error_line(msg));
}

/// Print an informational message.
pub fn info(msg: &str) {
    println!("{}", info_line(msg));
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("{}", warning_line(msg));
}

/// Print a detail line with key-value formatting.
pub fn detail(key: &str, value: &str) {
    println!("{}", detail_line(key, value));
}

/// Print a progress indicator message.
pub fn progress(msg: &str) {
    println!("{}", progress_line(msg));
}

fn success_line(msg: &str) -> String {
    format!("{} {}", style("✅").green().bold(), msg)
}

fn error_line(msg: &str) -> String {
    format!("{} {}", style("❌").for_stderr().red().bold(), msg)
}

fn info_line(msg: &str) -> String {
    format!("{} {}", style("ℹ️").cyan(), msg)
}

fn warning_line(msg: &str) -> String {
    format!("{} {}", style("⚠️").yellow(), msg)
}

fn detail_line(key: &str, value: &str) -> String {
    format!("  {}: {}", key, style(value).cyan())
}

fn progress_line(msg: &str) -> String {
    format!("{} {}", style("🔄").cyan(), msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;

    #[test]
    fn test_lines_carry_icon_and_message() {
        assert_eq!(strip_ansi_codes(&success_line("done")), "✅ done");
        assert_eq!(strip_ansi_codes(&error_line("ERROR: boom")), "❌ ERROR: boom");
        assert_eq!(strip_ansi_codes(&info_line("Connecting")), "ℹ️ Connecting");
        assert_eq!(strip_ansi_codes(&warning_line("careful")), "⚠️ careful");
        assert_eq!(strip_ansi_codes(&progress_line("Uploading")), "🔄 Uploading");
    }

    #[test]
    fn test_detail_line_is_indented() {
        assert_eq!(
            strip_ansi_codes(&detail_line("Label", "LetsEncrypt prod 2024-01-01")),
            "  Label: LetsEncrypt prod 2024-01-01"
        );
    }
}
