use std::io::IsTerminal;

use crate::{DataElementTag, ValueLength, ValueRepresentation};

/// Configurable options used when printing a listing to stdout.
///
#[derive(Clone, Debug, PartialEq)]
pub struct PrintOptions {
  /// Whether to include styling such as colored text. This should only be used
  /// when printing to a terminal that supports color.
  ///
  /// By default this is set based on automatically detecting whether the output
  /// stream supports color.
  pub styled: bool,
}

impl PrintOptions {
  /// Constructs new print options and auto-detects output settings when
  /// possible.
  ///
  pub fn new() -> Self {
    let is_terminal = std::io::stdout().is_terminal();
    let color_support =
      supports_color::on(supports_color::Stream::Stdout).is_some();

    Self {
      styled: is_terminal && color_support,
    }
  }

  /// Sets the [`PrintOptions::styled`] value.
  ///
  pub fn styled(self, styled: bool) -> Self {
    Self { styled, ..self }
  }
}

impl Default for PrintOptions {
  fn default() -> Self {
    Self::new()
  }
}

/// Formats the start of a listing line for a data element, item, or delimiter,
/// i.e. everything before its value or marker, e.g. `"  (0008,0020) DA(8)"`.
///
/// Each level of indent is two spaces. When there is no VR the length follows
/// the tag directly, e.g. `"(fffe,e000) (12)"`.
///
pub fn format_data_element_prefix(
  tag: DataElementTag,
  vr: Option<ValueRepresentation>,
  length: ValueLength,
  indent: usize,
  print_options: &PrintOptions,
) -> String {
  let tag = tag.to_string();
  let vr = vr.map(|vr| vr.to_string()).unwrap_or_default();
  let length = format!("({})", length);

  let (tag, vr, length) = if print_options.styled {
    (text_blue(&tag), text_green(&vr), text_cyan_and_reset(&length))
  } else {
    (tag, vr, length)
  };

  let empty = "";

  format!("{empty:indent$}{tag} {vr}{length}", indent = indent * 2)
}

// Simple helpers for coloring text on the terminal. These avoid the resets
// that a general purpose styling crate would insert between each part.

fn text_blue(s: &str) -> String {
  format!("\u{001b}[34m{}", s)
}

fn text_cyan_and_reset(s: &str) -> String {
  format!("\u{001b}[36m{}\u{001b}[0m", s)
}

fn text_green(s: &str) -> String {
  format!("\u{001b}[32m{}", s)
}
