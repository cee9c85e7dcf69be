//! Entry point for dcmlist's CLI tool.

use clap::Parser;

use dcmlist::core::*;
use dcmlist::p10::*;

#[derive(Parser)]
#[command(
  name = "dcmlist",
  bin_name = "dcmlist",
  version = env!("CARGO_PKG_VERSION"),
  about = "dcmlist prints the structure and content of a DICOM P10 file",
  max_term_width = 80
)]
struct Cli {
  #[arg(help = "The DICOM P10 file to print")]
  input_filename: String,
}

fn main() -> Result<(), ()> {
  let cli = Cli::parse();

  let stdout = std::io::stdout();

  match print_file(
    &cli.input_filename,
    &mut stdout.lock(),
    &PrintOptions::new(),
  ) {
    Ok(()) => Ok(()),
    Err(e) => {
      e.print(&format!("printing file \"{}\"", cli.input_filename));
      Err(())
    }
  }
}
