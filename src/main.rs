use anyhow::Result;
use badge_icons::icon_gen::{self, ICONS_DIR};
use clap::Parser;
use std::path::Path;

#[derive(Debug, Parser)]
#[clap(
    name = "badge-icons",
    version,
    about = "Generate the 16, 32, 48 and 128 px badge icons into ./icons"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    icon_gen::generate_icons(Path::new(ICONS_DIR))?;
    Ok(())
}
