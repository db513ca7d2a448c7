use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indoc::indoc;

use float_panels::config::PanelSettings;
use float_panels::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use float_panels::runner::{Desk, run_desk};
use float_panels::tracing_sub;

const AFTER_HELP: &str = indoc! {"
    Controls:
      drag a panel by its title bar with the mouse
      Tab / Shift+Tab   move focus between panel title bars
      Enter or Space    grab / release the focused panel
      arrow keys        move a grabbed panel (Shift: coarse, Ctrl: fine)
      [_] / [x]         minimize / close; click a dock entry to restore
      Ctrl+Q            quit
"};

#[derive(Parser, Debug)]
#[command(
    name = "float-panels",
    version = env!("CARGO_PKG_VERSION"),
    about = "Draggable floating panels in the terminal",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Number of panels to open.
    #[arg(short = 'n', long = "panels", default_value_t = 3)]
    panels: usize,

    /// Append log output to this file.
    #[arg(long = "log", value_name = "PATH")]
    log: Option<PathBuf>,

    /// Focus order given to panel handles that do not set one.
    #[arg(long = "focus-order", default_value_t = 0)]
    focus_order: i32,

    /// Column of the left edge the tiled placement starts from.
    #[arg(long = "base-left", default_value_t = 2)]
    base_left: i32,

    /// Cells each new panel is offset from the previous one (both axes).
    #[arg(long = "tile-offset", default_value_t = 2)]
    tile_offset: i32,
}

impl Cli {
    fn settings(&self) -> PanelSettings {
        PanelSettings::new()
            .with_base_left(self.base_left)
            .with_tile_offset(self.tile_offset, self.tile_offset)
            .with_default_focus_order(self.focus_order)
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    tracing_sub::init_for_tui(cli.log.as_deref())?;

    let mut desk = Desk::with_panels(cli.settings(), cli.panels)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let mut output = ConsoleOutputDriver::new()?;
    run_desk(
        &mut output,
        ConsoleInputDriver::new(),
        &mut desk,
        Duration::from_millis(16),
    )
}
