use std::path::PathBuf;

use canvas::doc::ElementKind;
use canvas::zorder::Direction;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "layoutboard", about = "Edit and export a layoutboard page from the command line")]
pub struct Cli {
    /// Page state file (the same record the browser editor stores).
    #[arg(long, env = "LAYOUTBOARD_STATE", default_value = "layoutboard.json")]
    pub state: PathBuf,

    /// Answer yes to confirmation prompts.
    #[arg(long, short = 'y', env = "LAYOUTBOARD_ASSUME_YES", default_value_t = false)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Clear the page and restart element ids.
    #[command(alias = "reset")]
    New,
    /// Add an element at the default position.
    Add { kind: KindArg },
    /// Delete an element.
    Delete { id: String },
    /// Move an element one step up or down the layer stack.
    Layer { id: String, direction: DirectionArg },
    /// Set a panel property, e.g. `set elem1 width 240` or `set elem2 bold on`.
    Set { id: String, property: String, value: String },
    /// Drag an element body by a pixel offset.
    Drag {
        id: String,
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
    },
    /// Drag an element's bottom-right handle by a pixel offset.
    Resize {
        id: String,
        #[arg(allow_negative_numbers = true)]
        dx: f64,
        #[arg(allow_negative_numbers = true)]
        dy: f64,
    },
    /// Turn an element about its center by `degrees` (clockwise on screen).
    Rotate {
        id: String,
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },
    /// List layers, bottom first.
    #[command(alias = "layers")]
    List,
    /// Print the render projection as JSON.
    Show,
    /// Export the page as `layout.json` or `layout.html`.
    Export {
        format: ExportFormat,
        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Rectangle,
    Circle,
    Text,
}

impl From<KindArg> for ElementKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Rectangle => Self::Rectangle,
            KindArg::Circle => Self::Circle,
            KindArg::Text => Self::Text,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Up => Self::Up,
            DirectionArg::Down => Self::Down,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Html,
}
