//! File I/O for saving and loading layouts.
//!
//! A saved layout is two files in the target directory:
//! - `layout.txt`: the seed followed by the text rendering;
//! - `layout.json`: the full [`Layout`], used to load it back.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::generator::Layout;

pub const LAYOUT_TXT: &str = "layout.txt";
pub const LAYOUT_JSON: &str = "layout.json";

/// Saves `layout` as text and JSON inside `dir`.
pub fn save(layout: &Layout, dir: &Path) -> std::io::Result<()> {
    save_text(layout, &dir.join(LAYOUT_TXT))?;
    save_json(layout, &dir.join(LAYOUT_JSON))?;
    debug!("saved layout (seed {}) to {}", layout.seed, dir.display());
    Ok(())
}

/// Path of the JSON file [`save`] writes into `dir`.
pub fn json_path(dir: &Path) -> PathBuf {
    dir.join(LAYOUT_JSON)
}

fn save_text(layout: &Layout, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "Seed: {}\n", layout.seed)?;
    write!(file, "{layout}")?;
    Ok(())
}

fn save_json(layout: &Layout, path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, layout)?;
    writer.flush()
}

/// Loads a layout from a JSON file written by [`save`].
pub fn load(path: &Path) -> Option<Layout> {
    let file = File::open(path).ok()?;
    serde_json::from_reader(BufReader::new(file)).ok()
}
