use std::path::PathBuf;

use blockfall_engine::{PieceKind, Shape};
use serde::Serialize;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowShapesArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct ShapeEntry {
    kind: char,
    id: u8,
    size: usize,
    /// Cell values for 0, 90, 180 and 270 degrees clockwise.
    rotations: Vec<Vec<Vec<u8>>>,
}

pub(crate) fn run(arg: &ShowShapesArg) -> anyhow::Result<()> {
    Output::save_json(&shape_entries(), arg.output.clone())
}

fn shape_entries() -> Vec<ShapeEntry> {
    PieceKind::ALL
        .into_iter()
        .map(|kind| {
            let spawn = kind.spawn_shape();
            let rotations = std::iter::successors(Some(spawn), |shape| {
                Some(shape.rotated_clockwise())
            })
            .take(4)
            .map(|shape| shape_values(&shape))
            .collect();
            ShapeEntry {
                kind: kind.as_char(),
                id: kind.id(),
                size: spawn.size(),
                rotations,
            }
        })
        .collect()
}

fn shape_values(shape: &Shape) -> Vec<Vec<u8>> {
    shape
        .to_values()
        .into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}
