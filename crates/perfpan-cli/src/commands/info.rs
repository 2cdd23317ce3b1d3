use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use perfpan_core::frame::ShiftBounds;
use perfpan_core::io::ser::SerReader;
use perfpan_core::mask::is_binary;

use super::open_source;

#[derive(Args)]
pub struct InfoArgs {
    /// Input SER file or image directory
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    if args.file.is_dir() {
        println!("Directory:   {}", args.file.display());
    } else {
        let reader = SerReader::open(&args.file)?;
        let info = reader.source_info(&args.file);

        println!("File:        {}", info.filename.display());
        println!("Bit depth:   {}", info.bit_depth);
        println!("Color mode:  {:?}", info.color_mode);
        if let Some(ref obs) = info.observer {
            println!("Observer:    {}", obs);
        }
        if let Some(ref inst) = info.instrument {
            println!("Instrument:  {}", inst);
        }

        let frame_bytes = reader.frame_size();
        let total_mb = (frame_bytes * info.total_frames) as f64 / (1024.0 * 1024.0);
        println!("Data size:   {:.1} MB", total_mb);

        if !reader.header.is_mask_compatible() {
            println!("Mask input:  no (8-bit mono required)");
            return Ok(());
        }
    }

    let source = open_source(&args.file)?;
    println!("Frames:      {}", source.frame_count());
    if source.frame_count() == 0 {
        return Ok(());
    }

    let (width, height) = source.dimensions()?;
    let bounds = ShiftBounds::for_frame(width, height);
    let (cols, rows) = bounds.grid_size();
    println!("Dimensions:  {}x{}", width, height);

    let first = source.read_mask(0)?;
    println!(
        "Binary:      {}",
        if is_binary(&first) {
            "yes"
        } else {
            "no (use --level or --otsu when aligning)"
        }
    );
    println!(
        "Shift range: x {}..{}, y {}..{} ({} candidates)",
        bounds.min_x + 1,
        bounds.max_x - 1,
        bounds.min_y + 1,
        bounds.max_y - 1,
        cols * rows
    );

    Ok(())
}
