use std::fs::File;
use std::io::{BufWriter, LineWriter, Write};
use std::path::Path;

use crate::align::exhaustive::ExhaustiveSweep;
use crate::error::{PerfPanError, Result};
use crate::frame::FrameAlignment;

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| PerfPanError::IoUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Format one result log line. The line is also a valid hint line.
pub fn format_log_line(alignment: &FrameAlignment) -> String {
    let score = alignment.score.unwrap_or(f64::NAN);
    format!(
        " {:6} {:4} {:4} {:9.5} {}",
        alignment.frame,
        alignment.dx,
        alignment.dy,
        score,
        alignment.limit.bits()
    )
}

/// Append-only per-frame result log, flushed line by line so earlier
/// results survive a fatal error later in the run.
pub struct ResultLog {
    writer: LineWriter<File>,
}

impl ResultLog {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self {
            writer: LineWriter::new(create_file(path)?),
        })
    }

    pub fn write_alignment(&mut self, alignment: &FrameAlignment) -> Result<()> {
        writeln!(self.writer, "{}", format_log_line(alignment))?;
        Ok(())
    }
}

/// Score surface dump of exhaustive sweeps, laid out for gnuplot `splot`:
/// one blank line after each row of shifts, two after each frame's block.
pub struct PlotWriter {
    writer: BufWriter<File>,
}

impl PlotWriter {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self {
            writer: BufWriter::new(create_file(path)?),
        })
    }

    pub fn write_sweep(&mut self, frame: usize, sweep: &ExhaustiveSweep) -> Result<()> {
        write_sweep(&mut self.writer, frame, sweep)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Write one sweep block. Rejected candidates are written as `NaN`.
pub fn write_sweep<W: Write>(w: &mut W, frame: usize, sweep: &ExhaustiveSweep) -> Result<()> {
    let min = sweep.min_score.unwrap_or(f64::NAN);
    let max = sweep.max_score.unwrap_or(f64::NAN);
    writeln!(w, "# frame {} min={:.5} max={:.5}", frame, min, max)?;
    for (row, scores) in sweep.scores.rows().into_iter().enumerate() {
        for (col, &score) in scores.iter().enumerate() {
            let shift = sweep.shift_at(row, col);
            writeln!(w, "{} {} {} {:.5}", frame, shift.x, shift.y, score)?;
        }
        writeln!(w)?;
    }
    writeln!(w)?;
    Ok(())
}
