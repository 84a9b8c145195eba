use crate::{point::Point, Result};
use std::path::Path;

/// Write **points** as comma-separated text: a `x,y` header row followed by one integer record per line.
pub fn save_points<P: AsRef<Path>>(path: P, points: &[Point<i64>]) -> Result<()> {
    // header is written explicitly, so it is present even for an empty set
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path.as_ref())?;
    wtr.write_record(&["x", "y"])?;
    for p in points {
        wtr.serialize(p)?;
    }
    wtr.flush()?;
    log::debug!("wrote {} points to {}", points.len(), path.as_ref().display());
    Ok(())
}

/// Read points in the format written by [`save_points`].
pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point<i64>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    let points = rdr.deserialize().collect::<std::result::Result<Vec<Point<i64>>, csv::Error>>()?;
    log::debug!("read {} points from {}", points.len(), path.as_ref().display());
    Ok(points)
}
