use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::Error;

/// Parses a KITTI `times.txt` file into seconds, one value per line.
///
/// The layout is fixed width, `D.DDDDDDe±EE`. The mantissa and exponent
/// are sliced at fixed offsets and recombined as `mantissa * 10^exponent`
/// rather than handed to the float parser whole: the exponent is the last
/// three characters, the mantissa everything but the last one. Lines that
/// do not fit the layout are errors.
pub fn load_timestamps(path: &Path) -> Result<Vec<f64>, Error> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut times = Vec::new();
    for (cnt, line) in reader.lines().enumerate() {
        let line = line?;
        let seconds = parse_timestamp(&line).ok_or_else(|| Error::MalformedTimestamp {
            line: cnt,
            text: line.clone(),
        })?;
        times.push(seconds);
    }

    Ok(times)
}

fn parse_timestamp(line: &str) -> Option<f64> {
    if !line.is_ascii() || line.len() < 4 {
        return None;
    }
    let exponent: f64 = line[line.len() - 3..].parse().ok()?;
    let mantissa: f64 = line[..line.len() - 1].parse().ok()?;
    Some(mantissa * 10f64.powf(exponent))
}
