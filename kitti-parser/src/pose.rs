use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::{Matrix3, Matrix4, Vector3};

use kitti_core::pose::{PoseMap, Position};

use crate::Error;

/// Fixed camera-to-LiDAR extrinsic of the KITTI odometry sensor rig.
pub fn cam_to_velo() -> Matrix4<f64> {
    let r = Matrix3::new(
        7.533745e-3,
        -9.999714e-1,
        -6.166020e-4,
        1.480249e-2,
        7.280733e-4,
        -9.998902e-1,
        9.998621e-1,
        7.523790e-3,
        1.480755e-2,
    );
    let t = Vector3::new(-4.069766e-3, -7.631618e-2, -2.717806e-1);

    let mut m = Matrix4::identity();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
    m.fixed_view_mut::<3, 1>(0, 3).copy_from(&t);
    m
}

/// Parses a KITTI pose file into poses keyed by frame index plus the raw
/// trajectory positions.
///
/// Each line holds a row-major 3x4 matrix, optionally preceded by an
/// explicit frame index (13 fields instead of 12); without one, the line
/// number is the frame index. The returned poses are converted to LiDAR
/// frame by right-multiplying the extrinsic; the position list keeps the
/// *uncorrected* translation with axes reordered as (x, z, y).
pub fn load_poses(path: &Path) -> Result<(PoseMap, Vec<Position>), Error> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let cam2velo = cam_to_velo();

    let mut transforms = BTreeMap::new();
    let mut positions = Vec::new();

    for (cnt, line) in reader.lines().enumerate() {
        let line = line?;
        let fields = line
            .split_whitespace()
            .map(|field| {
                field.parse::<f64>().map_err(|_| Error::MalformedPoseField {
                    line: cnt,
                    field: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, Error>>()?;

        let with_idx = match fields.len() {
            12 => false,
            13 => true,
            count => return Err(Error::MalformedPoseLine { line: cnt, count }),
        };
        let offset = with_idx as usize;

        let mut p = Matrix4::<f64>::identity();
        for row in 0..3 {
            for col in 0..4 {
                p[(row, col)] = fields[row * 4 + col + offset];
            }
        }

        let frame_idx = if with_idx {
            let raw = fields[0];
            if raw.fract() != 0.0 {
                return Err(Error::BadFrameIndex {
                    line: cnt,
                    value: raw,
                });
            }
            raw as i64
        } else {
            cnt as i64
        };

        transforms.insert(frame_idx, p * cam2velo);
        positions.push([p[(0, 3)], p[(2, 3)], p[(1, 3)]]);
    }

    Ok((transforms, positions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_lines(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    const IDENTITY_LINE: &str = "1 0 0 0 0 1 0 0 0 0 1 0";

    #[test]
    fn implicit_index_uses_line_position() {
        let file = write_lines(&[
            "1 0 0 1 0 1 0 0 0 0 1 0",
            "1 0 0 2 0 1 0 0 0 0 1 0",
            "1 0 0 3 0 1 0 0 0 0 1 0",
            IDENTITY_LINE,
        ]);

        let (transforms, positions) = load_poses(file.path()).unwrap();
        assert_eq!(transforms.len(), 4);
        assert_eq!(positions.len(), 4);

        // Identity at line 3: the corrected pose is the bare extrinsic.
        assert_eq!(transforms[&3], cam_to_velo());
        assert_eq!(positions[3], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn explicit_index_overrides_line_position() {
        let file = write_lines(&["5 1 0 0 0 0 1 0 0 0 0 1 0"]);

        let (transforms, _) = load_poses(file.path()).unwrap();
        assert_eq!(transforms.len(), 1);
        assert_eq!(transforms[&5], cam_to_velo());
    }

    #[test]
    fn corrected_pose_right_multiplies_extrinsic() {
        let file = write_lines(&["1 0 0 1 0 1 0 2 0 0 1 3"]);

        let (transforms, _) = load_poses(file.path()).unwrap();
        let p = Matrix4::new(
            1.0, 0.0, 0.0, 1.0, //
            0.0, 1.0, 0.0, 2.0, //
            0.0, 0.0, 1.0, 3.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        assert_eq!(transforms[&0], p * cam_to_velo());
    }

    #[test]
    fn positions_keep_uncorrected_translation_reordered() {
        let file = write_lines(&["1 0 0 1 0 1 0 2 0 0 1 3"]);

        let (_, positions) = load_poses(file.path()).unwrap();
        assert_eq!(positions, vec![[1.0, 3.0, 2.0]]);
    }

    #[test]
    fn wrong_field_count_is_an_error() {
        let file = write_lines(&[IDENTITY_LINE, "1 2 3"]);

        let err = load_poses(file.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedPoseLine { line: 1, count: 3 }
        ));
    }

    #[test]
    fn non_numeric_field_is_an_error() {
        let file = write_lines(&["1 0 0 abc 0 1 0 0 0 0 1 0"]);

        let err = load_poses(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedPoseField { line: 0, .. }));
    }

    #[test]
    fn fractional_explicit_index_is_an_error() {
        let file = write_lines(&["5.5 1 0 0 0 0 1 0 0 0 0 1 0"]);

        let err = load_poses(file.path()).unwrap_err();
        assert!(matches!(err, Error::BadFrameIndex { line: 0, .. }));
    }
}
