use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};
use glob::glob;

use kitti_core::pointcloud::point::ScanPoint;

use crate::Error;

/// Path of one velodyne scan: `<root>/sequences/<NN>/velodyne/<NNNNNN>.bin`.
pub fn scan_path(root: &Path, sequence: u32, index: u32) -> PathBuf {
    root.join("sequences")
        .join(format!("{:02}", sequence))
        .join("velodyne")
        .join(format!("{:06}.bin", index))
}

/// Lists the scan indices available for a sequence.
///
/// Errors when no `.bin` file matches: either the dataset root is
/// misconfigured or the sequence is absent.
pub fn scan_ids(root: &Path, sequence: u32, sorted: bool) -> Result<Vec<u32>, Error> {
    let pattern = root
        .join("sequences")
        .join(format!("{:02}", sequence))
        .join("velodyne")
        .join("*.bin");

    let mut ids = Vec::new();
    for entry in glob(&pattern.to_string_lossy())? {
        let path = entry.map_err(|e| Error::Io(e.into_error()))?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::BadScanFileName(path.clone()))?;
        let id: u32 = stem
            .parse()
            .map_err(|_| Error::BadScanFileName(path.clone()))?;
        ids.push(id);
    }

    if ids.is_empty() {
        return Err(Error::EmptySequence {
            root: root.to_path_buf(),
            sequence,
        });
    }
    if sorted {
        ids.sort_unstable();
    }

    Ok(ids)
}

/// Reads one scan file: a flat little-endian float32 buffer of
/// (x, y, z, reflectance) groups.
pub fn read_scan(path: &Path) -> Result<Vec<ScanPoint>, Error> {
    let len = std::fs::metadata(path)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if len % 16 != 0 {
        return Err(Error::TruncatedScan {
            path: path.to_path_buf(),
            len,
        });
    }

    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mut raw = vec![0.0f32; (len / 4) as usize];
    reader.read_f32_into::<LittleEndian>(&mut raw)?;

    let points = raw
        .chunks_exact(4)
        .map(|c| ScanPoint::new(c[0], c[1], c[2], c[3]))
        .collect();

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_scan(path: &Path, points: &[[f32; 4]]) {
        let mut bytes = Vec::new();
        for p in points {
            for v in p {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
        }
        fs::write(path, bytes).unwrap();
    }

    fn make_sequence(root: &Path, sequence: u32, ids: &[u32]) {
        let dir = root
            .join("sequences")
            .join(format!("{:02}", sequence))
            .join("velodyne");
        fs::create_dir_all(&dir).unwrap();
        for &id in ids {
            write_scan(&dir.join(format!("{:06}.bin", id)), &[[0.0, 0.0, 0.0, 0.0]]);
        }
    }

    #[test]
    fn scan_path_uses_fixed_pattern() {
        let path = scan_path(Path::new("/data/kitti"), 2, 123);
        assert_eq!(
            path,
            Path::new("/data/kitti/sequences/02/velodyne/000123.bin")
        );
    }

    #[test]
    fn round_trip_is_bit_exact() {
        let dir = tempfile::tempdir().unwrap();
        let input = [
            [1.5, -2.25, 0.0, 0.9],
            [f32::MIN_POSITIVE, 1e20, -1e-20, 0.0],
            [100.0, -0.5, 3.25, 0.125],
        ];
        let path = dir.path().join("000000.bin");
        write_scan(&path, &input);

        let points = read_scan(&path).unwrap();
        assert_eq!(points.len(), 3);
        for (point, expected) in points.iter().zip(&input) {
            assert_eq!(point.x.to_bits(), expected[0].to_bits());
            assert_eq!(point.y.to_bits(), expected[1].to_bits());
            assert_eq!(point.z.to_bits(), expected[2].to_bits());
            assert_eq!(point.reflectance.to_bits(), expected[3].to_bits());
        }
    }

    #[test]
    fn truncated_scan_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("000000.bin");
        fs::write(&path, [0u8; 10]).unwrap();

        let err = read_scan(&path).unwrap_err();
        assert!(matches!(err, Error::TruncatedScan { len: 10, .. }));
    }

    #[test]
    fn missing_scan_is_an_error() {
        let err = read_scan(Path::new("/nonexistent/000000.bin")).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }

    #[test]
    fn scan_ids_sorted_ascending() {
        let dir = tempfile::tempdir().unwrap();
        make_sequence(dir.path(), 5, &[3, 1, 2, 0]);

        let ids = scan_ids(dir.path(), 5, true).unwrap();
        assert_eq!(ids, vec![0, 1, 2, 3]);

        let mut unsorted = scan_ids(dir.path(), 5, false).unwrap();
        unsorted.sort_unstable();
        assert_eq!(unsorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_sequence_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sequences/07/velodyne")).unwrap();

        let err = scan_ids(dir.path(), 7, true).unwrap_err();
        assert!(matches!(err, Error::EmptySequence { sequence: 7, .. }));
    }
}
