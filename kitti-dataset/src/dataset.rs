use std::cell::RefCell;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use kitti_core::pointcloud::point::{Scan, ScanMeta};
use kitti_parser::scan::{read_scan, scan_ids, scan_path};
use kitti_transform::transform::augment::{RandomOcclusion, RandomRotation};
use kitti_transform::{CompositeTransform, PreprocessBuilder, ScanTransform};

use crate::config::{DatasetConfig, Phase};
use crate::error::DatasetError;

/// Index over the scans of the configured sequences. Built once at
/// construction and immutable afterwards; every access re-reads the scan
/// from disk and re-runs the preprocessing chain.
pub struct KittiDataset {
    phase: Phase,
    config: DatasetConfig,
    entries: Vec<(u32, u32)>,
    preprocess: CompositeTransform,
    rng: RefCell<StdRng>,
}

impl std::fmt::Debug for KittiDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KittiDataset").finish_non_exhaustive()
    }
}

impl KittiDataset {
    pub fn new(phase: Phase, config: DatasetConfig) -> Result<Self, DatasetError> {
        Self::with_custom_transform(phase, config, None)
    }

    /// Like [`KittiDataset::new`], with an opaque extra stage between
    /// ground removal and the random augmentations.
    pub fn with_custom_transform(
        phase: Phase,
        config: DatasetConfig,
        custom: Option<Box<dyn ScanTransform>>,
    ) -> Result<Self, DatasetError> {
        info!(
            "loading the {} subset from {}",
            phase,
            config.root.display()
        );
        if config.ground_removal {
            info!("ground plane removal enabled");
        }

        let sequences = config.split.sequences(phase);
        let mut entries = Vec::new();
        for &sequence in sequences {
            for id in scan_ids(&config.root, sequence, true)? {
                entries.push((sequence, id));
            }
        }
        info!(
            "{} scans indexed over {} sequences",
            entries.len(),
            sequences.len()
        );

        let mut builder = PreprocessBuilder::new();
        if config.ground_removal {
            builder = builder.with_ground_removal();
        }
        if let Some(custom) = custom {
            builder = builder.with_custom(custom);
        }
        if config.random_rotation {
            builder = builder.with_rotation(RandomRotation::default());
        }
        if config.random_occlusion {
            builder = builder.with_occlusion(RandomOcclusion::default());
        }
        if config.random_scale {
            builder = builder.with_scale(config.min_scale, config.max_scale);
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            phase,
            preprocess: builder.build(),
            entries,
            rng: RefCell::new(rng),
            config,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The (sequence, scan index) pairs backing the dataset, in sequence
    /// order and ascending within each sequence.
    pub fn entries(&self) -> &[(u32, u32)] {
        &self.entries
    }

    /// Loads and preprocesses the scan at `index`.
    pub fn get(&self, index: usize) -> Result<Scan, DatasetError> {
        let &(sequence, scan_index) =
            self.entries.get(index).ok_or(DatasetError::OutOfRange {
                index,
                len: self.entries.len(),
            })?;

        let path = scan_path(&self.config.root, sequence, scan_index);
        let points = read_scan(&path)?;

        let mut rng = self.rng.borrow_mut();
        let points = self.preprocess.apply(points, &mut *rng);

        Ok(Scan::new(
            points,
            ScanMeta {
                sequence,
                index: scan_index,
            },
        ))
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<Scan, DatasetError>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}
