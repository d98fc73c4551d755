use crate::transform::augment::{RandomOcclusion, RandomRotation, RandomScale};
use crate::transform::ground::GroundRemoval;
use crate::transform::{CompositeTransform, ScanTransform};

/// Assembles the preprocessing chain in its fixed order: ground removal,
/// custom stage, rotation, occlusion, scale.
#[derive(Default)]
pub struct PreprocessBuilder {
    ground_removal: bool,
    custom: Option<Box<dyn ScanTransform>>,
    rotation: Option<RandomRotation>,
    occlusion: Option<RandomOcclusion>,
    scale: Option<RandomScale>,
}

impl PreprocessBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ground_removal(mut self) -> Self {
        self.ground_removal = true;
        self
    }

    /// Injects an opaque stage between ground removal and the random
    /// augmentations, e.g. a model-specific downsampling step.
    pub fn with_custom(mut self, transform: Box<dyn ScanTransform>) -> Self {
        self.custom = Some(transform);
        self
    }

    pub fn with_rotation(mut self, rotation: RandomRotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_occlusion(mut self, occlusion: RandomOcclusion) -> Self {
        self.occlusion = Some(occlusion);
        self
    }

    pub fn with_scale(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.scale = Some(RandomScale::new(min_scale, max_scale));
        self
    }

    pub fn build(self) -> CompositeTransform {
        let mut transforms: Vec<Box<dyn ScanTransform>> = Vec::new();
        if self.ground_removal {
            transforms.push(Box::new(GroundRemoval::new()));
        }
        if let Some(custom) = self.custom {
            transforms.push(custom);
        }
        if let Some(rotation) = self.rotation {
            transforms.push(Box::new(rotation));
        }
        if let Some(occlusion) = self.occlusion {
            transforms.push(Box::new(occlusion));
        }
        if let Some(scale) = self.scale {
            transforms.push(Box::new(scale));
        }
        CompositeTransform::new(transforms)
    }
}
