use kitti_core::pointcloud::point::ScanPoint;
use rand::RngCore;

pub mod augment;
pub mod ground;

/// One stage of the preprocessing chain. Stages that draw random numbers
/// take the source through the `rng` argument so callers can seed it.
pub trait ScanTransform {
    fn apply(&self, points: Vec<ScanPoint>, rng: &mut dyn RngCore) -> Vec<ScanPoint>;
}

pub struct CompositeTransform {
    transforms: Vec<Box<dyn ScanTransform>>,
}

impl CompositeTransform {
    pub fn new(transforms: Vec<Box<dyn ScanTransform>>) -> Self {
        Self { transforms }
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl ScanTransform for CompositeTransform {
    fn apply(&self, points: Vec<ScanPoint>, rng: &mut dyn RngCore) -> Vec<ScanPoint> {
        let mut current = points;
        for transform in &self.transforms {
            current = transform.apply(current, rng);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    struct Shift(f32);

    impl ScanTransform for Shift {
        fn apply(&self, mut points: Vec<ScanPoint>, _rng: &mut dyn RngCore) -> Vec<ScanPoint> {
            for p in &mut points {
                p.x += self.0;
            }
            points
        }
    }

    struct Double;

    impl ScanTransform for Double {
        fn apply(&self, mut points: Vec<ScanPoint>, _rng: &mut dyn RngCore) -> Vec<ScanPoint> {
            for p in &mut points {
                p.x *= 2.0;
            }
            points
        }
    }

    #[test]
    fn composite_applies_stages_in_order() {
        let composite = CompositeTransform::new(vec![Box::new(Shift(1.0)), Box::new(Double)]);
        let mut rng = StepRng::new(0, 0);

        let points = vec![ScanPoint::new(3.0, 0.0, 0.0, 0.0)];
        let out = composite.apply(points, &mut rng);

        // (3 + 1) * 2, not 3 * 2 + 1
        assert_eq!(out[0].x, 8.0);
    }

    #[test]
    fn empty_composite_is_identity() {
        let composite = CompositeTransform::new(Vec::new());
        let mut rng = StepRng::new(0, 0);

        let points = vec![ScanPoint::new(1.0, 2.0, 3.0, 0.5)];
        let out = composite.apply(points.clone(), &mut rng);
        assert_eq!(out, points);
    }
}
