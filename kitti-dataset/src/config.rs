use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Train,
    Val,
    Test,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Train => "train",
            Phase::Val => "val",
            Phase::Test => "test",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Phase::Train),
            "val" => Ok(Phase::Val),
            "test" => Ok(Phase::Test),
            other => Err(format!("unknown phase {:?} (train, val, test)", other)),
        }
    }
}

/// Sequence identifiers per phase.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DataSplit {
    #[serde(default)]
    pub train: Vec<u32>,
    #[serde(default)]
    pub val: Vec<u32>,
    #[serde(default)]
    pub test: Vec<u32>,
}

impl DataSplit {
    pub fn sequences(&self, phase: Phase) -> &[u32] {
        match phase {
            Phase::Train => &self.train,
            Phase::Val => &self.val,
            Phase::Test => &self.test,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DatasetConfig {
    /// Dataset root, the directory holding `sequences/`.
    pub root: PathBuf,
    pub split: DataSplit,

    #[serde(default)]
    pub ground_removal: bool,
    #[serde(default)]
    pub random_rotation: bool,
    #[serde(default)]
    pub random_occlusion: bool,
    #[serde(default)]
    pub random_scale: bool,

    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,

    /// Seeds the augmentation RNG; leave unset for entropy seeding.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_min_scale() -> f32 {
    0.8
}

fn default_max_scale() -> f32 {
    1.2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_parses_from_str() {
        assert_eq!("train".parse::<Phase>().unwrap(), Phase::Train);
        assert_eq!("test".parse::<Phase>().unwrap(), Phase::Test);
        assert!("training".parse::<Phase>().is_err());
    }

    #[test]
    fn split_selects_by_phase() {
        let split = DataSplit {
            train: vec![0, 1, 2],
            val: vec![],
            test: vec![8],
        };
        assert_eq!(split.sequences(Phase::Train), &[0, 1, 2]);
        assert_eq!(split.sequences(Phase::Val), &[] as &[u32]);
        assert_eq!(split.sequences(Phase::Test), &[8]);
    }
}
