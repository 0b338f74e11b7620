use serde::{Deserialize, Serialize};

use crate::biome::{Biome, FloraRule, TreeSpecies};
use crate::noise::{
    CellularDistance, CellularReturn, DomainWarpKind, FractalKind, NoiseKind, NoiseOctaveConfig,
};

/// Everything the generation pipeline is configured with: world-shape
/// scalars, the biome set, and one noise channel description per concern.
/// Built once at startup; immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationProfile {
    pub base_height: i32,
    pub water_level: i32,
    pub river_chance: f32,
    pub tree_frequency: f32,
    pub biomes: Vec<Biome>,
    pub surface_octaves: Vec<NoiseOctaveConfig>,
    pub biome_octave: NoiseOctaveConfig,
    pub water_octave: NoiseOctaveConfig,
    pub flora_octave: NoiseOctaveConfig,
    pub tree_octaves: Vec<NoiseOctaveConfig>,
}

pub(crate) fn simple_octave(kind: NoiseKind, frequency: f32, amplitude: f32) -> NoiseOctaveConfig {
    NoiseOctaveConfig {
        kind,
        frequency,
        amplitude,
        fractal: FractalKind::None,
        fractal_octaves: 0,
        fractal_gain: 0.0,
        cellular_distance: CellularDistance::Euclidean,
        cellular_return: CellularReturn::CellValue,
        cellular_jitter: 0.0,
        domain_warp: DomainWarpKind::OpenSimplex2,
        domain_warp_amplitude: 0.0,
    }
}

impl Default for GenerationProfile {
    fn default() -> Self {
        Self {
            base_height: 64,
            water_level: 63,
            river_chance: -0.5,
            tree_frequency: 0.5,
            biomes: vec![
                Biome {
                    name: "Desert".to_owned(),
                    surface_block: 9,
                    subsurface_block: 9,
                    trees: vec![TreeSpecies {
                        trunk: 23,
                        leaves: -1,
                        min_height: 1,
                        max_height: 3,
                        chance: 60,
                    }],
                    flora: Vec::new(),
                    place_flora: false,
                    full_flora_chance: 0,
                    weight: 0.161,
                },
                Biome {
                    name: "Forest".to_owned(),
                    surface_block: 4,
                    subsurface_block: 3,
                    trees: vec![
                        TreeSpecies {
                            trunk: 5,
                            leaves: 7,
                            min_height: 5,
                            max_height: 7,
                            chance: 100,
                        },
                        TreeSpecies {
                            trunk: 98,
                            leaves: 7,
                            min_height: 5,
                            max_height: 7,
                            chance: 100,
                        },
                    ],
                    flora: vec![
                        FloraRule {
                            block: 27,
                            weight: 80,
                        },
                        FloraRule {
                            block: 28,
                            weight: 10,
                        },
                        FloraRule {
                            block: 29,
                            weight: 10,
                        },
                    ],
                    place_flora: true,
                    full_flora_chance: 100,
                    weight: 1.0,
                },
                Biome {
                    name: "ForestSpruce".to_owned(),
                    surface_block: 1204,
                    subsurface_block: 3,
                    trees: vec![TreeSpecies {
                        trunk: 99,
                        leaves: 578,
                        min_height: 7,
                        max_height: 9,
                        chance: 75,
                    }],
                    flora: vec![FloraRule {
                        block: 556,
                        weight: 100,
                    }],
                    place_flora: true,
                    full_flora_chance: 1,
                    weight: 0.227,
                },
            ],
            surface_octaves: vec![
                simple_octave(NoiseKind::OpenSimplex2S, 0.012, 4.0),
                simple_octave(NoiseKind::OpenSimplex2S, 0.02, 12.0),
                simple_octave(NoiseKind::Perlin, 1.0, 2.0),
            ],
            biome_octave: NoiseOctaveConfig {
                kind: NoiseKind::Cellular,
                frequency: 0.007,
                amplitude: 2.0,
                fractal: FractalKind::DomainWarpProgressive,
                fractal_octaves: 6,
                fractal_gain: 2.75,
                cellular_distance: CellularDistance::Euclidean,
                cellular_return: CellularReturn::CellValue,
                cellular_jitter: 1.0,
                domain_warp: DomainWarpKind::OpenSimplex2Reduced,
                domain_warp_amplitude: 4.0,
            },
            water_octave: NoiseOctaveConfig {
                kind: NoiseKind::Cellular,
                frequency: 0.003,
                amplitude: 4.0,
                fractal: FractalKind::Ridged,
                fractal_octaves: 1,
                fractal_gain: 0.5,
                cellular_distance: CellularDistance::EuclideanSq,
                cellular_return: CellularReturn::Distance2Div,
                cellular_jitter: 1.0,
                domain_warp: DomainWarpKind::OpenSimplex2,
                domain_warp_amplitude: 12.0,
            },
            flora_octave: simple_octave(NoiseKind::Perlin, 4.56, 1.0),
            tree_octaves: vec![simple_octave(NoiseKind::Perlin, 1.8, 2.0)],
        }
    }
}
