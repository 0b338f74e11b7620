use fastnoise_lite::{
    CellularDistanceFunction, CellularReturnType, DomainWarpType, FastNoiseLite, FractalType,
    NoiseType,
};
use serde::{Deserialize, Serialize};

/// Noise algorithm selector, mirroring the configurable surface of the
/// generation profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseKind {
    OpenSimplex2,
    OpenSimplex2S,
    Cellular,
    Perlin,
    ValueCubic,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractalKind {
    None,
    FBm,
    Ridged,
    PingPong,
    DomainWarpProgressive,
    DomainWarpIndependent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellularDistance {
    Euclidean,
    EuclideanSq,
    Manhattan,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellularReturn {
    CellValue,
    Distance,
    Distance2,
    Distance2Add,
    Distance2Sub,
    Distance2Mul,
    Distance2Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainWarpKind {
    OpenSimplex2,
    OpenSimplex2Reduced,
    BasicGrid,
}

/// Declarative description of one noise channel. Loaded once at startup
/// and immutable afterwards; every field maps onto the matching
/// generator setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseOctaveConfig {
    pub kind: NoiseKind,
    pub frequency: f32,
    pub amplitude: f32,
    pub fractal: FractalKind,
    pub fractal_octaves: i32,
    pub fractal_gain: f32,
    pub cellular_distance: CellularDistance,
    pub cellular_return: CellularReturn,
    pub cellular_jitter: f32,
    pub domain_warp: DomainWarpKind,
    pub domain_warp_amplitude: f32,
}

impl NoiseOctaveConfig {
    fn build(&self, seed: i32) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(match self.kind {
            NoiseKind::OpenSimplex2 => NoiseType::OpenSimplex2,
            NoiseKind::OpenSimplex2S => NoiseType::OpenSimplex2S,
            NoiseKind::Cellular => NoiseType::Cellular,
            NoiseKind::Perlin => NoiseType::Perlin,
            NoiseKind::ValueCubic => NoiseType::ValueCubic,
            NoiseKind::Value => NoiseType::Value,
        }));
        noise.set_frequency(Some(self.frequency));
        noise.set_fractal_type(Some(match self.fractal {
            FractalKind::None => FractalType::None,
            FractalKind::FBm => FractalType::FBm,
            FractalKind::Ridged => FractalType::Ridged,
            FractalKind::PingPong => FractalType::PingPong,
            FractalKind::DomainWarpProgressive => FractalType::DomainWarpProgressive,
            FractalKind::DomainWarpIndependent => FractalType::DomainWarpIndependent,
        }));
        noise.set_fractal_octaves(Some(self.fractal_octaves));
        noise.set_fractal_gain(Some(self.fractal_gain));
        noise.set_cellular_distance_function(Some(match self.cellular_distance {
            CellularDistance::Euclidean => CellularDistanceFunction::Euclidean,
            CellularDistance::EuclideanSq => CellularDistanceFunction::EuclideanSq,
            CellularDistance::Manhattan => CellularDistanceFunction::Manhattan,
            CellularDistance::Hybrid => CellularDistanceFunction::Hybrid,
        }));
        noise.set_cellular_return_type(Some(match self.cellular_return {
            CellularReturn::CellValue => CellularReturnType::CellValue,
            CellularReturn::Distance => CellularReturnType::Distance,
            CellularReturn::Distance2 => CellularReturnType::Distance2,
            CellularReturn::Distance2Add => CellularReturnType::Distance2Add,
            CellularReturn::Distance2Sub => CellularReturnType::Distance2Sub,
            CellularReturn::Distance2Mul => CellularReturnType::Distance2Mul,
            CellularReturn::Distance2Div => CellularReturnType::Distance2Div,
        }));
        noise.set_cellular_jitter(Some(self.cellular_jitter));
        noise.set_domain_warp_type(Some(match self.domain_warp {
            DomainWarpKind::OpenSimplex2 => DomainWarpType::OpenSimplex2,
            DomainWarpKind::OpenSimplex2Reduced => DomainWarpType::OpenSimplex2Reduced,
            DomainWarpKind::BasicGrid => DomainWarpType::BasicGrid,
        }));
        noise.set_domain_warp_amp(Some(self.domain_warp_amplitude));
        noise
    }
}

/// One configured noise channel seeded at world start. Sampling is a pure
/// function of (x, z): same input, same output, for the process lifetime.
pub struct NoiseField {
    noise: FastNoiseLite,
    amplitude: f32,
}

impl NoiseField {
    pub fn new(config: &NoiseOctaveConfig, seed: i32) -> Self {
        Self {
            noise: config.build(seed),
            amplitude: config.amplitude,
        }
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z)
    }

    /// Samples after running the channel's domain warp over the input
    /// coordinates. The biome channel selects through this path.
    pub fn sample_warped(&self, x: f32, z: f32) -> f32 {
        let (wx, wz) = self.noise.domain_warp_2d(x, z);
        self.noise.get_noise_2d(wx, wz)
    }
}
