pub mod biome;
pub mod generator;
pub mod noise;
pub mod profile;
mod vegetation;

pub use biome::{Biome, BiomeTable, FloraRule, TreeSpecies};
pub use generator::{GeneratedChunk, WorldGenerator};
pub use noise::{NoiseField, NoiseOctaveConfig};
pub use profile::GenerationProfile;
