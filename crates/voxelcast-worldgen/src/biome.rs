use serde::{Deserialize, Serialize};
use voxelcast_common::blocks::BlockId;
use voxelcast_common::{Result, VoxelcastError};

/// One tree species a biome can spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSpecies {
    pub trunk: BlockId,
    /// Canopy block; -1 spawns a bare trunk (cactus-style growth).
    pub leaves: BlockId,
    pub min_height: i32,
    pub max_height: i32,
    /// Percent chance, 1..=100, rolled after the noise gate passes.
    pub chance: i32,
}

/// Trunk id of the tall conifer species, which grows the layered
/// alternating-radius canopy instead of the generic round one.
pub const TALL_CONIFER_TRUNK: BlockId = 99;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloraRule {
    pub block: BlockId,
    pub weight: i32,
}

/// A terrain archetype: surface materials plus vegetation rules, selected
/// per column by noise-driven weighted lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Biome {
    pub name: String,
    pub surface_block: BlockId,
    pub subsurface_block: BlockId,
    pub trees: Vec<TreeSpecies>,
    pub flora: Vec<FloraRule>,
    pub place_flora: bool,
    /// Percent gate applied after a flora species has been drawn.
    pub full_flora_chance: i32,
    /// Raw selection weight; normalized across the table at build time.
    pub weight: f32,
}

/// Ordered biome set with cumulative normalized weights. The cumulative
/// bounds partition [0, 1) with no gaps: the final bound is exactly 1.
#[derive(Debug)]
pub struct BiomeTable {
    biomes: Vec<Biome>,
    cumulative: Vec<f32>,
}

impl BiomeTable {
    pub fn new(biomes: Vec<Biome>) -> Result<Self> {
        if biomes.is_empty() {
            return Err(VoxelcastError::ServerError(
                "biome table must not be empty".to_owned(),
            ));
        }
        let total: f32 = biomes.iter().map(|b| b.weight).sum();
        if total <= 0.0 {
            return Err(VoxelcastError::ServerError(
                "biome weights must sum to a positive value".to_owned(),
            ));
        }

        let mut cumulative = Vec::with_capacity(biomes.len());
        let mut running = 0.0;
        for biome in &biomes {
            running += biome.weight / total;
            cumulative.push(running);
        }
        // Absorb float drift so the last band always closes the partition.
        if let Some(last) = cumulative.last_mut() {
            *last = 1.0;
        }

        Ok(Self { biomes, cumulative })
    }

    /// Resolves a scalar in [0, 1) to its biome: the first band whose
    /// cumulative bound reaches the value. Values at or above 1 fall into
    /// the last biome.
    pub fn select(&self, t: f32) -> &Biome {
        for (biome, bound) in self.biomes.iter().zip(&self.cumulative) {
            if t <= *bound {
                return biome;
            }
        }
        &self.biomes[self.biomes.len() - 1]
    }

    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    pub fn cumulative_bounds(&self) -> &[f32] {
        &self.cumulative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::GenerationProfile;
    use assert_matches::assert_matches;

    fn default_table() -> BiomeTable {
        BiomeTable::new(GenerationProfile::default().biomes).unwrap()
    }

    #[test]
    fn test_normalized_weights_partition_unit_interval() {
        let table = default_table();
        let bounds = table.cumulative_bounds();
        assert_eq!(*bounds.last().unwrap(), 1.0);
        for pair in bounds.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        let total: f32 = table.biomes().iter().map(|b| b.weight).sum();
        let renormalized: f32 = table.biomes().iter().map(|b| b.weight / total).sum();
        assert!((renormalized - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_low_scalar_selects_first_band_high_selects_last() {
        // Weights 0.161 / 1.0 / 0.227 normalize so 0.05 lands in Desert
        // and 0.99 in the final biome.
        let table = default_table();
        assert_eq!(table.select(0.05).name, "Desert");
        assert_eq!(table.select(0.99).name, "ForestSpruce");
    }

    #[test]
    fn test_every_scalar_maps_to_exactly_one_biome() {
        let table = default_table();
        for i in 0..1000 {
            let t = i as f32 / 1000.0;
            let matching = table
                .cumulative_bounds()
                .iter()
                .zip(table.biomes())
                .filter(|(bound, _)| t <= **bound)
                .count();
            assert!(matching >= 1, "scalar {} fell through the partition", t);
        }
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert_matches!(
            BiomeTable::new(Vec::new()),
            Err(VoxelcastError::ServerError(_))
        );
    }

    #[test]
    fn test_zero_total_weight_is_rejected() {
        let mut biomes = GenerationProfile::default().biomes;
        for biome in &mut biomes {
            biome.weight = 0.0;
        }
        assert_matches!(BiomeTable::new(biomes), Err(VoxelcastError::ServerError(_)));
    }
}
