use voxelcast_common::blocks::{self, BlockId};
use voxelcast_common::coords::{flat_index, ChunkPos, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH};
use voxelcast_common::Result;

use crate::biome::{Biome, BiomeTable};
use crate::noise::NoiseField;
use crate::profile::GenerationProfile;
use crate::vegetation;

/// Output of one chunk generation run. `surface` records the terrain
/// height per column, or -1 where a carved column sits underwater
/// (vegetation is suppressed there).
pub struct GeneratedChunk {
    pub blocks: Vec<BlockId>,
    pub water: Vec<BlockId>,
    pub flora: Vec<BlockId>,
    pub surface: Vec<i32>,
}

/// The full generation pipeline: surface noise terrain, river carving,
/// biome-banded column fill, then the vegetation post-pass. Seeded once;
/// `generate` is a pure function of the chunk coordinate.
pub struct WorldGenerator {
    profile: GenerationProfile,
    biome_table: BiomeTable,
    surface_noise: Vec<NoiseField>,
    biome_noise: NoiseField,
    water_noise: NoiseField,
    flora_noise: NoiseField,
    tree_noise: Vec<NoiseField>,
    seed: i32,
}

impl WorldGenerator {
    pub fn new(profile: GenerationProfile, seed: i32) -> Result<Self> {
        let biome_table = BiomeTable::new(profile.biomes.clone())?;
        let surface_noise = profile
            .surface_octaves
            .iter()
            .map(|octave| NoiseField::new(octave, seed))
            .collect();
        let tree_noise = profile
            .tree_octaves
            .iter()
            .map(|octave| NoiseField::new(octave, seed))
            .collect();
        Ok(Self {
            biome_noise: NoiseField::new(&profile.biome_octave, seed),
            water_noise: NoiseField::new(&profile.water_octave, seed),
            flora_noise: NoiseField::new(&profile.flora_octave, seed),
            surface_noise,
            tree_noise,
            biome_table,
            profile,
            seed,
        })
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn profile(&self) -> &GenerationProfile {
        &self.profile
    }

    pub fn biome_table(&self) -> &BiomeTable {
        &self.biome_table
    }

    /// Terrain height before river carving: the base height plus every
    /// surface octave's positive contribution, scaled by half the octave
    /// amplitude. Negative samples do not dig below the base height.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let mut height = self.profile.base_height as f32;
        for field in &self.surface_noise {
            let sample = field.sample(x, z);
            if sample > 0.0 {
                height += sample * field.amplitude() / 2.0;
            }
        }
        height
    }

    /// Biome for a column, from the dedicated (domain-warped) biome
    /// channel, independent of the surface-height noise.
    pub fn biome_at(&self, x: f32, z: f32) -> &Biome {
        let t = (self.biome_noise.sample_warped(x, z) + 1.0) / 2.0;
        self.biome_table.select(t)
    }

    pub(crate) fn water_at(&self, x: f32, z: f32) -> f32 {
        self.water_noise.sample(x, z)
    }

    pub(crate) fn flora_at(&self, x: f32, z: f32) -> f32 {
        self.flora_noise.sample(x, z)
    }

    pub(crate) fn tree_at(&self, x: f32, z: f32) -> f32 {
        self.tree_noise
            .iter()
            .map(|field| field.sample(x, z) * field.amplitude() / 2.0)
            .sum()
    }

    /// Carved column height and whether the river/water condition holds.
    /// The carved height is clamped to the chunk's vertical extent.
    fn carved_height(&self, x: f32, z: f32) -> (i32, bool) {
        let water = self.water_at(x, z);
        let carving = water > self.profile.river_chance;
        let mut height = self.height(x, z);
        if carving {
            height -= water * self.water_noise.amplitude();
        }
        let height = (height as i32).clamp(0, CHUNK_HEIGHT - 1);
        (height, carving)
    }

    /// Generates the full chunk column at `position`: terrain fill, water
    /// overlay, then trees and flora.
    pub fn generate(&self, position: ChunkPos) -> GeneratedChunk {
        let x_offset = position.x * CHUNK_WIDTH;
        let z_offset = position.z * CHUNK_WIDTH;

        let mut chunk = GeneratedChunk {
            blocks: vec![blocks::AIR; CHUNK_VOLUME],
            water: vec![blocks::AIR; CHUNK_VOLUME],
            flora: vec![blocks::AIR; CHUNK_VOLUME],
            surface: vec![0; (CHUNK_WIDTH * CHUNK_WIDTH) as usize],
        };

        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let wx = (x + x_offset) as f32;
                let wz = (z + z_offset) as f32;
                let biome = self.biome_at(wx, wz);
                let (height, carving) = self.carved_height(wx, wz);
                let flooded = carving && height <= self.profile.water_level;

                self.fill_column(&mut chunk.blocks, x, z, height, biome, flooded);

                for y in (height + 1)..=self.profile.water_level {
                    chunk.water[flat_index(x, y, z)] = blocks::WATER_OVERLAY;
                }

                chunk.surface[(x + z * CHUNK_WIDTH) as usize] =
                    if flooded { -1 } else { height };
            }
        }

        vegetation::place_vegetation(self, &mut chunk, position);

        chunk
    }

    /// Depth-banded column fill, bottom to top. Flooded columns swap the
    /// surface bands for the riverbed block.
    fn fill_column(
        &self,
        column: &mut [BlockId],
        x: i32,
        z: i32,
        height: i32,
        biome: &Biome,
        flooded: bool,
    ) {
        for y in 0..=height {
            column[flat_index(x, y, z)] = band_block(y, height, biome, flooded);
        }
    }
}

fn band_block(y: i32, height: i32, biome: &Biome, flooded: bool) -> BlockId {
    if y < 1 {
        blocks::BEDROCK
    } else if y < height - 3 {
        blocks::STONE
    } else if y < height - 1 {
        if flooded {
            blocks::RIVERBED
        } else {
            biome.subsurface_block
        }
    } else if flooded {
        blocks::RIVERBED
    } else {
        biome.surface_block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Biome;
    use crate::profile::GenerationProfile;

    /// Profile with no surface octaves (flat terrain at base height), no
    /// carving, and a single deterministic biome.
    fn flat_profile(base_height: i32) -> GenerationProfile {
        let mut profile = GenerationProfile::default();
        profile.base_height = base_height;
        profile.surface_octaves.clear();
        profile.tree_octaves.clear();
        // Water noise stays in [-1, 1]; a huge threshold disables carving.
        profile.river_chance = 100.0;
        profile.biomes = vec![Biome {
            name: "Test".to_owned(),
            surface_block: 4,
            subsurface_block: 3,
            trees: Vec::new(),
            flora: Vec::new(),
            place_flora: false,
            full_flora_chance: 0,
            weight: 1.0,
        }];
        profile
    }

    #[test]
    fn test_column_banding_at_height_ten() {
        let generator = WorldGenerator::new(flat_profile(10), 1).unwrap();
        let chunk = generator.generate(ChunkPos::new(0, 0, 0));

        let column: Vec<BlockId> = (0..=10).map(|y| chunk.blocks[flat_index(5, y, 5)]).collect();
        assert_eq!(column[0], blocks::BEDROCK);
        for y in 1..=6 {
            assert_eq!(column[y], blocks::STONE, "y = {}", y);
        }
        assert_eq!(column[7], 3);
        assert_eq!(column[8], 3);
        assert_eq!(column[9], 4);
        assert_eq!(column[10], 4);
        // Above the surface: air.
        assert_eq!(chunk.blocks[flat_index(5, 11, 5)], blocks::AIR);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let profile = GenerationProfile::default();
        let a = WorldGenerator::new(profile.clone(), 777).unwrap();
        let b = WorldGenerator::new(profile, 777).unwrap();
        let pos = ChunkPos::new(3, 0, -2);
        let first = a.generate(pos);
        let second = a.generate(pos);
        let other = b.generate(pos);
        assert_eq!(first.blocks, second.blocks);
        assert_eq!(first.blocks, other.blocks);
        assert_eq!(first.water, other.water);
        assert_eq!(first.flora, other.flora);
        assert_eq!(first.surface, other.surface);
    }

    #[test]
    fn test_height_and_biome_are_pure() {
        let generator = WorldGenerator::new(GenerationProfile::default(), 5).unwrap();
        for &(x, z) in &[(0.0, 0.0), (100.5, -3.0), (-2048.0, 77.0)] {
            assert_eq!(generator.height(x, z), generator.height(x, z));
            assert_eq!(generator.biome_at(x, z).name, generator.biome_at(x, z).name);
        }
    }

    #[test]
    fn test_height_never_digs_below_base() {
        let generator = WorldGenerator::new(GenerationProfile::default(), 9).unwrap();
        for i in 0..128 {
            let h = generator.height(i as f32 * 13.7, i as f32 * -5.3);
            assert!(h >= generator.profile().base_height as f32);
        }
    }

    #[test]
    fn test_bedrock_floor_everywhere() {
        let generator = WorldGenerator::new(GenerationProfile::default(), 321).unwrap();
        let chunk = generator.generate(ChunkPos::new(-4, 0, 9));
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                assert_eq!(chunk.blocks[flat_index(x, 0, z)], blocks::BEDROCK);
            }
        }
    }

    /// Flat terrain with a deep, always-on carving channel, so flooded
    /// columns are guaranteed inside a single chunk.
    fn river_profile() -> GenerationProfile {
        let mut profile = flat_profile(64);
        profile.river_chance = -2.0;
        profile.water_octave = crate::profile::simple_octave(crate::noise::NoiseKind::Perlin, 0.13, 40.0);
        profile
    }

    #[test]
    fn test_water_overlay_only_above_carved_surface() {
        let generator = WorldGenerator::new(river_profile(), 12345).unwrap();
        let water_level = generator.profile().water_level;
        let mut saw_water = false;
        for cx in 0..4 {
            for cz in 0..4 {
                let chunk = generator.generate(ChunkPos::new(cx, 0, cz));
                for x in 0..CHUNK_WIDTH {
                    for z in 0..CHUNK_WIDTH {
                        for y in 0..CHUNK_HEIGHT {
                            let cell = chunk.water[flat_index(x, y, z)];
                            if cell != blocks::AIR {
                                saw_water = true;
                                assert_eq!(cell, blocks::WATER_OVERLAY);
                                assert!(y <= water_level, "water above the water level");
                                assert_eq!(
                                    chunk.blocks[flat_index(x, y, z)],
                                    blocks::AIR,
                                    "water overlay overlaps terrain"
                                );
                            }
                        }
                    }
                }
            }
        }
        assert!(saw_water, "no carved water found in the scanned chunks");
    }

    #[test]
    fn test_flooded_columns_surface_as_riverbed() {
        let generator = WorldGenerator::new(river_profile(), 99).unwrap();
        let mut flooded_columns = 0;
        for cx in 0..4 {
            for cz in 0..4 {
                let chunk = generator.generate(ChunkPos::new(cx, 0, cz));
                for x in 0..CHUNK_WIDTH {
                    for z in 0..CHUNK_WIDTH {
                        if chunk.surface[(x + z * CHUNK_WIDTH) as usize] == -1 {
                            flooded_columns += 1;
                            let top = (0..CHUNK_HEIGHT)
                                .rev()
                                .find(|&y| chunk.blocks[flat_index(x, y, z)] != blocks::AIR)
                                .unwrap();
                            assert_eq!(chunk.blocks[flat_index(x, top, z)], blocks::RIVERBED);
                        }
                    }
                }
            }
        }
        assert!(flooded_columns > 0, "no flooded columns in the scanned chunks");
    }
}
