//! Vegetation post-pass: gated tree placement and ground flora, written
//! directly into a freshly generated chunk. Every write is clipped to the
//! chunk footprint; canopies near an edge are truncated, never allowed to
//! index out of bounds. All randomness is drawn from a PRNG keyed by
//! (world seed, chunk coordinate, column), so regeneration reproduces the
//! exact same forest.

use voxelcast_common::blocks::BlockId;
use voxelcast_common::coords::{flat_index, in_chunk_bounds, ChunkPos, CHUNK_WIDTH};

use crate::biome::{Biome, TALL_CONIFER_TRUNK};
use crate::generator::{GeneratedChunk, WorldGenerator};

/// Column-keyed placement PRNG. splitmix-style avalanche over the seed,
/// the chunk coordinate, and the column offset.
fn column_rng(seed: i32, position: ChunkPos, x: i32, z: i32) -> fastrand::Rng {
    let mut h = (seed as u64) ^ 0x9E37_79B9_7F4A_7C15;
    for part in [position.x, position.z, x, z] {
        h ^= part as u32 as u64;
        h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
        h ^= h >> 27;
    }
    fastrand::Rng::with_seed(h)
}

pub(crate) fn place_vegetation(
    generator: &WorldGenerator,
    chunk: &mut GeneratedChunk,
    position: ChunkPos,
) {
    let x_offset = position.x * CHUNK_WIDTH;
    let z_offset = position.z * CHUNK_WIDTH;
    let profile = generator.profile();

    for x in 0..CHUNK_WIDTH {
        for z in 0..CHUNK_WIDTH {
            let height = chunk.surface[(x + z * CHUNK_WIDTH) as usize];
            // -1 marks a flooded column; nothing grows underwater.
            if height < 0 {
                continue;
            }

            let wx = (x + x_offset) as f32;
            let wz = (z + z_offset) as f32;
            let mut rng = column_rng(generator.seed(), position, x, z);

            let biome = generator.biome_at(wx, wz);
            if generator.tree_at(wx, wz) > profile.tree_frequency
                && height > profile.base_height - 1
            {
                place_tree(&mut chunk.blocks, x, z, height, biome, &mut rng);
            }

            if generator.flora_at(wx, wz) <= 0.0
                && biome.place_flora
                && height > profile.water_level
            {
                place_flora(&mut chunk.flora, x, z, height, biome, &mut rng);
            }
        }
    }
}

fn place_tree(
    blocks: &mut [BlockId],
    x: i32,
    z: i32,
    height: i32,
    biome: &Biome,
    rng: &mut fastrand::Rng,
) {
    if biome.trees.is_empty() {
        return;
    }

    let species = &biome.trees[rng.usize(0..biome.trees.len())];
    let tree_height = rng.i32(species.min_height..=species.max_height);
    if rng.i32(1..=100) > species.chance {
        return;
    }

    if species.trunk == TALL_CONIFER_TRUNK {
        grow_conifer_canopy(blocks, x, z, height, tree_height, species.leaves, rng);
    } else {
        grow_round_canopy(blocks, x, z, height, tree_height, species.leaves);
    }

    for dy in 1..=tree_height {
        set_clipped(blocks, x, height + dy, z, species.trunk);
    }
}

/// Generic canopy: circular layers shrinking downward from the trunk top,
/// radius clamped to [1, 3] by the distance from the top layer.
fn grow_round_canopy(
    blocks: &mut [BlockId],
    x: i32,
    z: i32,
    height: i32,
    tree_height: i32,
    leaves: BlockId,
) {
    if leaves == -1 {
        return;
    }
    let top = height + tree_height - 1;
    let mut y = top;
    while y >= height + tree_height / 2 {
        let radius = (tree_height - (top - y + 1)).clamp(1, 3);
        grow_canopy_layer(blocks, x, z, y, radius, leaves);
        y -= 1;
    }
}

/// Tall conifer canopy: layered rings with alternating odd/even radius
/// growth (clamped to [1, 4] and [1, 5]), topped by a five-block crown.
fn grow_conifer_canopy(
    blocks: &mut [BlockId],
    x: i32,
    z: i32,
    height: i32,
    tree_height: i32,
    leaves: BlockId,
    rng: &mut fastrand::Rng,
) {
    if leaves == -1 {
        return;
    }

    let mut odd_radius = 0;
    let mut even_radius = 0;
    let bottom = height + 1 + rng.i32(1..=2);
    let mut layer = 0;
    let mut y = height + tree_height - 1;
    while y >= bottom {
        let radius = if layer % 2 == 1 {
            odd_radius += 1;
            odd_radius.clamp(1, 4)
        } else {
            even_radius += 1;
            (even_radius + 1).clamp(1, 5)
        };
        grow_canopy_layer(blocks, x, z, y, radius, leaves);
        layer += 1;
        y -= 1;
    }

    let crown = height + tree_height;
    set_clipped(blocks, x, crown + 1, z, leaves);
    set_clipped(blocks, x + 1, crown, z, leaves);
    set_clipped(blocks, x - 1, crown, z, leaves);
    set_clipped(blocks, x, crown, z + 1, leaves);
    set_clipped(blocks, x, crown, z - 1, leaves);
}

fn grow_canopy_layer(
    blocks: &mut [BlockId],
    x: i32,
    z: i32,
    y: i32,
    radius: i32,
    leaves: BlockId,
) {
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            if dx * dx + dz * dz <= radius * radius {
                set_clipped(blocks, x + dx, y, z + dz, leaves);
            }
        }
    }
}

/// Clipped write: silently skips anything outside the chunk extent.
fn set_clipped(blocks: &mut [BlockId], x: i32, y: i32, z: i32, block: BlockId) {
    if in_chunk_bounds(x, y, z) {
        blocks[flat_index(x, y, z)] = block;
    }
}

fn place_flora(
    flora: &mut [BlockId],
    x: i32,
    z: i32,
    height: i32,
    biome: &Biome,
    rng: &mut fastrand::Rng,
) {
    if biome.flora.is_empty() {
        return;
    }

    let total: i32 = biome.flora.iter().map(|rule| rule.weight).sum();
    if total <= 0 {
        return;
    }

    let draw = rng.i32(0..total);
    let mut running = 0;
    let mut chosen = biome.flora[biome.flora.len() - 1].block;
    for rule in &biome.flora {
        running += rule.weight;
        if draw < running {
            chosen = rule.block;
            break;
        }
    }

    if rng.i32(0..100) < biome.full_flora_chance {
        set_clipped(flora, x, height + 1, z, chosen);
    }
}
