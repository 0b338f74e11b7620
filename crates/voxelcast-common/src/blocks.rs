/// Identifier for one block material. 0 is air; positive values identify
/// materials from the generation profile.
pub type BlockId = i32;

pub const AIR: BlockId = 0;
pub const BEDROCK: BlockId = 1;
pub const STONE: BlockId = 2;
/// The block laid under carved river and lake beds.
pub const RIVERBED: BlockId = 3;

/// Marker used inside the water overlay array only. The base block grid
/// never contains it; clients render any non-air overlay cell as water.
pub const WATER_OVERLAY: BlockId = -1;

pub fn is_air(block: BlockId) -> bool {
    block == AIR
}
