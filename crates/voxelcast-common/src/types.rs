use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, crate::error::VoxelcastError>;

/// World-space position, as carried on the wire and in player records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

/// One inventory slot, both the wire shape and the stored shape.
/// `item` is None for an empty slot; the wire encodes it as "null".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSlot {
    #[serde(rename = "type", with = "null_string")]
    pub item: Option<String>,
    pub count: u32,
    pub durability: u32,
}

impl ItemSlot {
    pub fn empty() -> Self {
        Self {
            item: None,
            count: 0,
            durability: 0,
        }
    }
}

/// The original wire format spells an empty slot's item as the literal
/// string "null" rather than a JSON null.
mod null_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_str("null"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == "null" { None } else { Some(raw) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_round_trip() {
        let json = serde_json::to_string(&ItemSlot::empty()).unwrap();
        assert_eq!(json, r#"{"type":"null","count":0,"durability":0}"#);
        let back: ItemSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ItemSlot::empty());
    }

    #[test]
    fn test_filled_slot_round_trip() {
        let slot = ItemSlot {
            item: Some("stone".to_owned()),
            count: 12,
            durability: 0,
        };
        let json = serde_json::to_string(&slot).unwrap();
        let back: ItemSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
    }
}
