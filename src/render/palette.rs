use plotters::style::RGBColor;

use crate::types::{PlayerColor, PlayerId, Resource};

const WOOD_COLOR: RGBColor = RGBColor(0x8B, 0x45, 0x13); // SaddleBrown
const BRICK_COLOR: RGBColor = RGBColor(0xCD, 0x5C, 0x5C); // IndianRed
const WHEAT_COLOR: RGBColor = RGBColor(0xFF, 0xD7, 0x00); // Gold
const ORE_COLOR: RGBColor = RGBColor(0x70, 0x80, 0x90); // SlateGray
const SHEEP_COLOR: RGBColor = RGBColor(0x90, 0xEE, 0x90); // LightGreen
const DESERT_COLOR: RGBColor = RGBColor(0xF5, 0xDE, 0xB3); // Wheat

pub(crate) const HIGHLIGHT_COLOR: RGBColor = RGBColor(0xFF, 0xD7, 0x00);
pub(crate) const HIGHLIGHT_EDGE_COLOR: RGBColor = RGBColor(0xFF, 0x00, 0x00);
const UNKNOWN_PLAYER_COLOR: RGBColor = RGBColor(0x00, 0x00, 0x00);

pub fn resource_color(resource: Resource) -> RGBColor {
    match resource {
        Resource::Wood => WOOD_COLOR,
        Resource::Brick => BRICK_COLOR,
        Resource::Wheat => WHEAT_COLOR,
        Resource::Ore => ORE_COLOR,
        Resource::Sheep => SHEEP_COLOR,
        Resource::Desert => DESERT_COLOR,
    }
}

pub fn player_color(player: PlayerId) -> RGBColor {
    match player.color() {
        Some(PlayerColor::Red) => RGBColor(0xFF, 0x00, 0x00),
        Some(PlayerColor::Blue) => RGBColor(0x00, 0x00, 0xFF),
        Some(PlayerColor::Green) => RGBColor(0x00, 0xFF, 0x00),
        Some(PlayerColor::Yellow) => RGBColor(0xFF, 0xFF, 0x00),
        None => UNKNOWN_PLAYER_COLOR,
    }
}
