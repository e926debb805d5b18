/// The fixed AutoCAD Color Index palette used by the layer rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AciColor {
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    White,
    Gray,
}

impl AciColor {
    pub fn index(&self) -> u8 {
        match self {
            AciColor::Red => 1,
            AciColor::Yellow => 2,
            AciColor::Green => 3,
            AciColor::Cyan => 4,
            AciColor::Blue => 5,
            AciColor::Magenta => 6,
            AciColor::White => 7,
            AciColor::Gray => 8,
        }
    }
}

/// Layer name and styling for one classified feature. Lineweights are in
/// hundredths of a millimeter, as DXF stores them.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStyle {
    pub layer: String,
    pub color: AciColor,
    pub line_weight: i16,
}

impl LayerStyle {
    pub fn new(layer: &str, color: AciColor, line_weight: i16) -> Self {
        Self {
            layer: layer.to_string(),
            color,
            line_weight,
        }
    }
}
