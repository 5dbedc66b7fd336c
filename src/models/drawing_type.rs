use serde::Serialize;

/// Geometry of a mapped operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawingType {
    Polygon,
    Polyline,
    Point,
}

impl DrawingType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DrawingType::Polygon => "POLYGON",
            DrawingType::Polyline => "POLYLINE",
            DrawingType::Point => "POINT",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "POLYGON" => Some(DrawingType::Polygon),
            "POLYLINE" => Some(DrawingType::Polyline),
            "POINT" => Some(DrawingType::Point),
            _ => None,
        }
    }

    /// Helper: convert input from CLI (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        DrawingType::from_db_str(&code.trim().to_uppercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            DrawingType::Polygon => "polygon",
            DrawingType::Polyline => "polyline",
            DrawingType::Point => "point",
        }
    }
}
