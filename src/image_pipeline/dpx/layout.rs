//! Image element description codes.
//!
//! A DPX image element declares its channel layout through a one-byte
//! description code. The table below is the subset of SMPTE 268M codes this
//! decoder understands; anything else is rejected rather than guessed.

use std::fmt;

use crate::image_pipeline::common::error::{DpxError, Result};

/// Semantic channel layout of an image element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    UserDefined,
    Red,
    Green,
    Blue,
    Alpha,
    Luminance,
    Chrominance,
    Depth,
    CompositeVideo,
    Rgb,
    Rgba,
    Abgr,
    CbYCrY,
    CbYaCrYa,
    CbYCr,
    CbYCra,
    /// User-defined element with 2 to 8 components.
    UserDefinedN(u8),
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentType::UserDefined => f.write_str("User-defined"),
            ComponentType::Red => f.write_str("Red"),
            ComponentType::Green => f.write_str("Green"),
            ComponentType::Blue => f.write_str("Blue"),
            ComponentType::Alpha => f.write_str("Alpha"),
            ComponentType::Luminance => f.write_str("Luminance"),
            ComponentType::Chrominance => f.write_str("Chrominance"),
            ComponentType::Depth => f.write_str("Depth"),
            ComponentType::CompositeVideo => f.write_str("Composite video"),
            ComponentType::Rgb => f.write_str("RGB"),
            ComponentType::Rgba => f.write_str("RGBA"),
            ComponentType::Abgr => f.write_str("ABGR"),
            ComponentType::CbYCrY => f.write_str("CbYCrY"),
            ComponentType::CbYaCrYa => f.write_str("CbYaCrYa"),
            ComponentType::CbYCr => f.write_str("CbYCr"),
            ComponentType::CbYCra => f.write_str("CbYCra"),
            ComponentType::UserDefinedN(n) => write!(f, "User-defined {n}-component element"),
        }
    }
}

/// One row of the description table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLayout {
    pub code: u8,
    pub num_components: u8,
    pub component_type: ComponentType,
}

const fn layout(code: u8, num_components: u8, component_type: ComponentType) -> ElementLayout {
    ElementLayout {
        code,
        num_components,
        component_type,
    }
}

/// Description code table, sorted by code.
static ELEMENT_LAYOUTS: [ElementLayout; 23] = [
    layout(0, 1, ComponentType::UserDefined),
    layout(1, 1, ComponentType::Red),
    layout(2, 1, ComponentType::Green),
    layout(3, 1, ComponentType::Blue),
    layout(4, 1, ComponentType::Alpha),
    layout(5, 1, ComponentType::Luminance),
    layout(6, 1, ComponentType::Chrominance),
    layout(7, 1, ComponentType::Depth),
    layout(8, 1, ComponentType::CompositeVideo),
    layout(50, 3, ComponentType::Rgb),
    layout(51, 4, ComponentType::Rgba),
    layout(52, 4, ComponentType::Abgr),
    layout(100, 3, ComponentType::CbYCrY),
    layout(101, 4, ComponentType::CbYaCrYa),
    layout(102, 3, ComponentType::CbYCr),
    layout(103, 3, ComponentType::CbYCra),
    layout(150, 2, ComponentType::UserDefinedN(2)),
    layout(151, 3, ComponentType::UserDefinedN(3)),
    layout(152, 4, ComponentType::UserDefinedN(4)),
    layout(153, 5, ComponentType::UserDefinedN(5)),
    layout(154, 6, ComponentType::UserDefinedN(6)),
    layout(155, 7, ComponentType::UserDefinedN(7)),
    layout(156, 8, ComponentType::UserDefinedN(8)),
];

/// Looks up the full table row for a description code.
pub fn element_layout(code: u8) -> Result<&'static ElementLayout> {
    ELEMENT_LAYOUTS
        .binary_search_by_key(&code, |l| l.code)
        .map(|idx| &ELEMENT_LAYOUTS[idx])
        .map_err(|_| DpxError::UnknownDescriptionCode(code))
}

/// Number of components carried by an element with this description code.
pub fn num_components(code: u8) -> Result<u8> {
    element_layout(code).map(|l| l.num_components)
}

/// Channel semantics of an element with this description code.
pub fn component_type(code: u8) -> Result<ComponentType> {
    element_layout(code).map(|l| l.component_type)
}
