use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Barcode encodings the intake flow accepts. The payload-length policy in
/// `validation` covers exactly this range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Symbology {
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Code128,
    Code39,
}

impl Symbology {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpcA => "UpcA",
            Self::UpcE => "UpcE",
            Self::Ean13 => "Ean13",
            Self::Ean8 => "Ean8",
            Self::Code128 => "Code128",
            Self::Code39 => "Code39",
        }
    }
}
