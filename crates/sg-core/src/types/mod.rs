pub mod enums;
pub mod ids;
pub mod io;
pub mod scan;

pub use enums::Symbology;
pub use ids::{IdError, SessionId};
pub use io::{OfferScanInput, OpenSessionInput, SessionView};
pub use scan::{Product, ProductDraft, ScanEvent};
