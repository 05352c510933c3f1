//! Card system: definitions and the catalog.
//!
//! ## Key Types
//!
//! - `CardRef`: One physical card, bounded by `NUM_CARDS`
//! - `CardPrototype`: A face design plus its copy count
//! - `CardDefinition`: Immutable data for one physical card
//! - `CardCatalog`: `CardRef -> CardDefinition`, shared read-only

pub mod catalog;
pub mod definition;

pub use catalog::{standard_prototypes, CardCatalog, CatalogError};
pub use definition::{
    inverted_value, Action, Affinity, ArgKind, CardDefinition, CardPrototype, CardRef, CardType,
    Family, PrototypeId, Special, NUM_CARDS,
};
