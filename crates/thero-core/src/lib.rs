pub mod color;
pub mod config;
pub mod error;
pub mod font_spec;
pub mod palette;
pub mod presets;
pub mod spacing;
pub mod storage;
pub mod stylesheet;
pub mod token_store;
pub mod tokens;
pub mod typography;

pub use color::{hsl_to_hex, ColorRole, HexColor};
pub use error::TheroError;
pub use palette::LockSet;
pub use storage::{KeyValueStore, PersistedFonts};
pub use stylesheet::generate_stylesheet;
pub use token_store::TokenStore;
pub use tokens::DesignTokenSet;
