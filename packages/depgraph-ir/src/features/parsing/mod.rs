pub mod dispatch;
pub mod domain;
pub mod languages;
pub mod ports;

pub use dispatch::LanguageDispatcher;
pub use domain::LanguageId;
pub use ports::{LanguageParser, RawParse, SyntaxResult};
