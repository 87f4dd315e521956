//! Feature modules, each following hexagonal architecture: `domain/` for
//! pure logic, `ports/` for the trait a caller programs against, and an
//! implementation alongside.

pub mod analysis_engine;
pub mod ast_cache;
pub mod extraction;
pub mod inference;
pub mod interpretation;
pub mod parsing;
pub mod query_surface;
