//! Web layer for the collection-bin map.
//!
//! Provides the rendered page, HTML fragments, and a JSON API over the
//! location pipeline and the advisory gateway.

mod dto;
mod kakao;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use kakao::kakao_map_url;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
