//! Presentation state for front ends.
//!
//! State holders subscribe to the [`CocktailRepository`](crate::CocktailRepository),
//! keep a render-ready snapshot in a `watch` channel, and expose user actions
//! as async methods that track loading and error state. They never panic on
//! a failed action; the failure becomes the `error` message instead.

mod detail;
mod list;

pub use detail::{CocktailDetailModel, CocktailDetailState, NOT_FOUND_MESSAGE};
pub use list::{CocktailListModel, CocktailListState};
