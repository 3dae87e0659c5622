//! Cocktail cache: storage, synchronization with the recipe API, and the
//! display projection used by front ends.

mod group;
mod model;
mod repository;
mod source;
mod store;

pub use group::{DayGroup, group_by_day};
pub use model::{CocktailDisplay, CocktailRecord, INSERTION_DAY_FORMAT, format_insertion_day};
pub use repository::CocktailRepository;
pub use source::CocktailSource;
pub use store::{CacheSnapshot, CocktailStore};
