mod category;
mod ids;
mod todo;

pub use category::*;
pub use ids::*;
pub use todo::*;
