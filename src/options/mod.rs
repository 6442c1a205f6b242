//! Query options module
//!
//! Options are the public vocabulary of the library: every request is
//! described by an ordered list of `QueryOption` values which the
//! `Compiler` validates and folds into one `CompiledQuery`.
//!
//! ```rust,ignore
//! use igdb_query::options::{compose, Compiler, Direction, Operator, QueryOption};
//! use igdb_query::Tier;
//!
//! let popular = vec![
//!     QueryOption::fields(["name", "cover"]),
//!     QueryOption::order("popularity", Direction::Descending),
//! ];
//! let options = compose([popular, vec![QueryOption::filter("platforms", Operator::Equals, "48")]]);
//! let query = Compiler::new(Tier::Standard).compile(&options)?;
//! ```

mod compiler;
mod types;

pub use compiler::{CompiledQuery, Compiler, FieldSelection, ALL_FIELDS};
pub use types::{
    compose, ids_to_values, is_numeric, Arity, Direction, Filter, Operator, Order, QueryOption,
    ValueKind,
};
