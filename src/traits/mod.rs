//! Collaborator traits
//!
//! The engine never talks to the backend directly; it is handed a
//! [`QueryExecutor`] and describes what it wants as a [`Query`].

mod executor;

pub use executor::{Direction, Filter, OrderBy, Query, QueryExecutor, QueryResponse};
