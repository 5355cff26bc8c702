//! recipebox: a personal recipe collection with fuzzy search
//!
//! The heart of the crate is [`search`]: recipes are projected into flat
//! searchable records, indexed for approximate matching, and filtered by a
//! small query language (`chicken tag:dinner ing:"olive oil"`). Around it sit
//! the storage backends, session handling and the CLI commands.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod recipe;
pub mod search;
pub mod storage;
pub mod tools;

pub use error::AppError;
pub use recipe::{Ingredient, NewRecipe, Recipe, RecipeCollection};
pub use search::{filter_recipes, SearchEngine};
