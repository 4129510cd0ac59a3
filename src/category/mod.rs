//! The predefined spending categories that expenses are filed under.

mod db;
mod domain;
mod list_endpoint;

pub use db::{
    DEFAULT_CATEGORIES, create_category_table, find_category_name, get_all_categories,
    seed_default_categories,
};
pub use domain::{Category, CategoryName};
pub use list_endpoint::get_categories_endpoint;
