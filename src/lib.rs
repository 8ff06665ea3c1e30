//! Owner/subsidiary party hierarchy on a materialized-path store.
//!
//! Every party stores the ids of its ancestors as a path (`/<root>/<mid>`),
//! fixed at creation. Ancestors are read straight out of that path and
//! descendants are found with a single segment search over all paths,
//! so neither query recurses.
#![recursion_limit = "256"]

pub mod api;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
