//! Given steps for menu navigation BDD scenarios.

use super::world::{NavigationWorld, entries};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"the dictionary has {count:usize} results for "{query}""#)]
fn dictionary_has_results(
    world: &mut NavigationWorld,
    count: usize,
    query: String,
) -> Result<(), eyre::Report> {
    world
        .dictionary
        .set_results(query.as_str(), entries(&query, count))
        .wrap_err("seed dictionary results")
}
