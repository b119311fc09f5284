//! Then steps for message cache BDD scenarios.

use super::world::{CacheWorld, menu};
use eyre::ensure;
use jisho_bot::menu::services::CacheError;
use rstest_bdd_macros::then;

#[then("menu {id:u64} has been cleaned up")]
fn menu_cleaned_up(world: &CacheWorld, id: u64) -> Result<(), eyre::Report> {
    let cleaned = world.cleanup.cleaned();
    ensure!(
        cleaned == [menu(id)],
        "expected only menu {id} to be cleaned up, found {cleaned:?}"
    );
    Ok(())
}

#[then("no menu has been cleaned up")]
fn nothing_cleaned_up(world: &CacheWorld) -> Result<(), eyre::Report> {
    let cleaned = world.cleanup.cleaned();
    ensure!(cleaned.is_empty(), "unexpected cleanups: {cleaned:?}");
    Ok(())
}

#[then(r#"the cache holds menus "{order}" from most to least recently used"#)]
fn cache_order(world: &CacheWorld, order: String) -> Result<(), eyre::Report> {
    let expected = order
        .split(',')
        .map(|id| id.trim().parse::<u64>().map(menu))
        .collect::<Result<Vec<_>, _>>()?;
    let actual = world.cache()?.handles()?;
    ensure!(actual == expected, "expected {expected:?}, found {actual:?}");
    Ok(())
}

#[then("the cache is empty")]
fn cache_is_empty(world: &CacheWorld) -> Result<(), eyre::Report> {
    ensure!(world.cache()?.is_empty()?, "cache still holds menu state");
    Ok(())
}

#[then("the cache reports the menu as not found")]
fn access_not_found(world: &CacheWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_access
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing lookup or remove result"))?;
    ensure!(
        matches!(result, Err(CacheError::NotFound(_))),
        "expected not found, got {result:?}"
    );
    Ok(())
}
