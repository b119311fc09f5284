//! When steps for message cache BDD scenarios.

use super::world::{CacheWorld, menu, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("menu {id:u64} is cached")]
fn cache_menu(world: &mut CacheWorld, id: u64) -> Result<(), eyre::Report> {
    let state = world.state(id);
    run_async(world.cache()?.insert(state)).wrap_err("cache menu state")?;
    Ok(())
}

#[when("menu {id:u64} is looked up")]
fn look_up_menu(world: &mut CacheWorld, id: u64) -> Result<(), eyre::Report> {
    let result = world.cache()?.lookup(menu(id)).map(|_| ());
    world.last_access = Some(result);
    Ok(())
}

#[when("menu {id:u64} is removed")]
fn remove_menu(world: &mut CacheWorld, id: u64) -> Result<(), eyre::Report> {
    let result = world.cache()?.remove(menu(id)).map(|_| ());
    world.last_access = Some(result);
    Ok(())
}
