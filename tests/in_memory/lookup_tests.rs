//! In-memory integration tests for command execution.

use crate::in_memory::helpers::{Bot, CONTEXT, entries, runtime, wiring};
use eyre::ensure;
use jisho_bot::menu::domain::{EMOJI_DISMISS, EMOJI_RETURN};
use jisho_bot::menu::services::{BOT_VERSION, MenuOutcome};
use rstest::rstest;
use tokio::runtime::Runtime;

#[rstest]
fn search_command_opens_first_page(
    runtime: std::io::Result<Runtime>,
    wiring: eyre::Result<Bot>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;
    bot.dictionary.set_results("house", entries("house", 7))?;

    rt.block_on(async {
        let handle = bot.service.execute(CONTEXT, "search house").await?;
        let shown = bot.shown(handle.message())?;

        ensure!(shown.title == "jisho.org search results for house");
        ensure!(shown.description.as_deref() == Some("*Showing results 1 to 5 (out of 7)*"));
        ensure!(shown.fields.len() == 5);
        ensure!(bot.cache.contains(handle.message())?);

        ensure!(handle.finished().await? == MenuOutcome::TimedOut);
        ensure!(bot.cache.is_empty()?);
        Ok(())
    })
}

#[rstest]
fn details_command_opens_numbered_result(
    runtime: std::io::Result<Runtime>,
    wiring: eyre::Result<Bot>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;
    bot.dictionary.set_results("dog", entries("dog", 7))?;

    rt.block_on(async {
        let handle = bot.service.execute(CONTEXT, "d 7 dog").await?;
        let shown = bot.shown(handle.message())?;

        ensure!(shown.title == "jisho.org entry for dog6");
        ensure!(bot.transport.bot_reactions(handle.message())? == [EMOJI_RETURN, EMOJI_DISMISS]);
        let state = bot.cache.lookup(handle.message())?;
        ensure!(state.query().map(|search| search.offset()) == Some(5));
        Ok(())
    })
}

#[rstest]
fn details_past_the_results_reports_missing_number(
    runtime: std::io::Result<Runtime>,
    wiring: eyre::Result<Bot>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;
    bot.dictionary.set_results("dog", entries("dog", 2))?;

    rt.block_on(async {
        let handle = bot.service.execute(CONTEXT, "details 3 dog").await?;
        let shown = bot.shown(handle.message())?;

        ensure!(shown.title == "An error has occurred");
        ensure!(shown.description.as_deref() == Some("Unable to find result number 3 for dog"));
        ensure!(bot.transport.bot_reactions(handle.message())? == [EMOJI_DISMISS]);
        Ok(())
    })
}

#[rstest]
fn word_link_opens_matching_entry(
    runtime: std::io::Result<Runtime>,
    wiring: eyre::Result<Bot>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;
    let mut results = entries("cat", 3);
    if let Some(target) = results.get_mut(2) {
        "猫".clone_into(&mut target.slug);
    }
    bot.dictionary.set_results("猫", results)?;

    rt.block_on(async {
        let handle = bot
            .service
            .execute(CONTEXT, "link https://jisho.org/word/%E7%8C%AB")
            .await?;
        let shown = bot.shown(handle.message())?;

        ensure!(shown.title == "jisho.org entry for 猫");
        Ok(())
    })
}

#[rstest]
fn search_link_opens_results(runtime: std::io::Result<Runtime>, wiring: eyre::Result<Bot>) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;
    bot.dictionary.set_results("to eat", entries("eat", 2))?;

    rt.block_on(async {
        let handle = bot
            .service
            .execute(CONTEXT, "l <https://jisho.org/search/to%20eat>")
            .await?;
        let shown = bot.shown(handle.message())?;

        ensure!(shown.title == "jisho.org search results for to eat");
        ensure!(shown.description.as_deref() == Some("*Showing results 1 to 2 (out of 2)*"));
        Ok(())
    })
}

#[rstest]
fn no_results_opens_notice(runtime: std::io::Result<Runtime>, wiring: eyre::Result<Bot>) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;

    rt.block_on(async {
        let handle = bot.service.execute(CONTEXT, "s qwxz").await?;
        let shown = bot.shown(handle.message())?;

        ensure!(shown.description.as_deref() == Some("*Sorry, no results were found*"));
        ensure!(bot.transport.bot_reactions(handle.message())? == [EMOJI_DISMISS]);
        ensure!(bot.cache.lookup(handle.message())?.query().is_none());
        Ok(())
    })
}

#[rstest]
fn dictionary_failure_becomes_error_notice(
    runtime: std::io::Result<Runtime>,
    wiring: eyre::Result<Bot>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;
    bot.dictionary.set_failure("house", 503)?;

    rt.block_on(async {
        let handle = bot.service.execute(CONTEXT, "search house").await?;
        let shown = bot.shown(handle.message())?;

        ensure!(shown.title == "An error has occurred");
        ensure!(
            shown.description.as_deref()
                == Some("bad response status - expected 200 OK, got 503 instead")
        );
        ensure!(bot.transport.bot_reactions(handle.message())? == [EMOJI_DISMISS]);
        Ok(())
    })
}

#[rstest]
#[case("search", "incorrect arguments - `search` requires <query>")]
#[case("frobnicate", "unrecognized command 'frobnicate'")]
#[case("link https://example.com/x", "Not a recognized jisho.org link")]
#[case("link https://jisho.org/search/%E5%AE%B6%20%23kanji", "Kanji data not currently supported by API")]
fn bad_commands_are_explained(
    runtime: std::io::Result<Runtime>,
    wiring: eyre::Result<Bot>,
    #[case] input: &str,
    #[case] expected: &str,
) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;

    rt.block_on(async {
        let handle = bot.service.execute(CONTEXT, input).await?;
        let shown = bot.shown(handle.message())?;

        ensure!(shown.title == "An error has occurred");
        ensure!(shown.description.as_deref() == Some(expected));
        Ok(())
    })
}

#[rstest]
fn ping_and_version_answer_with_notices(
    runtime: std::io::Result<Runtime>,
    wiring: eyre::Result<Bot>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;

    rt.block_on(async {
        let pong = bot.service.execute(CONTEXT, "ping").await?;
        ensure!(bot.shown(pong.message())?.title == "Pong!");

        let version = bot.service.execute(CONTEXT, "v").await?;
        ensure!(bot.shown(version.message())?.description.as_deref() == Some(BOT_VERSION));
        Ok(())
    })
}
