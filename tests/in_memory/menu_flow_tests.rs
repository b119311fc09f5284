//! In-memory integration tests for reaction-driven navigation.

use crate::in_memory::helpers::{AUTHOR, Bot, CONTEXT, entries, non_zero, runtime, wiring};
use eyre::{bail, ensure};
use jisho_bot::config::MenuConfig;
use jisho_bot::menu::adapters::TransportOperation;
use jisho_bot::menu::domain::{
    EMOJI_DISMISS, EMOJI_LEFT, EMOJI_RETURN, EMOJI_RIGHT, SELECT_EMOJIS, UserId,
};
use jisho_bot::menu::services::MenuOutcome;
use rstest::rstest;
use std::time::Duration;
use tokio::runtime::Runtime;

fn slot(position: usize) -> eyre::Result<&'static str> {
    SELECT_EMOJIS
        .get(position)
        .copied()
        .ok_or_else(|| eyre::eyre!("no keycap for slot {position}"))
}

fn edited_views(bot: &Bot, message: jisho_bot::menu::domain::MessageHandle) -> eyre::Result<Vec<String>> {
    Ok(bot
        .transport
        .operations_for(message)?
        .into_iter()
        .filter_map(|operation| match operation {
            TransportOperation::Edit { payload, .. } => payload
                .description
                .filter(|description| description.starts_with("*Showing"))
                .or(Some(payload.title)),
            _ => None,
        })
        .collect())
}

#[rstest]
fn author_pages_selects_returns_and_dismisses(
    runtime: std::io::Result<Runtime>,
    wiring: eyre::Result<Bot>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;
    bot.dictionary.set_results("tree", entries("tree", 12))?;

    rt.block_on(async {
        let handle = bot.service.execute(CONTEXT, "search tree").await?;
        let message = handle.message();

        for emoji in [
            EMOJI_RIGHT,
            EMOJI_RIGHT,
            EMOJI_LEFT,
            slot(1)?,
            EMOJI_RETURN,
            EMOJI_DISMISS,
        ] {
            bot.transport.react(message, AUTHOR, emoji)?;
        }

        ensure!(handle.finished().await? == MenuOutcome::Dismissed);
        ensure!(bot.transport.payload(message)?.is_none());
        ensure!(!bot.cache.contains(message)?);
        ensure!(
            edited_views(&bot, message)?
                == [
                    "*Showing results 6 to 10 (out of 12)*",
                    "*Showing results 11 to 12 (out of 12)*",
                    "*Showing results 6 to 10 (out of 12)*",
                    "jisho.org entry for tree6",
                    "*Showing results 6 to 10 (out of 12)*",
                ]
        );
        Ok(())
    })
}

#[rstest]
fn navigation_keeps_menu_alive_until_timeout(
    runtime: std::io::Result<Runtime>,
    wiring: eyre::Result<Bot>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;
    bot.dictionary.set_results("tree", entries("tree", 12))?;

    rt.block_on(async {
        let started = tokio::time::Instant::now();
        let handle = bot.service.execute(CONTEXT, "search tree").await?;
        let message = handle.message();

        tokio::time::advance(Duration::from_secs(50)).await;
        bot.transport.react(message, AUTHOR, EMOJI_RIGHT)?;

        ensure!(handle.finished().await? == MenuOutcome::TimedOut);
        ensure!(started.elapsed() >= Duration::from_secs(110));
        let Some(last) = bot.transport.operations_for(message)?.pop() else {
            bail!("expected operations on the menu message");
        };
        ensure!(last == TransportOperation::ClearReactions { message });
        ensure!(bot.cache.is_empty()?);
        Ok(())
    })
}

#[rstest]
fn other_users_cannot_drive_the_menu(
    runtime: std::io::Result<Runtime>,
    wiring: eyre::Result<Bot>,
) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;
    bot.dictionary.set_results("tree", entries("tree", 12))?;

    rt.block_on(async {
        let handle = bot.service.execute(CONTEXT, "search tree").await?;
        let message = handle.message();
        let bystander = UserId::new(2002);

        bot.transport.react(message, bystander, EMOJI_RIGHT)?;
        bot.transport.react(message, bystander, EMOJI_DISMISS)?;

        ensure!(handle.finished().await? == MenuOutcome::TimedOut);
        ensure!(edited_views(&bot, message)?.is_empty());
        Ok(())
    })
}

#[rstest]
fn oldest_menu_is_evicted_when_cache_is_full(runtime: std::io::Result<Runtime>) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = Bot::with_config(&MenuConfig::default().with_cache_capacity(non_zero(2)))?;
    bot.dictionary.set_results("tree", entries("tree", 3))?;

    rt.block_on(async {
        let first = bot.service.execute(CONTEXT, "search tree").await?;
        let second = bot.service.execute(CONTEXT, "search tree").await?;
        bot.cache.lookup(first.message())?;
        let third = bot.service.execute(CONTEXT, "search tree").await?;

        ensure!(bot.cache.handles()? == [third.message(), first.message()]);
        let evicted = second.message();
        ensure!(
            bot.transport
                .operations_for(evicted)?
                .contains(&TransportOperation::ClearReactions { message: evicted })
        );

        bot.transport.react(evicted, AUTHOR, EMOJI_DISMISS)?;
        ensure!(second.finished().await? == MenuOutcome::Evicted);
        ensure!(bot.transport.payload(evicted)?.is_some());

        bot.transport.react(first.message(), AUTHOR, EMOJI_DISMISS)?;
        ensure!(first.finished().await? == MenuOutcome::Dismissed);
        ensure!(third.finished().await? == MenuOutcome::TimedOut);
        Ok(())
    })
}

#[rstest]
fn deleted_menu_is_forgotten(runtime: std::io::Result<Runtime>, wiring: eyre::Result<Bot>) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = wiring?;
    bot.dictionary.set_results("tree", entries("tree", 3))?;

    rt.block_on(async {
        let handle = bot.service.execute(CONTEXT, "search tree").await?;
        let message = handle.message();

        bot.transport.delete_externally(message)?;

        ensure!(handle.finished().await? == MenuOutcome::Vanished);
        ensure!(!bot.cache.contains(message)?);
        Ok(())
    })
}

#[rstest]
fn larger_pages_follow_configuration(runtime: std::io::Result<Runtime>) -> eyre::Result<()> {
    let rt = runtime?;
    let bot = Bot::with_config(&MenuConfig::default().with_page_size(non_zero(3)))?;
    bot.dictionary.set_results("tree", entries("tree", 7))?;

    rt.block_on(async {
        let handle = bot.service.execute(CONTEXT, "search tree").await?;
        let message = handle.message();

        ensure!(
            bot.shown(message)?.description.as_deref()
                == Some("*Showing results 1 to 3 (out of 7)*")
        );
        ensure!(bot.transport.bot_reactions(message)?.len() == 6);

        bot.transport.react(message, AUTHOR, EMOJI_RIGHT)?;
        bot.transport.react(message, AUTHOR, slot(2)?)?;
        bot.transport.react(message, AUTHOR, EMOJI_DISMISS)?;
        ensure!(handle.finished().await? == MenuOutcome::Dismissed);
        ensure!(edited_views(&bot, message)?.contains(&"jisho.org entry for tree5".to_owned()));
        Ok(())
    })
}
