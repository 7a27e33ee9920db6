//! Bundled actions: greeting and help for authorized users, authorization management for admins.

use fbot_core::{CallbackAnswer, HandlerResponse, Result, SendOptions};
use handler_chain::{filters::command_args, HandlerChain, OnCallback, OnCommand};
use std::sync::Arc;
use storage::{AuthorizationRecord, AuthorizationRepository};
use telegram_action::{
    Actions, BotHandle, CallbackData, CommitCallback, Edit, Name, OriginalMessageId, Respond,
    Text, AUTH_CALLBACK_PREFIX,
};
use tracing::{info, warn};

pub const HELP_TEXT: &str = "Befehle:\n\
/start - Begrüßung\n\
/help - diese Hilfe\n\
\n\
Im Admin-Chat:\n\
/pending - offene Autorisierungsanfragen\n\
/authorize <id> - Nutzer freischalten\n\
/revoke <id> - Freischaltung entziehen";

pub const NOTHING_PENDING: &str = "Keine offenen Anfragen.";
pub const GRANTED_MESSAGE: &str = "Du wurdest freigeschaltet. /help zeigt, was ich kann.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Deny,
}

/// Parses `auth:approve:<id>` / `auth:deny:<id>`.
pub fn parse_decision(data: &str) -> Option<(Decision, i64)> {
    let rest = data.strip_prefix(AUTH_CALLBACK_PREFIX)?;
    let (verb, id) = rest.split_once(':')?;
    let decision = match verb {
        "approve" => Decision::Approve,
        "deny" => Decision::Deny,
        _ => return None,
    };
    Some((decision, id.parse().ok()?))
}

fn describe(record: &AuthorizationRecord) -> String {
    let user = record.user();
    let username = user
        .username
        .as_deref()
        .map(|u| format!("@{}", u))
        .unwrap_or_else(|| "ohne Benutzername".to_string());
    format!(
        "{} ({}, id {}, seit {})",
        user.display_name(),
        username,
        record.user_id,
        record.requested_at.format("%d.%m.%Y %H:%M")
    )
}

pub async fn start(respond: Respond, Name(name): Name) -> Result<HandlerResponse> {
    respond
        .send(&format!("Servus {}! /help zeigt alle Befehle.", name))
        .await?;
    Ok(HandlerResponse::Stop)
}

pub async fn help(respond: Respond) -> Result<HandlerResponse> {
    respond.send(HELP_TEXT).await?;
    Ok(HandlerResponse::Stop)
}

pub async fn pending(repo: AuthorizationRepository, respond: Respond) -> Result<HandlerResponse> {
    let records = repo.list_pending().await?;
    if records.is_empty() {
        respond.send(NOTHING_PENDING).await?;
        return Ok(HandlerResponse::Stop);
    }

    let lines: Vec<String> = records.iter().map(describe).collect();
    respond
        .send(&format!("Offene Anfragen:\n{}", lines.join("\n")))
        .await?;
    Ok(HandlerResponse::Stop)
}

/// Tells the user in the chat they asked from that they may use the bot now. Best effort.
async fn notify_granted(repo: &AuthorizationRepository, bot: &BotHandle, user_id: i64) {
    let chat_id = match repo.find(user_id).await {
        Ok(Some(record)) => record.chat_id,
        Ok(None) => return,
        Err(e) => {
            warn!(user_id, error = %e, "Could not look up authorization record");
            return;
        }
    };
    if let Err(e) = bot
        .0
        .send_message(chat_id, GRANTED_MESSAGE, &SendOptions::default())
        .await
    {
        warn!(user_id, chat_id, error = %e, "Could not notify authorized user");
    }
}

async fn decide(
    repo: &AuthorizationRepository,
    bot: &BotHandle,
    decision: Decision,
    user_id: i64,
) -> Result<bool> {
    let changed = match decision {
        Decision::Approve => repo.authorize(user_id).await?,
        Decision::Deny => repo.revoke(user_id).await?,
    };
    info!(user_id, ?decision, changed, "Authorization decided");
    if changed && decision == Decision::Approve {
        notify_granted(repo, bot, user_id).await;
    }
    Ok(changed)
}

pub async fn authorize(
    repo: AuthorizationRepository,
    respond: Respond,
    bot: BotHandle,
    Text(text): Text,
) -> Result<HandlerResponse> {
    command_decision(repo, respond, bot, text, Decision::Approve).await
}

pub async fn revoke(
    repo: AuthorizationRepository,
    respond: Respond,
    bot: BotHandle,
    Text(text): Text,
) -> Result<HandlerResponse> {
    command_decision(repo, respond, bot, text, Decision::Deny).await
}

async fn command_decision(
    repo: AuthorizationRepository,
    respond: Respond,
    bot: BotHandle,
    text: Option<String>,
    decision: Decision,
) -> Result<HandlerResponse> {
    let (command, verb) = match decision {
        Decision::Approve => ("/authorize", "freigeschaltet"),
        Decision::Deny => ("/revoke", "gesperrt"),
    };
    let Ok(user_id) = command_args(text.as_deref().unwrap_or("")).parse::<i64>() else {
        respond
            .send(&format!("Bitte eine Nutzer-ID angeben: {} <id>", command))
            .await?;
        return Ok(HandlerResponse::Stop);
    };

    let reply = if decide(&repo, &bot, decision, user_id).await? {
        format!("Nutzer {} {}.", user_id, verb)
    } else {
        format!("Nutzer {} ist unbekannt oder bereits {}.", user_id, verb)
    };
    respond.send(&reply).await?;
    Ok(HandlerResponse::Stop)
}

/// Approve / deny buttons under an authorization request in the admin chat.
pub async fn decision_callback(
    repo: AuthorizationRepository,
    bot: BotHandle,
    CallbackData(data): CallbackData,
    OriginalMessageId(original): OriginalMessageId,
    edit: Edit,
    commit_callback: CommitCallback,
) -> Result<HandlerResponse> {
    let Some((decision, user_id)) = data.as_deref().and_then(parse_decision) else {
        commit_callback
            .commit_with(CallbackAnswer::alert("Unbekannte Aktion"))
            .await?;
        return Ok(HandlerResponse::Stop);
    };

    let record = repo.find(user_id).await?;
    let changed = decide(&repo, &bot, decision, user_id).await?;
    let who = record
        .as_ref()
        .map(describe)
        .unwrap_or_else(|| format!("id {}", user_id));
    let outcome = match decision {
        Decision::Approve => "freigeschaltet",
        Decision::Deny => "abgelehnt",
    };

    edit.edit(original, &format!("{}: {}", who, outcome)).await;
    let answer = if changed {
        CallbackAnswer::text(outcome)
    } else {
        CallbackAnswer::text("Keine Änderung")
    };
    commit_callback.commit_with(answer).await?;
    Ok(HandlerResponse::Stop)
}

/// Wires the bundled actions into a chain: user commands behind `requires_authorization`,
/// management behind `admin_only`.
pub fn build_chain(actions: &Actions, repo: AuthorizationRepository) -> HandlerChain {
    let pending_repo = repo.clone();
    let authorize_repo = repo.clone();
    let revoke_repo = repo.clone();
    let callback_repo = repo;

    let handlers: Vec<Arc<dyn fbot_core::Handler>> = vec![
        Arc::new(OnCommand::new(
            "start",
            actions.requires_authorization(actions.patch_telegram_action(start)),
        )),
        Arc::new(OnCommand::new(
            "help",
            actions.requires_authorization(actions.patch_telegram_action(help)),
        )),
        Arc::new(OnCommand::new(
            "pending",
            actions.admin_only(actions.patch_telegram_action(move |respond: Respond| {
                pending(pending_repo.clone(), respond)
            })),
        )),
        Arc::new(OnCommand::new(
            "authorize",
            actions.admin_only(actions.patch_telegram_action(
                move |respond: Respond, bot: BotHandle, text: Text| {
                    authorize(authorize_repo.clone(), respond, bot, text)
                },
            )),
        )),
        Arc::new(OnCommand::new(
            "revoke",
            actions.admin_only(actions.patch_telegram_action(
                move |respond: Respond, bot: BotHandle, text: Text| {
                    revoke(revoke_repo.clone(), respond, bot, text)
                },
            )),
        )),
        Arc::new(OnCallback::new(
            AUTH_CALLBACK_PREFIX,
            actions.admin_only(actions.patch_telegram_action(
                move |bot: BotHandle,
                      data: CallbackData,
                      original: OriginalMessageId,
                      edit: Edit,
                      commit: CommitCallback| {
                    decision_callback(callback_repo.clone(), bot, data, original, edit, commit)
                },
            )),
        )),
    ];

    handlers
        .into_iter()
        .fold(HandlerChain::new(), |chain, handler| chain.add_handler(handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decision() {
        assert_eq!(
            parse_decision("auth:approve:8"),
            Some((Decision::Approve, 8))
        );
        assert_eq!(parse_decision("auth:deny:-5"), Some((Decision::Deny, -5)));
        assert_eq!(parse_decision("auth:maybe:8"), None);
        assert_eq!(parse_decision("auth:approve:x"), None);
        assert_eq!(parse_decision("beer:approve:8"), None);
    }
}
