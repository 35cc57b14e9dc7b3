//! Passive income, mail delivery, and vending drift.

use nightshift_types::{
    EventCategory, GameState, LogType, MailMessage, Notification, NotificationVariant,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::{may_spawn, request_event, roll_rate};
use crate::catalog::{self, MailTemplate};
use crate::context::TickContext;
use crate::rewards::{self, PassiveStream};

/// Internal audit rate while auto-SRF filing runs.
pub const AUTO_SRF_AUDIT_PER_SEC: f64 = 0.0005;
/// Minimum gap between mail deliveries.
pub const MAIL_COOLDOWN_MS: i64 = 300_000;
/// Mail delivery rate per second once the cooldown has passed.
pub const MAIL_PER_SEC: f64 = 0.01;
/// Unread messages at which delivery pauses.
pub const MAIL_UNREAD_CAP: usize = 5;
/// Vending drift rate per second.
pub const VENDING_DRIFT_PER_SEC: f64 = 0.002;
/// Lowest price drift can reach.
pub const VENDING_PRICE_FLOOR: f64 = 5.0;

/// Step 11.
pub fn apply_passive_income(state: &mut GameState, secs: f64, ctx: &mut TickContext<'_>) {
    let streams = [
        (PassiveStream::NightCrew, state.flags.night_crew_active),
        (
            PassiveStream::TransitCheckDelegation,
            state.flags.transit_check_delegation_active,
        ),
        (PassiveStream::AutoSrf, state.flags.auto_srf_active),
    ];
    for (stream, active) in streams {
        if active {
            let bundle = rewards::passive_reward(stream, secs, &state.proficiency);
            rewards::grant(state, bundle);
        }
    }

    if state.flags.auto_srf_active
        && may_spawn(state, EventCategory::Audit)
        && roll_rate(ctx, AUTO_SRF_AUDIT_PER_SEC, secs)
    {
        request_event(ctx, EventCategory::Audit, Some("INTERNAL_AUDIT"));
    }
}

/// Step 14.
pub fn deliver_mail(state: &mut GameState, secs: f64, ctx: &mut TickContext<'_>) {
    let now = ctx.now_ms;
    if !state.inventory.pc_assembled
        || state.unread_mail_count() >= MAIL_UNREAD_CAP
        || now - state.stats.last_mail_at < MAIL_COOLDOWN_MS
    {
        return;
    }
    let fresh: Vec<&MailTemplate> = catalog::MAIL
        .iter()
        .filter(|t| state.mail.iter().all(|m| m.subject != t.subject))
        .collect();
    if fresh.is_empty() || !roll_rate(ctx, MAIL_PER_SEC, secs) {
        return;
    }
    let Some(template) = ctx.rng.pick(fresh.len()).and_then(|i| fresh.get(i)).copied() else {
        return;
    };

    state.mail.insert(
        0,
        MailMessage {
            id: Uuid::now_v7().to_string(),
            sender: template.sender.to_owned(),
            subject: template.subject.to_owned(),
            body: template.body.to_owned(),
            read: false,
            received_at: now,
        },
    );
    state.stats.last_mail_at = now;
    info!(subject = template.subject, "Mail delivered");
    state.enqueue_notification(Notification::new(
        "mail",
        "New mail",
        Some(template.subject.to_owned()),
        NotificationVariant::Info,
    ));
    state.push_log(format!("Mail from {}.", template.sender), LogType::Info, now);
}

/// Step 15. Free items never move.
pub fn drift_vending_prices(state: &mut GameState, secs: f64, ctx: &mut TickContext<'_>) {
    if !roll_rate(ctx, VENDING_DRIFT_PER_SEC, secs) {
        return;
    }
    for (item, price) in &mut state.vending_prices {
        if *price <= 0.0 {
            continue;
        }
        let step = (ctx.rng.next_f64() * 5.0).floor() - 2.0;
        *price = (*price + step).max(VENDING_PRICE_FLOOR);
        debug!(item = %item, price = *price, "Vending price drifted");
    }
}
