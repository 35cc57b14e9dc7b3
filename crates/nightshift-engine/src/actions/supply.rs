//! Toolroom, vending, and scavenging handlers.

use nightshift_types::{LogType, ToolId};
use serde_json::Value;

use super::{
    ActionDraft, EFFICIENCY_BOOST_MS, TOOLROOM_MASTER_COOLDOWN_MS, VENOM_SURGE_MS, payload_f64,
    payload_str,
};
use crate::catalog::{self, ShopEffect};
use crate::rewards::{self, RewardCategory};

/// Credits a tool recalibration costs.
pub const TOOL_REPAIR_COST: f64 = 75.0;
/// Minimum scrap the toolroom will buy.
pub const MIN_SCRAP_SALE: f64 = 10.0;
/// Credits per unit of scrap.
pub const SCRAP_PRICE: f64 = 2.0;
/// Chance a scavenge turns up a PC part.
pub const PC_PART_CHANCE: f64 = 0.2;

/// `BUY_ITEM { itemId, price? }`.
pub fn buy_item(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(id) = payload_str(payload, "itemId") else {
        d.fail("Buy what?");
        return;
    };
    let Some(item) = catalog::shop_item(id) else {
        d.fail(format!("The toolroom does not stock {id}."));
        return;
    };
    let price = payload_f64(payload, "price").unwrap_or(item.price).max(0.0);
    if d.state.resources.credits < price {
        d.fail(format!("{} costs {price} credits.", item.label));
        return;
    }
    d.state.resources.add_credits(-price);

    let inv = &mut d.state.inventory;
    match item.effect {
        ShopEffect::Tool(tool) => {
            inv.grant_tool(tool);
            d.state.tool_conditions.insert(tool, 100.0);
        }
        ShopEffect::EarDefenders => inv.has_ear_defenders = true,
        ShopEffect::HiVisVest => inv.has_hi_vis_vest = true,
        ShopEffect::Respirator => inv.has_respirator = true,
        ShopEffect::Pills(n) => inv.pills = inv.pills.saturating_add(n),
        ShopEffect::PcPart => inv.pc_parts = inv.pc_parts.saturating_add(1),
    }
    d.log(format!("Bought: {}.", item.label), LogType::Success);
}

/// `BUY_VENDING { itemId }`. The mystery button takes one draw.
pub fn buy_vending(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(id) = payload_str(payload, "itemId") else {
        d.fail("The machine blinks at you.");
        return;
    };
    let Some(price) = d.state.vending_prices.get(id).copied() else {
        d.fail("That button does nothing.");
        return;
    };
    if d.state.resources.credits < price {
        d.fail("Not enough credits.");
        return;
    }
    d.state.resources.add_credits(-price);

    match id {
        "coffee" => {
            d.state.resources.add_focus(15.0);
            d.state.hf_stats.efficiency_boost_timer = EFFICIENCY_BOOST_MS;
            d.log("Burnt coffee. Your hands stop shaking.", LogType::Info);
        }
        "venom" => {
            d.state.resources.add_focus(30.0);
            d.state.flags.venom_surge_active = true;
            d.state.hf_stats.venom_surge_timer = VENOM_SURGE_MS;
            d.log("Venom. You can hear colours.", LogType::Info);
        }
        "snack" => {
            d.state.resources.add_sanity(5.0);
            d.state.hf_stats.add_fatigue(-5.0);
            d.log("A stale flapjack. It helps.", LogType::Info);
        }
        "mystery_button" => {
            if d.roll() < 0.5 {
                d.state.resources.add_sanity(-3.0);
                d.log("The machine dispenses a warm, wet tooth.", LogType::Story);
            } else {
                d.state.resources.kardex_fragments += 1.0;
                d.log("The machine dispenses a folded kardex card.", LogType::Story);
            }
        }
        _ => d.log("The machine swallows your credits.", LogType::Warning),
    }
}

/// `REPAIR_TOOL { toolId }`.
pub fn repair_tool(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(tool) = payload_str(payload, "toolId").and_then(ToolId::parse) else {
        d.fail("Repair which tool?");
        return;
    };
    if !d.state.inventory.owns_tool(tool) {
        d.fail(format!("You do not own a {}.", tool.label()));
        return;
    }
    if d.state.resources.credits < TOOL_REPAIR_COST {
        d.fail("Recalibration costs 75 credits.");
        return;
    }
    d.state.resources.add_credits(-TOOL_REPAIR_COST);
    d.state.tool_conditions.insert(tool, 100.0);
    d.log(format!("Your {} is back in calibration.", tool.label()), LogType::Success);
}

/// `ASK_TOOLROOM_MASTER`: one draw.
pub fn ask_toolroom_master(d: &mut ActionDraft<'_, '_>) {
    if d.state.hf_stats.toolroom_master_cooldown > 0.0 {
        d.fail("The toolroom master is not taking questions.");
        return;
    }
    d.state.hf_stats.toolroom_master_cooldown = TOOLROOM_MASTER_COOLDOWN_MS;

    let worst = ToolId::ALL
        .into_iter()
        .filter(|t| d.state.inventory.owns_tool(*t))
        .min_by(|a, b| {
            d.state
                .tool_condition(*a)
                .total_cmp(&d.state.tool_condition(*b))
        });

    if d.roll() < 0.5
        && let Some(tool) = worst
    {
        let condition = d.state.tool_conditions.entry(tool).or_insert(0.0);
        *condition = (*condition + 30.0).min(100.0);
        d.log(
            format!("The toolroom master fettles your {} without a word.", tool.label()),
            LogType::Success,
        );
    } else {
        d.state.resources.add_experience(40.0);
        d.log("The toolroom master tells you a story about the 1987 incident.", LogType::Info);
    }
}

/// `SELL_SCRAP`.
pub fn sell_scrap(d: &mut ActionDraft<'_, '_>) {
    let scrap = d.state.resources.scrap_metal;
    if scrap < MIN_SCRAP_SALE {
        d.fail("The toolroom will not weigh less than 10 scrap.");
        return;
    }
    d.state.resources.add_credits(scrap * SCRAP_PRICE);
    d.state.resources.scrap_metal = 0.0;
    d.log(format!("Sold {scrap} scrap."), LogType::Info);
}

/// `SCAVENGE { spot }`: one draw for the PC part.
pub fn scavenge(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(spot) = payload_str(payload, "spot") else {
        d.fail("Scavenge where?");
        return;
    };
    let Some(reward) =
        rewards::calculate_reward(RewardCategory::Scavenge, spot, &d.state.proficiency)
    else {
        d.fail(format!("There is nothing to find at {spot}."));
        return;
    };
    rewards::grant(&mut d.state, reward);
    if d.roll() < PC_PART_CHANCE {
        d.state.inventory.pc_parts = d.state.inventory.pc_parts.saturating_add(1);
        d.log("Under the offcuts: a motherboard, mostly intact.", LogType::Success);
    } else {
        d.log(format!("Scavenged {spot}."), LogType::Info);
    }
}
