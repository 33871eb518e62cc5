//! Turning a finished design into cart lines
//!
//! A single order adds one line with the requested quantity. A team order
//! adds one unit per roster player; with team names enabled each unit
//! carries that player's name and number, so every player gets a line of
//! their own.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{GarmentSize, JerseyConfig, PricedProduct, Roster};
use super::line_item::{Cart, LineItemKey};

/// How a design is being ordered
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderKind<'a> {
    Single { size: GarmentSize, quantity: u32 },
    Team(&'a Roster),
}

/// Lines touched by a submission
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub keys: Vec<LineItemKey>,
    pub units: u32,
}

/// Add a finished design to the cart
pub fn submit_design(cart: &mut Cart, product: &PricedProduct, config: &JerseyConfig, order: OrderKind<'_>) -> Submission {
    let color = Some(config.primary_color.as_str());

    match order {
        OrderKind::Single { size, quantity } => {
            let key = cart.add_item(product, quantity, Some(size.label()), color, Some(config));
            Submission { keys: vec![key], units: quantity }
        }
        OrderKind::Team(roster) => {
            if roster.is_empty() {
                warn!(product_id = %product.product.id, "Team order submitted with an empty roster");
                return Submission::default();
            }

            let mut submission = Submission::default();
            for player in roster.players() {
                let key = if config.use_team_names {
                    let player_config = config.with_player(&player.name, &player.number);
                    cart.add_item(product, 1, Some(player.size.label()), color, Some(&player_config))
                } else {
                    cart.add_item(product, 1, Some(player.size.label()), color, Some(config))
                };
                if !submission.keys.contains(&key) {
                    submission.keys.push(key);
                }
                submission.units += 1;
            }

            info!(
                product_id = %product.product.id,
                players = roster.len(),
                lines = submission.keys.len(),
                team_names = config.use_team_names,
                "Team order added to cart"
            );
            submission
        }
    }
}
