//! Integration test: reaction policies behind the trait object
//!
//! Tests the policy seam the agents rely on:
//! 1. Styles resolve to the expected policies
//! 2. Both built-in styles agree on price for good news and differ on size
//! 3. A hand-written policy plugs into the same seam

use herald_core::{NewsEvent, OrderTicket, Price, Quantity, Security, Sentiment, Side};
use herald_strategy::{ReactionPolicy, ReactionStyle, policy_for};
use std::sync::Arc;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ibm() -> Security {
    Security::new("IBM", "International Business Machines")
}

/// Sells everything on any news, at the current price
struct Liquidator;

impl ReactionPolicy for Liquidator {
    fn name(&self) -> &str {
        "Liquidator"
    }

    fn decide(&self, _event: &NewsEvent, position: Quantity, price: Price) -> Option<OrderTicket> {
        Some(OrderTicket::ask(price, position))
    }
}

#[test]
fn test_styles_share_good_news_price() {
    init();

    let aggressive = policy_for(ReactionStyle::Aggressive);
    let conservative = policy_for(ReactionStyle::Conservative);
    let event = NewsEvent::new(5, ibm(), Sentiment::Good);

    let a = aggressive.decide(&event, 40, 200).unwrap();
    let c = conservative.decide(&event, 40, 200).unwrap();

    assert_eq!(a.side, Side::Bid);
    assert_eq!(c.side, Side::Bid);
    assert_eq!(a.price, 210);
    assert_eq!(c.price, 210);
    assert_eq!(a.quantity, 20);
    assert_eq!(c.quantity, 8);
}

#[test]
fn test_bad_news_discounts_differ() {
    init();

    let event = NewsEvent::new(5, ibm(), Sentiment::Bad);
    let a = ReactionStyle::Aggressive.policy().decide(&event, 10, 100);
    let c = ReactionStyle::Conservative.policy().decide(&event, 10, 100);

    assert_eq!(a, Some(OrderTicket::ask(90, 8)));
    assert_eq!(c, Some(OrderTicket::ask(95, 2)));
}

#[test]
fn test_custom_policy_behind_trait_object() {
    init();

    let policies: Vec<Arc<dyn ReactionPolicy>> =
        vec![policy_for(ReactionStyle::Conservative), Arc::new(Liquidator)];
    let event = NewsEvent::new(0, ibm(), Sentiment::Good);

    let tickets: Vec<_> = policies
        .iter()
        .map(|p| (p.name().to_string(), p.decide(&event, 10, 100)))
        .collect();

    assert_eq!(
        tickets,
        vec![
            ("Conservative".to_string(), Some(OrderTicket::bid(105, 2))),
            ("Liquidator".to_string(), Some(OrderTicket::ask(100, 10))),
        ]
    );
}
