//! Document trait implementation for the Order domain type.
//!
//! This module contains the [`Document`] trait implementation that enables
//! [`Order`] to be held by the generic [`crate::framework::CollectionActor`].
//! Draft validation and the fulfillment status machine live here.

use crate::framework::Document;
use crate::model::{Order, OrderDraft, OrderFilter, OrderPatch, OrderStatus};

impl Document for Order {
    type Id = String;
    type Draft = OrderDraft;
    type Patch = OrderPatch;
    type Filter = OrderFilter;

    /// Creates a new Order from a draft, rejecting empty or negative orders.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Result<Self, String> {
        if draft.quantity == 0 {
            return Err("Order quantity must be nonzero".to_string());
        }
        if draft.total < 0.0 {
            return Err(format!("Order total must be non-negative: {}", draft.total));
        }
        Ok(Self::new(
            id,
            draft.customer_id,
            draft.product_id,
            draft.quantity,
            draft.total,
        ))
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        match filter {
            OrderFilter::TrackingNumber(number) => self.tracking_number.as_ref() == Some(number),
            OrderFilter::Customer(customer_id) => self.customer_id == *customer_id,
        }
    }

    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), String> {
        match patch {
            OrderPatch::MarkPaid => match self.status {
                OrderStatus::Placed => {
                    self.status = OrderStatus::Paid;
                    Ok(())
                }
                other => Err(format!("Cannot mark paid from {:?}", other)),
            },
            OrderPatch::Ship { tracking_number } => {
                if self.status != OrderStatus::Paid {
                    return Err(format!("Cannot ship from {:?}", self.status));
                }
                // Assigned once at ship time, immutable afterwards.
                if self.tracking_number.is_some() {
                    return Err("Tracking number already assigned".to_string());
                }
                self.tracking_number = Some(tracking_number);
                self.status = OrderStatus::Shipped;
                Ok(())
            }
            OrderPatch::MarkDelivered => match self.status {
                OrderStatus::Shipped => {
                    self.status = OrderStatus::Delivered;
                    Ok(())
                }
                other => Err(format!("Cannot mark delivered from {:?}", other)),
            },
            OrderPatch::Cancel => match self.status {
                OrderStatus::Placed | OrderStatus::Paid => {
                    self.status = OrderStatus::Cancelled;
                    Ok(())
                }
                other => Err(format!("Cannot cancel from {:?}", other)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::TrackingNumber;

    fn paid_order() -> Order {
        let mut order = Order::new("order_1", "cust_1", "prod_1", 2, 50.0);
        order.apply_patch(OrderPatch::MarkPaid).unwrap();
        order
    }

    #[test]
    fn test_draft_validation() {
        let draft = OrderDraft {
            customer_id: "cust_1".into(),
            product_id: "prod_1".into(),
            quantity: 0,
            total: 10.0,
        };
        assert!(Order::from_draft("order_1".into(), draft).is_err());

        let draft = OrderDraft {
            customer_id: "cust_1".into(),
            product_id: "prod_1".into(),
            quantity: 1,
            total: -5.0,
        };
        assert!(Order::from_draft("order_1".into(), draft).is_err());
    }

    #[test]
    fn test_ship_attaches_number_once() {
        let mut order = paid_order();
        let number = TrackingNumber::parse("9412345677").unwrap();

        order
            .apply_patch(OrderPatch::Ship { tracking_number: number.clone() })
            .unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.tracking_number, Some(number.clone()));

        // A second ship is rejected and the stored number is untouched.
        let second = TrackingNumber::parse("9400000009").unwrap();
        let err = order
            .apply_patch(OrderPatch::Ship { tracking_number: second })
            .unwrap_err();
        assert!(err.contains("Cannot ship"));
        assert_eq!(order.tracking_number, Some(number));
    }

    #[test]
    fn test_ship_requires_payment() {
        let mut order = Order::new("order_1", "cust_1", "prod_1", 2, 50.0);
        let number = TrackingNumber::parse("9412345677").unwrap();

        let err = order
            .apply_patch(OrderPatch::Ship { tracking_number: number })
            .unwrap_err();
        assert!(err.contains("Cannot ship"));
        assert_eq!(order.status, OrderStatus::Placed);
    }

    #[test]
    fn test_cancel_rejected_after_shipping() {
        let mut order = paid_order();
        let number = TrackingNumber::parse("9412345677").unwrap();
        order
            .apply_patch(OrderPatch::Ship { tracking_number: number })
            .unwrap();

        assert!(order.apply_patch(OrderPatch::Cancel).is_err());
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[test]
    fn test_filters_match_on_equality() {
        let mut order = paid_order();
        let number = TrackingNumber::parse("9412345677").unwrap();
        order
            .apply_patch(OrderPatch::Ship { tracking_number: number.clone() })
            .unwrap();

        assert!(order.matches(&OrderFilter::TrackingNumber(number)));
        assert!(!order.matches(&OrderFilter::TrackingNumber(
            TrackingNumber::parse("9400000009").unwrap()
        )));
        assert!(order.matches(&OrderFilter::Customer("cust_1".into())));
        assert!(!order.matches(&OrderFilter::Customer("cust_2".into())));
    }
}
