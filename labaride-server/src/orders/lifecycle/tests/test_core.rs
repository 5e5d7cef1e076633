use super::*;

#[tokio::test]
async fn test_create_stores_pending_with_computed_total() {
    let h = harness();
    let order = place_order(&h).await;

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.user_id, CUSTOMER);
    assert_eq!(order.shop_id, SHOP);
    assert_eq!(order.subtotal, dec("100"));
    assert_eq!(order.delivery_fee, dec("20"));
    assert_eq!(order.voucher_discount, dec("10"));
    assert_eq!(order.total_amount, dec("110"));
    assert_eq!(order.kilo_amount, dec("4.5"));
    assert_eq!(order.price_per_kilo, None);
    assert_eq!(order.user_name, "Ana");
    assert_eq!(order.payment_method, "Cash on Delivery");
    assert_eq!(h.store.order(order.id), Some(order));
}

#[tokio::test]
async fn test_create_rejects_total_mismatch() {
    let h = harness();
    let mut req = create_request();
    req.total_amount = Some(json!(130));

    let err = h
        .lifecycle
        .create(Actor::new(CUSTOMER), CUSTOMER, &req)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation { field: "total_amount", .. }));
    assert_eq!(h.store.order(1), None);
}

#[tokio::test]
async fn test_create_missing_field_names_it() {
    let h = harness();
    let mut req = create_request();
    req.delivery_fee = None;

    let err = h
        .lifecycle
        .create(Actor::new(CUSTOMER), CUSTOMER, &req)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation { field: "delivery_fee", .. }));
}

#[tokio::test]
async fn test_create_unknown_user() {
    let h = harness();
    let err = h
        .lifecycle
        .create(Actor::new(500), 500, &create_request())
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::UserNotFound(500)));
}

#[tokio::test]
async fn test_create_unknown_shop() {
    let h = harness();
    let mut req = create_request();
    req.shop_id = Some(json!(404));

    let err = h
        .lifecycle
        .create(Actor::new(CUSTOMER), CUSTOMER, &req)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::ShopNotFound(404)));
}

#[tokio::test]
async fn test_create_for_another_user_is_forbidden() {
    let h = harness();
    let err = h
        .lifecycle
        .create(Actor::new(BYSTANDER), CUSTOMER, &create_request())
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));
}

#[tokio::test]
async fn test_set_price_moves_to_processing() {
    let h = harness();
    let order = processing_order(&h).await;
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.price_per_kilo, Some(dec("35")));
}

#[tokio::test]
async fn test_set_price_outside_pending_does_not_mutate() {
    let h = harness();
    let order = processing_order(&h).await;

    let err = h
        .lifecycle
        .set_price_per_kilo(Actor::new(OWNER), order.id, Some(&json!(50)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::InvalidTransition(InvalidTransition {
            from: OrderStatus::Processing,
            to: OrderStatus::Processing,
        })
    ));

    let stored = h.store.order(order.id).unwrap();
    assert_eq!(stored.status, OrderStatus::Processing);
    assert_eq!(stored.price_per_kilo, Some(dec("35")));
}

#[tokio::test]
async fn test_set_price_on_cancelled_order_fails() {
    let h = harness();
    let order = place_order(&h).await;
    h.store.set_status(order.id, OrderStatus::Cancelled);

    let err = h
        .lifecycle
        .set_price_per_kilo(Actor::new(OWNER), order.id, Some(&json!(50)))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition(_)));
    assert_eq!(h.store.order(order.id).unwrap().price_per_kilo, None);
}

#[tokio::test]
async fn test_set_price_unknown_order() {
    let h = harness();
    let err = h
        .lifecycle
        .set_price_per_kilo(Actor::new(OWNER), 77, Some(&json!(50)))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound(77)));
}

#[tokio::test]
async fn test_set_price_requires_shop_owner() {
    let h = harness();
    let order = place_order(&h).await;
    let err = h
        .lifecycle
        .set_price_per_kilo(Actor::new(CUSTOMER), order.id, Some(&json!(50)))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));
    assert_eq!(h.store.order(order.id).unwrap().status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_set_price_rejects_bad_price() {
    let h = harness();
    let order = place_order(&h).await;
    let err = h
        .lifecycle
        .set_price_per_kilo(Actor::new(OWNER), order.id, Some(&json!("cheap")))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation { field: "price_per_kilo", .. }));
}

#[tokio::test]
async fn test_update_status_completes_processing_order() {
    let h = harness();
    let order = processing_order(&h).await;

    let done = h
        .lifecycle
        .update_status(Actor::new(OWNER), order.id, "Completed", Some("Delivered to guard"))
        .await
        .unwrap();
    assert_eq!(done.status, OrderStatus::Completed);
    assert_eq!(done.notes.as_deref(), Some("Delivered to guard"));
}

#[tokio::test]
async fn test_update_status_follows_only_machine_edges() {
    for from in OrderStatus::ALL {
        for to in OrderStatus::ALL {
            let h = harness();
            let order = place_order(&h).await;
            h.store.set_status(order.id, from);

            let result = h
                .lifecycle
                .update_status(Actor::new(OWNER), order.id, to.as_str(), None)
                .await;
            let stored = h.store.order(order.id).unwrap();

            if from.can_transition_to(to) {
                assert_eq!(result.unwrap().status, to, "{from} -> {to}");
                assert_eq!(stored.status, to);
            } else {
                assert!(
                    matches!(result, Err(OrderError::InvalidTransition(_))),
                    "{from} -> {to} should be rejected"
                );
                assert_eq!(stored.status, from, "{from} -> {to} mutated the order");
            }
        }
    }
}

#[tokio::test]
async fn test_update_status_rejects_unknown_status() {
    let h = harness();
    let order = place_order(&h).await;
    let err = h
        .lifecycle
        .update_status(Actor::new(OWNER), order.id, "Shipped", None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation { field: "status", .. }));
}

#[tokio::test]
async fn test_decline_succeeds_exactly_once() {
    let h = harness();
    let order = place_order(&h).await;

    let declined = h
        .lifecycle
        .decline(Actor::new(OWNER), order.id)
        .await
        .unwrap();
    assert_eq!(declined.status, OrderStatus::Declined);

    let err = h
        .lifecycle
        .decline(Actor::new(OWNER), order.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::InvalidTransition(InvalidTransition {
            from: OrderStatus::Declined,
            to: OrderStatus::Declined,
        })
    ));
}

#[tokio::test]
async fn test_decline_terminal_orders_fails() {
    for terminal in [OrderStatus::Completed, OrderStatus::Cancelled] {
        let h = harness();
        let order = place_order(&h).await;
        h.store.set_status(order.id, terminal);

        let err = h
            .lifecycle
            .decline(Actor::new(OWNER), order.id)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition(_)));
        assert_eq!(h.store.order(order.id).unwrap().status, terminal);
    }
}

#[tokio::test]
async fn test_decline_requires_shop_owner() {
    let h = harness();
    let order = place_order(&h).await;
    let err = h
        .lifecycle
        .decline(Actor::new(CUSTOMER), order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));
}

#[tokio::test]
async fn test_cancel_with_reason_and_notes() {
    let h = harness();
    let order = place_order(&h).await;

    let cancelled = h
        .lifecycle
        .cancel(
            Actor::new(CUSTOMER),
            order.id,
            Some("Changed plans"),
            Some("Will book next week"),
        )
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(
        cancelled.notes.as_deref(),
        Some("Cancelled - Changed plans: Will book next week")
    );
}

#[tokio::test]
async fn test_cancel_processing_with_reason_only() {
    let h = harness();
    let order = processing_order(&h).await;

    let cancelled = h
        .lifecycle
        .cancel(Actor::new(OWNER), order.id, Some("Machine broke down"), None)
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.notes.as_deref(), Some("Cancelled - Machine broke down"));
}

#[tokio::test]
async fn test_cancel_by_unrelated_user_is_forbidden() {
    let h = harness();
    let order = place_order(&h).await;
    let err = h
        .lifecycle
        .cancel(Actor::new(BYSTANDER), order.id, Some("Prank"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));
    assert_eq!(h.store.order(order.id).unwrap().status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_cancel_completed_order_fails() {
    let h = harness();
    let order = processing_order(&h).await;
    h.lifecycle
        .update_status(Actor::new(OWNER), order.id, "Completed", None)
        .await
        .unwrap();

    let err = h
        .lifecycle
        .cancel(Actor::new(CUSTOMER), order.id, Some("Too late"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition(_)));
    assert_eq!(h.store.order(order.id).unwrap().status, OrderStatus::Completed);
}

#[tokio::test]
async fn test_cancel_unknown_order() {
    let h = harness();
    let err = h
        .lifecycle
        .cancel(Actor::new(CUSTOMER), 31, Some("Oops"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound(31)));
}

#[tokio::test]
async fn test_cancel_requires_reason() {
    let h = harness();
    let order = place_order(&h).await;
    let err = h
        .lifecycle
        .cancel(Actor::new(CUSTOMER), order.id, None, Some("no reason given"))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation { field: "reason", .. }));
    assert_eq!(h.store.order(order.id).unwrap().status, OrderStatus::Pending);
}
