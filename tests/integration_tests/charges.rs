use crate::{
    common::test_context::TestContext,
    integration_tests::helpers::{bind_card, card_token_request, charge},
};
use bri_rust::{
    apis::direct_debit::{
        ChargeDetailBody, ChargeDetailRequest, PaymentChargeOtpBodyBuilder,
        PaymentChargeOtpRequest,
    },
    Error,
};

#[tokio::test]
async fn charge_and_inquiry() {
    let ctx = TestContext::start().await;
    let card_token = bind_card(&ctx).await.unwrap();

    let payment = charge(&ctx, &card_token, "10000.00").await.unwrap();
    assert_eq!(payment.amount.as_deref(), Some("10000.00"));
    assert_eq!(payment.currency.as_deref(), Some("IDR"));

    let detail = ctx
        .client
        .direct_debit
        .charge_detail(
            &ctx.access_token,
            &ChargeDetailRequest {
                body: ChargeDetailBody {
                    payment_id: payment.payment_id.clone(),
                },
            },
        )
        .await
        .unwrap();

    assert_eq!(detail.payment_id, payment.payment_id);
    assert_eq!(detail.amount, payment.amount);
    if ctx.is_mock() {
        assert_eq!(detail.status.as_deref(), Some("success"));
        assert!(detail.created_at.is_some());
        assert_eq!(
            detail.additional_info.get("cardToken"),
            Some(&serde_json::json!(card_token))
        );
    }
}

#[tokio::test]
async fn charging_an_unverified_card_fails() {
    let ctx = TestContext::start().await;

    let res = ctx
        .client
        .direct_debit
        .create_card_token_otp(&ctx.access_token, card_token_request(&ctx))
        .await
        .unwrap();

    let err = ctx
        .client
        .direct_debit
        .create_payment_charge_otp(
            &ctx.access_token,
            &PaymentChargeOtpRequest {
                body: PaymentChargeOtpBodyBuilder::default()
                    .card_token(res.card_token)
                    .amount("10000.00")
                    .currency("IDR")
                    .build()
                    .unwrap(),
            },
        )
        .await
        .expect_err("Charge succeeded");

    assert!(matches!(err, Error::Api(_)), "{}", err);
}

#[cfg(not(feature = "acceptance-tests"))]
#[tokio::test]
async fn unsettled_charge_is_pending() {
    let ctx = TestContext::start().await;
    let card_token = bind_card(&ctx).await.unwrap();

    let err = charge(&ctx, &card_token, crate::common::PENDING_CHARGE_AMOUNT)
        .await
        .expect_err("Charge settled");

    assert!(matches!(err, Error::PendingTransaction(_)), "{}", err);
}

#[tokio::test]
async fn inquiry_of_unknown_payment_fails() {
    let ctx = TestContext::start().await;

    let err = ctx
        .client
        .direct_debit
        .charge_detail(
            &ctx.access_token,
            &ChargeDetailRequest {
                body: ChargeDetailBody {
                    payment_id: "does-not-exist".into(),
                },
            },
        )
        .await
        .expect_err("Inquiry succeeded");

    assert!(matches!(err, Error::Api(_)), "{}", err);
}
