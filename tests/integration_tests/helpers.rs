use crate::common::test_context::TestContext;
use bri_rust::apis::direct_debit::{
    CardTokenOtpBodyBuilder, CardTokenOtpRequest, CardTokenOtpVerifyBody,
    CardTokenOtpVerifyRequest, PaymentChargeOtpBodyBuilder, PaymentChargeOtpRequest,
    PaymentChargeOtpVerifyBody, PaymentChargeOtpVerifyRequest, PaymentChargeOtpVerifyResponse,
};

pub fn card_token_request(ctx: &TestContext) -> CardTokenOtpRequest {
    CardTokenOtpRequest {
        body: CardTokenOtpBodyBuilder::default()
            .card_pan(ctx.card_pan.as_str())
            .phone_number(ctx.phone_number.as_str())
            .email("some.one@email.com")
            .build()
            .unwrap(),
    }
}

/// Binds the test card and returns its verified card token.
pub async fn bind_card(ctx: &TestContext) -> anyhow::Result<String> {
    let res = ctx
        .client
        .direct_debit
        .create_card_token_otp(&ctx.access_token, card_token_request(ctx))
        .await?;

    let res = ctx
        .client
        .direct_debit
        .create_card_token_otp_verify(
            &ctx.access_token,
            &CardTokenOtpVerifyRequest {
                body: CardTokenOtpVerifyBody {
                    card_token: res.card_token,
                    passcode: ctx.otp(),
                },
            },
        )
        .await?;

    Ok(res.card_token)
}

/// Starts a charge on `card_token` and verifies its OTP.
pub async fn charge(
    ctx: &TestContext,
    card_token: &str,
    amount: &str,
) -> Result<PaymentChargeOtpVerifyResponse, bri_rust::Error> {
    let res = ctx
        .client
        .direct_debit
        .create_payment_charge_otp(
            &ctx.access_token,
            &PaymentChargeOtpRequest {
                body: PaymentChargeOtpBodyBuilder::default()
                    .card_token(card_token)
                    .amount(amount)
                    .currency("IDR")
                    .remarks("integration test")
                    .build()
                    .unwrap(),
            },
        )
        .await?;

    ctx.client
        .direct_debit
        .create_payment_charge_otp_verify(
            &ctx.access_token,
            &PaymentChargeOtpVerifyRequest {
                body: PaymentChargeOtpVerifyBody {
                    charge_token: res.charge_token,
                    passcode: ctx.otp(),
                },
            },
        )
        .await
}
