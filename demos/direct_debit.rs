use anyhow::Context;
use bri_rust::{
    apis::direct_debit::{
        CardTokenOtpBodyBuilder, CardTokenOtpRequest, CardTokenOtpVerifyBody,
        CardTokenOtpVerifyRequest, ChargeDetailBody, ChargeDetailRequest,
        PaymentChargeOtpBodyBuilder, PaymentChargeOtpRequest, PaymentChargeOtpVerifyBody,
        PaymentChargeOtpVerifyRequest, RefundBodyBuilder, RefundRequest,
    },
    client::ClientConfig,
    BriClient, Token,
};
use std::io::{BufRead, Write};

fn read_config() -> anyhow::Result<ClientConfig> {
    config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("BRI"))
        .build()?
        .try_deserialize()
        .context("Failed to assemble the required configuration")
}

fn env(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{} is not set", name))
}

fn prompt(question: &str) -> anyhow::Result<String> {
    print!("{}: ", question);
    std::io::stdout().flush()?;

    let line = std::io::stdin()
        .lock()
        .lines()
        .next()
        .context("No input")??;
    Ok(line.trim().to_string())
}

async fn run() -> anyhow::Result<()> {
    let bri = BriClient::new(read_config()?);
    let access_token = Token::new(env("BRI_ACCESS_TOKEN")?);

    // Bind a card
    let card = bri
        .direct_debit
        .create_card_token_otp(
            &access_token,
            CardTokenOtpRequest {
                body: CardTokenOtpBodyBuilder::default()
                    .card_pan(env("DEMO_CARD_PAN")?)
                    .phone_number(env("DEMO_PHONE_NUMBER")?)
                    .build()?,
            },
        )
        .await?;
    tracing::info!("Card binding started: {:?}", card);

    let card = bri
        .direct_debit
        .create_card_token_otp_verify(
            &access_token,
            &CardTokenOtpVerifyRequest {
                body: CardTokenOtpVerifyBody {
                    card_token: card.card_token,
                    passcode: prompt("Card binding OTP")?,
                },
            },
        )
        .await?;
    tracing::info!("Card bound: {:?}", card);

    // Charge it
    let charge = bri
        .direct_debit
        .create_payment_charge_otp(
            &access_token,
            &PaymentChargeOtpRequest {
                body: PaymentChargeOtpBodyBuilder::default()
                    .card_token(card.card_token.clone())
                    .amount("10000.00")
                    .currency("IDR")
                    .remarks("Demo charge")
                    .build()?,
            },
        )
        .await?;
    tracing::info!("Charge started: {:?}", charge);

    let payment = bri
        .direct_debit
        .create_payment_charge_otp_verify(
            &access_token,
            &PaymentChargeOtpVerifyRequest {
                body: PaymentChargeOtpVerifyBody {
                    charge_token: charge.charge_token,
                    passcode: prompt("Charge OTP")?,
                },
            },
        )
        .await?;
    tracing::info!("Charge verified: {:?}", payment);

    let detail = bri
        .direct_debit
        .charge_detail(
            &access_token,
            &ChargeDetailRequest {
                body: ChargeDetailBody {
                    payment_id: payment.payment_id.clone(),
                },
            },
        )
        .await?;
    tracing::info!("{:#?}", detail);

    // And give the money back
    let refund = bri
        .direct_debit
        .refund_direct_debit(
            &access_token,
            &RefundRequest {
                body: RefundBodyBuilder::default()
                    .card_token(card.card_token)
                    .payment_id(payment.payment_id)
                    .amount("10000.00")
                    .currency("IDR")
                    .reason("Demo refund")
                    .build()?,
            },
        )
        .await?;
    tracing::info!("Refunded: {:?}", refund);

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
