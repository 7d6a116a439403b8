use crate::{
    apis::{
        direct_debit::{
            CardTokenOtpRequest, CardTokenOtpResponse, CardTokenOtpVerifyRequest,
            CardTokenOtpVerifyResponse, ChargeDetailRequest, ChargeDetailResponse,
            DeleteCardTokenRequest, DeleteCardTokenResponse, PaymentChargeOtpRequest,
            PaymentChargeOtpResponse, PaymentChargeOtpVerifyRequest,
            PaymentChargeOtpVerifyResponse, RefundRequest, RefundResponse, OTP_BRI_STATUS_YES,
        },
        BriClientInner,
    },
    endpoints::EndpointTag,
    signing::SignedRequest,
    Error, Token,
};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// BRI Direct Debit APIs client.
///
/// Every operation takes the OAuth access token of the caller, signs the request with
/// the client secret and returns the typed response record.
#[derive(Clone, Debug)]
pub struct DirectDebitApi {
    inner: Arc<BriClientInner>,
}

impl DirectDebitApi {
    pub(crate) fn new(inner: Arc<BriClientInner>) -> Self {
        Self { inner }
    }

    /// Binds a card: checks the card details against the bank data and, if the phone
    /// number is valid, sends an OTP to the customer.
    #[tracing::instrument(name = "Create Card Token OTP", skip_all)]
    pub async fn create_card_token_otp(
        &self,
        access_token: &Token,
        mut req: CardTokenOtpRequest,
    ) -> Result<CardTokenOtpResponse, Error> {
        req.body.otp_bri_status = OTP_BRI_STATUS_YES.to_string();

        self.call(
            Method::POST,
            EndpointTag::CreateCardTokenOtp,
            access_token,
            &req,
        )
        .await
    }

    /// Verifies the OTP sent by [`create_card_token_otp`](DirectDebitApi::create_card_token_otp).
    #[tracing::instrument(name = "Verify Card Token OTP", skip_all)]
    pub async fn create_card_token_otp_verify(
        &self,
        access_token: &Token,
        req: &CardTokenOtpVerifyRequest,
    ) -> Result<CardTokenOtpVerifyResponse, Error> {
        self.call(
            Method::PATCH,
            EndpointTag::CreateCardTokenOtpVerify,
            access_token,
            req,
        )
        .await
    }

    /// Unbinds a card.
    #[tracing::instrument(name = "Delete Card Token", skip_all)]
    pub async fn delete_card_token(
        &self,
        access_token: &Token,
        req: &DeleteCardTokenRequest,
    ) -> Result<DeleteCardTokenResponse, Error> {
        self.call(
            Method::DELETE,
            EndpointTag::DeleteCardToken,
            access_token,
            req,
        )
        .await
    }

    /// Charges a bound card. BRI sends an OTP to the customer to confirm the payment.
    #[tracing::instrument(
        name = "Create Payment Charge OTP",
        skip_all,
        fields(amount = %req.body.amount, currency = %req.body.currency)
    )]
    pub async fn create_payment_charge_otp(
        &self,
        access_token: &Token,
        req: &PaymentChargeOtpRequest,
    ) -> Result<PaymentChargeOtpResponse, Error> {
        self.call(
            Method::POST,
            EndpointTag::CreatePaymentChargeOtp,
            access_token,
            req,
        )
        .await
    }

    /// Verifies the OTP sent by [`create_payment_charge_otp`](DirectDebitApi::create_payment_charge_otp).
    ///
    /// A `200 OK` the bank has not finalized yet comes back as
    /// [`Error::PendingTransaction`](crate::Error::PendingTransaction): check the charge
    /// later with [`charge_detail`](DirectDebitApi::charge_detail).
    #[tracing::instrument(name = "Verify Payment Charge OTP", skip_all)]
    pub async fn create_payment_charge_otp_verify(
        &self,
        access_token: &Token,
        req: &PaymentChargeOtpVerifyRequest,
    ) -> Result<PaymentChargeOtpVerifyResponse, Error> {
        self.call(
            Method::POST,
            EndpointTag::CreatePaymentChargeOtpVerify,
            access_token,
            req,
        )
        .await
    }

    /// Gets the details of an existing charge.
    #[tracing::instrument(name = "Charge Detail", skip_all, fields(payment_id = %req.body.payment_id))]
    pub async fn charge_detail(
        &self,
        access_token: &Token,
        req: &ChargeDetailRequest,
    ) -> Result<ChargeDetailResponse, Error> {
        self.call(Method::POST, EndpointTag::ChargeDetail, access_token, req)
            .await
    }

    /// Refunds a charge, fully or partially.
    #[tracing::instrument(name = "Refund Direct Debit", skip_all, fields(payment_id = %req.body.payment_id))]
    pub async fn refund_direct_debit(
        &self,
        access_token: &Token,
        req: &RefundRequest,
    ) -> Result<RefundResponse, Error> {
        self.call(Method::POST, EndpointTag::RefundDirectDebit, access_token, req)
            .await
    }

    /// Signs and sends any record to a Direct Debit endpoint, decoding the response as `Res`.
    ///
    /// The typed operations above are thin wrappers around this.
    pub async fn call<Req, Res>(
        &self,
        method: Method,
        endpoint: EndpointTag,
        access_token: &Token,
        req: &Req,
    ) -> Result<Res, Error>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let transport = &self.inner.transport;
        let path = self.inner.endpoints.path(endpoint);
        let body = serde_json::to_vec(req).map_err(|e| transport.fail(Error::Encode(e)))?;
        let mut signed = SignedRequest::new(
            method,
            path,
            access_token,
            self.inner.clock.as_ref(),
            body,
            &self.inner.config.client_secret,
        )
        .map_err(|e| transport.fail(e))?;

        let full_path = format!(
            "{}{}",
            self.inner.config.direct_debit_base_url.trim_end_matches('/'),
            path
        );
        let body = std::mem::take(&mut signed.body);

        transport
            .call(signed.method.clone(), &full_path, signed.headers(), body)
            .await?
            .decode()
    }
}
