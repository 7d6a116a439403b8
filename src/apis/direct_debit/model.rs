use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value of `otpBriStatus` asking BRI to send the OTP to the customer's phone.
pub static OTP_BRI_STATUS_YES: &str = "YES";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Location {
    pub lat: String,
    pub lon: String,
}

// ---- Card token binding ----

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CardTokenOtpRequest {
    pub body: CardTokenOtpBody,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(derive(Debug))]
pub struct CardTokenOtpBody {
    /// Always overwritten with [`OTP_BRI_STATUS_YES`] when the request is sent.
    #[builder(default)]
    pub otp_bri_status: String,
    #[builder(setter(into))]
    pub card_pan: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardTokenOtpResponse {
    pub card_token: String,
    pub status: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CardTokenOtpVerifyRequest {
    pub body: CardTokenOtpVerifyBody,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into), derive(Debug))]
pub struct CardTokenOtpVerifyBody {
    pub card_token: String,
    pub passcode: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardTokenOtpVerifyResponse {
    pub card_token: String,
    pub status: Option<String>,
    pub last4: Option<String>,
    pub expired_date: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeleteCardTokenRequest {
    pub body: DeleteCardTokenBody,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCardTokenBody {
    pub card_token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCardTokenResponse {
    pub status: String,
}

// ---- Charges ----

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentChargeOtpRequest {
    pub body: PaymentChargeOtpBody,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(derive(Debug))]
pub struct PaymentChargeOtpBody {
    #[builder(setter(into))]
    pub card_token: String,
    /// Amount with two decimals, e.g. `"10000.00"`.
    #[builder(setter(into))]
    pub amount: String,
    #[builder(setter(into))]
    pub currency: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentChargeOtpResponse {
    pub charge_token: String,
    pub status: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentChargeOtpVerifyRequest {
    pub body: PaymentChargeOtpVerifyBody,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into), derive(Debug))]
pub struct PaymentChargeOtpVerifyBody {
    pub charge_token: String,
    pub passcode: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentChargeOtpVerifyResponse {
    pub payment_id: String,
    pub status: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChargeDetailRequest {
    pub body: ChargeDetailBody,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeDetailBody {
    pub payment_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeDetailResponse {
    pub payment_id: String,
    pub status: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub remarks: Option<String>,
    pub created_at: Option<String>,
    /// Extra fields of the inquiry result.
    #[serde(flatten)]
    pub additional_info: HashMap<String, serde_json::Value>,
}

// ---- Refunds ----

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RefundRequest {
    pub body: RefundBody,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(derive(Debug))]
pub struct RefundBody {
    #[builder(setter(into))]
    pub card_token: String,
    #[builder(setter(into))]
    pub payment_id: String,
    #[builder(setter(into))]
    pub amount: String,
    #[builder(setter(into))]
    pub currency: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub refund_id: String,
    pub status: Option<String>,
    pub payment_id: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
}
